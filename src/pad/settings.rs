use crate::pad::model::Color;
use serde::{Deserialize, Serialize};

/// Startup configuration for a pad and its host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PadSettings {
    #[serde(default = "default_pen_color")]
    pub pen_color: Color,
    #[serde(default = "default_pen_width")]
    pub pen_width: u32,
    #[serde(default)]
    pub show_base_line: bool,
    #[serde(default = "default_redraw_on_pen_change")]
    pub redraw_on_pen_change: bool,
    #[serde(default = "default_background_color")]
    #[serde(alias = "fill_color")]
    pub background_color: Color,
    #[serde(default)]
    pub export_add_background: bool,
    #[serde(default = "default_export_crop_to_content")]
    pub export_crop_to_content: bool,
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_pen_color() -> Color {
    Color::BLUE
}

fn default_pen_width() -> u32 {
    2
}

fn default_redraw_on_pen_change() -> bool {
    true
}

fn default_background_color() -> Color {
    Color::WHITE
}

fn default_export_crop_to_content() -> bool {
    true
}

impl Default for PadSettings {
    fn default() -> Self {
        Self {
            pen_color: default_pen_color(),
            pen_width: default_pen_width(),
            show_base_line: false,
            redraw_on_pen_change: default_redraw_on_pen_change(),
            background_color: default_background_color(),
            export_add_background: false,
            export_crop_to_content: default_export_crop_to_content(),
            debug_logging: false,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_pad_settings() {
        let mut settings = PadSettings::default();
        settings.pen_width = 7;
        settings.show_base_line = true;
        settings.log_file = Some("signpad.log".into());

        let json = serde_json::to_string(&settings).expect("serialize");
        let loaded: PadSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_fields_fall_back_to_widget_defaults() {
        let loaded: PadSettings =
            serde_json::from_str(r#"{ "pen_width": 5 }"#).expect("deserialize");
        assert_eq!(loaded.pen_width, 5);
        assert_eq!(loaded.pen_color, Color::BLUE);
        assert!(loaded.redraw_on_pen_change);
        assert!(!loaded.show_base_line);
        assert!(loaded.export_crop_to_content);
        assert!(!loaded.export_add_background);
        assert_eq!(loaded.background_color, Color::WHITE);
    }

    #[test]
    fn fill_color_alias_sets_background() {
        let loaded: PadSettings = serde_json::from_str(
            r#"{ "fill_color": { "r": 1, "g": 2, "b": 3, "a": 255 } }"#,
        )
        .expect("deserialize");
        assert_eq!(loaded.background_color, Color::rgba(1, 2, 3, 255));
    }
}
