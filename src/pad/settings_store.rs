use crate::pad::settings::PadSettings;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const PAD_SETTINGS_FILE_NAME: &str = "signpad_settings.json";

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(PAD_SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

pub fn load() -> Result<PadSettings> {
    load_from_path(&resolve_settings_path()?)
}

pub fn save(settings: &PadSettings) -> Result<PathBuf> {
    let path = resolve_settings_path()?;
    save_to_path(&path, settings)?;
    Ok(path)
}

/// Missing or blank files load as defaults.
pub fn load_from_path(path: &Path) -> Result<PadSettings> {
    if !path.exists() {
        return Ok(PadSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read pad settings file {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(PadSettings::default());
    }

    serde_json::from_str(&content)
        .with_context(|| format!("deserialize pad settings file {}", path.display()))
}

pub fn save_to_path(path: &Path, settings: &PadSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create pad settings parent folder {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(settings).context("serialize pad settings")?;
    std::fs::write(path, json)
        .with_context(|| format!("write pad settings file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_path_is_resolved_next_to_executable() {
        let exe = Path::new("/tmp/myapp/bin/signpad");
        let path = settings_path_from_exe_path(exe).expect("path");
        assert_eq!(path, Path::new("/tmp/myapp/bin").join(PAD_SETTINGS_FILE_NAME));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = load_from_path(&dir.path().join(PAD_SETTINGS_FILE_NAME)).expect("load");
        assert_eq!(loaded, PadSettings::default());
    }

    #[test]
    fn blank_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(PAD_SETTINGS_FILE_NAME);
        std::fs::write(&path, "  \n").expect("write");
        assert_eq!(load_from_path(&path).expect("load"), PadSettings::default());
    }

    #[test]
    fn store_roundtrip_creates_parent_folder() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join(PAD_SETTINGS_FILE_NAME);

        let mut settings = PadSettings::default();
        settings.pen_width = 12;
        settings.redraw_on_pen_change = false;

        save_to_path(&path, &settings).expect("save settings");
        assert_eq!(load_from_path(&path).expect("load settings"), settings);
    }

    #[test]
    fn malformed_file_reports_path_in_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(PAD_SETTINGS_FILE_NAME);
        std::fs::write(&path, "{ not json").expect("write");

        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains(PAD_SETTINGS_FILE_NAME));
    }
}
