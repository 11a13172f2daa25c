pub mod pad_view;

use crate::pad::export::default_export_path;
use crate::pad::settings_store;
use crate::pad::model::Color;
use crate::pad::{PadSettings, SignPad};
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use eframe::egui;
use pad_view::{from_color32, to_color32, PadView};
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_SUBDIR: &str = "signatures";

pub fn export_folder_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(EXPORT_SUBDIR))
}

pub fn ensure_export_folder() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    let output = export_folder_from_exe_path(&exe_path)?;
    fs::create_dir_all(&output)
        .with_context(|| format!("create signature export folder {}", output.display()))?;
    Ok(output)
}

fn palette() -> [Color; 5] {
    [
        Color::BLUE,
        Color::rgba(0, 0, 0, 255),
        Color::rgba(231, 76, 60, 255),
        Color::rgba(46, 204, 113, 255),
        Color::rgba(155, 89, 182, 255),
    ]
}

/// Desktop host: a toolbar above a single signature pad.
pub struct SignPadApp {
    view: PadView,
    settings: PadSettings,
    add_background: bool,
    crop_to_content: bool,
    status: Option<String>,
}

impl SignPadApp {
    pub fn new(settings: &PadSettings) -> Self {
        Self {
            view: PadView::new(SignPad::from_settings(settings)),
            settings: settings.clone(),
            add_background: settings.export_add_background,
            crop_to_content: settings.export_crop_to_content,
            status: None,
        }
    }

    /// Settings as shown in the toolbar right now. Logging options are kept
    /// from the loaded file.
    pub fn current_settings(&self) -> PadSettings {
        let pad = self.view.pad();
        PadSettings {
            pen_color: pad.pen_color(),
            pen_width: pad.pen_width(),
            show_base_line: pad.show_base_line(),
            redraw_on_pen_change: pad.redraw_on_pen_change(),
            background_color: pad.background_color(),
            export_add_background: self.add_background,
            export_crop_to_content: self.crop_to_content,
            ..self.settings.clone()
        }
    }

    fn persist_settings(&mut self) {
        let current = self.current_settings();
        if current == self.settings {
            return;
        }
        match settings_store::save(&current) {
            Ok(path) => tracing::debug!(path = %path.display(), "signpad settings saved"),
            Err(err) => tracing::warn!(error = %format!("{err:#}"), "signpad settings not saved"),
        }
        self.settings = current;
    }

    fn save(&mut self) {
        let target = ensure_export_folder().map(|dir| default_export_path(&dir, Local::now()));
        self.status = Some(match target {
            Ok(path) => {
                match self
                    .view
                    .pad_mut()
                    .export(&path, self.add_background, self.crop_to_content)
                {
                    Ok(()) => format!("Saved {}", path.display()),
                    Err(err) => format!("Save failed: {err}"),
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "signature export folder unavailable");
                format!("Save failed: {err:#}")
            }
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                self.view.pad_mut().clear(true);
                self.status = None;
            }
            if ui.button("Redraw").clicked() {
                self.view.pad_mut().redraw();
            }
            if ui.button("Save").clicked() {
                self.save();
            }
            ui.separator();

            let mut width = self.view.pad().pen_width();
            if ui
                .add(egui::Slider::new(&mut width, 0..=40).text("Width"))
                .changed()
            {
                self.view.pad_mut().set_pen_width(width);
                changed = true;
            }

            let current = self.view.pad().pen_color();
            for color in palette() {
                let mut button = egui::Button::new("  ").fill(to_color32(color));
                if color == current {
                    button = button.stroke(egui::Stroke::new(2.0, egui::Color32::WHITE));
                }
                if ui.add(button).clicked() {
                    self.view.pad_mut().set_pen_color(color);
                    changed = true;
                }
            }

            let mut custom = to_color32(current);
            if ui.color_edit_button_srgba(&mut custom).changed() {
                self.view.pad_mut().set_pen_color(from_color32(custom));
                changed = true;
            }
        });

        ui.horizontal(|ui| {
            let mut base_line = self.view.pad().show_base_line();
            if ui.checkbox(&mut base_line, "Base line").changed() {
                self.view.pad_mut().set_show_base_line(base_line);
                changed = true;
            }
            let mut auto_redraw = self.view.pad().redraw_on_pen_change();
            if ui.checkbox(&mut auto_redraw, "Redraw on pen change").changed() {
                self.view.pad_mut().set_redraw_on_pen_change(auto_redraw);
                changed = true;
            }
            ui.separator();
            changed |= ui
                .checkbox(&mut self.add_background, "Export background")
                .changed();
            changed |= ui
                .checkbox(&mut self.crop_to_content, "Crop to signature")
                .changed();
        });

        if changed {
            self.persist_settings();
        }
    }
}

impl eframe::App for SignPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("signpad_toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::bottom("signpad_status").show(ctx, |ui| {
            let strokes = self.view.pad().history().len();
            match &self.status {
                Some(status) => ui.label(format!("{strokes} strokes | {status}")),
                None => ui.label(format!("{strokes} strokes")),
            };
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            let desired = ui.available_size();
            self.view.ui(ui, desired);
        });
    }
}
