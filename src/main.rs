use eframe::egui;
use signpad::gui::SignPadApp;
use signpad::pad::settings_store;
use signpad::pad::PadSettings;

fn main() -> anyhow::Result<()> {
    let (settings, load_error) = match settings_store::load() {
        Ok(settings) => (settings, None),
        Err(err) => (PadSettings::default(), Some(err)),
    };
    signpad::logging::init(
        settings.debug_logging,
        settings.log_file.clone().map(Into::into),
    );
    if let Some(err) = load_error {
        tracing::warn!(error = %format!("{err:#}"), "using default pad settings");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 320.0])
            .with_min_inner_size([320.0, 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Signature Pad",
        native_options,
        Box::new(move |_cc| Box::new(SignPadApp::new(&settings))),
    )
    .map_err(|err| anyhow::anyhow!("run signature pad window: {err}"))
}
