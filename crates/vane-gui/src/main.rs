//! Desktop front-end: one window, one lookup at a time.

use anyhow::Result;

mod app;
mod service;

fn main() -> Result<()> {
    // Initialize core
    vane_core::init()?;

    let (config, _validation) = vane_core::Config::load_validated()?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([
            config.gui.window_width as f32,
            config.gui.window_height as f32,
        ]),
        ..Default::default()
    };

    eframe::run_native(
        "Vane",
        options,
        Box::new(move |_cc| {
            let app = app::VaneApp::new(&config)?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start GUI: {}", e))
}
