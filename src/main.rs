#![deny(missing_docs)]
//! Entry point for the Deepfake Detection window.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use deepfake_detect::config;
use deepfake_detect::egui_app::controller::DetectorController;
use deepfake_detect::egui_app::ui::{
    EguiApp, MIN_WINDOW_SIZE, WINDOW_POSITION, WINDOW_SIZE, WINDOW_TITLE,
};
use deepfake_detect::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size(WINDOW_SIZE)
        .with_min_inner_size(MIN_WINDOW_SIZE)
        .with_position(WINDOW_POSITION);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(|_cc| {
            let app: Box<dyn eframe::App> = match config::load_or_default() {
                Ok(settings) => {
                    tracing::info!(
                        model = %settings.model_path.display(),
                        backend = %settings.backend,
                        "Detector settings loaded"
                    );
                    Box::new(EguiApp::new(DetectorController::with_burn_model(settings)))
                }
                Err(err) => {
                    tracing::error!("Failed to load config: {err}");
                    Box::new(LaunchError {
                        message: format!("Failed to load config: {err}"),
                    })
                }
            };
            Ok(app)
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start");
                ui.label(&self.message);
            });
        });
    }
}
