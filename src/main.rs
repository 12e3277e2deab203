use std::fs;
use std::path::Path;
use std::sync::Arc;

use eframe::egui;
use log::{info, warn};

use workout_log::config::Config;
use workout_log::{JsonStore, Tracker};

mod app;
use app::WorkoutLogApp;

const UI_FONT: &str = "ui-font";

fn main() -> Result<(), eframe::Error> {
    pretty_env_logger::init();
    let config = Config::from_env();
    info!("using training log {:?}", config.data_file);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gym training log")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gym training log",
        options,
        Box::new(move |cc| {
            if let Some(font_file) = &config.font_file {
                install_font(&cc.egui_ctx, font_file);
            }
            let tracker = Tracker::initialize(JsonStore::new(config.data_file.clone()))?;
            Ok(Box::new(WorkoutLogApp::new(cc, tracker)))
        }),
    )
}

fn install_font(ctx: &egui::Context, path: &Path) {
    let font_data = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("failed to open font file {:?}: {}", path, err);
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        UI_FONT.to_owned(),
        Arc::from(egui::FontData::from_owned(font_data)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, UI_FONT.to_owned());
    }
    ctx.set_fonts(fonts);
}
