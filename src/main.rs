mod app;
mod geometry;
mod settings;
mod style;
mod svg;
mod timeline;
mod util;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use settings::{Args, Settings};

fn setup_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let settings = Settings::from(Args::parse());

    if let Some(path) = settings.export_path.clone() {
        let timeline = settings
            .load_timeline()
            .context("failed to load timeline for export")?;
        let (width, height) = settings.export_size;
        return svg::export_svg(&timeline, &path, width, height);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "phase-wheel",
        options,
        Box::new(move |cc| Ok(Box::new(app::PhaseWheelApp::new(cc, settings)))),
    )
    .map_err(|error| anyhow!("failed to run viewer: {error}"))
}
