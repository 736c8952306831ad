// main.rs - Desktop entry point for the Game of Life driver

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use life_driver::config::{Args, DriverConfig};
use life_driver::geometry::Grid;
use life_driver::ui::LifeApp;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();
    let config = DriverConfig::try_from(Args::parse()).context("invalid driver configuration")?;

    let (canvas_w, canvas_h) = Grid::new(config.width, config.height).pixel_size(config.cell_size);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([(canvas_w + 48).max(560) as f32, (canvas_h + 220) as f32]),
        ..Default::default()
    };

    info!(width = config.width, height = config.height, "starting Game of Life driver");
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc, &config))),
    )
    .map_err(|err| anyhow!("window failed: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
