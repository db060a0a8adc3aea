mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use app::BookDashApp;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    // Dataset directory: first CLI argument, default ./dataset.
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./dataset"));

    // A broken dataset at startup is fatal; runtime reloads via the File
    // menu degrade to a status message instead.
    let tables = data::loader::load_dir(&data_dir)
        .with_context(|| format!("loading dataset from {}", data_dir.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Bookdash – Book Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(BookDashApp::new(tables)))),
    ) {
        bail!("eframe exited with an error: {e}");
    }
    Ok(())
}
