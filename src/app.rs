use std::sync::Arc;

use eframe::egui;

use crate::data::model::BookTables;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BookDashApp {
    pub state: AppState,
}

impl BookDashApp {
    /// Build the app around a dataset loaded at startup.
    pub fn new(tables: Arc<BookTables>) -> Self {
        let mut state = AppState::default();
        state.set_tables(tables);
        Self { state }
    }
}

impl eframe::App for BookDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and year-range selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            ui.separator();
            panels::year_selector(ui, &mut self.state);
        });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}
