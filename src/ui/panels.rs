use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(tables) = &state.tables {
            let (min_year, max_year) = state.year_bounds;
            ui.label(format!(
                "{} rows loaded, years {min_year}–{max_year}",
                tables.row_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Year-range selector
// ---------------------------------------------------------------------------

/// Render the published-year range control: two sliders bounded by the
/// scorecard's year span. Dragging one end past the other pushes the other
/// end along, so the selection always satisfies `start <= end`.
pub fn year_selector(ui: &mut Ui, state: &mut AppState) {
    if state.tables.is_none() {
        return;
    }
    let (min_year, max_year) = state.year_bounds;
    let mut start = state.selection.start;
    let mut end = state.selection.end;

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Published Year");
        ui.separator();
        let start_changed = ui
            .add(egui::Slider::new(&mut start, min_year..=max_year).text("from"))
            .changed();
        let end_changed = ui
            .add(egui::Slider::new(&mut end, min_year..=max_year).text("to"))
            .changed();

        if start_changed {
            state.set_selection_start(start);
        } else if end_changed {
            state.set_selection_end(end);
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

/// Pick another dataset directory at runtime. A failed load keeps the
/// current dataset and reports through the status line.
pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open dataset folder")
        .pick_folder();

    if let Some(dir) = folder {
        match crate::data::loader::load_dir(&dir) {
            Ok(tables) => {
                log::info!(
                    "Loaded {} rows from {}",
                    tables.row_count(),
                    dir.display()
                );
                state.set_tables(tables);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
