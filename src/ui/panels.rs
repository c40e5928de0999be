use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Field;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Passenger table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the loaded passengers as a scrollable table.
pub fn passenger_table(ui: &mut Ui, state: &AppState) {
    let Some(manifest) = &state.manifest else {
        ui.label("No manifest loaded.");
        return;
    };
    let passengers = manifest.passengers();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(40.0), Field::ALL.len())
        .header(20.0, |mut header| {
            for field in Field::ALL {
                header.col(|ui: &mut Ui| {
                    ui.strong(field.header());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, passengers.len(), |mut row| {
                let passenger = &passengers[row.index()];
                for field in Field::ALL {
                    row.col(|ui: &mut Ui| {
                        ui.label(field.display_value(passenger));
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save Report…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(manifest) = &state.manifest {
            let source = state
                .source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            let aged = manifest.select_all().with_field(Field::Age).len();
            ui.label(format!(
                "{} passengers loaded ({aged} with recorded age) {source}",
                manifest.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Passenger Table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open passenger manifest")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(manifest) => {
                log::info!("Loaded {} passengers from {}", manifest.len(), path.display());
                state.set_manifest(manifest, Some(&path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save analysis report")
        .set_file_name("analysis.txt")
        .add_filter("Text", &["txt"])
        .save_file();

    if let Some(path) = file {
        state.save_report(&path);
    }
}
