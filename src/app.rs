use std::path::Path;

use eframe::egui::{self, Ui};

use crate::data::model::Manifest;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SurveyApp {
    pub state: AppState,
}

impl SurveyApp {
    pub fn with_manifest(manifest: Manifest, source: &Path) -> Self {
        let mut state = AppState::default();
        state.set_manifest(manifest, Some(source));
        Self { state }
    }
}

impl eframe::App for SurveyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: passenger table ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("passenger_table")
                .default_height(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::passenger_table(ui, &self.state);
                });
        }

        // ---- Central panel: the three charts side by side ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.manifest.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a manifest to view charts  (File → Open…)");
                });
                return;
            }
            let charts = &self.state.charts;
            ui.columns(3, |cols| {
                plot::gender_chart(&mut cols[0], &charts.genders);
                plot::age_histogram(&mut cols[1], &charts.age_histogram);
                plot::class_chart(&mut cols[2], &charts.classes);
            });
        });
    }
}

/// Open the chart window and block until it is closed.
pub fn run(manifest: Manifest, source: &Path) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1450.0, 500.0])
            .with_min_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    let app = SurveyApp::with_manifest(manifest, source);
    eframe::run_native(
        "Titanic Graphs",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))
}
