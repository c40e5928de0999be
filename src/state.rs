use std::path::{Path, PathBuf};

use crate::analysis::report::Report;
use crate::chart::ChartData;
use crate::data::model::Manifest;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded manifest (None until a file is loaded).
    pub manifest: Option<Manifest>,

    /// File the manifest was read from.
    pub source: Option<PathBuf>,

    /// Report for the current manifest (cached).
    pub report: Option<Report>,

    /// Chart series for the current manifest (cached).
    pub charts: ChartData,

    /// Whether the passenger table panel is shown.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded manifest and recompute report and charts.
    pub fn set_manifest(&mut self, manifest: Manifest, source: Option<&Path>) {
        self.charts = ChartData::from_selection(&manifest.select_all());
        self.report = Some(Report::build(&manifest));
        self.manifest = Some(manifest);
        self.source = source.map(Path::to_path_buf);
        self.status_message = None;
    }

    /// Write the cached report to `path`.
    pub fn save_report(&mut self, path: &Path) {
        let Some(report) = &self.report else {
            self.status_message = Some("No manifest loaded.".to_string());
            return;
        };
        match std::fs::write(path, report.render()) {
            Ok(()) => {
                log::info!("Report saved to {}", path.display());
                self.status_message = Some(format!("Report saved to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to save report: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::manifest_from_rows;

    #[test]
    fn set_manifest_refreshes_caches() {
        let mut state = AppState {
            status_message: Some("stale".to_string()),
            ..AppState::default()
        };
        let manifest = manifest_from_rows(&[
            r#"1,1,1,"A",female,30,0,0,T,80,,S"#,
            r#"2,0,3,"B",male,40,0,0,T,8,,S"#,
        ]);
        state.set_manifest(manifest, Some(Path::new("titanic.csv")));

        assert_eq!(state.manifest.as_ref().map(Manifest::len), Some(2));
        assert_eq!(state.source.as_deref(), Some(Path::new("titanic.csv")));
        assert_eq!(state.report.as_ref().map(|r| r.overall.population), Some(2));
        assert_eq!(state.charts.genders.len(), 2);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn saving_without_manifest_reports_status() {
        let mut state = AppState::default();
        state.save_report(Path::new("unused.txt"));
        assert_eq!(state.status_message.as_deref(), Some("No manifest loaded."));
    }
}
