//! Editor configuration.

use serde::{Deserialize, Serialize};

/// Tunables for one editor session. Every field has a default, so a partial
/// JSON object (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum snapshots kept in history. The initial snapshot always survives.
    pub history_depth: usize,
    pub autosave_debounce_ms: u64,
    /// Fraction of the full fit used by auto-zoom.
    pub fit_margin: f64,
    /// Factor applied to the zoom slider value.
    pub zoom_slider_scale: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Diagonal offset applied per paste.
    pub paste_offset: f64,
    pub workspace_width: f64,
    pub workspace_height: f64,
    pub workspace_fill: String,
    /// Raster export quality, `0.0..=1.0`.
    pub export_quality: f64,
    /// Raster export pixels per workspace unit.
    pub export_multiplier: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 50,
            autosave_debounce_ms: 500,
            fit_margin: 0.85,
            zoom_slider_scale: 0.5,
            min_zoom: 0.1,
            max_zoom: 2.5,
            paste_offset: 10.0,
            workspace_width: 900.0,
            workspace_height: 1200.0,
            workspace_fill: "white".to_string(),
            export_quality: 1.0,
            export_multiplier: 1.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
