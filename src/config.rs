use crate::editor::CanvasRect;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Editor settings, loadable from a JSON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Name used for exports and saves when the user gives none.
    pub default_workflow_name: String,
    /// Distance from a parent node at which a new sub-node is placed.
    pub sub_node_offset_x: f64,
    pub sub_node_offset_y: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Keep dragged nodes inside the canvas.
    pub clamp_to_canvas: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_workflow_name: "workflow".to_string(),
            sub_node_offset_x: 0.0,
            sub_node_offset_y: 120.0,
            canvas_width: 1600.0,
            canvas_height: 900.0,
            clamp_to_canvas: false,
        }
    }
}

impl EditorConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        Ok(())
    }

    /// Canvas placed at the client origin with the configured size.
    pub fn canvas(&self) -> CanvasRect {
        CanvasRect::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }
}
