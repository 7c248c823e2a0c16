//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and under which name artifacts are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub directory: PathBuf,
    /// File name without extension
    pub stem: String,
    /// Document title
    pub title: String,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            stem: "design_document".to_string(),
            title: "Game Design Document".to_string(),
            color: true,
        }
    }
}
