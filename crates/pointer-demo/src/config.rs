use std::path::Path;

use anyhow::{Context, Result};
use pointer_input::PointerConfig;
use pointer_input_winit::WinitSourceConfig;
use serde::{Deserialize, Serialize};

/// Settings file for the demo: device tuning plus adapter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub pointer: PointerConfig,
    pub winit: WinitSourceConfig,
}

impl DemoConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read demo config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse demo config: {}", path.display()))
    }
}
