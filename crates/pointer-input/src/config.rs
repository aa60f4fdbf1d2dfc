use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::event::WheelVariant;

/// Per-variant factors converting raw wheel amounts into one signed scalar
/// (pixels, positive = scrolling away from the user).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelScale {
    pub notch: f64,
    pub line: f64,
    pub pixel: f64,
}

impl Default for WheelScale {
    fn default() -> Self {
        Self {
            notch: 100.0 / 120.0,
            line: -30.0,
            pixel: -1.0,
        }
    }
}

impl WheelScale {
    pub fn factor(&self, variant: WheelVariant) -> f64 {
        match variant {
            WheelVariant::Notch => self.notch,
            WheelVariant::Line => self.line,
            WheelVariant::Pixel => self.pixel,
        }
    }
}

/// Which interaction model to subscribe to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionPreference {
    /// Touch when the source offers contact events, pointer otherwise.
    #[default]
    Auto,
    Pointer,
    Touch,
}

/// Pointer device configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
    pub wheel: WheelScale,
    pub interaction: InteractionPreference,
}

impl PointerConfig {
    /// Load configuration from a path. A missing file yields the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read pointer config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse pointer config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a path as pretty-printed JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write pointer config {}", path.display()))?;
        Ok(())
    }
}
