use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{CropRegion, ExecutionMode, GridSpec, OutputFormat};

/// Composition parameters suitable for config files and presets.
///
/// Every field has a default so presets may set only what they care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionParams {
    /// Region cropped from every normalized image; `None` until set
    pub crop: Option<CropRegion>,
    pub grid: GridSpec,
    /// Encoding of tiles in split mode
    pub format: OutputFormat,
    /// Tile file name prefix in split mode
    pub prefix: String,
    pub mode: ExecutionMode,
    /// Add a `manifest.json` entry to tile archives
    pub manifest: bool,
}

impl Default for CompositionParams {
    fn default() -> Self {
        Self {
            crop: None,
            grid: GridSpec::default(),
            format: OutputFormat::Png,
            prefix: "tile".to_string(),
            mode: ExecutionMode::Sequential,
            manifest: false,
        }
    }
}

impl CompositionParams {
    pub fn require_crop(&self) -> Result<CropRegion> {
        self.crop.ok_or(Error::InvalidArgument {
            arg: "crop",
            value: "<missing>".to_string(),
        })
    }

    /// Load a preset. Leading `//` comment lines before the JSON body are skipped.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let json_start = content.find('{').ok_or_else(|| Error::InvalidArgument {
            arg: "preset",
            value: "no JSON object found".to_string(),
        })?;
        Ok(serde_json::from_str(&content[json_start..])?)
    }

    /// Save as a preset with a short comment header.
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let mut content = String::new();
        content.push_str("// sazan composition preset\n");
        content.push_str(&format!("// Version: {}\n", env!("CARGO_PKG_VERSION")));
        content.push_str(&format!(
            "// Generated: {}\n\n",
            chrono::Utc::now().to_rfc3339()
        ));
        content.push_str(&serde_json::to_string_pretty(self)?);
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }
}
