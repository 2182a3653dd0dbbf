//! Configuration for the utilities dashboard

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use utility_accounting::Utility;

use crate::constants;

// =============================================================================
// File-based Configuration (dashboard.toml)
// =============================================================================

/// Configuration loaded from dashboard.toml
///
/// Every section is optional; omitted fields fall back to the standard
/// workbook layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub paths: PathsConfig,
    pub sheets: SheetsConfig,
    pub columns: ColumnsConfig,
}

/// Where month folders and other info sheets live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Folder of month folders, each holding one folder per building
    pub months_dir: PathBuf,
    /// Folder of other info sheets, one `<month>.csv` per month
    pub other_info_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            months_dir: PathBuf::from(constants::MONTHS_DIR),
            other_info_dir: PathBuf::from(constants::OTHER_INFO_DIR),
        }
    }
}

/// Sheet (file stem) names inside a building folder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub electricity: String,
    pub water: String,
    pub effluent: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            electricity: constants::ELECTRICITY_SHEET.to_string(),
            water: constants::WATER_SHEET.to_string(),
            effluent: constants::EFFLUENT_SHEET.to_string(),
        }
    }
}

impl SheetsConfig {
    pub fn sheet(&self, utility: Utility) -> &str {
        match utility {
            Utility::Electricity => &self.electricity,
            Utility::Water => &self.water,
            Utility::Effluent => &self.effluent,
        }
    }
}

/// Column headers, matched trimmed and case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub tenant_name: String,
    pub consumption: String,
    pub cost: String,
    pub variable_name: String,
    pub value: String,
    pub rand: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            tenant_name: constants::TENANT_NAME_COLUMN.to_string(),
            consumption: constants::CONSUMPTION_COLUMN.to_string(),
            cost: constants::COST_COLUMN.to_string(),
            variable_name: constants::VARIABLE_NAME_COLUMN.to_string(),
            value: constants::VALUE_COLUMN.to_string(),
            rand: constants::RAND_COLUMN.to_string(),
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| {
            format!(
                "Failed to parse {}. Check for:\n\
                 - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
                 - Unknown section names (expected [paths], [sheets], [columns])\n\n\
                 See dashboard.toml.example for the expected format.",
                path.display()
            )
        })
    }

    /// Load the config file if present, otherwise use the standard layout
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Resolved settings handed to the table source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub months_dir: PathBuf,
    pub other_info_dir: PathBuf,
    pub sheets: SheetsConfig,
    pub columns: ColumnsConfig,
}

impl SourceConfig {
    /// Resolve relative folders against the data directory, if one is given
    pub fn from_file(file_config: &FileConfig, data_dir: Option<&Path>) -> Self {
        let resolve = |path: &Path| match data_dir {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        };

        Self {
            months_dir: resolve(&file_config.paths.months_dir),
            other_info_dir: resolve(&file_config.paths.other_info_dir),
            sheets: file_config.sheets.clone(),
            columns: file_config.columns.clone(),
        }
    }
}
