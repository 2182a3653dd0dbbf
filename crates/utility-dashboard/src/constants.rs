//! Default locations, sheet names and column headers
//!
//! Defaults match the layout the billing workbooks have always used, with each
//! workbook exported as a folder holding one CSV per sheet. Everything here can
//! be overridden in dashboard.toml.

// =============================================================================
// Config
// =============================================================================

/// Default config file path
pub const CONFIG_FILE: &str = "dashboard.toml";

// =============================================================================
// Folders
// =============================================================================

/// One sub-folder per month, each holding one folder per building
pub const MONTHS_DIR: &str = "Months";

/// Council and solar variables, one CSV per month
pub const OTHER_INFO_DIR: &str = "Alrode Other Info";

/// Extension of exported sheets
pub const SHEET_EXTENSION: &str = "csv";

// =============================================================================
// Sheet Names
// =============================================================================

pub const ELECTRICITY_SHEET: &str = "Elec Excel";
pub const WATER_SHEET: &str = "Water Excel";
pub const EFFLUENT_SHEET: &str = "Effluent Excel";

// =============================================================================
// Column Headers
// =============================================================================

pub const TENANT_NAME_COLUMN: &str = "TENANT'S NAME";
pub const CONSUMPTION_COLUMN: &str = "CONSUMPTION";
pub const COST_COLUMN: &str = "COST";

pub const VARIABLE_NAME_COLUMN: &str = "Variable";
pub const VALUE_COLUMN: &str = "Value";
pub const RAND_COLUMN: &str = "Rand";

// =============================================================================
// Export File Names (prefixed with month and building)
// =============================================================================

pub const WALK_AWAY_FILENAME: &str = "walk_away.csv";
pub const SOLAR_FILENAME: &str = "solar_savings.csv";
pub const OVERCHARGE_FILENAME: &str = "overcharge.csv";
