//! Marker strings and council variable names used to classify table rows
//!
//! These mirror the labels the billing spreadsheets are filled in with. Only
//! the tenant total marker ignores case; the council marker, council variable
//! names and prefixes are matched case-sensitively.

// =============================================================================
// Utility Table Markers
// =============================================================================

/// Marks a tenant subtotal row in an electricity/water/effluent table
pub const TENANT_TOTAL_MARKER: &str = "TOTAL";

/// Marks the municipal (council) meter row in a water/effluent table
pub const COUNCIL_MARKER: &str = "COUNCIL";

// =============================================================================
// Other Info Markers
// =============================================================================

/// Substring identifying owner-metered solar generation rows
pub const SOLAR_MARKER: &str = "MOL Solar";

/// Substring identifying owner-metered readings of the municipal supply
pub const MOL_MUNI_MARKER: &str = "MOL Muni";

// =============================================================================
// Council Variable Names
// =============================================================================

pub const MUNI_PEAK: &str = "Muni Peak";
pub const MUNI_STANDARD: &str = "Muni Standard";
pub const MUNI_OFF_PEAK: &str = "Muni OP";
pub const MUNI_MAX_DEMAND: &str = "Muni Max Demand";
pub const MUNI_NETWORK_ACCESS: &str = "Muni Network Access";
pub const MUNI_FIXED_CHARGE: &str = "Muni Fixed Charge";
pub const MUNI_WATER: &str = "Muni Water";
pub const MUNI_EFFLUENT: &str = "Muni Effluent";

// =============================================================================
// Display
// =============================================================================

/// Currency prefix for Rand amounts
pub const CURRENCY_PREFIX: &str = "R";
