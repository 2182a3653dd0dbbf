//! Utility billing reconciliation for a building
//!
//! Given one month's electricity, water and effluent tables and the council
//! "other info" sheet, computes:
//! - Level 1: tenant recoveries against council charges (walk away)
//! - Level 2: solar savings
//! - Level 3: council overcharge differences
//!
//! All figures are excl. VAT. Loading the tables is left to the caller.

pub mod constants;
pub mod error;
pub mod format;
pub mod overcharge;
pub mod report;
pub mod solar;
pub mod tables;
pub mod utility;
pub mod walk_away;

pub use error::{AccountingError, Result};
pub use format::{DisplayValue, Emphasis, format_value};
pub use overcharge::{DiffKind, OverchargeDiff, OverchargeResult, UtilityOvercharge};
pub use report::MonthlyReport;
pub use solar::SolarResult;
pub use tables::{
    ClassifiedRecord, CouncilVariable, MonthSelection, MonthTables, OtherTable, RowRole, UtilityRecord,
    UtilityTable, VariableRole,
};
pub use utility::{CouncilCharge, Measure, Unit, Utility};
pub use walk_away::{UnitValues, UtilityWalkAway, WalkAwayResult};
