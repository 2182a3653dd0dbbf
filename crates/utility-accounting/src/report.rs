//! The three-level monthly report for one building

use tracing::debug;

use crate::error::Result;
use crate::overcharge::OverchargeResult;
use crate::solar::SolarResult;
use crate::tables::{MonthSelection, MonthTables};
use crate::walk_away::WalkAwayResult;

/// Walk-away, solar savings and overcharge figures for one selection
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub selection: MonthSelection,
    pub walk_away: WalkAwayResult,
    pub solar: SolarResult,
    pub overcharge: OverchargeResult,
}

impl MonthlyReport {
    /// Compute every level; the first missing council variable aborts the report
    pub fn compute(tables: &MonthTables) -> Result<Self> {
        debug!(
            "Computing report for {} ({})",
            tables.selection.building, tables.selection.month
        );

        let walk_away = WalkAwayResult::compute(tables)?;
        let solar = SolarResult::compute(&tables.other);
        let overcharge = OverchargeResult::compute(tables)?;

        Ok(Self {
            selection: tables.selection.clone(),
            walk_away,
            solar,
            overcharge,
        })
    }
}
