//! Level 3: owner-side meter readings against what the council billed
//!
//! Differences are raw and signed (owner side minus council side). No
//! threshold is applied.

use std::fmt;

use crate::error::Result;
use crate::tables::{MonthTables, OtherTable, UtilityTable, VariableRole};
use crate::utility::{Measure, Utility};
use crate::walk_away::sum_charges;

/// Label of an overcharge figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiffKind {
    Consumption,
    Rand,
}

impl DiffKind {
    pub fn is_currency(self) -> bool {
        self == DiffKind::Rand
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKind::Consumption => write!(f, "Consumption Diff"),
            DiffKind::Rand => write!(f, "Rand Diff"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverchargeDiff {
    pub consumption: f64,
    pub rand: f64,
}

impl OverchargeDiff {
    /// Labelled figures in report order
    pub fn entries(&self) -> [(DiffKind, f64); 2] {
        [(DiffKind::Consumption, self.consumption), (DiffKind::Rand, self.rand)]
    }

    /// "MOL Muni" readings minus the electricity council charges
    ///
    /// The Rand side compares against all six charges, consumption against the
    /// three time-of-use charges.
    pub fn electricity(other: &OtherTable) -> Result<Self> {
        let mol_value = other.sum_matching(VariableRole::is_mol_muni, Measure::Physical);
        let mol_rand = other.sum_matching(VariableRole::is_mol_muni, Measure::Rand);

        let muni_value = sum_charges(other, Utility::Electricity.consumption_charges(), Measure::Physical)?;
        let muni_rand = sum_charges(other, Utility::Electricity.rand_charges(), Measure::Rand)?;

        Ok(Self {
            consumption: mol_value - muni_value,
            rand: mol_rand - muni_rand,
        })
    }

    /// "COUNCIL" rows of a water/effluent table minus the council variable
    pub fn metered(table: &UtilityTable, other: &OtherTable) -> Result<Self> {
        let utility = table.utility();
        let muni_value = sum_charges(other, utility.consumption_charges(), Measure::Physical)?;
        let muni_rand = sum_charges(other, utility.rand_charges(), Measure::Rand)?;

        Ok(Self {
            consumption: table.council_sum(Measure::Physical) - muni_value,
            rand: table.council_sum(Measure::Rand) - muni_rand,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityOvercharge {
    pub utility: Utility,
    pub diff: OverchargeDiff,
}

/// Level 3 figures for electricity, water and effluent, in that order
#[derive(Debug, Clone, PartialEq)]
pub struct OverchargeResult {
    pub utilities: Vec<UtilityOvercharge>,
}

impl OverchargeResult {
    pub fn compute(tables: &MonthTables) -> Result<Self> {
        let utilities = Utility::ALL
            .into_iter()
            .map(|utility| -> Result<UtilityOvercharge> {
                let diff = match utility {
                    Utility::Electricity => OverchargeDiff::electricity(&tables.other)?,
                    Utility::Water | Utility::Effluent => {
                        OverchargeDiff::metered(tables.utility(utility), &tables.other)?
                    }
                };
                Ok(UtilityOvercharge { utility, diff })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { utilities })
    }

    pub fn get(&self, utility: Utility) -> Option<&OverchargeDiff> {
        self.utilities
            .iter()
            .find(|u| u.utility == utility)
            .map(|u| &u.diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountingError;
    use crate::tables::{CouncilVariable, UtilityRecord};

    #[test]
    fn test_water_overcharge() {
        let table = UtilityTable::new(
            Utility::Water,
            vec![
                UtilityRecord::new("Tenant A", 300.0, 600.0),
                UtilityRecord::new("TOTAL", 300.0, 600.0),
                UtilityRecord::new("COUNCIL", 500.0, 1000.0),
            ],
        );
        let other = OtherTable::new(vec![CouncilVariable::new("Muni Water", 480.0, 950.0)]);

        let diff = OverchargeDiff::metered(&table, &other).unwrap();
        assert_eq!(diff, OverchargeDiff { consumption: 20.0, rand: 50.0 });
    }

    #[test]
    fn test_effluent_without_council_row_compares_against_zero() {
        let table = UtilityTable::new(Utility::Effluent, vec![UtilityRecord::new("TOTAL", 90.0, 400.0)]);
        let other = OtherTable::new(vec![CouncilVariable::new("Muni Effluent", 100.0, 380.0)]);

        let diff = OverchargeDiff::metered(&table, &other).unwrap();
        assert_eq!(diff.consumption, -100.0);
        assert_eq!(diff.rand, -380.0);
    }

    #[test]
    fn test_electricity_overcharge() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("Muni Peak", 40.0, 80.0),
            CouncilVariable::new("Muni Standard", 20.0, 60.0),
            CouncilVariable::new("Muni OP", 5.0, 10.0),
            CouncilVariable::new("Muni Max Demand", 0.0, 5.0),
            CouncilVariable::new("Muni Network Access", 0.0, 3.0),
            CouncilVariable::new("Muni Fixed Charge", 0.0, 2.0),
            CouncilVariable::new("MOL Muni Peak", 42.0, 84.0),
            CouncilVariable::new("MOL Muni Standard", 20.0, 60.0),
            CouncilVariable::new("MOL Muni OP", 5.0, 10.0),
        ]);

        let diff = OverchargeDiff::electricity(&other).unwrap();
        assert_eq!(diff.consumption, 2.0);
        assert_eq!(diff.rand, -6.0);
    }

    #[test]
    fn test_electricity_without_mol_rows_is_negative_council_total() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("Muni Peak", 40.0, 80.0),
            CouncilVariable::new("Muni Standard", 20.0, 60.0),
            CouncilVariable::new("Muni OP", 5.0, 10.0),
            CouncilVariable::new("Muni Max Demand", 0.0, 5.0),
            CouncilVariable::new("Muni Network Access", 0.0, 3.0),
            CouncilVariable::new("Muni Fixed Charge", 0.0, 2.0),
        ]);

        let diff = OverchargeDiff::electricity(&other).unwrap();
        assert_eq!(diff.consumption, -65.0);
        assert_eq!(diff.rand, -160.0);
    }

    #[test]
    fn test_mol_muni_row_with_solar_prefix_still_counts() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("Muni Peak", 40.0, 80.0),
            CouncilVariable::new("Muni Standard", 20.0, 60.0),
            CouncilVariable::new("Muni OP", 5.0, 10.0),
            CouncilVariable::new("Muni Max Demand", 0.0, 5.0),
            CouncilVariable::new("Muni Network Access", 0.0, 3.0),
            CouncilVariable::new("Muni Fixed Charge", 0.0, 2.0),
            CouncilVariable::new("MOL Muni Peak (MOL Solar offset)", 65.0, 160.0),
        ]);

        let diff = OverchargeDiff::electricity(&other).unwrap();
        assert_eq!(diff, OverchargeDiff { consumption: 0.0, rand: 0.0 });
    }

    #[test]
    fn test_water_council_marker_is_case_sensitive() {
        let table = UtilityTable::new(
            Utility::Water,
            vec![
                UtilityRecord::new("Councillor Pharmacy", 40.0, 800.0),
                UtilityRecord::new("TOTAL", 40.0, 800.0),
                UtilityRecord::new("COUNCIL", 500.0, 1000.0),
            ],
        );
        let other = OtherTable::new(vec![CouncilVariable::new("Muni Water", 480.0, 950.0)]);

        let diff = OverchargeDiff::metered(&table, &other).unwrap();
        assert_eq!(diff, OverchargeDiff { consumption: 20.0, rand: 50.0 });
    }

    #[test]
    fn test_metered_requires_council_variable() {
        let table = UtilityTable::new(Utility::Water, vec![UtilityRecord::new("COUNCIL", 1.0, 1.0)]);
        let other = OtherTable::new(vec![]);
        assert!(matches!(
            OverchargeDiff::metered(&table, &other),
            Err(AccountingError::MissingVariable { .. })
        ));
    }

    #[test]
    fn test_entry_labels() {
        let diff = OverchargeDiff { consumption: 1.0, rand: 2.0 };
        let labels: Vec<String> = diff.entries().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(labels, vec!["Consumption Diff", "Rand Diff"]);
        assert!(DiffKind::Rand.is_currency());
        assert!(!DiffKind::Consumption.is_currency());
    }
}
