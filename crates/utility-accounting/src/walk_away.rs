//! Level 1: tenant recoveries against council charges
//!
//! Walk-away is what tenants were billed minus what the council billed the
//! building. Positive is a surplus, negative a shortfall.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::tables::{MonthTables, OtherTable, UtilityTable};
use crate::utility::{CouncilCharge, Measure, Unit, Utility};

/// Figures keyed by unit, Rand first
pub type UnitValues = BTreeMap<Unit, f64>;

/// Sum a measure over the tenant "TOTAL" rows; 0 when there are none
pub fn tenant_recoveries(table: &UtilityTable, measure: Measure) -> f64 {
    table.tenant_totals().map(|r| r.measure(measure)).sum()
}

/// Tenant recoveries for both measures, keyed by unit
pub fn recoveries(table: &UtilityTable) -> UnitValues {
    let utility = table.utility();
    [Measure::Rand, Measure::Physical]
        .into_iter()
        .map(|measure| (measure.unit_for(utility), tenant_recoveries(table, measure)))
        .collect()
}

/// Sum exact-name council variables; any missing name is fatal
pub fn sum_charges(other: &OtherTable, charges: &[CouncilCharge], measure: Measure) -> Result<f64> {
    let mut total = 0.0;
    for &charge in charges {
        total += other.council(charge)?.measure(measure);
    }
    Ok(total)
}

/// Amounts the council billed the building for a utility, keyed by unit
pub fn council_charges(other: &OtherTable, utility: Utility) -> Result<UnitValues> {
    let rand = sum_charges(other, utility.rand_charges(), Measure::Rand)?;
    let physical = sum_charges(other, utility.consumption_charges(), Measure::Physical)?;

    Ok(UnitValues::from([
        (Unit::Rand, rand),
        (utility.physical_unit(), physical),
    ]))
}

/// Recoveries minus council charges for every unit present in both
pub fn walk_away(recoveries: &UnitValues, council: &UnitValues) -> UnitValues {
    recoveries
        .iter()
        .filter_map(|(unit, recovered)| council.get(unit).map(|charged| (*unit, recovered - charged)))
        .collect()
}

/// Level 1 figures for one utility
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityWalkAway {
    pub utility: Utility,
    pub recoveries: UnitValues,
    pub council: UnitValues,
    pub walk_away: UnitValues,
}

impl UtilityWalkAway {
    pub fn compute(table: &UtilityTable, other: &OtherTable) -> Result<Self> {
        let recoveries = recoveries(table);
        let council = council_charges(other, table.utility())?;
        let walk_away = walk_away(&recoveries, &council);

        Ok(Self {
            utility: table.utility(),
            recoveries,
            council,
            walk_away,
        })
    }
}

/// Level 1 figures for electricity, water and effluent, in that order
#[derive(Debug, Clone, PartialEq)]
pub struct WalkAwayResult {
    pub utilities: Vec<UtilityWalkAway>,
}

impl WalkAwayResult {
    pub fn compute(tables: &MonthTables) -> Result<Self> {
        let utilities = Utility::ALL
            .into_iter()
            .map(|utility| UtilityWalkAway::compute(tables.utility(utility), &tables.other))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { utilities })
    }

    pub fn get(&self, utility: Utility) -> Option<&UtilityWalkAway> {
        self.utilities.iter().find(|u| u.utility == utility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountingError;
    use crate::tables::{CouncilVariable, UtilityRecord};
    use proptest::prelude::*;

    fn electricity_council() -> OtherTable {
        OtherTable::new(vec![
            CouncilVariable::new("Muni Peak", 40.0, 80.0),
            CouncilVariable::new("Muni Standard", 20.0, 60.0),
            CouncilVariable::new("Muni OP", 5.0, 10.0),
            CouncilVariable::new("Muni Max Demand", 0.0, 5.0),
            CouncilVariable::new("Muni Network Access", 0.0, 3.0),
            CouncilVariable::new("Muni Fixed Charge", 0.0, 2.0),
        ])
    }

    fn electricity_table() -> UtilityTable {
        UtilityTable::new(
            Utility::Electricity,
            vec![
                UtilityRecord::new("Tenant A", 30.0, 100.0),
                UtilityRecord::new("Tenant B", 45.0, 150.0),
                UtilityRecord::new("TOTAL", 75.0, 250.0),
            ],
        )
    }

    #[test]
    fn test_electricity_walk_away() {
        let result = UtilityWalkAway::compute(&electricity_table(), &electricity_council()).unwrap();

        assert_eq!(result.council[&Unit::Rand], 160.0);
        assert_eq!(result.council[&Unit::Kwh], 65.0);
        assert_eq!(result.recoveries[&Unit::Rand], 250.0);
        assert_eq!(result.recoveries[&Unit::Kwh], 75.0);
        assert_eq!(result.walk_away[&Unit::Rand], 90.0);
        assert_eq!(result.walk_away[&Unit::Kwh], 10.0);
    }

    #[test]
    fn test_tenant_recoveries_ignores_regular_tenants() {
        let table = UtilityTable::new(
            Utility::Water,
            vec![
                UtilityRecord::new("Tenant A", 10.0, 100.0),
                UtilityRecord::new("Block A Total", 10.0, 100.0),
                UtilityRecord::new("Block B TOTAL", 5.0, 40.0),
                UtilityRecord::new("COUNCIL", 16.0, 150.0),
            ],
        );
        assert_eq!(tenant_recoveries(&table, Measure::Rand), 140.0);
        assert_eq!(tenant_recoveries(&table, Measure::Physical), 15.0);
    }

    #[test]
    fn test_tenant_recoveries_without_total_rows() {
        let table = UtilityTable::new(
            Utility::Effluent,
            vec![UtilityRecord::new("Tenant A", 10.0, 100.0)],
        );
        assert_eq!(tenant_recoveries(&table, Measure::Rand), 0.0);
    }

    #[test]
    fn test_water_council_charges_use_single_variable() {
        let other = OtherTable::new(vec![CouncilVariable::new("Muni Water", 480.0, 950.0)]);
        let council = council_charges(&other, Utility::Water).unwrap();
        assert_eq!(council[&Unit::Rand], 950.0);
        assert_eq!(council[&Unit::Kl], 480.0);
        assert!(!council.contains_key(&Unit::Kwh));
    }

    #[test]
    fn test_missing_council_variable_is_fatal() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("Muni Peak", 40.0, 80.0),
            CouncilVariable::new("Muni Standard", 20.0, 60.0),
        ]);
        let err = council_charges(&other, Utility::Electricity).unwrap_err();
        assert_eq!(
            err,
            AccountingError::MissingVariable {
                name: "Muni OP".to_string()
            }
        );
    }

    #[test]
    fn test_walk_away_pairs_matching_units_only() {
        let recoveries = UnitValues::from([(Unit::Rand, 100.0), (Unit::Kl, 10.0)]);
        let council = UnitValues::from([(Unit::Rand, 120.0), (Unit::Kwh, 4.0)]);
        let diff = walk_away(&recoveries, &council);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[&Unit::Rand], -20.0);
    }

    proptest! {
        #[test]
        fn test_recoveries_match_total_rows(
            rows in prop::collection::vec((any::<bool>(), 0.0f64..10_000.0, 0.0f64..10_000.0), 0..20)
        ) {
            let records: Vec<_> = rows
                .iter()
                .enumerate()
                .map(|(i, (is_total, consumption, cost))| {
                    let name = if *is_total { format!("Block {i} total") } else { format!("Tenant {i}") };
                    UtilityRecord::new(name, *consumption, *cost)
                })
                .collect();
            let table = UtilityTable::new(Utility::Electricity, records);

            let expected: f64 = rows.iter().filter(|(t, _, _)| *t).map(|(_, _, cost)| cost).sum();
            prop_assert_eq!(tenant_recoveries(&table, Measure::Rand), expected);
        }

        #[test]
        fn test_walk_away_is_recoveries_minus_council(
            rand_recovered in -1e6f64..1e6,
            kl_recovered in -1e6f64..1e6,
            rand_charged in -1e6f64..1e6,
            kl_charged in -1e6f64..1e6,
        ) {
            let recoveries = UnitValues::from([(Unit::Rand, rand_recovered), (Unit::Kl, kl_recovered)]);
            let council = UnitValues::from([(Unit::Rand, rand_charged), (Unit::Kl, kl_charged)]);
            let diff = walk_away(&recoveries, &council);
            prop_assert_eq!(diff[&Unit::Rand], rand_recovered - rand_charged);
            prop_assert_eq!(diff[&Unit::Kl], kl_recovered - kl_charged);
        }
    }
}
