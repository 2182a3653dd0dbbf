//! Level 2: solar generation the building did not have to buy

use crate::tables::{OtherTable, VariableRole};
use crate::utility::Measure;

/// Avoided consumption and its Rand value across all "MOL Solar" rows
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolarResult {
    pub kwh_avoided: f64,
    pub rand_savings: f64,
}

impl SolarResult {
    /// Substring sum, so a month without solar rows reports zero
    pub fn compute(other: &OtherTable) -> Self {
        Self {
            kwh_avoided: other.sum_matching(VariableRole::is_solar, Measure::Physical),
            rand_savings: other.sum_matching(VariableRole::is_solar, Measure::Rand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::CouncilVariable;
    use proptest::prelude::*;

    #[test]
    fn test_no_solar_rows_is_zero() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("Muni Peak", 40.0, 80.0),
            CouncilVariable::new("MOL Muni Peak", 41.0, 82.0),
        ]);
        assert_eq!(SolarResult::compute(&other), SolarResult::default());
    }

    #[test]
    fn test_sums_every_solar_row() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("MOL Solar - Block A", 1200.0, 2400.0),
            CouncilVariable::new("MOL Solar - Block B", 800.0, 1600.5),
            CouncilVariable::new("Muni Water", 480.0, 950.0),
        ]);
        let solar = SolarResult::compute(&other);
        assert_eq!(solar.kwh_avoided, 2000.0);
        assert_eq!(solar.rand_savings, 4000.5);
    }

    proptest! {
        #[test]
        fn test_adding_solar_row_never_decreases_savings(
            existing in prop::collection::vec((0.0f64..1e5, 0.0f64..1e5), 0..10),
            extra_value in 0.0f64..1e5,
            extra_rand in 0.0f64..1e5,
        ) {
            let mut variables: Vec<_> = existing
                .iter()
                .enumerate()
                .map(|(i, (value, rand))| CouncilVariable::new(format!("MOL Solar - {i}"), *value, *rand))
                .collect();
            let before = SolarResult::compute(&OtherTable::new(variables.clone()));

            variables.push(CouncilVariable::new("MOL Solar - new", extra_value, extra_rand));
            let after = SolarResult::compute(&OtherTable::new(variables));

            prop_assert!(after.kwh_avoided >= before.kwh_avoided);
            prop_assert!(after.rand_savings >= before.rand_savings);
        }
    }
}
