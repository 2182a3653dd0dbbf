//! Typed rows for the utility and other info tables
//!
//! Rows are classified once when a table is built. Aggregations then filter on
//! the stored role instead of re-matching tenant or variable names.

use std::collections::HashMap;

use tracing::warn;

use crate::constants;
use crate::error::{AccountingError, Result};
use crate::utility::{CouncilCharge, Measure, Utility};

// =============================================================================
// Utility Tables
// =============================================================================

/// One row of an electricity, water or effluent table (excl. VAT)
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityRecord {
    /// Blank cells load as `None` and never match a marker
    pub tenant_name: Option<String>,
    /// kWh or kL depending on the utility
    pub consumption: f64,
    /// Rand
    pub cost: f64,
}

impl UtilityRecord {
    pub fn new(tenant_name: impl Into<String>, consumption: f64, cost: f64) -> Self {
        Self {
            tenant_name: Some(tenant_name.into()),
            consumption,
            cost,
        }
    }

    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Physical => self.consumption,
            Measure::Rand => self.cost,
        }
    }
}

/// What a utility table row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowRole {
    /// Tenant subtotal ("TOTAL" in the name)
    TenantTotal,
    /// Municipal meter reading ("COUNCIL" in the name)
    CouncilReference,
    /// Name carries both markers; counts towards both sums
    CouncilTotal,
    RegularTenant,
}

impl RowRole {
    /// Classify by marker substrings; "TOTAL" ignores case, "COUNCIL" does not
    pub fn classify(tenant_name: Option<&str>) -> Self {
        let Some(name) = tenant_name else {
            return RowRole::RegularTenant;
        };

        let total = name.to_uppercase().contains(constants::TENANT_TOTAL_MARKER);
        let council = name.contains(constants::COUNCIL_MARKER);

        match (total, council) {
            (true, true) => RowRole::CouncilTotal,
            (true, false) => RowRole::TenantTotal,
            (false, true) => RowRole::CouncilReference,
            (false, false) => RowRole::RegularTenant,
        }
    }

    pub fn is_tenant_total(self) -> bool {
        matches!(self, RowRole::TenantTotal | RowRole::CouncilTotal)
    }

    pub fn is_council_reference(self) -> bool {
        matches!(self, RowRole::CouncilReference | RowRole::CouncilTotal)
    }
}

/// A utility table row with its role
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: UtilityRecord,
    pub role: RowRole,
}

/// An electricity, water or effluent table for one building and month
#[derive(Debug, Clone)]
pub struct UtilityTable {
    utility: Utility,
    rows: Vec<ClassifiedRecord>,
}

impl UtilityTable {
    pub fn new(utility: Utility, records: Vec<UtilityRecord>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let role = RowRole::classify(record.tenant_name.as_deref());
                ClassifiedRecord { record, role }
            })
            .collect();

        Self { utility, rows }
    }

    pub fn utility(&self) -> Utility {
        self.utility
    }

    pub fn rows(&self) -> &[ClassifiedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose name contains the "TOTAL" marker
    pub fn tenant_totals(&self) -> impl Iterator<Item = &UtilityRecord> {
        self.rows
            .iter()
            .filter(|row| row.role.is_tenant_total())
            .map(|row| &row.record)
    }

    /// Rows whose name contains the "COUNCIL" marker
    pub fn council_rows(&self) -> impl Iterator<Item = &UtilityRecord> {
        self.rows
            .iter()
            .filter(|row| row.role.is_council_reference())
            .map(|row| &row.record)
    }

    /// Sum of a measure over the "COUNCIL" rows; 0 when there are none
    pub fn council_sum(&self, measure: Measure) -> f64 {
        self.council_rows().map(|r| r.measure(measure)).sum()
    }
}

// =============================================================================
// Other Info Table
// =============================================================================

/// One row of the other info table (excl. VAT)
#[derive(Debug, Clone, PartialEq)]
pub struct CouncilVariable {
    pub variable_name: String,
    /// Physical quantity (kWh or kL)
    pub value: f64,
    pub rand: f64,
}

impl CouncilVariable {
    pub fn new(variable_name: impl Into<String>, value: f64, rand: f64) -> Self {
        Self {
            variable_name: variable_name.into(),
            value,
            rand,
        }
    }

    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Physical => self.value,
            Measure::Rand => self.rand,
        }
    }
}

/// What an other info row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableRole {
    /// Exact match on a known council charge name
    Council(CouncilCharge),
    /// Name contains "MOL Solar"
    Solar,
    /// Name contains "MOL Muni"
    MolMuni,
    /// Name carries both prefixes; counts towards both sums
    SolarMolMuni,
    Other,
}

impl VariableRole {
    /// Case-sensitive classification by exact name, then by prefix substrings
    pub fn classify(variable_name: &str) -> Self {
        if let Some(charge) = CouncilCharge::from_name(variable_name) {
            return VariableRole::Council(charge);
        }

        let solar = variable_name.contains(constants::SOLAR_MARKER);
        let mol_muni = variable_name.contains(constants::MOL_MUNI_MARKER);

        match (solar, mol_muni) {
            (true, true) => VariableRole::SolarMolMuni,
            (true, false) => VariableRole::Solar,
            (false, true) => VariableRole::MolMuni,
            (false, false) => VariableRole::Other,
        }
    }

    pub fn is_solar(self) -> bool {
        matches!(self, VariableRole::Solar | VariableRole::SolarMolMuni)
    }

    pub fn is_mol_muni(self) -> bool {
        matches!(self, VariableRole::MolMuni | VariableRole::SolarMolMuni)
    }
}

/// Other info rows for one month, indexed by exact variable name
#[derive(Debug, Clone)]
pub struct OtherTable {
    rows: Vec<(CouncilVariable, VariableRole)>,
    by_name: HashMap<String, usize>,
}

impl OtherTable {
    pub fn new(variables: Vec<CouncilVariable>) -> Self {
        let mut by_name = HashMap::new();
        let mut rows = Vec::with_capacity(variables.len());

        for (idx, variable) in variables.into_iter().enumerate() {
            if by_name.contains_key(&variable.variable_name) {
                // First row wins, matching how the sheets have always been read
                warn!(
                    "Duplicate variable '{}' in other info (row {}), keeping first",
                    variable.variable_name,
                    idx + 1
                );
            } else {
                by_name.insert(variable.variable_name.clone(), idx);
            }

            let role = VariableRole::classify(&variable.variable_name);
            rows.push((variable, role));
        }

        Self { rows, by_name }
    }

    pub fn rows(&self) -> impl Iterator<Item = (&CouncilVariable, VariableRole)> {
        self.rows.iter().map(|(variable, role)| (variable, *role))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact-name lookup; the first row wins when a name repeats
    pub fn lookup(&self, name: &str) -> Result<&CouncilVariable> {
        self.by_name
            .get(name)
            .map(|&idx| &self.rows[idx].0)
            .ok_or_else(|| AccountingError::MissingVariable {
                name: name.to_string(),
            })
    }

    pub fn council(&self, charge: CouncilCharge) -> Result<&CouncilVariable> {
        self.lookup(charge.name())
    }

    /// Sum of a measure over every row whose role matches; 0 when none do
    pub fn sum_matching(&self, matches: impl Fn(VariableRole) -> bool, measure: Measure) -> f64 {
        self.rows
            .iter()
            .filter(|(_, role)| matches(*role))
            .map(|(variable, _)| variable.measure(measure))
            .sum()
    }

    pub fn count_matching(&self, matches: impl Fn(VariableRole) -> bool) -> usize {
        self.rows.iter().filter(|(_, role)| matches(*role)).count()
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Which month and building a report covers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonthSelection {
    pub month: String,
    pub building: String,
}

impl MonthSelection {
    pub fn new(month: impl Into<String>, building: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            building: building.into(),
        }
    }
}

/// Everything loaded for one selection
#[derive(Debug, Clone)]
pub struct MonthTables {
    pub selection: MonthSelection,
    pub electricity: UtilityTable,
    pub water: UtilityTable,
    pub effluent: UtilityTable,
    pub other: OtherTable,
}

impl MonthTables {
    pub fn utility(&self, utility: Utility) -> &UtilityTable {
        match utility {
            Utility::Electricity => &self.electricity,
            Utility::Water => &self.water,
            Utility::Effluent => &self.effluent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_role_marker_case() {
        assert_eq!(RowRole::classify(Some("TOTAL")), RowRole::TenantTotal);
        assert_eq!(RowRole::classify(Some("Shop 4 total")), RowRole::TenantTotal);
        assert_eq!(RowRole::classify(Some("COUNCIL METER")), RowRole::CouncilReference);
        assert_eq!(RowRole::classify(Some("Council Meter")), RowRole::RegularTenant);
        assert_eq!(RowRole::classify(Some("Councillor Pharmacy")), RowRole::RegularTenant);
        assert_eq!(RowRole::classify(Some("Acme Trading")), RowRole::RegularTenant);
        assert_eq!(RowRole::classify(None), RowRole::RegularTenant);
    }

    #[test]
    fn test_row_with_both_markers_counts_twice() {
        let role = RowRole::classify(Some("COUNCIL TOTAL"));
        assert_eq!(role, RowRole::CouncilTotal);
        assert!(role.is_tenant_total());
        assert!(role.is_council_reference());
    }

    #[test]
    fn test_council_sum_skips_mixed_case_tenants() {
        let table = UtilityTable::new(
            Utility::Water,
            vec![
                UtilityRecord::new("Councillor Pharmacy", 40.0, 800.0),
                UtilityRecord::new("TOTAL", 40.0, 800.0),
                UtilityRecord::new("COUNCIL", 500.0, 1000.0),
            ],
        );
        assert_eq!(table.council_sum(Measure::Physical), 500.0);
        assert_eq!(table.council_sum(Measure::Rand), 1000.0);
    }

    #[test]
    fn test_council_sum_defaults_to_zero() {
        let table = UtilityTable::new(
            Utility::Water,
            vec![UtilityRecord::new("Tenant A", 10.0, 20.0)],
        );
        assert_eq!(table.council_sum(Measure::Physical), 0.0);
        assert_eq!(table.council_sum(Measure::Rand), 0.0);
    }

    #[test]
    fn test_variable_role_classification() {
        assert_eq!(
            VariableRole::classify("Muni Peak"),
            VariableRole::Council(CouncilCharge::MuniPeak)
        );
        assert_eq!(VariableRole::classify("MOL Solar - Roof A"), VariableRole::Solar);
        assert_eq!(VariableRole::classify("MOL Muni Peak"), VariableRole::MolMuni);
        assert_eq!(
            VariableRole::classify("MOL Muni Peak (MOL Solar offset)"),
            VariableRole::SolarMolMuni
        );
        assert_eq!(VariableRole::classify("mol solar"), VariableRole::Other);
        assert_eq!(VariableRole::classify("Diesel"), VariableRole::Other);
    }

    #[test]
    fn test_lookup_missing_variable() {
        let other = OtherTable::new(vec![CouncilVariable::new("Muni Water", 480.0, 950.0)]);
        let err = other.lookup("Muni Effluent").unwrap_err();
        assert_eq!(
            err,
            AccountingError::MissingVariable {
                name: "Muni Effluent".to_string()
            }
        );
    }

    #[test]
    fn test_lookup_single_match() {
        let other = OtherTable::new(vec![CouncilVariable::new("Muni Water", 480.0, 950.0)]);
        let variable = other.council(CouncilCharge::MuniWater).unwrap();
        assert_eq!(variable.value, 480.0);
        assert_eq!(variable.rand, 950.0);
    }

    #[test]
    fn test_lookup_duplicate_takes_first() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("Muni Water", 480.0, 950.0),
            CouncilVariable::new("Muni Water", 20.0, 50.0),
        ]);
        let variable = other.lookup("Muni Water").unwrap();
        assert_eq!(variable.value, 480.0);
        assert_eq!(variable.rand, 950.0);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let other = OtherTable::new(vec![CouncilVariable::new("muni water", 480.0, 950.0)]);
        assert!(other.lookup("Muni Water").is_err());
    }

    #[test]
    fn test_sum_matching() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("MOL Solar - Roof A", 100.0, 250.0),
            CouncilVariable::new("MOL Solar - Roof B", 50.0, 125.0),
            CouncilVariable::new("MOL Muni Peak", 40.0, 80.0),
        ]);
        assert_eq!(other.sum_matching(VariableRole::is_solar, Measure::Physical), 150.0);
        assert_eq!(other.sum_matching(VariableRole::is_solar, Measure::Rand), 375.0);
        assert_eq!(other.count_matching(VariableRole::is_mol_muni), 1);
        assert_eq!(
            other.sum_matching(|role| role == VariableRole::Other, Measure::Rand),
            0.0
        );
    }

    #[test]
    fn test_row_with_both_prefixes_counts_in_both_sums() {
        let other = OtherTable::new(vec![
            CouncilVariable::new("MOL Solar - Roof", 100.0, 250.0),
            CouncilVariable::new("MOL Muni Peak", 40.0, 80.0),
            CouncilVariable::new("MOL Muni Peak (MOL Solar offset)", 65.0, 160.0),
        ]);
        assert_eq!(other.sum_matching(VariableRole::is_solar, Measure::Physical), 165.0);
        assert_eq!(other.sum_matching(VariableRole::is_solar, Measure::Rand), 410.0);
        assert_eq!(other.sum_matching(VariableRole::is_mol_muni, Measure::Physical), 105.0);
        assert_eq!(other.sum_matching(VariableRole::is_mol_muni, Measure::Rand), 240.0);
        assert_eq!(other.count_matching(VariableRole::is_solar), 2);
        assert_eq!(other.count_matching(VariableRole::is_mol_muni), 2);
    }
}
