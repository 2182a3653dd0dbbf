//! Loading a month's tables from exported spreadsheet sheets
//!
//! Layout on disk:
//! - `<months_dir>/<month>/<building>/<sheet>.csv` for electricity, water and effluent
//! - `<other_info_dir>/<month>.csv` for council and solar variables
//!
//! Headers are checked once per file, before any row is read.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use utility_accounting::{
    AccountingError, CouncilVariable, MonthSelection, MonthTables, OtherTable, UtilityRecord,
    UtilityTable, Utility, VariableRole,
};

use crate::config::SourceConfig;
use crate::constants;

/// Anything that can produce the tables for a (month, building) selection
pub trait TableSource {
    fn load(&self, selection: &MonthSelection) -> Result<MonthTables>;
}

/// Reads sheets exported as CSV files
pub struct CsvTableSource {
    config: SourceConfig,
}

impl CsvTableSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Month folders, oldest first when every name reads as a month
    pub fn list_months(&self) -> Result<Vec<String>> {
        let mut months = list_subdirectories(&self.config.months_dir)?;
        sort_months(&mut months);
        Ok(months)
    }

    /// Building folders for a month, alphabetically
    pub fn list_buildings(&self, month: &str) -> Result<Vec<String>> {
        let mut buildings = list_subdirectories(&self.config.months_dir.join(month))?;
        buildings.sort();
        Ok(buildings)
    }

    pub fn utility_path(&self, selection: &MonthSelection, utility: Utility) -> PathBuf {
        self.config
            .months_dir
            .join(&selection.month)
            .join(&selection.building)
            .join(sheet_file(self.config.sheets.sheet(utility)))
    }

    pub fn other_info_path(&self, month: &str) -> PathBuf {
        self.config.other_info_dir.join(sheet_file(month))
    }

    /// Fail with the available choices when the selection does not exist
    fn validate_selection(&self, selection: &MonthSelection) -> Result<()> {
        let months = self.list_months()?;
        if !months.contains(&selection.month) {
            bail!(
                "Month '{}' not found in {}.\nAvailable months: {}",
                selection.month,
                self.config.months_dir.display(),
                months.join(", ")
            );
        }

        let buildings = self.list_buildings(&selection.month)?;
        if !buildings.contains(&selection.building) {
            bail!(
                "Building '{}' not found for {}.\nAvailable buildings: {}",
                selection.building,
                selection.month,
                buildings.join(", ")
            );
        }

        Ok(())
    }

    pub fn load_utility_table(&self, path: &Path, utility: Utility) -> Result<UtilityTable> {
        let columns = &self.config.columns;
        let table_name = utility.to_string();

        let mut rdr = open_sheet(path)?;
        let headers = rdr
            .headers()
            .with_context(|| format!("Failed to read headers of {}", path.display()))?
            .clone();

        let name_idx = column_index(&headers, &columns.tenant_name, &table_name)?;
        let consumption_idx = column_index(&headers, &columns.consumption, &table_name)?;
        let cost_idx = column_index(&headers, &columns.cost, &table_name)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result.with_context(|| format!("Failed to read row in {}", path.display()))?;
            let row = row_number(&record);

            records.push(UtilityRecord {
                tenant_name: text_cell(&record, name_idx),
                consumption: number_cell(&record, consumption_idx, &table_name, &columns.consumption, row)?,
                cost: number_cell(&record, cost_idx, &table_name, &columns.cost, row)?,
            });
        }

        let table = UtilityTable::new(utility, records);
        let totals = table.tenant_totals().count();
        let council = table.council_rows().count();
        info!(
            "Loaded {} ({} rows, {} TOTAL, {} COUNCIL)",
            path.display(),
            table.len(),
            totals,
            council
        );

        Ok(table)
    }

    pub fn load_other_table(&self, path: &Path) -> Result<OtherTable> {
        let columns = &self.config.columns;
        let table_name = "Other info";

        let mut rdr = open_sheet(path)?;
        let headers = rdr
            .headers()
            .with_context(|| format!("Failed to read headers of {}", path.display()))?
            .clone();

        let name_idx = column_index(&headers, &columns.variable_name, table_name)?;
        let value_idx = column_index(&headers, &columns.value, table_name)?;
        let rand_idx = column_index(&headers, &columns.rand, table_name)?;

        let mut variables = Vec::new();
        for result in rdr.records() {
            let record = result.with_context(|| format!("Failed to read row in {}", path.display()))?;
            let row = row_number(&record);

            // Rows without a variable name are spacer rows in the sheet
            let Some(variable_name) = text_cell(&record, name_idx) else {
                debug!("Skipping unnamed row {} in {}", row, path.display());
                continue;
            };

            variables.push(CouncilVariable {
                variable_name,
                value: number_cell(&record, value_idx, table_name, &columns.value, row)?,
                rand: number_cell(&record, rand_idx, table_name, &columns.rand, row)?,
            });
        }

        let table = OtherTable::new(variables);
        info!(
            "Loaded {} ({} variables, {} solar, {} MOL Muni)",
            path.display(),
            table.len(),
            table.count_matching(VariableRole::is_solar),
            table.count_matching(VariableRole::is_mol_muni)
        );

        Ok(table)
    }
}

impl TableSource for CsvTableSource {
    fn load(&self, selection: &MonthSelection) -> Result<MonthTables> {
        self.validate_selection(selection)?;

        let load = |utility| {
            let path = self.utility_path(selection, utility);
            self.load_utility_table(&path, utility)
        };

        Ok(MonthTables {
            selection: selection.clone(),
            electricity: load(Utility::Electricity)?,
            water: load(Utility::Water)?,
            effluent: load(Utility::Effluent)?,
            other: self.load_other_table(&self.other_info_path(&selection.month))?,
        })
    }
}

// =============================================================================
// Discovery
// =============================================================================

fn sheet_file(stem: &str) -> String {
    format!("{}.{}", stem, constants::SHEET_EXTENSION)
}

/// Names of the visible sub-directories of a folder
fn list_subdirectories(dir: &Path) -> Result<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read folder {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string()
            && !name.starts_with('.')
        {
            names.push(name);
        }
    }
    Ok(names)
}

/// Parse a month folder name such as "August 2025", "Aug 2025" or "2025-08"
pub fn parse_month(name: &str) -> Option<NaiveDate> {
    let name = name.trim();
    ["%d %B %Y", "%d %b %Y"]
        .into_iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&format!("1 {name}"), fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{name}-01"), "%Y-%m-%d").ok())
}

/// Chronological when every folder names a month, otherwise alphabetical
fn sort_months(months: &mut [String]) {
    let dates: Option<Vec<NaiveDate>> = months.iter().map(|m| parse_month(m)).collect();
    match dates {
        Some(_) => months.sort_by_key(|m| parse_month(m)),
        None => months.sort(),
    }
}

// =============================================================================
// Cell Parsing
// =============================================================================

fn open_sheet(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open sheet {}", path.display()))
}

/// Locate a configured column by trimmed, case-insensitive header match
fn column_index(headers: &StringRecord, column: &str, table: &str) -> Result<usize, AccountingError> {
    let wanted = column.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| AccountingError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
}

fn row_number(record: &StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}

fn text_cell(record: &StringRecord, idx: usize) -> Option<String> {
    let trimmed = record.get(idx)?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn number_cell(
    record: &StringRecord,
    idx: usize,
    table: &str,
    column: &str,
    row: usize,
) -> Result<f64, AccountingError> {
    let raw = record.get(idx).unwrap_or("");
    parse_amount(raw).ok_or_else(|| AccountingError::NonNumeric {
        table: table.to_string(),
        column: column.to_string(),
        row,
        value: raw.to_string(),
    })
}

/// Blank is 0; accepts one minus sign on either side of an "R" prefix and
/// "," or space separators
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let (before_prefix, rest) = strip_minus(trimmed);
    let rest = rest.strip_prefix('R').unwrap_or(rest).trim_start();
    let (after_prefix, rest) = strip_minus(rest);
    if before_prefix && after_prefix {
        return None;
    }

    let digits: String = rest.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if digits.starts_with('-') {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if before_prefix || after_prefix { -value } else { value })
}

fn strip_minus(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    }
}
