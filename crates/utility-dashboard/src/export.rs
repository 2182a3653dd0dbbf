//! CSV export of report figures (raw values, two decimals)

use anyhow::{Context, Result};
use csv::Writer;
use std::path::{Path, PathBuf};
use tracing::info;
use utility_accounting::{MonthSelection, MonthlyReport, UnitValues};

use crate::constants;

/// Write walk_away.csv, solar_savings.csv and overcharge.csv
pub fn export_report(output_dir: &Path, report: &MonthlyReport) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let prefix = file_prefix(&report.selection);
    let paths = vec![
        generate_walk_away(&output_dir.join(format!("{prefix}_{}", constants::WALK_AWAY_FILENAME)), report)?,
        generate_solar(&output_dir.join(format!("{prefix}_{}", constants::SOLAR_FILENAME)), report)?,
        generate_overcharge(&output_dir.join(format!("{prefix}_{}", constants::OVERCHARGE_FILENAME)), report)?,
    ];

    Ok(paths)
}

/// "August 2025" + "Building 1" -> "August_2025_Building_1"
fn file_prefix(selection: &MonthSelection) -> String {
    format!("{}_{}", selection.month, selection.building)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

fn write_unit_values(
    wtr: &mut Writer<std::fs::File>,
    utility: &str,
    metric: &str,
    values: &UnitValues,
) -> Result<()> {
    for (unit, value) in values {
        wtr.write_record([utility, metric, &unit.to_string(), &format!("{:.2}", value)])?;
    }
    Ok(())
}

fn generate_walk_away(path: &Path, report: &MonthlyReport) -> Result<PathBuf> {
    let mut wtr = Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(["Utility", "Metric", "Unit", "Value"])?;

    for utility in &report.walk_away.utilities {
        let name = utility.utility.to_string();
        write_unit_values(&mut wtr, &name, "Recoveries", &utility.recoveries)?;
        write_unit_values(&mut wtr, &name, "Council Charges", &utility.council)?;
        write_unit_values(&mut wtr, &name, "Walk Away", &utility.walk_away)?;
    }

    wtr.flush()?;
    info!("Generated: {}", path.display());

    Ok(path.to_path_buf())
}

fn generate_solar(path: &Path, report: &MonthlyReport) -> Result<PathBuf> {
    let mut wtr = Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(["Metric", "Unit", "Value"])?;
    wtr.write_record([
        "Solar Avoided",
        "kWh",
        &format!("{:.2}", report.solar.kwh_avoided),
    ])?;
    wtr.write_record([
        "Solar Savings",
        "Rand",
        &format!("{:.2}", report.solar.rand_savings),
    ])?;

    wtr.flush()?;
    info!("Generated: {}", path.display());

    Ok(path.to_path_buf())
}

fn generate_overcharge(path: &Path, report: &MonthlyReport) -> Result<PathBuf> {
    let mut wtr = Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(["Utility", "Metric", "Value"])?;

    for utility in &report.overcharge.utilities {
        let name = utility.utility.to_string();
        for (kind, value) in utility.diff.entries() {
            wtr.write_record([name.as_str(), &kind.to_string(), &format!("{:.2}", value)])?;
        }
    }

    wtr.flush()?;
    info!("Generated: {}", path.display());

    Ok(path.to_path_buf())
}
