//! Utilities Dashboard
//!
//! Reconciles a building's monthly electricity, water and effluent billing:
//! what tenants were recovered against what the council charged, how much
//! solar saved, and whether the council over- or under-billed.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use utility_accounting::{MonthSelection, MonthlyReport};

use utility_dashboard::config::{FileConfig, SourceConfig};
use utility_dashboard::constants;
use utility_dashboard::export;
use utility_dashboard::observability;
use utility_dashboard::render::{self, RenderStyle};
use utility_dashboard::source::{CsvTableSource, TableSource};

#[derive(Parser, Debug)]
#[command(name = "utility-dashboard")]
#[command(about = "Monthly utility walk-away, solar savings and council overcharge report")]
struct Args {
    /// Config file (defaults apply when it does not exist)
    #[arg(short, long, default_value = constants::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Folder that relative paths in the config resolve against
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available months
    Months,

    /// List buildings available for a month
    Buildings {
        /// Month folder name (e.g. "August 2025")
        #[arg(long)]
        month: String,
    },

    /// Print the walk-away, solar and overcharge report
    Report {
        /// Month folder name (e.g. "August 2025")
        #[arg(long)]
        month: String,

        /// Building folder name
        #[arg(long)]
        building: String,

        /// Output style
        #[arg(long, value_enum, default_value_t = RenderStyle::Text)]
        style: RenderStyle,

        /// Also write CSV files of the figures to this folder
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    observability::init_tracing(args.verbose);

    let file_config = FileConfig::load_or_default(&args.config)?;
    let source_config = SourceConfig::from_file(&file_config, args.data_dir.as_deref());
    info!(
        "Months folder: {}, other info folder: {}",
        source_config.months_dir.display(),
        source_config.other_info_dir.display()
    );
    let source = CsvTableSource::new(source_config);

    match args.command {
        Command::Months => {
            let months = source.list_months()?;
            if months.is_empty() {
                println!("No month folders found.");
            }
            for month in months {
                println!("{month}");
            }
            Ok(())
        }

        Command::Buildings { month } => {
            let buildings = source.list_buildings(&month)?;
            if buildings.is_empty() {
                println!("No buildings found for {month}.");
            }
            for building in buildings {
                println!("{building}");
            }
            Ok(())
        }

        Command::Report {
            month,
            building,
            style,
            output_dir,
        } => {
            let selection = MonthSelection::new(month, building);
            let tables = source.load(&selection)?;
            let report = MonthlyReport::compute(&tables)?;

            print!("{}", render::render(&report, style));

            if let Some(dir) = output_dir {
                let paths = export::export_report(&dir, &report)?;
                println!();
                for path in paths {
                    println!("  Generated: {}", path.display());
                }
            }
            Ok(())
        }
    }
}
