//! Errors raised while loading tables or computing a report

use thiserror::Error;

/// Fatal conditions for a single (month, building) report
///
/// Exact-name variable lookups fail hard. Substring sums (solar, MOL Muni,
/// COUNCIL rows) never produce an error and yield 0 when nothing matches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountingError {
    #[error("council variable '{name}' not found in other info table")]
    MissingVariable { name: String },

    #[error("{table} table is missing column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("{table} table row {row}: column '{column}' is not numeric: '{value}'")]
    NonNumeric {
        table: String,
        column: String,
        row: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, AccountingError>;
