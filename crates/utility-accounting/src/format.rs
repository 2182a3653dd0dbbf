//! Display formatting for report figures

use std::fmt;

use crate::constants::CURRENCY_PREFIX;

/// How a formatted figure should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Bold
    Plain,
    /// Bold red, for negative figures
    Alert,
}

/// A formatted figure with the value it was produced from
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayValue {
    pub value: f64,
    pub text: String,
    pub emphasis: Emphasis,
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Normalize -0.0 to 0.0 for cleaner display
fn normalize_zero(val: f64) -> f64 {
    if val == 0.0 { 0.0 } else { val }
}

/// Two decimals with comma thousands separators, e.g. `-1,234.50`
pub fn group_thousands(value: f64) -> String {
    let value = normalize_zero(value);
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Format a figure as currency (`R 1,234.50`) or a plain number (`1,234.50`)
///
/// The sign stays on the number (`R -42.50`); negative figures are tagged for
/// alert styling, everything else including zero for plain emphasis.
pub fn format_value(value: f64, is_currency: bool) -> DisplayValue {
    let number = group_thousands(value);
    let text = if is_currency {
        format!("{CURRENCY_PREFIX} {number}")
    } else {
        number
    };

    DisplayValue {
        value,
        text,
        emphasis: if value < 0.0 { Emphasis::Alert } else { Emphasis::Plain },
    }
}
