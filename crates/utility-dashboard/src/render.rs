//! Report rendering for the console and Markdown

use clap::ValueEnum;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use utility_accounting::{DisplayValue, Emphasis, MonthlyReport, UnitValues, UtilityWalkAway, format_value};

/// Output style for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderStyle {
    /// ANSI bold, negatives bold red
    Text,
    /// No escape codes
    Plain,
    /// Bold markers, negatives in a red span, plus a summary table
    Markdown,
}

const RULE: &str = "============================================================";

/// Apply emphasis to a formatted figure
fn styled(value: &DisplayValue, style: RenderStyle) -> String {
    match (style, value.emphasis) {
        (RenderStyle::Text, Emphasis::Alert) => format!("\x1b[1;31m{}\x1b[0m", value.text),
        (RenderStyle::Text, Emphasis::Plain) => format!("\x1b[1m{}\x1b[0m", value.text),
        (RenderStyle::Plain, _) => value.text.clone(),
        (RenderStyle::Markdown, Emphasis::Alert) => {
            format!("<span style=\"color:red\">**{}**</span>", value.text)
        }
        (RenderStyle::Markdown, Emphasis::Plain) => format!("**{}**", value.text),
    }
}

struct Lines {
    style: RenderStyle,
    lines: Vec<String>,
}

impl Lines {
    fn new(style: RenderStyle) -> Self {
        Self {
            style,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn heading(&mut self, level: usize, text: &str) {
        match self.style {
            RenderStyle::Markdown => self.push(format!("{} {}", "#".repeat(level), text)),
            RenderStyle::Text | RenderStyle::Plain => match level {
                1 => {
                    self.push(RULE);
                    self.push(format!("  {text}"));
                    self.push(RULE);
                }
                2 => {
                    self.push(text);
                    self.push("-".repeat(text.chars().count()));
                }
                _ => self.push(format!("{text}:")),
            },
        }
    }

    fn bullet(&mut self, indent: usize, label: &str, value: &DisplayValue) {
        let value = styled(value, self.style);
        self.push(format!("{}- {}: {}", "  ".repeat(indent), label, value));
    }

    fn unit_values(&mut self, title: &str, values: &UnitValues) {
        match self.style {
            RenderStyle::Markdown => self.push(format!("**{title}:**")),
            RenderStyle::Text | RenderStyle::Plain => self.push(format!("  {title}:")),
        }
        for (unit, value) in values {
            let formatted = format_value(*value, unit.is_currency());
            self.bullet(1, &unit.to_string(), &formatted);
        }
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// One row of the Markdown walk-away summary table
#[derive(Tabled)]
struct WalkAwayRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Electricity")]
    electricity: String,
    #[tabled(rename = "Water")]
    water: String,
    #[tabled(rename = "Effluent")]
    effluent: String,
}

fn summary_rows(utilities: &[UtilityWalkAway]) -> Vec<WalkAwayRow> {
    type Section = fn(&UtilityWalkAway) -> &UnitValues;
    let sections: [(&str, Section); 3] = [
        ("Recoveries", |u| &u.recoveries),
        ("Council", |u| &u.council),
        ("Walk Away", |u| &u.walk_away),
    ];

    let cell = |utility: Option<&UtilityWalkAway>, section: Section, currency: bool| -> String {
        utility
            .and_then(|u| {
                section(u)
                    .iter()
                    .find(|(unit, _)| unit.is_currency() == currency)
                    .map(|(unit, value)| {
                        let text = format_value(*value, currency).text;
                        if currency { text } else { format!("{text} {unit}") }
                    })
            })
            .unwrap_or_default()
    };

    let mut rows = Vec::new();
    for (label, section) in sections {
        for currency in [true, false] {
            let suffix = if currency { "Rand" } else { "Usage" };
            rows.push(WalkAwayRow {
                metric: format!("{label} {suffix}"),
                electricity: cell(utilities.first(), section, currency),
                water: cell(utilities.get(1), section, currency),
                effluent: cell(utilities.get(2), section, currency),
            });
        }
    }
    rows
}

/// Render the full three-level report
pub fn render(report: &MonthlyReport, style: RenderStyle) -> String {
    let mut out = Lines::new(style);
    let selection = &report.selection;

    out.heading(
        1,
        &format!("Utilities Dashboard — {} ({})", selection.building, selection.month),
    );
    out.blank();

    // Level 1
    out.heading(2, "Level 1: Walk Away");
    for utility in &report.walk_away.utilities {
        out.blank();
        out.heading(3, &utility.utility.to_string());
        out.unit_values("Recoveries (excl VAT)", &utility.recoveries);
        out.unit_values("Council charges (excl VAT)", &utility.council);
        out.unit_values("Net Walk Away", &utility.walk_away);
    }

    if style == RenderStyle::Markdown {
        out.blank();
        let table = Table::new(summary_rows(&report.walk_away.utilities))
            .with(Style::markdown())
            .to_string();
        out.push(table);
    }
    out.blank();

    // Level 2
    out.heading(2, "Level 2: Solar Savings");
    out.bullet(0, "Solar kWh avoided", &format_value(report.solar.kwh_avoided, false));
    out.bullet(
        0,
        "Solar Rand Savings (excl VAT)",
        &format_value(report.solar.rand_savings, true),
    );
    out.blank();

    // Level 3
    out.heading(2, "Level 3: Council Overcharge Check");
    for utility in &report.overcharge.utilities {
        out.blank();
        out.heading(3, &utility.utility.to_string());
        for (kind, value) in utility.diff.entries() {
            out.bullet(0, &kind.to_string(), &format_value(value, kind.is_currency()));
        }
    }

    out.finish()
}
