//! Table output formatting using the `tabled` crate

use super::OutputConfig;
use tabled::{builder::Builder, settings::Style};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format rows under the given headers.
    pub fn format_rows(headers: &[&str], rows: &[Vec<String>], config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(none)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(|h| h.to_string()));
        for row in rows {
            builder.push_record(row);
        }

        let mut table = builder.build();
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
        table.to_string()
    }
}

/// Weights are integers in practice; don't print a trailing `.0` for them.
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e15 {
        format!("{}", weight as i64)
    } else {
        format!("{:.2}", weight)
    }
}
