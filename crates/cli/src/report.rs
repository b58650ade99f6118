//! Command Output

use anyhow::Result;
use serde::Serialize;

/// Output of a command, printable as text or JSON
pub trait Report: Serialize {
    /// Human-readable rendering
    fn render(&self) -> String;
}

/// Print `report` to stdout
pub fn emit<R: Report>(report: &R, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

/// Left-aligned first column, right-aligned rest
pub(crate) fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let columns = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == 0 {
                    format!("{:<w$}", cell, w = widths[i])
                } else {
                    format!("{:>w$}", cell, w = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(header.to_vec())];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

/// Fixed four-decimal formatting used in tables
pub(crate) fn num(value: f64) -> String {
    format!("{value:.4}")
}

/// [`num`], or `-` when the value is undefined
pub(crate) fn opt(value: Option<f64>) -> String {
    value.map(num).unwrap_or_else(|| "-".to_string())
}
