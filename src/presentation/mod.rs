//! Display tables for the projected statements
//!
//! Every table is a rectangular grid of strings: a header row followed by one
//! row per line item, with the item label in the first column.

pub mod format;
mod statements;

pub use format::{format_currency, format_number, format_units, round_to};
pub use statements::{balance_indicator, FinancialStatements};

use serde::{Deserialize, Serialize};

/// The four output tables, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    IncomeStatement,
    BalanceSheet,
    CashFlow,
    DepreciationSchedule,
}

impl TableKind {
    pub const ORDER: [TableKind; 4] = [
        TableKind::IncomeStatement,
        TableKind::BalanceSheet,
        TableKind::CashFlow,
        TableKind::DepreciationSchedule,
    ];

    /// Report heading
    pub fn title(&self) -> &'static str {
        match self {
            TableKind::IncomeStatement => "IFRS Income Statement",
            TableKind::BalanceSheet => "IFRS Balance Sheet",
            TableKind::CashFlow => "IFRS Cash Flow Statement (Indirect Method)",
            TableKind::DepreciationSchedule => "Asset Depreciation Schedule",
        }
    }

    /// Short name used for spreadsheet tabs and export file names
    pub fn sheet_name(&self) -> &'static str {
        match self {
            TableKind::IncomeStatement => "Income Statement",
            TableKind::BalanceSheet => "Balance Sheet",
            TableKind::CashFlow => "Cash Flow",
            TableKind::DepreciationSchedule => "Depreciation",
        }
    }
}

/// A formatted statement table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTable {
    pub kind: TableKind,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    pub fn new(kind: TableKind, header: Vec<String>) -> Self {
        Self {
            kind,
            header,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with empty cells and dropping extras
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    /// Item labels in display order; an empty row has an empty label
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| label_of(r))
    }

    /// Row for an exact (untrimmed) item label
    pub fn row(&self, label: &str) -> Option<&[String]> {
        self.rows.iter().find(|r| label_of(r) == label).map(Vec::as_slice)
    }

    /// Fixed-width text rendering: labels left-aligned, values right-aligned
    pub fn to_text(&self) -> String {
        let widths: Vec<usize> = (0..self.header.len())
            .map(|col| {
                std::iter::once(&self.header)
                    .chain(&self.rows)
                    .map(|r| r.get(col).map_or(0, |cell| cell.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut out = render_row(&self.header, &widths);
        out.push_str(&"-".repeat(rule_width));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render_row(row, &widths));
        }
        out
    }
}

fn label_of(row: &[String]) -> &str {
    row.first().map_or("", String::as_str)
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, &width))| {
            let pad = " ".repeat(width.saturating_sub(cell.chars().count()));
            if col == 0 {
                format!("{}{}", cell, pad)
            } else {
                format!("{}{}", pad, cell)
            }
        })
        .collect();
    let mut line = cells.join("  ").trim_end().to_string();
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        vec!["Item".to_string(), "Year 1".to_string()]
    }

    #[test]
    fn test_push_row_keeps_table_rectangular() {
        let mut table = DisplayTable::new(TableKind::IncomeStatement, header());
        table.push_row(vec!["EBIT".to_string()]);
        table.push_row(vec!["Tax".to_string(), "$1".to_string(), "extra".to_string()]);
        assert!(table.rows.iter().all(|r| r.len() == 2));
        assert_eq!(table.row("EBIT").unwrap(), ["EBIT", ""]);
    }

    #[test]
    fn test_ragged_rows_render_without_panic() {
        let table = DisplayTable {
            kind: TableKind::CashFlow,
            header: header(),
            rows: vec![vec![], vec!["Cash".to_string()], vec!["Capex".to_string(), "$-5".to_string()]],
        };
        let labels: Vec<&str> = table.labels().collect();
        assert_eq!(labels, vec!["", "Cash", "Capex"]);
        assert!(table.row("Missing").is_none());

        let text = table.to_text();
        assert!(text.starts_with("Item   Year 1\n"), "{}", text);
        assert!(text.contains("Capex     $-5\n"), "{}", text);
    }
}
