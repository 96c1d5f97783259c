//! Serialization of formatted statements
//!
//! - CSV: one file per table (the spreadsheet layout, one table per sheet)
//! - Text report: title page, then a heading and table per statement
//! - JSON: the numeric projection records

use crate::assumptions::ReportMeta;
use crate::error::Result;
use crate::presentation::{DisplayTable, FinancialStatements};
use crate::projection::ProjectionResult;
use log::info;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write one table as CSV: header row then item rows
pub fn write_table_csv<W: Write>(writer: W, table: &DisplayTable) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.header)?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// File name for a table, e.g. `01_income_statement.csv`
pub fn csv_file_name(index: usize, table: &DisplayTable) -> String {
    let stem = table.kind.sheet_name().to_lowercase().replace(' ', "_");
    format!("{:02}_{}.csv", index + 1, stem)
}

/// Write every table into `dir`, returning the files in statement order
pub fn write_csv_tables(dir: &Path, statements: &FinancialStatements) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(4);

    for (index, table) in statements.tables().into_iter().enumerate() {
        let path = dir.join(csv_file_name(index, table));
        write_table_csv(File::create(&path)?, table)?;
        written.push(path);
    }

    info!("Wrote {} CSV tables to {}", written.len(), dir.display());
    Ok(written)
}

/// Plain-text document: title block, then each statement under its heading
///
/// The depreciation schedule is omitted when there are no assets.
pub fn render_report(meta: &ReportMeta, statements: &FinancialStatements) -> String {
    let mut out = String::new();
    out.push_str("IFRS Financial Statements\n");
    out.push_str(&meta.company_name);
    out.push('\n');
    out.push_str(&meta.reporting_period);
    out.push_str("\n\n");

    for table in statements.tables() {
        if table.rows.is_empty() {
            continue;
        }
        let title = table.kind.title();
        out.push_str(title);
        out.push('\n');
        out.push_str(&"=".repeat(title.chars().count()));
        out.push('\n');
        out.push_str(&table.to_text());
        out.push('\n');
    }

    out
}

/// Write the text report to `path`
pub fn write_report(path: &Path, meta: &ReportMeta, statements: &FinancialStatements) -> Result<()> {
    fs::write(path, render_report(meta, statements))?;
    info!("Wrote report to {}", path.display());
    Ok(())
}

/// Write the numeric records as pretty JSON
pub fn write_json<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::AssumptionSet;
    use crate::projection::ProjectionEngine;

    fn statements(assumptions: &AssumptionSet) -> (ProjectionResult, FinancialStatements) {
        let result = ProjectionEngine::new(assumptions.clone()).unwrap().project();
        let statements = FinancialStatements::build(assumptions, &result).unwrap();
        (result, statements)
    }

    #[test]
    fn test_table_csv_layout() {
        let (_, statements) = statements(&AssumptionSet::default_example());
        let mut buf = Vec::new();
        write_table_csv(&mut buf, &statements.income_statement).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Item,Year 1,Year 2,Year 3,Year 4,Year 5"));
        // Thousands separators force quoting
        assert!(lines.next().unwrap().starts_with("Revenue (Units × Price per Unit),\"$1,000,000.00\""));
    }

    #[test]
    fn test_csv_file_names_follow_statement_order() {
        let (_, statements) = statements(&AssumptionSet::default_example());
        let names: Vec<String> = statements
            .tables()
            .into_iter()
            .enumerate()
            .map(|(i, t)| csv_file_name(i, t))
            .collect();
        assert_eq!(
            names,
            vec![
                "01_income_statement.csv",
                "02_balance_sheet.csv",
                "03_cash_flow.csv",
                "04_depreciation.csv"
            ]
        );
    }

    #[test]
    fn test_write_csv_tables_to_directory() {
        let (_, statements) = statements(&AssumptionSet::default_example());
        let dir = std::env::temp_dir().join(format!("proforma_csv_{}", std::process::id()));
        let written = write_csv_tables(&dir, &statements).unwrap();
        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|p| p.exists()));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_report_headings_in_order() {
        let assumptions = AssumptionSet::default_example();
        let (_, statements) = statements(&assumptions);
        let report = render_report(&assumptions.report, &statements);

        assert!(report.starts_with("IFRS Financial Statements\nExample Company\n"));
        let positions: Vec<usize> = [
            "IFRS Income Statement",
            "IFRS Balance Sheet",
            "IFRS Cash Flow Statement (Indirect Method)",
            "Asset Depreciation Schedule",
        ]
        .iter()
        .map(|h| report.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_report_skips_empty_depreciation_schedule() {
        let mut assumptions = AssumptionSet::default_example();
        assumptions.assets.clear();
        let (_, statements) = statements(&assumptions);
        let report = render_report(&assumptions.report, &statements);
        assert!(!report.contains("Asset Depreciation Schedule"));
        assert!(report.contains("IFRS Cash Flow Statement"));
    }

    #[test]
    fn test_json_round_trips_records() {
        let (result, _) = statements(&AssumptionSet::default_example());
        let mut buf = Vec::new();
        write_json(&mut buf, &result).unwrap();
        let parsed: ProjectionResult = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.years(), 5);
        assert_eq!(parsed.balance_sheets[4].year, 5);
    }
}
