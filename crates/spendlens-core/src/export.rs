//! CSV export of the expense snapshot
//!
//! Columns: `ID,Amount,Category,Date,Description`. The description is always
//! double-quoted with embedded quotes doubled; other fields are quoted only
//! when they contain a delimiter, quote or newline.

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::Expense;

const HEADER: &str = "ID,Amount,Category,Date,Description";

/// Render expenses as CSV; `Error::NothingToExport` for an empty list
pub fn export_csv(expenses: &[Expense]) -> Result<String> {
    if expenses.is_empty() {
        return Err(Error::NothingToExport);
    }

    let mut csv = String::from(HEADER);
    csv.push('\n');

    for expense in expenses {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            escape_csv_field(&expense.id),
            expense.amount,
            escape_csv_field(&expense.category),
            escape_csv_field(&expense.date),
            quote_csv_field(&expense.description)
        ));
    }

    Ok(csv)
}

/// Write the CSV to `path`, returning the number of rows written
pub fn write_csv(expenses: &[Expense], path: &Path) -> Result<usize> {
    let csv = export_csv(expenses)?;
    std::fs::write(path, csv)?;
    info!(rows = expenses.len(), path = %path.display(), "Exported expenses");
    Ok(expenses.len())
}

/// Default export filename for a given day
pub fn default_filename(date: chrono::NaiveDate) -> String {
    format!("expenses_{}.csv", date.format("%Y-%m-%d"))
}

fn quote_csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Escape a CSV field (wrap in quotes if contains comma, quote, or newline)
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        quote_csv_field(field)
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Expense {
        Expense {
            id: "1".to_string(),
            amount: 50.0,
            category: "Food".to_string(),
            date: "2023-01-01".to_string(),
            description: "Lunch \"special\"".to_string(),
        }
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("simple"), "simple");
        assert_eq!(escape_csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv_field("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_export_empty_is_nothing_to_export() {
        assert!(matches!(export_csv(&[]), Err(Error::NothingToExport)));
    }

    #[test]
    fn test_export_quotes_description() {
        let csv = export_csv(&[lunch()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ID,Amount,Category,Date,Description"));
        assert_eq!(
            lines.next(),
            Some("1,50,Food,2023-01-01,\"Lunch \"\"special\"\"\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_fractional_amount() {
        let mut expense = lunch();
        expense.amount = 12.75;
        expense.description = "Taxi".into();
        let csv = export_csv(&[expense]).unwrap();
        assert!(csv.contains("1,12.75,Food,2023-01-01,\"Taxi\""));
    }

    #[test]
    fn test_write_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows = write_csv(&[lunch(), lunch()], &path).unwrap();

        assert_eq!(rows, 2);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn test_default_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(default_filename(date), "expenses_2024-07-04.csv");
    }
}
