//! The exporter: writes the ledger to a timestamped CSV file and prints a
//! compact spending summary.

use crate::commands::Out;
use crate::model::Expense;
use crate::report::SpendingSummary;
use crate::stats::Report;
use crate::{stats, utils, Db, Result};
use anyhow::Context;
use std::path::Path;
use tracing::debug;

/// The literal CSV header row.
const CSV_HEADER: [&str; 5] = ["ID", "Title", "Amount (₹)", "Category", "Date"];

/// Exports all expenses from the ledger at `db_path` to a CSV file in
/// `out_dir`, then prints the spending summary for the exported rows.
///
/// An empty ledger produces a warning and no file.
pub async fn export(db_path: &Path, out_dir: &Path) -> Result<Out<Report>> {
    let db = Db::open(db_path).await?;
    let expenses = db.fetch_expenses().await?;
    db.close().await;

    if expenses.is_empty() {
        return Ok(Out::new_message("⚠️ No expenses found in the ledger"));
    }

    let filename = format!("expenses_export_{}.csv", utils::timestamp());
    let path = out_dir.join(filename);
    write_csv(&expenses, &path)?;
    debug!("Wrote {} rows to {}", expenses.len(), path.display());

    // The summary covers exactly the rows that were just written.
    let report = stats::analyze(&expenses)
        .context("Could not summarize a non-empty export")?;
    println!("{}", SpendingSummary(&report));

    Ok(Out::new(
        format!(
            "✅ Successfully exported {} expenses to {}",
            expenses.len(),
            path.display()
        ),
        report,
    ))
}

/// Writes the fixed five-column projection, header first, amounts in plain
/// numeric form.
fn write_csv(expenses: &[Expense], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create CSV export at {}", path.display()))?;

    writer
        .write_record(CSV_HEADER)
        .context("Failed to write the CSV header")?;

    for expense in expenses {
        writer
            .write_record(&[
                expense.id().to_string(),
                expense.title().to_string(),
                expense.amount().value().to_string(),
                expense.category().to_string(),
                expense.date().to_string(),
            ])
            .with_context(|| format!("Failed to write expense {}", expense.id()))?;
    }

    writer.flush().context("Failed to flush the CSV export")?;
    Ok(())
}
