//! The analyzer: computes the aggregate spending report, prints the console
//! transcript, and saves the timestamped JSON report file.

use crate::commands::Out;
use crate::report::JsonReport;
use crate::{stats, utils, Db, Result};
use std::path::Path;
use tracing::debug;

/// Runs the full analysis workflow against the ledger at `db_path`, writing
/// the JSON report into `out_dir`.
///
/// An empty ledger short-circuits with a "no data" message before any output
/// I/O happens.
pub async fn analyze(db_path: &Path, out_dir: &Path) -> Result<Out<JsonReport>> {
    let db = Db::open(db_path).await?;
    let expenses = db.fetch_expenses().await?;
    db.close().await;
    debug!("Fetched {} expense records", expenses.len());

    let Some(report) = stats::analyze(&expenses) else {
        return Ok(Out::new_message("❌ No data available"));
    };

    let document = JsonReport::new(report);
    println!("{document}");

    let filename = format!("expense_report_{}.json", utils::timestamp());
    let path = out_dir.join(filename);
    utils::write(&path, document.to_pretty_json()?).await?;

    Ok(Out::new(
        format!("✅ JSON report saved: {}", path.display()),
        document,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_analyze_writes_report_file() {
        let env = TestEnv::with_rows(&TestEnv::sample_rows()).await;

        let out = analyze(env.db_path(), env.out_dir()).await.unwrap();

        assert!(out.message().contains("✅ JSON report saved"));
        let report_files = env.files_matching("expense_report_", ".json");
        assert_eq!(report_files.len(), 1);

        let contents = std::fs::read_to_string(&report_files[0]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["total_transactions"], 3);
        assert_eq!(value["categories"][0]["category"], "Food");
        assert_eq!(value["categories"][0]["percentage"], 85.71);
        assert_eq!(value["trends"]["days_tracked"], 2);
        assert!(value.get("generated_at").is_some());
    }

    #[tokio::test]
    async fn test_analyze_empty_ledger_writes_nothing() {
        let env = TestEnv::new().await;

        let out = analyze(env.db_path(), env.out_dir()).await.unwrap();

        assert!(out.message().contains("No data available"));
        assert!(out.structure().is_none());
        assert!(env.files_matching("expense_report_", ".json").is_empty());
    }

    #[tokio::test]
    async fn test_analyze_missing_ledger_fails() {
        let env = TestEnv::new().await;
        let missing = env.out_dir().join("not-a-ledger.db");

        let result = analyze(&missing, env.out_dir()).await;
        assert!(result.is_err());
        assert!(env.files_matching("expense_report_", ".json").is_empty());
    }
}
