//! Read-only access to the SQLite expense ledger.
//!
//! Every job constructs a fresh [`Db`] handle, runs its queries, and drops
//! the handle before writing output. The ledger is never written to from
//! here; the connection is opened with SQLite's read-only mode so a
//! concurrent run can never corrupt the data source.

use crate::model::Expense;
use crate::Result;
use anyhow::{bail, Context};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// A handle to the expense ledger.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// - Validates that there is a ledger file at `path`
    /// - Opens a read-only SQLite pool against it
    /// - Returns a constructed `Db` object for further queries
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!(
                "❌ Expense ledger not found at '{}'. Make sure the backend has been run at least once.",
                path.display()
            );
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .context("Failed to parse SQLite connection string")?
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Unable to open the expense ledger at {}", path.display()))?;

        Ok(Self { pool })
    }

    /// All expense records, newest first.
    pub async fn fetch_expenses(&self) -> Result<Vec<Expense>> {
        let rows: Vec<(i64, String, f64, String, String)> =
            sqlx::query_as("SELECT id, title, amount, category, date FROM expenses ORDER BY date DESC")
                .fetch_all(&self.pool)
                .await
                .context("Failed to fetch expenses")?;

        rows.into_iter()
            .map(|(id, title, amount, category, date)| {
                Expense::from_columns(id, title, amount, category, date)
            })
            .collect()
    }

    /// Per-category spending totals, largest first.
    pub async fn category_totals(&self) -> Result<Vec<(String, f64)>> {
        sqlx::query_as(
            "SELECT category, SUM(amount) AS total \
             FROM expenses GROUP BY category ORDER BY total DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch category totals")
    }

    /// Per-day spending totals in chronological order.
    pub async fn daily_totals(&self) -> Result<Vec<(String, f64)>> {
        sqlx::query_as(
            "SELECT DATE(date) AS day, SUM(amount) AS total \
             FROM expenses GROUP BY day ORDER BY day",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch daily totals")
    }

    /// Closes the underlying pool. Dropping the handle also releases the
    /// connection; this exists for callers that want the release to happen
    /// before they start writing output files.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
