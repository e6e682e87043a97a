//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up a scratch expense ledger in a temporary
/// directory, which doubles as the output directory for command tests.
/// Holds the TempDir to keep the directory alive for the duration of the
/// test.
pub struct TestEnv {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl TestEnv {
    /// Creates a test environment with an empty `expenses` table.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("expenses.db");

        let pool = Self::connect(&db_path, true).await;
        sqlx::query(
            "CREATE TABLE expenses (\
                id INTEGER PRIMARY KEY AUTOINCREMENT, \
                title TEXT NOT NULL, \
                amount REAL NOT NULL, \
                category TEXT NOT NULL, \
                date TEXT NOT NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool.close().await;

        Self { temp_dir, db_path }
    }

    /// Creates a test environment seeded with `(title, amount, category,
    /// date)` rows.
    pub async fn with_rows(rows: &[(&str, f64, &str, &str)]) -> Self {
        let env = Self::new().await;
        env.insert(rows).await;
        env
    }

    /// Inserts `(title, amount, category, date)` rows into the ledger.
    pub async fn insert(&self, rows: &[(&str, f64, &str, &str)]) {
        let pool = Self::connect(&self.db_path, false).await;
        for (title, amount, category, date) in rows {
            sqlx::query(
                "INSERT INTO expenses (title, amount, category, date) VALUES (?, ?, ?, ?)",
            )
            .bind(title)
            .bind(amount)
            .bind(category)
            .bind(date)
            .execute(&pool)
            .await
            .unwrap();
        }
        pool.close().await;
    }

    /// Three records across two days and two categories; the dataset used
    /// throughout the command tests.
    pub fn sample_rows() -> [(&'static str, f64, &'static str, &'static str); 3] {
        [
            ("Bus ticket", 50.0, "Transport", "2024-01-02T18:00:00"),
            ("Groceries", 200.0, "Food", "2024-01-02T09:30:00"),
            ("Breakfast", 100.0, "Food", "2024-01-01T08:00:00"),
        ]
    }

    /// The path to the scratch ledger file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// The directory commands should write their output files into.
    pub fn out_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Lists output files whose names start with `prefix` and end with
    /// `suffix`.
    pub fn files_matching(&self, prefix: &str, suffix: &str) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(self.out_dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(prefix) && name.ends_with(suffix))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    }

    async fn connect(db_path: &Path, create: bool) -> SqlitePool {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .unwrap()
            .create_if_missing(create);
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap()
    }
}
