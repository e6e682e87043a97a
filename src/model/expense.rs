use crate::model::Amount;
use crate::Result;
use anyhow::Context;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a single row from the `expenses` table.
///
/// The record is built once at the data-access boundary; everything
/// downstream consumes the typed value. The `date` field keeps the stored
/// ISO-like timestamp string, e.g. `2024-01-15T09:30:00` or `2024-01-15`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    id: i64,
    title: String,
    amount: Amount,
    category: String,
    date: String,
}

impl Expense {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            amount,
            category: category.into(),
            date: date.into(),
        }
    }

    /// Builds an `Expense` from raw column values as they come out of SQLite,
    /// where the amount is a REAL.
    pub(crate) fn from_columns(
        id: i64,
        title: String,
        amount: f64,
        category: String,
        date: String,
    ) -> Result<Self> {
        let value = Decimal::from_f64(amount)
            .with_context(|| format!("Expense {id} has a non-finite amount '{amount}'"))?;
        Ok(Self {
            id,
            title,
            amount: Amount::new(value),
            category,
            date,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The calendar-date part of the timestamp, with any time-of-day suffix
    /// truncated at `T`.
    pub fn day(&self) -> &str {
        self.date.split('T').next().unwrap_or(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_day_truncates_time_of_day() {
        let expense = Expense::new(
            1,
            "Groceries",
            Amount::from_str("250").unwrap(),
            "Food",
            "2024-01-15T09:30:00",
        );
        assert_eq!(expense.day(), "2024-01-15");
    }

    #[test]
    fn test_day_passes_through_bare_date() {
        let expense = Expense::new(
            2,
            "Bus ticket",
            Amount::from_str("30").unwrap(),
            "Transport",
            "2024-01-15",
        );
        assert_eq!(expense.day(), "2024-01-15");
    }

    #[test]
    fn test_from_columns_converts_amount() {
        let expense =
            Expense::from_columns(7, "Lunch".into(), 120.5, "Food".into(), "2024-02-01".into())
                .unwrap();
        assert_eq!(expense.amount().value(), Decimal::from_str("120.5").unwrap());
        assert_eq!(expense.id(), 7);
        assert_eq!(expense.category(), "Food");
    }
}
