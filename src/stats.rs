//! The aggregation core: turns a list of expense records into the summary
//! statistics shared by the report, the CSV export summary, and the charts.
//!
//! All money math happens on `Decimal` values so that sums are exact;
//! rounding is applied only where a figure is presented (category totals,
//! averages, percentages).

use crate::model::{Amount, Expense};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many example titles are kept per category.
const SAMPLE_ITEMS: usize = 3;

/// The aggregate spending report derived from the full record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Report {
    total_spending: Amount,
    total_transactions: usize,
    average_expense: Amount,
    highest_expense: Amount,
    lowest_expense: Amount,
    categories: Vec<CategoryStats>,
    trends: TrendStats,
}

impl Report {
    pub fn total_spending(&self) -> Amount {
        self.total_spending
    }

    pub fn total_transactions(&self) -> usize {
        self.total_transactions
    }

    pub fn average_expense(&self) -> Amount {
        self.average_expense
    }

    pub fn highest_expense(&self) -> Amount {
        self.highest_expense
    }

    pub fn lowest_expense(&self) -> Amount {
        self.lowest_expense
    }

    /// Per-category statistics, sorted descending by total. Where two
    /// categories tie on total, their relative order is whatever the stable
    /// sort left them in; callers must not rely on tie order.
    pub fn categories(&self) -> &[CategoryStats] {
        &self.categories
    }

    pub fn trends(&self) -> &TrendStats {
        &self.trends
    }
}

/// Statistics for one spending category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryStats {
    category: String,
    count: usize,
    total: Amount,
    average: Amount,
    percentage: f64,
    sample_items: Vec<String>,
}

impl CategoryStats {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn average(&self) -> Amount {
        self.average
    }

    /// Share of total spending, as a percentage rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// The first titles encountered while iterating records newest-first,
    /// capped at three.
    pub fn sample_items(&self) -> &[String] {
        &self.sample_items
    }
}

/// Per-day extremal statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendStats {
    highest_spending_day: DaySpending,
    lowest_spending_day: DaySpending,
    days_tracked: usize,
}

impl TrendStats {
    pub fn highest_spending_day(&self) -> &DaySpending {
        &self.highest_spending_day
    }

    pub fn lowest_spending_day(&self) -> &DaySpending {
        &self.lowest_spending_day
    }

    pub fn days_tracked(&self) -> usize {
        self.days_tracked
    }
}

/// One calendar day and the amount spent on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DaySpending {
    date: String,
    amount: Amount,
}

impl DaySpending {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Computes the aggregate report over `expenses`, which are expected in the
/// newest-first order the ledger returns them in.
///
/// Returns `None` when there is nothing to aggregate, so that no caller ever
/// divides by a zero transaction count.
pub(crate) fn analyze(expenses: &[Expense]) -> Option<Report> {
    if expenses.is_empty() {
        return None;
    }

    let total: Decimal = expenses.iter().map(|e| e.amount().value()).sum();
    let count = expenses.len();
    let average = (total / Decimal::from(count)).round_dp(2);
    let highest = expenses.iter().map(|e| e.amount().value()).max()?;
    let lowest = expenses.iter().map(|e| e.amount().value()).min()?;

    Some(Report {
        total_spending: Amount::new(total),
        total_transactions: count,
        average_expense: Amount::new(average),
        highest_expense: Amount::new(highest),
        lowest_expense: Amount::new(lowest),
        categories: category_breakdown(expenses, total),
        trends: spending_trends(expenses)?,
    })
}

/// Groups records by category and derives per-group statistics, sorted
/// descending by total.
fn category_breakdown(expenses: &[Expense], grand_total: Decimal) -> Vec<CategoryStats> {
    let mut groups: BTreeMap<&str, (usize, Decimal, Vec<String>)> = BTreeMap::new();

    for expense in expenses {
        let entry = groups
            .entry(expense.category())
            .or_insert_with(|| (0, Decimal::ZERO, Vec::new()));
        entry.0 += 1;
        entry.1 += expense.amount().value();
        if entry.2.len() < SAMPLE_ITEMS {
            entry.2.push(expense.title().to_string());
        }
    }

    let mut categories: Vec<CategoryStats> = groups
        .into_iter()
        .map(|(category, (count, total, sample_items))| CategoryStats {
            category: category.to_string(),
            count,
            total: Amount::new(total.round_dp(2)),
            average: Amount::new((total / Decimal::from(count)).round_dp(2)),
            percentage: percentage_of(total, grand_total),
            sample_items,
        })
        .collect();

    categories.sort_by(|a, b| b.total.value().cmp(&a.total.value()));
    categories
}

/// Groups amounts by calendar day and finds the extremes. With a single day
/// of data, that day is both the highest and the lowest.
fn spending_trends(expenses: &[Expense]) -> Option<TrendStats> {
    let mut daily: BTreeMap<&str, Decimal> = BTreeMap::new();

    for expense in expenses {
        *daily.entry(expense.day()).or_insert(Decimal::ZERO) += expense.amount().value();
    }

    let highest = daily.iter().max_by_key(|(_, total)| **total)?;
    let lowest = daily.iter().min_by_key(|(_, total)| **total)?;

    Some(TrendStats {
        highest_spending_day: DaySpending {
            date: highest.0.to_string(),
            amount: Amount::new(*highest.1),
        },
        lowest_spending_day: DaySpending {
            date: lowest.0.to_string(),
            amount: Amount::new(*lowest.1),
        },
        days_tracked: daily.len(),
    })
}

/// `part / whole × 100`, rounded to two decimal places.
fn percentage_of(part: Decimal, whole: Decimal) -> f64 {
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp(2)
        .to_f64()
        .unwrap_or_default()
}
