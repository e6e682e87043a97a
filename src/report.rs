//! Report presentation: the serializable JSON report document and the
//! formatted console transcripts for the analyzer and the exporter.
//!
//! Rendering is pure; printing and file writing happen at the command layer.

use crate::model::Amount;
use crate::stats::Report;
use crate::Result;
use anyhow::Context;
use chrono::Local;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

const WIDE_RULE: &str = "============================================================";
const WIDE_DASH: &str = "------------------------------------------------------------";
const SUMMARY_RULE: &str = "==================================================";
const SUMMARY_DASH: &str = "--------------------------------------------------";

/// How many example titles are shown per category in the console transcript.
const CONSOLE_EXAMPLES: usize = 2;

/// The report document that gets written to `expense_report_<ts>.json`.
///
/// Displaying it renders the full console transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    #[serde(flatten)]
    report: Report,
    generated_at: String,
}

impl JsonReport {
    /// Wraps a computed report with the current local generation timestamp.
    pub fn new(report: Report) -> Self {
        Self {
            report,
            generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn generated_at(&self) -> &str {
        &self.generated_at
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize the expense report")
    }
}

impl Display for JsonReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = &self.report;

        writeln!(f)?;
        writeln!(f, "{WIDE_RULE}")?;
        writeln!(f, "📊 SPENDWISE ANALYTICS REPORT")?;
        writeln!(f, "{WIDE_RULE}")?;

        writeln!(f)?;
        writeln!(f, "💰 OVERALL STATISTICS")?;
        writeln!(f, "   Total Spending:      {}", report.total_spending())?;
        writeln!(f, "   Total Transactions:  {}", report.total_transactions())?;
        writeln!(f, "   Average Expense:     {}", report.average_expense())?;
        writeln!(f, "   Highest Expense:     {}", report.highest_expense())?;
        writeln!(f, "   Lowest Expense:      {}", report.lowest_expense())?;

        writeln!(f)?;
        writeln!(f, "📈 CATEGORY BREAKDOWN")?;
        writeln!(f, "{WIDE_DASH}")?;
        for category in report.categories() {
            writeln!(f)?;
            writeln!(f, "   {}:", category.category())?;
            writeln!(
                f,
                "      Total:      {} ({}%)",
                category.total(),
                category.percentage()
            )?;
            writeln!(f, "      Count:      {} transactions", category.count())?;
            writeln!(f, "      Average:    {}", category.average())?;
            writeln!(
                f,
                "      Examples:   {}",
                category
                    .sample_items()
                    .iter()
                    .take(CONSOLE_EXAMPLES)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }

        let trends = report.trends();
        writeln!(f)?;
        writeln!(f, "📅 SPENDING TRENDS")?;
        writeln!(f, "{WIDE_DASH}")?;
        writeln!(f, "   Days Tracked:           {}", trends.days_tracked())?;
        writeln!(
            f,
            "   Highest Spending Day:   {} ({})",
            trends.highest_spending_day().date(),
            trends.highest_spending_day().amount()
        )?;
        writeln!(
            f,
            "   Lowest Spending Day:    {} ({})",
            trends.lowest_spending_day().date(),
            trends.lowest_spending_day().amount()
        )?;

        writeln!(f)?;
        writeln!(f, "{WIDE_RULE}")?;
        writeln!(f, "Report generated at: {}", self.generated_at)?;
        write!(f, "{WIDE_RULE}")
    }
}

/// The compact spending summary the exporter prints after writing a CSV
/// file. Percentages here are rendered with one decimal.
#[derive(Debug, Clone, Copy)]
pub struct SpendingSummary<'a>(pub &'a Report);

impl Display for SpendingSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f)?;
        writeln!(f, "📊 SPENDING SUMMARY")?;
        writeln!(f, "{SUMMARY_RULE}")?;
        writeln!(f, "💰 Total Spending: {}", report.total_spending())?;
        writeln!(f, "📝 Total Transactions: {}", report.total_transactions())?;
        writeln!(f, "📊 Average Expense: {}", report.average_expense())?;

        writeln!(f)?;
        writeln!(f, "📈 Category Breakdown:")?;
        writeln!(f, "{SUMMARY_DASH}")?;
        for category in report.categories() {
            writeln!(
                f,
                "{:<12} | ₹{:>9} ({:>5.1}%) | {:>3} items | Avg: ₹{:>8}",
                category.category(),
                plain_currency(category.total()),
                category.percentage(),
                category.count(),
                plain_currency(category.average()),
            )?;
        }
        write!(f, "{SUMMARY_RULE}")
    }
}

/// Formats an amount as a bare `1,234.56` string, without the currency sign.
fn plain_currency(amount: Amount) -> String {
    format_num::format_num!(",.2f", amount.value().to_f64().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Expense;
    use crate::stats;
    use std::str::FromStr;

    fn sample_report() -> Report {
        let expenses = vec![
            Expense::new(
                3,
                "Bus ticket",
                Amount::from_str("50").unwrap(),
                "Transport",
                "2024-01-02T18:00:00",
            ),
            Expense::new(
                2,
                "Groceries",
                Amount::from_str("200").unwrap(),
                "Food",
                "2024-01-02T09:30:00",
            ),
            Expense::new(
                1,
                "Breakfast",
                Amount::from_str("100").unwrap(),
                "Food",
                "2024-01-01",
            ),
        ];
        stats::analyze(&expenses).unwrap()
    }

    #[test]
    fn test_transcript_sections() {
        let document = JsonReport::new(sample_report());
        let transcript = document.to_string();

        assert!(transcript.contains("📊 SPENDWISE ANALYTICS REPORT"));
        assert!(transcript.contains("💰 OVERALL STATISTICS"));
        assert!(transcript.contains("📈 CATEGORY BREAKDOWN"));
        assert!(transcript.contains("📅 SPENDING TRENDS"));
        assert!(transcript.contains("Report generated at:"));
    }

    #[test]
    fn test_transcript_formats_currency() {
        let document = JsonReport::new(sample_report());
        let transcript = document.to_string();

        assert!(transcript.contains("Total Spending:      ₹350.00"));
        assert!(transcript.contains("Total:      ₹300.00 (85.71%)"));
        assert!(transcript.contains("Highest Spending Day:   2024-01-02 (₹250.00)"));
    }

    #[test]
    fn test_transcript_shows_two_examples() {
        let document = JsonReport::new(sample_report());
        let transcript = document.to_string();

        assert!(transcript.contains("Examples:   Groceries, Breakfast"));
    }

    #[test]
    fn test_json_document_structure() {
        let document = JsonReport::new(sample_report());
        let json = document.to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("generated_at").is_some());
        assert_eq!(value["total_transactions"], 3);
        assert_eq!(value["total_spending"], "₹350.00");
        assert_eq!(value["categories"][0]["category"], "Food");
        assert_eq!(value["categories"][0]["percentage"], 85.71);
        assert_eq!(value["trends"]["days_tracked"], 2);
    }

    #[test]
    fn test_json_round_trip() {
        let document = JsonReport::new(sample_report());
        let json = document.to_pretty_json().unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.generated_at(), document.generated_at());
        assert_eq!(
            parsed.report().total_spending(),
            document.report().total_spending()
        );
    }

    #[test]
    fn test_spending_summary_layout() {
        let report = sample_report();
        let summary = SpendingSummary(&report).to_string();

        assert!(summary.contains("📊 SPENDING SUMMARY"));
        assert!(summary.contains("💰 Total Spending: ₹350.00"));
        assert!(summary.contains("📝 Total Transactions: 3"));
        assert!(summary.contains("Food"));
        assert!(summary.contains("( 85.7%)"));
    }
}
