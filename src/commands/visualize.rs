//! The visualizer: renders the pie, bar and timeline charts to timestamped
//! PNG files in one run.

use crate::commands::Out;
use crate::{chart, utils, Db, Result};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The timeline chart needs at least this many distinct days.
const TIMELINE_MIN_DAYS: usize = 2;

/// The kinds of chart the visualizer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
    Timeline,
}

serde_plain::derive_display_from_serialize!(ChartKind);
serde_plain::derive_fromstr_from_deserialize!(ChartKind);

impl ChartKind {
    /// The output filename prefix for this chart kind.
    fn file_prefix(&self) -> &'static str {
        match self {
            ChartKind::Pie => "expense_pie_chart",
            ChartKind::Bar => "expense_bar_chart",
            ChartKind::Timeline => "expense_timeline",
        }
    }
}

/// One chart file produced by a visualizer run.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedChart {
    kind: ChartKind,
    file: String,
}

impl RenderedChart {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

/// Renders all charts from the ledger at `db_path` into `out_dir`.
///
/// The pie and bar charts need at least one category; the timeline needs at
/// least two distinct days and is skipped with a warning otherwise.
pub async fn visualize(db_path: &Path, out_dir: &Path) -> Result<Out<Vec<RenderedChart>>> {
    let db = Db::open(db_path).await?;
    let categories = db.category_totals().await?;
    let daily = db.daily_totals().await?;
    db.close().await;

    if categories.is_empty() {
        return Ok(Out::new_message("⚠️ No data to visualize"));
    }

    println!("\n📊 Generating visualizations...\n");
    let timestamp = utils::timestamp();
    let mut rendered = Vec::new();

    let path = chart_path(out_dir, ChartKind::Pie, &timestamp);
    chart::render_pie(&categories, &path)?;
    rendered.push(saved(ChartKind::Pie, path));

    let path = chart_path(out_dir, ChartKind::Bar, &timestamp);
    chart::render_bars(&categories, &path)?;
    rendered.push(saved(ChartKind::Bar, path));

    let points = timeline_points(&daily)?;
    if points.len() < TIMELINE_MIN_DAYS {
        println!("⚠️ Need more data for the timeline chart");
    } else {
        let path = chart_path(out_dir, ChartKind::Timeline, &timestamp);
        chart::render_timeline(&points, &path)?;
        rendered.push(saved(ChartKind::Timeline, path));
    }

    Ok(Out::new(
        format!("✅ Generated {} chart file(s)", rendered.len()),
        rendered,
    ))
}

fn chart_path(out_dir: &Path, kind: ChartKind, timestamp: &str) -> PathBuf {
    out_dir.join(format!("{}_{timestamp}.png", kind.file_prefix()))
}

fn saved(kind: ChartKind, path: PathBuf) -> RenderedChart {
    let file = path.display().to_string();
    println!("✅ Saved {kind} chart: {file}");
    debug!("Rendered {kind} chart");
    RenderedChart { kind, file }
}

/// Parses the per-day rows into timeline points. Day keys come from the
/// ledger as `YYYY-MM-DD`.
fn timeline_points(daily: &[(String, f64)]) -> Result<Vec<(NaiveDate, f64)>> {
    daily
        .iter()
        .map(|(day, total)| {
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(|date| (date, *total))
                .with_context(|| format!("The ledger contains an unparseable day '{day}'"))
        })
        .collect()
}
