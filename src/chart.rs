//! Chart rendering for the visualizer.
//!
//! Each function takes an already-shaped data projection and a target path,
//! draws with `plotters`' bitmap backend, and writes a PNG. All charts share
//! the dark background of the original SpendWise dashboard; category colors
//! come from fixed palettes assigned positionally, cycling when there are
//! more categories than palette entries.

use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const BACKGROUND: RGBColor = RGBColor(0x1a, 0x1a, 0x2e);

/// Slice colors for the pie chart.
const PIE_PALETTE: [RGBColor; 6] = [
    RGBColor(0xff, 0x63, 0x84),
    RGBColor(0x36, 0xa2, 0xeb),
    RGBColor(0xff, 0xce, 0x56),
    RGBColor(0x4b, 0xc0, 0xc0),
    RGBColor(0x99, 0x66, 0xff),
    RGBColor(0xff, 0x9f, 0x40),
];

/// Bar colors for the bar chart.
const BAR_PALETTE: [RGBColor; 6] = [
    RGBColor(0x66, 0x7e, 0xea),
    RGBColor(0x76, 0x4b, 0xa2),
    RGBColor(0xf0, 0x93, 0xfb),
    RGBColor(0x4f, 0xac, 0xfe),
    RGBColor(0x43, 0xe9, 0x7b),
    RGBColor(0xfa, 0x70, 0x9a),
];

/// Timeline line and fill colors.
const LINE_COLOR: RGBColor = RGBColor(0x66, 0x7e, 0xea);
const FILL_COLOR: RGBColor = RGBColor(0x76, 0x4b, 0xa2);

/// Positional palette lookup. Indexes past the end wrap around so that any
/// number of categories gets a color.
pub(crate) fn palette_color(palette: &[RGBColor], index: usize) -> RGBColor {
    palette[index % palette.len()]
}

/// Renders the category pie chart: one slice per category, sized by total,
/// annotated with a one-decimal percentage.
pub(crate) fn render_pie(data: &[(String, f64)], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 700)).into_drawing_area();
    root.fill(&BACKGROUND)?;
    let root = root.titled(
        "Expense Distribution by Category",
        ("sans-serif", 32).into_font().color(&WHITE),
    )?;

    let sizes: Vec<f64> = data.iter().map(|(_, total)| *total).collect();
    let labels: Vec<String> = data.iter().map(|(name, _)| name.clone()).collect();
    let colors: Vec<RGBColor> = (0..data.len())
        .map(|i| palette_color(&PIE_PALETTE, i))
        .collect();

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 18).into_font().color(&WHITE));
    pie.percentages(("sans-serif", 16).into_font().color(&WHITE));
    root.draw(&pie)?;

    root.present()
        .with_context(|| format!("Unable to write chart image to {}", path.display()))?;
    Ok(())
}

/// Renders the category bar chart: one bar per category with its name on the
/// x axis (rotated for legibility) and a rounded currency annotation above.
pub(crate) fn render_bars(data: &[(String, f64)], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let y_max = data
        .iter()
        .map(|(_, total)| *total)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.15;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Spending by Category",
            ("sans-serif", 32).into_font().color(&WHITE),
        )
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(90)
        .build_cartesian_2d((0..data.len() - 1).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE.mix(0.1))
        .axis_style(WHITE.mix(0.8))
        .x_labels(data.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => data
                .get(*i)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .x_label_style(
            ("sans-serif", 16)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&WHITE),
        )
        .y_label_formatter(&|total| format_num::format_num!(",.0f", *total))
        .y_label_style(("sans-serif", 16).into_font().color(&WHITE))
        .x_desc("Category")
        .y_desc("Amount (₹)")
        .axis_desc_style(("sans-serif", 18).into_font().color(&WHITE))
        .draw()?;

    chart.draw_series(data.iter().enumerate().map(|(i, (_, total))| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *total),
            ],
            palette_color(&BAR_PALETTE, i).filled(),
        );
        bar.set_margin(0, 0, 10, 10);
        bar
    }))?;

    // Value annotations above each bar
    let label_offset = y_max * 0.015;
    chart.draw_series(data.iter().enumerate().map(|(i, (_, total))| {
        Text::new(
            format!("₹{}", format_num::format_num!(",.0f", *total)),
            (SegmentValue::CenterOf(i), *total + label_offset),
            ("sans-serif", 15)
                .into_font()
                .color(&WHITE)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;

    root.present()
        .with_context(|| format!("Unable to write chart image to {}", path.display()))?;
    Ok(())
}

/// Renders the daily spending timeline: a line through the per-day totals
/// with point markers and a filled area underneath. Callers must pass at
/// least two distinct days.
pub(crate) fn render_timeline(data: &[(NaiveDate, f64)], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1400, 600)).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let first = data.first().context("Timeline needs at least one day")?.0;
    let last = data.last().context("Timeline needs at least one day")?.0;
    let y_max = data
        .iter()
        .map(|(_, total)| *total)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.15;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Daily Spending Trend",
            ("sans-serif", 32).into_font().color(&WHITE),
        )
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(first..last, 0f64..y_max)?;

    chart
        .configure_mesh()
        .light_line_style(WHITE.mix(0.1))
        .axis_style(WHITE.mix(0.8))
        .x_label_formatter(&|day| day.format("%Y-%m-%d").to_string())
        .x_label_style(("sans-serif", 15).into_font().color(&WHITE))
        .y_label_formatter(&|total| format_num::format_num!(",.0f", *total))
        .y_label_style(("sans-serif", 16).into_font().color(&WHITE))
        .x_desc("Date")
        .y_desc("Amount (₹)")
        .axis_desc_style(("sans-serif", 18).into_font().color(&WHITE))
        .draw()?;

    chart.draw_series(AreaSeries::new(
        data.iter().copied(),
        0.0,
        FILL_COLOR.mix(0.3),
    ))?;
    chart.draw_series(LineSeries::new(
        data.iter().copied(),
        LINE_COLOR.stroke_width(2),
    ))?;
    chart.draw_series(
        data.iter()
            .map(|&(day, total)| Circle::new((day, total), 5, LINE_COLOR.filled())),
    )?;

    root.present()
        .with_context(|| format!("Unable to write chart image to {}", path.display()))?;
    Ok(())
}
