//! Static SVG charts.
//!
//! Charts are written as plain SVG markup so rendering needs no plotting
//! runtime or fonts installed on the host.

use crate::core::{CountryRow, Factor, Result};
use html_escape::encode_text;
use std::fmt::Write;

type Rgb = (u8, u8, u8);

const VIRIDIS: [Rgb; 3] = [(0x44, 0x01, 0x54), (0x21, 0x91, 0x8c), (0xfd, 0xe7, 0x25)];
const YELLOW_GREEN_BLUE: [Rgb; 3] = [(0xff, 0xff, 0xd9), (0x41, 0xb6, 0xc4), (0x08, 0x1d, 0x58)];
const SKY_BLUE: &str = "#87ceeb";
const AXIS: &str = "#333333";

/// How heatmap columns are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLabels {
    /// Output CSV column names
    Columns,
    /// Short human-readable names
    Display,
}

impl ColumnLabels {
    fn label(self, factor: Factor) -> &'static str {
        match self {
            Self::Columns => factor.column(),
            Self::Display => factor.display_name(),
        }
    }
}

/// Vertical bar chart of the index, one bar per row in the given order.
pub fn bar_chart(rows: &[CountryRow], title: &str) -> Result<String> {
    const LEFT: f64 = 80.0;
    const RIGHT: f64 = 20.0;
    const TOP: f64 = 50.0;
    const BOTTOM: f64 = 90.0;
    const SLOT: f64 = 28.0;
    const PLOT_HEIGHT: f64 = 340.0;

    let slots = rows.len().max(1) as f64;
    let width = LEFT + slots * SLOT + RIGHT;
    let height = TOP + PLOT_HEIGHT + BOTTOM;
    let max_value = axis_max(rows);
    let baseline = TOP + PLOT_HEIGHT;

    let mut out = String::new();
    open_svg(&mut out, width, height)?;
    write_title(&mut out, width / 2.0, title)?;

    for tick in 0..=5 {
        let value = max_value * f64::from(tick) / 5.0;
        let y = baseline - PLOT_HEIGHT * f64::from(tick) / 5.0;
        writeln!(
            out,
            r##"<line x1="{LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e0e0e0"/>"##,
            width - RIGHT
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{value:.2}</text>"#,
            LEFT - 6.0,
            y + 4.0
        )?;
    }

    for (i, row) in rows.iter().enumerate() {
        let bar_height = (row.ai_maturity_index.max(0.0) / max_value) * PLOT_HEIGHT;
        let x = LEFT + i as f64 * SLOT + 4.0;
        let t = if rows.len() > 1 {
            i as f64 / (rows.len() - 1) as f64
        } else {
            0.0
        };
        let iso = encode_text(&row.country_iso);
        writeln!(
            out,
            r#"<rect x="{x:.1}" y="{:.1}" width="{:.1}" height="{bar_height:.1}" fill="{}"><title>{iso}: {:.2}</title></rect>"#,
            baseline - bar_height,
            SLOT - 8.0,
            ramp(&VIRIDIS, t),
            row.ai_maturity_index
        )?;
        writeln!(
            out,
            r#"<text transform="translate({:.1},{:.1}) rotate(-45)" font-size="11" text-anchor="end">{iso}</text>"#,
            x + (SLOT - 8.0) / 2.0,
            baseline + 14.0
        )?;
    }

    write_axes(&mut out, LEFT, baseline, width - RIGHT, TOP)?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">Country</text>"#,
        LEFT + (width - LEFT - RIGHT) / 2.0,
        height - 12.0
    )?;
    writeln!(
        out,
        r#"<text transform="translate(16,{:.1}) rotate(-90)" font-size="12" text-anchor="middle">AI Maturity Index Score</text>"#,
        TOP + PLOT_HEIGHT / 2.0
    )?;
    out.push_str("</svg>\n");
    Ok(out)
}

/// Horizontal bar chart with value labels; the first row is drawn on top.
pub fn horizontal_bar_chart(rows: &[CountryRow], title: &str) -> Result<String> {
    const LEFT: f64 = 70.0;
    const TOP: f64 = 50.0;
    const BOTTOM: f64 = 50.0;
    const ROW: f64 = 32.0;
    const PLOT_WIDTH: f64 = 500.0;
    const LABEL_ROOM: f64 = 70.0;

    let width = LEFT + PLOT_WIDTH + LABEL_ROOM;
    let height = TOP + rows.len().max(1) as f64 * ROW + BOTTOM;
    let max_value = axis_max(rows);

    let mut out = String::new();
    open_svg(&mut out, width, height)?;
    write_title(&mut out, width / 2.0, title)?;

    for (i, row) in rows.iter().enumerate() {
        let y = TOP + i as f64 * ROW + 4.0;
        let bar_width = (row.ai_maturity_index.max(0.0) / max_value) * PLOT_WIDTH;
        let iso = encode_text(&row.country_iso);
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{iso}</text>"#,
            LEFT - 6.0,
            y + ROW / 2.0
        )?;
        writeln!(
            out,
            r#"<rect x="{LEFT}" y="{y:.1}" width="{bar_width:.1}" height="{:.1}" fill="{SKY_BLUE}"/>"#,
            ROW - 8.0
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="11"> {:.2}</text>"#,
            LEFT + bar_width + 4.0,
            y + ROW / 2.0,
            row.ai_maturity_index
        )?;
    }

    let baseline = height - BOTTOM;
    write_axes(&mut out, LEFT, baseline, LEFT + PLOT_WIDTH, TOP)?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">AI Maturity Index Score</text>"#,
        LEFT + PLOT_WIDTH / 2.0,
        height - 16.0
    )?;
    out.push_str("</svg>\n");
    Ok(out)
}

/// Countries by the five weighted factors, each cell annotated.
///
/// Colours share one scale across all cells.
pub fn heatmap(rows: &[CountryRow], title: &str, labels: ColumnLabels) -> Result<String> {
    const LEFT: f64 = 70.0;
    const TOP: f64 = 70.0;
    const BOTTOM: f64 = 20.0;
    const CELL_WIDTH: f64 = 120.0;
    const CELL_HEIGHT: f64 = 28.0;

    let columns = Factor::ALL.len() as f64;
    let width = LEFT + columns * CELL_WIDTH + 20.0;
    let height = TOP + rows.len().max(1) as f64 * CELL_HEIGHT + BOTTOM;
    let (low, high) = value_bounds(rows);

    let mut out = String::new();
    open_svg(&mut out, width, height)?;
    write_title(&mut out, width / 2.0, title)?;

    for (j, factor) in Factor::ALL.iter().enumerate() {
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
            LEFT + (j as f64 + 0.5) * CELL_WIDTH,
            TOP - 8.0,
            encode_text(labels.label(*factor))
        )?;
    }

    for (i, row) in rows.iter().enumerate() {
        let y = TOP + i as f64 * CELL_HEIGHT;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"#,
            LEFT - 6.0,
            y + CELL_HEIGHT / 2.0 + 4.0,
            encode_text(&row.country_iso)
        )?;
        for (j, factor) in Factor::ALL.iter().enumerate() {
            let value = row.factor(*factor);
            let t = if high > low { (value - low) / (high - low) } else { 0.5 };
            let x = LEFT + j as f64 * CELL_WIDTH;
            let text_fill = if t > 0.55 { "white" } else { "black" };
            writeln!(
                out,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{CELL_WIDTH}" height="{CELL_HEIGHT}" fill="{}" stroke="white" stroke-width="0.5"/>"#,
                ramp(&YELLOW_GREEN_BLUE, t)
            )?;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle" fill="{text_fill}">{value:.2}</text>"#,
                x + CELL_WIDTH / 2.0,
                y + CELL_HEIGHT / 2.0 + 4.0
            )?;
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn open_svg(out: &mut String, width: f64, height: f64) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="Helvetica, Arial, sans-serif">"#
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)
}

fn write_title(out: &mut String, center: f64, title: &str) -> std::fmt::Result {
    writeln!(
        out,
        r#"<text x="{center:.1}" y="28" font-size="16" font-weight="bold" text-anchor="middle">{}</text>"#,
        encode_text(title)
    )
}

fn write_axes(out: &mut String, left: f64, bottom: f64, right: f64, top: f64) -> std::fmt::Result {
    writeln!(
        out,
        r#"<line x1="{left}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="{AXIS}"/>"#
    )?;
    writeln!(
        out,
        r#"<line x1="{left}" y1="{top}" x2="{left}" y2="{bottom:.1}" stroke="{AXIS}"/>"#
    )
}

/// Upper end of the value axis; never zero so scaling stays finite.
fn axis_max(rows: &[CountryRow]) -> f64 {
    let max = rows
        .iter()
        .map(|r| r.ai_maturity_index)
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn value_bounds(rows: &[CountryRow]) -> (f64, f64) {
    rows.iter()
        .flat_map(|row| Factor::ALL.iter().map(move |f| row.factor(*f)))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Piecewise-linear colour ramp over evenly spaced stops.
fn ramp(stops: &[Rgb], t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let segments = stops.len().saturating_sub(1).max(1);
    let scaled = t * segments as f64;
    let index = (scaled.floor() as usize).min(segments - 1);
    let local = scaled - index as f64;

    let (a, b) = match (stops.get(index), stops.get(index + 1)) {
        (Some(a), Some(b)) => (*a, *b),
        (Some(a), None) => (*a, *a),
        _ => ((0, 0, 0), (0, 0, 0)),
    };
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * local).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
