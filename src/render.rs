//! Presentation of pricing results: inputs table, metric lines, SVG heatmaps
//! and CSV export.
//!
//! Nothing here prices anything; every function consumes values produced by
//! [`crate::price`] or [`crate::build_grids`].

use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::grid::types::{GridResult, Surface};
use crate::models::bs::{MarketParameters, OptionPrices, PurchasePrices};

const HEATMAP_SIZE: (u32, u32) = (1000, 800);

/// Two-column table of every dashboard input.
pub fn inputs_table(params: &MarketParameters, purchase: &PurchasePrices) -> String {
    let rows = [
        ("Current Asset Price", params.spot),
        ("Strike Price", params.strike),
        ("Time to Maturity (Years)", params.time_to_maturity),
        ("Volatility (σ)", params.volatility),
        ("Risk-Free Interest Rate", params.interest_rate),
        ("Call Purchase Price", purchase.call),
        ("Put Purchase Price", purchase.put),
    ];
    let width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (name, value) in rows {
        let pad = width - name.chars().count();
        out.push_str(&format!("{}{} | {:>10.4}\n", name, " ".repeat(pad), value));
    }
    out
}

/// Call/put values and PnL, two decimals each.
pub fn metrics_summary(prices: &OptionPrices, purchase: &PurchasePrices) -> String {
    let pnl = prices.pnl(purchase);
    format!(
        "CALL value ${:.2}  PNL ${:.2}\nPUT  value ${:.2}  PNL ${:.2}\n",
        prices.call, pnl.call, prices.put, pnl.put
    )
}

/// Diverging red-yellow-green colour for a PnL value, centred on zero.
///
/// `scale` is the absolute value mapped to the saturated ends.
pub fn pnl_color(value: f64, scale: f64) -> RGBColor {
    const RED: (f64, f64, f64) = (215.0, 48.0, 39.0);
    const YELLOW: (f64, f64, f64) = (255.0, 255.0, 191.0);
    const GREEN: (f64, f64, f64) = (26.0, 152.0, 80.0);

    let t = if scale > 0.0 {
        (value / scale).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let (from, to, w) = if t < 0.0 {
        (YELLOW, RED, -t)
    } else {
        (YELLOW, GREEN, t)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * w).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

fn axis_label(axis: &[f64], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => axis
            .get(*i as usize)
            .map(|v| format!("{:.2}", v))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Drawing row of surface row `row`: the first volatility sits at the top.
fn display_row(rows: usize, row: usize) -> i32 {
    (rows - 1 - row) as i32
}

fn vol_label(vol_axis: &[f64], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(y) if *y >= 0 => vol_axis
            .len()
            .checked_sub(1 + *y as usize)
            .and_then(|i| vol_axis.get(i))
            .map(|v| format!("{:.2}", v))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Draw one annotated PnL surface as an SVG heatmap.
///
/// Columns follow `spot_axis` left to right and rows follow `vol_axis` top to
/// bottom, so the lowest volatility is the top row.
pub fn render_heatmap(
    path: &Path,
    title: &str,
    surface: &Surface,
    spot_axis: &[f64],
    vol_axis: &[f64],
) -> Result<()> {
    let (rows, cols) = (vol_axis.len(), spot_axis.len());
    if rows == 0 || cols == 0 {
        bail!("Cannot render {}: grid is {}x{}", title, rows, cols);
    }
    if surface.len() != rows || surface.iter().any(|row| row.len() != cols) {
        bail!("Surface shape does not match axes for {}", title);
    }

    let scale = surface
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));

    let root = SVGBackend::new(path, HEATMAP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 30))
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (0..cols as i32).into_segmented(),
            (0..rows as i32).into_segmented(),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(cols)
        .y_labels(rows)
        .x_label_formatter(&|v| axis_label(spot_axis, v))
        .y_label_formatter(&|v| vol_label(vol_axis, v))
        .x_desc("Spot Price")
        .y_desc("Volatility (ascending downward)")
        .draw()?;

    let cells = surface.iter().enumerate().flat_map(|(i, row)| {
        row.iter()
            .enumerate()
            .map(move |(j, &value)| (display_row(rows, i), j as i32, value))
    });

    chart.draw_series(cells.clone().map(|(y, j, value)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(j), SegmentValue::Exact(y)),
                (SegmentValue::Exact(j + 1), SegmentValue::Exact(y + 1)),
            ],
            pnl_color(value, scale).filled(),
        )
    }))?;

    let annotation = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.map(|(y, j, value)| {
        Text::new(
            format!("{:.2}", value),
            (SegmentValue::CenterOf(j), SegmentValue::CenterOf(y)),
            annotation.clone(),
        )
    }))?;

    root.present()
        .with_context(|| format!("Failed to write heatmap {}", path.display()))?;
    info!("Heatmap saved to {}", path.display());
    Ok(())
}

/// Write `call_pnl.svg` and `put_pnl.svg` into `out_dir`.
pub fn render_pnl_heatmaps(grid: &GridResult, out_dir: &Path) -> Result<()> {
    render_heatmap(
        &out_dir.join("call_pnl.svg"),
        "CALL PNL",
        &grid.call_pnl,
        &grid.spot_axis,
        &grid.vol_axis,
    )?;
    render_heatmap(
        &out_dir.join("put_pnl.svg"),
        "PUT PNL",
        &grid.put_pnl,
        &grid.spot_axis,
        &grid.vol_axis,
    )
}

/// Export every surface as CSV.
///
/// Header is `surface,volatility,<spot...>`; each following record is one
/// volatility row of one surface.
pub fn write_grids_csv<W: io::Write>(writer: W, grid: &GridResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["surface".to_string(), "volatility".to_string()];
    header.extend(grid.spot_axis.iter().map(|s| s.to_string()));
    wtr.write_record(&header)?;

    for (name, surface) in grid.surfaces() {
        for (vol, row) in grid.vol_axis.iter().zip(surface) {
            let mut record = vec![name.to_string(), vol.to_string()];
            record.extend(row.iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_grids_csv(path: &Path, grid: &GridResult) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_grids_csv(file, grid)?;
    info!("Grids saved to {}", path.display());
    Ok(())
}
