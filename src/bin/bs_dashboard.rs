// Black-Scholes PnL dashboard.
//
// Prints the inputs and the call/put metrics, then writes the call and put PnL
// heatmaps (SVG) and every grid surface (CSV).
//
// Usage:
//     bs_dashboard [CONFIG.toml] [OUT_DIR]
//     bs_dashboard --print-config
//
// Without a config file the defaults are used. OUT_DIR defaults to the
// working directory. Set RUST_LOG=debug for grid diagnostics.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bs_pnl::render::{inputs_table, metrics_summary, render_pnl_heatmaps, save_grids_csv};
use bs_pnl::{default_config_template, evaluate_dashboard, DashboardConfig};
use log::info;

fn usage(args: &[String]) -> String {
    let program = args.first().map(String::as_str).unwrap_or("bs_dashboard");
    format!(
        "Usage: {} [CONFIG.toml] [OUT_DIR]\n       {} --print-config",
        program, program
    )
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", usage(&args));
        return Ok(());
    }
    if args.iter().any(|a| a == "--print-config") {
        print!("{}", default_config_template());
        return Ok(());
    }

    let config = match args.get(1) {
        Some(path) => DashboardConfig::from_path(path)?,
        None => {
            info!("No config file given, using defaults");
            DashboardConfig::default()
        }
    };
    let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let output = evaluate_dashboard(&config)?;

    println!("Black-Scholes Pricing Model with PNL");
    println!("====================================\n");
    print!("{}", inputs_table(&output.params, &output.purchase));
    println!();
    print!("{}", metrics_summary(&output.prices, &output.purchase));

    let (rows, cols) = output.grid.shape();
    println!(
        "\nPNL heatmaps: {} volatilities [{:.2}, {:.2}] x {} spots [{:.2}, {:.2}]",
        rows,
        output.grid.vol_axis.first().copied().unwrap_or_default(),
        output.grid.vol_axis.last().copied().unwrap_or_default(),
        cols,
        output.grid.spot_axis.first().copied().unwrap_or_default(),
        output.grid.spot_axis.last().copied().unwrap_or_default(),
    );

    render_pnl_heatmaps(&output.grid, &out_dir)?;
    save_grids_csv(&out_dir.join("grids.csv"), &output.grid)?;

    println!("Heatmaps and grids written to {}", out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_without_program_name() {
        assert!(usage(&[]).starts_with("Usage: bs_dashboard [CONFIG.toml]"));
        assert!(usage(&["/usr/bin/bsd".to_string()]).starts_with("Usage: /usr/bin/bsd "));
    }
}
