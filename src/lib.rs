//! # bs-pnl: Black-Scholes Pricing with Profit-and-Loss Heatmaps
//!
//! `bs-pnl` prices European call and put options with the closed-form
//! Black-Scholes formula and shows how the profit and loss of a purchased
//! option changes across a grid of spot prices and volatilities.
//!
//! ## Core Features
//!
//! - **Pricer**: call and put fair values from five market inputs, with input validation
//! - **Grid Evaluator**: value and PnL surfaces over spot × volatility, rows indexed by volatility
//! - **Dashboard Config**: TOML inputs with the usual defaults (S=K=100, T=1y, σ=20%, r=5%)
//! - **Rendering**: annotated SVG heatmaps and CSV export of every surface
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_pnl::{build_grids, price, Axis, AxisRange, MarketParameters, PurchasePrices};
//!
//! let params = MarketParameters::new(1.0, 100.0, 100.0, 0.2, 0.05);
//! let prices = price(&params)?;
//! println!("call {:.2}, put {:.2}", prices.call, prices.put);
//!
//! let spots = AxisRange::new(Axis::Spot, 80.0, 120.0, 10).points()?;
//! let vols = AxisRange::new(Axis::Volatility, 0.1, 0.3, 10).points()?;
//! let grid = build_grids(&params, &spots, &vols, &PurchasePrices { call: 5.0, put: 5.0 })?;
//! assert_eq!(grid.shape(), (10, 10));
//! # Ok::<(), bs_pnl::PricingError>(())
//! ```
//!
//! ## Errors
//!
//! Pricing and grid functions return [`PricingError`]: a non-positive spot,
//! strike, volatility or maturity is rejected before any value is computed,
//! and so is a range whose lower bound exceeds its upper bound.

// ================================================================================================
// MODULES
// ================================================================================================

#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod render;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{Axis, Parameter, PricingError, PricingResult};
pub use grid::{build_grids, evaluate_grid, AxisRange, GridResult, Surface};
pub use models::bs::{norm_cdf, price, MarketParameters, OptionPrices, PurchasePrices};

#[cfg(feature = "serde")]
pub use config::{default_config_template, DashboardConfig};

// ================================================================================================
// DASHBOARD
// ================================================================================================

/// Everything the dashboard shows for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOutput {
    pub params: MarketParameters,
    pub purchase: PurchasePrices,
    /// Fair values at the input parameters
    pub prices: OptionPrices,
    /// `prices` minus the purchase prices
    pub pnl: OptionPrices,
    pub grid: GridResult,
}

/// Price the configured option and build its PnL grids.
///
/// This runs the whole dashboard computation from scratch: single pricing,
/// axis construction from the configured (or derived) bounds, then the grid.
///
/// # Errors
///
/// Any [`PricingError`] from the inputs or the heatmap ranges, with context
/// naming the step that failed.
///
/// # Example
///
/// ```rust
/// use bs_pnl::{evaluate_dashboard, DashboardConfig};
///
/// let output = evaluate_dashboard(&DashboardConfig::default())?;
/// assert!((output.prices.call - 10.45).abs() < 0.01);
/// assert_eq!(output.grid.shape(), (10, 10));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[cfg(feature = "serde")]
pub fn evaluate_dashboard(config: &DashboardConfig) -> anyhow::Result<DashboardOutput> {
    use anyhow::Context;

    let params = config.market_parameters();
    let purchase = config.purchase;

    let prices = price(&params).context("Failed to price the configured option")?;

    let spot_axis = config
        .spot_range()
        .points()
        .context("Invalid spot range for heatmap")?;
    let vol_axis = config
        .vol_range()
        .points()
        .context("Invalid volatility range for heatmap")?;

    let grid = build_grids(&params, &spot_axis, &vol_axis, &purchase)
        .context("Failed to build PnL grids")?;

    Ok(DashboardOutput {
        params,
        purchase,
        pnl: prices.pnl(&purchase),
        prices,
        grid,
    })
}
