use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::Axis;
use crate::grid::types::AxisRange;
use crate::models::bs::{MarketParameters, PurchasePrices};

/// Lower bound the heatmap inputs accept for spot and volatility bounds
pub const MIN_BOUND: f64 = 0.01;
/// Upper bound for the volatility heatmap bounds
pub const MAX_VOL_BOUND: f64 = 1.0;

/// Market inputs shown in the dashboard sidebar
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_current_price")]
    pub current_price: f64,

    #[serde(default = "default_strike")]
    pub strike: f64,

    /// Time to maturity in years
    #[serde(default = "default_time_to_maturity")]
    pub time_to_maturity: f64,

    #[serde(default = "default_volatility")]
    pub volatility: f64,

    #[serde(default = "default_interest_rate")]
    pub interest_rate: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            current_price: default_current_price(),
            strike: default_strike(),
            time_to_maturity: default_time_to_maturity(),
            volatility: default_volatility(),
            interest_rate: default_interest_rate(),
        }
    }
}

impl From<MarketConfig> for MarketParameters {
    fn from(m: MarketConfig) -> Self {
        MarketParameters::new(
            m.time_to_maturity,
            m.strike,
            m.current_price,
            m.volatility,
            m.interest_rate,
        )
    }
}

/// Heatmap bounds. Missing bounds are derived from the market inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct HeatmapConfig {
    pub spot_min: Option<f64>,
    pub spot_max: Option<f64>,
    pub vol_min: Option<f64>,
    pub vol_max: Option<f64>,

    /// Points per axis
    #[serde(default = "default_steps")]
    pub steps: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            spot_min: None,
            spot_max: None,
            vol_min: None,
            vol_max: None,
            steps: default_steps(),
        }
    }
}

/// Main configuration struct for the dashboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default)]
    pub purchase: PurchasePrices,

    #[serde(default)]
    pub heatmap: HeatmapConfig,
}

impl DashboardConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse dashboard configuration")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn market_parameters(&self) -> MarketParameters {
        self.market.into()
    }

    /// Spot axis: explicit bounds, else ±20% around the current price.
    pub fn spot_range(&self) -> AxisRange {
        let spot = self.market.current_price;
        AxisRange::new(
            Axis::Spot,
            self.heatmap
                .spot_min
                .unwrap_or_else(|| (spot * 0.8).max(MIN_BOUND)),
            self.heatmap
                .spot_max
                .unwrap_or_else(|| (spot * 1.2).max(MIN_BOUND)),
            self.heatmap.steps,
        )
    }

    /// Volatility axis: explicit bounds, else 0.5x to 1.5x the input volatility.
    /// Derived bounds are clamped to [`MIN_BOUND`, `MAX_VOL_BOUND`].
    pub fn vol_range(&self) -> AxisRange {
        let vol = self.market.volatility;
        let clamp = |v: f64| v.clamp(MIN_BOUND, MAX_VOL_BOUND);
        AxisRange::new(
            Axis::Volatility,
            self.heatmap.vol_min.unwrap_or_else(|| clamp(vol * 0.5)),
            self.heatmap.vol_max.unwrap_or_else(|| clamp(vol * 1.5)),
            self.heatmap.steps,
        )
    }
}

/// Commented TOML with every default, suitable as a starting config file.
pub fn default_config_template() -> String {
    format!(
        r#"[market]
current_price = {:.1}
strike = {:.1}
time_to_maturity = {:.1}   # years
volatility = {}
interest_rate = {}

[purchase]
call = {:.1}
put = {:.1}

[heatmap]
# spot_min / spot_max default to 80% / 120% of current_price
# vol_min / vol_max default to 50% / 150% of volatility
steps = {}
"#,
        default_current_price(),
        default_strike(),
        default_time_to_maturity(),
        default_volatility(),
        default_interest_rate(),
        PurchasePrices::default().call,
        PurchasePrices::default().put,
        default_steps(),
    )
}

fn default_current_price() -> f64 {
    100.0
}

fn default_strike() -> f64 {
    100.0
}

fn default_time_to_maturity() -> f64 {
    1.0
}

fn default_volatility() -> f64 {
    0.2
}

fn default_interest_rate() -> f64 {
    0.05
}

fn default_steps() -> usize {
    10
}
