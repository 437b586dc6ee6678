//! Spot × volatility grid evaluation.
//!
//! Rows are indexed by volatility and columns by spot. Renderers label rows with
//! `vol_axis` and columns with `spot_axis`, so the order matters.

use log::debug;

use crate::error::{Axis, Parameter, PricingError, PricingResult};
use crate::grid::types::{GridResult, Surface};
use crate::models::bs::{
    price_unchecked, require_positive, MarketParameters, OptionPrices, PurchasePrices,
};

/// Evaluate `cell(vol, spot)` over every grid point.
///
/// The result has `vol_axis.len()` rows of `spot_axis.len()` values each; the
/// outer loop runs over volatility.
pub fn evaluate_grid<T, F>(spot_axis: &[f64], vol_axis: &[f64], mut cell: F) -> Vec<Vec<T>>
where
    F: FnMut(f64, f64) -> T,
{
    vol_axis
        .iter()
        .map(|&vol| spot_axis.iter().map(|&spot| cell(vol, spot)).collect())
        .collect()
}

/// Check an axis is usable as grid labels: positive, finite and non-decreasing.
pub fn validate_axis(axis: Axis, values: &[f64]) -> PricingResult<()> {
    let field = match axis {
        Axis::Spot => Parameter::Spot,
        Axis::Volatility => Parameter::Volatility,
    };
    for &value in values {
        require_positive(field, value)?;
    }
    if let Some(pair) = values.windows(2).find(|pair| pair[0] > pair[1]) {
        return Err(PricingError::range_order(axis, pair[0], pair[1]));
    }
    Ok(())
}

/// Subtract a fixed premium from every cell of a value surface.
pub fn pnl_surface(values: &Surface, purchase: f64) -> Surface {
    values
        .iter()
        .map(|row| row.iter().map(|value| value - purchase).collect())
        .collect()
}

/// Price the base contract at every (volatility, spot) combination and derive PnL.
///
/// Time to maturity, strike and rate come from `base`; its spot and volatility
/// are replaced cell by cell. All inputs are validated before the first cell is
/// priced, so an error never leaves a partially filled grid.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] for an invalid base field or axis value
/// * [`PricingError::RangeOrder`] if either axis decreases anywhere
/// * [`PricingError::DiscountOverflow`] if the base strike cannot be discounted
///
/// # Example
///
/// ```rust
/// use bs_pnl::{build_grids, MarketParameters, PurchasePrices};
///
/// let base = MarketParameters::new(1.0, 100.0, 100.0, 0.2, 0.05);
/// let spots = [90.0, 100.0, 110.0];
/// let vols = [0.1, 0.2];
/// let grid = build_grids(&base, &spots, &vols, &PurchasePrices { call: 5.0, put: 5.0 })?;
///
/// assert_eq!(grid.shape(), (2, 3));
/// assert_eq!(grid.call_pnl[1][2], grid.call_value[1][2] - 5.0);
/// # Ok::<(), bs_pnl::PricingError>(())
/// ```
pub fn build_grids(
    base: &MarketParameters,
    spot_axis: &[f64],
    vol_axis: &[f64],
    purchase: &PurchasePrices,
) -> PricingResult<GridResult> {
    base.validate_contract()?;
    validate_axis(Axis::Spot, spot_axis)?;
    validate_axis(Axis::Volatility, vol_axis)?;

    debug!(
        "Evaluating {}x{} grid (strike={}, t={}, r={})",
        vol_axis.len(),
        spot_axis.len(),
        base.strike,
        base.time_to_maturity,
        base.interest_rate
    );

    let prices: Vec<Vec<OptionPrices>> = evaluate_grid(spot_axis, vol_axis, |vol, spot| {
        price_unchecked(&base.with_spot_and_vol(spot, vol))
    });

    let call_value: Surface = prices
        .iter()
        .map(|row| row.iter().map(|p| p.call).collect())
        .collect();
    let put_value: Surface = prices
        .iter()
        .map(|row| row.iter().map(|p| p.put).collect())
        .collect();

    Ok(GridResult {
        spot_axis: spot_axis.to_vec(),
        vol_axis: vol_axis.to_vec(),
        call_pnl: pnl_surface(&call_value, purchase.call),
        put_pnl: pnl_surface(&put_value, purchase.put),
        call_value,
        put_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bs::price;

    fn base() -> MarketParameters {
        MarketParameters::new(0.5, 100.0, 100.0, 0.2, 0.03)
    }

    #[test]
    fn test_evaluate_grid_is_vol_major() {
        let cells = evaluate_grid(&[1.0, 2.0, 3.0], &[10.0, 20.0], |vol, spot| (vol, spot));
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], vec![(10.0, 1.0), (10.0, 2.0), (10.0, 3.0)]);
        assert_eq!(cells[1][0], (20.0, 1.0));
    }

    #[test]
    fn test_cells_match_direct_pricing() {
        let spots = [80.0, 100.0, 125.0];
        let vols = [0.15, 0.35];
        let grid = build_grids(&base(), &spots, &vols, &PurchasePrices::default()).unwrap();

        for (i, &vol) in vols.iter().enumerate() {
            for (j, &spot) in spots.iter().enumerate() {
                let direct = price(&base().with_spot_and_vol(spot, vol)).unwrap();
                assert_eq!(grid.call_value[i][j], direct.call);
                assert_eq!(grid.put_value[i][j], direct.put);
            }
        }
    }

    #[test]
    fn test_base_spot_and_vol_are_ignored() {
        // Only the axes supply spot and volatility
        let odd_base = MarketParameters {
            spot: 1.0,
            volatility: 0.9,
            ..base()
        };
        let a = build_grids(&odd_base, &[100.0], &[0.2], &PurchasePrices::default()).unwrap();
        let b = build_grids(&base(), &[100.0], &[0.2], &PurchasePrices::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation_errors() {
        let purchase = PurchasePrices::default();

        let err = build_grids(&base(), &[90.0, 100.0], &[0.2, 0.0], &purchase).unwrap_err();
        assert_eq!(err, PricingError::invalid_parameter(Parameter::Volatility, 0.0));

        let err = build_grids(&base(), &[110.0, 90.0], &[0.2], &purchase).unwrap_err();
        assert_eq!(err, PricingError::range_order(Axis::Spot, 110.0, 90.0));

        let expired = MarketParameters {
            time_to_maturity: 0.0,
            ..base()
        };
        let err = build_grids(&expired, &[100.0], &[0.2], &purchase).unwrap_err();
        assert_eq!(
            err,
            PricingError::invalid_parameter(Parameter::TimeToMaturity, 0.0)
        );
    }

    #[test]
    fn test_empty_axes_give_empty_surfaces() {
        let grid = build_grids(&base(), &[], &[0.2, 0.3], &PurchasePrices::default()).unwrap();
        assert_eq!(grid.shape(), (2, 0));
        assert!(grid.call_pnl.iter().all(|row| row.is_empty()));

        let grid = build_grids(&base(), &[100.0], &[], &PurchasePrices::default()).unwrap();
        assert_eq!(grid.shape(), (0, 1));
        assert!(grid.put_value.is_empty());
    }
}
