//! Closed-form Black-Scholes pricing of European calls and puts.
//!
//! With `S` spot, `K` strike, `r` the risk-free rate, `σ` volatility and `T`
//! time to maturity in years:
//!
//! ```text
//! d1   = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2   = d1 - σ·√T
//! call = S·Φ(d1) - K·e^{-rT}·Φ(d2)
//! put  = K·e^{-rT}·Φ(-d2) - S·Φ(-d1)
//! ```
//!
//! Inputs are validated before evaluation: a non-positive spot, strike,
//! volatility or maturity is rejected instead of producing NaN or infinity,
//! and so is a rate and maturity whose discounted strike overflows.
//!
//! `d1` and `d2` are evaluated as `ln(S/K)/(σ√T) + (r/σ ± σ/2)·√T` so that
//! `σ²` never overflows. When `σ√T` is too small to divide by, prices take
//! their zero-volatility limit, the discounted intrinsic value.

use crate::error::{Parameter, PricingError, PricingResult};
use crate::models::utils::{discount_factor, discounted_intrinsic, log_moneyness};

/// The five market inputs of a single pricing call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters {
    /// Time to maturity in years
    pub time_to_maturity: f64,
    /// Strike price
    pub strike: f64,
    /// Current price of the underlying
    pub spot: f64,
    /// Annualised volatility σ (as decimal, e.g. 0.2 for 20%)
    pub volatility: f64,
    /// Continuously-compounded risk-free rate
    pub interest_rate: f64,
}

impl MarketParameters {
    pub fn new(
        time_to_maturity: f64,
        strike: f64,
        spot: f64,
        volatility: f64,
        interest_rate: f64,
    ) -> Self {
        Self {
            time_to_maturity,
            strike,
            spot,
            volatility,
            interest_rate,
        }
    }

    /// Copy of these parameters with spot and volatility replaced.
    pub fn with_spot_and_vol(&self, spot: f64, volatility: f64) -> Self {
        Self {
            spot,
            volatility,
            ..*self
        }
    }

    /// Check every field against the domain of the pricing formula.
    pub fn validate(&self) -> PricingResult<()> {
        self.validate_contract()?;
        require_positive(Parameter::Spot, self.spot)?;
        require_positive(Parameter::Volatility, self.volatility)
    }

    /// Strike discounted to today: K·e^{-rT}
    pub fn pv_strike(&self) -> f64 {
        self.strike * discount_factor(self.interest_rate, self.time_to_maturity)
    }

    /// Validate only the fields a grid keeps fixed across every cell.
    pub(crate) fn validate_contract(&self) -> PricingResult<()> {
        require_positive(Parameter::TimeToMaturity, self.time_to_maturity)?;
        require_positive(Parameter::Strike, self.strike)?;
        if !self.interest_rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                Parameter::InterestRate,
                self.interest_rate,
            ));
        }
        if !self.pv_strike().is_finite() {
            return Err(PricingError::DiscountOverflow {
                interest_rate: self.interest_rate,
                time_to_maturity: self.time_to_maturity,
            });
        }
        Ok(())
    }
}

pub(crate) fn require_positive(field: Parameter, value: f64) -> PricingResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(field, value))
    }
}

/// Fair values of the call and the put.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionPrices {
    pub call: f64,
    pub put: f64,
}

impl OptionPrices {
    /// Profit and loss against what was paid for each option.
    pub fn pnl(&self, purchase: &PurchasePrices) -> OptionPrices {
        OptionPrices {
            call: self.call - purchase.call,
            put: self.put - purchase.put,
        }
    }
}

/// Premium paid to acquire each option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchasePrices {
    pub call: f64,
    pub put: f64,
}

impl Default for PurchasePrices {
    fn default() -> Self {
        Self { call: 5.0, put: 5.0 }
    }
}

/// Standard normal cumulative distribution function.
pub fn norm_cdf(x: f64) -> f64 {
    // 0.5 * [1 + erf(x / sqrt(2))]
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Black-Scholes `(d1, d2)`, or `None` when they are undefined in floating point
/// (σ√T underflowed to zero, or opposite infinities met). Assumes validated inputs.
fn d1_d2(params: &MarketParameters) -> Option<(f64, f64)> {
    let MarketParameters {
        time_to_maturity: t,
        strike,
        spot,
        volatility: sigma,
        interest_rate: r,
    } = *params;

    let sqrt_t = t.sqrt();
    let sigma_sqrt_t = sigma * sqrt_t;
    if sigma_sqrt_t == 0.0 {
        return None;
    }
    if sigma_sqrt_t.is_infinite() {
        return Some((f64::INFINITY, f64::NEG_INFINITY));
    }

    let moneyness = log_moneyness(spot, strike) / sigma_sqrt_t;
    let drift = r / sigma;
    let d1 = moneyness + (drift + 0.5 * sigma) * sqrt_t;
    let d2 = moneyness + (drift - 0.5 * sigma) * sqrt_t;
    if d1.is_nan() || d2.is_nan() {
        return None;
    }
    Some((d1, d2))
}

/// Price the European call and put for one set of market parameters.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] when spot, strike, volatility or time to
///   maturity is not strictly positive and finite, or the rate is not finite
/// * [`PricingError::DiscountOverflow`] when `K·e^{-rT}` is not representable
///
/// # Example
///
/// ```rust
/// use bs_pnl::{price, MarketParameters};
///
/// let params = MarketParameters::new(1.0, 100.0, 100.0, 0.2, 0.05);
/// let prices = price(&params)?;
/// assert!((prices.call - 10.4506).abs() < 1e-3);
/// assert!((prices.put - 5.5735).abs() < 1e-3);
/// # Ok::<(), bs_pnl::PricingError>(())
/// ```
pub fn price(params: &MarketParameters) -> PricingResult<OptionPrices> {
    params.validate()?;
    Ok(price_unchecked(params))
}

/// Formula evaluation without validation, for callers that validated up front.
///
/// Results are floored at zero; rounding can otherwise leave a deep
/// out-of-the-money price a few ulps below it.
pub(crate) fn price_unchecked(params: &MarketParameters) -> OptionPrices {
    let pv_strike = params.pv_strike();

    let (call, put) = match d1_d2(params) {
        Some((d1, d2)) => (
            params.spot * norm_cdf(d1) - pv_strike * norm_cdf(d2),
            pv_strike * norm_cdf(-d2) - params.spot * norm_cdf(-d1),
        ),
        None => discounted_intrinsic(
            params.spot,
            params.strike,
            params.interest_rate,
            params.time_to_maturity,
        ),
    };

    OptionPrices {
        call: call.max(0.0),
        put: put.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> MarketParameters {
        MarketParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)
    }

    #[test]
    fn test_norm_cdf_known_values() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((norm_cdf(1.96) - 0.975_002_104_851_780).abs() < 1e-12);
        assert!((norm_cdf(-1.0) - 0.158_655_253_931_457).abs() < 1e-12);
        assert!((norm_cdf(10.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_reference_prices() {
        let prices = price(&reference_params()).unwrap();
        assert!((prices.call - 10.45).abs() < 0.01, "call = {}", prices.call);
        assert!((prices.put - 5.57).abs() < 0.01, "put = {}", prices.put);
    }

    #[test]
    fn test_d1_d2_reference() {
        let (d1, d2) = d1_d2(&reference_params()).unwrap();
        assert!((d1 - 0.35).abs() < 1e-12);
        assert!((d2 - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_each_invalid_field() {
        let base = reference_params();

        let cases = [
            (MarketParameters { volatility: 0.0, ..base }, Parameter::Volatility),
            (MarketParameters { volatility: -0.1, ..base }, Parameter::Volatility),
            (MarketParameters { spot: 0.0, ..base }, Parameter::Spot),
            (MarketParameters { strike: -5.0, ..base }, Parameter::Strike),
            (MarketParameters { time_to_maturity: 0.0, ..base }, Parameter::TimeToMaturity),
            (MarketParameters { interest_rate: f64::INFINITY, ..base }, Parameter::InterestRate),
            (MarketParameters { spot: f64::NAN, ..base }, Parameter::Spot),
        ];

        for (params, expected) in cases {
            match price(&params) {
                Err(PricingError::InvalidParameter { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidParameter({}), got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_negative_rate_is_accepted() {
        let params = MarketParameters {
            interest_rate: -0.01,
            ..reference_params()
        };
        let prices = price(&params).unwrap();
        assert!(prices.call > 0.0 && prices.put > 0.0);
    }

    #[test]
    fn test_tiny_volatility_takes_intrinsic_limit() {
        // σ√T underflows to zero
        let params = MarketParameters::new(0.25, 100.0, 100.0, 5e-324, 0.0);
        assert_eq!(price(&params).unwrap(), OptionPrices { call: 0.0, put: 0.0 });

        let params = MarketParameters::new(0.25, 100.0, 120.0, 5e-324, 0.05);
        let prices = price(&params).unwrap();
        assert!((prices.call - (120.0 - params.pv_strike())).abs() < 1e-12);
        assert_eq!(prices.put, 0.0);
    }

    #[test]
    fn test_huge_volatility_takes_upper_limit() {
        // σ² would overflow; call -> S and put -> K·e^{-rT}
        let params = MarketParameters::new(1.0, 100.0, 100.0, 1e200, 0.05);
        let prices = price(&params).unwrap();
        assert!((prices.call - 100.0).abs() < 1e-9, "call = {}", prices.call);
        assert!(
            (prices.put - params.pv_strike()).abs() < 1e-9,
            "put = {}",
            prices.put
        );
    }

    #[test]
    fn test_infinite_total_volatility() {
        // σ√T overflows while the discount stays finite
        let params = MarketParameters::new(1e300, 100.0, 100.0, 1e200, 0.0);
        let prices = price(&params).unwrap();
        assert_eq!(prices, OptionPrices { call: 100.0, put: 100.0 });
    }

    #[test]
    fn test_discount_overflow_is_rejected() {
        let params = MarketParameters::new(1e308, 100.0, 100.0, 1e10, -0.05);
        assert!(params.validate().is_err());
        assert_eq!(
            price(&params),
            Err(PricingError::DiscountOverflow {
                interest_rate: -0.05,
                time_to_maturity: 1e308,
            })
        );
    }

    #[test]
    fn test_extreme_valid_inputs_stay_finite() {
        let tiny_to_huge = [5e-324, 1e-300, 1e-10, 1.0, 1e10, 1e200, 1e308];
        let prices_and_strikes = [1e-300, 1e-3, 100.0, 1e300];

        for &t in &tiny_to_huge {
            for &sigma in &tiny_to_huge {
                for &r in &[-0.05, 0.0, 0.05] {
                    for &spot in &prices_and_strikes {
                        for &strike in &prices_and_strikes {
                            let params = MarketParameters::new(t, strike, spot, sigma, r);
                            match price(&params) {
                                Ok(p) => assert!(
                                    p.call.is_finite()
                                        && p.put.is_finite()
                                        && p.call >= 0.0
                                        && p.put >= 0.0,
                                    "{:?} -> {:?}",
                                    params,
                                    p
                                ),
                                Err(PricingError::DiscountOverflow { .. }) => {
                                    assert!(!params.pv_strike().is_finite())
                                }
                                Err(e) => panic!("{:?} -> unexpected {}", params, e),
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_pnl_subtracts_purchase() {
        let prices = OptionPrices { call: 10.0, put: 4.0 };
        let pnl = prices.pnl(&PurchasePrices { call: 5.0, put: 5.0 });
        assert_eq!(pnl, OptionPrices { call: 5.0, put: -1.0 });
    }
}
