pub mod bs;

/// Small closed-form helpers shared by the pricer and its callers
pub mod utils {
    /// Calculate log-moneyness of the spot against the strike: ln(S/K)
    pub fn log_moneyness(spot: f64, strike: f64) -> f64 {
        (spot / strike).ln()
    }

    /// Continuous-compounding discount factor exp(-rT)
    pub fn discount_factor(rate: f64, t: f64) -> f64 {
        (-rate * t).exp()
    }

    /// Intrinsic values `(call, put)` against the discounted strike.
    ///
    /// This is the zero-volatility limit of the Black-Scholes prices:
    /// `max(S - K e^{-rT}, 0)` and `max(K e^{-rT} - S, 0)`.
    pub fn discounted_intrinsic(spot: f64, strike: f64, rate: f64, t: f64) -> (f64, f64) {
        let pv_strike = strike * discount_factor(rate, t);
        ((spot - pv_strike).max(0.0), (pv_strike - spot).max(0.0))
    }
}
