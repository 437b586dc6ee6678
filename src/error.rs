//! Error types for pricing and grid evaluation.
//!
//! Every failure is an input-validation failure detected before any value is
//! computed, so each variant carries the offending field and value for display.

use std::fmt;
use thiserror::Error;

/// Market parameter that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    TimeToMaturity,
    Strike,
    Spot,
    Volatility,
    InterestRate,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::TimeToMaturity => "time_to_maturity",
            Parameter::Strike => "strike",
            Parameter::Spot => "spot",
            Parameter::Volatility => "volatility",
            Parameter::InterestRate => "interest_rate",
        };
        f.write_str(name)
    }
}

/// Grid axis a range error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Spot,
    Volatility,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Spot => f.write_str("spot"),
            Axis::Volatility => f.write_str("volatility"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Invalid parameter: {field} = {value} (must be {})", requirement(.field))]
    InvalidParameter { field: Parameter, value: f64 },

    #[error("Range order error: {axis} range is not ascending ({min} > {max})")]
    RangeOrder { axis: Axis, min: f64, max: f64 },

    #[error("Invalid steps: {axis} range needs at least one point")]
    InvalidSteps { axis: Axis },

    #[error(
        "Discount overflow: strike * exp(-interest_rate * time_to_maturity) is not finite \
         (interest_rate = {interest_rate}, time_to_maturity = {time_to_maturity})"
    )]
    DiscountOverflow {
        interest_rate: f64,
        time_to_maturity: f64,
    },
}

pub type PricingResult<T> = Result<T, PricingError>;

fn requirement(field: &Parameter) -> &'static str {
    match field {
        Parameter::InterestRate => "finite",
        _ => "> 0 and finite",
    }
}

impl PricingError {
    pub fn invalid_parameter(field: Parameter, value: f64) -> Self {
        Self::InvalidParameter { field, value }
    }

    pub fn range_order(axis: Axis, min: f64, max: f64) -> Self {
        Self::RangeOrder { axis, min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_field_and_value() {
        let err = PricingError::invalid_parameter(Parameter::Volatility, 0.0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: volatility = 0 (must be > 0 and finite)"
        );

        let err = PricingError::invalid_parameter(Parameter::InterestRate, f64::NAN);
        assert!(err.to_string().contains("interest_rate = NaN"));
        assert!(err.to_string().ends_with("(must be finite)"));

        let err = PricingError::range_order(Axis::Spot, 120.0, 80.0);
        assert_eq!(
            err.to_string(),
            "Range order error: spot range is not ascending (120 > 80)"
        );
    }
}
