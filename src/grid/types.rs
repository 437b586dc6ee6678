use crate::error::{Axis, PricingError, PricingResult};

/// Closed interval sampled at evenly spaced points.
///
/// `points()` has `linspace` semantics: both bounds are included and a single
/// step yields just `min`.
///
/// ```rust
/// # use bs_pnl::{AxisRange, Axis};
/// let spots = AxisRange::new(Axis::Spot, 80.0, 120.0, 5).points()?;
/// assert_eq!(spots, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
/// # Ok::<(), bs_pnl::PricingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub axis: Axis,
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl AxisRange {
    pub fn new(axis: Axis, min: f64, max: f64, steps: usize) -> Self {
        Self {
            axis,
            min,
            max,
            steps,
        }
    }

    /// Evenly spaced ascending points from `min` to `max`.
    ///
    /// # Errors
    ///
    /// * [`PricingError::RangeOrder`] if `min > max`
    /// * [`PricingError::InvalidSteps`] if `steps == 0`
    pub fn points(&self) -> PricingResult<Vec<f64>> {
        if self.min > self.max {
            return Err(PricingError::range_order(self.axis, self.min, self.max));
        }
        match self.steps {
            0 => Err(PricingError::InvalidSteps { axis: self.axis }),
            1 => Ok(vec![self.min]),
            n => {
                let step = (self.max - self.min) / (n - 1) as f64;
                // Pin the last point to `max` so it is not off by rounding
                Ok((0..n)
                    .map(|i| if i == n - 1 { self.max } else { self.min + step * i as f64 })
                    .collect())
            }
        }
    }
}

/// Values of one surface, indexed `[vol_index][spot_index]`.
pub type Surface = Vec<Vec<f64>>;

/// Every surface the grid evaluator produces, with the axis labels it was built on.
///
/// Rows follow `vol_axis`, columns follow `spot_axis`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridResult {
    /// Column labels (spot prices)
    pub spot_axis: Vec<f64>,
    /// Row labels (volatilities)
    pub vol_axis: Vec<f64>,
    pub call_value: Surface,
    pub put_value: Surface,
    pub call_pnl: Surface,
    pub put_pnl: Surface,
}

impl GridResult {
    /// `(rows, columns)`, i.e. `(len(vol_axis), len(spot_axis))`
    pub fn shape(&self) -> (usize, usize) {
        (self.vol_axis.len(), self.spot_axis.len())
    }

    /// The four surfaces in export order, with their names.
    pub fn surfaces(&self) -> [(&'static str, &Surface); 4] {
        [
            ("call_value", &self.call_value),
            ("put_value", &self.put_value),
            ("call_pnl", &self.call_pnl),
            ("put_pnl", &self.put_pnl),
        ]
    }
}
