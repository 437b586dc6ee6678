pub mod evaluator;
pub mod types;

pub use evaluator::{build_grids, evaluate_grid, pnl_surface, validate_axis};
pub use types::{AxisRange, GridResult, Surface};
