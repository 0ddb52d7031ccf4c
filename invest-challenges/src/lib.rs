mod error;
pub use error::*;
pub mod portfolio;
pub use portfolio::*;

/// Absolute tolerance when comparing accumulated profits.
pub const PROFIT_TOLERANCE: f64 = 1e-6;

pub fn profits_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= PROFIT_TOLERANCE
}
