//! Fixed geometry of the marble-drop experiment.
//!
//! Policy
//! - These are constants, not knobs. The estimate only converges to π for
//!   this exact arrangement (unit circle vs. unit-area rectangle), so callers
//!   configure sample sizes and experiment counts, never the shapes.

/// Sampling area, x range `[X_MIN, X_MAX)`.
pub const X_MIN: f64 = -2.0;
pub const X_MAX: f64 = 4.0;
/// Sampling area, y range `[Y_MIN, Y_MAX)`.
pub const Y_MIN: f64 = -2.0;
pub const Y_MAX: f64 = 2.0;

/// Open rectangle `RECT_X_MIN < x < RECT_X_MAX`, `RECT_Y_MIN < y < RECT_Y_MAX` (area 1).
pub const RECT_X_MIN: f64 = 2.0;
pub const RECT_X_MAX: f64 = 3.0;
pub const RECT_Y_MIN: f64 = -0.5;
pub const RECT_Y_MAX: f64 = 0.5;

/// Closed disk `x² + y² <= CIRCLE_RADIUS²` centered at the origin.
pub const CIRCLE_RADIUS: f64 = 1.0;

/// Sample sizes run when the caller does not provide its own list.
pub const DEFAULT_SAMPLE_SIZES: [u64; 4] = [1_000, 10_000, 100_000, 1_000_000];

/// Decimal places kept for estimates written to the report.
pub(crate) const ESTIMATE_DECIMALS: i32 = 6;
