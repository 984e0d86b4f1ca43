pub const TOLERANCE: f64 = 1e-15;
pub const ITERATION_LIMIT: usize = 500;
pub const ITERATION_SCALE: f64 = 20.0;
pub const FP_MIN: f64 = 1e-300;
pub const YATES_ADJUSTMENT: f64 = 0.5;
pub const DEFAULT_ALPHA: f64 = 0.05;
pub const MIN_EXPECTED_COUNT: f64 = 5.0;
