// Implementation constants:
pub const MAX_ABSOLUTE_DIFFERENCE: f64 = 1e-9;

// Method argument defaults:
pub const DEFAULT_FLATNESS_TOLERANCE: f64 = 0.05;
pub const MAX_SUBDIVISION_DEPTH: u32 = 25;
pub const DEFAULT_FRAME_COUNT: u32 = 30;
