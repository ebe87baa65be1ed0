/// Largest accepted lattice edge. Keeps `width * height` cell indices well inside `usize`
/// on 32-bit targets and bounds the per-step full-lattice scans.
pub const MAX_GRID_DIMENSION: usize = 8192;

/// Scale term of the patch growth curve `f(d) = GROWTH_CURVE_SCALE * GROWTH_CURVE_BASE^d`.
pub const GROWTH_CURVE_SCALE: f64 = 18.267;

/// Daily multiplicative rate of the patch growth curve.
pub const GROWTH_CURVE_BASE: f64 = 1.006_319_8;

/// Conversion from growth-curve units to patch health units.
pub const HEALTH_PER_CURVE_UNIT: f64 = 10.0;

/// Frayment casualties per adult grazer before the density term.
pub const FRAY_RATE_PER_ADULT: f64 = 3.3;

/// Density-independent part of the frayment multiplier.
pub const FRAY_BASE_INTENSITY: f64 = 0.15;

/// Per-adult increase of the frayment multiplier.
pub const FRAY_DENSITY_SLOPE: f64 = 0.0222;

/// Smallest daily requirement for which a grazing bite, drawn from `[0, required)`, can
/// remove health.
pub const MIN_REQUIRED_ENERGY: u32 = 2;

/// Movement costs a grazer `required_energy / MOVEMENT_COST_DIVISOR` (floored) each step.
pub const MOVEMENT_COST_DIVISOR: u32 = 4;
