use std::f64::consts::PI;

pub mod layout;

pub use layout::{ArcConfig, SatelliteItem, compute_positions};

pub const DEFAULT_ITEM_COUNT: usize = 6;
pub const DEFAULT_RADIUS: f64 = 100.0; // satellite orbital radius
pub const DEFAULT_START_ANGLE: f64 = -PI / 2.0; // straight up
pub const DEFAULT_SWEEP_ANGLE: f64 = 2.0 * PI;
pub const DEFAULT_ANCHOR_SIZE: f64 = 50.0;
pub const DEFAULT_ITEM_SIZE: f64 = 40.0;
pub const DEFAULT_BOUNDARY_PADDING: f64 = 10.0;

// Tap vs drag disambiguation
pub const CLICK_THRESHOLD_MS: f64 = 200.0;
pub const CLICK_THRESHOLD_PX: f64 = 5.0;
