pub mod clamp;
pub mod classify;
pub mod controller;

pub use clamp::{clamp_axis, clamp_to_viewport};
pub use classify::{Classification, ClickThresholds, GestureKind};
pub use controller::{AnchorState, GestureController, Snapshot};
