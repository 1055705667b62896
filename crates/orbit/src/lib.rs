#[macro_use]
mod macros;

pub mod config;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod menu;

pub use geometry::{Point, Rect, Size};
pub use gesture::{AnchorState, GestureController, Snapshot};
pub use host::Host;
pub use menu::{ArcConfig, SatelliteItem, compute_positions};
