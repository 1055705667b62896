use crate::geometry::Point;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct PointerId(i32);

crate::impl_id_newtype!(PointerId, i32);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct TargetId(u64);

crate::impl_id_newtype!(TargetId, u64);

/// Milliseconds on the host's monotonic clock.
#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    pub fn millis_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    pub pointer_id: PointerId,
    pub target: TargetId,
    pub timestamp: Timestamp,
}

impl PointerEvent {
    pub fn new(
        phase: PointerPhase,
        position: Point,
        pointer_id: PointerId,
        target: TargetId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            phase,
            position,
            pointer_id,
            target,
            timestamp,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    StrumDisplay,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClickSource {
    #[default]
    Pointer,
    /// Enter/Space activation; carries no meaningful coordinates.
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub position: Point,
    pub source: ClickSource,
    pub target: TargetId,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    Stop,
    #[default]
    Proceed,
}

/// What the host should do with the native event after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub propagation: Propagation,
}

impl EventResponse {
    pub const PASS_THROUGH: EventResponse = EventResponse {
        prevent_default: false,
        propagation: Propagation::Proceed,
    };

    pub const CONSUMED: EventResponse = EventResponse {
        prevent_default: true,
        propagation: Propagation::Stop,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_phase_parsing() {
        assert_eq!(PointerPhase::from_str("down").unwrap(), PointerPhase::Down);
        assert_eq!(PointerPhase::from_str("CANCEL").unwrap(), PointerPhase::Cancel);
        assert!(PointerPhase::from_str("hover").is_err());
        assert_eq!(PointerPhase::Move.to_string(), "move");
    }

    #[test]
    fn test_click_source_deserialization() {
        let source: ClickSource = serde_json::from_str("\"keyboard\"").unwrap();
        assert_eq!(source, ClickSource::Keyboard);
        assert_eq!(ClickSource::default(), ClickSource::Pointer);
    }

    #[test]
    fn test_timestamp_difference() {
        let start = Timestamp::from_millis(1000.0);
        let end = Timestamp::from_millis(1050.0);
        assert_eq!(end.millis_since(start), 50.0);
    }
}
