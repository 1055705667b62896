use crate::events::Timestamp;
use crate::geometry::Point;
use crate::menu::{CLICK_THRESHOLD_MS, CLICK_THRESHOLD_PX};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GestureKind {
    Tap,
    Drag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub duration_ms: f64,
    pub distance_px: f64,
    pub kind: GestureKind,
}

impl Classification {
    pub fn is_tap(&self) -> bool {
        self.kind == GestureKind::Tap
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickThresholds {
    pub max_duration_ms: f64,
    pub max_distance_px: f64,
}

impl Default for ClickThresholds {
    fn default() -> Self {
        Self {
            max_duration_ms: CLICK_THRESHOLD_MS,
            max_distance_px: CLICK_THRESHOLD_PX,
        }
    }
}

impl ClickThresholds {
    /// A tap stays strictly under both thresholds; anything else is a drag.
    pub fn classify(
        &self,
        start: Point,
        start_time: Timestamp,
        end: Point,
        end_time: Timestamp,
    ) -> Classification {
        let duration_ms = end_time.millis_since(start_time);
        let distance_px = start.distance_to(end);
        let kind = if duration_ms < self.max_duration_ms && distance_px < self.max_distance_px {
            GestureKind::Tap
        } else {
            GestureKind::Drag
        };

        Classification {
            duration_ms,
            distance_px,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(end: (f64, f64), ms: f64) -> Classification {
        ClickThresholds::default().classify(
            Point::new(100.0, 100.0),
            Timestamp::from_millis(0.0),
            Point::new(end.0, end.1),
            Timestamp::from_millis(ms),
        )
    }

    #[test]
    fn test_short_press_is_tap() {
        let c = classify((102.0, 101.0), 50.0);
        assert_eq!(c.kind, GestureKind::Tap);
        assert!((c.distance_px - 5.0_f64.sqrt()).abs() < 1e-9);
        assert_eq!(c.duration_ms, 50.0);
    }

    #[test]
    fn test_long_travel_is_drag() {
        assert_eq!(classify((140.0, 100.0), 50.0).kind, GestureKind::Drag);
    }

    #[test]
    fn test_slow_press_is_drag() {
        assert_eq!(classify((100.0, 100.0), 450.0).kind, GestureKind::Drag);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(classify((105.0, 100.0), 10.0).kind, GestureKind::Drag);
        assert_eq!(classify((100.0, 100.0), 200.0).kind, GestureKind::Drag);
        assert_eq!(classify((104.9, 100.0), 199.9).kind, GestureKind::Tap);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(GestureKind::Tap.to_string(), "tap");
        assert_eq!(GestureKind::Drag.to_string(), "drag");
    }
}
