use crate::geometry::{Point, Size};

/// Keeps an anchor of `anchor_size` fully inside `[0, extent]` with `padding` to spare.
///
/// When the extent is too small to satisfy both edges the low edge wins, so the anchor's
/// top/left stays reachable.
pub fn clamp_axis(value: f64, extent: f64, anchor_size: f64, padding: f64) -> f64 {
    let margin = anchor_size / 2.0 + padding;
    let (lo, hi) = (margin, extent - margin);
    value.min(hi).max(lo)
}

pub fn clamp_to_viewport(center: Point, viewport: Size, anchor_size: f64, padding: f64) -> Point {
    Point::new(
        clamp_axis(center.x, viewport.width, anchor_size, padding),
        clamp_axis(center.y, viewport.height, anchor_size, padding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn test_clamp_left_edge() {
        let p = clamp_to_viewport(Point::new(-50.0, 400.0), VIEWPORT, 50.0, 10.0);
        assert_eq!(p, Point::new(35.0, 400.0));
    }

    #[test]
    fn test_clamp_bottom_right_corner() {
        let p = clamp_to_viewport(Point::new(5000.0, 5000.0), VIEWPORT, 50.0, 10.0);
        assert_eq!(p, Point::new(965.0, 765.0));
    }

    #[test]
    fn test_in_bounds_is_untouched() {
        let inside = Point::new(500.0, 123.25);
        assert_eq!(clamp_to_viewport(inside, VIEWPORT, 50.0, 10.0), inside);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        for p in [
            Point::new(-1.0, -1.0),
            Point::new(999.0, 20.0),
            Point::new(35.0, 765.0),
            Point::new(f64::MAX, f64::MIN),
        ] {
            let once = clamp_to_viewport(p, VIEWPORT, 50.0, 10.0);
            assert_eq!(clamp_to_viewport(once, VIEWPORT, 50.0, 10.0), once);
        }
    }

    #[test]
    fn test_tiny_viewport_pins_to_low_edge() {
        let tiny = Size::new(40.0, 40.0);
        let p = clamp_to_viewport(Point::new(500.0, -500.0), tiny, 50.0, 10.0);
        assert_eq!(p, Point::new(35.0, 35.0));
        assert_eq!(clamp_to_viewport(p, tiny, 50.0, 10.0), p);
    }
}
