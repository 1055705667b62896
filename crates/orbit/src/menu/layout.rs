use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcConfig {
    pub item_count: usize,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl ArcConfig {
    pub fn new(item_count: usize, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            item_count,
            radius,
            start_angle,
            sweep_angle,
        }
    }

    /// Angular distance between neighbours. A lone item gets no step at all.
    pub fn angle_step(&self) -> f64 {
        if self.item_count > 1 {
            self.sweep_angle / (self.item_count - 1) as f64
        } else {
            0.0
        }
    }

    pub fn angle(&self, index: usize) -> f64 {
        self.start_angle + index as f64 * self.angle_step()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatelliteItem {
    pub position: Point,
    pub angle: f64,
}

impl SatelliteItem {
    pub fn bounds(&self, item_size: f64) -> Rect {
        Rect::centered(self.position, Size::new(item_size, item_size))
    }
}

/// Places `config.item_count` items along the arc around `center`, index 0 at `start_angle`.
///
/// Negative counts cannot be expressed (`usize`); callers reading untrusted input reject them
/// while deserializing the configuration.
pub fn compute_positions(center: Point, config: &ArcConfig) -> Vec<SatelliteItem> {
    (0..config.item_count)
        .map(|i| {
            let angle = config.angle(i);
            SatelliteItem {
                position: center.polar_offset(config.radius, angle),
                angle,
            }
        })
        .collect()
}
