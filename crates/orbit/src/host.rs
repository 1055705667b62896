//! Collaborators the controller reads from instead of touching ambient globals.

use crate::events::{PointerId, Timestamp};
use crate::frame::FrameScheduler;
use crate::geometry::{Rect, Size};
use thiserror::Error;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

pub trait ViewportSource {
    fn viewport(&self) -> Size;
}

pub trait AnchorBounds {
    /// On-screen rectangle of the anchor control, `None` while it is not mounted or measured.
    fn anchor_bounds(&self) -> Option<Rect>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("pointer {0} is not captured")]
    NotCaptured(PointerId),
    #[error("anchor element is detached")]
    Detached,
}

pub trait PointerCapture {
    fn capture_pointer(&mut self, id: PointerId) -> Result<(), CaptureError>;
    fn release_pointer(&mut self, id: PointerId) -> Result<(), CaptureError>;
}

pub trait Host: Clock + ViewportSource + AnchorBounds + PointerCapture + FrameScheduler {}

impl<T> Host for T where
    T: Clock + ViewportSource + AnchorBounds + PointerCapture + FrameScheduler
{
}
