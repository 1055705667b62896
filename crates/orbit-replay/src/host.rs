use orbit::events::{PointerId, Timestamp};
use orbit::frame::{FrameQueue, FrameScheduler, FrameToken};
use orbit::host::{AnchorBounds, CaptureError, Clock, PointerCapture, ViewportSource};
use orbit::{Rect, Size};
use std::collections::HashSet;

/// Virtual host: time only advances when the trace says so, and frames only fire on request.
#[derive(Debug)]
pub struct ReplayHost {
    pub now: Timestamp,
    pub viewport: Size,
    anchor: Option<Rect>,
    frames: FrameQueue,
    captured: HashSet<PointerId>,
}

impl ReplayHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            now: Timestamp::default(),
            viewport,
            anchor: None,
            frames: FrameQueue::new(),
            captured: HashSet::new(),
        }
    }

    /// Re-measures the anchor the way a renderer would after laying it out.
    pub fn measure(&mut self, anchor: &impl AnchorBounds) {
        self.anchor = anchor.anchor_bounds();
    }

    pub fn due_frames(&mut self) -> Vec<FrameToken> {
        self.frames.take_due()
    }

    pub fn lose_capture(&mut self) {
        self.captured.clear();
    }

    pub fn is_captured(&self, id: PointerId) -> bool {
        self.captured.contains(&id)
    }
}

impl Clock for ReplayHost {
    fn now(&self) -> Timestamp {
        self.now
    }
}

impl ViewportSource for ReplayHost {
    fn viewport(&self) -> Size {
        self.viewport
    }
}

impl AnchorBounds for ReplayHost {
    fn anchor_bounds(&self) -> Option<Rect> {
        self.anchor
    }
}

impl PointerCapture for ReplayHost {
    fn capture_pointer(&mut self, id: PointerId) -> Result<(), CaptureError> {
        self.captured.insert(id);
        Ok(())
    }

    fn release_pointer(&mut self, id: PointerId) -> Result<(), CaptureError> {
        self.captured
            .remove(&id)
            .then_some(())
            .ok_or(CaptureError::NotCaptured(id))
    }
}

impl FrameScheduler for ReplayHost {
    fn request_frame(&mut self) -> FrameToken {
        self.frames.request_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.frames.cancel_frame(token);
    }
}
