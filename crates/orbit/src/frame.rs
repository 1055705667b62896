//! Cancelable "run on the next frame" tasks.
//!
//! The controller never hands a closure to the host. It asks for a [`FrameToken`], remembers the
//! work it wants done, and the host calls back with the token once the frame fires. Cancelling a
//! token that already fired or was never issued is a no-op.

use derive_more::{Display, From, Into};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct FrameToken(u64);

crate::impl_id_newtype!(FrameToken, u64);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Deterministic scheduler for hosts without a render loop of their own (tests, trace replay).
#[derive(Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: BTreeSet<FrameToken>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    /// Drains every token due on this frame, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);
        self.pending.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.remove(&token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);
        assert_eq!(queue.pending(), 2);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut queue = FrameQueue::new();
        let token = queue.request_frame();
        queue.cancel_frame(token);
        queue.cancel_frame(token);
        queue.cancel_frame(FrameToken::new(999));
        assert_eq!(queue.pending(), 0);
        assert!(queue.take_due().is_empty());
    }

    #[test]
    fn test_take_due_drains_in_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_eq!(queue.take_due(), vec![a, b]);
        assert!(!queue.is_pending(a));
        assert_eq!(queue.pending(), 0);
    }
}
