use crate::config::MenuConfig;
use crate::events::{
    ClickEvent, ClickSource, EventResponse, PointerEvent, PointerId, PointerPhase, Propagation,
    TargetId, Timestamp,
};
use crate::frame::{FrameScheduler, FrameToken};
use crate::geometry::{Point, Rect, Size};
use crate::gesture::clamp::clamp_to_viewport;
use crate::gesture::classify::Classification;
use crate::host::{AnchorBounds, Clock, Host, PointerCapture, ViewportSource};
use crate::menu::{SatelliteItem, compute_positions};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnchorState {
    pub position: Point,
    pub is_open: bool,
    pub is_dragging: bool,
}

impl AnchorState {
    pub fn bounds(&self, anchor_size: f64) -> Rect {
        Rect::centered(self.position, Size::new(anchor_size, anchor_size))
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub is_open: bool,
    pub is_dragging: bool,
    pub anchor_position: Point,
    pub satellite_items: Vec<SatelliteItem>,
}

#[derive(Debug)]
struct GestureSession {
    pointer_id: PointerId,
    start_point: Point,
    start_time: Timestamp,
    // anchor center -> grab point
    pointer_offset: Point,
    clicked: bool,
}

/// What survives a session once its pointer is released, so the click that follows can be
/// classified against the same origin.
#[derive(Debug, Clone, Copy)]
struct CompletedGesture {
    start_point: Point,
    start_time: Timestamp,
    cancelled: bool,
}

#[derive(Debug, Clone, Copy)]
struct PendingMove {
    token: FrameToken,
    pointer: Point,
    viewport: Size,
}

pub struct GestureController {
    config: MenuConfig,
    anchor_target: TargetId,
    anchor: AnchorState,
    satellites: Vec<SatelliteItem>,
    session: Option<GestureSession>,
    last_gesture: Option<CompletedGesture>,
    pending: Option<PendingMove>,
    captured: Option<PointerId>,
}

impl GestureController {
    pub fn new(config: MenuConfig, anchor_target: TargetId, host: &impl ViewportSource) -> Self {
        let position = config.initial_position_in(host.viewport());
        log::debug!("Anchor starts at ({}, {})", position.x, position.y);

        Self {
            config,
            anchor_target,
            anchor: AnchorState {
                position,
                is_open: false,
                is_dragging: false,
            },
            satellites: Vec::new(),
            session: None,
            last_gesture: None,
            pending: None,
            captured: None,
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn anchor(&self) -> AnchorState {
        self.anchor
    }

    pub fn anchor_position(&self) -> Point {
        self.anchor.position
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_open
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_dragging
    }

    pub fn satellite_items(&self) -> &[SatelliteItem] {
        &self.satellites
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            is_open: self.anchor.is_open,
            is_dragging: self.anchor.is_dragging,
            anchor_position: self.anchor.position,
            satellite_items: self.satellites.clone(),
        }
    }

    pub fn handle_pointer(&mut self, ev: &PointerEvent, host: &mut impl Host) -> EventResponse {
        match ev.phase {
            PointerPhase::Down => self.on_pointer_down(ev, host),
            PointerPhase::Move => self.on_pointer_move(ev, host),
            PointerPhase::Up | PointerPhase::Cancel => {
                self.on_pointer_up(ev, host);
                EventResponse::PASS_THROUGH
            }
        }
    }

    pub fn on_pointer_down(&mut self, ev: &PointerEvent, host: &mut impl Host) -> EventResponse {
        if let Some(session) = &self.session {
            log::warn!(
                "Pointer {} pressed while pointer {} still owns the anchor; ignoring",
                ev.pointer_id,
                session.pointer_id
            );
            return EventResponse::PASS_THROUGH;
        }

        // unmeasured anchor: drag from its center rather than refuse the gesture
        let pointer_offset = host
            .anchor_bounds()
            .map(|bounds| ev.position - bounds.center())
            .unwrap_or(Point::ORIGIN);

        match host.capture_pointer(ev.pointer_id) {
            Ok(()) => self.captured = Some(ev.pointer_id),
            Err(e) => log::debug!("Pointer capture unavailable: {}", e),
        }

        self.session = Some(GestureSession {
            pointer_id: ev.pointer_id,
            start_point: ev.position,
            start_time: host.now(),
            pointer_offset,
            clicked: false,
        });
        self.last_gesture = None;
        self.anchor.is_dragging = true;
        log::debug!(
            "Gesture started by pointer {} at ({}, {}), event time {}ms",
            ev.pointer_id,
            ev.position.x,
            ev.position.y,
            ev.timestamp
        );

        if ev.target == self.anchor_target {
            EventResponse::CONSUMED
        } else {
            EventResponse {
                prevent_default: false,
                propagation: Propagation::Stop,
            }
        }
    }

    /// Coalesces moves: only the newest pointer position of a frame is applied.
    pub fn on_pointer_move(&mut self, ev: &PointerEvent, host: &mut impl Host) -> EventResponse {
        if !self.owns(ev.pointer_id) {
            log::trace!("Move from pointer {} outside a gesture", ev.pointer_id);
            return EventResponse::PASS_THROUGH;
        }

        self.cancel_pending(host);
        self.pending = Some(PendingMove {
            token: host.request_frame(),
            pointer: ev.position,
            viewport: host.viewport(),
        });

        EventResponse::CONSUMED
    }

    /// Ends the gesture. Returns how it would be classified; the toggle itself is left to the
    /// click that follows.
    pub fn on_pointer_up(
        &mut self,
        ev: &PointerEvent,
        host: &mut impl Host,
    ) -> Option<Classification> {
        let Some(session) = self
            .session
            .take_if(|session| session.pointer_id == ev.pointer_id)
        else {
            log::trace!("Release from pointer {} outside a gesture", ev.pointer_id);
            return None;
        };

        self.release_capture(host);
        self.cancel_pending(host);
        self.anchor.is_dragging = false;

        let cancelled = ev.phase == PointerPhase::Cancel;
        let classification = self.config.thresholds().classify(
            session.start_point,
            session.start_time,
            ev.position,
            host.now(),
        );
        log::debug!(
            "Gesture {} as {} ({:.0}ms, {:.1}px)",
            if cancelled { "cancelled" } else { "ended" },
            classification.kind,
            classification.duration_ms,
            classification.distance_px
        );

        self.last_gesture = (!session.clicked).then_some(CompletedGesture {
            start_point: session.start_point,
            start_time: session.start_time,
            cancelled,
        });

        Some(classification)
    }

    pub fn on_pointer_cancel(
        &mut self,
        ev: &PointerEvent,
        host: &mut impl Host,
    ) -> Option<Classification> {
        let ev = PointerEvent {
            phase: PointerPhase::Cancel,
            ..*ev
        };
        self.on_pointer_up(&ev, host)
    }

    /// Toggles the menu when the click closes a tap. Returns whether it toggled.
    pub fn on_click(&mut self, ev: &ClickEvent, host: &impl Clock) -> bool {
        if ev.source == ClickSource::Keyboard {
            self.set_open(None);
            return true;
        }

        let origin = if let Some(session) = self.session.as_mut() {
            // click raced ahead of the release
            (!session.clicked).then(|| {
                session.clicked = true;
                (session.start_point, session.start_time)
            })
        } else {
            self.last_gesture
                .take()
                .filter(|gesture| !gesture.cancelled)
                .map(|gesture| (gesture.start_point, gesture.start_time))
        };

        let Some((start_point, start_time)) = origin else {
            log::trace!("Click without a gesture to classify");
            return false;
        };

        let classification =
            self.config
                .thresholds()
                .classify(start_point, start_time, ev.position, host.now());
        if !classification.is_tap() {
            return false;
        }

        self.set_open(None);
        true
    }

    /// Applies the move scheduled under `token`. Returns whether the anchor moved.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        let Some(pending) = self.pending.take_if(|pending| pending.token == token) else {
            log::trace!("Stale frame {}", token);
            return false;
        };
        let Some(session) = &self.session else {
            return false;
        };

        let candidate = pending.pointer - session.pointer_offset;
        let clamped = clamp_to_viewport(
            candidate,
            pending.viewport,
            self.config.anchor_size,
            self.config.boundary_padding,
        );
        self.move_anchor(clamped)
    }

    /// Sets `is_open` to `force`, or flips it. Returns the new state.
    pub fn set_open(&mut self, force: Option<bool>) -> bool {
        let open = force.unwrap_or(!self.anchor.is_open);
        if open != self.anchor.is_open {
            self.anchor.is_open = open;
            log::debug!("Menu {}", if open { "opened" } else { "closed" });
            self.refresh_satellites();
        }
        open
    }

    pub fn on_viewport_resize(&mut self, host: &impl ViewportSource) -> bool {
        self.reclamp(host.viewport())
    }

    pub fn reconfigure(&mut self, config: MenuConfig, host: &impl ViewportSource) {
        self.config = config;
        if !self.reclamp(host.viewport()) {
            self.refresh_satellites();
        }
        log::info!("Configuration applied");
    }

    /// Drops every outstanding resource. Safe to call more than once.
    pub fn teardown(&mut self, host: &mut impl Host) {
        self.cancel_pending(host);
        self.release_capture(host);
        self.session = None;
        self.last_gesture = None;
        self.anchor.is_dragging = false;
    }

    fn owns(&self, pointer_id: PointerId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.pointer_id == pointer_id)
    }

    fn reclamp(&mut self, viewport: Size) -> bool {
        let clamped = clamp_to_viewport(
            self.anchor.position,
            viewport,
            self.config.anchor_size,
            self.config.boundary_padding,
        );
        self.move_anchor(clamped)
    }

    fn move_anchor(&mut self, position: Point) -> bool {
        if position == self.anchor.position {
            return false;
        }
        self.anchor.position = position;
        self.refresh_satellites();
        true
    }

    fn refresh_satellites(&mut self) {
        if self.anchor.is_open {
            self.satellites = compute_positions(self.anchor.position, &self.config.arc());
        } else {
            self.satellites.clear();
        }
    }

    fn cancel_pending(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(pending) = self.pending.take() {
            scheduler.cancel_frame(pending.token);
        }
    }

    fn release_capture(&mut self, capture: &mut impl PointerCapture) {
        if let Some(id) = self.captured.take()
            && let Err(e) = capture.release_pointer(id)
        {
            log::debug!("Ignoring capture release failure: {}", e);
        }
    }
}

impl AnchorBounds for GestureController {
    fn anchor_bounds(&self) -> Option<Rect> {
        Some(self.anchor.bounds(self.config.anchor_size))
    }
}
