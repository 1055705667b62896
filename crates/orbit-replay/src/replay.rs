use crate::host::ReplayHost;
use crate::trace::{ANCHOR_TARGET, PointerSample, TraceEntry, TraceEvent};
use orbit::config::MenuConfig;
use orbit::events::{ClickEvent, PointerEvent, PointerPhase, Timestamp};
use orbit::{GestureController, Point, Size, Snapshot};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub t: f64,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

impl Step {
    pub fn render(&self) -> String {
        let anchor = self.snapshot.anchor_position;
        format!(
            "{:>8.1}  {:<12} open={:<5} dragging={:<5} anchor=({:.1}, {:.1}) items={}{}",
            self.t,
            self.kind,
            self.snapshot.is_open,
            self.snapshot.is_dragging,
            anchor.x,
            anchor.y,
            self.snapshot.satellite_items.len(),
            self.note
                .as_ref()
                .map(|n| format!("  # {}", n))
                .unwrap_or_default()
        )
    }
}

fn pointer_event(phase: PointerPhase, sample: &PointerSample, now: Timestamp) -> PointerEvent {
    PointerEvent::new(
        phase,
        Point::new(sample.x, sample.y),
        sample.pointer_id,
        sample.target,
        now,
    )
}

pub fn run(config: MenuConfig, viewport: Size, entries: &[TraceEntry]) -> Vec<Step> {
    let mut host = ReplayHost::new(viewport);
    let mut controller = GestureController::new(config, ANCHOR_TARGET, &host);
    host.measure(&controller);

    let steps = entries
        .iter()
        .map(|entry| {
            host.now = Timestamp::from_millis(entry.t);
            let (kind, note) = apply(&mut controller, &mut host, &entry.event);
            host.measure(&controller);
            Step {
                t: entry.t,
                kind,
                note,
                snapshot: controller.snapshot(),
            }
        })
        .collect();

    controller.teardown(&mut host);
    steps
}

fn apply(
    controller: &mut GestureController,
    host: &mut ReplayHost,
    event: &TraceEvent,
) -> (&'static str, Option<String>) {
    let now = host.now;
    match event {
        TraceEvent::Down(sample) => {
            let ev = pointer_event(PointerPhase::Down, sample, now);
            let response = controller.on_pointer_down(&ev, host);
            let captured = host.is_captured(sample.pointer_id);
            let note = format!(
                "prevent_default={} propagation={:?} captured={}",
                response.prevent_default, response.propagation, captured
            );
            ("down", Some(note))
        }
        TraceEvent::Move(sample) => {
            controller.on_pointer_move(&pointer_event(PointerPhase::Move, sample, now), host);
            ("move", None)
        }
        TraceEvent::Up(sample) | TraceEvent::Cancel(sample) => {
            let (kind, phase) = match event {
                TraceEvent::Cancel(_) => ("cancel", PointerPhase::Cancel),
                _ => ("up", PointerPhase::Up),
            };
            let note = controller
                .on_pointer_up(&pointer_event(phase, sample, now), host)
                .map(|c| {
                    format!(
                        "{} ({:.0}ms, {:.1}px)",
                        c.kind, c.duration_ms, c.distance_px
                    )
                });
            (kind, note)
        }
        TraceEvent::Click { x, y, source } => {
            let ev = ClickEvent {
                position: Point::new(*x, *y),
                source: *source,
                target: ANCHOR_TARGET,
                timestamp: now,
            };
            let toggled = controller.on_click(&ev, &*host);
            ("click", toggled.then(|| "toggled".to_string()))
        }
        TraceEvent::Frame => {
            let moved = host
                .due_frames()
                .into_iter()
                .filter(|token| controller.on_frame(*token))
                .count();
            ("frame", (moved > 0).then(|| "anchor moved".to_string()))
        }
        TraceEvent::SetOpen { open } => {
            controller.set_open(*open);
            ("set_open", None)
        }
        TraceEvent::Resize { width, height } => {
            host.viewport = Size::new(*width, *height);
            let moved = controller.on_viewport_resize(&*host);
            ("resize", moved.then(|| "anchor re-clamped".to_string()))
        }
        TraceEvent::LoseCapture => {
            host.lose_capture();
            ("lose_capture", None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_trace;

    fn replay(text: &str) -> Vec<Step> {
        let config = MenuConfig {
            initial_position: Some(Point::new(100.0, 400.0)),
            ..MenuConfig::default()
        };
        run(config, Size::new(1000.0, 800.0), &parse_trace(text).unwrap())
    }

    #[test]
    fn test_tap_opens_menu() {
        let steps = replay(
            r#"
{"t": 0, "kind": "down", "x": 100, "y": 400}
{"t": 50, "kind": "up", "x": 102, "y": 401}
{"t": 51, "kind": "click", "x": 102, "y": 401}
"#,
        );
        assert_eq!(steps.len(), 3);
        assert!(steps[0].snapshot.is_dragging);
        assert!(!steps[1].snapshot.is_dragging);
        assert_eq!(steps[2].note.as_deref(), Some("toggled"));
        assert!(steps[2].snapshot.is_open);
        assert_eq!(steps[2].snapshot.satellite_items.len(), 6);
    }

    #[test]
    fn test_drag_is_coalesced_and_clamped() {
        let steps = replay(
            r#"
{"t": 0, "kind": "down", "x": 100, "y": 400}
{"t": 5, "kind": "move", "x": 80, "y": 400}
{"t": 8, "kind": "move", "x": 20, "y": 400}
{"t": 12, "kind": "move", "x": -50, "y": 400}
{"t": 16, "kind": "frame"}
{"t": 90, "kind": "up", "x": -50, "y": 400}
{"t": 91, "kind": "click", "x": -50, "y": 400}
"#,
        );
        assert_eq!(steps[3].snapshot.anchor_position, Point::new(100.0, 400.0));
        assert_eq!(steps[4].note.as_deref(), Some("anchor moved"));
        assert_eq!(steps[4].snapshot.anchor_position, Point::new(35.0, 400.0));
        assert!(steps[5].note.as_deref().unwrap().starts_with("drag"));
        assert!(steps[6].note.is_none());
        assert!(!steps[6].snapshot.is_open);
    }

    #[test]
    fn test_lost_capture_does_not_stick() {
        let steps = replay(
            r#"
{"t": 0, "kind": "down", "x": 100, "y": 400}
{"t": 10, "kind": "lose_capture"}
{"t": 20, "kind": "cancel", "x": 100, "y": 400}
"#,
        );
        assert!(steps[1].snapshot.is_dragging);
        assert!(!steps[2].snapshot.is_dragging);
    }

    #[test]
    fn test_render_line() {
        let steps = replay(r#"{"t": 0, "kind": "set_open", "open": true}"#);
        let line = steps[0].render();
        assert!(line.contains("set_open"));
        assert!(line.contains("open=true"));
        assert!(line.contains("items=6"));
    }

    #[test]
    fn test_json_step_is_flat() {
        let steps = replay(r#"{"t": 3, "kind": "set_open"}"#);
        let value = serde_json::to_value(&steps[0]).unwrap();
        assert_eq!(value["kind"], "set_open");
        assert_eq!(value["is_open"], true);
        assert!(value.get("note").is_none());
    }
}
