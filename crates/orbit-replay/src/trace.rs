use orbit::events::{ClickSource, PointerId, TargetId};
use serde::Deserialize;
use thiserror::Error;

pub const ANCHOR_TARGET: TargetId = TargetId::new(1);
const MOUSE: PointerId = PointerId::new(1);

fn default_pointer() -> PointerId {
    MOUSE
}

fn default_target() -> TargetId {
    ANCHOR_TARGET
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_pointer")]
    pub pointer_id: PointerId,
    #[serde(default = "default_target")]
    pub target: TargetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Down(PointerSample),
    Move(PointerSample),
    Up(PointerSample),
    Cancel(PointerSample),
    Click {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        source: ClickSource,
    },
    /// Fires every frame requested so far.
    Frame,
    SetOpen {
        #[serde(default)]
        open: Option<bool>,
    },
    Resize {
        width: f64,
        height: f64,
    },
    /// The anchor element went away and took the pointer capture with it.
    LoseCapture,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TraceEntry {
    pub t: f64,
    #[serde(flatten)]
    pub event: TraceEvent,
}

#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct TraceError {
    line: usize,
    source: serde_json::Error,
}

/// One JSON object per line. Blank lines and lines starting with `#` are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>, TraceError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, json)| {
            serde_json::from_str(json).map_err(|source| TraceError { line, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_defaults() {
        let entries = parse_trace(r#"{"t": 0, "kind": "down", "x": 100, "y": 100}"#).unwrap();
        assert_eq!(
            entries,
            vec![TraceEntry {
                t: 0.0,
                event: TraceEvent::Down(PointerSample {
                    x: 100.0,
                    y: 100.0,
                    pointer_id: MOUSE,
                    target: ANCHOR_TARGET,
                }),
            }]
        );
    }

    #[test]
    fn test_parse_mixed_trace() {
        let text = r#"
# tap on the anchor
{"t": 0, "kind": "down", "x": 1, "y": 2, "pointer_id": 4, "target": 9}
{"t": 16, "kind": "frame"}
{"t": 20, "kind": "click", "source": "keyboard"}
{"t": 30, "kind": "set_open", "open": false}
{"t": 40, "kind": "set_open"}
{"t": 50, "kind": "resize", "width": 640, "height": 480}
{"t": 60, "kind": "lose_capture"}
"#;
        let entries = parse_trace(text).unwrap();
        assert_eq!(entries.len(), 7);
        assert!(matches!(
            entries[0].event,
            TraceEvent::Down(PointerSample { pointer_id, target, .. })
                if pointer_id == PointerId::new(4) && target == TargetId::new(9)
        ));
        assert_eq!(entries[1].event, TraceEvent::Frame);
        assert_eq!(
            entries[2].event,
            TraceEvent::Click {
                x: 0.0,
                y: 0.0,
                source: ClickSource::Keyboard
            }
        );
        assert_eq!(entries[3].event, TraceEvent::SetOpen { open: Some(false) });
        assert_eq!(entries[4].event, TraceEvent::SetOpen { open: None });
        assert_eq!(entries[6].event, TraceEvent::LoseCapture);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse_trace("{\"t\": 0, \"kind\": \"frame\"}\n\n{\"t\": 1, \"kind\": \"hover\"}")
            .unwrap_err();
        assert!(err.to_string().starts_with("line 3:"));
    }
}
