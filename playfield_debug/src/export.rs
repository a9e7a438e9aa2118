// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] writes the events of a [`RecorderSink`](crate::recorder::RecorderSink)
//! as a JSON array, one object per event, tagged by `"event"`.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Writes `events` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(to_json).collect();
    serde_json::to_writer_pretty(&mut *writer, &Value::Array(values)).map_err(io::Error::from)?;
    writeln!(writer)
}

/// Converts one recorded event to a JSON object.
#[must_use]
pub fn to_json(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Dispatched(e) => json!({
            "event": "dispatched",
            "phase": e.phase.as_str(),
            "touch_id": e.touch_id,
            "layer": layer_key(e.layer),
            "position": [e.position.x, e.position.y],
            "local": [e.local.x, e.local.y],
            "prevent_default": e.prevent_default,
        }),
        RecordedEvent::Miss(e) => json!({
            "event": "miss",
            "phase": e.phase.as_str(),
            "touch_id": e.touch_id,
            "position": [e.position.x, e.position.y],
        }),
        RecordedEvent::Dropped(e) => json!({
            "event": "dropped",
            "phase": e.phase.as_str(),
            "touch_id": e.touch_id,
            "reason": e.reason.as_str(),
        }),
        RecordedEvent::Batch(s) => json!({
            "event": "batch",
            "phase": s.phase.as_str(),
            "events": s.events,
            "delivered": s.delivered,
            "misses": s.misses,
            "dropped": s.dropped,
        }),
        RecordedEvent::Paint(s) => json!({
            "event": "paint",
            "painted": s.painted,
            "max_depth": s.max_depth,
            "topology_changed": s.topology_changed,
        }),
    }
}

/// A stable textual key for a layer: `"<index>@<generation>"`.
#[must_use]
pub fn layer_key(layer: playfield_core::layer::LayerId) -> String {
    format!("{}@{}", layer.index(), layer.generation())
}

#[cfg(test)]
mod tests {
    use playfield_core::touch::{DropReason, TouchPhase};
    use playfield_core::trace::{PaintSummary, TouchDropEvent};

    use super::*;

    #[test]
    fn export_writes_a_json_array() {
        let events = [
            RecordedEvent::Dropped(TouchDropEvent {
                phase: TouchPhase::Move,
                touch_id: 2,
                reason: DropReason::StaleLayer,
            }),
            RecordedEvent::Paint(PaintSummary {
                painted: 4,
                max_depth: 1,
                topology_changed: false,
            }),
        ];
        let mut out = Vec::new();
        export(&events, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["event"], "dropped");
        assert_eq!(array[0]["reason"], "stale layer");
        assert_eq!(array[1]["painted"], 4);
    }
}
