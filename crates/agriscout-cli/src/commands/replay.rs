//! Replay command implementation
//!
//! Feeds a scripted sequence of drawing events through a fresh in-memory
//! session and reports what each step produced.

use crate::cli::ReplayArgs;
use crate::errors::invalid_replay_script;
use crate::output::OutputWriter;
use crate::output_types::{LandRow, PartitionRow, ReplayOutput, ReplayStep};
use agriscout_core::models::{ContainmentMode, Coordinate, Phase};
use agriscout_draw::DrawingSession;
use agriscout_geo::GeodesicAreaEstimator;
use agriscout_store::{FieldStore, MemoryFieldStore};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

type ReplaySession = DrawingSession<MemoryFieldStore, GeodesicAreaEstimator>;

/// One scripted user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ReplayEvent {
    SetPhase { phase: Phase },
    Advance,
    Start,
    Click { lat: f64, lng: f64 },
    Undo,
    Finish {
        #[serde(default)]
        name: Option<String>,
    },
    Cancel,
    /// Select a land by name
    SelectLand { name: String },
    /// Select a partition by name
    SelectPartition { name: String },
    ClearSelection,
}

impl ReplayEvent {
    fn label(&self) -> &'static str {
        match self {
            ReplayEvent::SetPhase { .. } => "set-phase",
            ReplayEvent::Advance => "advance",
            ReplayEvent::Start => "start",
            ReplayEvent::Click { .. } => "click",
            ReplayEvent::Undo => "undo",
            ReplayEvent::Finish { .. } => "finish",
            ReplayEvent::Cancel => "cancel",
            ReplayEvent::SelectLand { .. } => "select-land",
            ReplayEvent::SelectPartition { .. } => "select-partition",
            ReplayEvent::ClearSelection => "clear-selection",
        }
    }
}

pub fn execute(args: ReplayArgs, output: &OutputWriter) -> Result<()> {
    let events = read_script(&args.script)?;
    let mode = if args.strict { ContainmentMode::Strict } else { ContainmentMode::VertexSampling };

    let result = replay(&events, mode)?;
    let failed = result.steps.iter().filter(|step| !step.ok).count();
    tracing::debug!(steps = result.steps.len(), failed, "Replay finished");

    if output.is_json() {
        return output.result(result);
    }

    output.section("Steps");
    for step in &result.steps {
        let line = format!("#{} {}: {}", step.index, step.event, describe(&step.outcome));
        if step.ok {
            output.info(line);
        } else {
            output.warning(line);
        }
    }

    let names: HashMap<_, _> =
        result.lands.iter().map(|land| (land.id.clone(), land.name.clone())).collect();

    output.section("Lands");
    output.table(
        result
            .lands
            .iter()
            .map(|land| LandRow {
                name: land.name.clone(),
                vertices: land.ring.len(),
                area: format!("{:.2}", land.area_acres),
                partitions: result
                    .partitions
                    .iter()
                    .filter(|p| p.parent_land_id == land.id)
                    .count(),
            })
            .collect(),
    );

    output.section("Partitions");
    output.table(
        result
            .partitions
            .iter()
            .map(|partition| PartitionRow {
                name: partition.name.clone(),
                land: names.get(&partition.parent_land_id).cloned().unwrap_or_default(),
                vertices: partition.ring.len(),
                area: format!("{:.2}", partition.area_acres),
            })
            .collect(),
    );

    if failed == 0 {
        output.success(format!("Replayed {} events", result.steps.len()));
    } else {
        output.warning(format!("{} of {} events failed", failed, result.steps.len()));
    }

    Ok(())
}

/// Read a JSON array of events
pub fn read_script(path: &Path) -> Result<Vec<ReplayEvent>> {
    let display = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| invalid_replay_script(&display, &e.to_string()))?;
    let events = serde_json::from_str(&content)
        .map_err(|e| invalid_replay_script(&display, &e.to_string()))?;
    Ok(events)
}

/// Run every event in order; failing events are recorded, not fatal
pub fn replay(events: &[ReplayEvent], mode: ContainmentMode) -> Result<ReplayOutput> {
    let mut session =
        DrawingSession::new(MemoryFieldStore::new(), GeodesicAreaEstimator::new())
            .with_containment_mode(mode);

    let steps = events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let (ok, outcome) = match apply(&mut session, event) {
                Ok(outcome) => (true, outcome),
                Err(message) => (false, json!({ "error": message })),
            };
            ReplayStep { index, event: event.label().to_string(), ok, outcome }
        })
        .collect();

    Ok(ReplayOutput {
        steps,
        lands: session.store().list_lands()?,
        partitions: session.store().list_partitions()?,
    })
}

fn apply(session: &mut ReplaySession, event: &ReplayEvent) -> std::result::Result<Value, String> {
    let outcome = match event {
        ReplayEvent::SetPhase { phase } => {
            session.set_phase(*phase);
            serde_json::to_value(session.phase())
        }
        ReplayEvent::Advance => serde_json::to_value(session.advance_phase()),
        ReplayEvent::Start => {
            let state = session.start_drawing().map_err(|e| e.to_string())?;
            serde_json::to_value(state)
        }
        ReplayEvent::Click { lat, lng } => {
            serde_json::to_value(session.click(Coordinate::new(*lat, *lng)))
        }
        ReplayEvent::Undo => {
            let preview = session.undo_last_point().map_err(|e| e.to_string())?;
            serde_json::to_value(preview)
        }
        ReplayEvent::Finish { name } => {
            let finished = session.finish(name.as_deref()).map_err(|e| e.to_string())?;
            serde_json::to_value(finished)
        }
        ReplayEvent::Cancel => Ok(json!({ "cancelled": session.cancel() })),
        ReplayEvent::SelectLand { name } => {
            let store = session.store();
            let lands = store.list_lands().map_err(|e| e.to_string())?;
            let land = lands
                .iter()
                .find(|land| &land.name == name)
                .ok_or_else(|| format!("No land named {}", name))?;
            let selection = store.select_land(&land.id).map_err(|e| e.to_string())?;
            serde_json::to_value(selection)
        }
        ReplayEvent::SelectPartition { name } => {
            let store = session.store();
            let partitions = store.list_partitions().map_err(|e| e.to_string())?;
            let partition = partitions
                .iter()
                .find(|partition| &partition.name == name)
                .ok_or_else(|| format!("No partition named {}", name))?;
            let selection = store.select_partition(&partition.id).map_err(|e| e.to_string())?;
            serde_json::to_value(selection)
        }
        ReplayEvent::ClearSelection => {
            session.store().clear_selection().map_err(|e| e.to_string())?;
            Ok(json!({ "cleared": true }))
        }
    };
    outcome.map_err(|e| e.to_string())
}

/// One-line description of a step outcome
fn describe(outcome: &Value) -> String {
    if let Some(error) = outcome.get("error").and_then(Value::as_str) {
        return error.to_string();
    }
    if let Some(kind) = outcome.get("outcome").and_then(Value::as_str) {
        return kind.to_string();
    }
    match outcome {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(lat: f64, lng: f64) -> ReplayEvent {
        ReplayEvent::Click { lat, lng }
    }

    fn draw_square(events: &mut Vec<ReplayEvent>, min: f64, max: f64, name: &str) {
        events.push(ReplayEvent::Start);
        events.extend([click(min, min), click(min, max), click(max, max), click(max, min)]);
        events.push(ReplayEvent::Finish { name: Some(name.to_string()) });
    }

    #[test]
    fn test_script_parses() {
        let script = r#"[
            {"event": "set-phase", "phase": "land-selection"},
            {"event": "start"},
            {"event": "click", "lat": 28.61, "lng": 77.2},
            {"event": "finish"},
            {"event": "select-land", "name": "North"},
            {"event": "clear-selection"}
        ]"#;

        let events: Vec<ReplayEvent> = serde_json::from_str(script).unwrap();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], ReplayEvent::SetPhase { phase: Phase::LandSelection });
        assert_eq!(events[3], ReplayEvent::Finish { name: None });
    }

    #[test]
    fn test_land_and_partition_flow() {
        let mut events = vec![ReplayEvent::SetPhase { phase: Phase::LandSelection }];
        draw_square(&mut events, 0.0, 0.01, "North");
        events.push(ReplayEvent::Advance);
        events.push(ReplayEvent::SelectLand { name: "North".to_string() });
        draw_square(&mut events, 0.002, 0.004, "Wheat");

        let result = replay(&events, ContainmentMode::VertexSampling).unwrap();

        assert!(result.steps.iter().all(|step| step.ok));
        assert_eq!(result.lands.len(), 1);
        assert_eq!(result.partitions.len(), 1);
        assert_eq!(result.partitions[0].name, "Wheat");
        assert_eq!(result.partitions[0].parent_land_id, result.lands[0].id);
        assert_eq!(result.steps[6].outcome["outcome"], "land-committed");
    }

    #[test]
    fn test_partition_outside_is_rejected() {
        let mut events = vec![ReplayEvent::SetPhase { phase: Phase::LandSelection }];
        draw_square(&mut events, 0.0, 0.01, "North");
        events.push(ReplayEvent::Advance);
        draw_square(&mut events, 0.02, 0.03, "Stray");

        let result = replay(&events, ContainmentMode::VertexSampling).unwrap();
        let last = result.steps.last().unwrap();

        assert!(last.ok);
        assert_eq!(last.outcome["outcome"], "rejected");
        assert_eq!(last.outcome["reason"]["reason"], "outside-parent-land");
        assert!(result.partitions.is_empty());
    }

    #[test]
    fn test_failures_are_recorded() {
        let events = vec![
            ReplayEvent::Start,
            ReplayEvent::SetPhase { phase: Phase::Partitioning },
            ReplayEvent::Start,
            ReplayEvent::Undo,
            ReplayEvent::SelectLand { name: "Nowhere".to_string() },
            ReplayEvent::Cancel,
        ];

        let result = replay(&events, ContainmentMode::VertexSampling).unwrap();
        let ok: Vec<bool> = result.steps.iter().map(|step| step.ok).collect();

        assert_eq!(ok, vec![false, true, false, false, false, true]);
        assert_eq!(result.steps[2].outcome["error"], "Draw a land before adding partitions");
        assert_eq!(result.steps[4].outcome["error"], "No land named Nowhere");
        assert_eq!(result.steps[5].outcome["cancelled"], false);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&json!({ "error": "boom" })), "boom");
        assert_eq!(describe(&json!({ "outcome": "ignored" })), "ignored");
        assert_eq!(describe(&json!("partitioning")), "partitioning");
    }
}
