//! Simulation events and the sinks that consume them.
//!
//! Every resolved surface crossing emits one `EventKind::Impact`, carrying the
//! skip-or-sink outcome. Sinks are called synchronously from the simulation's
//! update methods.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::types::{ImpactOutcome, Vec2};

/// An event emitted by the simulation, tagged with the tick it happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Tick number (1 for the first call to `tick`, 0 for construction).
    pub tick: u64,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// The stone was released.
    Launched { position: Vec2, velocity: Vec2 },

    /// A surface crossing was resolved.
    Impact {
        outcome: ImpactOutcome,
        /// Where the stone was found under the water.
        position: Vec2,
        /// Penetration depth, if it could be computed (m)
        depth: Option<f64>,
    },

    /// The stone entered the terminal sunk phase.
    Sunk { position: Vec2, skips: u32 },
}

impl SimulationEvent {
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }
}

/// Trait for event consumers.
pub trait EventSink: Send {
    fn handle(&mut self, event: &SimulationEvent);

    fn name(&self) -> &str;
}

/// Collects events into a shared buffer.
///
/// Clone the sink before handing it to a simulation to keep a handle on the
/// collected events.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.lock().clone()
    }

    /// Outcomes of every impact received so far, in order.
    pub fn impacts(&self) -> Vec<ImpactOutcome> {
        self.lock()
            .iter()
            .filter_map(|event| match event.kind {
                EventKind::Impact { outcome, .. } => Some(outcome),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SimulationEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        tracing::info!(tick = event.tick, event = ?event.kind, "simulation_event");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SinkCause;

    #[test]
    fn test_vec_sink_shares_buffer_between_clones() {
        let sink = VecSink::new();
        let mut handle = sink.clone();

        handle.handle(&SimulationEvent::new(
            0,
            EventKind::Launched {
                position: Vec2::new(0.0, 1.0),
                velocity: Vec2::new(9.4, 3.4),
            },
        ));

        assert_eq!(sink.events().len(), 1);
        assert!(sink.impacts().is_empty());
    }

    #[test]
    fn test_vec_sink_filters_impacts() {
        let mut sink = VecSink::new();
        let failure = ImpactOutcome::SkipFailure {
            cause: SinkCause::HorizontalStall,
        };

        sink.handle(&SimulationEvent::new(
            2,
            EventKind::Impact {
                outcome: failure,
                position: Vec2::new(9.4, -5.4),
                depth: Some(16.2),
            },
        ));
        sink.handle(&SimulationEvent::new(
            2,
            EventKind::Sunk {
                position: Vec2::new(9.4, -5.4),
                skips: 0,
            },
        ));

        assert_eq!(sink.impacts(), vec![failure]);
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn test_sink_names() {
        assert_eq!(VecSink::new().name(), "vec_sink");
        assert_eq!(TracingSink.name(), "tracing_sink");
    }
}
