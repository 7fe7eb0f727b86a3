//! # SS Core
//!
//! Two-dimensional flight and water-impact model of a thrown, disk-like stone.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec2, body state, stone and environment parameters)
//! - `forces`: Lift, drag and gravity magnitudes
//! - `integrator`: Unit-step explicit integration
//! - `collision`: Surface crossing detection and skip-or-sink resolution
//! - `simulation`: Main orchestrator, ticked by an external driver
//! - `events`: Impact signal and pluggable event sinks
//! - `presets`: YAML-based stone, launch and environment loader
//! - `error`: Error type for construction and preset loading

pub mod collision;
pub mod error;
pub mod events;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod simulation;
pub mod types;

pub use error::{SkipError, SkipResult};
pub use simulation::{RunSummary, Simulation, TickReport};
