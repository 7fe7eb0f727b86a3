//! Water impact handling for the skipping stone.
//!
//! This module handles:
//! - **Detection**: Noticing that the stone is under the surface
//! - **Resolution**: Deciding skip or sink, and the rebound velocity
//!
//! ```text
//!   ●
//!    \        ↗ skip: velocity replaced by (Vx, Vz)
//! ~~~~\~~~~~~/~~~~~~ surface
//!      ●────
//!       ↘ sink: terminal
//! ```
//!
//! Detection runs on the state after the velocity update of a tick and before
//! the position update, so a rebound velocity is used for that same step.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
