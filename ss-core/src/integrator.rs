//! Fixed-step integrator for advancing the stone one tick at a time.
//!
//! One tick is a unit step (Δt = 1): acceleration is added to velocity and
//! velocity is added to position without any time scaling. Numerical results
//! depend on this, so no variable timestep is offered.
//!
//! ## Algorithm
//!
//! ```text
//! 1. v_new = v + a
//! 2. x_new = x + v_new
//! ```
//!
//! The two halves are exposed separately because the impact resolver runs
//! between them and may replace the velocity used in step 2.

use crate::types::BodyState;

/// Unit-step explicit integrator.
pub struct FixedStep;

impl FixedStep {
    /// `vel ← vel + acc`.
    pub fn update_velocity(state: &BodyState) -> BodyState {
        BodyState {
            vel: state.vel + state.acc,
            ..*state
        }
    }

    /// `pos ← pos + vel`.
    pub fn update_position(state: &BodyState) -> BodyState {
        BodyState {
            pos: state.pos + state.vel,
            ..*state
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
