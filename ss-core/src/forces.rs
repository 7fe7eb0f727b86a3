//! Forces acting on the stone while it is in contact with the water.
//!
//! - **Lift**: pushes the stone back up, proportional to v²
//! - **Drag**: resists motion, proportional to v²
//! - **Gravity**: constant weight
//!
//! Lift and drag share the same dynamic-pressure term and differ only by
//! their coefficient:
//!
//! ```text
//! q    = 0.5 * ρ * |v|²
//! lift = Cl * A * q
//! drag = Cd * A * q
//! ```
//!
//! The forces are magnitudes. How they project onto the horizontal and
//! vertical axes is decided by the impact resolver, from the tilt angle.

use crate::types::{Environment, StoneProperties, Vec2};

/// Trait for computing force magnitudes on the stone.
///
/// Implementations provide the physics model consumed by the impact resolver.
pub trait ForceModel {
    /// Fluid and gravity parameters this model was built with.
    fn environment(&self) -> &Environment;

    fn lift_force(&self, vel: Vec2, props: &StoneProperties) -> f64;

    fn drag_force(&self, vel: Vec2, props: &StoneProperties) -> f64;

    /// Weight of the stone.
    fn gravity_force(&self, props: &StoneProperties) -> f64 {
        props.mass * self.environment().gravity
    }
}

/// Current speed, `sqrt(vx² + vy²)`.
pub fn total_velocity(vel: Vec2) -> f64 {
    vel.magnitude()
}

/// Hydrodynamic force model for a stone on water.
#[derive(Debug, Clone, Default)]
pub struct HydrodynamicForces {
    pub env: Environment,
}

impl HydrodynamicForces {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Dynamic pressure times area: `A * 0.5 * ρ * |v|²`.
    fn pressure_force(&self, vel: Vec2, props: &StoneProperties) -> f64 {
        props.area * (0.5 * self.env.water_density * vel.magnitude_squared())
    }
}

impl ForceModel for HydrodynamicForces {
    fn environment(&self) -> &Environment {
        &self.env
    }

    fn lift_force(&self, vel: Vec2, props: &StoneProperties) -> f64 {
        self.env.lift_coefficient * self.pressure_force(vel, props)
    }

    fn drag_force(&self, vel: Vec2, props: &StoneProperties) -> f64 {
        self.env.drag_coefficient * self.pressure_force(vel, props)
    }
}

// =============================================================================
// Tests
// =============================================================================
