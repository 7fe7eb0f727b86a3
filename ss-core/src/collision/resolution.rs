//! Impact resolution: does the stone skip or sink?
//!
//! Runs once per surface crossing, on the velocity the stone has when it is
//! found under the water.
//!
//! ## Model
//!
//! The stone is held at a fixed tilt θ while in contact. Lift and drag are
//! projected onto the vertical with θ and its complement:
//!
//! ```text
//! F_net = cos(θ)·L − cos(90°−θ)·D − m·g        (vertical)
//! F_h   = sin(θ)·L + sin(90°−θ)·D              (horizontal, resisting)
//! ```
//!
//! Penetration depth `d` follows the planing-plate oscillator:
//!
//! ```text
//! C  = Cl·cos(θ) − Cd·sin(θ)
//! ω0 = sqrt(C·ρ·vx³·size / (2·m·sin(θ)))
//! d  = (g/ω0)·(1 + sqrt(1 + (vy·ω0/g)²))
//! ```
//!
//! Rebound speeds come from work-energy over the contact:
//!
//! ```text
//! Vz = sqrt(F_net·d / (2m))
//! Vx = sqrt(vx² − 2·(F_h/m)·d·|vx/vy|)
//! ```
//!
//! `|vx/vy|` is the horizontal distance covered per meter of depth along the
//! incoming flight path. The stone skips when `F_net > 0` and `Vx > 0`.
//! Every square root with a negative argument, and every division by a zero
//! quantity, is a failed skip.

use crate::forces::ForceModel;
use crate::types::{constants, BodyState, ImpactOutcome, SinkCause, StoneProperties, Vec2};

/// Everything the resolver worked out for one crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactResolution {
    pub outcome: ImpactOutcome,
    /// State after the impact; velocity is replaced only on a skip.
    pub state: BodyState,
    /// Net vertical force at the moment of impact (N)
    pub net_force: f64,
    /// Penetration depth, when it could be computed (m)
    pub depth: Option<f64>,
}

/// Skip-or-sink resolver.
pub struct ImpactResolver;

impl ImpactResolver {
    /// Resolve an impact for a stone found under the surface.
    ///
    /// # Arguments
    /// * `state` - Stone state at the moment the crossing was detected
    /// * `props` - Stone physical properties
    /// * `forces` - Force model (and the environment it carries)
    pub fn resolve<F: ForceModel>(
        state: &BodyState,
        props: &StoneProperties,
        forces: &F,
    ) -> ImpactResolution {
        let net_force = Self::net_vertical_force(state.vel, props, forces);
        let depth = Self::max_depth(state.vel, props, forces);

        let outcome = match depth {
            Ok(d) => Self::decide(state.vel, props, forces, net_force, d),
            Err(cause) => ImpactOutcome::SkipFailure { cause },
        };

        let state = match outcome {
            ImpactOutcome::SkipSuccess { velocity } => BodyState {
                vel: velocity,
                ..*state
            },
            ImpactOutcome::SkipFailure { .. } => *state,
        };

        tracing::debug!(
            net_force,
            depth = ?depth,
            outcome = ?outcome,
            "impact resolved"
        );

        ImpactResolution {
            outcome,
            state,
            net_force,
            depth: depth.ok(),
        }
    }

    fn decide<F: ForceModel>(
        vel: Vec2,
        props: &StoneProperties,
        forces: &F,
        net_force: f64,
        depth: f64,
    ) -> ImpactOutcome {
        if net_force <= 0.0 {
            return ImpactOutcome::SkipFailure {
                cause: SinkCause::InsufficientLift,
            };
        }

        let rebound = Self::post_impact_vz(net_force, depth, props.mass).and_then(|vz| {
            let horizontal = Self::net_horizontal_force(vel, props, forces);
            Self::post_impact_vx(vel, horizontal, depth, props.mass).map(|vx| Vec2::new(vx, vz))
        });

        match rebound {
            Ok(velocity) if velocity.x > 0.0 => ImpactOutcome::SkipSuccess { velocity },
            Ok(_) => ImpactOutcome::SkipFailure {
                cause: SinkCause::HorizontalStall,
            },
            Err(cause) => ImpactOutcome::SkipFailure { cause },
        }
    }

    /// Vertical balance of projected lift, projected drag and weight.
    pub fn net_vertical_force<F: ForceModel>(
        vel: Vec2,
        props: &StoneProperties,
        forces: &F,
    ) -> f64 {
        let env = forces.environment();
        env.lift_projection().cos() * forces.lift_force(vel, props)
            - env.drag_projection().cos() * forces.drag_force(vel, props)
            - forces.gravity_force(props)
    }

    /// Horizontal force resisting the stone while it ploughs through the water.
    pub fn net_horizontal_force<F: ForceModel>(
        vel: Vec2,
        props: &StoneProperties,
        forces: &F,
    ) -> f64 {
        let env = forces.environment();
        env.lift_projection().sin() * forces.lift_force(vel, props)
            + env.drag_projection().sin() * forces.drag_force(vel, props)
    }

    /// Maximum penetration depth `d` for the incoming velocity.
    pub fn max_depth<F: ForceModel>(
        vel: Vec2,
        props: &StoneProperties,
        forces: &F,
    ) -> Result<f64, SinkCause> {
        let env = forces.environment();
        let tilt = env.tilt_radians();
        let sin_tilt = tilt.sin();

        if sin_tilt.abs() < constants::EPSILON || vel.x <= constants::EPSILON {
            return Err(SinkCause::DegenerateGeometry);
        }

        let c = env.lift_coefficient * tilt.cos() - env.drag_coefficient * sin_tilt;
        let radicand = (c * env.water_density * vel.x.powi(3) * props.size)
            / (2.0 * props.mass * sin_tilt);
        if radicand < 0.0 {
            return Err(SinkCause::NonRealIntermediate);
        }

        let omega0 = radicand.sqrt();
        if omega0 < constants::EPSILON {
            return Err(SinkCause::DegenerateGeometry);
        }

        let g = env.gravity;
        let depth = (g / omega0) * (1.0 + (1.0 + (vel.y * omega0 / g).powi(2)).sqrt());
        if depth.is_finite() {
            Ok(depth)
        } else {
            Err(SinkCause::DegenerateGeometry)
        }
    }

    /// Vertical rebound speed, `sqrt(F_net·d / 2m)`.
    pub fn post_impact_vz(net_force: f64, depth: f64, mass: f64) -> Result<f64, SinkCause> {
        let radicand = net_force * depth / (2.0 * mass);
        if radicand < 0.0 || !radicand.is_finite() {
            return Err(SinkCause::NonRealIntermediate);
        }
        Ok(radicand.sqrt())
    }

    /// Horizontal rebound speed after decelerating over the contact path.
    pub fn post_impact_vx(
        vel: Vec2,
        horizontal_force: f64,
        depth: f64,
        mass: f64,
    ) -> Result<f64, SinkCause> {
        if vel.y.abs() < constants::EPSILON {
            return Err(SinkCause::DegenerateGeometry);
        }

        let path_ratio = (vel.x / vel.y).abs();
        let radicand = vel.x * vel.x - 2.0 * (horizontal_force / mass) * depth * path_ratio;
        if radicand < 0.0 || !radicand.is_finite() {
            return Err(SinkCause::HorizontalStall);
        }
        Ok(radicand.sqrt())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::HydrodynamicForces;
    use crate::types::Environment;

    /// A light, fast stone that skips: 1 kg, area 7 cm², hitting at (100, -10).
    fn skimming_stone() -> (BodyState, StoneProperties) {
        let state = BodyState::new(
            Vec2::new(50.0, -0.5),
            Vec2::new(100.0, -10.0),
            Vec2::new(0.0, -constants::GRAVITY),
        );
        (state, StoneProperties::new("skimmer", 7e-6, 1.0, 0.05))
    }

    fn impact_state(vel: Vec2) -> BodyState {
        BodyState::new(Vec2::new(9.4, -5.38), vel, Vec2::new(0.0, -constants::GRAVITY))
    }

    #[test]
    fn test_fast_flat_stone_skips() {
        let (state, props) = skimming_stone();
        let forces = HydrodynamicForces::default();

        let result = ImpactResolver::resolve(&state, &props, &forces);

        match result.outcome {
            ImpactOutcome::SkipSuccess { velocity } => {
                assert!(velocity.x > 35.0 && velocity.x < 45.0, "vx={}", velocity.x);
                assert!(velocity.y > 2.0 && velocity.y < 3.2, "vy={}", velocity.y);
                assert_eq!(result.state.vel, velocity);
            }
            other => panic!("Expected a skip, got {:?}", other),
        }
        assert!(result.net_force > 0.0);
        assert!(result.state.vel.y > 0.0, "Stone should leave the water rising");
        // Position is not touched by the resolver
        assert_eq!(result.state.pos, state.pos);
    }

    #[test]
    fn test_depth_close_to_vertical_speed_for_fast_stone() {
        let (state, props) = skimming_stone();
        let forces = HydrodynamicForces::default();

        let d = ImpactResolver::max_depth(state.vel, &props, &forces).expect("depth");

        // For large vy·ω0/g, d ≈ |vy| + 2g/ω0
        assert!(d > 10.0 && d < 10.01, "d={}", d);
    }

    #[test]
    fn test_net_force_uses_fixed_projection_angles() {
        let forces = HydrodynamicForces::default();
        let props = StoneProperties::flat_pebble();
        let vel = Vec2::new(3.0, -4.0);

        let lift = forces.lift_force(vel, &props);
        let drag = forces.drag_force(vel, &props);
        let expected = 20f64.to_radians().cos() * lift - 70f64.to_radians().cos() * drag - 0.98;

        let net = ImpactResolver::net_vertical_force(vel, &props, &forces);
        assert!((net - expected).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_stone_sinks_without_lift() {
        let forces = HydrodynamicForces::default();
        let props = StoneProperties::new("brick", 0.01, 500.0, 0.05);
        let state = impact_state(Vec2::new(5.0, -2.0));

        let result = ImpactResolver::resolve(&state, &props, &forces);

        assert_eq!(
            result.outcome,
            ImpactOutcome::SkipFailure {
                cause: SinkCause::InsufficientLift
            }
        );
        assert!(result.net_force < 0.0);
        assert_eq!(result.state, state, "Failed skip must not touch the state");
    }

    #[test]
    fn test_zero_horizontal_speed_is_degenerate() {
        let forces = HydrodynamicForces::default();
        let props = StoneProperties::flat_pebble();
        let state = impact_state(Vec2::new(0.0, -12.0));

        let result = ImpactResolver::resolve(&state, &props, &forces);

        assert_eq!(
            result.outcome,
            ImpactOutcome::SkipFailure {
                cause: SinkCause::DegenerateGeometry
            }
        );
        assert!(result.depth.is_none());
        assert!(result.state.vel.is_finite());
    }

    #[test]
    fn test_backwards_motion_is_degenerate() {
        let forces = HydrodynamicForces::default();
        let props = StoneProperties::flat_pebble();

        let depth = ImpactResolver::max_depth(Vec2::new(-3.0, -5.0), &props, &forces);
        assert_eq!(depth, Err(SinkCause::DegenerateGeometry));
    }

    #[test]
    fn test_zero_tilt_is_degenerate() {
        let forces = HydrodynamicForces::new(Environment {
            tilt_angle: 0.0,
            ..Environment::calm_lake()
        });
        let props = StoneProperties::flat_pebble();

        let depth = ImpactResolver::max_depth(Vec2::new(9.0, -5.0), &props, &forces);
        assert_eq!(depth, Err(SinkCause::DegenerateGeometry));
    }

    #[test]
    fn test_steep_tilt_gives_non_real_frequency() {
        // At 40° drag outweighs lift in C, so ω0² < 0
        let forces = HydrodynamicForces::new(Environment {
            tilt_angle: 40.0,
            ..Environment::calm_lake()
        });
        let props = StoneProperties::flat_pebble();
        let state = impact_state(Vec2::new(9.0, -5.0));

        let result = ImpactResolver::resolve(&state, &props, &forces);

        assert_eq!(
            result.outcome,
            ImpactOutcome::SkipFailure {
                cause: SinkCause::NonRealIntermediate
            }
        );
    }

    #[test]
    fn test_vertical_rebound_rejects_negative_work() {
        assert_eq!(
            ImpactResolver::post_impact_vz(-1.0, 0.5, 0.1),
            Err(SinkCause::NonRealIntermediate)
        );
        let vz = ImpactResolver::post_impact_vz(2.0, 0.1, 0.1).expect("real");
        assert!((vz - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_horizontal_rebound_guards() {
        assert_eq!(
            ImpactResolver::post_impact_vx(Vec2::new(5.0, 0.0), 1.0, 0.1, 0.1),
            Err(SinkCause::DegenerateGeometry)
        );
        assert_eq!(
            ImpactResolver::post_impact_vx(Vec2::new(5.0, -5.0), 1000.0, 1.0, 0.1),
            Err(SinkCause::HorizontalStall)
        );

        // vx² − 2·(F/m)·d·|vx/vy| = 25 − 2·1·1·1 = 23
        let vx = ImpactResolver::post_impact_vx(Vec2::new(5.0, -5.0), 0.1, 1.0, 0.1)
            .expect("real");
        assert!((vx - 23f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_horizontal_rebound_never_speeds_up() {
        for vy in [-1.0, -5.0, -20.0] {
            let vx = ImpactResolver::post_impact_vx(Vec2::new(8.0, vy), 0.3, 0.2, 0.1)
                .unwrap_or(0.0);
            assert!(vx <= 8.0, "vy={} produced vx={}", vy, vx);
        }
    }

    #[test]
    fn test_golden_impact_stalls() {
        // Flat pebble, sidearm throw, second tick: v = (9.397, -16.18)
        let forces = HydrodynamicForces::default();
        let props = StoneProperties::flat_pebble();
        let vel = Vec2::new(
            10.0 * 20f64.to_radians().cos(),
            10.0 * 20f64.to_radians().sin() - 2.0 * constants::GRAVITY,
        );

        let result = ImpactResolver::resolve(&impact_state(vel), &props, &forces);

        assert_eq!(
            result.outcome,
            ImpactOutcome::SkipFailure {
                cause: SinkCause::HorizontalStall
            }
        );
        assert!(result.net_force > 500.0 && result.net_force < 600.0);
        let depth = result.depth.expect("depth is computable");
        assert!(depth > 16.0 && depth < 16.5, "d={}", depth);
    }
}
