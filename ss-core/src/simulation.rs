//! The simulation loop: one stone, ticked by an external driver.
//!
//! Each `tick` runs the velocity update, then the position update. The
//! position update checks for a surface crossing first; if there is one the
//! impact resolver decides skip or sink and may replace the velocity, which
//! is then used for that same position step.
//!
//! ```text
//!  Airborne ──(below surface)──▶ resolve ──skip──▶ Airborne
//!                                              │
//!                                              └──sink──▶ Sunk (terminal)
//! ```
//!
//! Once sunk, further ticks are no-ops.

use crate::collision::{ImpactResolver, SurfaceDetector};
use crate::error::SkipResult;
use crate::events::{EventKind, EventSink, SimulationEvent};
use crate::forces::{total_velocity, ForceModel, HydrodynamicForces};
use crate::integrator::FixedStep;
use crate::types::{
    BodyState, Environment, ImpactOutcome, Launch, Phase, StoneProperties, Vec2,
};

/// What happened during one call to `tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Outcome of the impact resolved during this tick, if any.
    pub impact: Option<ImpactOutcome>,
    pub phase: Phase,
    pub state: BodyState,
}

/// Result of `Simulation::run`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub skips: u32,
    pub phase: Phase,
    pub final_state: BodyState,
}

/// A thrown stone and everything needed to advance it.
pub struct Simulation<F: ForceModel = HydrodynamicForces> {
    props: StoneProperties,
    launch: Launch,
    state: BodyState,
    forces: F,
    detector: SurfaceDetector,
    phase: Phase,
    depth: f64,
    tick: u64,
    skips: u32,
    last_impact: Option<ImpactOutcome>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Simulation<HydrodynamicForces> {
    /// Create a simulation in the given environment.
    pub fn new(props: StoneProperties, launch: Launch, env: Environment) -> SkipResult<Self> {
        Self::with_forces(props, launch, HydrodynamicForces::new(env))
    }

    /// Create a simulation from raw throw parameters in the default environment.
    ///
    /// # Arguments
    /// * `area` - Cross-sectional area (m²)
    /// * `mass` - Mass (kg)
    /// * `velocity` - Release speed (m/s)
    /// * `angle_of_attack` - Degrees above horizontal
    /// * `size` - Characteristic length (m)
    /// * `height` - Release height above the water (m)
    pub fn construct(
        area: f64,
        mass: f64,
        velocity: f64,
        angle_of_attack: f64,
        size: f64,
        height: f64,
    ) -> SkipResult<Self> {
        Self::new(
            StoneProperties::new("custom", area, mass, size),
            Launch::new(velocity, angle_of_attack, height),
            Environment::default(),
        )
    }
}

impl<F: ForceModel> Simulation<F> {
    /// Create a simulation with a custom force model.
    pub fn with_forces(props: StoneProperties, launch: Launch, forces: F) -> SkipResult<Self> {
        props.validate()?;
        launch.validate()?;
        forces.environment().validate()?;

        let state = BodyState::launched(&launch, forces.environment());
        tracing::debug!(
            stone = %props.name,
            vx = state.vel.x,
            vy = state.vel.y,
            height = launch.height,
            "stone launched"
        );

        Ok(Self {
            props,
            launch,
            state,
            forces,
            detector: SurfaceDetector::default(),
            phase: Phase::Airborne,
            depth: 0.0,
            tick: 0,
            skips: 0,
            last_impact: None,
            sinks: Vec::new(),
        })
    }

    /// Replace the surface detector.
    pub fn with_detector(mut self, detector: SurfaceDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Register a sink. Sinks added before the first tick also see `Launched`.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Advance one tick: velocity update, then position update.
    pub fn tick(&mut self) -> TickReport {
        if self.phase == Phase::Sunk {
            tracing::warn!(tick = self.tick, "tick called on a sunk stone, ignoring");
            return self.report(None);
        }

        self.update_velocity();
        let impact = self.update_position();
        self.report(impact)
    }

    /// Start a new tick: advance the tick counter and add the stored
    /// acceleration to the velocity.
    ///
    /// Drivers that call this and `update_position` themselves get the same
    /// tick numbering and events as `tick`.
    pub fn update_velocity(&mut self) {
        if self.phase == Phase::Sunk {
            return;
        }

        if self.tick == 0 {
            self.emit(EventKind::Launched {
                position: self.state.pos,
                velocity: self.state.vel,
            });
        }

        self.tick += 1;
        self.state = FixedStep::update_velocity(&self.state);
    }

    /// Resolve a pending surface crossing, then add the velocity to the position.
    ///
    /// Belongs to the tick opened by the last `update_velocity`; impact events
    /// carry that tick number. Returns the impact outcome when a crossing was
    /// resolved.
    pub fn update_position(&mut self) -> Option<ImpactOutcome> {
        if self.phase == Phase::Sunk {
            return None;
        }

        let impact = self.detector.detect(&self.state).map(|crossing| {
            tracing::debug!(
                tick = self.tick,
                penetration = crossing.penetration,
                "surface crossing"
            );
            self.resolve_impact()
        });

        self.state = FixedStep::update_position(&self.state);
        impact
    }

    fn resolve_impact(&mut self) -> ImpactOutcome {
        let position = self.state.pos;
        let resolution = ImpactResolver::resolve(&self.state, &self.props, &self.forces);

        self.state = resolution.state;
        if let Some(depth) = resolution.depth {
            self.depth = depth;
        }
        self.last_impact = Some(resolution.outcome);

        match resolution.outcome {
            ImpactOutcome::SkipSuccess { velocity } => {
                self.skips += 1;
                tracing::info!(
                    tick = self.tick,
                    skips = self.skips,
                    depth = self.depth,
                    vx = velocity.x,
                    vy = velocity.y,
                    "success"
                );
            }
            ImpactOutcome::SkipFailure { cause } => {
                self.phase = Phase::Sunk;
                tracing::info!(tick = self.tick, cause = ?cause, "failure");
            }
        }

        self.emit(EventKind::Impact {
            outcome: resolution.outcome,
            position,
            depth: resolution.depth,
        });
        if self.phase == Phase::Sunk {
            self.emit(EventKind::Sunk {
                position,
                skips: self.skips,
            });
        }

        resolution.outcome
    }

    /// Tick until the stone sinks or `max_ticks` more ticks have run.
    pub fn run(&mut self, max_ticks: u64) -> RunSummary {
        let mut ran = 0;
        while ran < max_ticks && !self.is_sunk() {
            self.tick();
            ran += 1;
        }

        RunSummary {
            ticks: self.tick,
            skips: self.skips,
            phase: self.phase,
            final_state: self.state,
        }
    }

    fn emit(&mut self, kind: EventKind) {
        let event = SimulationEvent::new(self.tick, kind);
        for sink in &mut self.sinks {
            sink.handle(&event);
        }
    }

    fn report(&self, impact: Option<ImpactOutcome>) -> TickReport {
        TickReport {
            tick: self.tick,
            impact,
            phase: self.phase,
            state: self.state,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.state.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.vel
    }

    pub fn acceleration(&self) -> Vec2 {
        self.state.acc
    }

    /// Current speed, `sqrt(vx² + vy²)`.
    pub fn total_velocity(&self) -> f64 {
        total_velocity(self.state.vel)
    }

    pub fn lift_force(&self) -> f64 {
        self.forces.lift_force(self.state.vel, &self.props)
    }

    pub fn drag_force(&self) -> f64 {
        self.forces.drag_force(self.state.vel, &self.props)
    }

    pub fn gravity_force(&self) -> f64 {
        self.forces.gravity_force(&self.props)
    }

    /// Penetration depth of the most recent impact (0 before any impact).
    pub fn penetration_depth(&self) -> f64 {
        self.depth
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn props(&self) -> &StoneProperties {
        &self.props
    }

    pub fn launch(&self) -> &Launch {
        &self.launch
    }

    pub fn environment(&self) -> &Environment {
        self.forces.environment()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_sunk(&self) -> bool {
        self.phase == Phase::Sunk
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn skips(&self) -> u32 {
        self.skips
    }

    pub fn last_impact(&self) -> Option<ImpactOutcome> {
        self.last_impact
    }
}

// =============================================================================
// Tests
// =============================================================================
