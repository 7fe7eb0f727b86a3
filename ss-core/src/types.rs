//! Core types for the skipping stone model.
//!
//! All units are SI:
//! - Position: meters (m), `y` is height above the water (negative = submerged)
//! - Velocity: meters per second (m/s)
//! - Mass: kilograms (kg)
//! - Area: square meters (m²)
//! - Force: Newtons (N)
//!
//! Angles are stored in degrees, matching how throws are described, and are
//! converted to radians at the point of use.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::error::{SkipError, SkipResult};

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for positions, velocities and accelerations.
///
/// Coordinate system:
/// - X: horizontal, along the direction of the throw
/// - Y: vertical, positive upward, water surface at y = 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector of length `magnitude` pointing `angle_deg` above the +X axis.
    pub fn from_polar_deg(magnitude: f64, angle_deg: f64) -> Self {
        let angle = angle_deg.to_radians();
        Self {
            x: magnitude * angle.cos(),
            y: magnitude * angle.sin(),
        }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Body State
// =============================================================================

/// Kinematic state of the stone at a given tick.
///
/// While airborne the acceleration is constant, `(0, -g)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
}

impl BodyState {
    pub fn new(pos: Vec2, vel: Vec2, acc: Vec2) -> Self {
        Self { pos, vel, acc }
    }

    /// State right after release: at `(0, height)`, moving at `speed` along the
    /// angle of attack, accelerating under gravity only.
    pub fn launched(launch: &Launch, env: &Environment) -> Self {
        Self {
            pos: Vec2::new(0.0, launch.height),
            vel: Vec2::from_polar_deg(launch.speed, launch.angle_of_attack),
            acc: Vec2::new(0.0, -env.gravity),
        }
    }

    /// True when the stone is below a water surface at height `surface_y`.
    pub fn is_submerged(&self, surface_y: f64) -> bool {
        self.pos.y < surface_y
    }
}

impl Default for BodyState {
    fn default() -> Self {
        Self::launched(&Launch::default(), &Environment::default())
    }
}

// =============================================================================
// Stone and Launch Properties
// =============================================================================

/// Physical properties of a stone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneProperties {
    pub name: String,
    /// Cross-sectional area (m²)
    pub area: f64,
    pub mass: f64,
    /// Characteristic length (m)
    pub size: f64,
}

impl StoneProperties {
    pub fn new(name: impl Into<String>, area: f64, mass: f64, size: f64) -> Self {
        Self {
            name: name.into(),
            area,
            mass,
            size,
        }
    }

    /// A small flat pebble, 100 g with a 5 cm edge.
    pub fn flat_pebble() -> Self {
        Self::new("Flat pebble", 0.01, 0.1, 0.05)
    }

    /// Rejects non-finite or non-positive area, mass and size.
    pub fn validate(&self) -> SkipResult<()> {
        require_positive("area", self.area)?;
        require_positive("mass", self.mass)?;
        require_positive("size", self.size)
    }
}

impl Default for StoneProperties {
    fn default() -> Self {
        Self::flat_pebble()
    }
}

/// How the stone leaves the hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    /// Release speed (m/s)
    pub speed: f64,
    /// Angle of attack above horizontal (degrees), fixed for the whole flight
    pub angle_of_attack: f64,
    /// Release height above the water (m)
    pub height: f64,
}

impl Launch {
    pub fn new(speed: f64, angle_of_attack: f64, height: f64) -> Self {
        Self {
            speed,
            angle_of_attack,
            height,
        }
    }

    /// A sidearm throw: 10 m/s at 20° from one meter up.
    pub fn sidearm() -> Self {
        Self::new(10.0, 20.0, 1.0)
    }

    pub fn validate(&self) -> SkipResult<()> {
        require_finite("speed", self.speed)?;
        require_finite("angle_of_attack", self.angle_of_attack)?;
        require_finite("height", self.height)?;
        if self.height < 0.0 {
            return Err(SkipError::InvalidConstructionInput {
                field: "height",
                value: self.height,
            });
        }
        Ok(())
    }
}

impl Default for Launch {
    fn default() -> Self {
        Self::sidearm()
    }
}

fn require_finite(field: &'static str, value: f64) -> SkipResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SkipError::InvalidConstructionInput { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> SkipResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SkipError::InvalidConstructionInput { field, value })
    }
}

fn require_positive(field: &'static str, value: f64) -> SkipResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SkipError::InvalidConstructionInput { field, value })
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Fluid and gravity parameters shared by the force model and the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    pub drag_coefficient: f64,
    pub lift_coefficient: f64,
    /// Water density (kg/m³)
    pub water_density: f64,
    /// Tilt the stone keeps relative to the water while in contact (degrees)
    pub tilt_angle: f64,
}

impl Environment {
    /// Fresh water at rest, with the default coefficients.
    pub fn calm_lake() -> Self {
        Self {
            name: "Calm lake".to_string(),
            gravity: constants::GRAVITY,
            drag_coefficient: constants::DRAG_COEFFICIENT,
            lift_coefficient: constants::LIFT_COEFFICIENT,
            water_density: constants::WATER_DENSITY,
            tilt_angle: constants::TILT_ANGLE_DEG,
        }
    }

    /// Rejects non-positive gravity or density, negative or non-finite
    /// coefficients, and a tilt outside the open range (0°, 90°).
    pub fn validate(&self) -> SkipResult<()> {
        require_positive("gravity", self.gravity)?;
        require_non_negative("drag_coefficient", self.drag_coefficient)?;
        require_non_negative("lift_coefficient", self.lift_coefficient)?;
        require_positive("water_density", self.water_density)?;
        if !(self.tilt_angle > 0.0 && self.tilt_angle < 90.0) {
            return Err(SkipError::InvalidConstructionInput {
                field: "tilt_angle",
                value: self.tilt_angle,
            });
        }
        Ok(())
    }

    pub fn tilt_radians(&self) -> f64 {
        self.tilt_angle.to_radians()
    }

    /// Angle used to project lift onto the vertical (radians).
    pub fn lift_projection(&self) -> f64 {
        self.tilt_radians()
    }

    /// Angle used to project drag onto the vertical: the tilt's complement (radians).
    pub fn drag_projection(&self) -> f64 {
        (90.0 - self.tilt_angle).to_radians()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::calm_lake()
    }
}

// =============================================================================
// Simulation Phase
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// In flight, or rebounding after a successful skip.
    Airborne,
    /// Failed to skip. Terminal.
    Sunk,
}

// =============================================================================
// Impact Types
// =============================================================================

/// Where and how deep the stone was found below the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCrossing {
    pub point: Vec2,
    pub penetration: f64,
}

/// Why an impact did not produce a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkCause {
    /// Vertical projection of lift did not beat drag and weight.
    InsufficientLift,
    /// A square-root argument went negative.
    NonRealIntermediate,
    /// vx ≤ 0, vy = 0 or a zero tilt made the rebound undefined.
    DegenerateGeometry,
    /// Horizontal speed did not stay positive through the contact.
    HorizontalStall,
}

/// The two-outcome impact signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImpactOutcome {
    SkipSuccess { velocity: Vec2 },
    SkipFailure { cause: SinkCause },
}

impl ImpactOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImpactOutcome::SkipSuccess { .. })
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used by the default environment.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.8;

    pub const DRAG_COEFFICIENT: f64 = 1.0;

    pub const LIFT_COEFFICIENT: f64 = 0.7;

    /// Fresh water (kg/m³)
    pub const WATER_DENSITY: f64 = 1000.0;

    /// Contact tilt of the stone (degrees)
    pub const TILT_ANGLE_DEG: f64 = 20.0;

    /// Height of the water surface (m)
    pub const SURFACE_Y: f64 = 0.0;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
