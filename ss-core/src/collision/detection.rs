//! Surface crossing detection.
//!
//! The water is the horizontal line `y = surface_y`. A crossing is reported
//! on every tick the stone is found below that line, whichever way it moves:
//!
//! ```text
//!        ●  airborne, no crossing
//!         \
//! ~~~~~~~~~\~~~~~~~~~~~~~ surface
//!           ● below and descending: crossing
//!          /
//!         ●  below and rebounding: crossing, resolved again
//! ```
//!
//! A skip that does not carry the stone back above the surface within one
//! tick is followed by another decision on the next tick.

use crate::types::{constants, BodyState, SurfaceCrossing, Vec2};

/// Configuration for surface detection.
#[derive(Debug, Clone, Copy)]
pub struct DetectionConfig {
    /// Height of the water surface (m)
    pub surface_y: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            surface_y: constants::SURFACE_Y,
        }
    }
}

/// Detects when the stone breaks the water surface.
#[derive(Debug, Clone, Default)]
pub struct SurfaceDetector {
    pub config: DetectionConfig,
}

impl SurfaceDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Check the current state for a crossing that needs resolving.
    pub fn detect(&self, state: &BodyState) -> Option<SurfaceCrossing> {
        let surface_y = self.config.surface_y;
        if !state.is_submerged(surface_y) {
            return None;
        }

        Some(SurfaceCrossing {
            point: Vec2::new(state.pos.x, surface_y),
            penetration: surface_y - state.pos.y,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
