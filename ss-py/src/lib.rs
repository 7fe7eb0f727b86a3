//! Python bindings for the ss-core skipping stone model.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from ss_physics import Simulation
//!
//! sim = Simulation(area=0.01, mass=0.1, velocity=10.0, angle=20.0, size=0.05, height=1.0)
//!
//! while not sim.is_sunk:
//!     outcome = sim.tick()
//!     pos = sim.position()
//!     print(f"Stone at ({pos.x}, {pos.y})", outcome or "")
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use ss_core::presets::PresetLoader;
use ss_core::types::{ImpactOutcome, SinkCause, Vec2 as CoreVec2};
use ss_core::{SkipError, Simulation as CoreSimulation};

/// 2D vector for positions and velocities.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec2 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vec2 {
    #[new]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Vec2({:.4}, {:.4})", self.x, self.y)
    }

    fn magnitude(&self) -> f64 {
        CoreVec2::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<CoreVec2> for Vec2 {
    fn from(v: CoreVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2> for CoreVec2 {
    fn from(v: Vec2) -> Self {
        CoreVec2::new(v.x, v.y)
    }
}

fn to_py_err(err: SkipError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn outcome_label(outcome: ImpactOutcome) -> String {
    if outcome.is_success() { "success" } else { "failure" }.to_string()
}

fn cause_label(cause: SinkCause) -> &'static str {
    match cause {
        SinkCause::InsufficientLift => "insufficient_lift",
        SinkCause::NonRealIntermediate => "non_real_intermediate",
        SinkCause::DegenerateGeometry => "degenerate_geometry",
        SinkCause::HorizontalStall => "horizontal_stall",
    }
}

/// Main simulation class.
///
/// Owns one stone and advances it one unit tick at a time.
#[pyclass(unsendable)]
pub struct Simulation {
    inner: CoreSimulation,
}

#[pymethods]
impl Simulation {
    /// Create a simulation from raw throw parameters.
    #[new]
    #[pyo3(signature = (area=0.01, mass=0.1, velocity=10.0, angle=20.0, size=0.05, height=1.0))]
    fn new(
        area: f64,
        mass: f64,
        velocity: f64,
        angle: f64,
        size: f64,
        height: f64,
    ) -> PyResult<Self> {
        let inner = CoreSimulation::construct(area, mass, velocity, angle, size, height)
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Create a simulation from YAML presets.
    #[staticmethod]
    #[pyo3(signature = (presets_dir, stone, launch, environment="calm_lake"))]
    fn from_presets(
        presets_dir: &str,
        stone: &str,
        launch: &str,
        environment: &str,
    ) -> PyResult<Self> {
        let loader = PresetLoader::new(presets_dir);
        let inner = CoreSimulation::new(
            loader.load_stone(stone).map_err(to_py_err)?,
            loader.load_launch(launch).map_err(to_py_err)?,
            loader.load_environment(environment).map_err(to_py_err)?,
        )
        .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Number of ticks run so far.
    #[getter]
    fn ticks(&self) -> u64 {
        self.inner.ticks()
    }

    /// Number of successful skips so far.
    #[getter]
    fn skips(&self) -> u32 {
        self.inner.skips()
    }

    #[getter]
    fn is_sunk(&self) -> bool {
        self.inner.is_sunk()
    }

    fn position(&self) -> Vec2 {
        self.inner.position().into()
    }

    fn velocity(&self) -> Vec2 {
        self.inner.velocity().into()
    }

    /// Current speed in m/s.
    fn total_velocity(&self) -> f64 {
        self.inner.total_velocity()
    }

    fn lift_force(&self) -> f64 {
        self.inner.lift_force()
    }

    fn drag_force(&self) -> f64 {
        self.inner.drag_force()
    }

    fn gravity_force(&self) -> f64 {
        self.inner.gravity_force()
    }

    /// Penetration depth of the most recent impact, in meters.
    fn penetration_depth(&self) -> f64 {
        self.inner.penetration_depth()
    }

    /// Last impact outcome (if any): "success" or "failure".
    fn last_impact(&self) -> Option<String> {
        self.inner.last_impact().map(outcome_label)
    }

    /// Why the stone sank, if it did.
    fn sink_cause(&self) -> Option<&'static str> {
        match self.inner.last_impact() {
            Some(ImpactOutcome::SkipFailure { cause }) => Some(cause_label(cause)),
            _ => None,
        }
    }

    /// Advance one tick.
    ///
    /// Returns "success" or "failure" when an impact was resolved this tick.
    fn tick(&mut self) -> Option<String> {
        self.inner.tick().impact.map(outcome_label)
    }

    fn update_velocity(&mut self) {
        self.inner.update_velocity();
    }

    fn update_position(&mut self) -> Option<String> {
        self.inner.update_position().map(outcome_label)
    }

    /// Tick until sunk or `max_ticks` ticks have run.
    ///
    /// Returns (ticks, skips, sunk).
    #[pyo3(signature = (max_ticks=1000))]
    fn run(&mut self, max_ticks: u64) -> (u64, u32, bool) {
        let summary = self.inner.run(max_ticks);
        (summary.ticks, summary.skips, self.inner.is_sunk())
    }

    /// Start the same throw over.
    fn reset(&mut self) -> PyResult<()> {
        self.inner = CoreSimulation::new(
            self.inner.props().clone(),
            *self.inner.launch(),
            self.inner.environment().clone(),
        )
        .map_err(to_py_err)?;
        Ok(())
    }

    /// Get current state as dict for easy inspection.
    fn state_dict(&self) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            let dict = pyo3::types::PyDict::new(py);
            dict.set_item("tick", self.inner.ticks())?;
            dict.set_item("x", self.inner.position().x)?;
            dict.set_item("y", self.inner.position().y)?;
            dict.set_item("vx", self.inner.velocity().x)?;
            dict.set_item("vy", self.inner.velocity().y)?;
            dict.set_item("speed", self.inner.total_velocity())?;
            dict.set_item("depth", self.inner.penetration_depth())?;
            dict.set_item("skips", self.inner.skips())?;
            dict.set_item("sunk", self.inner.is_sunk())?;
            Ok(dict.into_any().unbind())
        })
    }
}

/// Python module definition.
#[pymodule]
fn ss_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec2>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
