use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Error, Result},
    force::{MagneticField, K},
    integrator::Simulation,
    particle::{KinematicState, Particle},
    trajectory::Trajectory,
};

/// Relative distance to an integer below which `duration / time_step` counts
/// as a whole number of steps.
const STEP_SNAP_TOLERANCE: f64 = 1e-9;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Total simulated time T in seconds.
    pub duration: f64,
    /// Step size dt in seconds.
    pub time_step: f64,
    #[serde(default = "default_coulomb_constant")]
    pub coulomb_constant: f64,
}

fn default_coulomb_constant() -> f64 {
    K
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: 1.,
            time_step: 1e-3,
            coulomb_constant: K,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new(duration: f64, time_step: f64) -> Self {
        Self {
            duration,
            time_step,
            coulomb_constant: K,
        }
    }

    /// Create a config with `num_steps` evenly spaced points on `[0, duration]`,
    /// both ends included.
    pub fn from_step_count(duration: f64, num_steps: usize) -> Result<Self> {
        if num_steps < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "at least two steps are required, got {num_steps}"
            )));
        }

        let config = Self::new(duration, duration / (num_steps - 1) as f64);
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_coulomb_constant(mut self, coulomb_constant: f64) -> Self {
        self.coulomb_constant = coulomb_constant;
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.duration.is_finite() && self.duration > 0.) {
            return Err(Error::InvalidConfiguration(format!(
                "duration must be positive and finite, got {}",
                self.duration
            )));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.) {
            return Err(Error::InvalidConfiguration(format!(
                "time step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !self.coulomb_constant.is_finite() {
            return Err(Error::InvalidConfiguration(format!(
                "Coulomb constant must be finite, got {}",
                self.coulomb_constant
            )));
        }

        Ok(())
    }

    /// Number of points on the time grid, `ceil(T / dt) + 1`.
    pub fn num_steps(&self) -> Result<usize> {
        self.validate()?;

        let ratio = self.duration / self.time_step;
        let rounded = ratio.round();
        let intervals = if (ratio - rounded).abs() <= STEP_SNAP_TOLERANCE * rounded.max(1.) {
            rounded
        } else {
            ratio.ceil()
        }
        .max(1.);

        if intervals >= (usize::MAX / 2) as f64 {
            return Err(Error::InvalidConfiguration(format!(
                "too many steps: duration {} with time step {}",
                self.duration, self.time_step
            )));
        }

        Ok(intervals as usize + 1)
    }
}

/// One body of a [`Scenario`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BodyConfig {
    pub charge: f64,
    pub mass: f64,
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
    #[serde(default)]
    pub acceleration: [f64; 3],
}

impl BodyConfig {
    pub fn particle(&self) -> Result<Particle> {
        Particle::new(self.charge, self.mass)
    }

    #[must_use]
    pub fn initial_state(&self) -> KinematicState {
        KinematicState::new(
            Vector3::from(self.position),
            Vector3::from(self.velocity),
            Vector3::from(self.acceleration),
        )
    }
}

/// A complete description of a run: bodies, field and time grid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub field: [f64; 3],
    pub simulation: SimulationConfig,
    pub bodies: Vec<BodyConfig>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(s)?;
        scenario.simulation.validate()?;
        info!(
            bodies = scenario.bodies.len(),
            duration = scenario.simulation.duration,
            time_step = scenario.simulation.time_step,
            "loaded scenario"
        );
        Ok(scenario)
    }

    #[must_use]
    pub fn magnetic_field(&self) -> MagneticField {
        MagneticField(Vector3::from(self.field))
    }

    pub fn bodies(&self) -> Result<Vec<(Particle, KinematicState)>> {
        self.bodies
            .iter()
            .map(|body| Ok((body.particle()?, body.initial_state())))
            .collect()
    }

    pub fn simulation(&self) -> Result<Simulation> {
        Simulation::new(self.bodies()?, self.magnetic_field(), &self.simulation)
    }

    pub fn run(&self) -> Result<Vec<Trajectory>> {
        self.simulation()?.run()
    }
}
