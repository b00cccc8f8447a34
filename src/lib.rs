pub mod config;
pub mod error;
pub mod force;
pub mod integrator;
pub mod particle;
pub mod trajectory;

pub use config::{BodyConfig, Scenario, SimulationConfig};
pub use error::{Error, Result};
pub use force::{ForceModel, MagneticField};
pub use integrator::{advance, advance_interacting, Checkpoint, Execution, Simulation};
pub use particle::{KinematicState, Particle};
pub use trajectory::Trajectory;
