use nalgebra::Vector3;

use crate::particle::{KinematicState, Particle};

/// The time series of one particle on a uniform time grid.
///
/// `states()[i]` belongs to time step `first_step() + i`, i.e. time
/// `(first_step() + i) * time_step()`. Trajectories of a fresh run start at
/// step 0, those of a resumed run at the step of the checkpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    particle: Particle,
    time_step: f64,
    first_step: usize,
    states: Vec<KinematicState>,
}

impl Trajectory {
    pub(crate) fn new(
        particle: Particle,
        time_step: f64,
        first_step: usize,
        states: Vec<KinematicState>,
    ) -> Self {
        Self {
            particle,
            time_step,
            first_step,
            states,
        }
    }

    #[must_use]
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    #[must_use]
    pub fn first_step(&self) -> usize {
        self.first_step
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn states(&self) -> &[KinematicState] {
        &self.states
    }

    #[must_use]
    pub fn state(&self, index: usize) -> Option<&KinematicState> {
        self.states.get(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&KinematicState> {
        self.states.last()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (self.first_step..self.first_step + self.states.len()).map(|i| i as f64 * self.time_step)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.states.iter().map(|s| &s.position)
    }

    pub fn velocities(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.states.iter().map(|s| &s.velocity)
    }

    pub fn accelerations(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.states.iter().map(|s| &s.acceleration)
    }

    #[must_use]
    pub fn into_states(self) -> Vec<KinematicState> {
        self.states
    }
}
