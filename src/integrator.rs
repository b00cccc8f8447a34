#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    config::SimulationConfig,
    error::{Error, Result},
    force::{ForceModel, MagneticField},
    particle::{KinematicState, Particle},
    trajectory::Trajectory,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    SingleThreaded,
    #[cfg(feature = "rayon")]
    RayonIter,
}

/// The states of all bodies at one time step, enough to resume a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    step: usize,
    states: Vec<KinematicState>,
}

impl Checkpoint {
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn states(&self) -> &[KinematicState] {
        &self.states
    }
}

/// Step-wise integrator for a set of charged particles.
///
/// Each step derives the states of step i from an immutable snapshot of all
/// bodies at step i - 1:
/// - `a_i = a(x_(i-1), v_(i-1))`
/// - `v_i = v_(i-1) + a_(i-1) dt`
/// - `x_i = x_(i-1) + v_(i-1) dt + a_(i-1) dt^2 / 2`
///
/// The state of the first step is taken as given, including its acceleration.
#[derive(Clone, Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    force: ForceModel,
    time_step: f64,
    num_steps: usize,
    first_step: usize,
    // steps[t][body], starting at `first_step`
    steps: Vec<Vec<KinematicState>>,
    execution: Execution,
}

impl Simulation {
    pub fn new(
        bodies: Vec<(Particle, KinematicState)>,
        field: MagneticField,
        config: &SimulationConfig,
    ) -> Result<Self> {
        let (particles, initial): (Vec<_>, Vec<_>) = bodies.into_iter().unzip();
        let simulation = Self::from_parts(particles, initial, 0, field, config)?;
        debug!(
            bodies = simulation.particles.len(),
            num_steps = simulation.num_steps,
            "created simulation"
        );
        Ok(simulation)
    }

    /// Restart a run from `checkpoint`.
    ///
    /// `particles` and `config` have to be the ones the checkpoint was taken
    /// with for the continuation to match an uninterrupted run.
    pub fn resume(
        particles: Vec<Particle>,
        checkpoint: Checkpoint,
        field: MagneticField,
        config: &SimulationConfig,
    ) -> Result<Self> {
        if particles.len() != checkpoint.states.len() {
            return Err(Error::InvalidConfiguration(format!(
                "checkpoint holds {} states for {} particles",
                checkpoint.states.len(),
                particles.len()
            )));
        }

        let simulation =
            Self::from_parts(particles, checkpoint.states, checkpoint.step, field, config)?;
        if checkpoint.step >= simulation.num_steps {
            return Err(Error::InvalidConfiguration(format!(
                "checkpoint step {} lies beyond the last step {}",
                checkpoint.step,
                simulation.num_steps - 1
            )));
        }

        debug!(
            bodies = simulation.particles.len(),
            step = checkpoint.step,
            num_steps = simulation.num_steps,
            "resumed simulation"
        );
        Ok(simulation)
    }

    fn from_parts(
        particles: Vec<Particle>,
        initial: Vec<KinematicState>,
        first_step: usize,
        field: MagneticField,
        config: &SimulationConfig,
    ) -> Result<Self> {
        let num_steps = config.num_steps()?;
        if particles.is_empty() {
            return Err(Error::InvalidConfiguration(
                "at least one body is required".to_string(),
            ));
        }

        let mut steps = Vec::with_capacity(num_steps.saturating_sub(first_step));
        steps.push(initial);

        Ok(Self {
            particles,
            force: ForceModel::new(field, config.coulomb_constant),
            time_step: config.time_step,
            num_steps,
            first_step,
            steps,
            execution: Execution::SingleThreaded,
        })
    }

    /// Use Rayon to calculate the accelerations of one step in parallel.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn rayon_iter(mut self) -> Self {
        self.execution = Execution::RayonIter;
        self
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn force_model(&self) -> &ForceModel {
        &self.force
    }

    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Total number of points on the time grid, including step 0.
    #[must_use]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.first_step + self.steps.len() - 1
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.current_step() as f64 * self.time_step
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_step() + 1 >= self.num_steps
    }

    #[must_use]
    pub fn current_states(&self) -> &[KinematicState] {
        // `steps` always holds at least the initial states
        &self.steps[self.steps.len() - 1]
    }

    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            step: self.current_step(),
            states: self.current_states().to_vec(),
        }
    }

    /// Advance all bodies by one time step.
    ///
    /// Returns `Ok(false)` without doing anything once the last step is reached.
    /// On error the simulation stays at its current step.
    pub fn step(&mut self) -> Result<bool> {
        if self.is_finished() {
            return Ok(false);
        }

        let next = match self.next_states(self.current_states()) {
            Ok(next) => next,
            Err(err) => {
                warn!(step = self.current_step() + 1, error = %err, "aborting simulation");
                return Err(err);
            }
        };
        self.steps.push(next);

        Ok(true)
    }

    fn next_states(&self, previous: &[KinematicState]) -> Result<Vec<KinematicState>> {
        let dt = self.time_step;
        let advance = |i: usize| -> Result<KinematicState> {
            let prev = &previous[i];
            let acceleration = self.force.acceleration(i, &self.particles, previous)?;

            Ok(KinematicState {
                position: prev.position
                    + prev.velocity * dt
                    + prev.acceleration * (0.5 * dt * dt),
                velocity: prev.velocity + prev.acceleration * dt,
                acceleration,
            })
        };

        match self.execution {
            Execution::SingleThreaded => (0..previous.len()).map(advance).collect(),
            #[cfg(feature = "rayon")]
            Execution::RayonIter => (0..previous.len()).into_par_iter().map(advance).collect(),
        }
    }

    /// Step until the time horizon is exhausted and return one trajectory per body.
    pub fn run(mut self) -> Result<Vec<Trajectory>> {
        while self.step()? {}

        Ok(self.into_trajectories())
    }

    /// The trajectories computed so far, one per body.
    #[must_use]
    pub fn into_trajectories(self) -> Vec<Trajectory> {
        let mut per_body: Vec<Vec<KinematicState>> = self
            .particles
            .iter()
            .map(|_| Vec::with_capacity(self.steps.len()))
            .collect();

        for states in self.steps {
            for (history, state) in per_body.iter_mut().zip(states) {
                history.push(state);
            }
        }

        self.particles
            .into_iter()
            .zip(per_body)
            .map(|(particle, states)| {
                Trajectory::new(particle, self.time_step, self.first_step, states)
            })
            .collect()
    }
}

/// Integrate a single particle in the external field.
pub fn advance(
    particle: &Particle,
    initial_state: &KinematicState,
    field: &MagneticField,
    config: &SimulationConfig,
) -> Result<Trajectory> {
    let trajectories = Simulation::new(vec![(*particle, *initial_state)], *field, config)?.run()?;
    let Ok([trajectory]) = <[Trajectory; 1]>::try_from(trajectories) else {
        unreachable!("one body yields one trajectory");
    };

    Ok(trajectory)
}

/// Integrate two particles in the external field, interacting through the
/// Coulomb force.
pub fn advance_interacting(
    particle_a: &Particle,
    initial_state_a: &KinematicState,
    particle_b: &Particle,
    initial_state_b: &KinematicState,
    field: &MagneticField,
    config: &SimulationConfig,
) -> Result<(Trajectory, Trajectory)> {
    let bodies = vec![
        (*particle_a, *initial_state_a),
        (*particle_b, *initial_state_b),
    ];
    let trajectories = Simulation::new(bodies, *field, config)?.run()?;
    let Ok([a, b]) = <[Trajectory; 2]>::try_from(trajectories) else {
        unreachable!("two bodies yield two trajectories");
    };

    Ok((a, b))
}
