use nalgebra::Vector3;

use crate::error::{Error, Result};

/// The immutable physical properties of a point charge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    charge: f64,
    mass: f64,
}

impl Particle {
    /// Create a particle with `charge` in Coulombs and `mass` in kilograms.
    ///
    /// The mass has to be positive and finite, the charge finite.
    pub fn new(charge: f64, mass: f64) -> Result<Self> {
        if !charge.is_finite() {
            return Err(Error::InvalidParticle(format!(
                "charge must be finite, got {charge}"
            )));
        }
        if !(mass.is_finite() && mass > 0.) {
            return Err(Error::InvalidParticle(format!(
                "mass must be positive and finite, got {mass}"
            )));
        }

        Ok(Self { charge, mass })
    }

    #[must_use]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// The charge-to-mass ratio q/m.
    #[must_use]
    pub fn specific_charge(&self) -> f64 {
        self.charge / self.mass
    }
}

/// Position, velocity and acceleration of one particle at one time step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,
}

impl KinematicState {
    #[must_use]
    pub fn new(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        acceleration: Vector3<f64>,
    ) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// A state with zero initial acceleration.
    #[must_use]
    pub fn without_acceleration(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self::new(position, velocity, Vector3::zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_mass() {
        assert!(matches!(
            Particle::new(1., 0.),
            Err(Error::InvalidParticle(_))
        ));
        assert!(matches!(
            Particle::new(1., -2.),
            Err(Error::InvalidParticle(_))
        ));
        assert!(matches!(
            Particle::new(1., f64::NAN),
            Err(Error::InvalidParticle(_))
        ));
    }

    #[test]
    fn rejects_non_finite_charge() {
        assert!(matches!(
            Particle::new(f64::INFINITY, 1.),
            Err(Error::InvalidParticle(_))
        ));
    }

    #[test]
    fn zero_and_negative_charges_are_valid() {
        let neutral = Particle::new(0., 1.).unwrap();
        assert_eq!(neutral.specific_charge(), 0.);

        let electron = Particle::new(-1.602e-19, 9.109e-31).unwrap();
        assert!(electron.specific_charge() < 0.);
    }
}
