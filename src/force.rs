use nalgebra::Vector3;

use crate::{
    error::{Error, Result},
    particle::{KinematicState, Particle},
};

/// Coulomb constant in N m^2 / C^2.
pub const K: f64 = 8.99e09;

/// A uniform, time-independent magnetic field in Tesla.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MagneticField(pub Vector3<f64>);

impl MagneticField {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    #[must_use]
    pub fn zero() -> Self {
        Self(Vector3::zeros())
    }

    #[must_use]
    pub fn vector(&self) -> &Vector3<f64> {
        &self.0
    }
}

impl From<Vector3<f64>> for MagneticField {
    fn from(value: Vector3<f64>) -> Self {
        Self(value)
    }
}

/// Acceleration of a moving charge in a magnetic field, (q/m) (v × B).
#[must_use]
pub fn magnetic_acceleration(
    velocity: &Vector3<f64>,
    charge: f64,
    mass: f64,
    field: &MagneticField,
) -> Vector3<f64> {
    velocity.cross(&field.0) * (charge / mass)
}

/// The Lorentz force q (v × B) in Newton.
#[must_use]
pub fn lorentz_force(velocity: &Vector3<f64>, charge: f64, field: &MagneticField) -> Vector3<f64> {
    velocity.cross(&field.0) * charge
}

/// Calculate the Coulomb acceleration of the other charge on this one.
///
/// The magnitude is `k q_self q_other / r^2` along the unit vector pointing
/// from the other particle to this one, so like charges repel.
///
/// Fails with [`Error::DegenerateSeparation`] if both positions coincide and
/// the charge product is non-zero. A zero charge product always yields zero.
pub fn electric_acceleration(
    self_position: &Vector3<f64>,
    other_position: &Vector3<f64>,
    self_charge: f64,
    other_charge: f64,
    self_mass: f64,
    k: f64,
) -> Result<Vector3<f64>> {
    Ok(coulomb_force(self_position, other_position, self_charge, other_charge, k)? / self_mass)
}

/// The Coulomb force of the other charge on this one in Newton.
///
/// See [`electric_acceleration`] for the sign convention and failure case.
pub fn coulomb_force(
    self_position: &Vector3<f64>,
    other_position: &Vector3<f64>,
    self_charge: f64,
    other_charge: f64,
    k: f64,
) -> Result<Vector3<f64>> {
    let c = k * self_charge * other_charge;
    if c == 0. {
        return Ok(Vector3::zeros());
    }

    let r = self_position - other_position;
    let distance = r.norm();
    if distance == 0. {
        return Err(Error::DegenerateSeparation);
    }

    Ok(r / distance * (c / (distance * distance)))
}

/// Magnetic plus Coulomb acceleration of `particle` due to `other`.
pub fn total_acceleration(
    particle: &Particle,
    state: &KinematicState,
    other: &Particle,
    other_state: &KinematicState,
    field: &MagneticField,
    k: f64,
) -> Result<Vector3<f64>> {
    let magnetic = magnetic_acceleration(&state.velocity, particle.charge(), particle.mass(), field);
    let electric = electric_acceleration(
        &state.position,
        &other_state.position,
        particle.charge(),
        other.charge(),
        particle.mass(),
        k,
    )?;

    Ok(magnetic + electric)
}

/// The read-only inputs of every acceleration evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceModel {
    field: MagneticField,
    coulomb_constant: f64,
}

impl ForceModel {
    #[must_use]
    pub fn new(field: MagneticField, coulomb_constant: f64) -> Self {
        Self {
            field,
            coulomb_constant,
        }
    }

    #[must_use]
    pub fn field(&self) -> &MagneticField {
        &self.field
    }

    #[must_use]
    pub fn coulomb_constant(&self) -> f64 {
        self.coulomb_constant
    }

    /// Calculate the acceleration of body `index`, given all bodies and their
    /// states at the same instant.
    ///
    /// The Coulomb contributions of all other bodies are summed pairwise.
    pub fn acceleration(
        &self,
        index: usize,
        particles: &[Particle],
        states: &[KinematicState],
    ) -> Result<Vector3<f64>> {
        let particle = &particles[index];
        let state = &states[index];

        let mut acc = magnetic_acceleration(
            &state.velocity,
            particle.charge(),
            particle.mass(),
            &self.field,
        );
        for (j, (other, other_state)) in particles.iter().zip(states).enumerate() {
            if j == index {
                continue;
            }
            acc += electric_acceleration(
                &state.position,
                &other_state.position,
                particle.charge(),
                other.charge(),
                particle.mass(),
                self.coulomb_constant,
            )?;
        }

        Ok(acc)
    }
}
