use std::f64::consts::PI;

use lorentz_coulomb::{advance, KinematicState, MagneticField, Particle, SimulationConfig};
use nalgebra::Vector3;

fn main() -> lorentz_coulomb::Result<()> {
    // a proton in a 1 T field
    let proton = Particle::new(1.602_176_63e-19, 1.672_621_92e-27)?;
    let field = MagneticField::new(0., 0., 1.);
    let velocity = Vector3::new(1e5, 0., 0.);

    let omega = proton.specific_charge() * field.vector().norm();
    let radius = velocity.norm() / omega;
    let period = 2. * PI / omega;

    let initial = KinematicState::new(
        Vector3::zeros(),
        velocity,
        velocity.cross(field.vector()) * proton.specific_charge(),
    );

    for num_steps in [100, 1_000, 10_000] {
        let config = SimulationConfig::from_step_count(period, num_steps)?;
        let trajectory = advance(&proton, &initial, &field, &config)?;

        let center = Vector3::new(0., -radius, 0.);
        let max_error = trajectory
            .positions()
            .map(|p| ((p - center).xy().norm() - radius).abs() / radius)
            .fold(0., f64::max);

        println!("{num_steps} steps: max relative radius error {max_error:.2e}");
    }

    Ok(())
}
