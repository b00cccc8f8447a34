use lorentz_coulomb::Scenario;

const SCENARIO: &str = r#"
field = [0.0, 0.0, 1.0]

[simulation]
duration = 30.0
time_step = 0.15
coulomb_constant = 1.0

[[bodies]]
charge = 1.0
mass = 1.0
position = [1.0, 0.0, 1.0]
velocity = [1.0, -1.0, 0.0]

[[bodies]]
charge = 1.0
mass = 1.0
position = [1.0, 1.0, 0.0]
velocity = [-1.0, 1.0, 0.0]
"#;

fn main() -> lorentz_coulomb::Result<()> {
    let trajectories = Scenario::from_toml_str(SCENARIO)?.run()?;

    for (i, trajectory) in trajectories.iter().enumerate() {
        println!("particle {i}: {} time steps", trajectory.len());
        for (t, state) in trajectory.times().zip(trajectory.states()).step_by(20) {
            let p = state.position;
            println!("  t = {t:6.2}: x = {:8.3}, y = {:8.3}, z = {:8.3}", p.x, p.y, p.z);
        }
    }

    Ok(())
}
