//! Energy and momentum drift versus step size
//!
//! Runs the Sun-Earth system for one year at several step sizes and shows
//! the fourth-order fall-off of the energy error.
//!
//! Run with: cargo run --package impact --example conservation_check

use impact::body::{Body, BodyKind};
use impact::forces::G;
use impact::scenarios::circular_velocity;
use impact::System;
use nalgebra::Vector3;
use units::{Length, Time, EARTH_MASS_KG, SOLAR_MASS_KG};

fn sun_earth(step_size: f64) -> impact::SimResult<System> {
    let au = Length::from_au(1.0).to_meters();
    let mut system = System::new(step_size)?;
    system.add_body(Body::new(
        "Sun",
        SOLAR_MASS_KG,
        Vector3::zeros(),
        Vector3::zeros(),
        Length::from_solar_radii(1.0).to_meters(),
        BodyKind::Star,
    )?)?;
    system.add_body(Body::new(
        "Earth",
        EARTH_MASS_KG,
        Vector3::new(au, 0.0, 0.0),
        Vector3::new(0.0, circular_velocity(SOLAR_MASS_KG, au, G), 0.0),
        Length::from_earth_radii(1.0).to_meters(),
        BodyKind::Planet,
    )?)?;
    Ok(system)
}

fn main() {
    println!("Conservation vs Step Size (Sun-Earth, 1 year)\n");
    println!(
        "{:>10} {:>8} {:>14} {:>14} {:>14}  Valid",
        "Step (h)", "Steps", "Energy drift", "Momentum drift", "Angular drift"
    );

    let year = Time::from_years(1.0).to_seconds();
    for hours in [48.0, 24.0, 12.0, 6.0, 1.0] {
        let run = sun_earth(Time::from_hours(hours).to_seconds())
            .and_then(|mut system| system.simulate(year));
        match run {
            Ok(result) => {
                let c = result.conservation();
                println!(
                    "{:>10.0} {:>8} {:>14.3e} {:>14.3e} {:>14.3e}  {}",
                    hours,
                    result.steps_taken(),
                    c.energy_drift,
                    c.momentum_drift,
                    c.angular_momentum_drift,
                    result.is_physically_valid()
                );
            }
            Err(e) => println!("{:>10.0}  failed: {e}", hours),
        }
    }
}
