//! Close flyby of an Apophis-sized asteroid
//!
//! Integrates four days around perigee and prints the encounter geometry
//! sampled every six hours, followed by the run report.
//!
//! Run with: cargo run --package impact --example apophis_flyby

use impact::forces::G;
use impact::report;
use impact::scenarios::{self, OrbitClass};
use tracing_subscriber::EnvFilter;
use units::{Length, Time};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut system = match scenarios::apophis_flyby() {
        Ok(system) => system,
        Err(e) => {
            eprintln!("cannot build scenario: {e}");
            return;
        }
    };

    if let (Some(apophis), Some(earth)) = (system.body("Apophis"), system.body("Earth")) {
        println!("Apophis Flyby");
        println!("{}", "=".repeat(60));
        println!(
            "  Initial distance: {:.0} km",
            Length::from_meters(apophis.distance_to(earth)).to_km()
        );
        println!(
            "  Orbit relative to Earth: {:?}\n",
            OrbitClass::of(apophis, earth, G)
        );
    }

    let result = match system.simulate(Time::from_days(4.0).to_seconds()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            return;
        }
    };

    let (Some(apophis), Some(earth)) = (result.body("Apophis"), result.body("Earth")) else {
        return;
    };
    let every = (Time::from_hours(6.0).to_seconds() / result.step_size()) as usize;
    println!("{:>8} {:>14}", "Day", "Distance (km)");
    for (a, e) in apophis
        .history()
        .iter()
        .zip(earth.history())
        .step_by(every.max(1))
    {
        println!(
            "{:>8.2} {:>14.0}",
            Time::from_seconds(a.time).to_days(),
            Length::from_meters((a.position - e.position).norm()).to_km()
        );
    }

    println!("\n{}", report::render(&result));
}
