//! Asteroid on a collision course with Earth
//!
//! Sweeps the asteroid mass over four orders of magnitude and prints the
//! consequences of each impact, then the full report of the largest one.
//!
//! Run with: cargo run --package impact --example direct_impact
//! Set RUST_LOG=debug to see progress milestones.

use impact::report;
use impact::scenarios;
use tracing_subscriber::EnvFilter;
use units::{Length, Time};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Direct Impact: Mass Sweep\n");
    println!("{}", "=".repeat(60));
    println!(
        "{:>12} {:>10} {:>12} {:>12}  Severity",
        "Mass (kg)", "v (km/s)", "Yield (Mt)", "Crater (km)"
    );

    let duration = Time::from_days(1.0).to_seconds();
    let mut last = None;

    for mass in [1.0e9, 1.0e10, 1.0e11, 1.0e12, 1.0e13] {
        let mut system = match scenarios::direct_impact(mass, 20_000.0) {
            Ok(system) => system,
            Err(e) => {
                eprintln!("cannot build scenario: {e}");
                return;
            }
        };

        let result = match system.simulate(duration) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("simulation failed: {e}");
                return;
            }
        };

        match result.impact() {
            Some(impact) => println!(
                "{:>12.1e} {:>10.2} {:>12.3e} {:>12.2}  {}",
                mass,
                impact.impact_speed / 1000.0,
                impact.tnt_megatons,
                Length::from_meters(impact.crater_diameter).to_km(),
                impact.severity
            ),
            None => println!("{:>12.1e}  no collision", mass),
        }
        last = Some(result);
    }

    if let Some(result) = last {
        println!("\n{}", report::render(&result));
    }
}
