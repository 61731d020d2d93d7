//! Plain-text summary of a simulation result

use std::fmt;

use units::{Length, Time};

use crate::result::SimulationResult;

const WIDTH: usize = 70;

/// Renders a human-readable report of a finished run
///
/// Sections: timing, minimum approach, close approaches, collision (or its
/// absence) and physical validation. The result is only read.
///
/// # Examples
///
/// ```
/// use impact::report;
/// use impact::scenarios;
///
/// let mut system = scenarios::direct_impact(1.0e10, 20_000.0).unwrap();
/// let result = system.simulate(2.0 * 86_400.0).unwrap();
///
/// let text = report::render(&result);
/// assert!(text.contains("COLLISION DETECTED"));
/// assert!(text.contains("PHYSICAL VALIDATION"));
/// ```
pub fn render(result: &SimulationResult) -> String {
    result.to_string()
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self)
    }
}

fn write_report(out: &mut fmt::Formatter<'_>, result: &SimulationResult) -> fmt::Result {
    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out, "{:^WIDTH$}", "ENCOUNTER SIMULATION REPORT")?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out)?;

    let simulated = Time::from_seconds(result.simulated_time());
    writeln!(out, "TIMING:")?;
    writeln!(
        out,
        "  Simulated time: {:.4} years ({:.2} days)",
        simulated.to_years(),
        simulated.to_days()
    )?;
    writeln!(
        out,
        "  Requested duration: {:.2} days",
        Time::from_seconds(result.requested_duration()).to_days()
    )?;
    writeln!(
        out,
        "  Steps: {} of {:.0} s",
        result.steps_taken(),
        result.step_size()
    )?;
    writeln!(out)?;

    writeln!(out, "MINIMUM APPROACH:")?;
    match result.min_separation() {
        Some(min) => {
            let distance = Length::from_meters(min.distance);
            writeln!(out, "  Bodies: {} / {}", min.body_a, min.body_b)?;
            writeln!(out, "  Distance: {:.2} km", distance.to_km())?;
            writeln!(
                out,
                "  Surface distance: {:.2} km",
                Length::from_meters(min.surface_distance).to_km()
            )?;
            writeln!(out, "  Earth radii: {:.2}", distance.to_earth_radii())?;
            writeln!(
                out,
                "  Time: {:.4} years",
                Time::from_seconds(min.time).to_years()
            )?;
            writeln!(
                out,
                "  Relative speed: {:.2} km/s",
                min.relative_speed / 1000.0
            )?;
            writeln!(
                out,
                "  Impact parameter: {:.2} km",
                Length::from_meters(min.impact_parameter).to_km()
            )?;
        }
        None => writeln!(out, "  No steps were taken")?,
    }
    writeln!(out)?;

    if !result.close_approaches().is_empty() {
        writeln!(out, "CLOSE APPROACHES:")?;
        for approach in result.close_approaches() {
            writeln!(
                out,
                "  {} / {}: {:.2} km at {:.4} days (entered at {:.4} days, {:.2} km/s, b = {:.2} km)",
                approach.body_a,
                approach.body_b,
                Length::from_meters(approach.min_distance).to_km(),
                Time::from_seconds(approach.time_of_min).to_days(),
                Time::from_seconds(approach.entered_at).to_days(),
                approach.relative_speed / 1000.0,
                Length::from_meters(approach.impact_parameter).to_km()
            )?;
        }
        writeln!(out)?;
    }

    match (result.collision(), result.impact()) {
        (Some(event), Some(impact)) => {
            writeln!(out, "COLLISION DETECTED!")?;
            writeln!(out, "  Bodies: {} / {}", event.body_a, event.body_b)?;
            writeln!(
                out,
                "  Impact time: {:.4} days (contact at {:.4} days, step {})",
                Time::from_seconds(event.time).to_days(),
                Time::from_seconds(event.contact_time).to_days(),
                event.step
            )?;
            writeln!(
                out,
                "  Impactor: {} hitting {}",
                impact.impactor, impact.target
            )?;
            writeln!(
                out,
                "  Impact speed: {:.2} km/s",
                impact.impact_speed / 1000.0
            )?;
            writeln!(out, "  Impact angle: {:.2}°", impact.impact_angle)?;
            writeln!(
                out,
                "  Impact energy: {:.2e} J",
                impact.energy.to_joules()
            )?;
            writeln!(out, "  TNT equivalent: {:.2e} megatons", impact.tnt_megatons)?;
            writeln!(
                out,
                "  Crater radius: {:.2} km ({} crater)",
                Length::from_meters(impact.crater_radius).to_km(),
                impact.regime
            )?;
            writeln!(
                out,
                "  Crater depth: {:.2} km",
                Length::from_meters(impact.crater_depth).to_km()
            )?;
            writeln!(
                out,
                "  Severity: {} ({})",
                impact.severity,
                impact.severity.description()
            )?;
        }
        _ => writeln!(out, "No collision detected")?,
    }
    writeln!(out)?;

    let conservation = result.conservation();
    writeln!(out, "PHYSICAL VALIDATION:")?;
    writeln!(out, "  Initial energy: {:.6e} J", conservation.initial_energy)?;
    writeln!(out, "  Final energy: {:.6e} J", conservation.final_energy)?;
    writeln!(out, "  Energy drift: {:.2e}", conservation.energy_drift)?;
    writeln!(out, "  Momentum drift: {:.2e}", conservation.momentum_drift)?;
    writeln!(
        out,
        "  Initial angular momentum: {:.6e} kg·m²/s",
        conservation.initial_angular_momentum
    )?;
    writeln!(
        out,
        "  Final angular momentum: {:.6e} kg·m²/s",
        conservation.final_angular_momentum
    )?;
    writeln!(
        out,
        "  Angular momentum drift: {:.2e}",
        conservation.angular_momentum_drift
    )?;
    writeln!(out, "  Tolerance: {:.1e}", conservation.tolerance)?;
    if conservation.is_physically_valid() {
        writeln!(out, "  All conserved quantities within tolerance")?;
    } else {
        if !conservation.energy_conserved() {
            writeln!(out, "  Warning: energy conservation violated")?;
        }
        if !conservation.momentum_conserved() {
            writeln!(out, "  Warning: momentum conservation violated")?;
        }
        if !conservation.angular_momentum_conserved() {
            writeln!(out, "  Warning: angular momentum conservation violated")?;
        }
    }
    writeln!(out)?;
    write!(out, "{}", "=".repeat(WIDTH))?;

    Ok(())
}

