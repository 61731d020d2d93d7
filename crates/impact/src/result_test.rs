use approx::assert_relative_eq;

use crate::result::{relative_drift, ConservationDiagnostics, DEGENERATE_FRACTION};
use crate::state::ConservationSnapshot;

fn snapshot(time: f64, total_energy: f64, momentum: f64) -> ConservationSnapshot {
    ConservationSnapshot {
        time,
        kinetic_energy: 1.0e30,
        potential_energy: total_energy - 1.0e30,
        total_energy,
        momentum_magnitude: momentum,
        momentum_scale: 1.0e29,
        angular_momentum: 4.4e40,
        angular_momentum_scale: 4.5e40,
    }
}

#[test]
fn test_relative_drift() {
    assert_relative_eq!(
        relative_drift(-2.0e33, -2.0e33 * (1.0 + 1e-8), 1.0),
        1e-8,
        max_relative = 1e-6
    );
    assert_eq!(relative_drift(5.0, 5.0, 100.0), 0.0);
    // Sign of the change does not matter
    assert_eq!(relative_drift(10.0, 9.0, 10.0), relative_drift(10.0, 11.0, 10.0));
}

#[test]
fn test_relative_drift_degenerate_denominator() {
    let scale = 1.0e29;
    let tiny = 0.5 * DEGENERATE_FRACTION * scale;

    assert_relative_eq!(
        relative_drift(tiny, tiny + 1.0e20, scale),
        1.0e20 / scale,
        max_relative = 1e-9
    );
    // Exactly at the cutoff the initial value is still used
    let cutoff = DEGENERATE_FRACTION * scale;
    assert_eq!(relative_drift(cutoff, 2.0 * cutoff, scale), 1.0);
}

#[test]
fn test_diagnostics_within_tolerance() {
    let initial = snapshot(0.0, -2.6e33, 1.8e29);
    let last = snapshot(86_400.0, -2.6e33 * (1.0 + 1e-9), 1.8e29);

    let diagnostics = ConservationDiagnostics::from_snapshots(&initial, &last, 1e-6);

    assert_eq!(diagnostics.initial_energy, -2.6e33);
    assert_eq!(diagnostics.momentum_drift, 0.0);
    assert!(diagnostics.energy_drift < 1e-8);
    assert!(diagnostics.energy_conserved());
    assert!(diagnostics.momentum_conserved());
    assert_eq!(diagnostics.initial_angular_momentum, 4.4e40);
    assert_eq!(diagnostics.angular_momentum_drift, 0.0);
    assert!(diagnostics.angular_momentum_conserved());
    assert!(diagnostics.is_physically_valid());
}

#[test]
fn test_diagnostics_flag_violations() {
    let initial = snapshot(0.0, -2.6e33, 1.8e29);

    let energy_off = snapshot(1.0, -2.6e33 * 1.01, 1.8e29);
    let diagnostics = ConservationDiagnostics::from_snapshots(&initial, &energy_off, 1e-6);
    assert!(!diagnostics.energy_conserved());
    assert!(diagnostics.momentum_conserved());
    assert!(!diagnostics.is_physically_valid());

    let momentum_off = snapshot(1.0, -2.6e33, 1.9e29);
    let diagnostics = ConservationDiagnostics::from_snapshots(&initial, &momentum_off, 1e-6);
    assert!(diagnostics.energy_conserved());
    assert!(!diagnostics.momentum_conserved());
    assert!(!diagnostics.is_physically_valid());

    let angular_off = ConservationSnapshot {
        angular_momentum: 4.4e40 * (1.0 + 1e-5),
        ..initial
    };
    let diagnostics = ConservationDiagnostics::from_snapshots(&initial, &angular_off, 1e-6);
    assert!(diagnostics.energy_conserved());
    assert!(diagnostics.momentum_conserved());
    assert_relative_eq!(diagnostics.final_angular_momentum, 4.4e40 * (1.0 + 1e-5));
    assert_relative_eq!(diagnostics.angular_momentum_drift, 1e-5, max_relative = 1e-6);
    assert!(!diagnostics.angular_momentum_conserved());
    assert!(!diagnostics.is_physically_valid());
}

#[test]
fn test_angular_momentum_drift_from_zero_uses_scale() {
    // Head-on fall: no initial angular momentum
    let initial = ConservationSnapshot {
        angular_momentum: 0.0,
        ..snapshot(0.0, -2.6e33, 1.8e29)
    };
    let last = ConservationSnapshot {
        angular_momentum: 4.5e30,
        ..snapshot(1.0, -2.6e33, 1.8e29)
    };

    let diagnostics = ConservationDiagnostics::from_snapshots(&initial, &last, 1e-6);

    assert_relative_eq!(diagnostics.angular_momentum_drift, 1e-10, max_relative = 1e-9);
    assert!(diagnostics.angular_momentum_conserved());
}

#[test]
fn test_drift_equal_to_tolerance_fails() {
    let initial = snapshot(0.0, -1.0e6, 0.0);
    let last = snapshot(1.0, -1.0e6 - 1.0, 0.0);

    let diagnostics = ConservationDiagnostics::from_snapshots(&initial, &last, 1e-6);

    assert_eq!(diagnostics.energy_drift, 1e-6);
    assert!(!diagnostics.energy_conserved());
}
