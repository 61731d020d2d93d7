use approx::assert_relative_eq;
use nalgebra::Vector3;

use crate::forces::gravity::{surface_gravity, DirectGravity};
use crate::forces::{ForceModel, SingularPair, G};
use crate::state::StateVector;

const SUN: f64 = 1.989e30;
const EARTH: f64 = 5.972e24;
const AU: f64 = 1.496e11;

fn state_with_positions(positions: &[Vector3<f64>]) -> StateVector {
    let mut state = StateVector::zeros(positions.len());
    positions
        .iter()
        .enumerate()
        .for_each(|(i, p)| state.set_position(i, p));
    state
}

#[test]
fn test_acceleration_toward_sun() {
    let state = state_with_positions(&[Vector3::zeros(), Vector3::new(AU, 0.0, 0.0)]);
    let masses = [SUN, EARTH];

    let gravity = DirectGravity::new();
    let accel = gravity.acceleration(1, &state, &masses).unwrap();

    // Points back toward the Sun with magnitude GM/r²
    assert!(accel.x < 0.0);
    assert_eq!(accel.y, 0.0);
    assert_eq!(accel.z, 0.0);
    assert_relative_eq!(accel.norm(), G * SUN / (AU * AU), max_relative = 1e-12);
}

#[test]
fn test_pairwise_accelerations_balance() {
    let state = state_with_positions(&[
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(AU, 0.0, 0.0),
        Vector3::new(0.0, 2.0 * AU, 1.0e9),
    ]);
    let masses = [SUN, EARTH, 1.0e27];

    let accelerations = DirectGravity::new().accelerations(&state, &masses).unwrap();

    // Newton's third law: Σ m·a = 0
    let net: Vector3<f64> = accelerations
        .iter()
        .zip(masses.iter())
        .fold(Vector3::zeros(), |acc, (a, m)| acc + a * *m);
    let scale = masses[0] * accelerations[0].norm();
    assert!(net.norm() / scale < 1e-12, "net force {net:?}");
}

#[test]
fn test_middle_body_feels_both_neighbours() {
    let state = state_with_positions(&[
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::zeros(),
        Vector3::new(2.0, 0.0, 0.0),
    ]);
    let masses = [1.0, 1.0, 1.0];

    let accel = DirectGravity::new().acceleration(1, &state, &masses).unwrap();

    // Left neighbour at distance 1 wins over the right one at distance 2
    assert_relative_eq!(accel.x, -G + G / 4.0, max_relative = 1e-12);
}

#[test]
fn test_zero_separation_is_reported() {
    let state = state_with_positions(&[
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(5.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 1.0),
    ]);
    let masses = [1.0, 1.0, 1.0];
    let gravity = DirectGravity::new();

    assert_eq!(
        gravity.acceleration(2, &state, &masses),
        Err(SingularPair {
            body_a: 0,
            body_b: 2
        })
    );
    assert!(gravity.accelerations(&state, &masses).is_err());
    assert!(gravity.acceleration(1, &state, &masses).is_ok());
}

#[test]
fn test_potential_energy_sums_pairs_once() {
    let state = state_with_positions(&[
        Vector3::zeros(),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 2.0, 0.0),
    ]);
    let masses = [1.0, 2.0, 3.0];

    let pe = DirectGravity::new().potential_energy(&state, &masses);
    let expected = -G * (1.0 * 2.0 / 1.0 + 1.0 * 3.0 / 2.0 + 2.0 * 3.0 / 5.0_f64.sqrt());
    assert_relative_eq!(pe, expected, max_relative = 1e-12);
}

#[test]
fn test_custom_constant_scales_linearly() {
    let state = state_with_positions(&[Vector3::zeros(), Vector3::new(3.0, 0.0, 0.0)]);
    let masses = [2.0, 2.0];

    let standard = DirectGravity::new().acceleration(0, &state, &masses).unwrap();
    let doubled = DirectGravity::with_constant(2.0 * G)
        .acceleration(0, &state, &masses)
        .unwrap();
    assert_relative_eq!(doubled.x, 2.0 * standard.x, max_relative = 1e-12);
}

#[test]
fn test_surface_gravity_of_earth() {
    assert_relative_eq!(surface_gravity(G, EARTH, 6.371e6), 9.82, epsilon = 0.01);
}
