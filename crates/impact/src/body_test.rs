use approx::assert_relative_eq;
use nalgebra::Vector3;

use crate::body::{sphere_radius, Body, BodyKind};
use crate::error::SimError;

fn rock(mass: f64, position: Vector3<f64>, velocity: Vector3<f64>) -> Body {
    Body::new("rock", mass, position, velocity, 10.0, BodyKind::Asteroid).unwrap()
}

#[test]
fn test_new_keeps_fields_and_starts_without_history() {
    let body = Body::new(
        "Earth",
        5.972e24,
        Vector3::new(1.496e11, 0.0, 0.0),
        Vector3::new(0.0, 29_780.0, 0.0),
        6.371e6,
        BodyKind::Planet,
    )
    .unwrap();

    assert_eq!(body.name(), "Earth");
    assert_eq!(body.mass(), 5.972e24);
    assert_eq!(body.radius(), 6.371e6);
    assert_eq!(body.kind(), &BodyKind::Planet);
    assert_eq!(body.position(), Vector3::new(1.496e11, 0.0, 0.0));
    assert!(body.history().is_empty());
}

#[test]
fn test_new_rejects_empty_name() {
    let result = Body::new("  ", 1.0, Vector3::zeros(), Vector3::zeros(), 0.0, BodyKind::Planet);
    assert_eq!(result, Err(SimError::EmptyName));
}

#[test]
fn test_new_rejects_bad_mass() {
    for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = Body::new("x", mass, Vector3::zeros(), Vector3::zeros(), 1.0, BodyKind::Planet);
        assert!(
            matches!(result, Err(SimError::InvalidMass { .. })),
            "mass {mass} should be rejected"
        );
    }
}

#[test]
fn test_new_rejects_bad_radius() {
    for radius in [-1.0, f64::NAN, f64::INFINITY] {
        let result = Body::new("x", 1.0, Vector3::zeros(), Vector3::zeros(), radius, BodyKind::Planet);
        assert!(matches!(result, Err(SimError::InvalidRadius { .. })));
    }

    // Point masses are allowed
    assert!(Body::new("x", 1.0, Vector3::zeros(), Vector3::zeros(), 0.0, BodyKind::Planet).is_ok());
}

#[test]
fn test_new_rejects_non_finite_state() {
    let result = Body::new(
        "x",
        1.0,
        Vector3::new(f64::NAN, 0.0, 0.0),
        Vector3::zeros(),
        1.0,
        BodyKind::Planet,
    );
    assert_eq!(
        result,
        Err(SimError::NonFiniteState {
            name: "x".to_string(),
            field: "position"
        })
    );

    let result = Body::new(
        "x",
        1.0,
        Vector3::zeros(),
        Vector3::new(0.0, f64::INFINITY, 0.0),
        1.0,
        BodyKind::Planet,
    );
    assert!(matches!(
        result,
        Err(SimError::NonFiniteState {
            field: "velocity",
            ..
        })
    ));
}

#[test]
fn test_momentum() {
    let body = rock(2.0, Vector3::zeros(), Vector3::new(3.0, 4.0, 0.0));
    assert_eq!(body.momentum(), Vector3::new(6.0, 8.0, 0.0));
}

#[test]
fn test_kinetic_energy() {
    let body = rock(2.0, Vector3::zeros(), Vector3::new(3.0, 4.0, 0.0));

    // KE = 0.5 * m * v², v² = 25
    assert_eq!(body.kinetic_energy(), 25.0);
    assert_eq!(body.speed(), 5.0);
}

#[test]
fn test_distance_and_relative_velocity() {
    let a = rock(1.0, Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    let b = rock(1.0, Vector3::new(3.0, 4.0, 12.0), Vector3::new(0.0, 2.0, 0.0));

    assert_eq!(a.distance_to(&b), 13.0);
    assert_eq!(a.distance_to(&b), b.distance_to(&a));
    assert_eq!(a.relative_velocity(&b), Vector3::new(-1.0, 2.0, 0.0));
}

#[test]
fn test_angular_momentum_about_reference() {
    let body = rock(2.0, Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));

    assert_eq!(
        body.specific_angular_momentum(&Vector3::zeros()),
        Vector3::new(0.0, 0.0, 1.0)
    );
    assert_eq!(
        body.angular_momentum(&Vector3::zeros()),
        Vector3::new(0.0, 0.0, 2.0)
    );

    // Measured about its own position the lever arm vanishes
    assert_eq!(
        body.angular_momentum(&Vector3::new(1.0, 0.0, 0.0)),
        Vector3::zeros()
    );
}

#[test]
fn test_density() {
    let body = Body::new(
        "ball",
        4.0 / 3.0 * std::f64::consts::PI * 3000.0,
        Vector3::zeros(),
        Vector3::zeros(),
        1.0,
        BodyKind::Asteroid,
    )
    .unwrap();
    assert_relative_eq!(body.density().unwrap(), 3000.0, epsilon = 1e-9);

    let point = Body::new("p", 1.0, Vector3::zeros(), Vector3::zeros(), 0.0, BodyKind::Other("lander".into())).unwrap();
    assert_eq!(point.density(), None);
}

#[test]
fn test_record_appends_samples() {
    let mut body = rock(1.0, Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
    body.record(0.0);
    body.position = Vector3::new(2.0, 2.0, 3.0);
    body.record(10.0);

    let history = body.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].time, 0.0);
    assert_eq!(history[0].position, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(history[1].time, 10.0);
    assert_eq!(history[1].position, Vector3::new(2.0, 2.0, 3.0));
}

#[test]
fn test_sphere_radius_inverts_sphere_mass() {
    let mass = units::Mass::of_sphere(150.0, 3000.0).to_kg();
    assert_relative_eq!(sphere_radius(mass, 3000.0), 150.0, max_relative = 1e-12);
}

#[test]
fn test_kind_display() {
    assert_eq!(BodyKind::Asteroid.to_string(), "asteroid");
    assert_eq!(BodyKind::Other("lander".into()).to_string(), "lander");
    assert_eq!(BodyKind::default(), BodyKind::Planet);
}
