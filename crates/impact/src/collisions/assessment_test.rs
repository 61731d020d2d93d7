use approx::assert_relative_eq;
use nalgebra::Vector3;
use units::MEGATON_TNT_J;

use crate::body::{Body, BodyKind};
use crate::collisions::assessment::*;
use crate::error::SimError;
use crate::forces::G;

fn earth() -> Body {
    Body::new(
        "Earth",
        5.972e24,
        Vector3::zeros(),
        Vector3::zeros(),
        6.371e6,
        BodyKind::Planet,
    )
    .unwrap()
}

fn asteroid(mass: f64, radius: f64) -> Body {
    Body::new(
        "Impactor",
        mass,
        Vector3::new(6.4e6, 0.0, 0.0),
        Vector3::zeros(),
        radius,
        BodyKind::Asteroid,
    )
    .unwrap()
}

#[test]
fn test_severity_thresholds_from_the_top() {
    let thresholds = SeverityThresholds::default();

    assert_eq!(thresholds.classify(2.0e5), Severity::Global);
    assert_eq!(thresholds.classify(1.0e5), Severity::Global);
    assert_eq!(thresholds.classify(5.0e3), Severity::Continental);
    assert_eq!(thresholds.classify(50.0), Severity::Regional);
    assert_eq!(thresholds.classify(0.5), Severity::Local);
    assert_eq!(thresholds.classify(0.001), Severity::Negligible);
    assert!(Severity::Global > Severity::Local);
}

#[test]
fn test_crater_regime_from_radius() {
    assert_eq!(CraterRegime::from_radius(500.0), CraterRegime::Simple);
    assert_eq!(CraterRegime::from_radius(2.0e3), CraterRegime::Simple);
    assert_eq!(CraterRegime::from_radius(10.0e3), CraterRegime::LargeSimple);
    assert_eq!(CraterRegime::from_radius(80.0e3), CraterRegime::Complex);
}

#[test]
fn test_crater_scaling_law() {
    let model = ImpactModel::default();
    let d = 100.0;
    let v = 20_000.0;

    let diameter = model.crater_diameter(d, 3000.0, v, 9.81);
    let expected = 1.8 * (3000.0_f64 / 2700.0).cbrt() * d * (v * v / (9.81 * d)).powf(0.22);
    assert_relative_eq!(diameter, expected, max_relative = 1e-12);

    // Faster and denser impactors dig bigger craters
    assert!(model.crater_diameter(d, 3000.0, 2.0 * v, 9.81) > diameter);
    assert!(model.crater_diameter(d, 8000.0, v, 9.81) > diameter);
    assert_eq!(model.crater_diameter(0.0, 3000.0, v, 9.81), 0.0);
}

#[test]
fn test_impact_angle_geometry() {
    let offset = Vector3::new(0.0, 0.0, 2.0);

    assert_eq!(impact_angle(&Vector3::new(0.0, 0.0, -3.0), &offset), 90.0);

    let oblique = impact_angle(&Vector3::new(1.0, 0.0, -1.0), &offset);
    assert_relative_eq!(oblique, 45.0, epsilon = 1e-9);

    assert_eq!(impact_angle(&Vector3::zeros(), &offset), 90.0);
}

#[test]
fn test_assess_head_on_impact() {
    let model = ImpactModel::default();
    let target = earth();
    let impactor = asteroid(1.0e12, 430.0);
    let velocity = Vector3::new(-20_000.0, 0.0, 0.0);
    let offset = Vector3::new(6.371e6, 0.0, 0.0);

    let metrics = model.assess(&impactor, &target, &velocity, &offset, G);

    assert_eq!(metrics.impactor, "Impactor");
    assert_eq!(metrics.target, "Earth");
    assert_eq!(metrics.impact_speed, 20_000.0);
    assert_eq!(metrics.impact_angle, 90.0);
    assert_eq!(metrics.impactor_diameter, 860.0);
    assert_relative_eq!(metrics.energy.to_joules(), 0.5 * 1.0e12 * 4.0e8);
    assert_relative_eq!(metrics.tnt_megatons, 2.0e20 / MEGATON_TNT_J, max_relative = 1e-12);
    assert_eq!(metrics.severity, Severity::Continental);

    // Surface gravity comes from the target when not configured
    assert_relative_eq!(metrics.surface_gravity, G * 5.972e24 / 6.371e6_f64.powi(2));
    assert_relative_eq!(metrics.crater_radius, metrics.crater_diameter / 2.0);
    assert_relative_eq!(metrics.crater_depth, metrics.crater_diameter * 0.2);
    assert_eq!(metrics.regime, CraterRegime::from_radius(metrics.crater_radius));
}

#[test]
fn test_assess_point_mass_impactor_uses_default_density() {
    let model = ImpactModel {
        surface_gravity: Some(3.7),
        ..ImpactModel::default()
    };
    let impactor = asteroid(units::Mass::of_sphere(50.0, 3000.0).to_kg(), 0.0);

    let metrics = model.assess(
        &impactor,
        &earth(),
        &Vector3::new(0.0, -15_000.0, 0.0),
        &Vector3::new(0.0, 6.371e6, 0.0),
        G,
    );

    assert_eq!(metrics.impactor_density, 3000.0);
    assert_relative_eq!(metrics.impactor_diameter, 100.0, max_relative = 1e-12);
    assert_eq!(metrics.surface_gravity, 3.7);
}

#[test]
fn test_validate_rejects_bad_coefficients() {
    assert!(ImpactModel::default().validate().is_ok());

    let model = ImpactModel {
        crater_exponent: -0.1,
        ..ImpactModel::default()
    };
    assert!(matches!(model.validate(), Err(SimError::InvalidConfig(_))));

    let model = ImpactModel {
        surface_gravity: Some(0.0),
        ..ImpactModel::default()
    };
    assert!(model.validate().is_err());

    let model = ImpactModel {
        severity: SeverityThresholds {
            regional: 5.0e3,
            ..SeverityThresholds::default()
        },
        ..ImpactModel::default()
    };
    assert!(model.validate().is_err());
}
