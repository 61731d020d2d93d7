use std::path::PathBuf;

use approx::assert_relative_eq;
use impact::body::sphere_radius;
use impact::BodyKind;

use crate::scenario_file::ScenarioFile;

fn bundled(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

const MINIMAL: &str = r#"
duration_days: 2.0
bodies:
  - name: Sun
    kind: star
    mass: 1.989e30
    position: [0.0, 0.0, 0.0]
  - name: Rock
    mass: 1.0e12
    position: [1.496e11, 0.0, 0.0]
    velocity: [0.0, 29780.0, 0.0]
    density: 2000.0
"#;

#[test]
fn test_parse_fills_defaults() {
    let scenario = ScenarioFile::parse(MINIMAL).unwrap();

    assert_eq!(scenario.config.step_size, 3_600.0);
    assert_eq!(scenario.duration(), 2.0 * 86_400.0);
    assert_eq!(scenario.bodies.len(), 2);
    assert_eq!(scenario.bodies[0].kind, BodyKind::Star);
    assert_eq!(scenario.bodies[1].kind, BodyKind::Planet);
    assert_eq!(scenario.bodies[0].velocity, [0.0; 3]);
}

#[test]
fn test_build_derives_radius() {
    let system = ScenarioFile::parse(MINIMAL).unwrap().build().unwrap();

    assert_eq!(system.body_count(), 2);
    assert_eq!(system.body("Sun").unwrap().radius(), 0.0);
    assert_relative_eq!(
        system.body("Rock").unwrap().radius(),
        sphere_radius(1.0e12, 2000.0),
        max_relative = 1e-12
    );
}

#[test]
fn test_rejects_bad_input() {
    let bad_duration = MINIMAL.replace("duration_days: 2.0", "duration_days: 0.0");
    assert!(ScenarioFile::parse(&bad_duration).is_err());

    let bad_density = MINIMAL.replace("density: 2000.0", "density: -1.0");
    let err = ScenarioFile::parse(&bad_density).unwrap().build().unwrap_err();
    assert!(format!("{err:#}").contains("Rock"));

    let duplicate = MINIMAL.replace("name: Rock", "name: Sun");
    let err = ScenarioFile::parse(&duplicate).unwrap().build().unwrap_err();
    assert!(format!("{err:#}").contains("already registered"), "{err:#}");

    let bad_step = MINIMAL.replace(
        "duration_days: 2.0",
        "duration_days: 2.0\nconfig:\n  step_size: -1.0",
    );
    assert!(ScenarioFile::parse(&bad_step).unwrap().build().is_err());

    assert!(ScenarioFile::parse("bodies: []").is_err());
}

#[test]
fn test_bundled_impact_scenario() {
    let scenario = ScenarioFile::load(&bundled("chicxulub.yaml")).unwrap();
    let mut system = scenario.build().unwrap();

    let result = system.simulate(scenario.duration()).unwrap();

    assert!(result.collided());
    let impact = result.impact().unwrap();
    assert_eq!(impact.impactor, "Impactor");
    assert!(impact.tnt_megatons > 1.0e7, "{} Mt", impact.tnt_megatons);
}

#[test]
fn test_bundled_near_miss_scenario() {
    let scenario = ScenarioFile::load(&bundled("near_miss.yaml")).unwrap();
    let mut system = scenario.build().unwrap();

    let result = system.simulate(scenario.duration()).unwrap();

    assert!(!result.collided());
    let min = result.min_separation().unwrap();
    assert!(min.distance > 8.0e7 && min.distance < 1.01e8, "{}", min.distance);
    assert_eq!(result.close_approaches().len(), 1);
    assert!(result.is_physically_valid());
}

#[test]
fn test_missing_file_names_path() {
    let err = ScenarioFile::load(&bundled("does_not_exist.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.yaml"));
}
