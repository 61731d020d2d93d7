//! Ready-to-run encounter scenarios
//!
//! Each builder returns a fresh [`System`] with its bodies registered. The
//! Sun sits at the origin at rest and planets start on circular heliocentric
//! orbits in the x-y plane, so the setups are simple but not barycentric.

use std::str::FromStr;

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use units::{Length, Time, EARTH_MASS_KG, MOON_MASS_KG, MOON_RADIUS_M, SOLAR_MASS_KG};

use crate::body::{sphere_radius, Body, BodyKind};
use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};
use crate::forces::G;
use crate::system::System;

/// Distance between Earth and Moon (m)
pub const EARTH_MOON_DISTANCE: f64 = 3.844e8;

/// Density assumed for stony asteroids (kg/m³)
pub const ASTEROID_DENSITY: f64 = 3000.0;

/// Speed of a circular orbit of radius `distance` around `central_mass`
///
/// # Examples
///
/// ```
/// use impact::forces::G;
/// use impact::scenarios::circular_velocity;
///
/// let v = circular_velocity(1.989e30, 1.496e11, G);
/// assert!((v - 29_785.0).abs() < 10.0);
/// ```
pub fn circular_velocity(central_mass: f64, distance: f64, g: f64) -> f64 {
    (g * central_mass / distance).sqrt()
}

/// Period of a circular orbit of radius `distance` around `central_mass` (s)
pub fn orbital_period(central_mass: f64, distance: f64, g: f64) -> f64 {
    2.0 * std::f64::consts::PI * (distance.powi(3) / (g * central_mass)).sqrt()
}

/// Speed needed to escape from `distance` around `central_mass`
pub fn escape_velocity(central_mass: f64, distance: f64, g: f64) -> f64 {
    (2.0 * g * central_mass / distance).sqrt()
}

/// Specific orbital energy `v²/2 − μ/r` of a relative state (J/kg)
pub fn specific_orbital_energy(
    relative_position: &Vector3<f64>,
    relative_velocity: &Vector3<f64>,
    mu: f64,
) -> f64 {
    0.5 * relative_velocity.norm_squared() - mu / relative_position.norm()
}

/// Shape of a two-body orbit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitClass {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

impl OrbitClass {
    /// Classifies by specific orbital energy; `|energy| <= tolerance` counts
    /// as parabolic
    pub fn from_energy(specific_energy: f64, tolerance: f64) -> Self {
        if specific_energy < -tolerance {
            OrbitClass::Elliptic
        } else if specific_energy > tolerance {
            OrbitClass::Hyperbolic
        } else {
            OrbitClass::Parabolic
        }
    }

    /// Orbit of `body` relative to `central`
    pub fn of(body: &Body, central: &Body, g: f64) -> Self {
        let mu = g * (central.mass() + body.mass());
        let energy = specific_orbital_energy(
            &(body.position() - central.position()),
            &(body.velocity() - central.velocity()),
            mu,
        );
        // Relative to the energy scale of the orbit
        let scale = mu / (body.position() - central.position()).norm();
        Self::from_energy(energy, 1e-9 * scale)
    }
}

fn sun() -> SimResult<Body> {
    Body::new(
        "Sun",
        SOLAR_MASS_KG,
        Vector3::zeros(),
        Vector3::zeros(),
        Length::from_solar_radii(1.0).to_meters(),
        BodyKind::Star,
    )
}

/// A planet on a circular orbit around the Sun, starting on the x axis
fn planet(name: &str, mass: f64, distance: f64, radius: f64) -> SimResult<Body> {
    let v = circular_velocity(SOLAR_MASS_KG, distance, G);
    Body::new(
        name,
        mass,
        Vector3::new(distance, 0.0, 0.0),
        Vector3::new(0.0, v, 0.0),
        radius,
        BodyKind::Planet,
    )
}

fn earth() -> SimResult<Body> {
    planet(
        "Earth",
        EARTH_MASS_KG,
        Length::from_au(1.0).to_meters(),
        Length::from_earth_radii(1.0).to_meters(),
    )
}

fn system_with(step_size: f64, bodies: Vec<Body>) -> SimResult<System> {
    let mut system = System::with_config(SimulationConfig::with_step_size(step_size))?;
    for body in bodies {
        system.add_body(body)?;
    }
    Ok(system)
}

/// Earth on its orbit and an asteroid aimed straight at it
///
/// The asteroid starts 20 Earth radii away, 15° off the Sun-Earth line, and
/// closes at `approach_speed` (m/s) relative to Earth. Its radius follows
/// from `asteroid_mass` at stony density. One-minute steps.
pub fn direct_impact(asteroid_mass: f64, approach_speed: f64) -> SimResult<System> {
    let earth = earth()?;
    let direction = {
        let angle = 15.0_f64.to_radians();
        Vector3::new(angle.cos(), angle.sin(), 0.0)
    };
    let start = Length::from_earth_radii(20.0).to_meters();

    let asteroid = Body::new(
        "Asteroid",
        asteroid_mass,
        earth.position() + direction * start,
        earth.velocity() - direction * approach_speed,
        sphere_radius(asteroid_mass, ASTEROID_DENSITY),
        BodyKind::Asteroid,
    )?;

    system_with(60.0, vec![sun()?, earth, asteroid])
}

/// Sun, Earth and Moon on circular orbits, one-hour steps
pub fn sun_earth_moon() -> SimResult<System> {
    let earth = earth()?;
    let moon_speed = circular_velocity(EARTH_MASS_KG, EARTH_MOON_DISTANCE, G);
    let moon = Body::new(
        "Moon",
        MOON_MASS_KG,
        earth.position() + Vector3::new(EARTH_MOON_DISTANCE, 0.0, 0.0),
        earth.velocity() + Vector3::new(0.0, moon_speed, 0.0),
        MOON_RADIUS_M,
        BodyKind::Moon,
    )?;

    system_with(Time::from_hours(1.0).to_seconds(), vec![sun()?, earth, moon])
}

/// Apophis-like flyby passing roughly 38 000 km from Earth's center
///
/// The asteroid starts two days before perigee on a hyperbolic path relative
/// to Earth (v∞ ≈ 5.84 km/s). Five-minute steps.
pub fn apophis_flyby() -> SimResult<System> {
    let earth = earth()?;
    let mu = G * EARTH_MASS_KG;

    let v_infinity = 5_840.0;
    let perigee = 3.8e7;
    let impact_parameter = perigee * (1.0 + 2.0 * mu / (perigee * v_infinity * v_infinity)).sqrt();
    let lead_time = Time::from_days(2.0).to_seconds();

    let offset = Vector3::new(v_infinity * lead_time, impact_parameter, 0.0);
    let apophis = Body::new(
        "Apophis",
        6.1e10,
        earth.position() + offset,
        earth.velocity() + Vector3::new(-v_infinity, 0.0, 0.0),
        185.0,
        BodyKind::Asteroid,
    )?;

    system_with(300.0, vec![sun()?, earth, apophis])
}

/// Sun with Mercury, Venus, Earth, Mars and Jupiter, two-hour steps
pub fn inner_solar_system() -> SimResult<System> {
    let planets = [
        ("Mercury", 3.301e23, 0.39, 2.4397e6),
        ("Venus", 4.867e24, 0.72, 6.0518e6),
        ("Earth", EARTH_MASS_KG, 1.0, Length::from_earth_radii(1.0).to_meters()),
        ("Mars", 6.39e23, 1.52, 3.3895e6),
        ("Jupiter", 1.898e27, 5.2, 6.9911e7),
    ];

    let mut bodies = vec![sun()?];
    for (name, mass, distance_au, radius) in planets {
        bodies.push(planet(name, mass, Length::from_au(distance_au).to_meters(), radius)?);
    }
    system_with(Time::from_hours(2.0).to_seconds(), bodies)
}

/// Sun and Earth on a circular orbit, the simplest conservation check
pub fn conservation_test() -> SimResult<System> {
    system_with(Time::from_hours(1.0).to_seconds(), vec![sun()?, earth()?])
}

/// Sun, Earth and one custom asteroid with the given state
///
/// The radius follows from `mass` and `density` (kg/m³). Fifteen-minute
/// steps.
pub fn custom_asteroid(
    name: &str,
    mass: f64,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    density: f64,
) -> SimResult<System> {
    if !(density.is_finite() && density > 0.0) {
        return Err(SimError::InvalidConfig(format!(
            "asteroid density must be finite and > 0, got {density}"
        )));
    }
    let asteroid = Body::new(
        name,
        mass,
        position,
        velocity,
        sphere_radius(mass, density),
        BodyKind::Asteroid,
    )?;
    system_with(900.0, vec![sun()?, earth()?, asteroid])
}

/// Sun, Earth and `count` asteroids beyond Earth's orbit
///
/// Asteroid `i` orbits at `1.2 + 0.3·i` AU with mass `10¹⁰·(1 + i)` kg. A
/// seeded generator perturbs phase, speed and inclination, so the same
/// seed always yields the same system. One-hour steps.
pub fn multi_asteroid(count: usize, seed: u64) -> SimResult<System> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut bodies = vec![sun()?, earth()?];

    for i in 0..count {
        let distance = Length::from_au(1.2 + 0.3 * i as f64).to_meters();
        let phase = 2.0 * std::f64::consts::PI * i as f64 / count as f64
            + rng.random_range(-0.05..0.05);
        let inclination: f64 = rng.random_range(-0.02..0.02);
        let speed = circular_velocity(SOLAR_MASS_KG, distance, G) * rng.random_range(0.97..1.03);
        let mass = 1.0e10 * (1.0 + i as f64);

        let position = Vector3::new(
            distance * phase.cos(),
            distance * phase.sin() * inclination.cos(),
            distance * phase.sin() * inclination.sin(),
        );
        let velocity = Vector3::new(
            -speed * phase.sin(),
            speed * phase.cos() * inclination.cos(),
            speed * phase.cos() * inclination.sin(),
        );

        bodies.push(Body::new(
            format!("Asteroid {}", i + 1),
            mass,
            position,
            velocity,
            sphere_radius(mass, ASTEROID_DENSITY),
            BodyKind::Asteroid,
        )?);
    }

    system_with(Time::from_hours(1.0).to_seconds(), bodies)
}

/// Named scenarios with default parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    DirectImpact,
    SunEarthMoon,
    ApophisFlyby,
    InnerSolarSystem,
    ConservationTest,
    MultiAsteroid,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[
            Preset::DirectImpact,
            Preset::SunEarthMoon,
            Preset::ApophisFlyby,
            Preset::InnerSolarSystem,
            Preset::ConservationTest,
            Preset::MultiAsteroid,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::DirectImpact => "direct-impact",
            Preset::SunEarthMoon => "sun-earth-moon",
            Preset::ApophisFlyby => "apophis",
            Preset::InnerSolarSystem => "solar-system",
            Preset::ConservationTest => "conservation",
            Preset::MultiAsteroid => "multi-asteroid",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::DirectImpact => "10^11 kg asteroid on a collision course with Earth",
            Preset::SunEarthMoon => "Sun, Earth and Moon on circular orbits",
            Preset::ApophisFlyby => "Apophis-like close flyby of Earth",
            Preset::InnerSolarSystem => "Sun with Mercury through Jupiter",
            Preset::ConservationTest => "Sun and Earth, for energy and momentum checks",
            Preset::MultiAsteroid => "Sun, Earth and three seeded asteroids",
        }
    }

    /// Suggested simulation horizon (s)
    pub fn default_duration(&self) -> f64 {
        match self {
            Preset::DirectImpact => Time::from_days(1.0).to_seconds(),
            Preset::SunEarthMoon => Time::from_days(27.3).to_seconds(),
            Preset::ApophisFlyby => Time::from_days(4.0).to_seconds(),
            Preset::InnerSolarSystem => Time::from_years(1.0).to_seconds(),
            Preset::ConservationTest => Time::from_years(1.0).to_seconds(),
            Preset::MultiAsteroid => Time::from_years(1.0).to_seconds(),
        }
    }

    /// Builds the preset's system
    pub fn build(&self) -> SimResult<System> {
        match self {
            Preset::DirectImpact => direct_impact(1.0e11, 20_000.0),
            Preset::SunEarthMoon => sun_earth_moon(),
            Preset::ApophisFlyby => apophis_flyby(),
            Preset::InnerSolarSystem => inner_solar_system(),
            Preset::ConservationTest => conservation_test(),
            Preset::MultiAsteroid => multi_asteroid(3, 42),
        }
    }
}

impl FromStr for Preset {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::all()
            .iter()
            .copied()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Preset::all().iter().map(Preset::name).collect();
                SimError::InvalidConfig(format!(
                    "unknown scenario '{s}', available: {}",
                    known.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds a preset system by name
///
/// # Examples
///
/// ```
/// use impact::scenarios;
///
/// let system = scenarios::by_name("conservation").unwrap();
/// assert_eq!(system.body_count(), 2);
/// assert!(scenarios::by_name("no-such-scenario").is_err());
/// ```
pub fn by_name(name: &str) -> SimResult<System> {
    name.parse::<Preset>()?.build()
}
