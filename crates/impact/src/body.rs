use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use units::Mass;

use crate::error::{SimError, SimResult};

/// Classification tag for a body. Purely descriptive, it never changes the
/// dynamics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    #[default]
    Planet,
    Moon,
    Asteroid,
    Comet,
    Satellite,
    Other(String),
}

impl std::fmt::Display for BodyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyKind::Star => write!(f, "star"),
            BodyKind::Planet => write!(f, "planet"),
            BodyKind::Moon => write!(f, "moon"),
            BodyKind::Asteroid => write!(f, "asteroid"),
            BodyKind::Comet => write!(f, "comet"),
            BodyKind::Satellite => write!(f, "satellite"),
            BodyKind::Other(label) => write!(f, "{label}"),
        }
    }
}

/// One entry of a body's trajectory history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,              // s
    pub position: Vector3<f64>, // m
    pub velocity: Vector3<f64>, // m/s
}

/// A celestial body in SI units (kg, m, m/s).
///
/// Name, mass, radius and kind are fixed at construction. Position and
/// velocity are advanced by the [`System`](crate::system::System) that owns
/// the body, which also appends to the trajectory history once per step.
///
/// # Examples
///
/// ```
/// use impact::body::{Body, BodyKind};
/// use nalgebra::Vector3;
///
/// let rock = Body::new(
///     "2024 XQ",
///     1.0e10,
///     Vector3::new(1.0e8, 0.0, 0.0),
///     Vector3::new(-2.0e4, 0.0, 0.0),
///     100.0,
///     BodyKind::Asteroid,
/// )
/// .unwrap();
///
/// assert_eq!(rock.kinetic_energy(), 0.5 * 1.0e10 * 4.0e8);
/// assert!(rock.history().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    name: String,
    mass: f64,   // kg
    radius: f64, // m (physical radius for contact detection)
    kind: BodyKind,
    pub(crate) position: Vector3<f64>, // m
    pub(crate) velocity: Vector3<f64>, // m/s
    history: Vec<TrajectorySample>,
}

impl Body {
    /// Creates a validated body with an empty trajectory history.
    ///
    /// # Errors
    ///
    /// * [`SimError::EmptyName`] for an empty (or all-whitespace) name
    /// * [`SimError::InvalidMass`] unless the mass is finite and positive
    /// * [`SimError::InvalidRadius`] unless the radius is finite and non-negative
    /// * [`SimError::NonFiniteState`] for any NaN or infinite component
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        radius: f64,
        kind: BodyKind,
    ) -> SimResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SimError::EmptyName);
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { name, mass });
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(SimError::InvalidRadius { name, radius });
        }
        if !position.iter().all(|c| c.is_finite()) {
            return Err(SimError::NonFiniteState {
                name,
                field: "position",
            });
        }
        if !velocity.iter().all(|c| c.is_finite()) {
            return Err(SimError::NonFiniteState {
                name,
                field: "velocity",
            });
        }

        Ok(Body {
            name,
            mass,
            radius,
            kind,
            position,
            velocity,
            history: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Trajectory samples in time order, starting with the initial state
    pub fn history(&self) -> &[TrajectorySample] {
        &self.history
    }

    /// Appends the current state to the trajectory history
    pub(crate) fn record(&mut self, time: f64) {
        self.history.push(TrajectorySample {
            time,
            position: self.position,
            velocity: self.velocity,
        });
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).norm()
    }

    /// Velocity of `other` as seen from this body
    pub fn relative_velocity(&self, other: &Body) -> Vector3<f64> {
        other.velocity - self.velocity
    }

    /// Angular momentum m·(r − reference) × v about a reference point
    pub fn angular_momentum(&self, reference: &Vector3<f64>) -> Vector3<f64> {
        self.specific_angular_momentum(reference) * self.mass
    }

    /// (r − reference) × v, not multiplied by mass
    pub fn specific_angular_momentum(&self, reference: &Vector3<f64>) -> Vector3<f64> {
        (self.position - reference).cross(&self.velocity)
    }

    /// Volume of the body treated as a sphere (m³)
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3)
    }

    /// Bulk density in kg/m³, `None` for point masses
    pub fn density(&self) -> Option<f64> {
        if self.radius > 0.0 {
            Some(self.mass / self.volume())
        } else {
            None
        }
    }
}

/// Radius of a uniform sphere with the given mass and density.
///
/// Inverse of [`Mass::of_sphere`], used to size impactors when only their
/// mass is known.
pub fn sphere_radius(mass_kg: f64, density_kg_m3: f64) -> f64 {
    let unit_sphere = Mass::of_sphere(1.0, density_kg_m3).to_kg();
    (mass_kg / unit_sphere).cbrt()
}
