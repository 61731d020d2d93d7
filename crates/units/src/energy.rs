use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Energy released by one kiloton of TNT, in joules
pub const KILOTON_TNT_J: f64 = 4.184e12;
/// Energy released by one megaton of TNT, in joules
pub const MEGATON_TNT_J: f64 = 4.184e15;

/// A physical energy quantity using f64 precision.
///
/// The `Energy` struct represents energy with joules as the base unit.
/// Impact energies are conventionally quoted as TNT equivalents, so the
/// kiloton and megaton conversions are provided alongside.
///
/// # Examples
///
/// ```rust
/// use units::Energy;
///
/// // Roughly the Tunguska event
/// let tunguska = Energy::from_megatons(12.0);
/// assert!(tunguska.to_joules() > 5.0e16);
///
/// let e = Energy::from_joules(4.184e15);
/// assert_eq!(e.to_megatons(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Energy(f64); // Base unit: joules

impl Energy {
    /// Creates a zero energy value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Energy` from a value in joules.
    pub fn from_joules(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Energy` from kilotons of TNT.
    pub fn from_kilotons(value: f64) -> Self {
        Self(value * KILOTON_TNT_J)
    }

    /// Creates a new `Energy` from megatons of TNT.
    pub fn from_megatons(value: f64) -> Self {
        Self(value * MEGATON_TNT_J)
    }

    /// Kinetic energy ½·m·v² of a mass (kg) moving at a speed (m/s)
    pub fn kinetic(mass_kg: f64, speed_m_s: f64) -> Self {
        Self(0.5 * mass_kg * speed_m_s * speed_m_s)
    }

    /// Returns the energy in joules.
    pub fn to_joules(&self) -> f64 {
        self.0
    }

    /// Converts the energy to kilotons of TNT.
    pub fn to_kilotons(&self) -> f64 {
        self.0 / KILOTON_TNT_J
    }

    /// Converts the energy to megatons of TNT.
    pub fn to_megatons(&self) -> f64 {
        self.0 / MEGATON_TNT_J
    }
}

impl Add for Energy {
    type Output = Energy;

    fn add(self, rhs: Energy) -> Energy {
        Energy(self.0 + rhs.0)
    }
}

impl Sub for Energy {
    type Output = Energy;

    fn sub(self, rhs: Energy) -> Energy {
        Energy(self.0 - rhs.0)
    }
}

impl Mul<f64> for Energy {
    type Output = Energy;

    fn mul(self, rhs: f64) -> Energy {
        Energy(self.0 * rhs)
    }
}

impl Div<f64> for Energy {
    type Output = Energy;

    fn div(self, rhs: f64) -> Energy {
        Energy(self.0 / rhs)
    }
}

/// Division of Energy by Energy returns a dimensionless ratio
impl Div for Energy {
    type Output = f64;

    fn div(self, rhs: Energy) -> f64 {
        self.0 / rhs.0
    }
}
