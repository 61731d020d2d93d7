//! Force models for encounter simulations
//!
//! This module provides the `ForceModel` trait and the direct Newtonian
//! gravity implementation used by the integrator.

use crate::state::StateVector;
use nalgebra::Vector3;
use thiserror::Error;

pub mod gravity;

#[cfg(test)]
mod gravity_test;

pub use gravity::DirectGravity;

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.67430e-11;

/// Two bodies occupy exactly the same point, so the inverse-square law has
/// no finite value. Indices refer to insertion order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("bodies {body_a} and {body_b} are at zero separation")]
pub struct SingularPair {
    pub body_a: usize,
    pub body_b: usize,
}

/// A source of acceleration on bodies
///
/// Force models read a packed [`StateVector`] together with the body masses
/// (kg, insertion order) and never touch the bodies themselves.
///
/// # Examples
///
/// ```
/// use impact::forces::{DirectGravity, ForceModel, G};
/// use impact::state::StateVector;
/// use nalgebra::Vector3;
///
/// let mut state = StateVector::zeros(2);
/// state.set_position(1, &Vector3::new(1.0, 0.0, 0.0));
/// let masses = [1.0, 1.0];
///
/// let gravity = DirectGravity::new();
/// let accel = gravity.acceleration(0, &state, &masses).unwrap();
///
/// // Pulled toward the other body along +x
/// assert_eq!(accel, Vector3::new(G, 0.0, 0.0));
/// ```
pub trait ForceModel: Send + Sync {
    /// Compute acceleration on the body at `idx` (m/s²)
    ///
    /// # Errors
    ///
    /// Returns [`SingularPair`] when the body coincides with another one.
    fn acceleration(
        &self,
        idx: usize,
        state: &StateVector,
        masses: &[f64],
    ) -> Result<Vector3<f64>, SingularPair>;

    /// Accelerations of every body, in insertion order
    fn accelerations(
        &self,
        state: &StateVector,
        masses: &[f64],
    ) -> Result<Vec<Vector3<f64>>, SingularPair> {
        (0..masses.len())
            .map(|i| self.acceleration(i, state, masses))
            .collect()
    }

    /// Potential energy of the whole configuration (J)
    ///
    /// Default implementation returns 0.0 for forces without a potential.
    fn potential_energy(&self, _state: &StateVector, _masses: &[f64]) -> f64 {
        0.0
    }
}
