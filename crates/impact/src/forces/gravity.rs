//! Direct N-body gravity (O(N²) implementation)

use crate::forces::{ForceModel, SingularPair, G};
use crate::state::StateVector;
use nalgebra::Vector3;

/// Direct O(N²) Newtonian gravity without softening
///
/// `a_i = Σ_{j≠i} G·m_j·(x_j − x_i)/|x_j − x_i|³`, summed over `j` in
/// insertion order so repeated runs produce bit-identical results. An exactly
/// zero separation is reported as [`SingularPair`] instead of being smoothed.
///
/// # Examples
///
/// ```
/// use impact::forces::{DirectGravity, ForceModel, G};
/// use impact::state::StateVector;
/// use nalgebra::Vector3;
///
/// let mut state = StateVector::zeros(2);
/// state.set_position(1, &Vector3::new(2.0, 0.0, 0.0));
/// let masses = [1.0, 3.0];
///
/// let gravity = DirectGravity::new();
/// assert_eq!(gravity.potential_energy(&state, &masses), -G * 3.0 / 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant (m³ kg⁻¹ s⁻²)
    pub g: f64,
}

impl DirectGravity {
    /// Creates direct gravity with the standard constant
    pub fn new() -> Self {
        Self { g: G }
    }

    /// Creates direct gravity with a custom gravitational constant
    pub fn with_constant(g: f64) -> Self {
        Self { g }
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn acceleration(
        &self,
        idx: usize,
        state: &StateVector,
        masses: &[f64],
    ) -> Result<Vector3<f64>, SingularPair> {
        let position = state.position(idx);

        masses
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .try_fold(Vector3::zeros(), |acc, (j, &m_j)| {
                let dr = state.position(j) - position;
                let r2 = dr.norm_squared();
                if r2 == 0.0 {
                    return Err(SingularPair {
                        body_a: idx.min(j),
                        body_b: idx.max(j),
                    });
                }
                let r = r2.sqrt();
                Ok(acc + dr * (self.g * m_j / (r2 * r)))
            })
    }

    fn potential_energy(&self, state: &StateVector, masses: &[f64]) -> f64 {
        // Each pair counted once
        masses
            .iter()
            .enumerate()
            .flat_map(|(i, &m_i)| {
                masses[i + 1..].iter().enumerate().map(move |(offset, &m_j)| {
                    let j = i + 1 + offset;
                    let r = (state.position(j) - state.position(i)).norm();
                    -self.g * m_i * m_j / r
                })
            })
            .sum()
    }
}

/// Gravitational acceleration at the surface of a sphere (m/s²)
///
/// # Examples
///
/// ```
/// use impact::forces::gravity::surface_gravity;
///
/// let g = surface_gravity(6.67430e-11, 5.972e24, 6.371e6);
/// assert!((g - 9.82).abs() < 0.01);
/// ```
pub fn surface_gravity(g: f64, mass: f64, radius: f64) -> f64 {
    g * mass / (radius * radius)
}
