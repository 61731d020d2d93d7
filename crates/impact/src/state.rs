use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::forces::ForceModel;

/// Number of f64 slots each body occupies in a [`StateVector`]
pub const STRIDE: usize = 6;

/// Flattened joint state of every body: `[x₀, v₀, x₁, v₁, …]`.
///
/// Each body contributes three position components followed by three
/// velocity components, in insertion order. The integrator works on this
/// buffer alone; bodies only see the result once a whole step is committed.
///
/// # Examples
///
/// ```
/// use impact::body::{Body, BodyKind};
/// use impact::state::StateVector;
/// use nalgebra::Vector3;
///
/// let body = Body::new(
///     "beacon",
///     1.0,
///     Vector3::new(1.0, 2.0, 3.0),
///     Vector3::new(4.0, 5.0, 6.0),
///     0.0,
///     BodyKind::Satellite,
/// )
/// .unwrap();
///
/// let state = StateVector::from_bodies(&[body]);
/// assert_eq!(state.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(state.velocity(0), Vector3::new(4.0, 5.0, 6.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    data: Vec<f64>,
}

impl StateVector {
    /// A zeroed buffer for `n_bodies` bodies
    pub fn zeros(n_bodies: usize) -> Self {
        Self {
            data: vec![0.0; n_bodies * STRIDE],
        }
    }

    /// Packs the bodies' current positions and velocities
    pub fn from_bodies(bodies: &[Body]) -> Self {
        let data = bodies
            .iter()
            .flat_map(|body| body.position.iter().chain(body.velocity.iter()).copied())
            .collect();
        Self { data }
    }

    /// Writes positions and velocities back into the bodies
    pub fn apply_to(&self, bodies: &mut [Body]) {
        bodies.iter_mut().enumerate().for_each(|(i, body)| {
            body.position = self.position(i);
            body.velocity = self.velocity(i);
        });
    }

    pub fn body_count(&self) -> usize {
        self.data.len() / STRIDE
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn position(&self, i: usize) -> Vector3<f64> {
        let base = i * STRIDE;
        Vector3::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }

    pub fn velocity(&self, i: usize) -> Vector3<f64> {
        let base = i * STRIDE + 3;
        Vector3::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }

    pub fn set_position(&mut self, i: usize, position: &Vector3<f64>) {
        let base = i * STRIDE;
        self.data[base..base + 3].copy_from_slice(position.as_slice());
    }

    pub fn set_velocity(&mut self, i: usize, velocity: &Vector3<f64>) {
        let base = i * STRIDE + 3;
        self.data[base..base + 3].copy_from_slice(velocity.as_slice());
    }

    /// Returns `self + h·rate`, the stage input of a Runge-Kutta step
    pub fn offset(&self, rate: &StateVector, h: f64) -> StateVector {
        let data = self
            .data
            .iter()
            .zip(rate.data.iter())
            .map(|(y, k)| y + h * k)
            .collect();
        StateVector { data }
    }

    /// Combines four stage derivatives: `y + dt/6·(k1 + 2k2 + 2k3 + k4)`
    pub fn rk4_combine(
        &self,
        k1: &StateVector,
        k2: &StateVector,
        k3: &StateVector,
        k4: &StateVector,
        dt: f64,
    ) -> StateVector {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, y)| {
                y + dt / 6.0 * (k1.data[i] + 2.0 * k2.data[i] + 2.0 * k3.data[i] + k4.data[i])
            })
            .collect();
        StateVector { data }
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Indices of bodies whose slots contain NaN or infinity
    pub fn non_finite_bodies(&self) -> Vec<usize> {
        self.data
            .chunks(STRIDE)
            .enumerate()
            .filter(|(_, slots)| slots.iter().any(|v| !v.is_finite()))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Energy, momentum and angular momentum of the whole system at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConservationSnapshot {
    pub time: f64,               // s
    pub kinetic_energy: f64,     // J
    pub potential_energy: f64,   // J
    pub total_energy: f64,       // J
    pub momentum_magnitude: f64, // kg·m/s
    /// Σ m·|v|, the natural scale for the momentum magnitude
    pub momentum_scale: f64,
    /// |Σ m·(r − r_cm) × v| about the center of mass (kg·m²/s)
    pub angular_momentum: f64,
    /// Σ m·|r − r_cm|·|v|, the natural scale for the angular momentum
    pub angular_momentum_scale: f64,
}

impl ConservationSnapshot {
    /// Measures the conserved quantities of a packed state
    pub fn measure(time: f64, state: &StateVector, masses: &[f64], force: &dyn ForceModel) -> Self {
        let (kinetic_energy, momentum, momentum_scale) = masses.iter().enumerate().fold(
            (0.0, Vector3::zeros(), 0.0),
            |(ke, p, scale), (i, &m)| {
                let v = state.velocity(i);
                (
                    ke + 0.5 * m * v.norm_squared(),
                    p + v * m,
                    scale + m * v.norm(),
                )
            },
        );
        let potential_energy = force.potential_energy(state, masses);
        let (angular_momentum, angular_momentum_scale) = angular_momentum(state, masses);

        Self {
            time,
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
            momentum_magnitude: momentum.norm(),
            momentum_scale,
            angular_momentum: angular_momentum.norm(),
            angular_momentum_scale,
        }
    }

    /// Σ|KE| + |PE|, the natural scale for the total energy
    pub fn energy_scale(&self) -> f64 {
        self.kinetic_energy.abs() + self.potential_energy.abs()
    }
}

/// Mass-weighted mean position of a packed state, the origin when massless
pub fn center_of_mass(state: &StateVector, masses: &[f64]) -> Vector3<f64> {
    let total: f64 = masses.iter().sum();
    if total == 0.0 {
        return Vector3::zeros();
    }
    masses
        .iter()
        .enumerate()
        .fold(Vector3::zeros(), |acc, (i, &m)| acc + state.position(i) * m)
        / total
}

/// Total angular momentum about the center of mass, with its scale
fn angular_momentum(state: &StateVector, masses: &[f64]) -> (Vector3<f64>, f64) {
    let com = center_of_mass(state, masses);
    masses
        .iter()
        .enumerate()
        .fold((Vector3::zeros(), 0.0), |(l, scale), (i, &m)| {
            let r = state.position(i) - com;
            let v = state.velocity(i);
            (l + r.cross(&v) * m, scale + m * r.norm() * v.norm())
        })
}
