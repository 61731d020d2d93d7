//! Time integration for encounter simulations
//!
//! The integrator advances the packed [`StateVector`] by one fixed step. The
//! classical fourth-order Runge-Kutta method is used: it is not symplectic,
//! but over the days-to-years horizons of an encounter its energy error stays
//! far below the conservation tolerance at hour-scale steps.

use crate::forces::{ForceModel, SingularPair};
use crate::state::StateVector;

/// A fixed-step time integrator
///
/// Integrators are pure: they read the current state and return the next one,
/// leaving the caller to decide whether to commit it.
pub trait Integrator: Send + Sync {
    /// Advance the state by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Packed positions and velocities at the start of the step
    /// * `masses` - Body masses in kg, insertion order
    /// * `dt` - Timestep in seconds
    /// * `force` - Force model to compute accelerations
    ///
    /// # Errors
    ///
    /// Propagates [`SingularPair`] from any force evaluation.
    fn step(
        &self,
        state: &StateVector,
        masses: &[f64],
        dt: f64,
        force: &dyn ForceModel,
    ) -> Result<StateVector, SingularPair>;
}

/// Classical fourth-order Runge-Kutta integrator
///
/// Applied to the joint position+velocity state:
///
/// 1. k1 = f(y)
/// 2. k2 = f(y + dt/2·k1)
/// 3. k3 = f(y + dt/2·k2)
/// 4. k4 = f(y + dt·k3)
/// 5. y' = y + dt/6·(k1 + 2k2 + 2k3 + k4)
///
/// where `f` maps `[x₀, v₀, x₁, v₁, …]` to `[v₀, a₀, v₁, a₁, …]`.
///
/// # Examples
///
/// ```
/// use impact::forces::DirectGravity;
/// use impact::integrator::{Integrator, RungeKutta4};
/// use impact::state::StateVector;
/// use nalgebra::Vector3;
///
/// let mut state = StateVector::zeros(2);
/// state.set_position(1, &Vector3::new(1.0e7, 0.0, 0.0));
/// state.set_velocity(1, &Vector3::new(0.0, 1.0, 0.0));
/// let masses = [5.972e24, 1.0];
///
/// let next = RungeKutta4::new()
///     .step(&state, &masses, 60.0, &DirectGravity::new())
///     .unwrap();
///
/// // The light body falls toward the heavy one
/// assert!(next.position(1).x < 1.0e7);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl RungeKutta4 {
    pub fn new() -> Self {
        Self
    }

    /// Time derivative of the packed state
    fn derivative(
        state: &StateVector,
        masses: &[f64],
        force: &dyn ForceModel,
    ) -> Result<StateVector, SingularPair> {
        let accelerations = force.accelerations(state, masses)?;

        let mut rate = StateVector::zeros(state.body_count());
        accelerations.iter().enumerate().for_each(|(i, a)| {
            rate.set_position(i, &state.velocity(i));
            rate.set_velocity(i, a);
        });
        Ok(rate)
    }
}

impl Integrator for RungeKutta4 {
    fn step(
        &self,
        state: &StateVector,
        masses: &[f64],
        dt: f64,
        force: &dyn ForceModel,
    ) -> Result<StateVector, SingularPair> {
        let half = 0.5 * dt;

        let k1 = Self::derivative(state, masses, force)?;
        let k2 = Self::derivative(&state.offset(&k1, half), masses, force)?;
        let k3 = Self::derivative(&state.offset(&k2, half), masses, force)?;
        let k4 = Self::derivative(&state.offset(&k3, dt), masses, force)?;

        Ok(state.rk4_combine(&k1, &k2, &k3, &k4, dt))
    }
}
