//! Error types for encounter simulations

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Everything that can stop a simulation from being built or run.
///
/// Configuration variants are raised before any state is touched, so a
/// rejected call leaves the `System` exactly as it was. The numerical
/// variants abort a run part way; a collision is never an error, it is
/// reported through [`crate::result::Outcome`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("body name must not be empty")]
    EmptyName,

    #[error("body '{name}' has invalid mass {mass} kg (must be finite and > 0)")]
    InvalidMass { name: String, mass: f64 },

    #[error("body '{name}' has invalid radius {radius} m (must be finite and >= 0)")]
    InvalidRadius { name: String, radius: f64 },

    #[error("body '{name}' has a non-finite {field}")]
    NonFiniteState { name: String, field: &'static str },

    #[error("step size must be finite and > 0, got {0} s")]
    InvalidStepSize(f64),

    #[error("simulation duration must be finite and > 0, got {0} s")]
    InvalidDuration(f64),

    #[error("a body named '{0}' is already registered")]
    DuplicateBody(String),

    #[error("at least two bodies are required, {0} registered")]
    TooFewBodies(usize),

    #[error("bodies cannot be added once the simulation has started")]
    RegistrationClosed,

    #[error("this system has already been simulated")]
    AlreadySimulated,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("'{body_a}' and '{body_b}' are at zero separation (step {step}, t = {time} s)")]
    ZeroSeparation {
        step: usize,
        time: f64,
        body_a: String,
        body_b: String,
    },

    #[error("numerical instability at step {step} (t = {time} s) in {}", .bodies.join(", "))]
    Instability {
        step: usize,
        time: f64,
        bodies: Vec<String>,
    },
}

impl SimError {
    /// True for errors caused by bad input rather than by the dynamics.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            SimError::ZeroSeparation { .. } | SimError::Instability { .. }
        )
    }
}
