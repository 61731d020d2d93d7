//! Simulation configuration
//!
//! Every field has a serde default, so a scenario file only needs to name the
//! values it changes.

use crate::collisions::ImpactModel;
use crate::error::{SimError, SimResult};
use crate::forces::G;
use serde::{Deserialize, Serialize};
use units::{Length, Time};

/// Tunable parameters of a simulation run
///
/// # Examples
///
/// ```
/// use impact::config::SimulationConfig;
///
/// let config: SimulationConfig = serde_yaml::from_str("step_size: 60.0").unwrap();
///
/// assert_eq!(config.step_size, 60.0);
/// assert_eq!(config.conservation_tolerance, 1e-6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed integration step (s)
    #[serde(default = "default_step_size")]
    pub step_size: f64,

    /// Gravitational constant (m³ kg⁻¹ s⁻²)
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,

    /// Separation below which a pass is logged as a close approach (m)
    #[serde(default = "default_close_approach_distance")]
    pub close_approach_distance: f64,

    /// Largest relative drift of energy or momentum still considered valid
    #[serde(default = "default_conservation_tolerance")]
    pub conservation_tolerance: f64,

    /// Fraction of the run between progress log lines
    #[serde(default = "default_progress_interval")]
    pub progress_interval: f64,

    #[serde(default)]
    pub impact: ImpactModel,
}

fn default_step_size() -> f64 {
    Time::from_hours(1.0).to_seconds()
}

fn default_gravitational_constant() -> f64 {
    G
}

fn default_close_approach_distance() -> f64 {
    Length::from_earth_radii(10.0).to_meters()
}

fn default_conservation_tolerance() -> f64 {
    1e-6
}

fn default_progress_interval() -> f64 {
    0.05
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_size: default_step_size(),
            gravitational_constant: default_gravitational_constant(),
            close_approach_distance: default_close_approach_distance(),
            conservation_tolerance: default_conservation_tolerance(),
            progress_interval: default_progress_interval(),
            impact: ImpactModel::default(),
        }
    }
}

impl SimulationConfig {
    /// Default configuration with a custom step size
    pub fn with_step_size(step_size: f64) -> Self {
        Self {
            step_size,
            ..Self::default()
        }
    }

    /// Checks every parameter, without modifying anything
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidStepSize`] for a bad step, [`SimError::InvalidConfig`]
    /// for any other out-of-range value.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(SimError::InvalidStepSize(self.step_size));
        }
        if !(self.gravitational_constant.is_finite() && self.gravitational_constant > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "gravitational_constant must be finite and > 0, got {}",
                self.gravitational_constant
            )));
        }
        if !(self.close_approach_distance.is_finite() && self.close_approach_distance >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "close_approach_distance must be finite and >= 0, got {}",
                self.close_approach_distance
            )));
        }
        if !(self.conservation_tolerance.is_finite() && self.conservation_tolerance > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "conservation_tolerance must be finite and > 0, got {}",
                self.conservation_tolerance
            )));
        }
        if !(self.progress_interval > 0.0 && self.progress_interval <= 1.0) {
            return Err(SimError::InvalidConfig(format!(
                "progress_interval must be in (0, 1], got {}",
                self.progress_interval
            )));
        }
        self.impact.validate()
    }
}
