//! YAML scenario files.
//!
//! A scenario names its bodies, the simulated time and, optionally, any
//! simulation settings that differ from the defaults:
//!
//! ```yaml
//! duration_days: 1.0
//! config:
//!   step_size: 10.0          # s
//! bodies:
//!   - name: Earth
//!     mass: 5.972e24         # kg
//!     position: [0.0, 0.0, 0.0]
//!     radius: 6.371e6        # m
//!   - name: Impactor
//!     kind: asteroid
//!     mass: 1.0e15
//!     position: [5.0e7, 0.0, 0.0]
//!     velocity: [-2.0e4, 0.0, 0.0]
//!     density: 3000.0        # radius follows from mass
//! ```
//!
//! A body with neither `radius` nor `density` is a point mass.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use impact::body::sphere_radius;
use impact::{Body, BodyKind, SimulationConfig, System};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use units::Time;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub config: SimulationConfig,
    pub duration_days: f64,
    pub bodies: Vec<BodySpec>,
}

/// Initial state of one body, SI units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    #[serde(default)]
    pub kind: BodyKind,
    pub mass: f64,
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
}

impl BodySpec {
    fn radius(&self) -> Result<f64> {
        match (self.radius, self.density) {
            (Some(radius), _) => Ok(radius),
            (None, Some(density)) if density.is_finite() && density > 0.0 => {
                Ok(sphere_radius(self.mass, density))
            }
            (None, Some(density)) => {
                bail!("density must be finite and > 0, got {density}")
            }
            (None, None) => Ok(0.0),
        }
    }

    pub fn to_body(&self) -> Result<Body> {
        let body = Body::new(
            self.name.clone(),
            self.mass,
            Vector3::from(self.position),
            Vector3::from(self.velocity),
            self.radius()?,
            self.kind.clone(),
        )?;
        Ok(body)
    }
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let scenario: ScenarioFile = serde_yaml::from_str(text)?;
        if !(scenario.duration_days.is_finite() && scenario.duration_days > 0.0) {
            bail!(
                "duration_days must be finite and > 0, got {}",
                scenario.duration_days
            );
        }
        Ok(scenario)
    }

    /// Simulated time (s)
    pub fn duration(&self) -> f64 {
        Time::from_days(self.duration_days).to_seconds()
    }

    /// Validates the settings and registers every body in file order
    pub fn build(&self) -> Result<System> {
        let mut system =
            System::with_config(self.config.clone()).context("invalid simulation config")?;
        for spec in &self.bodies {
            let body = spec
                .to_body()
                .with_context(|| format!("invalid body '{}'", spec.name))?;
            system
                .add_body(body)
                .with_context(|| format!("cannot add body '{}'", spec.name))?;
        }
        Ok(system)
    }
}
