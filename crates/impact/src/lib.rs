//! Gravitational encounter simulation for asteroid impact scenarios.
//!
//! A [`System`] integrates a handful of massive bodies with classical RK4 under
//! direct Newtonian gravity, watches every pair for contact or close approach
//! between samples, and packages the run into a [`SimulationResult`] with
//! conservation diagnostics and, when something hits, impact metrics.

pub mod body;
pub mod collisions;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod report;
pub mod result;
pub mod scenarios;
pub mod state;
pub mod system;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod result_test;

pub use body::{Body, BodyKind, TrajectorySample};
pub use config::SimulationConfig;
pub use error::{SimError, SimResult};
pub use result::{Outcome, SimulationResult};
pub use system::System;
