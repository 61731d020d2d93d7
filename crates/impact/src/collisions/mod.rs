//! Collision detection and impact assessment
//!
//! This module finds contacts and close approaches between sampled steps and
//! estimates the physical consequences of an impact.

pub mod assessment;
pub mod detection;

#[cfg(test)]
mod assessment_test;

pub use assessment::{
    impact_angle, CraterRegime, ImpactMetrics, ImpactModel, Severity, SeverityThresholds,
};
pub use detection::{
    closest_approach, contact_offset, impact_parameter, pair_minimum, CloseApproach,
    CollisionEvent, EncounterTracker, MinSeparation, PairMinimum,
};
