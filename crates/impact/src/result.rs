//! Outcome of a finished simulation run

use crate::body::Body;
use crate::collisions::{CloseApproach, CollisionEvent, ImpactMetrics, MinSeparation};
use crate::state::ConservationSnapshot;
use serde::{Deserialize, Serialize};

/// Denominators below this fraction of a quantity's natural scale are
/// treated as zero when computing relative drift
pub const DEGENERATE_FRACTION: f64 = 1e-12;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The full requested duration was integrated
    Completed,
    /// Two bodies touched and the run stopped after that step
    Collision,
}

/// Relative change `|final − initial| / |initial|`
///
/// When `|initial|` is below [`DEGENERATE_FRACTION`] of `scale` (for example
/// a total momentum that starts at zero) the scale is used as the
/// denominator. If both are zero the drift is zero.
///
/// # Examples
///
/// ```
/// use impact::result::relative_drift;
///
/// assert_eq!(relative_drift(-100.0, -101.0, 200.0), 0.01);
/// // Starts at zero, so the scale is used instead
/// assert_eq!(relative_drift(0.0, 0.5, 2.0), 0.25);
/// assert_eq!(relative_drift(0.0, 0.0, 0.0), 0.0);
/// ```
pub fn relative_drift(initial: f64, final_value: f64, scale: f64) -> f64 {
    let change = (final_value - initial).abs();
    let denominator = if initial.abs() >= DEGENERATE_FRACTION * scale.abs() {
        initial.abs()
    } else {
        scale.abs()
    };
    if denominator == 0.0 {
        0.0
    } else {
        change / denominator
    }
}

/// Conserved-quantity bookkeeping between the first and last snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConservationDiagnostics {
    pub initial_energy: f64,           // J
    pub final_energy: f64,             // J
    pub energy_drift: f64,             // relative
    pub initial_momentum: f64,         // kg·m/s
    pub final_momentum: f64,           // kg·m/s
    pub momentum_drift: f64,           // relative
    pub initial_angular_momentum: f64, // kg·m²/s
    pub final_angular_momentum: f64,   // kg·m²/s
    pub angular_momentum_drift: f64,   // relative
    pub tolerance: f64,
}

impl ConservationDiagnostics {
    pub fn from_snapshots(
        initial: &ConservationSnapshot,
        last: &ConservationSnapshot,
        tolerance: f64,
    ) -> Self {
        Self {
            initial_energy: initial.total_energy,
            final_energy: last.total_energy,
            energy_drift: relative_drift(
                initial.total_energy,
                last.total_energy,
                initial.energy_scale(),
            ),
            initial_momentum: initial.momentum_magnitude,
            final_momentum: last.momentum_magnitude,
            momentum_drift: relative_drift(
                initial.momentum_magnitude,
                last.momentum_magnitude,
                initial.momentum_scale,
            ),
            initial_angular_momentum: initial.angular_momentum,
            final_angular_momentum: last.angular_momentum,
            angular_momentum_drift: relative_drift(
                initial.angular_momentum,
                last.angular_momentum,
                initial.angular_momentum_scale,
            ),
            tolerance,
        }
    }

    pub fn energy_conserved(&self) -> bool {
        self.energy_drift < self.tolerance
    }

    pub fn momentum_conserved(&self) -> bool {
        self.momentum_drift < self.tolerance
    }

    pub fn angular_momentum_conserved(&self) -> bool {
        self.angular_momentum_drift < self.tolerance
    }

    /// Every drift below the tolerance
    pub fn is_physically_valid(&self) -> bool {
        self.energy_conserved() && self.momentum_conserved() && self.angular_momentum_conserved()
    }
}

/// Immutable record of a finished run
///
/// Holds copies of every body (final state plus full history), the event
/// summary and the conservation diagnostics. Nothing here refers back to the
/// `System` that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub(crate) outcome: Outcome,
    pub(crate) collision: Option<CollisionEvent>,
    pub(crate) impact: Option<ImpactMetrics>,
    pub(crate) min_separation: Option<MinSeparation>,
    pub(crate) close_approaches: Vec<CloseApproach>,
    pub(crate) bodies: Vec<Body>,
    pub(crate) conservation: ConservationDiagnostics,
    pub(crate) snapshots: Vec<ConservationSnapshot>,
    pub(crate) steps_taken: usize,
    pub(crate) step_size: f64,
    pub(crate) simulated_time: f64,
    pub(crate) requested_duration: f64,
}

impl SimulationResult {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn collided(&self) -> bool {
        self.outcome == Outcome::Collision
    }

    pub fn collision(&self) -> Option<&CollisionEvent> {
        self.collision.as_ref()
    }

    /// Impact consequences, present only when the run ended in a collision
    pub fn impact(&self) -> Option<&ImpactMetrics> {
        self.impact.as_ref()
    }

    pub fn min_separation(&self) -> Option<&MinSeparation> {
        self.min_separation.as_ref()
    }

    pub fn close_approaches(&self) -> &[CloseApproach] {
        &self.close_approaches
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|body| body.name() == name)
    }

    pub fn conservation(&self) -> &ConservationDiagnostics {
        &self.conservation
    }

    /// Conservation snapshots, the initial one followed by one per step
    pub fn snapshots(&self) -> &[ConservationSnapshot] {
        &self.snapshots
    }

    pub fn is_physically_valid(&self) -> bool {
        self.conservation.is_physically_valid()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Simulated time at the end of the run (s)
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    pub fn requested_duration(&self) -> f64 {
        self.requested_duration
    }
}
