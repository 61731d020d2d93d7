//! Continuous collision and close-approach detection
//!
//! Each step is checked pair by pair. Besides the two sampled endpoints, the
//! closest approach *inside* the step is estimated by assuming straight-line
//! relative motion from the step start:
//!
//! `t* = clamp(−(r₀·v₀)/(v₀·v₀), 0, dt)`, distance `|r₀ + t*·v₀|`
//!
//! This catches fast bodies that would otherwise pass through each other
//! between samples. Curvature of the relative path within the step is
//! ignored, so the estimate is an approximation. Under the same model the
//! relative velocity stays at its step-start value `v₀`. End-of-step
//! velocities are not used: in a colliding step they come from RK4 stages
//! evaluated inside the target.

use crate::state::StateVector;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Linear closest approach within `[0, dt]`
///
/// Returns the time offset `t*` and the separation at that time.
///
/// # Examples
///
/// ```
/// use impact::collisions::closest_approach;
/// use nalgebra::Vector3;
///
/// // Passing 1 m off-axis, crossing x = 0 half way through the step
/// let r0 = Vector3::new(-50.0, 1.0, 0.0);
/// let v0 = Vector3::new(100.0, 0.0, 0.0);
/// let (t, d) = closest_approach(&r0, &v0, 1.0);
///
/// assert_eq!(t, 0.5);
/// assert_eq!(d, 1.0);
/// ```
pub fn closest_approach(r0: &Vector3<f64>, v0: &Vector3<f64>, dt: f64) -> (f64, f64) {
    let v2 = v0.norm_squared();
    let t = if v2 > 0.0 {
        (-r0.dot(v0) / v2).clamp(0.0, dt)
    } else {
        0.0
    };
    (t, (r0 + v0 * t).norm())
}

/// First time offset in `[0, dt]` at which the linear relative path reaches
/// `contact_distance`, if it does
///
/// Returns `Some(0.0)` when the pair already overlaps at the step start.
pub fn contact_offset(
    r0: &Vector3<f64>,
    v0: &Vector3<f64>,
    contact_distance: f64,
    dt: f64,
) -> Option<f64> {
    let c = r0.norm_squared() - contact_distance * contact_distance;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = v0.norm_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * r0.dot(v0);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=dt).contains(&t).then_some(t)
}

/// Perpendicular miss distance of the straight line `r₀ + t·v₀`
///
/// Equals `|r₀|` when there is no relative motion.
///
/// # Examples
///
/// ```
/// use impact::collisions::impact_parameter;
/// use nalgebra::Vector3;
///
/// let r0 = Vector3::new(-1.0e6, 3.0e4, 0.0);
/// let v0 = Vector3::new(2.0e4, 0.0, 0.0);
/// assert_eq!(impact_parameter(&r0, &v0), 3.0e4);
/// ```
pub fn impact_parameter(r0: &Vector3<f64>, v0: &Vector3<f64>) -> f64 {
    let speed = v0.norm();
    if speed > 0.0 {
        r0.cross(v0).norm() / speed
    } else {
        r0.norm()
    }
}

/// Smallest separation of one pair during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairMinimum {
    /// Insertion index of the first body (always the lower one)
    pub body_a: usize,
    pub body_b: usize,
    /// Offset of the minimum from the step start (s)
    pub offset: f64,
    /// Separation at the minimum (m)
    pub distance: f64,
    /// Relative speed at the step start (m/s)
    pub relative_speed: f64,
    /// Miss distance of the step-start relative motion (m)
    pub impact_parameter: f64,
    /// Separation at the end of the step (m)
    pub end_distance: f64,
}

/// Minimum separation of bodies `i < j` across the step from `start` to `end`
///
/// Candidates are the start sample, the linear closest approach and the end
/// sample; on exact ties the earlier one wins. The reported relative speed
/// and impact parameter come from the step-start relative motion.
pub fn pair_minimum(
    start: &StateVector,
    end: &StateVector,
    i: usize,
    j: usize,
    dt: f64,
) -> PairMinimum {
    let r0 = start.position(j) - start.position(i);
    let v0 = start.velocity(j) - start.velocity(i);
    let r1 = end.position(j) - end.position(i);

    let (t_star, d_star) = closest_approach(&r0, &v0, dt);
    let end_distance = r1.norm();

    let (offset, distance) = [(t_star, d_star), (dt, end_distance)]
        .into_iter()
        .fold((0.0, r0.norm()), |best, candidate| {
            if candidate.1 < best.1 {
                candidate
            } else {
                best
            }
        });

    PairMinimum {
        body_a: i,
        body_b: j,
        offset,
        distance,
        relative_speed: v0.norm(),
        impact_parameter: impact_parameter(&r0, &v0),
        end_distance,
    }
}

/// Closest approach of the whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinSeparation {
    pub body_a: String,
    pub body_b: String,
    pub time: f64,             // s
    pub distance: f64,         // m, center to center
    pub surface_distance: f64, // m, distance minus both radii
    pub relative_speed: f64,   // m/s
    pub impact_parameter: f64, // m
}

/// One contiguous pass of a pair below the close-approach threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    pub body_a: String,
    pub body_b: String,
    /// Time of the first step whose minimum fell below the threshold (s)
    pub entered_at: f64,
    pub min_distance: f64,     // m
    pub time_of_min: f64,      // s
    pub relative_speed: f64,   // m/s at the minimum
    pub impact_parameter: f64, // m
}

/// A physical contact between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub body_a: String,
    pub body_b: String,
    /// Step during which contact happened (1-based)
    pub step: usize,
    /// Estimated time of the minimum separation (s)
    pub time: f64,
    /// Estimated minimum separation (m)
    pub min_distance: f64,
    /// Sum of the two radii (m)
    pub contact_distance: f64,
    /// Estimated time the surfaces first touched (s)
    pub contact_time: f64,
    /// Relative speed at the start of the colliding step (m/s)
    pub relative_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Record {
    body_a: usize,
    body_b: usize,
    time: f64,
    distance: f64,
    relative_speed: f64,
    impact_parameter: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Approach {
    entered_at: f64,
    closest: Record,
}

/// Running event state threaded through a simulation
///
/// Keeps the global minimum separation, the list of close approaches and
/// which pairs are currently inside the threshold. Records are index based
/// until [`EncounterTracker::finish`] resolves body names.
#[derive(Debug, Clone)]
pub struct EncounterTracker {
    n_bodies: usize,
    close_approach_distance: f64,
    min_separation: Option<Record>,
    approaches: Vec<Approach>,
    /// Per pair, the index into `approaches` of the pass still in progress
    open: Vec<Option<usize>>,
}

impl EncounterTracker {
    pub fn new(n_bodies: usize, close_approach_distance: f64) -> Self {
        Self {
            n_bodies,
            close_approach_distance,
            min_separation: None,
            approaches: Vec::new(),
            open: vec![None; n_bodies * n_bodies],
        }
    }

    /// Checks every pair over one step and updates the running records
    ///
    /// # Arguments
    ///
    /// * `start`, `end` - States at the step boundaries
    /// * `radii` - Body radii in insertion order (m)
    /// * `t0` - Simulated time at the step start (s)
    /// * `dt` - Step size (s)
    ///
    /// # Returns
    ///
    /// The colliding pair with the smallest minimum distance, if any pair
    /// came within the sum of its radii. Pair order breaks exact ties.
    pub fn observe(
        &mut self,
        start: &StateVector,
        end: &StateVector,
        radii: &[f64],
        t0: f64,
        dt: f64,
    ) -> Option<PairMinimum> {
        let mut collision: Option<PairMinimum> = None;

        for i in 0..self.n_bodies {
            for j in (i + 1)..self.n_bodies {
                let minimum = pair_minimum(start, end, i, j, dt);
                let record = Record {
                    body_a: i,
                    body_b: j,
                    time: t0 + minimum.offset,
                    distance: minimum.distance,
                    relative_speed: minimum.relative_speed,
                    impact_parameter: minimum.impact_parameter,
                };

                if self
                    .min_separation
                    .map_or(true, |current| record.distance < current.distance)
                {
                    self.min_separation = Some(record);
                }

                self.track_approach(record, minimum.end_distance, t0);

                if minimum.distance <= radii[i] + radii[j]
                    && collision.map_or(true, |best| minimum.distance < best.distance)
                {
                    collision = Some(minimum);
                }
            }
        }

        collision
    }

    fn track_approach(&mut self, record: Record, end_distance: f64, t0: f64) {
        let slot = record.body_a * self.n_bodies + record.body_b;

        if record.distance < self.close_approach_distance {
            match self.open[slot] {
                Some(idx) => {
                    let approach = &mut self.approaches[idx];
                    if record.distance < approach.closest.distance {
                        approach.closest = record;
                    }
                }
                None => {
                    warn!(
                        pair = ?(record.body_a, record.body_b),
                        time = t0,
                        distance = record.distance,
                        "close approach started"
                    );
                    self.open[slot] = Some(self.approaches.len());
                    self.approaches.push(Approach {
                        entered_at: t0,
                        closest: record,
                    });
                }
            }
        }

        if end_distance >= self.close_approach_distance {
            self.open[slot] = None;
        }
    }

    /// Resolves the records against body names and radii
    pub fn finish(
        self,
        names: &[String],
        radii: &[f64],
    ) -> (Option<MinSeparation>, Vec<CloseApproach>) {
        let min_separation = self.min_separation.map(|record| MinSeparation {
            body_a: names[record.body_a].clone(),
            body_b: names[record.body_b].clone(),
            time: record.time,
            distance: record.distance,
            surface_distance: record.distance - radii[record.body_a] - radii[record.body_b],
            relative_speed: record.relative_speed,
            impact_parameter: record.impact_parameter,
        });

        let approaches = self
            .approaches
            .into_iter()
            .map(|approach| CloseApproach {
                body_a: names[approach.closest.body_a].clone(),
                body_b: names[approach.closest.body_b].clone(),
                entered_at: approach.entered_at,
                min_distance: approach.closest.distance,
                time_of_min: approach.closest.time,
                relative_speed: approach.closest.relative_speed,
                impact_parameter: approach.closest.impact_parameter,
            })
            .collect();

        (min_separation, approaches)
    }
}
