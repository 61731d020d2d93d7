use std::collections::HashMap;

use nalgebra::Vector3;
use tracing::{debug, error, info, warn};

use crate::body::Body;
use crate::collisions::{
    contact_offset, CollisionEvent, EncounterTracker, ImpactMetrics, PairMinimum,
};
use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};
use crate::forces::{DirectGravity, ForceModel, SingularPair};
use crate::integrator::{Integrator, RungeKutta4};
use crate::result::{ConservationDiagnostics, Outcome, SimulationResult};
use crate::state::{ConservationSnapshot, StateVector};

/// Rounding error, in units in the last place, tolerated when a duration
/// is a whole multiple of the step
const STEP_ROUNDING_ULPS: f64 = 8.0;

/// Number of fixed steps needed to cover `duration`, at least one
///
/// Durations that are a whole multiple of `dt` up to floating-point rounding
/// do not gain an extra step; any larger remainder does.
///
/// # Examples
///
/// ```
/// use impact::system::step_count;
///
/// assert_eq!(step_count(0.3, 0.1), 3);
/// assert_eq!(step_count(1_000_000.0001, 1.0), 1_000_001);
/// ```
pub fn step_count(duration: f64, dt: f64) -> usize {
    let steps = duration / dt;
    let nearest = steps.round();
    let slack = STEP_ROUNDING_ULPS * f64::EPSILON * nearest.max(1.0);
    let steps = if (steps - nearest).abs() <= slack {
        nearest
    } else {
        steps.ceil()
    };
    steps.max(1.0) as usize
}

/// An ordered set of bodies advanced together under mutual gravity
///
/// Bodies keep their insertion order for every computation; the name map is
/// only used for lookup and uniqueness. A system runs once: after
/// [`System::simulate`] it can still be inspected but not extended.
///
/// # Examples
///
/// ```
/// use impact::body::{Body, BodyKind};
/// use impact::system::System;
/// use nalgebra::Vector3;
///
/// let mut system = System::new(60.0).unwrap();
/// system
///     .add_body(Body::new("Earth", 5.972e24, Vector3::zeros(), Vector3::zeros(), 6.371e6, BodyKind::Planet).unwrap())
///     .unwrap();
/// system
///     .add_body(
///         Body::new(
///             "Impactor",
///             1.0e10,
///             Vector3::new(2.0e7, 0.0, 0.0),
///             Vector3::new(-2.0e4, 0.0, 0.0),
///             100.0,
///             BodyKind::Asteroid,
///         )
///         .unwrap(),
///     )
///     .unwrap();
///
/// let result = system.simulate(86_400.0).unwrap();
/// assert!(result.collided());
/// assert!(result.impact().unwrap().tnt_megatons > 0.0);
/// ```
#[derive(Debug)]
pub struct System {
    config: SimulationConfig,
    bodies: Vec<Body>,
    index: HashMap<String, usize>,
    gravity: DirectGravity,
    integrator: RungeKutta4,
    time: f64,
    steps_taken: usize,
    snapshots: Vec<ConservationSnapshot>,
    started: bool,
}

impl System {
    /// Creates an empty system with default settings and the given step (s)
    pub fn new(step_size: f64) -> SimResult<Self> {
        Self::with_config(SimulationConfig::with_step_size(step_size))
    }

    /// Creates an empty system from a validated configuration
    pub fn with_config(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            gravity: DirectGravity::with_constant(config.gravitational_constant),
            integrator: RungeKutta4::new(),
            config,
            bodies: Vec::new(),
            index: HashMap::new(),
            time: 0.0,
            steps_taken: 0,
            snapshots: Vec::new(),
            started: false,
        })
    }

    /// Registers a body; names must be unique
    ///
    /// # Errors
    ///
    /// [`SimError::DuplicateBody`] or [`SimError::RegistrationClosed`], in
    /// which case the system is left unchanged.
    pub fn add_body(&mut self, body: Body) -> SimResult<()> {
        if self.started {
            return Err(SimError::RegistrationClosed);
        }
        if self.index.contains_key(body.name()) {
            return Err(SimError::DuplicateBody(body.name().to_string()));
        }
        self.index.insert(body.name().to_string(), self.bodies.len());
        self.bodies.push(body);
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.index.get(name).map(|&i| &self.bodies[i])
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Simulated time (s), exactly `steps_taken · step_size`
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_size(&self) -> f64 {
        self.config.step_size
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Conservation snapshots recorded so far
    pub fn snapshots(&self) -> &[ConservationSnapshot] {
        &self.snapshots
    }

    fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(Body::mass).collect()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        let state = StateVector::from_bodies(&self.bodies);
        self.gravity.potential_energy(&state, &self.masses())
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(Body::momentum)
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    /// Mass-weighted mean position, the origin for an empty system
    pub fn center_of_mass(&self) -> Vector3<f64> {
        let total = self.total_mass();
        if total == 0.0 {
            return Vector3::zeros();
        }
        self.bodies
            .iter()
            .map(|body| body.position() * body.mass())
            .fold(Vector3::zeros(), |acc, p| acc + p)
            / total
    }

    /// Total angular momentum about the center of mass
    pub fn total_angular_momentum(&self) -> Vector3<f64> {
        let com = self.center_of_mass();
        self.bodies
            .iter()
            .map(|body| body.angular_momentum(&com))
            .fold(Vector3::zeros(), |acc, l| acc + l)
    }

    /// Integrates the system forward for `total_duration` seconds
    ///
    /// Runs `ceil(total_duration / step_size)` RK4 steps, checking every pair
    /// for contact and close approaches after each one. The run stops early,
    /// after committing the step, when two bodies touch.
    ///
    /// # Errors
    ///
    /// * [`SimError::AlreadySimulated`], [`SimError::InvalidDuration`] or
    ///   [`SimError::TooFewBodies`] before anything is modified
    /// * [`SimError::ZeroSeparation`] when two bodies coincide exactly
    /// * [`SimError::Instability`] when the state stops being finite
    pub fn simulate(&mut self, total_duration: f64) -> SimResult<SimulationResult> {
        if self.started {
            return Err(SimError::AlreadySimulated);
        }
        if !(total_duration.is_finite() && total_duration > 0.0) {
            return Err(SimError::InvalidDuration(total_duration));
        }
        if self.bodies.len() < 2 {
            return Err(SimError::TooFewBodies(self.bodies.len()));
        }
        self.started = true;

        let dt = self.config.step_size;
        let n_steps = step_count(total_duration, dt);
        let masses = self.masses();
        let radii: Vec<f64> = self.bodies.iter().map(Body::radius).collect();
        let progress_every =
            ((n_steps as f64 * self.config.progress_interval).ceil() as usize).max(1);

        let mut state = StateVector::from_bodies(&self.bodies);
        self.bodies.iter_mut().for_each(|body| body.record(0.0));
        let initial = ConservationSnapshot::measure(0.0, &state, &masses, &self.gravity);
        self.snapshots.push(initial);
        let mut latest = initial;

        let mut tracker =
            EncounterTracker::new(self.bodies.len(), self.config.close_approach_distance);
        let mut collision: Option<(CollisionEvent, ImpactMetrics)> = None;
        let mut drift_reported = false;

        info!(
            bodies = self.bodies.len(),
            steps = n_steps,
            dt,
            duration = total_duration,
            "starting simulation"
        );

        for step in 1..=n_steps {
            let t0 = self.time;
            let next = self
                .integrator
                .step(&state, &masses, dt, &self.gravity)
                .map_err(|pair| self.zero_separation(pair, step, t0))?;

            if !next.is_finite() {
                let bodies: Vec<String> = next
                    .non_finite_bodies()
                    .iter()
                    .map(|&i| self.bodies[i].name().to_string())
                    .collect();
                let time = step as f64 * dt;
                error!(step, time, ?bodies, "non-finite state, aborting run");
                return Err(SimError::Instability { step, time, bodies });
            }

            if let Some(hit) = tracker.observe(&state, &next, &radii, t0, dt) {
                collision = Some(self.describe_collision(&hit, &state, step, t0));
            }

            next.apply_to(&mut self.bodies);
            self.steps_taken = step;
            self.time = step as f64 * dt;
            let time = self.time;
            self.bodies.iter_mut().for_each(|body| body.record(time));

            latest = ConservationSnapshot::measure(time, &next, &masses, &self.gravity);
            self.snapshots.push(latest);
            state = next;

            if !drift_reported {
                let diagnostics = ConservationDiagnostics::from_snapshots(
                    &initial,
                    &latest,
                    self.config.conservation_tolerance,
                );
                if !diagnostics.is_physically_valid() {
                    warn!(
                        step,
                        time,
                        energy_drift = diagnostics.energy_drift,
                        momentum_drift = diagnostics.momentum_drift,
                        angular_momentum_drift = diagnostics.angular_momentum_drift,
                        "conservation drift exceeds tolerance"
                    );
                    drift_reported = true;
                }
            }

            if step % progress_every == 0 {
                debug!(
                    step,
                    time,
                    progress = step as f64 / n_steps as f64,
                    "simulation progress"
                );
            }

            if let Some((event, _)) = &collision {
                info!(
                    step,
                    time = event.time,
                    pair = ?(&event.body_a, &event.body_b),
                    distance = event.min_distance,
                    "collision detected"
                );
                break;
            }
        }

        let names: Vec<String> = self
            .bodies
            .iter()
            .map(|body| body.name().to_string())
            .collect();
        let (min_separation, close_approaches) = tracker.finish(&names, &radii);
        let conservation = ConservationDiagnostics::from_snapshots(
            &initial,
            &latest,
            self.config.conservation_tolerance,
        );
        let (outcome, collision, impact) = match collision {
            Some((event, metrics)) => (Outcome::Collision, Some(event), Some(metrics)),
            None => (Outcome::Completed, None, None),
        };

        info!(
            ?outcome,
            steps = self.steps_taken,
            time = self.time,
            close_approaches = close_approaches.len(),
            energy_drift = conservation.energy_drift,
            "simulation finished"
        );

        Ok(SimulationResult {
            outcome,
            collision,
            impact,
            min_separation,
            close_approaches,
            bodies: self.bodies.clone(),
            conservation,
            snapshots: self.snapshots.clone(),
            steps_taken: self.steps_taken,
            step_size: dt,
            simulated_time: self.time,
            requested_duration: total_duration,
        })
    }

    fn zero_separation(&self, pair: SingularPair, step: usize, time: f64) -> SimError {
        let body_a = self.bodies[pair.body_a].name().to_string();
        let body_b = self.bodies[pair.body_b].name().to_string();
        error!(step, time, pair = ?(&body_a, &body_b), "zero separation, aborting run");
        SimError::ZeroSeparation {
            step,
            time,
            body_a,
            body_b,
        }
    }

    /// Builds the event record and impact metrics for a contact found in the
    /// step beginning at `start`
    ///
    /// Contact geometry and impact velocity follow the straight-line motion
    /// from the step start.
    fn describe_collision(
        &self,
        hit: &PairMinimum,
        start: &StateVector,
        step: usize,
        t0: f64,
    ) -> (CollisionEvent, ImpactMetrics) {
        let dt = self.config.step_size;
        let (i, j) = (hit.body_a, hit.body_b);
        let (a, b) = (&self.bodies[i], &self.bodies[j]);

        let r0 = start.position(j) - start.position(i);
        let v0 = start.velocity(j) - start.velocity(i);
        let contact_distance = a.radius() + b.radius();
        let contact = contact_offset(&r0, &v0, contact_distance, dt).unwrap_or(hit.offset);

        let event = CollisionEvent {
            body_a: a.name().to_string(),
            body_b: b.name().to_string(),
            step,
            time: t0 + hit.offset,
            min_distance: hit.distance,
            contact_distance,
            contact_time: t0 + contact,
            relative_speed: hit.relative_speed,
        };

        // Lighter body is the impactor; geometry is flipped to its frame
        let (impactor, target, sign) = if b.mass() <= a.mass() {
            (b, a, 1.0)
        } else {
            (a, b, -1.0)
        };
        let relative_velocity = v0 * sign;
        let contact_point = (r0 + v0 * contact) * sign;
        let metrics = self.config.impact.assess(
            impactor,
            target,
            &relative_velocity,
            &contact_point,
            self.config.gravitational_constant,
        );

        (event, metrics)
    }
}
