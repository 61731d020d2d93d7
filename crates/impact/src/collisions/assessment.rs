//! Impact assessment for a detected collision
//!
//! Turns the encounter geometry of a collision into physical consequences:
//! kinetic energy, TNT-equivalent yield, a crater estimate from an empirical
//! scaling law, and a severity class. All coefficients live in
//! [`ImpactModel`] so scenarios can be re-evaluated with different
//! assumptions.

use crate::body::{sphere_radius, Body};
use crate::error::{SimError, SimResult};
use crate::forces::gravity::surface_gravity;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use units::{Energy, MEGATON_TNT_J};

/// Surface gravity used when the target is a point mass (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Crater radius above which the crater is large but still simple (m)
pub const LARGE_SIMPLE_CRATER_RADIUS: f64 = 2.0e3;

/// Crater radius above which the crater collapses into a complex one (m)
pub const COMPLEX_CRATER_RADIUS: f64 = 50.0e3;

/// Ordered yield thresholds in megatons of TNT
///
/// A yield is classified by the first threshold it reaches, checked from
/// `global` downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    #[serde(default = "default_global")]
    pub global: f64,
    #[serde(default = "default_continental")]
    pub continental: f64,
    #[serde(default = "default_regional")]
    pub regional: f64,
    #[serde(default = "default_local")]
    pub local: f64,
}

fn default_global() -> f64 {
    1.0e5
}

fn default_continental() -> f64 {
    1.0e3
}

fn default_regional() -> f64 {
    10.0
}

fn default_local() -> f64 {
    0.01
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            global: default_global(),
            continental: default_continental(),
            regional: default_regional(),
            local: default_local(),
        }
    }
}

impl SeverityThresholds {
    /// Classifies a yield in megatons
    ///
    /// # Examples
    ///
    /// ```
    /// use impact::collisions::{Severity, SeverityThresholds};
    ///
    /// let thresholds = SeverityThresholds::default();
    /// assert_eq!(thresholds.classify(15.0), Severity::Regional);
    /// assert_eq!(thresholds.classify(1.0e8), Severity::Global);
    /// assert_eq!(thresholds.classify(0.0), Severity::Negligible);
    /// ```
    pub fn classify(&self, megatons: f64) -> Severity {
        if megatons >= self.global {
            Severity::Global
        } else if megatons >= self.continental {
            Severity::Continental
        } else if megatons >= self.regional {
            Severity::Regional
        } else if megatons >= self.local {
            Severity::Local
        } else {
            Severity::Negligible
        }
    }

    fn validate(&self) -> SimResult<()> {
        let ordered = [self.global, self.continental, self.regional, self.local];
        if ordered.iter().any(|t| !(t.is_finite() && *t > 0.0)) {
            return Err(SimError::InvalidConfig(
                "severity thresholds must be finite and > 0".to_string(),
            ));
        }
        if ordered.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(SimError::InvalidConfig(
                "severity thresholds must decrease from global to local".to_string(),
            ));
        }
        Ok(())
    }
}

/// Qualitative consequence class of an impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Negligible,
    Local,
    Regional,
    Continental,
    Global,
}

impl Severity {
    pub fn description(&self) -> &'static str {
        match self {
            Severity::Negligible => "airburst or negligible ground effects",
            Severity::Local => "local damage around the impact site",
            Severity::Regional => "regional devastation",
            Severity::Continental => "continental-scale devastation",
            Severity::Global => "global catastrophe, mass extinction risk",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Negligible => "negligible",
            Severity::Local => "local",
            Severity::Regional => "regional",
            Severity::Continental => "continental",
            Severity::Global => "global",
        };
        write!(f, "{label}")
    }
}

/// Morphology of the estimated crater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraterRegime {
    /// Bowl-shaped
    Simple,
    /// Bowl-shaped but wide enough for significant wall slumping
    LargeSimple,
    /// Central peak or peak ring
    Complex,
}

impl CraterRegime {
    pub fn from_radius(radius_m: f64) -> Self {
        if radius_m > COMPLEX_CRATER_RADIUS {
            CraterRegime::Complex
        } else if radius_m > LARGE_SIMPLE_CRATER_RADIUS {
            CraterRegime::LargeSimple
        } else {
            CraterRegime::Simple
        }
    }
}

impl std::fmt::Display for CraterRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CraterRegime::Simple => "simple",
            CraterRegime::LargeSimple => "large simple",
            CraterRegime::Complex => "complex",
        };
        write!(f, "{label}")
    }
}

/// Coefficients of the impact consequence model
///
/// The crater diameter follows the scaling law
/// `D = K·(ρ_imp/ρ_target)^(1/3)·d·(v²/(g·d))^β`
/// with `d` the impactor diameter, `v` the impact speed and `g` the
/// target's surface gravity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactModel {
    /// Scaling coefficient K
    #[serde(default = "default_crater_coefficient")]
    pub crater_coefficient: f64,
    /// Velocity exponent β
    #[serde(default = "default_crater_exponent")]
    pub crater_exponent: f64,
    /// Crater depth as a fraction of its diameter
    #[serde(default = "default_depth_ratio")]
    pub depth_ratio: f64,
    /// Density of the target surface (kg/m³)
    #[serde(default = "default_target_density")]
    pub target_density: f64,
    /// Density assumed for impactors without a radius (kg/m³)
    #[serde(default = "default_impactor_density")]
    pub default_impactor_density: f64,
    /// Override for the target's surface gravity (m/s²)
    #[serde(default)]
    pub surface_gravity: Option<f64>,
    #[serde(default = "default_joules_per_megaton")]
    pub joules_per_megaton: f64,
    #[serde(default)]
    pub severity: SeverityThresholds,
}

fn default_crater_coefficient() -> f64 {
    1.8
}

fn default_crater_exponent() -> f64 {
    0.22
}

fn default_depth_ratio() -> f64 {
    0.2
}

fn default_target_density() -> f64 {
    2700.0
}

fn default_impactor_density() -> f64 {
    3000.0
}

fn default_joules_per_megaton() -> f64 {
    MEGATON_TNT_J
}

impl Default for ImpactModel {
    fn default() -> Self {
        Self {
            crater_coefficient: default_crater_coefficient(),
            crater_exponent: default_crater_exponent(),
            depth_ratio: default_depth_ratio(),
            target_density: default_target_density(),
            default_impactor_density: default_impactor_density(),
            surface_gravity: None,
            joules_per_megaton: default_joules_per_megaton(),
            severity: SeverityThresholds::default(),
        }
    }
}

/// Physical consequences of a collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub impactor: String,
    pub target: String,
    pub impactor_mass: f64,     // kg
    pub impactor_diameter: f64, // m
    pub impactor_density: f64,  // kg/m³
    pub impact_speed: f64,      // m/s, relative to the target
    /// Angle above the target's local horizontal (90° is vertical)
    pub impact_angle: f64,
    pub energy: Energy,
    pub tnt_megatons: f64,
    pub surface_gravity: f64, // m/s²
    pub crater_diameter: f64, // m
    pub crater_radius: f64,   // m
    pub crater_depth: f64,    // m
    pub regime: CraterRegime,
    pub severity: Severity,
}

impl ImpactModel {
    pub fn validate(&self) -> SimResult<()> {
        let positive = [
            ("crater_coefficient", self.crater_coefficient),
            ("crater_exponent", self.crater_exponent),
            ("depth_ratio", self.depth_ratio),
            ("target_density", self.target_density),
            ("default_impactor_density", self.default_impactor_density),
            ("joules_per_megaton", self.joules_per_megaton),
        ];
        if let Some((field, value)) = positive
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(SimError::InvalidConfig(format!(
                "{field} must be finite and > 0, got {value}"
            )));
        }
        if let Some(g) = self.surface_gravity {
            if !(g.is_finite() && g > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "surface_gravity must be finite and > 0, got {g}"
                )));
            }
        }
        self.severity.validate()
    }

    /// Crater diameter (m) for an impactor of diameter `d` and density `rho`
    /// hitting at `speed` under surface gravity `g`
    ///
    /// # Examples
    ///
    /// ```
    /// use impact::collisions::ImpactModel;
    ///
    /// let model = ImpactModel::default();
    ///
    /// // A 100 m stony body at 20 km/s digs a crater of a few kilometres
    /// let d = model.crater_diameter(100.0, 3000.0, 20_000.0, 9.81);
    /// assert!(d > 1_000.0 && d < 5_000.0);
    /// assert_eq!(model.crater_diameter(100.0, 3000.0, 0.0, 9.81), 0.0);
    /// ```
    pub fn crater_diameter(&self, d: f64, rho: f64, speed: f64, g: f64) -> f64 {
        if d <= 0.0 || speed <= 0.0 {
            return 0.0;
        }
        let density_factor = (rho / self.target_density).cbrt();
        let velocity_factor = (speed * speed / (g * d)).powf(self.crater_exponent);
        self.crater_coefficient * density_factor * d * velocity_factor
    }

    /// Evaluates the consequences of `impactor` striking `target`
    ///
    /// # Arguments
    ///
    /// * `relative_velocity` - Impactor velocity relative to the target (m/s)
    /// * `contact_offset` - Impactor position relative to the target at contact (m)
    /// * `g` - Gravitational constant, used for the target's surface gravity
    pub fn assess(
        &self,
        impactor: &Body,
        target: &Body,
        relative_velocity: &Vector3<f64>,
        contact_offset: &Vector3<f64>,
        g: f64,
    ) -> ImpactMetrics {
        let mass = impactor.mass();
        let (radius, density) = match impactor.density() {
            Some(density) => (impactor.radius(), density),
            None => (
                sphere_radius(mass, self.default_impactor_density),
                self.default_impactor_density,
            ),
        };
        let diameter = 2.0 * radius;

        let speed = relative_velocity.norm();
        let energy = Energy::kinetic(mass, speed);
        let tnt_megatons = energy.to_joules() / self.joules_per_megaton;

        let gravity = self.surface_gravity.unwrap_or_else(|| {
            if target.radius() > 0.0 {
                surface_gravity(g, target.mass(), target.radius())
            } else {
                STANDARD_GRAVITY
            }
        });

        let crater_diameter = self.crater_diameter(diameter, density, speed, gravity);
        let crater_radius = crater_diameter / 2.0;

        ImpactMetrics {
            impactor: impactor.name().to_string(),
            target: target.name().to_string(),
            impactor_mass: mass,
            impactor_diameter: diameter,
            impactor_density: density,
            impact_speed: speed,
            impact_angle: impact_angle(relative_velocity, contact_offset),
            energy,
            tnt_megatons,
            surface_gravity: gravity,
            crater_diameter,
            crater_radius,
            crater_depth: crater_diameter * self.depth_ratio,
            regime: CraterRegime::from_radius(crater_radius),
            severity: self.severity.classify(tnt_megatons),
        }
    }
}

/// Angle in degrees between the approach velocity and the local horizontal
///
/// `offset` points from the target's center to the contact point. A head-on
/// approach along the offset gives 90°, a grazing one gives 0°. Degenerate
/// geometry (zero speed or zero offset) is treated as vertical.
///
/// # Examples
///
/// ```
/// use impact::collisions::assessment::impact_angle;
/// use nalgebra::Vector3;
///
/// let offset = Vector3::new(1.0, 0.0, 0.0);
/// assert_eq!(impact_angle(&Vector3::new(-5.0, 0.0, 0.0), &offset), 90.0);
/// assert!(impact_angle(&Vector3::new(0.0, 5.0, 0.0), &offset).abs() < 1e-12);
/// ```
pub fn impact_angle(velocity: &Vector3<f64>, offset: &Vector3<f64>) -> f64 {
    let speed = velocity.norm();
    let distance = offset.norm();
    if speed == 0.0 || distance == 0.0 {
        return 90.0;
    }
    let cos = (velocity.dot(offset) / (speed * distance)).abs().clamp(0.0, 1.0);
    90.0 - cos.acos().to_degrees()
}
