//! # Material Models
//!
//! Uniaxial stress-strain laws for concrete and reinforcing steel per
//! EN 1992-1-1 section 3.
//!
//! ## Sign Convention
//!
//! Compression is **positive** for strain, stress and axial force; tension
//! is negative. Both laws return a positive stress for a positive strain.
//! This is the only module that states the convention, and
//! [`check_sign_convention`] is the single place it is verified.
//!
//! ## Laws
//!
//! - [`ConcreteLaw`] - parabola-rectangle or rectangular stress block, no
//!   tensile strength
//! - [`SteelLaw`] - elastic, perfectly plastic, symmetric in tension and
//!   compression
//!
//! ## Example
//!
//! ```rust
//! use conc_core::materials::{ConcreteLaw, MaterialLaw, MaterialOptions, SteelLaw};
//!
//! let options = MaterialOptions { alpha_cc: 0.85, ..Default::default() };
//! let concrete = ConcreteLaw::eurocode(25.0, &options).unwrap();
//! let steel = SteelLaw::eurocode(500.0, &options).unwrap();
//!
//! assert!((concrete.fcd() - 14.1667).abs() < 1e-3);
//! assert_eq!(concrete.stress(-0.001), 0.0);
//! assert!((steel.stress(0.01) - 434.78).abs() < 1e-2);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{ConcreteLaw, ConcreteModel};
pub use steel::SteelLaw;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Sign of a compressive strain, stress or axial force
pub const COMPRESSION: f64 = 1.0;

/// Sign of a tensile strain, stress or axial force
pub const TENSION: f64 = -1.0;

/// A uniaxial stress-strain relationship.
///
/// Implementations are pure and stateless so a single law can be shared by
/// every sample of a parallel capacity sweep.
pub trait MaterialLaw: Send + Sync {
    /// Stress for a given strain (compression positive)
    fn stress(&self, strain: f64) -> f64;

    /// Largest admissible compressive strain (`f64::INFINITY` when unbounded)
    fn limit_strain(&self) -> f64;

    /// Strains where the law changes analytic form.
    ///
    /// Integrating across a breakpoint with a single polynomial rule loses
    /// exactness, so the integrator splits regions at these strains.
    fn breakpoints(&self) -> Vec<f64>;

    /// Largest stress the law can deliver in compression
    fn peak_stress(&self) -> f64;

    /// Short human-readable description
    fn name(&self) -> &'static str;
}

/// Verify that a law follows the crate's sign convention: no stress at zero
/// strain, positive stress in compression and non-positive stress in tension.
pub fn check_sign_convention(law: &dyn MaterialLaw) -> CalcResult<()> {
    let strain = law.limit_strain().min(1.0);
    let at_zero = law.stress(0.0);
    let compressive = law.stress(COMPRESSION * strain);
    let tensile = law.stress(TENSION * strain);

    if at_zero != 0.0 || !(compressive > 0.0) || !(tensile <= 0.0) {
        return Err(CalcError::invalid_material(
            law.name(),
            format!(
                "stress(0) = {}, stress(+{strain}) = {}, stress(-{strain}) = {}",
                at_zero, compressive, tensile
            ),
            "Law does not follow the compression-positive sign convention",
        ));
    }
    Ok(())
}

/// Partial factors, model choice and strain limits shared by both laws.
///
/// Every field has a default, so `{}` is a valid JSON configuration.
///
/// ## JSON Example
///
/// ```json
/// {
///   "gamma_c": 1.5,
///   "gamma_s": 1.15,
///   "alpha_cc": 0.85,
///   "concrete_model": "ParabolaRectangle"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOptions {
    /// Partial factor for concrete
    pub gamma_c: f64,
    /// Partial factor for reinforcing steel
    pub gamma_s: f64,
    /// Long-term and loading effects coefficient on fck
    pub alpha_cc: f64,
    /// Steel modulus of elasticity (MPa)
    pub es: f64,
    /// Concrete compression law
    pub concrete_model: ConcreteModel,
    /// Ultimate strain in bending; `None` takes εcu2 / εcu3 from Table 3.1
    pub eps_cu: Option<f64>,
    /// Ultimate strain in uniform compression; `None` takes εc2 / εc3 from Table 3.1
    pub eps_c: Option<f64>,
    /// Strain magnitude applied everywhere in the full-tension state
    pub eps_tension: f64,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            gamma_c: 1.5,
            gamma_s: 1.15,
            alpha_cc: 1.0,
            es: 200_000.0,
            concrete_model: ConcreteModel::ParabolaRectangle,
            eps_cu: None,
            eps_c: None,
            eps_tension: 0.01,
        }
    }
}

impl MaterialOptions {
    /// Validate factors and strain overrides
    pub fn validate(&self) -> CalcResult<()> {
        positive("gamma_c", self.gamma_c)?;
        positive("gamma_s", self.gamma_s)?;
        positive("alpha_cc", self.alpha_cc)?;
        positive("es", self.es)?;
        positive("eps_tension", self.eps_tension)?;
        if let Some(eps_cu) = self.eps_cu {
            positive("eps_cu", eps_cu)?;
        }
        if let Some(eps_c) = self.eps_c {
            positive("eps_c", eps_c)?;
        }
        Ok(())
    }
}

/// Reject zero, negative and non-finite material parameters
pub(crate) fn positive(parameter: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_material(
            parameter,
            value.to_string(),
            "Must be a positive, finite number",
        ))
    }
}
