//! # Strain Field
//!
//! Plane sections remain plane: the longitudinal strain over the cross
//! section is a linear function of position, fixed by a neutral-axis line
//! and a curvature. Two limits of that family cannot be written as a finite
//! line and curvature, so they are explicit states:
//!
//! - [`NeutralAxisState::FullTension`] - the axis has left the section on
//!   the compression side; uniform tensile strain everywhere
//! - [`NeutralAxisState::FullCompression`] - uniform compressive strain
//!   everywhere
//!
//! ## Formula
//!
//! ```text
//! ε(p) = κ · d(p)        d = signed distance from the neutral axis
//! ```
//!
//! With compression positive, the compressed side is where `κ·d > 0`.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{Line, Point, Polygon};
use crate::materials::{ConcreteLaw, SteelLaw};

/// Strain magnitudes that define the ultimate states
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainLimits {
    /// Extreme-fibre concrete strain in bending, εcu
    pub bending_ultimate: f64,
    /// Concrete strain in uniform compression, εc
    pub uniform_compression: f64,
    /// Strain magnitude of the full-tension state
    pub uniform_tension: f64,
}

impl StrainLimits {
    /// Validated limits. All three must be positive and `εc ≤ εcu`.
    pub fn new(bending_ultimate: f64, uniform_compression: f64, uniform_tension: f64) -> CalcResult<Self> {
        for (parameter, value) in [
            ("eps_cu", bending_ultimate),
            ("eps_c", uniform_compression),
            ("eps_tension", uniform_tension),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_material(
                    parameter,
                    value.to_string(),
                    "Strain limits must be positive and finite",
                ));
            }
        }
        if uniform_compression > bending_ultimate {
            return Err(CalcError::invalid_material(
                "eps_c",
                uniform_compression.to_string(),
                format!("Must not exceed eps_cu = {bending_ultimate}"),
            ));
        }
        Ok(Self {
            bending_ultimate,
            uniform_compression,
            uniform_tension,
        })
    }

    /// Limits implied by a pair of laws. The full-tension strain must take
    /// every bar past yield, otherwise that state would not be a capacity limit.
    pub fn from_laws(concrete: &ConcreteLaw, steel: &SteelLaw, uniform_tension: f64) -> CalcResult<Self> {
        let limits = Self::new(
            concrete.eps_cu(),
            concrete.uniform_compression_strain(),
            uniform_tension,
        )?;
        if uniform_tension <= steel.yield_strain() {
            return Err(CalcError::invalid_material(
                "eps_tension",
                uniform_tension.to_string(),
                format!("Must exceed the steel yield strain {:.6}", steel.yield_strain()),
            ));
        }
        Ok(limits)
    }

    /// Depth ratio of the pivot fibre, 1 − εc/εcu
    pub fn pivot_depth_ratio(&self) -> f64 {
        1.0 - self.uniform_compression / self.bending_ultimate
    }
}

/// A linear strain field over the section.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "Bending", "axis": { "normal": { "x": 0.0, "y": 1.0 }, "offset": -150.0 }, "curvature": 1.2e-5 }
/// { "kind": "FullTension" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NeutralAxisState {
    /// Neutral axis inside or near the section; `ε = curvature · axis.signed_distance(p)`
    Bending { axis: Line, curvature: f64 },
    /// Uniform tensile strain `−uniform_tension`
    FullTension,
    /// Uniform compressive strain `+uniform_compression`
    FullCompression,
}

impl NeutralAxisState {
    /// Bending state with validated curvature.
    ///
    /// # Errors
    /// `DegenerateGeometry` for zero or non-finite curvature.
    pub fn bending(axis: Line, curvature: f64) -> CalcResult<Self> {
        let state = NeutralAxisState::Bending { axis, curvature };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            NeutralAxisState::Bending { curvature, .. } if !curvature.is_finite() || curvature == 0.0 => {
                Err(CalcError::degenerate(
                    "strain field",
                    format!("curvature {curvature} does not define a bending state"),
                ))
            }
            _ => Ok(()),
        }
    }

    /// True for the two uniform-strain limits
    pub fn is_degenerate(&self) -> bool {
        !matches!(self, NeutralAxisState::Bending { .. })
    }

    /// Strain at `p` (compression positive)
    pub fn strain_at(&self, limits: &StrainLimits, p: Point) -> f64 {
        match *self {
            NeutralAxisState::Bending { axis, curvature } => curvature * axis.signed_distance(p),
            NeutralAxisState::FullTension => -limits.uniform_tension,
            NeutralAxisState::FullCompression => limits.uniform_compression,
        }
    }

    /// The neutral axis oriented so its positive side is the compression side
    pub fn compression_line(&self) -> Option<Line> {
        match *self {
            NeutralAxisState::Bending { axis, curvature } if curvature > 0.0 => Some(axis),
            NeutralAxisState::Bending { axis, .. } => Some(axis.reversed()),
            _ => None,
        }
    }

    /// Magnitude of the strain gradient (zero for the uniform states)
    pub fn curvature_magnitude(&self) -> f64 {
        match *self {
            NeutralAxisState::Bending { curvature, .. } => curvature.abs(),
            _ => 0.0,
        }
    }

    /// Largest compressive strain over the outline's vertices
    pub fn extreme_strain(&self, limits: &StrainLimits, outline: &Polygon) -> f64 {
        outline
            .vertices()
            .iter()
            .map(|&p| self.strain_at(limits, p))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn label(&self) -> &'static str {
        match self {
            NeutralAxisState::Bending { .. } => "bending",
            NeutralAxisState::FullTension => "full tension",
            NeutralAxisState::FullCompression => "full compression",
        }
    }
}
