//! Concrete in compression (EN 1992-1-1, 3.1.7).
//!
//! Strength classes up to C90/105 are supported. Strain limits and the
//! parabola exponent follow Table 3.1:
//!
//! ```text
//! fck ≤ 50:  εc2 = 2.0‰  εcu2 = 3.5‰  n = 2.0  εc3 = 1.75‰  λ = 0.8  η = 1.0
//! fck > 50:  εc2  = 2.0 + 0.085(fck − 50)^0.53          ‰
//!            εcu2 = 2.6 + 35((90 − fck)/100)^4           ‰
//!            n    = 1.4 + 23.4((90 − fck)/100)^4
//!            εc3  = 1.75 + 0.55(fck − 50)/40             ‰
//!            λ    = 0.8 − (fck − 50)/400
//!            η    = 1.0 − (fck − 50)/200
//! ```
//!
//! Table 3.1 gives εc2 = εcu2 = 2.6‰ at C90; the closed-form εc2 is capped
//! at εcu2 so the rounded table value is reproduced.
//!
//! Tensile strength is ignored: any strain ≤ 0 gives exactly zero stress.
//!
//! For fck > 50 the parabola exponent is not an integer, so the stress is no
//! longer a polynomial in strain. [`MaterialLaw::breakpoints`] then reports
//! [`PARABOLA_BANDS`] equal strain bands up to εc2 and the section
//! integration becomes a close approximation instead of an exact one.

use serde::{Deserialize, Serialize};

use super::{positive, MaterialLaw, MaterialOptions};
use crate::errors::{CalcError, CalcResult};

/// Highest characteristic strength covered by Table 3.1 (MPa)
pub const MAX_FCK: f64 = 90.0;

/// Strain bands the parabola is split into when its exponent is not 2
pub const PARABOLA_BANDS: usize = 16;

/// Shape of the concrete compression law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcreteModel {
    /// Parabola up to εc2, constant fcd up to εcu2 (3.1.7(1))
    #[default]
    ParabolaRectangle,
    /// Constant η·fcd over the outer λ·x of the compression zone (3.1.7(3))
    RectangularBlock,
}

/// Design compression law of a concrete strength class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteLaw {
    fck: f64,
    fcd: f64,
    model: ConcreteModel,
    eps_c2: f64,
    eps_c3: f64,
    eps_cu: f64,
    exponent: f64,
    lambda: f64,
    eta: f64,
    uniform_strain: f64,
}

impl ConcreteLaw {
    /// Build the design law for characteristic strength `fck` (MPa).
    ///
    /// `fcd = α_cc·fck/γ_c`. Strain overrides in `options` replace the
    /// Table 3.1 values for εcu and for the uniform-compression strain.
    ///
    /// # Errors
    /// `InvalidMaterial` when fck is outside (0, 90], a factor is not
    /// positive, or the uniform-compression strain exceeds εcu.
    pub fn eurocode(fck: f64, options: &MaterialOptions) -> CalcResult<Self> {
        positive("fck", fck)?;
        if fck > MAX_FCK {
            return Err(CalcError::invalid_material(
                "fck",
                fck.to_string(),
                format!("EN 1992-1-1 Table 3.1 covers strengths up to {MAX_FCK} MPa"),
            ));
        }
        positive("gamma_c", options.gamma_c)?;
        positive("alpha_cc", options.alpha_cc)?;

        let high = (fck - 50.0).max(0.0);
        let reserve = ((90.0 - fck) / 100.0).powi(4);
        let (eps_c2, eps_cu_table, exponent) = if fck <= 50.0 {
            (2.0e-3, 3.5e-3, 2.0)
        } else {
            (
                (2.0 + 0.085 * high.powf(0.53)) * 1e-3,
                (2.6 + 35.0 * reserve) * 1e-3,
                1.4 + 23.4 * reserve,
            )
        };
        // Table 3.1 rounds εc2 and εcu2 to the same 2.6‰ at C90; the closed
        // forms overshoot εc2 by a hair there
        let eps_c2 = eps_c2.min(eps_cu_table);
        let eps_c3 = ((1.75 + 0.55 * high / 40.0) * 1e-3).min(eps_cu_table);
        let lambda = 0.8 - high / 400.0;
        let eta = 1.0 - high / 200.0;

        let eps_cu = match options.eps_cu {
            Some(value) => {
                positive("eps_cu", value)?;
                value
            }
            None => eps_cu_table,
        };
        let uniform_strain = match (options.eps_c, options.concrete_model) {
            (Some(value), _) => {
                positive("eps_c", value)?;
                if value > eps_cu {
                    return Err(CalcError::invalid_material(
                        "eps_c",
                        value.to_string(),
                        format!("Uniform-compression strain must not exceed eps_cu = {eps_cu}"),
                    ));
                }
                value
            }
            (None, ConcreteModel::ParabolaRectangle) => eps_c2.min(eps_cu),
            (None, ConcreteModel::RectangularBlock) => eps_c3.min(eps_cu),
        };

        let law = Self {
            fck,
            fcd: options.alpha_cc * fck / options.gamma_c,
            model: options.concrete_model,
            eps_c2,
            eps_c3,
            eps_cu,
            exponent,
            lambda,
            eta,
            uniform_strain,
        };
        log::debug!(
            "concrete C{fck}: fcd = {:.3}, eps_cu = {:.5}, eps_c = {:.5}, model = {:?}",
            law.fcd,
            law.eps_cu,
            law.uniform_strain,
            law.model
        );
        Ok(law)
    }

    /// Characteristic cylinder strength fck (MPa)
    pub fn fck(&self) -> f64 {
        self.fck
    }

    /// Design compressive strength fcd (MPa)
    pub fn fcd(&self) -> f64 {
        self.fcd
    }

    pub fn model(&self) -> ConcreteModel {
        self.model
    }

    /// Strain at the end of the parabola, εc2
    pub fn eps_c2(&self) -> f64 {
        self.eps_c2
    }

    /// Block-model strain limit in uniform compression, εc3
    pub fn eps_c3(&self) -> f64 {
        self.eps_c3
    }

    /// Ultimate strain in bending, εcu
    pub fn eps_cu(&self) -> f64 {
        self.eps_cu
    }

    /// Parabola exponent n
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Block depth factor λ
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Block strength factor η
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Ultimate strain when the whole section is uniformly compressed
    pub fn uniform_compression_strain(&self) -> f64 {
        self.uniform_strain
    }

    /// Strain where the rectangular block starts, (1 − λ)·εcu
    pub fn block_onset_strain(&self) -> f64 {
        (1.0 - self.lambda) * self.eps_cu
    }
}

impl MaterialLaw for ConcreteLaw {
    fn stress(&self, strain: f64) -> f64 {
        if strain <= 0.0 {
            return 0.0;
        }
        match self.model {
            ConcreteModel::ParabolaRectangle => {
                if strain >= self.eps_c2 {
                    self.fcd
                } else {
                    self.fcd * (1.0 - (1.0 - strain / self.eps_c2).powf(self.exponent))
                }
            }
            ConcreteModel::RectangularBlock => {
                if strain >= self.block_onset_strain() {
                    self.eta * self.fcd
                } else {
                    0.0
                }
            }
        }
    }

    fn limit_strain(&self) -> f64 {
        self.eps_cu
    }

    fn breakpoints(&self) -> Vec<f64> {
        match self.model {
            ConcreteModel::ParabolaRectangle if self.exponent == 2.0 => vec![self.eps_c2],
            ConcreteModel::ParabolaRectangle => (1..=PARABOLA_BANDS)
                .map(|k| self.eps_c2 * k as f64 / PARABOLA_BANDS as f64)
                .collect(),
            ConcreteModel::RectangularBlock => vec![self.block_onset_strain()],
        }
    }

    fn peak_stress(&self) -> f64 {
        match self.model {
            ConcreteModel::ParabolaRectangle => self.fcd,
            ConcreteModel::RectangularBlock => self.eta * self.fcd,
        }
    }

    fn name(&self) -> &'static str {
        match self.model {
            ConcreteModel::ParabolaRectangle => "concrete (parabola-rectangle)",
            ConcreteModel::RectangularBlock => "concrete (rectangular block)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c25() -> ConcreteLaw {
        let options = MaterialOptions {
            alpha_cc: 0.85,
            ..Default::default()
        };
        ConcreteLaw::eurocode(25.0, &options).unwrap()
    }

    #[test]
    fn test_design_strength() {
        assert_relative_eq!(c25().fcd(), 0.85 * 25.0 / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_tension_gives_exactly_zero() {
        let law = c25();
        assert_eq!(law.stress(0.0), 0.0);
        assert_eq!(law.stress(-1e-6), 0.0);
        assert_eq!(law.stress(-0.01), 0.0);
    }

    #[test]
    fn test_parabola_rectangle_shape() {
        let law = c25();
        let fcd = law.fcd();
        // Half-way up the parabola: 1 − 0.5² = 0.75
        assert_relative_eq!(law.stress(0.001), 0.75 * fcd, epsilon = 1e-12);
        assert_relative_eq!(law.stress(0.002), fcd, epsilon = 1e-12);
        assert_relative_eq!(law.stress(0.0035), fcd, epsilon = 1e-12);
        assert_eq!(law.breakpoints(), vec![0.002]);
        assert_relative_eq!(law.uniform_compression_strain(), 0.002);
    }

    #[test]
    fn test_rectangular_block() {
        let options = MaterialOptions {
            concrete_model: ConcreteModel::RectangularBlock,
            ..Default::default()
        };
        let law = ConcreteLaw::eurocode(30.0, &options).unwrap();
        let onset = 0.2 * 0.0035;
        assert_relative_eq!(law.block_onset_strain(), onset, epsilon = 1e-15);
        assert_eq!(law.stress(onset * 0.99), 0.0);
        assert_relative_eq!(law.stress(onset * 1.01), 20.0, epsilon = 1e-12);
        assert_relative_eq!(law.uniform_compression_strain(), 0.00175);
    }

    #[test]
    fn test_table_3_1_high_strength() {
        let law = ConcreteLaw::eurocode(90.0, &MaterialOptions::default()).unwrap();
        assert_relative_eq!(law.eps_cu(), 2.6e-3, epsilon = 1e-12);
        assert_relative_eq!(law.exponent(), 1.4, epsilon = 1e-12);
        assert_relative_eq!(law.eps_c3(), 2.3e-3, epsilon = 1e-12);
        assert_relative_eq!(law.lambda(), 0.7, epsilon = 1e-12);
        assert_relative_eq!(law.eta(), 0.8, epsilon = 1e-12);
        // closed form gives 2.6005‰, capped at εcu2
        assert_relative_eq!(law.eps_c2(), 2.6e-3, epsilon = 2e-5);

        let c60 = ConcreteLaw::eurocode(60.0, &MaterialOptions::default()).unwrap();
        assert_relative_eq!(c60.eps_cu(), (2.6 + 35.0 * 0.3f64.powi(4)) * 1e-3, epsilon = 1e-12);
    }

    #[test]
    fn test_c90_default_strains_accepted() {
        for model in [ConcreteModel::ParabolaRectangle, ConcreteModel::RectangularBlock] {
            let options = MaterialOptions {
                concrete_model: model,
                ..Default::default()
            };
            let law = ConcreteLaw::eurocode(90.0, &options).unwrap();
            assert!(law.uniform_compression_strain() <= law.eps_cu());
            assert!(law.eps_c2() <= law.eps_cu());
        }
        let law = ConcreteLaw::eurocode(90.0, &MaterialOptions::default()).unwrap();
        assert_eq!(law.eps_c2(), law.eps_cu());
        assert_relative_eq!(law.stress(law.eps_cu()), law.fcd(), epsilon = 1e-12);
    }

    #[test]
    fn test_high_strength_parabola_is_banded() {
        let law = ConcreteLaw::eurocode(70.0, &MaterialOptions::default()).unwrap();
        let cuts = law.breakpoints();
        assert_eq!(cuts.len(), PARABOLA_BANDS);
        assert_relative_eq!(cuts[PARABOLA_BANDS - 1], law.eps_c2(), max_relative = 1e-12);
        assert!(cuts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_table_3_1_continuous_at_c50() {
        let normal = ConcreteLaw::eurocode(50.0, &MaterialOptions::default()).unwrap();
        let high = ConcreteLaw::eurocode(50.001, &MaterialOptions::default()).unwrap();
        assert_relative_eq!(normal.eps_cu(), high.eps_cu(), epsilon = 1e-5);
        assert_relative_eq!(normal.exponent(), high.exponent(), epsilon = 1e-2);
    }

    #[test]
    fn test_invalid_strengths() {
        let options = MaterialOptions::default();
        assert!(ConcreteLaw::eurocode(0.0, &options).is_err());
        assert!(ConcreteLaw::eurocode(-25.0, &options).is_err());
        assert!(ConcreteLaw::eurocode(100.0, &options).is_err());
        assert!(ConcreteLaw::eurocode(f64::NAN, &options).is_err());
    }

    #[test]
    fn test_uniform_strain_override() {
        let options = MaterialOptions {
            eps_c: Some(0.00175),
            ..Default::default()
        };
        let law = ConcreteLaw::eurocode(25.0, &options).unwrap();
        assert_relative_eq!(law.uniform_compression_strain(), 0.00175);

        let too_large = MaterialOptions {
            eps_c: Some(0.004),
            ..Default::default()
        };
        let err = ConcreteLaw::eurocode(25.0, &too_large).unwrap_err();
        assert!(matches!(err, CalcError::InvalidMaterial { ref parameter, .. } if parameter == "eps_c"));
    }
}
