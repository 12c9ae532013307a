//! Reinforcing steel (EN 1992-1-1, 3.2.7(2)b): elastic up to f_yd, then a
//! horizontal top branch with no strain limit.

use serde::{Deserialize, Serialize};

use super::{positive, MaterialLaw, MaterialOptions};
use crate::errors::CalcResult;

/// Elastic, perfectly plastic design law for reinforcement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelLaw {
    fyk: f64,
    fyd: f64,
    es: f64,
}

impl SteelLaw {
    /// Design law for characteristic yield strength `fyk` (MPa), with
    /// `f_yd = f_yk/γ_s` and the modulus from `options`.
    pub fn eurocode(fyk: f64, options: &MaterialOptions) -> CalcResult<Self> {
        Self::new(fyk, options.gamma_s, options.es)
    }

    pub fn new(fyk: f64, gamma_s: f64, es: f64) -> CalcResult<Self> {
        positive("fyk", fyk)?;
        positive("gamma_s", gamma_s)?;
        positive("es", es)?;
        Ok(Self {
            fyk,
            fyd: fyk / gamma_s,
            es,
        })
    }

    pub fn fyk(&self) -> f64 {
        self.fyk
    }

    /// Design yield strength f_yd
    pub fn fyd(&self) -> f64 {
        self.fyd
    }

    /// Modulus of elasticity E_s
    pub fn es(&self) -> f64 {
        self.es
    }

    /// Design yield strain ε_yd = f_yd/E_s
    pub fn yield_strain(&self) -> f64 {
        self.fyd / self.es
    }
}

impl MaterialLaw for SteelLaw {
    fn stress(&self, strain: f64) -> f64 {
        (self.es * strain).clamp(-self.fyd, self.fyd)
    }

    fn limit_strain(&self) -> f64 {
        f64::INFINITY
    }

    fn breakpoints(&self) -> Vec<f64> {
        let eps_y = self.yield_strain();
        vec![-eps_y, eps_y]
    }

    fn peak_stress(&self) -> f64 {
        self.fyd
    }

    fn name(&self) -> &'static str {
        "reinforcing steel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_elastic_branch() {
        let steel = SteelLaw::new(500.0, 1.15, 200_000.0).unwrap();
        assert_relative_eq!(steel.stress(0.001), 200.0);
        assert_relative_eq!(steel.stress(-0.001), -200.0);
        assert_eq!(steel.stress(0.0), 0.0);
    }

    #[test]
    fn test_clamped_at_design_yield() {
        let steel = SteelLaw::eurocode(500.0, &MaterialOptions::default()).unwrap();
        let fyd = 500.0 / 1.15;
        assert_relative_eq!(steel.fyd(), fyd);
        assert_relative_eq!(steel.stress(0.05), fyd);
        assert_relative_eq!(steel.stress(-0.05), -fyd);
        assert_relative_eq!(steel.stress(steel.yield_strain()), fyd, epsilon = 1e-9);
        assert_relative_eq!(steel.yield_strain(), fyd / 200_000.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(SteelLaw::new(0.0, 1.15, 200_000.0).is_err());
        assert!(SteelLaw::new(500.0, -1.0, 200_000.0).is_err());
        assert!(SteelLaw::new(500.0, 1.15, f64::INFINITY).is_err());
    }
}
