//! # Section Capacity Calculation
//!
//! One-shot N-M capacity analysis of a reinforced concrete section: builds
//! the section, computes its plastic centroid and sweeps the interaction
//! curve, recording every equation applied along the way.
//!
//! ## Assumptions
//!
//! - Plane sections remain plane, full bond
//! - Concrete tensile strength ignored
//! - Bars lumped at their centres, concrete under bars not deducted
//! - Ultimate strains per EN 1992-1-1 6.1
//!
//! ## Example
//!
//! ```rust
//! use conc_core::calculations::capacity::{calculate, CapacityInput};
//!
//! let json = r#"{
//!     "section": {
//!         "label": "C1",
//!         "outline": [
//!             {"x": 0, "y": 0}, {"x": 400, "y": 0},
//!             {"x": 400, "y": -400}, {"x": 0, "y": -400}
//!         ],
//!         "rebars": [
//!             {"x": 50, "y": -50, "diameter": 20}, {"x": 350, "y": -50, "diameter": 20},
//!             {"x": 50, "y": -350, "diameter": 20}, {"x": 350, "y": -350, "diameter": 20}
//!         ],
//!         "fck": 30,
//!         "fyk": 500
//!     },
//!     "sweep": {"points_per_side": 20}
//! }"#;
//!
//! let input: CapacityInput = serde_json::from_str(json).unwrap();
//! let result = calculate(&input).unwrap();
//!
//! println!("N_Rd,max = {:.0} kN", result.squash_load / 1e3);
//! assert!(result.contains(1.0e6, 50.0e6));
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::Point;
use crate::materials::ConcreteModel;
use crate::section::{Section, SectionInput};
use crate::sweep::{self, CapacityCurve, SweepOptions};

/// Input for a capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "section": {
///     "label": "B1",
///     "outline": [{"x": 0, "y": 0}, {"x": 350, "y": 0}, {"x": 350, "y": -450}, {"x": 0, "y": -450}],
///     "rebars": [{"x": 60, "y": -390, "diameter": 25}],
///     "fck": 25,
///     "fyk": 500,
///     "materials": {"alpha_cc": 0.85}
///   },
///   "sweep": {"points_per_side": 30, "angle_deg": 0.0, "both_sides": false}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityInput {
    /// Section geometry and materials
    pub section: SectionInput,

    /// Sweep resolution and axis orientation
    #[serde(default)]
    pub sweep: SweepOptions,
}

impl CapacityInput {
    /// Validate input parameters
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;
        self.sweep.validate()
    }
}

/// Results of a capacity calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Section label
    pub label: String,

    /// Gross concrete area
    pub gross_area: f64,

    /// Geometric centroid of the outline
    pub centroid: Point,

    /// Force-weighted centroid; moments are taken about this point
    pub plastic_centroid: Point,

    /// Total reinforcement area
    pub rebar_area: f64,

    /// Axial resistance in pure tension (magnitude, Σ As·fyd)
    pub tension_capacity: f64,

    /// Axial resistance in uniform compression
    pub squash_load: f64,

    /// Largest moment on the curve and the axial force it occurs at
    pub max_moment: f64,
    pub n_at_max_moment: f64,

    /// Moment resistance at N = 0, if the curve crosses it (solved on the
    /// neutral-axis depth, not read off the sampled curve)
    pub pure_bending_moment: Option<f64>,

    /// The ordered interaction curve
    pub curve: CapacityCurve,

    /// Equations applied, in order
    pub equations: EquationTracker,
}

impl CapacityResult {
    /// Whether a design load pair (NEd, MEd) lies inside the interaction curve
    pub fn contains(&self, n: f64, m: f64) -> bool {
        self.curve.contains(n, m)
    }
}

/// Run the capacity analysis.
///
/// # Errors
/// Any construction error of the section (`InvalidGeometry`,
/// `InvalidMaterial`, `InvalidInput`) and any failure at the two limit
/// states of the sweep.
pub fn calculate(input: &CapacityInput) -> CalcResult<CapacityResult> {
    input.validate()?;
    let section = input.section.build()?;
    let label = input.section.label.clone();

    let equations = record_equations(&section, &label);
    let curve = sweep::capacity_curve(&section, &input.sweep)?;

    let squash_load = curve
        .full_compression()
        .map(|p| p.n)
        .ok_or_else(|| CalcError::calculation_failed("capacity", "sweep has no full-compression point"))?;
    let (max_moment, n_at_max_moment) = curve
        .max_moment_point()
        .map(|p| (p.m, p.n))
        .ok_or_else(|| CalcError::calculation_failed("capacity", "sweep produced no points"))?;
    let pure_bending_moment = curve.pure_bending_moment(&section)?;

    log::info!(
        "section '{}': N_max = {:.0}, N_min = {:.0}, M_max = {:.0}",
        label,
        squash_load,
        -section.tension_capacity(),
        max_moment
    );

    Ok(CapacityResult {
        label,
        gross_area: section.gross_area(),
        centroid: section.centroid(),
        plastic_centroid: section.plastic_centroid(),
        rebar_area: section.rebar_area(),
        tension_capacity: section.tension_capacity(),
        squash_load,
        max_moment,
        n_at_max_moment,
        pure_bending_moment,
        curve,
        equations,
    })
}

fn record_equations(section: &Section, label: &str) -> EquationTracker {
    let mut tracker = EquationTracker::new();
    let concrete = section.concrete();
    let has_bars = !section.rebars().is_empty();

    tracker.record_for_member(Equation::DesignConcreteStrength, format!("C{}", concrete.fck()), label);
    tracker.record_for_member(Equation::ConcreteStrainLimits, "strain limits", label);
    let law = match concrete.model() {
        ConcreteModel::ParabolaRectangle => Equation::ParabolaRectangle,
        ConcreteModel::RectangularBlock => Equation::RectangularStressBlock,
    };
    tracker.record_for_member(law, "concrete stress", label);
    if has_bars {
        tracker.record_for_member(Equation::DesignYieldStrength, format!("fyk = {}", section.steel().fyk()), label);
        tracker.record_for_member(Equation::SteelElasticPlastic, "bar stress", label);
    }

    tracker.record_for_member(Equation::PolygonArea, "gross area", label);
    tracker.record_for_member(Equation::PolygonCentroid, "geometric centroid", label);
    if has_bars {
        tracker.record_for_member(Equation::RebarArea, format!("{} bars", section.rebars().len()), label);
    }
    tracker.record_for_member(Equation::PlasticCentroid, "moment reference point", label);

    tracker.record_for_member(Equation::LinearStrainDistribution, "bending states", label);
    tracker.record_for_member(Equation::PivotStrainDistribution, "compression-dominated states", label);
    tracker.record_for_member(Equation::UniformStrain, "full tension and full compression", label);

    tracker.record_for_member(Equation::ConcreteResultant, "every sample", label);
    if has_bars {
        tracker.record_for_member(Equation::RebarForce, "every sample", label);
    }
    tracker.record_for_member(Equation::SectionResultant, "every sample", label);
    tracker
}
