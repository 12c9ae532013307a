//! # Equation Registry
//!
//! Every formula the engine applies, with its Eurocode clause, variables and
//! assumptions. Calculations record which equations they used in an
//! [`EquationTracker`], so a result carries its own audit trail.
//!
//! ## Usage
//!
//! ```rust
//! use conc_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::DesignConcreteStrength, "C25/30");
//!
//! let meta = Equation::DesignConcreteStrength.metadata();
//! assert_eq!(meta.formula_plain, "fcd = alpha_cc * fck / gamma_c");
//! assert_eq!(meta.reference.citation(), "EN 1992-1-1 3.1.6(1)");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Code References
// ============================================================================

/// Source of an equation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// EN 1992 (Eurocode 2) - Design of concrete structures
    EN1992 {
        part: &'static str,
        clause: &'static str,
    },
    /// Plane geometry and statics, no code clause
    Mechanics,
}

impl CodeReference {
    /// Full citation for reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::EN1992 { part, clause } => format!("EN 1992-{} {}", part, clause),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::EN1992 { .. } => "EC2",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Grouping used when listing equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Areas, centroids, plastic centroid
    SectionProperties,
    /// Design strengths and stress-strain laws
    MaterialLaws,
    /// Strain over the section at an ultimate state
    StrainDistribution,
    /// Forces and moments
    Resultants,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::MaterialLaws => "Material Laws",
            EquationCategory::StrainDistribution => "Strain Distribution",
            EquationCategory::Resultants => "Resultants",
        }
    }

    /// Listing order (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::MaterialLaws => 1,
            EquationCategory::SectionProperties => 2,
            EquationCategory::StrainDistribution => 3,
            EquationCategory::Resultants => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// A symbol appearing in an equation
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units for the usual mm / MPa input (callers may use any consistent set)
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Everything needed to cite and explain an equation
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the equation calculates
    pub description: &'static str,
    /// Formula in plain text
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Module implementing the equation
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the section analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Material Laws
    // -------------------------------------------------------------------------
    /// fcd = αcc·fck/γc
    DesignConcreteStrength,
    /// fyd = fyk/γs
    DesignYieldStrength,
    /// εc2, εcu2, n, εc3, λ, η from fck
    ConcreteStrainLimits,
    /// σc = fcd[1 − (1 − εc/εc2)^n]
    ParabolaRectangle,
    /// σc = η·fcd over λ·x
    RectangularStressBlock,
    /// σs = clamp(Es·εs, −fyd, fyd)
    SteelElasticPlastic,

    // -------------------------------------------------------------------------
    // Section Properties
    // -------------------------------------------------------------------------
    /// Shoelace area
    PolygonArea,
    /// Area centroid of a polygon
    PolygonCentroid,
    /// As = πd²/4
    RebarArea,
    /// Force-weighted centroid at full plastic compression
    PlasticCentroid,

    // -------------------------------------------------------------------------
    // Strain Distribution
    // -------------------------------------------------------------------------
    /// ε = εcu·(d/x), extreme fibre at εcu
    LinearStrainDistribution,
    /// Strain through pivot C when the axis is outside the section
    PivotStrainDistribution,
    /// Uniform εc or uniform tension
    UniformStrain,

    // -------------------------------------------------------------------------
    // Resultants
    // -------------------------------------------------------------------------
    /// Nc = ∫σc dA and its first moments
    ConcreteResultant,
    /// Fs = σs·As
    RebarForce,
    /// N = Nc + ΣFs, M about the plastic centroid
    SectionResultant,
}

impl Equation {
    /// Full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::DesignConcreteStrength => EquationMetadata {
                name: "Design Compressive Strength of Concrete",
                description: "Design value of the concrete cylinder strength",
                formula_plain: "fcd = alpha_cc * fck / gamma_c",
                reference: CodeReference::EN1992 { part: "1-1", clause: "3.1.6(1)" },
                variables: vec![
                    Variable::new("fcd", "Design compressive strength", "MPa"),
                    Variable::new("fck", "Characteristic cylinder strength", "MPa"),
                    Variable::new("alpha_cc", "Long-term effects coefficient", "-"),
                    Variable::new("gamma_c", "Partial factor for concrete", "-"),
                ],
                assumptions: vec!["fck ≤ 90 MPa"],
                category: EquationCategory::MaterialLaws,
                source_module: "materials/concrete.rs",
                source_function: "ConcreteLaw::eurocode",
            },

            Equation::DesignYieldStrength => EquationMetadata {
                name: "Design Yield Strength of Reinforcement",
                description: "Design value of the reinforcement yield strength",
                formula_plain: "fyd = fyk / gamma_s",
                reference: CodeReference::EN1992 { part: "1-1", clause: "3.2.7(2)" },
                variables: vec![
                    Variable::new("fyd", "Design yield strength", "MPa"),
                    Variable::new("fyk", "Characteristic yield strength", "MPa"),
                    Variable::new("gamma_s", "Partial factor for steel", "-"),
                ],
                assumptions: vec!["Same strength in tension and compression"],
                category: EquationCategory::MaterialLaws,
                source_module: "materials/steel.rs",
                source_function: "SteelLaw::eurocode",
            },

            Equation::ConcreteStrainLimits => EquationMetadata {
                name: "Concrete Strain Limits",
                description: "Strain limits and parabola exponent as functions of fck",
                formula_plain: "fck > 50: eps_c2 = 2.0 + 0.085(fck-50)^0.53 ‰, eps_cu2 = 2.6 + 35((90-fck)/100)^4 ‰, \
                                n = 1.4 + 23.4((90-fck)/100)^4, eps_c3 = 1.75 + 0.55(fck-50)/40 ‰",
                reference: CodeReference::EN1992 { part: "1-1", clause: "Table 3.1" },
                variables: vec![
                    Variable::new("eps_c2", "Strain at peak stress, parabola-rectangle", "-"),
                    Variable::new("eps_cu2", "Ultimate strain", "-"),
                    Variable::new("n", "Parabola exponent", "-"),
                    Variable::new("eps_c3", "Strain limit in uniform compression, block", "-"),
                ],
                assumptions: vec!["fck ≤ 50: eps_c2 = 2.0‰, eps_cu2 = 3.5‰, n = 2, eps_c3 = 1.75‰"],
                category: EquationCategory::MaterialLaws,
                source_module: "materials/concrete.rs",
                source_function: "ConcreteLaw::eurocode",
            },

            Equation::ParabolaRectangle => EquationMetadata {
                name: "Parabola-Rectangle Diagram",
                description: "Concrete stress for a compressive strain",
                formula_plain: "sigma_c = fcd[1 - (1 - eps_c/eps_c2)^n] for eps_c < eps_c2, fcd up to eps_cu2",
                reference: CodeReference::EN1992 { part: "1-1", clause: "3.1.7(1)" },
                variables: vec![
                    Variable::new("sigma_c", "Concrete stress", "MPa"),
                    Variable::new("eps_c", "Concrete strain", "-"),
                ],
                assumptions: vec!["Tensile strength ignored"],
                category: EquationCategory::MaterialLaws,
                source_module: "materials/concrete.rs",
                source_function: "ConcreteLaw::stress",
            },

            Equation::RectangularStressBlock => EquationMetadata {
                name: "Rectangular Stress Distribution",
                description: "Constant stress over the outer part of the compression zone",
                formula_plain: "sigma_c = eta * fcd for eps_c >= (1 - lambda) * eps_cu3, else 0",
                reference: CodeReference::EN1992 { part: "1-1", clause: "3.1.7(3)" },
                variables: vec![
                    Variable::new("lambda", "Effective height factor", "-"),
                    Variable::new("eta", "Effective strength factor", "-"),
                ],
                assumptions: vec![
                    "Tensile strength ignored",
                    "Block measured from the extreme fibre along the strain gradient",
                ],
                category: EquationCategory::MaterialLaws,
                source_module: "materials/concrete.rs",
                source_function: "ConcreteLaw::stress",
            },

            Equation::SteelElasticPlastic => EquationMetadata {
                name: "Reinforcement Design Diagram",
                description: "Elastic, perfectly plastic steel with no strain limit",
                formula_plain: "sigma_s = clamp(Es * eps_s, -fyd, fyd)",
                reference: CodeReference::EN1992 { part: "1-1", clause: "3.2.7(2)b" },
                variables: vec![
                    Variable::new("sigma_s", "Steel stress", "MPa"),
                    Variable::new("Es", "Modulus of elasticity", "MPa"),
                    Variable::new("eps_s", "Steel strain", "-"),
                ],
                assumptions: vec!["Horizontal top branch", "Symmetric in tension and compression"],
                category: EquationCategory::MaterialLaws,
                source_module: "materials/steel.rs",
                source_function: "SteelLaw::stress",
            },

            Equation::PolygonArea => EquationMetadata {
                name: "Polygon Area",
                description: "Area of the concrete outline (shoelace formula)",
                formula_plain: "A = 1/2 * sum(x_i * y_i+1 - x_i+1 * y_i)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A", "Gross concrete area", "mm²"),
                    Variable::new("x_i, y_i", "Vertex coordinates", "mm"),
                ],
                assumptions: vec!["Simple polygon", "Bar areas not deducted"],
                category: EquationCategory::SectionProperties,
                source_module: "geometry/polygon.rs",
                source_function: "Polygon::signed_area",
            },

            Equation::PolygonCentroid => EquationMetadata {
                name: "Polygon Centroid",
                description: "Geometric centroid of the concrete outline",
                formula_plain: "Cx = sum((x_i + x_i+1)(x_i * y_i+1 - x_i+1 * y_i)) / 6A",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Cx, Cy", "Centroid coordinates", "mm"),
                    Variable::new("A", "Signed area", "mm²"),
                ],
                assumptions: vec!["Non-zero area"],
                category: EquationCategory::SectionProperties,
                source_module: "geometry/polygon.rs",
                source_function: "Polygon::centroid",
            },

            Equation::RebarArea => EquationMetadata {
                name: "Bar Area",
                description: "Cross-sectional area of a round bar",
                formula_plain: "As = pi * d^2 / 4",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("As", "Bar area", "mm²"),
                    Variable::new("d", "Bar diameter", "mm"),
                ],
                assumptions: vec!["Bar lumped at its centre"],
                category: EquationCategory::SectionProperties,
                source_module: "section.rs",
                source_function: "Rebar::area",
            },

            Equation::PlasticCentroid => EquationMetadata {
                name: "Plastic Centroid",
                description: "Point where a pure axial load at full plastic capacity gives no moment",
                formula_plain: "x_pc = (fc * Ac * xc + sum(As_i * fyd * x_i)) / (fc * Ac + fyd * sum(As_i))",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("fc", "Peak concrete design stress", "MPa"),
                    Variable::new("Ac", "Gross concrete area", "mm²"),
                    Variable::new("xc", "Geometric centroid", "mm"),
                ],
                assumptions: vec!["All bars yielded in compression"],
                category: EquationCategory::SectionProperties,
                source_module: "section.rs",
                source_function: "Section::plastic_centroid",
            },

            Equation::LinearStrainDistribution => EquationMetadata {
                name: "Linear Strain Distribution",
                description: "Plane sections remain plane; extreme fibre at the ultimate strain",
                formula_plain: "eps(d) = eps_cu * d / x",
                reference: CodeReference::EN1992 { part: "1-1", clause: "6.1(2)-(3)" },
                variables: vec![
                    Variable::new("d", "Distance from the neutral axis", "mm"),
                    Variable::new("x", "Neutral-axis depth", "mm"),
                ],
                assumptions: vec!["Full bond between steel and concrete"],
                category: EquationCategory::StrainDistribution,
                source_module: "sweep.rs",
                source_function: "ultimate_state",
            },

            Equation::PivotStrainDistribution => EquationMetadata {
                name: "Pivot Strain Distribution",
                description: "Compression-dominated states rotate about the fibre at (1 - eps_c/eps_cu) h",
                formula_plain: "kappa = eps_c / (x - (1 - eps_c/eps_cu) * h)",
                reference: CodeReference::EN1992 { part: "1-1", clause: "6.1(5), Figure 6.1" },
                variables: vec![
                    Variable::new("kappa", "Curvature", "1/mm"),
                    Variable::new("h", "Section depth along the strain gradient", "mm"),
                ],
                assumptions: vec!["Neutral axis outside the section"],
                category: EquationCategory::StrainDistribution,
                source_module: "sweep.rs",
                source_function: "ultimate_state",
            },

            Equation::UniformStrain => EquationMetadata {
                name: "Uniform Strain Limits",
                description: "Full compression at eps_c and full tension beyond yield",
                formula_plain: "eps = eps_c (full compression), eps = -eps_tension (full tension)",
                reference: CodeReference::EN1992 { part: "1-1", clause: "6.1(5)" },
                variables: vec![
                    Variable::new("eps_c", "Uniform-compression ultimate strain", "-"),
                    Variable::new("eps_tension", "Full-tension strain", "-"),
                ],
                assumptions: vec!["Concrete carries no tension"],
                category: EquationCategory::StrainDistribution,
                source_module: "strain.rs",
                source_function: "NeutralAxisState::strain_at",
            },

            Equation::ConcreteResultant => EquationMetadata {
                name: "Concrete Compression Resultant",
                description: "Integral of concrete stress over the compression zone",
                formula_plain: "Nc = integral(sigma_c dA), Mc = integral(sigma_c * (y - y_pc) dA)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Nc", "Concrete force", "N"),
                    Variable::new("Mc", "Concrete moment about the plastic centroid", "N·mm"),
                ],
                assumptions: vec!["Integrated exactly for polynomial stress laws"],
                category: EquationCategory::Resultants,
                source_module: "integrator.rs",
                source_function: "evaluate",
            },

            Equation::RebarForce => EquationMetadata {
                name: "Bar Force",
                description: "Force in a bar from its strain",
                formula_plain: "Fs = sigma_s(eps_s) * As",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Fs", "Bar force", "N"),
                    Variable::new("As", "Bar area", "mm²"),
                ],
                assumptions: vec!["Concrete displaced by bars not deducted"],
                category: EquationCategory::Resultants,
                source_module: "integrator.rs",
                source_function: "evaluate",
            },

            Equation::SectionResultant => EquationMetadata {
                name: "Section Resultant",
                description: "Axial force and moments of the whole section",
                formula_plain: "N = Nc + sum(Fs), Mx = sum(F * (y - y_pc)), My = -sum(F * (x - x_pc))",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("N", "Axial force, compression positive", "N"),
                    Variable::new("Mx, My", "Moments about the plastic centroid", "N·mm"),
                ],
                assumptions: vec!["Moments taken about the plastic centroid"],
                category: EquationCategory::Resultants,
                source_module: "integrator.rs",
                source_function: "evaluate",
            },
        }
    }

    /// All equations in a category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// All categories in listing order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![SectionProperties, MaterialLaws, StrainDistribution, Resultants];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Material laws
    Equation::DesignConcreteStrength,
    Equation::DesignYieldStrength,
    Equation::ConcreteStrainLimits,
    Equation::ParabolaRectangle,
    Equation::RectangularStressBlock,
    Equation::SteelElasticPlastic,
    // Section properties
    Equation::PolygonArea,
    Equation::PolygonCentroid,
    Equation::RebarArea,
    Equation::PlasticCentroid,
    // Strain distribution
    Equation::LinearStrainDistribution,
    Equation::PivotStrainDistribution,
    Equation::UniformStrain,
    // Resultants
    Equation::ConcreteResultant,
    Equation::RebarForce,
    Equation::SectionResultant,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation applied in a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where or why it was used (e.g. "plastic centroid")
    pub context: String,
    /// Optional: the section label it was applied to
    pub member_label: Option<String>,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: None,
        }
    }

    /// Usage record tied to a labelled section
    pub fn for_member(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during a calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a labelled section
    pub fn record_for_member(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_member(equation, context, label));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Equations used, first occurrence order, no duplicates
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Unique equations grouped by category, categories in listing order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }
        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }

    /// Plain-text list of the equations used, grouped by category
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (category, equations) in self.by_category() {
            out.push_str(&format!("{}\n", category.display_name()));
            for eq in equations {
                let meta = eq.metadata();
                out.push_str(&format!(
                    "  {}: {}  [{}]\n",
                    meta.name,
                    meta.formula_plain,
                    meta.reference.citation()
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 16);
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }
        let steel = Equation::SteelElasticPlastic.metadata();
        assert!(steel.formula_plain.contains("clamp"), "Steel law formula wrong");
    }

    #[test]
    fn test_every_category_populated() {
        for cat in Equation::all_categories() {
            assert!(!Equation::in_category(cat).is_empty(), "{:?} is empty", cat);
        }
    }

    #[test]
    fn test_code_reference_citation() {
        let table = CodeReference::EN1992 { part: "1-1", clause: "Table 3.1" };
        assert_eq!(table.citation(), "EN 1992-1-1 Table 3.1");
        assert_eq!(table.short_form(), "EC2");
        assert_eq!(CodeReference::Mechanics.citation(), "Fundamental Mechanics");
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::RebarArea, "bar 1");
        tracker.record(Equation::PlasticCentroid, "section");
        tracker.record(Equation::RebarArea, "bar 2");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(tracker.unique_equations(), vec![Equation::RebarArea, Equation::PlasticCentroid]);

        let mut other = EquationTracker::new();
        other.record_for_member(Equation::SectionResultant, "sweep", "C1");
        tracker.merge(other);
        assert_eq!(tracker.usages().len(), 4);
        assert_eq!(tracker.usages()[3].member_label.as_deref(), Some("C1"));
    }

    #[test]
    fn test_by_category_sorted() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::SectionResultant, "test");
        tracker.record(Equation::PolygonArea, "test");
        tracker.record(Equation::DesignConcreteStrength, "test");

        let cats: Vec<_> = tracker.by_category().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            cats,
            vec![
                EquationCategory::MaterialLaws,
                EquationCategory::SectionProperties,
                EquationCategory::Resultants
            ]
        );
    }

    #[test]
    fn test_summary_lists_equations() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::DesignYieldStrength, "B500");
        let text = tracker.summary();
        assert!(text.contains("Material Laws"));
        assert!(text.contains("fyd = fyk / gamma_s"));
        assert!(text.contains("EN 1992-1-1 3.2.7(2)"));
    }

    #[test]
    fn test_tracker_serialization() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::RebarForce, "sweep");
        let json = serde_json::to_string(&tracker).unwrap();
        assert!(json.contains("RebarForce"));
        let back: EquationTracker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tracker);
    }
}
