//! # Force Integrator
//!
//! Resultant axial force and moments of a section under a given strain state.
//!
//! ## Method
//!
//! Concrete: every cached triangle of the outline is clipped to the
//! compression half-plane, then cut into bands at the strains where the
//! concrete law changes form. Each band is convex and the stress is a single
//! polynomial on it, so the triangle quadrature is exact for the
//! parabola-rectangle (n = 2) and block laws. Above C50 the exponent is not
//! an integer and the parabola is split into `PARABOLA_BANDS` bands; the
//! result is then approximate to well below 1e-6 relative.
//!
//! Bars: strain at the bar centre → steel law → force = σ·A_s.
//!
//! ## Moments
//!
//! Taken about the plastic centroid (compression positive):
//!
//! ```text
//! N   = ∫σ_c dA + Σ σ_s,i·A_s,i
//! M_x = Σ F·(y − y_pc)
//! M_y = −Σ F·(x − x_pc)
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{Line, Moments, Point, Polygon};
use crate::materials::MaterialLaw;
use crate::section::Section;
use crate::strain::NeutralAxisState;

/// Resultant of the concrete compression zone
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcreteContribution {
    /// Compressive force (≥ 0)
    pub force: f64,
    pub m_x: f64,
    pub m_y: f64,
    /// Area of the compressed part of the outline
    pub compression_area: f64,
    /// Point of application, `None` when the force is zero
    pub centroid: Option<Point>,
}

/// State of a single bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarResponse {
    pub x: f64,
    pub y: f64,
    pub area: f64,
    pub strain: f64,
    pub stress: f64,
    pub force: f64,
}

/// Section resultant for one strain state, with its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceResult {
    pub state: NeutralAxisState,
    /// Axial force, compression positive
    pub n: f64,
    /// Moment about the x-axis through the plastic centroid
    pub m_x: f64,
    /// Moment about the y-axis through the plastic centroid
    pub m_y: f64,
    /// Where the resultant acts; `None` when N is negligible
    pub resultant: Option<Point>,
    pub concrete: ConcreteContribution,
    pub rebars: Vec<RebarResponse>,
    /// Largest concrete strain over the outline
    pub max_concrete_strain: f64,
}

impl ForceResult {
    /// Moment component about the plastic centroid that bends the fibres
    /// on the side of `normal` into compression: `Σ F·(n·(p − p_pc))`.
    pub fn moment_about(&self, normal: Point) -> f64 {
        normal.y * self.m_x - normal.x * self.m_y
    }

    /// Total bar force
    pub fn rebar_force(&self) -> f64 {
        self.rebars.iter().map(|r| r.force).sum()
    }
}

/// Evaluate the section resultants for `state`.
///
/// # Errors
/// `DegenerateGeometry` for zero or non-finite curvature, and whenever the
/// integration produces a non-finite value.
pub fn evaluate(section: &Section, state: &NeutralAxisState) -> CalcResult<ForceResult> {
    state.validate()?;
    let limits = section.limits();
    let pc = section.plastic_centroid();

    let (concrete_moments, compression_area) = match *state {
        NeutralAxisState::FullTension => (Moments::default(), 0.0),
        NeutralAxisState::FullCompression => {
            let stress = section.concrete().stress(limits.uniform_compression);
            let force = stress * section.gross_area();
            let c = section.centroid();
            let moments = Moments {
                value: force,
                first_x: force * c.x,
                first_y: force * c.y,
            };
            (moments, section.gross_area())
        }
        NeutralAxisState::Bending { axis, curvature } => {
            let line = if curvature > 0.0 { axis } else { axis.reversed() };
            integrate_compression_zone(section, &line, curvature.abs())
        }
    };

    let concrete = ConcreteContribution {
        force: concrete_moments.value,
        m_x: concrete_moments.first_y - concrete_moments.value * pc.y,
        m_y: -(concrete_moments.first_x - concrete_moments.value * pc.x),
        compression_area,
        centroid: concrete_moments.centroid(),
    };

    let steel = section.steel();
    let rebars: Vec<RebarResponse> = section
        .rebars()
        .iter()
        .map(|bar| {
            let strain = state.strain_at(limits, bar.position());
            let stress = steel.stress(strain);
            let area = bar.area();
            RebarResponse {
                x: bar.x,
                y: bar.y,
                area,
                strain,
                stress,
                force: stress * area,
            }
        })
        .collect();

    let mut n = concrete.force;
    let mut m_x = concrete.m_x;
    let mut m_y = concrete.m_y;
    for bar in &rebars {
        n += bar.force;
        m_x += bar.force * (bar.y - pc.y);
        m_y -= bar.force * (bar.x - pc.x);
    }

    if !(n.is_finite() && m_x.is_finite() && m_y.is_finite()) {
        return Err(CalcError::degenerate(
            "force integration",
            format!("non-finite resultant for {} state (N = {n}, Mx = {m_x}, My = {m_y})", state.label()),
        ));
    }

    let resultant = if n.abs() > negligible_force(section) {
        Some(Point::new(pc.x - m_y / n, pc.y + m_x / n))
    } else {
        None
    };
    let max_concrete_strain = state.extreme_strain(limits, section.outline());

    log::trace!(
        "{}: N = {:.1}, Mx = {:.1}, My = {:.1}, A_comp = {:.1}",
        state.label(),
        n,
        m_x,
        m_y,
        compression_area
    );

    Ok(ForceResult {
        state: *state,
        n,
        m_x,
        m_y,
        resultant,
        concrete,
        rebars,
        max_concrete_strain,
    })
}

/// Axial force below which the resultant point is not reported
fn negligible_force(section: &Section) -> f64 {
    let squash = section.concrete().peak_stress() * section.gross_area() + section.tension_capacity();
    1e-12 * squash
}

/// Stress moments of the concrete on the positive side of `line`, where the
/// strain is `curvature · line.signed_distance(p)`.
fn integrate_compression_zone(section: &Section, line: &Line, curvature: f64) -> (Moments, f64) {
    let law = section.concrete();
    let mut cuts: Vec<f64> = law
        .breakpoints()
        .into_iter()
        .filter(|&eps| eps > 0.0)
        .map(|eps| eps / curvature)
        .collect();
    cuts.sort_by(f64::total_cmp);

    let stress = |p: Point| law.stress(curvature * line.signed_distance(p));
    let mut total = Moments::default();
    let mut area = 0.0;

    for triangle in section.triangles() {
        let mut remainder = triangle.clip(line);
        if remainder.is_empty() {
            continue;
        }
        area += remainder.area();
        for &depth in &cuts {
            let band_edge = line.shifted(depth);
            let band = remainder.clip(&band_edge.reversed());
            total += integrate_band(&band, &stress);
            remainder = remainder.clip(&band_edge);
            if remainder.is_empty() {
                break;
            }
        }
        total += integrate_band(&remainder, &stress);
    }
    (total, area)
}

fn integrate_band<F: Fn(Point) -> f64>(band: &Polygon, stress: &F) -> Moments {
    if band.is_empty() {
        Moments::default()
    } else {
        band.integrate(stress)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
