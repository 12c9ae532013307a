//! # Capacity Sweep
//!
//! Traces the N-M interaction curve by stepping the neutral axis through
//! every ultimate strain state of the section, for a fixed axis orientation.
//!
//! ## Ultimate States
//!
//! With `h` the depth of the concrete measured along the compression normal
//! and `x` the neutral-axis depth below the extreme compression fibre:
//!
//! ```text
//! x ≤ 0        FullTension (axis above the section, every bar yielded)
//! 0 < x ≤ h    ε = εcu at the extreme fibre,  κ = εcu / x
//! x > h        ε = εc at the pivot fibre h_p = (1 − εc/εcu)·h,  κ = εc / (x − h_p)
//! x → ∞        FullCompression (uniform εc)
//! ```
//!
//! The two branches meet at `x = h` with equal curvature; the switch from εcu
//! to εc leaves a slight kink in the curve there. On the tension side the
//! axis is never placed outside the section: the last step is replaced by
//! `FullTension`, which gives one sharp jump as the concrete sliver vanishes.
//!
//! ## Sweep Parameter
//!
//! Samples on a side use `η = 2j/(k+1)`, `j = 1..k`; `η ≤ 1` maps to
//! `x = η·h` and `η > 1` to `κ = (εcu/h)·(2 − η)`. The curve is ordered by a
//! global parameter `t`:
//!
//! ```text
//! t ∈ (−2, 0)   compression on the opposite side (both_sides only)
//! t = 0         FullCompression
//! t ∈ (0, 2)    compression on the normal side, from compression to tension
//! t = 2         FullTension
//! ```
//!
//! ## Example
//!
//! ```rust
//! use conc_core::geometry::Point;
//! use conc_core::materials::MaterialOptions;
//! use conc_core::section::{Rebar, Section};
//!
//! let outline = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(300.0, 0.0),
//!     Point::new(300.0, -500.0),
//!     Point::new(0.0, -500.0),
//! ];
//! let rebars = vec![Rebar::new(50.0, -450.0, 20.0), Rebar::new(250.0, -450.0, 20.0)];
//! let section = Section::new(outline, rebars, 30.0, 500.0, &MaterialOptions::default()).unwrap();
//!
//! let curve = section.capacity_curve(20).unwrap();
//! assert_eq!(curve.len(), 22);
//! assert!(curve.full_compression().unwrap().n > curve.full_tension().unwrap().n);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{Line, Point};
use crate::integrator::{self, ForceResult};
use crate::section::Section;
use crate::strain::NeutralAxisState;

/// Upper bound on samples per side
pub const MAX_POINTS_PER_SIDE: usize = 10_000;

/// Depth tolerance of the N = 0 search, relative to the section depth
const BISECTION_TOL: f64 = 1e-10;
const MAX_BISECTION_STEPS: usize = 100;

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Stage of the sweep. Samples are planned in this order, which is also the
/// order of the sweep parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepPhase {
    Init,
    /// Samples with the compression zone on the side opposite the normal
    SweepingCompressionRange,
    AtFullCompressionLimit,
    /// Samples with the compression zone on the normal side
    SweepingBendingRange,
    AtFullTensionLimit,
    Done,
}

impl SweepPhase {
    /// Following phase. The opposite-side range is skipped for one-sided sweeps.
    pub fn next(self, both_sides: bool) -> SweepPhase {
        match self {
            SweepPhase::Init if both_sides => SweepPhase::SweepingCompressionRange,
            SweepPhase::Init => SweepPhase::AtFullCompressionLimit,
            SweepPhase::SweepingCompressionRange => SweepPhase::AtFullCompressionLimit,
            SweepPhase::AtFullCompressionLimit => SweepPhase::SweepingBendingRange,
            SweepPhase::SweepingBendingRange => SweepPhase::AtFullTensionLimit,
            SweepPhase::AtFullTensionLimit | SweepPhase::Done => SweepPhase::Done,
        }
    }

    /// Every phase visited from `Init` to `Done`
    pub fn sequence(both_sides: bool) -> Vec<SweepPhase> {
        let mut phases = vec![SweepPhase::Init];
        let mut phase = SweepPhase::Init;
        while phase != SweepPhase::Done {
            phase = phase.next(both_sides);
            phases.push(phase);
        }
        phases
    }

    /// True for the two single-sample limit phases
    pub fn is_limit(self) -> bool {
        matches!(self, SweepPhase::AtFullCompressionLimit | SweepPhase::AtFullTensionLimit)
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Sweep configuration.
///
/// ## JSON Example
///
/// ```json
/// { "points_per_side": 30, "angle_deg": 0.0, "both_sides": false }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepOptions {
    /// Bending samples per compression side (limits not included)
    pub points_per_side: usize,
    /// Neutral-axis direction, degrees from the x-axis. At 0° the compression
    /// normal points in +y.
    pub angle_deg: f64,
    /// Also sweep with compression on the opposite side, giving a closed curve
    pub both_sides: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            points_per_side: 30,
            angle_deg: 0.0,
            both_sides: false,
        }
    }
}

impl SweepOptions {
    pub fn validate(&self) -> CalcResult<()> {
        if self.points_per_side < 2 || self.points_per_side > MAX_POINTS_PER_SIDE {
            return Err(CalcError::invalid_input(
                "points_per_side",
                self.points_per_side.to_string(),
                format!("Must be between 2 and {MAX_POINTS_PER_SIDE}"),
            ));
        }
        if !self.angle_deg.is_finite() {
            return Err(CalcError::invalid_input(
                "angle_deg",
                self.angle_deg.to_string(),
                "Angle must be finite",
            ));
        }
        Ok(())
    }

    /// Unit compression normal for the configured axis angle
    pub fn compression_normal(&self) -> CalcResult<Point> {
        Ok(Line::from_angle(self.angle_deg, Point::ORIGIN)?.normal())
    }
}

// =============================================================================
// CURVE
// =============================================================================

/// One evaluated sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    pub parameter: f64,
    pub phase: SweepPhase,
    /// Neutral-axis depth below the extreme compression fibre of the sample's
    /// side; `None` for the two limit states
    pub depth: Option<f64>,
    /// Axial force, compression positive
    pub n: f64,
    /// Moment about the plastic centroid, positive when it compresses the
    /// fibres on the side of the compression normal
    pub m: f64,
    pub result: ForceResult,
}

/// A sample that could not be evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGap {
    pub parameter: f64,
    pub phase: SweepPhase,
    pub reason: String,
}

/// Ordered N-M interaction curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityCurve {
    pub angle_deg: f64,
    /// Compression normal the moments are projected on
    pub normal: Point,
    pub closed: bool,
    pub points: Vec<CapacityPoint>,
    pub gaps: Vec<SweepGap>,
}

impl CapacityCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when both compression sides were swept
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// (N, M) pairs in sweep order
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.n, p.m)).collect()
    }

    pub fn full_tension(&self) -> Option<&CapacityPoint> {
        self.points
            .iter()
            .find(|p| p.result.state == NeutralAxisState::FullTension)
    }

    pub fn full_compression(&self) -> Option<&CapacityPoint> {
        self.points
            .iter()
            .find(|p| p.result.state == NeutralAxisState::FullCompression)
    }

    /// Point of largest moment (close to the balanced failure)
    pub fn max_moment_point(&self) -> Option<&CapacityPoint> {
        self.points.iter().max_by(|a, b| a.m.total_cmp(&b.m))
    }

    /// Moment resistance at N = 0 on the normal side.
    ///
    /// The two samples around N = 0 only bracket the neutral-axis depth; the
    /// depth itself is found by bisection on `section`, so the answer does not
    /// depend on the sweep resolution. A bracket ending at `FullTension` is
    /// searched down to the tension edge instead of interpolated across the
    /// jump. `Ok(None)` when N never changes sign on that side.
    ///
    /// `section` must be the one the curve was swept on.
    pub fn pure_bending_moment(&self, section: &Section) -> CalcResult<Option<f64>> {
        let side: Vec<&CapacityPoint> = self.points.iter().filter(|p| p.parameter >= 0.0).collect();
        let bracket = side
            .windows(2)
            .map(|w| (w[0], w[1]))
            .find(|(a, b)| a.n >= 0.0 && b.n <= 0.0 && a.n != b.n);
        let Some((a, b)) = bracket else {
            return Ok(None);
        };
        if a.n == 0.0 {
            return Ok(Some(a.m));
        }
        let Some(mut hi) = a.depth else {
            // Crossing beyond the deepest sample, next to FullCompression
            let t = a.n / (a.n - b.n);
            return Ok(Some(a.m + t * (b.m - a.m)));
        };
        let mut lo = b.depth.unwrap_or(0.0);

        let (s_min, s_max) = section
            .outline()
            .extent_along(self.normal)
            .ok_or_else(|| CalcError::degenerate("pure bending", "section outline is empty"))?;
        let tolerance = BISECTION_TOL * (s_max - s_min);

        for _ in 0..MAX_BISECTION_STEPS {
            if hi - lo <= tolerance {
                break;
            }
            let mid = 0.5 * (lo + hi);
            let state = ultimate_state(section, self.normal, mid)?;
            if integrator::evaluate(section, &state)?.n >= 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        let state = ultimate_state(section, self.normal, hi)?;
        let result = integrator::evaluate(section, &state)?;
        log::debug!(
            "pure bending: depth = {:.4}, N = {:.3e}, M = {:.1}",
            hi,
            result.n,
            result.moment_about(self.normal)
        );
        Ok(Some(result.moment_about(self.normal)))
    }

    /// Whether the load pair (N, M) lies inside the curve. Open curves are
    /// closed by the straight segment from the last point back to the first.
    pub fn contains(&self, n: f64, m: f64) -> bool {
        let pts = self.pairs();
        if pts.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (ni, mi) = pts[i];
            let (nj, mj) = pts[j];
            if (mi > m) != (mj > m) {
                let n_cross = ni + (m - mi) / (mj - mi) * (nj - ni);
                if n < n_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

// =============================================================================
// DRIVER
// =============================================================================

/// A state queued for evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePlan {
    pub parameter: f64,
    pub phase: SweepPhase,
    pub depth: Option<f64>,
    pub state: NeutralAxisState,
}

/// Ultimate strain state with the neutral axis `depth` below the extreme
/// compression fibre on the side of `normal`.
///
/// `depth ≤ 0` is full tension and `depth = ∞` full compression.
pub fn ultimate_state(section: &Section, normal: Point, depth: f64) -> CalcResult<NeutralAxisState> {
    if depth.is_nan() {
        return Err(CalcError::invalid_input("depth", "NaN", "Neutral-axis depth must be a number"));
    }
    if depth <= 0.0 {
        return Ok(NeutralAxisState::FullTension);
    }
    if depth == f64::INFINITY {
        return Ok(NeutralAxisState::FullCompression);
    }

    let unit = Line::new(normal, 0.0)?.normal();
    let (s_min, s_top) = section
        .outline()
        .extent_along(unit)
        .ok_or_else(|| CalcError::degenerate("ultimate state", "section outline is empty"))?;
    let h = s_top - s_min;
    let limits = section.limits();

    let curvature = if depth <= h {
        limits.bending_ultimate / depth
    } else {
        let pivot = limits.pivot_depth_ratio() * h;
        limits.uniform_compression / (depth - pivot)
    };
    NeutralAxisState::bending(Line::new(unit, s_top - depth)?, curvature)
}

/// Neutral-axis depth for sweep coordinate `η ∈ (0, 2)` on a side of depth `h`
fn depth_for(eta: f64, h: f64, strain_ratio: f64) -> f64 {
    if eta <= 1.0 {
        eta * h
    } else {
        // κ = (εcu/h)(2 − η) through the pivot fibre
        h * ((1.0 - strain_ratio) + strain_ratio / (2.0 - eta))
    }
}

/// Queue every sample in phase order. States that cannot be built become gaps.
pub fn plan_samples(
    section: &Section,
    normal: Point,
    options: &SweepOptions,
) -> CalcResult<(Vec<SamplePlan>, Vec<SweepGap>)> {
    let k = options.points_per_side;
    let (s_min, s_max) = section
        .outline()
        .extent_along(normal)
        .ok_or_else(|| CalcError::degenerate("sweep planning", "section outline is empty"))?;
    let h = s_max - s_min;
    let limits = section.limits();
    let strain_ratio = limits.uniform_compression / limits.bending_ultimate;
    let eta = |j: usize| 2.0 * j as f64 / (k as f64 + 1.0);

    let bending = |phase: SweepPhase, side_normal: Point, eta: f64, parameter: f64| {
        let depth = depth_for(eta, h, strain_ratio);
        match ultimate_state(section, side_normal, depth) {
            Ok(state) => Ok(Ok(SamplePlan {
                parameter,
                phase,
                depth: Some(depth),
                state,
            })),
            Err(e) if e.is_recoverable() => Ok(Err(SweepGap {
                parameter,
                phase,
                reason: e.to_string(),
            })),
            Err(e) => Err(e),
        }
    };

    let mut planned: Vec<Result<SamplePlan, SweepGap>> = Vec::with_capacity(2 * k + 2);
    for phase in SweepPhase::sequence(options.both_sides) {
        match phase {
            SweepPhase::SweepingCompressionRange => {
                for j in 1..=k {
                    planned.push(bending(phase, -normal, eta(j), eta(j) - 2.0)?);
                }
            }
            SweepPhase::AtFullCompressionLimit => planned.push(Ok(SamplePlan {
                parameter: 0.0,
                phase,
                depth: None,
                state: NeutralAxisState::FullCompression,
            })),
            SweepPhase::SweepingBendingRange => {
                for j in (1..=k).rev() {
                    planned.push(bending(phase, normal, eta(j), 2.0 - eta(j))?);
                }
            }
            SweepPhase::AtFullTensionLimit => planned.push(Ok(SamplePlan {
                parameter: 2.0,
                phase,
                depth: None,
                state: NeutralAxisState::FullTension,
            })),
            SweepPhase::Init | SweepPhase::Done => {}
        }
    }

    let mut plans = Vec::with_capacity(planned.len());
    let mut gaps = Vec::new();
    for outcome in planned {
        match outcome {
            Ok(plan) => plans.push(plan),
            Err(gap) => {
                log::warn!("capacity sweep: no state at t = {:.4}: {}", gap.parameter, gap.reason);
                gaps.push(gap);
            }
        }
    }
    Ok((plans, gaps))
}

#[cfg(feature = "parallel")]
fn evaluate_all(section: &Section, plans: &[SamplePlan]) -> Vec<CalcResult<ForceResult>> {
    plans
        .par_iter()
        .map(|plan| integrator::evaluate(section, &plan.state))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(section: &Section, plans: &[SamplePlan]) -> Vec<CalcResult<ForceResult>> {
    plans
        .iter()
        .map(|plan| integrator::evaluate(section, &plan.state))
        .collect()
}

/// Pair plans with their results in parameter order. Recoverable failures at
/// bending samples become gaps; any other failure is returned.
fn assemble(
    plans: &[SamplePlan],
    results: Vec<CalcResult<ForceResult>>,
    normal: Point,
    gaps: &mut Vec<SweepGap>,
) -> CalcResult<Vec<CapacityPoint>> {
    let mut points = Vec::with_capacity(plans.len());
    for (plan, result) in plans.iter().zip(results) {
        match result {
            Ok(result) => points.push(CapacityPoint {
                parameter: plan.parameter,
                phase: plan.phase,
                depth: plan.depth,
                n: result.n,
                m: result.moment_about(normal),
                result,
            }),
            Err(e) if e.is_recoverable() && !plan.phase.is_limit() => {
                log::warn!(
                    "capacity sweep: sample at t = {:.4} ({:?}) skipped: {}",
                    plan.parameter,
                    plan.phase,
                    e
                );
                gaps.push(SweepGap {
                    parameter: plan.parameter,
                    phase: plan.phase,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }
    points.sort_by(|a, b| a.parameter.total_cmp(&b.parameter));
    gaps.sort_by(|a, b| a.parameter.total_cmp(&b.parameter));
    Ok(points)
}

/// Sweep the section and assemble the ordered capacity curve.
///
/// # Errors
/// - `InvalidInput` for bad options
/// - any error at the two limit states
/// - non-recoverable errors at bending samples (recoverable ones become gaps)
pub fn capacity_curve(section: &Section, options: &SweepOptions) -> CalcResult<CapacityCurve> {
    options.validate()?;
    let normal = options.compression_normal()?;
    let (plans, mut gaps) = plan_samples(section, normal, options)?;

    // Resolve the cached centroid before the samples fan out
    section.plastic_centroid();
    let results = evaluate_all(section, &plans);
    let points = assemble(&plans, results, normal, &mut gaps)?;

    log::debug!(
        "capacity sweep at {}°: {} points, {} gaps",
        options.angle_deg,
        points.len(),
        gaps.len()
    );
    Ok(CapacityCurve {
        angle_deg: options.angle_deg,
        normal,
        closed: options.both_sides,
        points,
        gaps,
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialOptions;
    use crate::section::Rebar;
    use approx::assert_relative_eq;

    fn column() -> Section {
        let outline = vec![
            Point::new(0.0, 0.0),
            Point::new(400.0, 0.0),
            Point::new(400.0, -400.0),
            Point::new(0.0, -400.0),
        ];
        let rebars = vec![
            Rebar::new(50.0, -50.0, 20.0),
            Rebar::new(350.0, -50.0, 20.0),
            Rebar::new(50.0, -350.0, 20.0),
            Rebar::new(350.0, -350.0, 20.0),
        ];
        Section::new(outline, rebars, 30.0, 500.0, &MaterialOptions::default()).unwrap()
    }

    #[test]
    fn test_phase_sequence() {
        use SweepPhase::*;
        assert_eq!(
            SweepPhase::sequence(true),
            vec![
                Init,
                SweepingCompressionRange,
                AtFullCompressionLimit,
                SweepingBendingRange,
                AtFullTensionLimit,
                Done
            ]
        );
        assert_eq!(
            SweepPhase::sequence(false),
            vec![Init, AtFullCompressionLimit, SweepingBendingRange, AtFullTensionLimit, Done]
        );
        assert_eq!(Done.next(true), Done);
    }

    #[test]
    fn test_endpoints_are_the_limit_states() {
        let curve = column().capacity_curve(12).unwrap();
        assert_eq!(curve.len(), 14);
        assert!(curve.gaps.is_empty());
        let first = curve.points.first().unwrap();
        let last = curve.points.last().unwrap();
        assert_eq!(first.result.state, NeutralAxisState::FullCompression);
        assert_eq!(last.result.state, NeutralAxisState::FullTension);
        let limits = curve.points.iter().filter(|p| p.result.state.is_degenerate()).count();
        assert_eq!(limits, 2);
    }

    #[test]
    fn test_both_sides_includes_limits_once() {
        let options = SweepOptions {
            points_per_side: 10,
            both_sides: true,
            ..Default::default()
        };
        let curve = capacity_curve(&column(), &options).unwrap();
        assert!(curve.is_closed());
        assert_eq!(curve.len(), 22);
        let compression = curve
            .points
            .iter()
            .filter(|p| p.result.state == NeutralAxisState::FullCompression)
            .count();
        assert_eq!(compression, 1);
        assert!(curve.points.windows(2).all(|w| w[0].parameter < w[1].parameter));
        // Opposite side bends the other way
        assert!(curve.points.iter().any(|p| p.m < 0.0));
    }

    #[test]
    fn test_deterministic() {
        let section = column();
        let a = section.capacity_curve(16).unwrap();
        let b = section.capacity_curve(16).unwrap();
        assert_eq!(a.pairs(), b.pairs());
    }

    #[test]
    fn test_tension_limit_value() {
        let section = column();
        let curve = section.capacity_curve(8).unwrap();
        let tension = curve.full_tension().unwrap();
        assert_relative_eq!(tension.n, -section.tension_capacity(), max_relative = 1e-12);
        assert_eq!(tension.result.concrete.force, 0.0);
    }

    #[test]
    fn test_compression_branch_is_continuous_at_full_depth() {
        let section = column();
        let normal = Point::new(0.0, 1.0);
        let at_h = ultimate_state(&section, normal, 400.0).unwrap();
        let beyond = ultimate_state(&section, normal, 400.0 * (1.0 + 1e-9)).unwrap();
        let a = integrator::evaluate(&section, &at_h).unwrap();
        let b = integrator::evaluate(&section, &beyond).unwrap();
        assert_relative_eq!(a.n, b.n, max_relative = 1e-6);
        assert_relative_eq!(a.m_x, b.m_x, max_relative = 1e-6);
    }

    #[test]
    fn test_ultimate_state_strains() {
        let section = column();
        let limits = *section.limits();
        let normal = Point::new(0.0, 1.0);

        let bending = ultimate_state(&section, normal, 100.0).unwrap();
        assert_relative_eq!(bending.strain_at(&limits, Point::new(0.0, 0.0)), 0.0035, max_relative = 1e-12);
        assert_relative_eq!(bending.strain_at(&limits, Point::new(0.0, -100.0)), 0.0, epsilon = 1e-15);

        // Beyond full depth the pivot fibre holds εc
        let pivot = ultimate_state(&section, normal, 1000.0).unwrap();
        let h_p = limits.pivot_depth_ratio() * 400.0;
        assert_relative_eq!(
            pivot.strain_at(&limits, Point::new(0.0, -h_p)),
            limits.uniform_compression,
            max_relative = 1e-12
        );
        assert!(pivot.strain_at(&limits, Point::new(0.0, 0.0)) < limits.bending_ultimate);

        assert_eq!(ultimate_state(&section, normal, 0.0).unwrap(), NeutralAxisState::FullTension);
        assert_eq!(
            ultimate_state(&section, normal, f64::INFINITY).unwrap(),
            NeutralAxisState::FullCompression
        );
        assert!(ultimate_state(&section, normal, f64::NAN).is_err());
    }

    #[test]
    fn test_curve_queries() {
        let section = column();
        let curve = section.capacity_curve(30).unwrap();
        let compression = curve.full_compression().unwrap();
        let balanced = curve.max_moment_point().unwrap();
        assert!(compression.n > balanced.n);
        assert!(balanced.m > 0.0);

        let m0 = curve.pure_bending_moment(&section).unwrap().unwrap();
        assert!(m0 > 0.0 && m0 < balanced.m);

        assert!(curve.contains(balanced.n, 0.5 * balanced.m));
        assert!(!curve.contains(balanced.n, 1.5 * balanced.m));
        assert!(!curve.contains(2.0 * compression.n, 0.0));
    }

    #[test]
    fn test_rotated_square_matches_by_symmetry() {
        let section = column();
        let at_0 = section.capacity_curve(10).unwrap();
        let options = SweepOptions {
            points_per_side: 10,
            angle_deg: 90.0,
            ..Default::default()
        };
        let at_90 = capacity_curve(&section, &options).unwrap();
        for (a, b) in at_0.pairs().iter().zip(at_90.pairs()) {
            assert_relative_eq!(a.0, b.0, max_relative = 1e-9, epsilon = 1e-6);
            assert_relative_eq!(a.1, b.1, max_relative = 1e-9, epsilon = 1e-3);
        }
    }

    /// 1000 x 150 flange on a 200 x 450 web, 2Ø25 bottom, 2Ø12 top, C30
    fn t_beam() -> Section {
        let outline = vec![
            Point::new(0.0, 0.0),
            Point::new(1000.0, 0.0),
            Point::new(1000.0, -150.0),
            Point::new(600.0, -150.0),
            Point::new(600.0, -600.0),
            Point::new(400.0, -600.0),
            Point::new(400.0, -150.0),
            Point::new(0.0, -150.0),
        ];
        let rebars = vec![
            Rebar::new(450.0, -550.0, 25.0),
            Rebar::new(550.0, -550.0, 25.0),
            Rebar::new(450.0, -50.0, 12.0),
            Rebar::new(550.0, -50.0, 12.0),
        ];
        Section::new(outline, rebars, 30.0, 500.0, &MaterialOptions::default()).unwrap()
    }

    #[test]
    fn test_pure_bending_does_not_depend_on_resolution() {
        let section = t_beam();
        let moments: Vec<f64> = [8, 12, 30]
            .iter()
            .map(|&k| {
                let curve = section.capacity_curve(k).unwrap();
                curve.pure_bending_moment(&section).unwrap().unwrap()
            })
            .collect();
        assert_relative_eq!(moments[0], moments[2], max_relative = 1e-6);
        assert_relative_eq!(moments[1], moments[2], max_relative = 1e-6);
        assert!(moments[2] > 0.0);
    }

    #[test]
    fn test_pure_bending_not_interpolated_across_tension_jump() {
        let section = t_beam();
        let curve = section.capacity_curve(8).unwrap();
        let tension = curve.full_tension().unwrap();
        let shallowest = &curve.points[curve.len() - 2];
        assert_eq!(shallowest.phase, SweepPhase::SweepingBendingRange);
        assert!(shallowest.n > 0.0, "N = 0 lies inside the jump");

        let t = shallowest.n / (shallowest.n - tension.n);
        let chord = shallowest.m + t * (tension.m - shallowest.m);
        let m0 = curve.pure_bending_moment(&section).unwrap().unwrap();
        assert!(m0 > chord);

        // The solved state really has N = 0
        let normal = curve.normal;
        let root = (1..=200)
            .map(|i| shallowest.depth.unwrap() * i as f64 / 200.0)
            .map(|x| integrator::evaluate(&section, &ultimate_state(&section, normal, x).unwrap()).unwrap())
            .find(|r| r.n >= 0.0)
            .unwrap();
        assert_relative_eq!(root.moment_about(normal), m0, max_relative = 2e-2);
    }

    #[test]
    fn test_pure_bending_none_without_sign_change() {
        let section = column();
        let curve = section.capacity_curve(10).unwrap();
        let compression_only = CapacityCurve {
            points: curve.points.iter().filter(|p| p.n > 0.0).cloned().collect(),
            ..curve
        };
        assert_eq!(compression_only.pure_bending_moment(&section).unwrap(), None);
    }

    fn planned_column(points_per_side: usize) -> (Section, Point, Vec<SamplePlan>, Vec<SweepGap>) {
        let section = column();
        let options = SweepOptions {
            points_per_side,
            ..Default::default()
        };
        let normal = options.compression_normal().unwrap();
        let (plans, gaps) = plan_samples(&section, normal, &options).unwrap();
        (section, normal, plans, gaps)
    }

    #[test]
    fn test_degenerate_bending_sample_becomes_gap() {
        let (section, normal, plans, mut gaps) = planned_column(6);
        let mut results = evaluate_all(&section, &plans);
        let failed = 3;
        assert_eq!(plans[failed].phase, SweepPhase::SweepingBendingRange);
        results[failed] = Err(CalcError::degenerate("force integration", "zero-width sliver"));

        let points = assemble(&plans, results, normal, &mut gaps).unwrap();
        assert_eq!(points.len(), plans.len() - 1);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].parameter, plans[failed].parameter);
        assert_eq!(gaps[0].phase, SweepPhase::SweepingBendingRange);
        assert!(gaps[0].reason.contains("zero-width sliver"));
        assert!(points.windows(2).all(|w| w[0].parameter < w[1].parameter));
        assert!(points.iter().all(|p| p.parameter != plans[failed].parameter));
        assert_eq!(points.first().unwrap().result.state, NeutralAxisState::FullCompression);
        assert_eq!(points.last().unwrap().result.state, NeutralAxisState::FullTension);
    }

    #[test]
    fn test_degenerate_limit_sample_fails_sweep() {
        let (section, normal, plans, mut gaps) = planned_column(6);
        for phase in [SweepPhase::AtFullCompressionLimit, SweepPhase::AtFullTensionLimit] {
            let mut results = evaluate_all(&section, &plans);
            let limit = plans.iter().position(|p| p.phase == phase).unwrap();
            results[limit] = Err(CalcError::degenerate("force integration", "limit"));
            let err = assemble(&plans, results, normal, &mut gaps).unwrap_err();
            assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
        }
    }

    #[test]
    fn test_unrecoverable_bending_failure_propagates() {
        let (section, normal, plans, mut gaps) = planned_column(6);
        let mut results = evaluate_all(&section, &plans);
        results[2] = Err(CalcError::calculation_failed("force integration", "bad law"));
        let err = assemble(&plans, results, normal, &mut gaps).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_invalid_resolution() {
        let err = column().capacity_curve(1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_options_json_defaults() {
        let options: SweepOptions = serde_json::from_str(r#"{"points_per_side": 12}"#).unwrap();
        assert_eq!(options.points_per_side, 12);
        assert_eq!(options.angle_deg, 0.0);
        assert!(!options.both_sides);
    }
}
