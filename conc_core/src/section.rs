//! # Section Model
//!
//! A reinforced concrete cross section: a polygonal concrete outline, point
//! rebars and the two material laws. Construction validates everything once;
//! a built [`Section`] is immutable and can be shared across threads.
//!
//! ## Plastic Centroid
//!
//! The point where a pure axial load at full plastic capacity causes no
//! moment. Concrete acts at its peak stress over the gross area, bars at f_yd:
//!
//! ```text
//! x_pc = (f_c·A_c·x_c + Σ A_s,i·f_yd·x_i) / (f_c·A_c + f_yd·Σ A_s,i)
//! ```
//!
//! It is computed on first use and cached.
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
//! let pc = section.plastic_centroid();
//! assert!((pc.x - 150.0).abs() < 1e-9);
//! assert!(pc.y < -250.0);
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{shapes, Point, Polygon};
use crate::materials::{check_sign_convention, ConcreteLaw, MaterialLaw, MaterialOptions, SteelLaw};
use crate::strain::StrainLimits;
use crate::sweep::{self, CapacityCurve, SweepOptions};

// =============================================================================
// REBARS
// =============================================================================

/// A reinforcing bar, modelled as a point area at its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rebar {
    pub x: f64,
    pub y: f64,
    /// Nominal bar diameter
    pub diameter: f64,
}

impl Rebar {
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self { x, y, diameter }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Cross-sectional area π·d²/4
    pub fn area(&self) -> f64 {
        PI * self.diameter * self.diameter / 4.0
    }

    /// `count` equal bars evenly spaced on a circle (circular columns)
    pub fn ring(center: Point, radius: f64, count: usize, diameter: f64) -> Vec<Rebar> {
        shapes::ring_points(center, radius, count)
            .into_iter()
            .map(|p| Rebar::new(p.x, p.y, diameter))
            .collect()
    }
}

// =============================================================================
// INPUT
// =============================================================================

/// Serializable description of a section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Beam B1",
///   "outline": [
///     { "x": 0.0, "y": 0.0 }, { "x": 350.0, "y": 0.0 },
///     { "x": 350.0, "y": -450.0 }, { "x": 0.0, "y": -450.0 }
///   ],
///   "rebars": [
///     { "x": 60.0, "y": -60.0, "diameter": 32.0 },
///     { "x": 290.0, "y": -390.0, "diameter": 25.0 }
///   ],
///   "fck": 25.0,
///   "fyk": 500.0,
///   "materials": { "alpha_cc": 0.85 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInput {
    /// User label for this section
    #[serde(default)]
    pub label: String,

    /// Concrete outline vertices, either orientation
    pub outline: Vec<Point>,

    /// Reinforcing bars
    #[serde(default)]
    pub rebars: Vec<Rebar>,

    /// Characteristic concrete cylinder strength (MPa)
    pub fck: f64,

    /// Characteristic steel yield strength (MPa)
    pub fyk: f64,

    /// Partial factors, concrete model and strain limits
    #[serde(default)]
    pub materials: MaterialOptions,
}

impl SectionInput {
    /// Validate the bar layout. Outline and materials are validated by
    /// [`Section::new`].
    pub fn validate(&self) -> CalcResult<()> {
        for (i, bar) in self.rebars.iter().enumerate() {
            if !bar.position().is_finite() {
                return Err(CalcError::invalid_input(
                    format!("rebars[{i}]"),
                    format!("({}, {})", bar.x, bar.y),
                    "Bar position must be finite",
                ));
            }
            if !(bar.diameter.is_finite() && bar.diameter > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("rebars[{i}].diameter"),
                    bar.diameter.to_string(),
                    "Bar diameter must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Validate and build the section
    pub fn build(&self) -> CalcResult<Section> {
        Section::from_input(self)
    }
}

// =============================================================================
// SECTION
// =============================================================================

/// A validated reinforced concrete section
#[derive(Debug)]
pub struct Section {
    outline: Polygon,
    triangles: Vec<Polygon>,
    centroid: Point,
    rebars: Vec<Rebar>,
    concrete: ConcreteLaw,
    steel: SteelLaw,
    limits: StrainLimits,
    plastic_centroid: OnceCell<Point>,
}

impl Section {
    /// Build a section from an outline, bars and characteristic strengths.
    ///
    /// # Errors
    /// - `InvalidGeometry` if the outline is not a simple polygon with area
    /// - `InvalidMaterial` for unusable strengths, factors or strain limits
    /// - `InvalidInput` for bars with non-finite positions or non-positive diameters
    pub fn new(
        outline: Vec<Point>,
        rebars: Vec<Rebar>,
        fck: f64,
        fyk: f64,
        options: &MaterialOptions,
    ) -> CalcResult<Self> {
        let input = SectionInput {
            label: String::new(),
            outline,
            rebars,
            fck,
            fyk,
            materials: *options,
        };
        Self::from_input(&input)
    }

    pub fn from_input(input: &SectionInput) -> CalcResult<Self> {
        input.validate()?;
        input.materials.validate()?;

        let outline = Polygon::new(input.outline.clone())?;
        let triangles = outline.triangulate()?;
        let centroid = outline.centroid()?;

        let concrete = ConcreteLaw::eurocode(input.fck, &input.materials)?;
        let steel = SteelLaw::eurocode(input.fyk, &input.materials)?;
        check_sign_convention(&concrete)?;
        check_sign_convention(&steel)?;
        let limits = StrainLimits::from_laws(&concrete, &steel, input.materials.eps_tension)?;

        for (i, bar) in input.rebars.iter().enumerate() {
            if !outline.contains(bar.position()) {
                log::warn!(
                    "rebar {i} at ({}, {}) lies outside the concrete outline",
                    bar.x,
                    bar.y
                );
            }
        }
        log::debug!(
            "section '{}': {} vertices, {} triangles, {} rebars, A_c = {:.1}",
            input.label,
            outline.len(),
            triangles.len(),
            input.rebars.len(),
            outline.area()
        );

        Ok(Self {
            outline,
            triangles,
            centroid,
            rebars: input.rebars.clone(),
            concrete,
            steel,
            limits,
            plastic_centroid: OnceCell::new(),
        })
    }

    pub fn outline(&self) -> &Polygon {
        &self.outline
    }

    /// Counter-clockwise triangles covering the outline
    pub fn triangles(&self) -> &[Polygon] {
        &self.triangles
    }

    pub fn rebars(&self) -> &[Rebar] {
        &self.rebars
    }

    pub fn concrete(&self) -> &ConcreteLaw {
        &self.concrete
    }

    pub fn steel(&self) -> &SteelLaw {
        &self.steel
    }

    pub fn limits(&self) -> &StrainLimits {
        &self.limits
    }

    /// Gross concrete area (bars not deducted)
    pub fn gross_area(&self) -> f64 {
        self.outline.area()
    }

    /// Geometric centroid of the concrete outline
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Total reinforcement area Σ A_s
    pub fn rebar_area(&self) -> f64 {
        self.rebars.iter().map(Rebar::area).sum()
    }

    /// Axial resistance with every bar yielded in tension, Σ A_s·f_yd (positive magnitude)
    pub fn tension_capacity(&self) -> f64 {
        self.rebar_area() * self.steel.fyd()
    }

    /// Force-weighted centroid at full plastic compression
    pub fn plastic_centroid(&self) -> Point {
        *self.plastic_centroid.get_or_init(|| {
            let concrete_force = self.concrete.peak_stress() * self.gross_area();
            let fyd = self.steel.fyd();
            let (mut force, mut fx, mut fy) = (
                concrete_force,
                concrete_force * self.centroid.x,
                concrete_force * self.centroid.y,
            );
            for bar in &self.rebars {
                let f = bar.area() * fyd;
                force += f;
                fx += f * bar.x;
                fy += f * bar.y;
            }
            let pc = Point::new(fx / force, fy / force);
            log::debug!("plastic centroid at ({:.3}, {:.3})", pc.x, pc.y);
            pc
        })
    }

    /// N-M capacity curve for a horizontal neutral axis, `resolution` samples
    /// per compression side
    pub fn capacity_curve(&self, resolution: usize) -> CalcResult<CapacityCurve> {
        let options = SweepOptions {
            points_per_side: resolution,
            ..Default::default()
        };
        sweep::capacity_curve(self, &options)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
