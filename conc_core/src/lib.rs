//! # conc_core - Reinforced Concrete Section Analysis
//!
//! `conc_core` computes the plastic centroid and the axial force / bending
//! moment (N-M) interaction curve of reinforced concrete sections with any
//! polygonal outline and any bar layout, per EN 1992-1-1.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: sections are immutable, every evaluation is a pure function
//! - **JSON-First**: inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: every failure is a distinguishable [`CalcError`] variant
//! - **Traceable**: results carry the per-sample breakdown and the equations used
//!
//! ## Quick Start
//!
//! ```rust
//! use conc_core::geometry::Point;
//! use conc_core::materials::MaterialOptions;
//! use conc_core::section::{Rebar, Section};
//!
//! let outline = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(350.0, 0.0),
//!     Point::new(350.0, -450.0),
//!     Point::new(0.0, -450.0),
//! ];
//! let rebars = vec![
//!     Rebar::new(60.0, -60.0, 32.0),
//!     Rebar::new(290.0, -60.0, 32.0),
//!     Rebar::new(60.0, -390.0, 25.0),
//!     Rebar::new(290.0, -390.0, 25.0),
//! ];
//! let options = MaterialOptions { alpha_cc: 0.85, ..Default::default() };
//! let section = Section::new(outline, rebars, 25.0, 500.0, &options).unwrap();
//!
//! let pc = section.plastic_centroid();
//! let curve = section.capacity_curve(30).unwrap();
//! for (n, m) in curve.pairs() {
//!     println!("{:>12.0} {:>14.0}", n, m);
//! }
//! # assert!((pc.x - 175.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Points, lines, polygons, clipping and quadrature
//! - [`materials`] - Concrete and steel stress-strain laws
//! - [`section`] - Section model and plastic centroid
//! - [`strain`] - Neutral-axis states and the linear strain field
//! - [`integrator`] - Section resultants for a strain state
//! - [`sweep`] - Capacity sweep driver and interaction curve
//! - [`calculations`] - JSON-first calculation entry points
//! - [`equations`] - Equation registry and usage tracking
//! - [`errors`] - Structured error types
//!
//! ## Features
//!
//! - `parallel` (default) - evaluate sweep samples concurrently with rayon

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod geometry;
pub mod integrator;
pub mod materials;
pub mod section;
pub mod strain;
pub mod sweep;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use geometry::{Line, Point, Polygon};
pub use integrator::ForceResult;
pub use section::{Rebar, Section, SectionInput};
pub use strain::{NeutralAxisState, StrainLimits};
pub use sweep::{CapacityCurve, SweepOptions};
