//! # Equations
//!
//! Metadata and usage tracking for every formula the section analysis
//! applies. The formulas themselves live next to the types they act on
//! (materials, geometry, integrator); this module names them and cites
//! their source so a result can list the steps that produced it.
//!
//! ## Modules
//!
//! - [`registry`] - Equation metadata, code references and the usage tracker
//!
//! ## Sign Conventions
//!
//! - **Strain, stress, axial force**: compression positive
//! - **Moments**: about the plastic centroid, `Mx = Σ F·(y − y_pc)`,
//!   `My = −Σ F·(x − x_pc)`
//!
//! ## References
//!
//! - EN 1992-1-1:2004 Eurocode 2: Design of concrete structures, general rules

pub mod registry;

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
};
