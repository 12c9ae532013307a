//! # Geometry Kernel
//!
//! Plane geometry needed by the force integrator. Nothing in here knows about
//! concrete or steel; it is points, lines and polygons only.
//!
//! ## Modules
//!
//! - [`line`] - Infinite lines stored as unit normal + signed offset
//! - [`polygon`] - Simple polygons: area, centroid, half-plane clipping,
//!   triangulation and quadrature
//! - [`shapes`] - Generators for common section outlines
//!
//! ## Coordinate Conventions
//!
//! - Any consistent length unit chosen by the caller (no conversion here)
//! - Counter-clockwise vertex order gives positive signed area
//! - A [`Line`] splits the plane into the side its normal points to
//!   (positive signed distance, the *keep* side when clipping) and the rest

pub mod line;
pub mod polygon;
pub mod shapes;

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

pub use line::Line;
pub use polygon::{Bounds, Moments, Polygon};

/// A point (or vector) in the section plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin (0, 0)
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point
    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}
