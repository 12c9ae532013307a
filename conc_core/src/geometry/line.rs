//! Infinite lines in normal form.
//!
//! A line is the set `{p : n·p = c}` with `n` a unit normal and `c` the
//! signed offset. Storing the normal rather than a slope keeps vertical and
//! horizontal neutral axes on equal footing.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::errors::{CalcError, CalcResult};

/// Infinite line `normal · p = offset` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    normal: Point,
    offset: f64,
}

impl Line {
    /// Create a line from any non-zero normal; the normal is normalized and
    /// the offset scaled with it so the described line is unchanged.
    pub fn new(normal: Point, offset: f64) -> CalcResult<Self> {
        let len = normal.length();
        if !len.is_finite() || !offset.is_finite() || len <= f64::EPSILON {
            return Err(CalcError::degenerate(
                "line construction",
                format!("normal ({}, {}) with offset {} does not define a line", normal.x, normal.y, offset),
            ));
        }
        Ok(Self {
            normal: normal * (1.0 / len),
            offset: offset / len,
        })
    }

    /// Line through `point` with the given normal
    pub fn through(point: Point, normal: Point) -> CalcResult<Self> {
        let unit = Self::new(normal, 0.0)?.normal;
        Self::new(unit, unit.dot(point))
    }

    /// Line through `point` running at `angle_deg` from the x-axis.
    ///
    /// The normal is the direction rotated +90°, so for `angle_deg = 0` the
    /// positive side is "above" the line.
    pub fn from_angle(angle_deg: f64, point: Point) -> CalcResult<Self> {
        let theta = angle_deg.to_radians();
        Self::through(point, Point::new(-theta.sin(), theta.cos()))
    }

    /// Unit normal (points to the positive side)
    pub fn normal(&self) -> Point {
        self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Unit direction along the line (normal rotated -90°)
    pub fn direction(&self) -> Point {
        Point::new(self.normal.y, -self.normal.x)
    }

    /// Signed perpendicular distance; positive on the normal side
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.normal.dot(p) - self.offset
    }

    /// Same line, opposite positive side
    pub fn reversed(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Parallel line moved `distance` along the normal
    pub fn shifted(&self, distance: f64) -> Self {
        Self {
            normal: self.normal,
            offset: self.offset + distance,
        }
    }

    /// Orthogonal projection of `p` onto the line
    pub fn project(&self, p: Point) -> Point {
        p - self.normal * self.signed_distance(p)
    }
}
