//! # Polygons
//!
//! Simple (non self-intersecting) polygons with the operations the force
//! integrator needs: signed area, centroid, half-plane clipping, ear-clipping
//! triangulation and numerical integration of a scalar field.
//!
//! ## Formulas
//!
//! ```text
//! A  = ½ Σ (x_i·y_{i+1} − x_{i+1}·y_i)                 (shoelace)
//! Cx = Σ (x_i + x_{i+1})(x_i·y_{i+1} − x_{i+1}·y_i) / 6A
//! Cy = Σ (y_i + y_{i+1})(x_i·y_{i+1} − x_{i+1}·y_i) / 6A
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use super::{Line, Point};
use crate::errors::{CalcError, CalcResult};

/// Relative tolerance, scaled by the polygon's bounding-box diagonal.
const REL_TOL: f64 = 1e-9;

/// 6-point symmetric triangle rule, exact for polynomials up to degree 4.
/// Entries are (weight, λ1, λ2, λ3) in barycentric coordinates.
const TRIANGLE_RULE: [(f64, f64, f64, f64); 6] = [
    (0.223381589678011, 0.108103018168070, 0.445948490915965, 0.445948490915965),
    (0.223381589678011, 0.445948490915965, 0.108103018168070, 0.445948490915965),
    (0.223381589678011, 0.445948490915965, 0.445948490915965, 0.108103018168070),
    (0.109951743655322, 0.816847572980459, 0.091576213509771, 0.091576213509771),
    (0.109951743655322, 0.091576213509771, 0.816847572980459, 0.091576213509771),
    (0.109951743655322, 0.091576213509771, 0.091576213509771, 0.816847572980459),
];

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }
}

/// Zeroth and first moments of a scalar field over a region:
/// `value = ∫f dA`, `first_x = ∫f·x dA`, `first_y = ∫f·y dA`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Moments {
    pub value: f64,
    pub first_x: f64,
    pub first_y: f64,
}

impl Moments {
    /// Point of application of the field resultant, if the resultant is non-zero
    pub fn centroid(&self) -> Option<Point> {
        if self.value == 0.0 || !self.value.is_finite() {
            return None;
        }
        Some(Point::new(self.first_x / self.value, self.first_y / self.value))
    }
}

impl Add for Moments {
    type Output = Moments;
    fn add(self, rhs: Moments) -> Moments {
        Moments {
            value: self.value + rhs.value,
            first_x: self.first_x + rhs.first_x,
            first_y: self.first_y + rhs.first_y,
        }
    }
}

impl AddAssign for Moments {
    fn add_assign(&mut self, rhs: Moments) {
        *self = *self + rhs;
    }
}

/// A closed, simple polygon. Immutable once built; clipping returns new polygons.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build and validate a section outline.
    ///
    /// A closing vertex equal to the first one is accepted and dropped.
    ///
    /// # Errors
    /// `InvalidGeometry` for fewer than 3 vertices, non-finite coordinates,
    /// zero area or self-intersecting edges.
    pub fn new(vertices: Vec<Point>) -> CalcResult<Self> {
        let mut vertices = vertices;
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(CalcError::invalid_geometry(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(p) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(CalcError::invalid_geometry(format!(
                "vertex ({}, {}) is not finite",
                p.x, p.y
            )));
        }

        let polygon = Self { vertices };
        let scale = polygon.scale();
        if polygon.area() <= REL_TOL * scale * scale {
            return Err(CalcError::invalid_geometry("polygon has zero area"));
        }
        if !polygon.is_simple() {
            return Err(CalcError::invalid_geometry("polygon edges intersect each other"));
        }
        Ok(polygon)
    }

    /// Build from `(x, y)` tuples
    pub fn from_coords(coords: &[(f64, f64)]) -> CalcResult<Self> {
        Self::new(coords.iter().map(|&c| Point::from(c)).collect())
    }

    /// The empty polygon (no vertices, zero area)
    pub fn empty() -> Self {
        Self { vertices: Vec::new() }
    }

    /// Wrap vertices produced internally (clip output, triangles) without validation
    fn from_raw(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area (positive for counter-clockwise vertex order)
    pub fn signed_area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        0.5 * self.edges().map(|(a, b)| a.cross(b)).sum::<f64>()
    }

    /// Unsigned area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid.
    ///
    /// # Errors
    /// `DegenerateGeometry` when the area is zero (including the empty polygon).
    pub fn centroid(&self) -> CalcResult<Point> {
        let area = self.signed_area();
        let scale = self.scale();
        if self.vertices.len() < 3 || area.abs() <= REL_TOL * scale * scale {
            return Err(CalcError::degenerate(
                "centroid",
                format!("polygon with {} vertices has zero area", self.vertices.len()),
            ));
        }
        let (mut cx, mut cy) = (0.0, 0.0);
        for (a, b) in self.edges() {
            let cross = a.cross(b);
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        Ok(Point::new(cx / (6.0 * area), cy / (6.0 * area)))
    }

    /// Axis-aligned bounding box, `None` for the empty polygon
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.vertices.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Smallest and largest projection of the vertices onto `direction`
    pub fn extent_along(&self, direction: Point) -> Option<(f64, f64)> {
        let mut projections = self.vertices.iter().map(|p| p.dot(direction));
        let first = projections.next()?;
        Some(projections.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s))))
    }

    /// Length scale used for tolerances (bounding-box diagonal, at least 1)
    fn scale(&self) -> f64 {
        self.bounds().map(|b| b.diagonal()).unwrap_or(0.0).max(1.0)
    }

    fn tolerance(&self) -> f64 {
        REL_TOL * self.scale()
    }

    /// Part of the polygon on the positive side of `line` (Sutherland–Hodgman).
    ///
    /// Vertices within tolerance of the line count as kept, so a line through
    /// a vertex never produces a zero-width sliver. Results with fewer than 3
    /// vertices or no area come back as the empty polygon.
    pub fn clip(&self, line: &Line) -> Polygon {
        if self.vertices.len() < 3 {
            return Polygon::empty();
        }
        let tol = self.tolerance();
        let dist: Vec<f64> = self.vertices.iter().map(|&p| line.signed_distance(p)).collect();

        if dist.iter().all(|&d| d >= -tol) {
            return self.clone();
        }
        if dist.iter().all(|&d| d < -tol) {
            return Polygon::empty();
        }

        let n = self.vertices.len();
        let mut out = Vec::with_capacity(n + 2);
        for i in 0..n {
            let j = (i + 1) % n;
            let (a, b) = (self.vertices[i], self.vertices[j]);
            let (da, db) = (dist[i], dist[j]);
            match (da >= -tol, db >= -tol) {
                (true, true) => out.push(b),
                (true, false) => out.push(crossing(a, b, da.max(0.0), db)),
                (false, true) => {
                    out.push(crossing(a, b, da, db.max(0.0)));
                    out.push(b);
                }
                (false, false) => {}
            }
        }
        Self::cleaned(out, tol, self.scale())
    }

    /// Drop repeated vertices; collapse to empty when nothing with area is left
    fn cleaned(points: Vec<Point>, tol: f64, scale: f64) -> Polygon {
        let mut out: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if out.last().map_or(true, |last| last.distance_to(p) > tol) {
                out.push(p);
            }
        }
        while out.len() > 1 && out[0].distance_to(out[out.len() - 1]) <= tol {
            out.pop();
        }
        let polygon = Polygon::from_raw(out);
        if polygon.len() < 3 || polygon.area() <= tol * scale {
            return Polygon::empty();
        }
        polygon
    }

    /// Point-in-polygon test; points on the boundary count as inside.
    pub fn contains(&self, p: Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let tol = self.tolerance();
        let mut inside = false;
        for (a, b) in self.edges() {
            if distance_to_segment(p, a, b) <= tol {
                return true;
            }
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// True when no two non-adjacent edges touch
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return n == 3;
        }
        let edges: Vec<(Point, Point)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                if segments_intersect(edges[i].0, edges[i].1, edges[j].0, edges[j].1) {
                    return false;
                }
            }
        }
        true
    }

    /// Ear-clipping triangulation. Triangles are counter-clockwise and lie
    /// inside the polygon, so convex-only operations can run on each of them.
    ///
    /// # Errors
    /// `DegenerateGeometry` for fewer than 3 vertices, `InvalidGeometry` if
    /// no ear can be found (the outline is not simple).
    pub fn triangulate(&self) -> CalcResult<Vec<Polygon>> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(CalcError::degenerate(
                "triangulation",
                format!("polygon has {} vertices", n),
            ));
        }
        let v = &self.vertices;
        let mut ring: Vec<usize> = (0..n).collect();
        if self.signed_area() < 0.0 {
            ring.reverse();
        }
        let area_tol = self.tolerance() * self.scale();
        let mut triangles = Vec::with_capacity(n - 2);

        while ring.len() > 3 {
            let m = ring.len();
            let mut ear = None;
            for i in 0..m {
                let (ip, ic, inx) = (ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]);
                let (a, b, c) = (v[ip], v[ic], v[inx]);
                let turn = (b - a).cross(c - b);
                if turn.abs() <= area_tol {
                    // collinear vertex, drop it without emitting a triangle
                    ear = Some((i, None));
                    break;
                }
                if turn < 0.0 {
                    continue;
                }
                let blocked = ring
                    .iter()
                    .filter(|&&k| k != ip && k != ic && k != inx)
                    .any(|&k| point_in_triangle(v[k], a, b, c));
                if !blocked {
                    ear = Some((i, Some([a, b, c])));
                    break;
                }
            }
            match ear {
                Some((i, triangle)) => {
                    if let Some(t) = triangle {
                        triangles.push(Polygon::from_raw(t.to_vec()));
                    }
                    ring.remove(i);
                }
                None => {
                    return Err(CalcError::invalid_geometry(
                        "polygon could not be triangulated; its edges may intersect",
                    ))
                }
            }
        }

        let (a, b, c) = (v[ring[0]], v[ring[1]], v[ring[2]]);
        if (b - a).cross(c - b).abs() > area_tol {
            triangles.push(Polygon::from_raw(vec![a, b, c]));
        }
        Ok(triangles)
    }

    /// Integrate a scalar field over the polygon.
    ///
    /// The polygon is fanned into signed triangles from its first vertex and
    /// each triangle uses a 6-point degree-4 rule. Results are exact for
    /// polynomial fields up to degree 4 (first moments of quadratic fields
    /// included). For piecewise fields, integrate convex pieces so that every
    /// sample point lies inside the region.
    pub fn integrate<F>(&self, field: F) -> Moments
    where
        F: Fn(Point) -> f64,
    {
        let n = self.vertices.len();
        let mut total = Moments::default();
        if n < 3 {
            return total;
        }
        let origin = self.vertices[0];
        for k in 1..(n - 1) {
            let (b, c) = (self.vertices[k], self.vertices[k + 1]);
            let area = 0.5 * (b - origin).cross(c - origin);
            if area == 0.0 {
                continue;
            }
            for &(w, l1, l2, l3) in TRIANGLE_RULE.iter() {
                let p = origin * l1 + b * l2 + c * l3;
                let value = w * area * field(p);
                total.value += value;
                total.first_x += value * p.x;
                total.first_y += value * p.y;
            }
        }
        total
    }
}

/// Point on segment a→b where the signed distance crosses zero
fn crossing(a: Point, b: Point, da: f64, db: f64) -> Point {
    let t = (da / (da - db)).clamp(0.0, 1.0);
    a + (b - a) * t
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 == 0.0 {
        return p.distance_to(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance_to(a + ab * t)
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let d1 = orientation(p3, p4, p1);
    let d2 = orientation(p3, p4, p2);
    let d3 = orientation(p1, p2, p3);
    let d4 = orientation(p1, p2, p4);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(p1, p3, p4))
        || (d2 == 0.0 && on_segment(p2, p3, p4))
        || (d3 == 0.0 && on_segment(p3, p1, p2))
        || (d4 == 0.0 && on_segment(p4, p1, p2))
}

/// Inclusive test against a counter-clockwise triangle
fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    orientation(a, b, p) >= 0.0 && orientation(b, c, p) >= 0.0 && orientation(c, a, p) >= 0.0
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rectangle() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (250.0, 0.0), (250.0, 500.0), (0.0, 500.0)]).unwrap()
    }

    /// L-shaped (non-convex) outline, area 3
    fn l_shape() -> Polygon {
        Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ])
        .unwrap()
    }

    fn horizontal(y: f64) -> Line {
        Line::new(Point::new(0.0, 1.0), y).unwrap()
    }

    #[test]
    fn test_area_and_centroid() {
        let rect = rectangle();
        assert_relative_eq!(rect.area(), 125_000.0);
        let c = rect.centroid().unwrap();
        assert_relative_eq!(c.x, 125.0);
        assert_relative_eq!(c.y, 250.0);
    }

    #[test]
    fn test_clockwise_area_is_negative() {
        let cw = Polygon::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
        assert_relative_eq!(cw.signed_area(), -1.0);
        let c = cw.centroid().unwrap();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
    }

    #[test]
    fn test_closing_vertex_dropped() {
        let p = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]).unwrap();
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_invalid_outlines() {
        let two = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0)]).unwrap_err();
        assert_eq!(two.error_code(), "INVALID_GEOMETRY");

        let flat = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap_err();
        assert_eq!(flat.error_code(), "INVALID_GEOMETRY");

        let bowtie =
            Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]).unwrap_err();
        assert_eq!(bowtie.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_centroid_of_empty_is_degenerate() {
        let err = Polygon::empty().centroid().unwrap_err();
        assert!(matches!(err, CalcError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_clip_line_outside_keep_side_returns_unchanged() {
        let rect = rectangle();
        let clipped = rect.clip(&horizontal(-100.0));
        assert_eq!(clipped, rect);
    }

    #[test]
    fn test_clip_line_outside_discard_side_returns_empty() {
        let clipped = rectangle().clip(&horizontal(600.0));
        assert!(clipped.is_empty());
        assert_eq!(clipped.area(), 0.0);
    }

    #[test]
    fn test_clip_through_middle() {
        let top = rectangle().clip(&horizontal(300.0));
        assert_relative_eq!(top.area(), 250.0 * 200.0, epsilon = 1e-6);
        let c = top.centroid().unwrap();
        assert_relative_eq!(c.y, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clip_complementary_areas_sum_to_total() {
        let shapes = [rectangle(), l_shape()];
        let lines = [
            Line::new(Point::new(0.3, 1.0), 0.9).unwrap(),
            Line::new(Point::new(-1.0, 0.4), -0.7).unwrap(),
            Line::from_angle(30.0, Point::new(100.0, 200.0)).unwrap(),
        ];
        for shape in &shapes {
            for line in &lines {
                let a = shape.clip(line).area();
                let b = shape.clip(&line.reversed()).area();
                assert_relative_eq!(a + b, shape.area(), max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_clip_through_vertex_no_sliver() {
        // Diagonal through two opposite corners of a unit square
        let square = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
        let diagonal = Line::new(Point::new(-1.0, 1.0), 0.0).unwrap();
        let upper = square.clip(&diagonal);
        assert_eq!(upper.len(), 3);
        assert_relative_eq!(upper.area(), 0.5, epsilon = 1e-12);

        // Line touching a single corner keeps nothing on the outside
        let corner = Line::new(Point::new(1.0, 1.0), 2.0).unwrap();
        assert!(square.clip(&corner).is_empty());
    }

    #[test]
    fn test_clip_non_convex() {
        // Cut the L-shape at y = 1.5: only the 1x0.5 tip of the upper leg remains
        let tip = l_shape().clip(&horizontal(1.5));
        assert_relative_eq!(tip.area(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_contains() {
        let l = l_shape();
        assert!(l.contains(Point::new(0.5, 0.5)));
        assert!(l.contains(Point::new(0.5, 1.5)));
        assert!(!l.contains(Point::new(1.5, 1.5)));
        assert!(l.contains(Point::new(2.0, 0.5)), "boundary counts as inside");
    }

    #[test]
    fn test_triangulate_preserves_area() {
        for shape in [rectangle(), l_shape()] {
            let triangles = shape.triangulate().unwrap();
            assert_eq!(triangles.len(), shape.len() - 2);
            let total: f64 = triangles.iter().map(|t| t.signed_area()).sum();
            assert_relative_eq!(total, shape.area(), max_relative = 1e-12);
            assert!(triangles.iter().all(|t| t.signed_area() > 0.0));
        }
    }

    #[test]
    fn test_triangulate_skips_collinear_vertex() {
        let p = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)])
            .unwrap();
        let triangles = p.triangulate().unwrap();
        let total: f64 = triangles.iter().map(|t| t.area()).sum();
        assert_relative_eq!(total, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_integrate_constant_gives_area_and_centroid() {
        let m = rectangle().integrate(|_| 1.0);
        assert_relative_eq!(m.value, 125_000.0, max_relative = 1e-12);
        let c = m.centroid().unwrap();
        assert_relative_eq!(c.x, 125.0, max_relative = 1e-12);
        assert_relative_eq!(c.y, 250.0, max_relative = 1e-12);
    }

    #[test]
    fn test_integrate_polynomial_exact() {
        let square = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
        // ∫∫ x² dA = 1/3, ∫∫ x³ dA = 1/4 over the unit square
        let m = square.integrate(|p| p.x * p.x);
        assert_relative_eq!(m.value, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(m.first_x, 0.25, epsilon = 1e-12);
        // ∫∫ x²·y dA = 1/6
        assert_relative_eq!(m.first_y, 1.0 / 6.0, epsilon = 1e-12);
    }
}
