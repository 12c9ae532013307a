//! Generators for common section outlines.
//!
//! Outlines are counter-clockwise. The rectangle has its top-left corner at
//! the origin and extends into negative y, matching the usual way section
//! drawings are dimensioned from the top fibre.

use std::f64::consts::PI;

use super::{Point, Polygon};
use crate::errors::{CalcError, CalcResult};

/// Rectangle `width` x `height` with its top-left corner at the origin
pub fn rectangle(width: f64, height: f64) -> CalcResult<Polygon> {
    for (field, value) in [("width", width), ("height", height)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Section dimensions must be positive",
            ));
        }
    }
    Polygon::new(vec![
        Point::new(0.0, -height),
        Point::new(width, -height),
        Point::new(width, 0.0),
        Point::new(0.0, 0.0),
    ])
}

/// Regular polygon approximating a circle of `diameter` centred on the origin
pub fn circle(diameter: f64, segments: usize) -> CalcResult<Polygon> {
    if !(diameter.is_finite() && diameter > 0.0) {
        return Err(CalcError::invalid_input(
            "diameter",
            diameter.to_string(),
            "Diameter must be positive",
        ));
    }
    if segments < 3 {
        return Err(CalcError::invalid_input(
            "segments",
            segments.to_string(),
            "A circle needs at least 3 segments",
        ));
    }
    let radius = diameter / 2.0;
    Polygon::new(ring_points(Point::ORIGIN, radius, segments))
}

/// `count` points evenly spaced on a circle, the first one on the +x axis
pub fn ring_points(center: Point, radius: f64, count: usize) -> Vec<Point> {
    (0..count)
        .map(|k| {
            let angle = 2.0 * PI * k as f64 / count as f64;
            center + Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle() {
        let rect = rectangle(350.0, 450.0).unwrap();
        assert_relative_eq!(rect.signed_area(), 157_500.0);
        let c = rect.centroid().unwrap();
        assert_relative_eq!(c.x, 175.0);
        assert_relative_eq!(c.y, -225.0);
    }

    #[test]
    fn test_rectangle_rejects_zero_height() {
        let err = rectangle(300.0, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_circle_area_converges() {
        let exact = PI * 200.0 * 200.0;
        let coarse = circle(400.0, 16).unwrap().area();
        let fine = circle(400.0, 128).unwrap().area();
        assert!(coarse < fine && fine < exact);
        assert_relative_eq!(fine, exact, max_relative = 1e-3);
        let c = circle(400.0, 64).unwrap().centroid().unwrap();
        assert!(c.x.abs() < 1e-9 && c.y.abs() < 1e-9);
    }

    #[test]
    fn test_ring_points() {
        let pts = ring_points(Point::new(10.0, 0.0), 5.0, 4);
        assert_eq!(pts.len(), 4);
        assert_relative_eq!(pts[0].x, 15.0);
        assert_relative_eq!(pts[1].y, 5.0, epsilon = 1e-12);
        assert_relative_eq!(pts[2].x, 5.0, epsilon = 1e-12);
    }
}
