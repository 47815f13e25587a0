use crate::Vector;
use crate::geom::EPS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS && (self.y - other.y).abs() < EPS
    }

    /// Euclidean distance between 2 points.
    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }

    /// Linear interpolation `a + (b - a) * t`.
    ///
    /// `t` is not clamped, values outside [0, 1] extrapolate along the line.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(f, "Point({:.prec$}, {:.prec$})", self.x, self.y, prec = prec)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, other: Vector) -> Self {
        Self {
            x: self.x - other.dx,
            y: self.y - other.dy,
        }
    }
}

/// Difference of 2 points is the vector pointing from `other` to `self`.
impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Self) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_close() {
        let pa = Point::new(5., 5.);
        let pb = Point::new(5.00000000000001, 5.);
        let pc = Point::new(5.0001, 5.);
        assert!(pa.is_close(&pb));
        assert!(!pa.is_close(&pc));
    }

    #[test]
    fn test_distance() {
        let p0 = Point::new(1., 1.);
        let p1 = Point::new(4., 5.);
        assert_eq!(p0.distance(&p1), 5.);
        assert_eq!(p1 - p0, Vector::new(3., 4.));
    }

    #[test]
    fn test_lerp() {
        let p0 = Point::new(0., 0.);
        let p1 = Point::new(2., 4.);
        assert!(Point::lerp(p0, p1, 0.5).is_close(&Point::new(1., 2.)));
        assert!(Point::lerp(p0, p1, 0.0).is_close(&p0));
        assert!(Point::lerp(p0, p1, 1.0).is_close(&p1));
        // Not clamped
        assert!(Point::lerp(p0, p1, 2.0).is_close(&Point::new(4., 8.)));
        assert!(Point::lerp(p0, p1, -1.0).is_close(&Point::new(-2., -4.)));
    }

    #[test]
    fn test_display() {
        let p = Point::new(1.0, 2.5);
        assert_eq!(format!("{}", p), "Point(1.00, 2.50)");
        assert_eq!(format!("{:.1}", p), "Point(1.0, 2.5)");
    }
}
