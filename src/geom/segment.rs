//! Line segment operations for 2D geometry.
//!
//! This module provides the segment type shared by obstacles and transient ray
//! segments, together with intersection, specular reflection and mirror-image
//! helpers used by the tracers.

use serde::{Deserialize, Serialize};

use crate::geom::EPS;
use crate::{Point, Vector};

/// Bounded line segment from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Segment starting at `origin` and extending `length` along `direction`.
    pub fn from_direction(origin: Point, direction: Vector, length: f64) -> Self {
        Self {
            p1: origin,
            p2: origin + direction * length,
        }
    }

    pub fn vector(&self) -> Vector {
        self.p2 - self.p1
    }

    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    /// Unit direction from `p1` to `p2`. `None` for a zero-length segment.
    pub fn direction(&self) -> Option<Vector> {
        self.vector().normalize()
    }

    /// Unit normal of the supporting line. `None` for a zero-length segment.
    pub fn normal(&self) -> Option<Vector> {
        self.vector().normal()
    }

    /// Point at parameter `t` along the segment (not clamped).
    pub fn point_at(&self, t: f64) -> Point {
        Point::lerp(self.p1, self.p2, t)
    }

    /// Finds the closest point on the supporting (infinite) line.
    pub fn closest_point_on_line(&self, pt: Point) -> Point {
        let line_vec = self.vector();
        let line_len_sq = line_vec.dot(&line_vec);
        if line_len_sq < EPS * EPS {
            // Line is a point
            return self.p1;
        }
        let t = (pt - self.p1).dot(&line_vec) / line_len_sq;
        self.point_at(t)
    }

    /// Finds the closest point on the segment.
    pub fn closest_point_on_segment(&self, pt: Point) -> Point {
        let seg_vec = self.vector();
        let seg_len_sq = seg_vec.dot(&seg_vec);
        if seg_len_sq < EPS * EPS {
            // Segment is a point
            return self.p1;
        }
        let t = ((pt - self.p1).dot(&seg_vec) / seg_len_sq).clamp(0.0, 1.0);
        self.point_at(t)
    }

    /// Minimum distance from the point to any point on the segment.
    pub fn distance_to_point(&self, pt: Point) -> f64 {
        pt.distance(&self.closest_point_on_segment(pt))
    }
}

/// Parametric coordinates `(t, u)` of the intersection of the lines supporting
/// `l1` and `l2`: the crossing is at `l1.point_at(t) == l2.point_at(u)`.
///
/// Returns `None` when the lines are parallel or collinear (zero determinant).
pub fn intersect_params(l1: &Segment, l2: &Segment) -> Option<(f64, f64)> {
    let (x1, y1, x2, y2) = (l1.p1.x, l1.p1.y, l1.p2.x, l1.p2.y);
    let (x3, y3, x4, y4) = (l2.p1.x, l2.p1.y, l2.p2.x, l2.p2.y);

    let d = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if d.abs() < EPS {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / d;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / d;
    Some((t, u))
}

/// Finds the intersection point of 2 lines or segments.
///
/// With `as_segments` both parametric coordinates must lie in [0, 1]
/// (boundary inclusive), otherwise the supporting lines are intersected.
pub fn intersect(l1: &Segment, l2: &Segment, as_segments: bool) -> Option<Point> {
    let (t, u) = intersect_params(l1, l2)?;
    if as_segments && !((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)) {
        return None;
    }
    Some(l1.point_at(t))
}

/// Reflects a ray segment off an obstacle.
///
/// Returns the hit point and the unit direction of the reflected ray, or `None`
/// if the ray segment misses the obstacle or either segment is degenerate.
pub fn reflect(ray: &Segment, obstacle: &Segment) -> Option<(Point, Vector)> {
    let hit = intersect(ray, obstacle, true)?;
    let normal = obstacle.normal()?;
    let reflected = ray.vector().reflect(&normal).normalize()?;
    Some((hit, reflected))
}

/// Mirrors `source` across the line supporting `obstacle`.
pub fn mirror_image(source: Point, obstacle: &Segment) -> Point {
    let proj = obstacle.closest_point_on_line(source);
    source + (proj - source) * 2.0
}
