//! Traced propagation paths.
//!
//! A [`Ray`] is an immutable polyline from the launch point through every
//! reflection point, together with the cumulative distance at each vertex.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Propagation path produced by a tracer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    points: Vec<Point>,
    /// Cumulative path length at each point, `lengths[0] == 0`.
    lengths: Vec<f64>,
    /// Number of reflections the path went through.
    order: usize,
    /// Whether the last point is the receiver.
    arrives: bool,
}

impl Ray {
    /// Creates a path from its vertices.
    ///
    /// The cumulative length array is computed here, so it always has one entry
    /// per point and never decreases.
    pub fn new(points: Vec<Point>, order: usize, arrives: bool) -> Self {
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, pt) in points.iter().enumerate() {
            if i > 0 {
                total += points[i - 1].distance(pt);
            }
            lengths.push(total);
        }
        Self {
            points,
            lengths,
            order,
            arrives,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn arrives(&self) -> bool {
        self.arrives
    }

    pub fn origin(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Total length of the path.
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point reached after traveling `distance` along the path.
    ///
    /// The distance is clamped to the path, `None` for an empty path.
    pub fn point_at_distance(&self, distance: f64) -> Option<Point> {
        let first = *self.points.first()?;
        if self.points.len() == 1 || distance <= 0.0 {
            return Some(first);
        }
        let distance = distance.min(self.length());
        let end = (1..self.lengths.len())
            .find(|&i| self.lengths[i] >= distance)
            .unwrap_or(self.lengths.len() - 1);
        Some(interpolate(
            self.points[end - 1],
            self.points[end],
            self.lengths[end - 1],
            self.lengths[end],
            distance,
        ))
    }
}

/// Point at cumulative distance `d` on the segment `a -> b` spanning `[la, lb]`.
pub(crate) fn interpolate(a: Point, b: Point, la: f64, lb: f64, d: f64) -> Point {
    let span = lb - la;
    if span <= 0.0 {
        // Zero-length segment
        return a;
    }
    Point::lerp(a, b, (d - la) / span)
}
