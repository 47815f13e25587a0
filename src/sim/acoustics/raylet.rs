//! Wavefront windows over traced paths.

use crate::Point;
use crate::geom::ray::{Ray, interpolate};

/// The part of a [`Ray`] currently in flight.
///
/// `head` is the distance traveled since launch (speed times elapsed time).
#[derive(Debug, Clone, Copy)]
pub struct Raylet<'a> {
    ray: &'a Ray,
    head: f64,
}

impl<'a> Raylet<'a> {
    pub fn new(ray: &'a Ray, head: f64) -> Self {
        Self { ray, head }
    }

    pub fn ray(&self) -> &'a Ray {
        self.ray
    }

    /// Whether the front has traveled past the end of the path.
    pub fn has_arrived(&self) -> bool {
        !self.ray.is_empty() && self.head > self.ray.length()
    }

    /// `(tail, head)` distances of the window, clamped to the path.
    pub fn window(&self, length: f64) -> (f64, f64) {
        let head = self.head.clamp(0.0, self.ray.length());
        let tail = (head - length).max(0.0);
        (tail, head)
    }

    /// Vertices of the in-flight sub-path for a trailing window of `length`.
    ///
    /// The first and last points are interpolated at the exact tail and head
    /// positions, the ones in between are the path's own reflection points.
    pub fn points(&self, length: f64) -> Vec<Point> {
        let pts = self.ray.points();
        let lengths = self.ray.lengths();
        if pts.len() < 2 {
            return pts.to_vec();
        }

        let (tail, head) = self.window(length);
        let last = pts.len() - 1;

        // lengths[start] <= tail < lengths[start + 1]
        let mut start = 0;
        while start + 1 < last && lengths[start + 1] <= tail {
            start += 1;
        }
        // lengths[end - 1] < head <= lengths[end]
        let mut end = start + 1;
        while end < last && lengths[end] < head {
            end += 1;
        }

        let mut sub = pts[start..=end].to_vec();
        sub[0] = interpolate(
            pts[start],
            pts[start + 1],
            lengths[start],
            lengths[start + 1],
            tail,
        );
        let n = sub.len();
        sub[n - 1] = interpolate(pts[end - 1], pts[end], lengths[end - 1], lengths[end], head);
        sub
    }
}
