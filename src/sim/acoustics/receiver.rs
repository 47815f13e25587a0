use serde::{Deserialize, Serialize};

use crate::Point;
use crate::geom::segment::Segment;

/// A circular receiver that captures rays passing close enough to its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    /// Position of the receiver in the plane.
    pub position: Point,
    /// Capture radius around the position.
    pub radius: f64,
}

impl Receiver {
    pub fn new(position: Point, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Checks if a point is within the receiver's capture circle.
    pub fn contains(&self, point: Point) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Point of closest approach of the segment, if it lies inside the capture circle.
    pub fn capture(&self, segment: &Segment) -> Option<Point> {
        let closest = segment.closest_point_on_segment(self.position);
        if self.contains(closest) {
            Some(closest)
        } else {
            None
        }
    }
}
