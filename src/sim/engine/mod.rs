pub mod image;

use crate::geom::segment::{Segment, intersect, reflect};
use crate::sim::acoustics::receiver::Receiver;
use crate::vecutils::argmin;
use crate::{Point, Vector};

/// Intersection of a probe segment with one obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the obstacle in the snapshot.
    pub index: usize,
    pub point: Point,
}

/// Specular bounce off one obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub index: usize,
    pub point: Point,
    /// Unit direction after the reflection.
    pub direction: Vector,
}

/// Obstacle geometry frozen at one time value.
///
/// Rebuilt from the scene whenever obstacles move, never mutated mid-trace.
#[derive(Debug, Clone, Default)]
pub struct FlatScene {
    /// Obstacle segments, in scene order.
    pub obstacles: Vec<Segment>,
    pub receiver: Option<Receiver>,
}

impl FlatScene {
    pub fn new(obstacles: Vec<Segment>, receiver: Option<Receiver>) -> Self {
        Self {
            obstacles,
            receiver,
        }
    }

    /// All bounded intersections of `probe` with the obstacles, in obstacle order.
    pub fn hits(&self, probe: &Segment) -> Vec<Hit> {
        self.obstacles
            .iter()
            .enumerate()
            .filter_map(|(index, obstacle)| {
                intersect(probe, obstacle, true).map(|point| Hit { index, point })
            })
            .collect()
    }

    /// Intersection of `probe` closest to `from`.
    ///
    /// Exact ties keep the obstacle that comes first.
    pub fn nearest_hit(&self, probe: &Segment, from: Point) -> Option<Hit> {
        let hits = self.hits(probe);
        let distances: Vec<f64> = hits.iter().map(|h| h.point.distance(&from)).collect();
        argmin(&distances).map(|i| hits[i])
    }

    /// Reflection of `probe` off the obstacle hit closest to `from`.
    pub fn nearest_bounce(&self, probe: &Segment, from: Point) -> Option<Bounce> {
        let mut closest: Option<(f64, Bounce)> = None;

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if let Some((point, direction)) = reflect(probe, obstacle) {
                let dist = point.distance(&from);
                match closest {
                    Some((best, _)) if dist >= best => {}
                    _ => {
                        closest = Some((
                            dist,
                            Bounce {
                                index,
                                point,
                                direction,
                            },
                        ))
                    }
                }
            }
        }

        closest.map(|(_, bounce)| bounce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_walls() -> FlatScene {
        FlatScene::new(
            vec![
                Segment::new(Point::new(10., -5.), Point::new(10., 5.)),
                Segment::new(Point::new(5., -5.), Point::new(5., 5.)),
            ],
            None,
        )
    }

    #[test]
    fn test_hits_in_obstacle_order() {
        let scene = two_walls();
        let probe = Segment::new(Point::new(0., 0.), Point::new(20., 0.));
        let hits = scene.hits(&probe);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[1].index, 1);
    }

    #[test]
    fn test_nearest_hit() {
        let scene = two_walls();
        let probe = Segment::new(Point::new(0., 0.), Point::new(20., 0.));
        let near_start = scene.nearest_hit(&probe, probe.p1).unwrap();
        assert_eq!(near_start.index, 1);
        assert!(near_start.point.is_close(&Point::new(5., 0.)));
        let near_end = scene.nearest_hit(&probe, probe.p2).unwrap();
        assert_eq!(near_end.index, 0);
    }

    #[test]
    fn test_nearest_bounce() {
        let scene = two_walls();
        let probe = Segment::new(Point::new(0., 0.), Point::new(20., 0.));
        let bounce = scene.nearest_bounce(&probe, probe.p1).unwrap();
        assert_eq!(bounce.index, 1);
        assert!(bounce.direction.is_close(&Vector::new(-1., 0.)));

        let miss = Segment::new(Point::new(0., 10.), Point::new(20., 10.));
        assert!(scene.nearest_bounce(&miss, miss.p1).is_none());
        assert!(scene.nearest_hit(&miss, miss.p1).is_none());
    }
}
