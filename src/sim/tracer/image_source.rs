//! Image-source method.
//!
//! The source is mirrored across the obstacles up to the bounce limit. Each
//! image is then walked back from the receiver: every hop must reflect off the
//! obstacle that produced the image, with nothing in between, and the last hop
//! must reach the true source unobstructed.

use tracing::debug;

use crate::Point;
use crate::geom::ray::Ray;
use crate::geom::segment::Segment;
use crate::sim::engine::FlatScene;
use crate::sim::engine::image::ImageTree;
use crate::sim::rays::SimulationConfig;

use super::PathTracer;

#[derive(Debug, Clone)]
pub struct ImageSourceTracer {
    /// Probes stop this far short of their destination.
    pub surface_offset: f64,
}

impl ImageSourceTracer {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            surface_offset: config.surface_offset,
        }
    }

    /// Reconstructs the physical path of image `index` towards `destination`.
    ///
    /// Returns the path from the true source to `destination`, or `None` if the
    /// image does not correspond to a valid reflection sequence.
    pub fn back_trace(
        &self,
        scene: &FlatScene,
        tree: &ImageTree,
        index: usize,
        destination: Point,
    ) -> Option<Vec<Point>> {
        let mut path = vec![destination];
        let mut current = index;
        let mut dest = destination;

        loop {
            let image = tree.get(current)?;
            let hit = if image.position.distance(&dest) <= self.surface_offset {
                None
            } else {
                let towards_image = (image.position - dest).normalize()?;
                let probe = Segment::new(image.position, dest + towards_image * self.surface_offset);
                scene.nearest_hit(&probe, dest)
            };

            match (hit, image.parent) {
                (None, None) => {
                    path.push(image.position);
                    path.reverse();
                    return Some(path);
                }
                (Some(hit), Some(parent)) if image.obstacle == Some(hit.index) => {
                    path.push(hit.point);
                    dest = hit.point;
                    current = parent;
                }
                // Obstructed, wrong obstacle, or a reflection that never happened
                _ => return None,
            }
        }
    }
}

impl PathTracer for ImageSourceTracer {
    fn name(&self) -> &'static str {
        "image-source"
    }

    fn trace(&self, scene: &FlatScene, origin: Point, max_bounces: usize) -> Vec<Ray> {
        let Some(receiver) = &scene.receiver else {
            debug!("Image-source trace skipped: scene has no receiver");
            return Vec::new();
        };

        let tree = ImageTree::build(origin, &scene.obstacles, max_bounces);
        let rays: Vec<Ray> = tree
            .iter()
            .filter_map(|(index, image)| {
                self.back_trace(scene, &tree, index, receiver.position)
                    .map(|points| Ray::new(points, image.order, true))
            })
            .collect();

        debug!(
            images = tree.len(),
            rays = rays.len(),
            "Image-source trace finished"
        );
        rays
    }
}
