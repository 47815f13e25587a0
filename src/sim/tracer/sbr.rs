//! Shooting and bouncing rays.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::geom::ray::Ray;
use crate::geom::segment::Segment;
use crate::sim::engine::FlatScene;
use crate::sim::rays::{LaunchPattern, SimulationConfig};
use crate::{Point, Vector};

use super::PathTracer;

/// Launches a fan of rays and follows their specular bounces.
#[derive(Debug, Clone)]
pub struct SbrTracer {
    pub num_rays: usize,
    pub launch: LaunchPattern,
    pub surface_offset: f64,
    pub far_distance: f64,
}

impl SbrTracer {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            num_rays: config.num_rays,
            launch: config.launch,
            surface_offset: config.surface_offset,
            far_distance: config.far_distance,
        }
    }

    /// Launch directions covering the full circle.
    pub fn directions(&self) -> Vec<Vector> {
        let sector = 2.0 * std::f64::consts::PI / self.num_rays.max(1) as f64;
        match self.launch {
            LaunchPattern::Uniform => (0..self.num_rays)
                .map(|i| Vector::from_angle(i as f64 * sector))
                .collect(),
            LaunchPattern::Jittered { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..self.num_rays)
                    .map(|i| {
                        let u: f64 = rng.r#gen();
                        Vector::from_angle((i as f64 + u) * sector)
                    })
                    .collect()
            }
        }
    }

    /// Follows one launch direction.
    ///
    /// Each step casts a probe from just off the current tip and moves to the
    /// nearest obstacle hit. The contact reached with no budget left ends the ray,
    /// so the result has at most `max_bounces` reflections. A probe that hits
    /// nothing ends the ray at its far point. A probe passing through the
    /// receiver ends the ray at the point of closest approach.
    ///
    /// A ray grazing a vertex shared by 2 obstacles reflects off whichever comes
    /// first in the scene; this case is not handled specially.
    pub fn trace_direction(
        &self,
        scene: &FlatScene,
        origin: Point,
        direction: Vector,
        max_bounces: usize,
    ) -> Option<Ray> {
        let mut dir = direction.normalize()?;
        let mut tip = origin;
        let mut points = vec![origin];
        let mut budget = max_bounces;
        let mut bounces = 0;

        loop {
            let probe = Segment::new(tip + dir * self.surface_offset, tip + dir * self.far_distance);
            let bounce = scene.nearest_bounce(&probe, tip);
            let reach = bounce.map(|b| b.point).unwrap_or(probe.p2);

            if let Some(receiver) = &scene.receiver
                && let Some(pt) = receiver.capture(&Segment::new(tip, reach))
            {
                points.push(pt);
                return Some(Ray::new(points, bounces, true));
            }

            points.push(reach);
            match bounce {
                Some(b) if budget > 0 => {
                    budget -= 1;
                    bounces += 1;
                    tip = b.point;
                    dir = b.direction;
                }
                _ => return Some(Ray::new(points, bounces, false)),
            }
        }
    }
}

impl PathTracer for SbrTracer {
    fn name(&self) -> &'static str {
        "sbr"
    }

    fn trace(&self, scene: &FlatScene, origin: Point, max_bounces: usize) -> Vec<Ray> {
        let rays: Vec<Ray> = self
            .directions()
            .into_iter()
            .filter_map(|dir| self.trace_direction(scene, origin, dir, max_bounces))
            .collect();
        debug!(
            rays = rays.len(),
            arrived = rays.iter().filter(|r| r.arrives()).count(),
            "SBR trace finished"
        );
        rays
    }
}
