//! Path tracers.
//!
//! Both algorithms turn an origin and an obstacle snapshot into a set of
//! [`Ray`]s and are interchangeable behind [`PathTracer`].

pub mod image_source;
pub mod sbr;

use crate::Point;
use crate::geom::ray::Ray;
use crate::sim::engine::FlatScene;
use crate::sim::rays::{SimulationConfig, TracerKind};

pub use image_source::ImageSourceTracer;
pub use sbr::SbrTracer;

/// Builds propagation paths from an origin through a scene snapshot.
pub trait PathTracer {
    /// Human-readable identifier for logging.
    fn name(&self) -> &'static str;

    /// Traces every path with at most `max_bounces` reflections.
    fn trace(&self, scene: &FlatScene, origin: Point, max_bounces: usize) -> Vec<Ray>;
}

/// Creates the tracer selected in the configuration.
pub fn from_config(config: &SimulationConfig) -> Box<dyn PathTracer> {
    match config.tracer {
        TracerKind::Sbr => Box::new(SbrTracer::from_config(config)),
        TracerKind::ImageSource => Box::new(ImageSourceTracer::from_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = SimulationConfig::new();
        assert_eq!(from_config(&config).name(), "sbr");
        config.tracer = TracerKind::ImageSource;
        assert_eq!(from_config(&config).name(), "image-source");
    }
}
