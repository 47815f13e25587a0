use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Path construction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TracerKind {
    /// Shooting and bouncing rays: a fan of launch directions.
    Sbr,
    /// Mirror-image sources validated back to the true source.
    ImageSource,
}

/// How SBR launch directions are spread over the full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchPattern {
    /// Angles `i * 2pi / n`.
    Uniform,
    /// One random angle inside each of the `n` equal sectors.
    Jittered { seed: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // Tracing
    pub tracer: TracerKind,
    /// Maximum number of reflections per path.
    pub max_bounces: usize,
    pub num_rays: usize,
    pub launch: LaunchPattern,
    /// Probe segments start this far from the surface they leave.
    pub surface_offset: f64,
    /// Length of the probe segment cast by the SBR tracer.
    pub far_distance: f64,

    // Animation
    /// Distance traveled per unit of time.
    pub ray_speed: f64,
    /// Time advanced by one frame.
    pub time_step: f64,
    /// Length of the trailing window drawn for each ray.
    pub raylet_length: f64,
    /// If `true`, moving obstacles follow the animation clock and rays are retraced every frame.
    pub move_obstacles: bool,

    // Channel impulse response
    /// Constant `k` of the `k / length` amplitude model.
    pub amplitude_constant: f64,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            tracer: TracerKind::Sbr,
            max_bounces: 3,
            num_rays: 360,
            launch: LaunchPattern::Uniform,
            surface_offset: 0.01,
            far_distance: 1.0e4,
            ray_speed: 2.0,
            time_step: 1.0,
            raylet_length: 300.0,
            move_obstacles: false,
            amplitude_constant: 1.0,
        }
    }

    /// Rejects parameter combinations the tracers and projector cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.tracer == TracerKind::Sbr && self.num_rays == 0 {
            return Err(anyhow!("SBR tracing needs at least one ray"));
        }
        let positive = [
            ("ray_speed", self.ray_speed),
            ("time_step", self.time_step),
            ("raylet_length", self.raylet_length),
            ("surface_offset", self.surface_offset),
            ("far_distance", self.far_distance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(anyhow!("{} must be positive and finite, got {}", name, value));
            }
        }
        if self.far_distance <= self.surface_offset {
            return Err(anyhow!(
                "far_distance ({}) must exceed surface_offset ({})",
                self.far_distance,
                self.surface_offset
            ));
        }
        if !self.amplitude_constant.is_finite() {
            return Err(anyhow!("amplitude_constant must be finite"));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
