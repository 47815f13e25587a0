//! Obstacle scene.
//!
//! Obstacles are line segments that may translate at constant velocity. The
//! scene owns them; tracers only ever see an immutable [`FlatScene`] snapshot
//! evaluated at one time value.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::geom::EPS;
use crate::geom::segment::Segment;
use crate::sim::acoustics::receiver::Receiver;
use crate::sim::engine::FlatScene;
use crate::{Point, Vector};

/// Linear motion rule: endpoints move by `direction * speed * t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Unit direction of travel.
    pub direction: Vector,
    pub speed: f64,
}

impl Motion {
    /// Creates a motion rule. The direction is normalized.
    pub fn new(direction: Vector, speed: f64) -> Result<Self> {
        let direction = direction
            .normalize()
            .ok_or_else(|| anyhow!("Motion direction cannot have zero length"))?;
        Ok(Self { direction, speed })
    }

    pub fn displacement(&self, t: f64) -> Vector {
        self.direction * (self.speed * t)
    }
}

/// Reflecting line segment, optionally moving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Endpoints at `t = 0`.
    pub segment: Segment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<Motion>,
}

impl Obstacle {
    /// Creates a static obstacle.
    pub fn new(p1: Point, p2: Point) -> Result<Self> {
        let segment = Segment::new(p1, p2);
        if segment.length() < EPS {
            return Err(anyhow!("Obstacle {} -> {} has zero length", p1, p2));
        }
        Ok(Self {
            segment,
            motion: None,
        })
    }

    /// Creates an obstacle translating along `direction` at `speed`.
    pub fn moving(p1: Point, p2: Point, direction: Vector, speed: f64) -> Result<Self> {
        let mut obstacle = Self::new(p1, p2)?;
        obstacle.motion = Some(Motion::new(direction, speed)?);
        Ok(obstacle)
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Endpoints at time `t`.
    pub fn at(&self, t: f64) -> Segment {
        match self.motion {
            Some(motion) => {
                let shift = motion.displacement(t);
                Segment::new(self.segment.p1 + shift, self.segment.p2 + shift)
            }
            None => self.segment,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    obstacles: Vec<Obstacle>,
    #[serde(default)]
    receiver: Option<Receiver>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            receiver: None,
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Adds a closed loop of walls through `corners`.
    pub fn with_polygon(mut self, corners: &[Point]) -> Result<Self> {
        if corners.len() < 3 {
            return Err(anyhow!(
                "A closed wall loop needs at least 3 corners, got {}",
                corners.len()
            ));
        }
        for (i, &p1) in corners.iter().enumerate() {
            let p2 = corners[(i + 1) % corners.len()];
            self.obstacles.push(Obstacle::new(p1, p2)?);
        }
        Ok(self)
    }

    /// Adds the 4 walls of the axis-aligned room `[0, width] x [0, height]`.
    pub fn with_room(self, width: f64, height: f64) -> Result<Self> {
        self.with_polygon(&[
            Point::new(0., 0.),
            Point::new(width, 0.),
            Point::new(width, height),
            Point::new(0., height),
        ])
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn set_receiver(&mut self, receiver: Option<Receiver>) {
        self.receiver = receiver;
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn receiver(&self) -> Option<&Receiver> {
        self.receiver.as_ref()
    }

    pub fn has_moving_obstacles(&self) -> bool {
        self.obstacles.iter().any(|o| o.is_moving())
    }

    /// Checks geometry that may have bypassed the constructors (e.g. loaded from JSON).
    pub fn validate(&self) -> Result<()> {
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            if obstacle.segment.length() < EPS {
                return Err(anyhow!("Obstacle {} has zero length", i));
            }
            if let Some(motion) = obstacle.motion
                && (motion.direction.length() - 1.0).abs() > 1e-9
            {
                return Err(anyhow!(
                    "Obstacle {} has a non-unit motion direction {}",
                    i,
                    motion.direction
                ));
            }
        }
        if let Some(receiver) = &self.receiver
            && receiver.radius < 0.0
        {
            return Err(anyhow!("Receiver radius must not be negative"));
        }
        Ok(())
    }

    /// Evaluates every obstacle at time `t`.
    pub fn snapshot(&self, t: f64) -> FlatScene {
        let segments = self.obstacles.iter().map(|o| o.at(t)).collect();
        FlatScene::new(segments, self.receiver.clone())
    }
}
