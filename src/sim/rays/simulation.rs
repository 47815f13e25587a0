use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::Point;
use crate::geom::ray::Ray;
use crate::sim::acoustics::{ImpulseResponse, Raylet};
use crate::sim::scene::Scene;
use crate::sim::tracer::{self, PathTracer};

use super::config::{SimulationConfig, TracerKind};

/// Everything the renderer needs for one animation frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Elapsed propagation time.
    pub time: f64,
    /// Distance traveled by the wavefront (speed times time).
    pub head: f64,
    /// In-flight sub-path of every ray, in ray order.
    pub raylets: Vec<Vec<Point>>,
    /// Arrivals of the paths already fully traversed.
    pub impulse_response: ImpulseResponse,
}

/// Frame-driven propagation driver.
///
/// Owns the scene, the current ray set and the animation clock. Rays are
/// recomputed from scratch whenever the origin, the obstacle time or the
/// bounce limit changes.
pub struct Simulation {
    config: SimulationConfig,
    scene: Scene,
    tracer: Box<dyn PathTracer>,
    origin: Option<Point>,
    /// Time at which moving obstacles are evaluated.
    scene_time: f64,
    /// Elapsed propagation time since the last launch.
    time: f64,
    paused: bool,
    rays: Vec<Ray>,
}

impl Simulation {
    pub fn new(scene: Scene, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        scene.validate()?;
        let tracer = tracer::from_config(&config);
        Ok(Self {
            config,
            scene,
            tracer,
            origin: None,
            scene_time: 0.0,
            time: 0.0,
            paused: false,
            rays: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn scene_time(&self) -> f64 {
        self.scene_time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Launches new rays from `origin` and restarts the clock.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = Some(origin);
        self.time = 0.0;
        self.retrace();
    }

    pub fn set_max_bounces(&mut self, max_bounces: usize) {
        if self.config.max_bounces != max_bounces {
            self.config.max_bounces = max_bounces;
            self.retrace();
        }
    }

    /// Evaluates moving obstacles at time `t`.
    pub fn set_scene_time(&mut self, t: f64) {
        self.scene_time = t;
        if self.scene.has_moving_obstacles() {
            self.retrace();
        }
    }

    pub fn set_tracer(&mut self, kind: TracerKind) -> Result<()> {
        let mut config = self.config.clone();
        config.tracer = kind;
        config.validate()?;
        self.config = config;
        self.tracer = tracer::from_config(&self.config);
        self.retrace();
        Ok(())
    }

    /// Changes the propagation speed. Paths are unaffected, only their animation.
    pub fn set_ray_speed(&mut self, speed: f64) -> Result<()> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(anyhow!("Ray speed must be positive and finite, got {}", speed));
        }
        self.config.ray_speed = speed;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flips the pause state and returns the new one.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "Toggled pause");
        self.paused
    }

    /// Clears all rays and the clock, and unpauses.
    pub fn reset(&mut self) {
        self.rays.clear();
        self.origin = None;
        self.time = 0.0;
        self.paused = false;
        info!("Simulation reset");
    }

    /// Advances the clock by one time step and returns the frame to draw.
    ///
    /// Returns `None` while paused.
    pub fn step(&mut self) -> Option<Frame> {
        if self.paused {
            return None;
        }
        let dt = self.config.time_step;
        self.time += dt;
        if self.config.move_obstacles && self.scene.has_moving_obstacles() {
            self.scene_time += dt;
            self.retrace();
        }
        Some(self.frame())
    }

    /// Runs `num_frames` steps, handing each frame to `render`.
    ///
    /// Stops early if the simulation gets paused.
    pub fn run<F>(&mut self, num_frames: usize, mut render: F) -> usize
    where
        F: FnMut(&Frame),
    {
        let mut frames_done = 0;
        for _ in 0..num_frames {
            match self.step() {
                Some(frame) => {
                    render(&frame);
                    frames_done += 1;
                }
                None => break,
            }
        }
        frames_done
    }

    /// Projects the current rays at the current time.
    pub fn frame(&self) -> Frame {
        let head = self.config.ray_speed * self.time;
        let raylets = self
            .rays
            .iter()
            .map(|ray| Raylet::new(ray, head).points(self.config.raylet_length))
            .collect();
        let impulse_response = ImpulseResponse::from_rays(
            &self.rays,
            head,
            self.config.ray_speed,
            self.config.amplitude_constant,
        );
        Frame {
            time: self.time,
            head,
            raylets,
            impulse_response,
        }
    }

    fn retrace(&mut self) {
        let Some(origin) = self.origin else {
            return;
        };
        let snapshot = self.scene.snapshot(self.scene_time);
        self.rays = self
            .tracer
            .trace(&snapshot, origin, self.config.max_bounces);
        debug!(
            tracer = self.tracer.name(),
            rays = self.rays.len(),
            scene_time = self.scene_time,
            "Retraced"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;
    use crate::sim::acoustics::Receiver;
    use crate::sim::scene::Obstacle;

    fn room_scene() -> Result<Scene> {
        Ok(Scene::new()
            .with_room(100., 100.)?
            .with_receiver(Receiver::new(Point::new(80., 50.), 2.0)))
    }

    #[test]
    fn test_no_rays_before_origin() -> Result<()> {
        let mut sim = Simulation::new(room_scene()?, SimulationConfig::new())?;
        assert!(sim.rays().is_empty());
        let frame = sim.step().unwrap();
        assert!(frame.raylets.is_empty());
        assert!(frame.impulse_response.is_empty());
        Ok(())
    }

    #[test]
    fn test_set_origin_traces_fan() -> Result<()> {
        let mut sim = Simulation::new(room_scene()?, SimulationConfig::new())?;
        sim.set_origin(Point::new(50., 50.));
        assert_eq!(sim.rays().len(), 360);
        assert!(sim.rays().iter().all(|r| r.order() <= 3));
        assert_eq!(sim.time(), 0.0);
        Ok(())
    }

    #[test]
    fn test_frames_advance_and_collect_arrivals() -> Result<()> {
        let mut config = SimulationConfig::new();
        config.tracer = TracerKind::ImageSource;
        config.ray_speed = 10.0;
        let mut sim = Simulation::new(room_scene()?, config)?;
        sim.set_origin(Point::new(50., 50.));
        let direct = sim.rays().iter().find(|r| r.order() == 0).unwrap().length();
        assert!((direct - 30.0).abs() < 1e-9);

        // head = 10 after one frame: nothing arrived yet
        let frame = sim.step().unwrap();
        assert!((frame.head - 10.0).abs() < 1e-12);
        assert!(frame.impulse_response.is_empty());
        assert_eq!(frame.raylets.len(), sim.rays().len());

        // head = 40 after 4 frames: the direct path is complete
        sim.run(3, |_| {});
        let frame = sim.frame();
        assert_eq!(frame.impulse_response.len(), 1);
        assert!((frame.impulse_response.samples()[0].delay - 3.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_pause_stops_frames() -> Result<()> {
        let mut sim = Simulation::new(room_scene()?, SimulationConfig::new())?;
        sim.set_origin(Point::new(50., 50.));
        sim.pause();
        assert!(sim.step().is_none());
        assert_eq!(sim.run(10, |_| {}), 0);
        assert_eq!(sim.time(), 0.0);
        assert!(!sim.toggle_pause());
        assert_eq!(sim.run(2, |_| {}), 2);
        assert!((sim.time() - 2.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_reset() -> Result<()> {
        let mut sim = Simulation::new(room_scene()?, SimulationConfig::new())?;
        sim.set_origin(Point::new(50., 50.));
        sim.step();
        sim.pause();
        sim.reset();
        assert!(sim.rays().is_empty());
        assert!(sim.origin().is_none());
        assert!(!sim.is_paused());
        assert_eq!(sim.time(), 0.0);
        Ok(())
    }

    #[test]
    fn test_bounce_limit_retraces() -> Result<()> {
        let mut config = SimulationConfig::new();
        config.tracer = TracerKind::ImageSource;
        let mut sim = Simulation::new(room_scene()?, config)?;
        sim.set_origin(Point::new(30., 30.));
        let order0 = sim.rays().len();
        assert!(sim.rays().iter().all(|r| r.order() <= 3));
        sim.set_max_bounces(0);
        assert_eq!(sim.rays().len(), 1);
        sim.set_max_bounces(1);
        assert_eq!(sim.rays().len(), 5);
        assert!(order0 > 5);
        Ok(())
    }

    #[test]
    fn test_moving_obstacle_follows_clock() -> Result<()> {
        let scene = Scene::new()
            .with_obstacle(Obstacle::moving(
                Point::new(60., 40.),
                Point::new(60., 60.),
                Vector::new(1., 0.),
                4.0,
            )?)
            .with_receiver(Receiver::new(Point::new(100., 50.), 1.0));
        let mut config = SimulationConfig::new();
        config.tracer = TracerKind::ImageSource;
        config.max_bounces = 0;
        config.move_obstacles = true;
        let mut sim = Simulation::new(scene, config)?;
        sim.set_origin(Point::new(50., 50.));
        // The wall blocks the direct path until it reaches x = 100 at t = 10
        assert!(sim.rays().is_empty());
        sim.run(9, |_| {});
        assert!(sim.rays().is_empty());
        sim.run(1, |_| {});
        assert!((sim.scene_time() - 10.0).abs() < 1e-12);
        assert_eq!(sim.rays().len(), 1);
        Ok(())
    }

    #[test]
    fn test_set_scene_time() -> Result<()> {
        let scene = Scene::new()
            .with_obstacle(Obstacle::moving(
                Point::new(60., 40.),
                Point::new(60., 60.),
                Vector::new(0., 1.),
                1.0,
            )?)
            .with_receiver(Receiver::new(Point::new(100., 50.), 1.0));
        let mut config = SimulationConfig::new();
        config.tracer = TracerKind::ImageSource;
        let mut sim = Simulation::new(scene, config)?;
        sim.set_origin(Point::new(50., 50.));
        assert!(sim.rays().is_empty());
        sim.set_scene_time(30.0);
        assert_eq!(sim.rays().len(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_settings() -> Result<()> {
        let mut sim = Simulation::new(room_scene()?, SimulationConfig::new())?;
        assert!(sim.set_ray_speed(-1.0).is_err());
        assert!(sim.set_ray_speed(3.0).is_ok());
        let mut config = SimulationConfig::new();
        config.time_step = 0.0;
        assert!(Simulation::new(room_scene()?, config).is_err());
        Ok(())
    }

    #[test]
    fn test_switch_tracer() -> Result<()> {
        let mut sim = Simulation::new(room_scene()?, SimulationConfig::new())?;
        sim.set_origin(Point::new(50., 50.));
        assert_eq!(sim.rays().len(), 360);
        sim.set_tracer(TracerKind::ImageSource)?;
        assert!(sim.rays().len() < 360);
        assert!(sim.rays().iter().all(|r| r.arrives()));
        Ok(())
    }
}
