//! Scenario JSON I/O.
//!
//! A scenario bundles everything needed to start a run: the source position,
//! the obstacle scene and the simulation settings. Missing settings fall back
//! to their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::{Point, Vector};
use crate::sim::acoustics::Receiver;
use crate::sim::rays::{Simulation, SimulationConfig};
use crate::sim::scene::{Obstacle, Scene};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Source position.
    pub origin: Point,
    pub scene: Scene,
    #[serde(default)]
    pub config: SimulationConfig,
}

impl Scenario {
    pub fn new(origin: Point, scene: Scene, config: SimulationConfig) -> Self {
        Self {
            origin,
            scene,
            config,
        }
    }

    /// Room with an inner screen and a receiver in its shadow.
    pub fn demo() -> Result<Self> {
        let scene = Scene::new()
            .with_room(600., 400.)?
            .with_obstacle(Obstacle::new(Point::new(300., 100.), Point::new(300., 300.))?)
            .with_obstacle(Obstacle::moving(
                Point::new(450., 250.),
                Point::new(500., 300.),
                Vector::new(0., -1.),
                0.5,
            )?)
            .with_receiver(Receiver::new(Point::new(450., 200.), 5.0));
        Ok(Self::new(Point::new(150., 200.), scene, SimulationConfig::new()))
    }

    pub fn validate(&self) -> Result<()> {
        self.scene.validate().context("Invalid scene")?;
        self.config.validate().context("Invalid simulation config")?;
        Ok(())
    }

    /// Creates a simulation with rays already launched from the origin.
    pub fn into_simulation(self) -> Result<Simulation> {
        let mut sim = Simulation::new(self.scene, self.config)?;
        sim.set_origin(self.origin);
        Ok(sim)
    }
}

/// Writes a scenario to a JSON file.
pub fn write_scenario(path: &Path, scenario: &Scenario) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, scenario)
        .with_context(|| format!("Failed to serialize scenario to: {}", path.display()))?;

    Ok(())
}

/// Reads and validates a scenario from a JSON file.
pub fn read_scenario(path: &Path) -> Result<Scenario> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let scenario: Scenario = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize scenario from: {}", path.display()))?;
    scenario
        .validate()
        .with_context(|| format!("Invalid scenario in: {}", path.display()))?;

    Ok(scenario)
}

pub fn to_json_string(scenario: &Scenario) -> Result<String> {
    serde_json::to_string_pretty(scenario).context("Failed to serialize scenario to string")
}

/// Deserializes and validates a scenario from a JSON string.
pub fn from_json_string(json: &str) -> Result<Scenario> {
    let scenario: Scenario =
        serde_json::from_str(json).context("Failed to deserialize scenario from string")?;
    scenario.validate()?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rays::TracerKind;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_scenario() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("demo.json");

        let original = Scenario::demo()?;
        write_scenario(&path, &original)?;
        let loaded = read_scenario(&path)?;

        assert!(loaded.origin.is_close(&original.origin));
        assert_eq!(loaded.scene.obstacles(), original.scene.obstacles());
        assert_eq!(loaded.scene.receiver(), original.scene.receiver());
        assert_eq!(loaded.config, original.config);
        Ok(())
    }

    #[test]
    fn test_minimal_json_uses_defaults() -> Result<()> {
        let json = r#"{
            "origin": {"x": 50.0, "y": 50.0},
            "scene": {
                "obstacles": [
                    {"segment": {"p1": {"x": 0.0, "y": 0.0}, "p2": {"x": 100.0, "y": 0.0}}}
                ]
            },
            "config": {"tracer": "image-source", "max_bounces": 1}
        }"#;
        let scenario = from_json_string(json)?;
        assert_eq!(scenario.scene.obstacles().len(), 1);
        assert!(scenario.scene.receiver().is_none());
        assert_eq!(scenario.config.tracer, TracerKind::ImageSource);
        assert_eq!(scenario.config.max_bounces, 1);
        assert_eq!(scenario.config.num_rays, 360);
        Ok(())
    }

    #[test]
    fn test_invalid_scenario_is_rejected() {
        let json = r#"{
            "origin": {"x": 0.0, "y": 0.0},
            "scene": {
                "obstacles": [
                    {"segment": {"p1": {"x": 1.0, "y": 1.0}, "p2": {"x": 1.0, "y": 1.0}}}
                ]
            }
        }"#;
        assert!(from_json_string(json).is_err());

        let json = r#"{
            "origin": {"x": 0.0, "y": 0.0},
            "scene": {"obstacles": []},
            "config": {"ray_speed": 0.0}
        }"#;
        assert!(from_json_string(json).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_scenario(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_string_roundtrip_keeps_motion() -> Result<()> {
        let original = Scenario::demo()?;
        let loaded = from_json_string(&to_json_string(&original)?)?;
        assert!(loaded.scene.has_moving_obstacles());
        assert_eq!(
            loaded.scene.obstacles().iter().filter(|o| o.is_moving()).count(),
            1
        );
        Ok(())
    }

    #[test]
    fn test_into_simulation_launches_rays() -> Result<()> {
        let sim = Scenario::demo()?.into_simulation()?;
        assert_eq!(sim.rays().len(), 360);
        assert!(sim.origin().is_some());
        Ok(())
    }
}
