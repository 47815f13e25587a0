mod config;
mod simulation;

pub use config::{LaunchPattern, SimulationConfig, TracerKind};
pub use simulation::{Frame, Simulation};
