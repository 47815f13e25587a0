pub mod geom;
pub mod io;
pub mod sim;
pub mod vecutils;

// Prelude
pub use geom::point::Point;
pub use geom::ray::Ray;
pub use geom::segment::Segment;
pub use geom::vector::Vector;
pub use sim::acoustics::{ImpulseResponse, Receiver};
pub use sim::rays::{Frame, Simulation, SimulationConfig, TracerKind};
pub use sim::scene::{Motion, Obstacle, Scene};
