pub mod acoustics;
pub mod engine;
pub mod rays;
pub mod scene;
pub mod tracer;
