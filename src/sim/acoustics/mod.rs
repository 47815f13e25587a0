pub mod impulse_response;
pub mod raylet;
pub mod receiver;

pub use impulse_response::{CirSample, ImpulseResponse};
pub use raylet::Raylet;
pub use receiver::Receiver;
