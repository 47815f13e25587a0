//! File I/O for scenarios.

pub mod json;

pub use json::{Scenario, from_json_string, read_scenario, to_json_string, write_scenario};
