pub mod point;
pub mod ray;
pub mod segment;
pub mod vector;

/// Geometric precision
pub const EPS: f64 = 1e-13;

/// Approximate equality with the crate-wide geometric precision.
pub trait IsClose {
    fn is_close(&self, other: Self) -> bool;
}

impl IsClose for f64 {
    fn is_close(&self, other: f64) -> bool {
        (self - other).abs() < 1e-9
    }
}
