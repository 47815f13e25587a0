//! Slice utility functions used for path length bookkeeping.

/// Checks if two arrays or vectors are almost equal.
///
/// Elements in both containers must be in the same order.
pub fn almost_equal(a: &[f64], b: &[f64], eps: f64) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(&x, &y)| (x - y).abs() <= eps)
}

/// Checks that every element is greater than or equal to the previous one.
pub fn is_non_decreasing(v: &[f64]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}

/// Index of the smallest value, first one on ties. `None` for an empty slice.
pub fn argmin(v: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in v.iter().enumerate() {
        match best {
            Some((_, b)) if x >= b => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_almost_equal_true() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(almost_equal(&a, &b, 1e-10));
    }

    #[test]
    fn test_almost_equal_false() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 4.0];
        assert!(!almost_equal(&a, &b, 1e-10));
        assert!(!almost_equal(&a, &b[..2], 1e-10));
    }

    #[test]
    fn test_is_non_decreasing() {
        assert!(is_non_decreasing(&[0.0, 0.0, 1.0, 5.0]));
        assert!(is_non_decreasing(&[]));
        assert!(!is_non_decreasing(&[0.0, 2.0, 1.0]));
    }

    #[test]
    fn test_argmin() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0]), Some(1));
        // First on ties
        assert_eq!(argmin(&[2.0, 1.0, 1.0]), Some(1));
        assert_eq!(argmin(&[]), None);
    }
}
