//! This is the distance math module
//! Provides squared L2 distance between dense float vectors

/// Squared Euclidean (L2) distance
/// dist = sum((a[i] - b[i])^2) for i = 0..a.len()
/// Accumulates sequentially in element order, so the same inputs always
/// produce the same rounding. Both slices must have equal length.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod distance_test {
    use super::*;

    #[test]
    fn test_squared_l2_basic() {
        // ||[1,2] - [4,6]||^2 = 9 + 16 = 25
        let a = vec![1.0, 2.0];
        let b = vec![4.0, 6.0];

        assert!((squared_l2(&a, &b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_squared_l2_identical_vectors() {
        let a = vec![0.3, -1.7, 2.5];

        assert_eq!(squared_l2(&a, &a), 0.0);
    }

    #[test]
    fn test_squared_l2_is_symmetric() {
        let a = vec![1.0, -2.0, 0.5];
        let b = vec![-0.5, 3.0, 1.5];

        assert_eq!(squared_l2(&a, &b), squared_l2(&b, &a));
    }

    #[test]
    fn test_squared_l2_negative_values() {
        // ||[-3,0] - [0,4]||^2 = 9 + 16 = 25
        let a = vec![-3.0, 0.0];
        let b = vec![0.0, 4.0];

        assert!((squared_l2(&a, &b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_squared_l2_single_element() {
        let a = vec![2.0];
        let b = vec![-1.0];

        assert!((squared_l2(&a, &b) - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_squared_l2_empty_vectors() {
        let a: Vec<f32> = vec![];
        let b: Vec<f32> = vec![];

        assert_eq!(squared_l2(&a, &b), 0.0);
    }

    #[test]
    fn test_squared_l2_deterministic_across_calls() {
        let a: Vec<f32> = (0..128).map(|i| (i as f32) * 0.1).collect();
        let b: Vec<f32> = (0..128).map(|i| (i as f32) * -0.07).collect();

        let first = squared_l2(&a, &b);
        for _ in 0..10 {
            assert_eq!(squared_l2(&a, &b), first);
        }
    }
}
