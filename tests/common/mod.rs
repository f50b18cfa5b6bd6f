//! Common test utilities
#![allow(dead_code)]

use ndarray::{ArrayD, IxDyn};

/// Assert two f64 arrays are close within tolerance.
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose(a: &ArrayD<f64>, b: &ArrayD<f64>, rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Deterministic pseudo-random fill in [0, 1), reproducible across runs.
pub fn pseudo_random(shape: &[usize], seed: u64) -> ArrayD<f64> {
    let len: usize = shape.iter().product();
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1);
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        data.push((state >> 11) as f64 / (1u64 << 53) as f64);
    }
    ArrayD::from_shape_vec(IxDyn(shape), data).expect("shape/product mismatch")
}
