//! Gradient checking: assemble the full Jacobian of an array-to-array
//! function two ways — central finite differences on the forward pass, and
//! rows pulled back through a reverse-mode VJP — then compare them with an
//! `atol + rtol * |reference|` tolerance.
//!
//! Intended for test suites; cost grows with `input_len * output_len`, so
//! keep the arrays small.
use ndarray::{Array2, ArrayD, IxDyn};

use crate::error::{Error, Result};

/// Finite-difference step used by [`gradcheck`].
pub const DEFAULT_EPS: f64 = 1e-6;
/// Relative tolerance used by [`gradcheck`].
pub const DEFAULT_RTOL: f64 = 1e-4;
/// Absolute tolerance used by [`gradcheck`].
pub const DEFAULT_ATOL: f64 = 1e-7;

/// Jacobian via central differences: column `k` is
/// `(f(x + eps*e_k) - f(x - eps*e_k)) / (2*eps)` flattened row-major.
pub fn numerical_jacobian<F>(f: F, x: &ArrayD<f64>, eps: f64) -> Result<Array2<f64>>
where
    F: Fn(&ArrayD<f64>) -> Result<ArrayD<f64>>,
{
    let base = f(x)?;
    let out_len = base.len();
    let in_len = x.len();
    let flat: Vec<f64> = x.iter().copied().collect();

    let mut jacobian = Array2::<f64>::zeros((out_len, in_len));
    for k in 0..in_len {
        let mut plus = flat.clone();
        let mut minus = flat.clone();
        plus[k] += eps;
        minus[k] -= eps;
        let fp = f(&ArrayD::from_shape_vec(x.raw_dim(), plus).map_err(Error::external)?)?;
        let fm = f(&ArrayD::from_shape_vec(x.raw_dim(), minus).map_err(Error::external)?)?;
        for (r, (p, m)) in fp.iter().zip(fm.iter()).enumerate() {
            jacobian[[r, k]] = (p - m) / (2.0 * eps);
        }
    }
    Ok(jacobian)
}

/// Jacobian via the VJP: row `r` is the pullback of the `r`-th output basis
/// cotangent, flattened row-major.
pub fn analytic_jacobian<V>(vjp: V, out_shape: &[usize], in_len: usize) -> Result<Array2<f64>>
where
    V: Fn(&ArrayD<f64>) -> Result<ArrayD<f64>>,
{
    let out_len: usize = out_shape.iter().product();
    let mut jacobian = Array2::<f64>::zeros((out_len, in_len));
    for r in 0..out_len {
        let mut basis = vec![0.0; out_len];
        basis[r] = 1.0;
        let cotangent =
            ArrayD::from_shape_vec(IxDyn(out_shape), basis).map_err(Error::external)?;
        let row = vjp(&cotangent)?;
        for (k, v) in row.iter().enumerate() {
            jacobian[[r, k]] = *v;
        }
    }
    Ok(jacobian)
}

/// Check that the analytic and numerical Jacobians of `f` at `x` agree.
/// Returns false on disagreement rather than panicking, so callers can
/// assert with their own message.
pub fn gradcheck<F, V>(
    f: F,
    vjp: V,
    x: &ArrayD<f64>,
    eps: f64,
    rtol: f64,
    atol: f64,
) -> Result<bool>
where
    F: Fn(&ArrayD<f64>) -> Result<ArrayD<f64>>,
    V: Fn(&ArrayD<f64>) -> Result<ArrayD<f64>>,
{
    let base = f(x)?;
    let numerical = numerical_jacobian(&f, x, eps)?;
    let analytic = analytic_jacobian(&vjp, base.shape(), x.len())?;
    Ok(numerical
        .iter()
        .zip(analytic.iter())
        .all(|(n, a)| (n - a).abs() <= atol + rtol * a.abs()))
}
