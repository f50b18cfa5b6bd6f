//! Shared types used across CROPKIT.
//! Includes `OutputSize` and the box-corner layout (`corner` constants) that
//! fixes the `(n, 4, 2)` box convention used by `crop_and_resize`.
use ndarray::ArrayView0;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Box corner row indices within the `(n, 4, 2)` box array.
/// Each corner stores `(y, x)` in source pixel-index coordinates.
pub mod corner {
    pub const TOP_LEFT: usize = 0;
    pub const TOP_RIGHT: usize = 1;
    pub const BOTTOM_LEFT: usize = 2;
    pub const BOTTOM_RIGHT: usize = 3;
}

/// Target (height, width) of a crop, suitable for config files and presets.
///
/// Constructible from plain integers, or from zero-dimensional arrays via
/// [`OutputSize::from_scalars`] when the sizes arrive as traced scalar values
/// rather than compile-time constants.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OutputSize {
    pub height: usize,
    pub width: usize,
}

impl OutputSize {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Build an output size from zero-dimensional scalar arrays.
    ///
    /// Each scalar must hold a positive integer value; anything fractional,
    /// non-finite, or non-positive is rejected.
    pub fn from_scalars(height: ArrayView0<f64>, width: ArrayView0<f64>) -> Result<Self> {
        Ok(Self {
            height: scalar_to_dim(*height.into_scalar())?,
            width: scalar_to_dim(*width.into_scalar())?,
        })
    }
}

impl From<(usize, usize)> for OutputSize {
    fn from((height, width): (usize, usize)) -> Self {
        Self { height, width }
    }
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

fn scalar_to_dim(value: f64) -> Result<usize> {
    if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 {
        return Err(Error::BadSizeScalar { value });
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr0;

    #[test]
    fn from_scalars_accepts_integral_values() {
        let h = arr0(4.0);
        let w = arr0(2.0);
        let size = OutputSize::from_scalars(h.view(), w.view()).unwrap();
        assert_eq!(size, OutputSize::new(4, 2));
    }

    #[test]
    fn from_scalars_rejects_fractional_and_nonpositive() {
        let bad = [arr0(2.5), arr0(0.0), arr0(-3.0), arr0(f64::NAN)];
        for b in &bad {
            let err = OutputSize::from_scalars(b.view(), arr0(2.0).view());
            assert!(matches!(err, Err(Error::BadSizeScalar { .. })));
        }
    }
}
