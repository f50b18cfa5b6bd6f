//! Shared argument validation. All checks run at operation entry, before any
//! computation, so a failed call performs no work and allocates nothing.
use ndarray::ArrayView3;

use crate::error::{Error, Result};
use crate::types::OutputSize;

pub(crate) fn check_crop_resize_rank(ndim: usize) -> Result<()> {
    if ndim != 3 && ndim != 4 {
        return Err(Error::BadImageRank {
            expected: "3 or 4",
            got: ndim,
        });
    }
    Ok(())
}

pub(crate) fn check_center_crop_rank(ndim: usize) -> Result<()> {
    if ndim < 2 {
        return Err(Error::BadImageRank {
            expected: "2 or higher",
            got: ndim,
        });
    }
    Ok(())
}

/// Validate box layout and the broadcast rule. Returns true when the single
/// supplied box is to be broadcast across a larger batch.
pub(crate) fn check_boxes(boxes: &ArrayView3<f64>, batch: usize) -> Result<bool> {
    let shape = boxes.shape();
    if shape[1] != 4 || shape[2] != 2 {
        return Err(Error::BadBoxShape {
            got: shape.to_vec(),
        });
    }
    match shape[0] {
        n if n == batch => Ok(false),
        1 => Ok(true),
        n => Err(Error::BoxCountMismatch {
            boxes: n,
            batch,
        }),
    }
}

/// Bilinear sampling indexes `height - 1` / `width - 1`, so an empty source
/// plane is rejected up front.
pub(crate) fn check_source_nonempty(source_h: usize, source_w: usize) -> Result<()> {
    if source_h == 0 || source_w == 0 {
        return Err(Error::EmptySource {
            height: source_h,
            width: source_w,
        });
    }
    Ok(())
}

pub(crate) fn check_output_size(size: OutputSize) -> Result<()> {
    if size.height == 0 || size.width == 0 {
        return Err(Error::ZeroSize {
            height: size.height,
            width: size.width,
        });
    }
    Ok(())
}

pub(crate) fn check_center_bounds(
    size: OutputSize,
    source_h: usize,
    source_w: usize,
) -> Result<()> {
    if size.height > source_h || size.width > source_w {
        return Err(Error::CropTooLarge {
            target_h: size.height,
            target_w: size.width,
            source_h,
            source_w,
        });
    }
    Ok(())
}

pub(crate) fn check_grad_shape(expected: &[usize], got: &[usize]) -> Result<()> {
    if expected != got {
        return Err(Error::BadGradientShape {
            expected: expected.to_vec(),
            got: got.to_vec(),
        });
    }
    Ok(())
}
