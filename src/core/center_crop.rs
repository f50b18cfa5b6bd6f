//! Center-crop kernels: centered integer offsets plus an exact sub-array copy
//! on the trailing (height, width) axes. Works for any rank >= 2, treating
//! every leading axis as batch/channel.
use ndarray::{ArrayD, ArrayViewD, IxDyn, SliceInfoElem};

use crate::types::OutputSize;

/// Centered (top, left) start offsets via floor division.
pub(crate) fn offsets(source_h: usize, source_w: usize, size: OutputSize) -> (usize, usize) {
    ((source_h - size.height) / 2, (source_w - size.width) / 2)
}

fn window(ndim: usize, top: usize, left: usize, size: OutputSize) -> Vec<SliceInfoElem> {
    let mut info = Vec::with_capacity(ndim);
    for _ in 0..ndim - 2 {
        info.push(SliceInfoElem::Slice {
            start: 0,
            end: None,
            step: 1,
        });
    }
    info.push(SliceInfoElem::Slice {
        start: top as isize,
        end: Some((top + size.height) as isize),
        step: 1,
    });
    info.push(SliceInfoElem::Slice {
        start: left as isize,
        end: Some((left + size.width) as isize),
        step: 1,
    });
    info
}

/// Copy the `size` window anchored at `(top, left)` on the trailing axes.
pub(crate) fn crop_at(
    images: &ArrayViewD<f64>,
    top: usize,
    left: usize,
    size: OutputSize,
) -> ArrayD<f64> {
    images
        .slice(window(images.ndim(), top, left, size).as_slice())
        .to_owned()
}

pub(crate) fn forward(images: &ArrayViewD<f64>, size: OutputSize) -> ArrayD<f64> {
    let ndim = images.ndim();
    let source_h = images.shape()[ndim - 2];
    let source_w = images.shape()[ndim - 1];
    let (top, left) = offsets(source_h, source_w, size);
    crop_at(images, top, left, size)
}

/// Gradient of the identity copy: zeros everywhere except the cropped window,
/// which receives `grad_output` unchanged.
pub(crate) fn backward(
    source_shape: &[usize],
    size: OutputSize,
    grad_output: &ArrayViewD<f64>,
) -> ArrayD<f64> {
    let ndim = source_shape.len();
    let (top, left) = offsets(source_shape[ndim - 2], source_shape[ndim - 1], size);
    let mut grad = ArrayD::<f64>::zeros(IxDyn(source_shape));
    grad.slice_mut(window(ndim, top, left, size).as_slice())
        .assign(grad_output);
    grad
}
