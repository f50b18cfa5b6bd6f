//! High-level, ergonomic library API: the two crop operations and their
//! reverse-mode companions. Prefer these entrypoints over the low-level
//! kernels in `core`; they validate every argument up front and adapt
//! rank-3 `(batch, h, w)` input to the internal rank-4 layout.
use ndarray::{Array3, ArrayD, Axis, Ix4};
use tracing::debug;

use crate::core::center_crop::{backward as center_crop_backward, forward as center_crop_forward};
use crate::core::crop_resize::{backward as crop_resize_backward, forward as crop_resize_forward};
use crate::core::validate::{
    check_boxes, check_center_bounds, check_center_crop_rank, check_crop_resize_rank,
    check_grad_shape, check_output_size, check_source_nonempty,
};
use crate::error::{Error, Result};
use crate::types::OutputSize;

/// Gradients of `crop_and_resize` with respect to both differentiable inputs.
#[derive(Debug, Clone)]
pub struct CropResizeGrads {
    pub images: ArrayD<f64>,
    pub boxes: Array3<f64>,
}

/// Crop a quadrilateral region out of each batch element and resample it to
/// `size` with bilinear interpolation.
///
/// `images` is `(batch, channel, h, w)` or `(batch, h, w)`; `boxes` is
/// `(n, 4, 2)` with corners ordered top-left, top-right, bottom-left,
/// bottom-right, each `(y, x)` in source pixel coordinates. `n` must equal
/// the batch size, or be 1 to broadcast one box across the whole batch.
/// Corners lying exactly on pixel rows/columns resample those pixels exactly.
pub fn crop_and_resize(
    images: &ArrayD<f64>,
    boxes: &Array3<f64>,
    size: impl Into<OutputSize>,
) -> Result<ArrayD<f64>> {
    let size = size.into();
    let (images4, broadcast) = check_crop_resize_args(images, boxes, size)?;
    debug!(
        "crop_and_resize: images={:?}, boxes={:?}, size={}",
        images.shape(),
        boxes.shape(),
        size
    );
    let out = crop_resize_forward(&images4.view(), &boxes.view(), broadcast, size);
    Ok(restore_rank(out.into_dyn(), images.ndim()))
}

/// Reverse-mode pass of [`crop_and_resize`]: given the cotangent of the
/// output, return gradients for the image values and the box coordinates.
/// Broadcast boxes accumulate gradient from every batch element.
pub fn crop_and_resize_vjp(
    images: &ArrayD<f64>,
    boxes: &Array3<f64>,
    size: impl Into<OutputSize>,
    grad_output: &ArrayD<f64>,
) -> Result<CropResizeGrads> {
    let size = size.into();
    let (images4, broadcast) = check_crop_resize_args(images, boxes, size)?;

    let mut expected = images.shape().to_vec();
    let ndim = expected.len();
    expected[ndim - 2] = size.height;
    expected[ndim - 1] = size.width;
    check_grad_shape(&expected, grad_output.shape())?;

    let grad4 = to_rank4(grad_output)?;
    let (grad_images, grad_boxes) = crop_resize_backward(
        &images4.view(),
        &boxes.view(),
        broadcast,
        size,
        &grad4.view(),
    );
    Ok(CropResizeGrads {
        images: restore_rank(grad_images.into_dyn(), images.ndim()),
        boxes: grad_boxes,
    })
}

/// Extract the centered `size` window from each image, as an exact copy at
/// integer offsets `top = (h - th) / 2`, `left = (w - tw) / 2`.
///
/// Accepts any rank >= 2; the trailing two axes are (height, width) and all
/// leading axes pass through unchanged. A target larger than the source is an
/// error.
pub fn center_crop(images: &ArrayD<f64>, size: impl Into<OutputSize>) -> Result<ArrayD<f64>> {
    let size = size.into();
    check_center_crop_args(images, size)?;
    debug!(
        "center_crop: images={:?}, size={}",
        images.shape(),
        size
    );
    Ok(center_crop_forward(&images.view(), size))
}

/// Reverse-mode pass of [`center_crop`]: scatter the cotangent back into a
/// zero array shaped like the input.
pub fn center_crop_vjp(
    images: &ArrayD<f64>,
    size: impl Into<OutputSize>,
    grad_output: &ArrayD<f64>,
) -> Result<ArrayD<f64>> {
    let size = size.into();
    check_center_crop_args(images, size)?;

    let mut expected = images.shape().to_vec();
    let ndim = expected.len();
    expected[ndim - 2] = size.height;
    expected[ndim - 1] = size.width;
    check_grad_shape(&expected, grad_output.shape())?;

    Ok(center_crop_backward(
        images.shape(),
        size,
        &grad_output.view(),
    ))
}

pub(crate) fn check_crop_resize_args(
    images: &ArrayD<f64>,
    boxes: &Array3<f64>,
    size: OutputSize,
) -> Result<(ndarray::Array4<f64>, bool)> {
    check_crop_resize_rank(images.ndim())?;
    check_output_size(size)?;
    let ndim = images.ndim();
    check_source_nonempty(images.shape()[ndim - 2], images.shape()[ndim - 1])?;
    let batch = images.shape()[0];
    let broadcast = check_boxes(&boxes.view(), batch)?;
    Ok((to_rank4(images)?, broadcast))
}

pub(crate) fn check_center_crop_args(images: &ArrayD<f64>, size: OutputSize) -> Result<()> {
    check_center_crop_rank(images.ndim())?;
    check_output_size(size)?;
    let ndim = images.ndim();
    check_center_bounds(size, images.shape()[ndim - 2], images.shape()[ndim - 1])
}

/// View rank-3 input as (batch, 1, h, w); rank is validated by the caller.
fn to_rank4(images: &ArrayD<f64>) -> Result<ndarray::Array4<f64>> {
    let view = if images.ndim() == 3 {
        images.view().insert_axis(Axis(1))
    } else {
        images.view()
    };
    view.into_dimensionality::<Ix4>()
        .map(|v| v.to_owned())
        .map_err(|_| Error::BadImageRank {
            expected: "3 or 4",
            got: images.ndim(),
        })
}

pub(crate) fn restore_rank(out: ArrayD<f64>, input_ndim: usize) -> ArrayD<f64> {
    if input_ndim == 3 {
        out.remove_axis(Axis(1))
    } else {
        out
    }
}
