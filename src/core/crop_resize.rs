//! Crop-and-resize kernels: extract a quadrilateral region per batch element
//! and resample it to a fixed output grid with bilinear interpolation.
//!
//! The forward pass is split into two primitives, `source_grid` and
//! `sample_grid`, so a traced plan can replay the same step sequence the
//! eager path runs. Sampling is parallel over the batch axis; the backward
//! pass produces gradients for both the image values and the box corners.
use ndarray::parallel::prelude::*;
use ndarray::{Array3, Array4, ArrayView3, ArrayView4, Axis};

use crate::core::sampling::{
    corner_weights, edge_param, make_cell, sample, sample_coord_grad, source_point,
};
use crate::types::{OutputSize, corner};

/// Fractional source coordinates for every output pixel: `(batch, oh, ow, 2)`
/// holding `(y, x)`, blended from the box corners. With a broadcast box the
/// same geometry is emitted for every batch element.
pub(crate) fn source_grid(
    boxes: &ArrayView3<f64>,
    broadcast: bool,
    batch: usize,
    size: OutputSize,
) -> Array4<f64> {
    let (oh, ow) = (size.height, size.width);
    let mut grid = Array4::<f64>::zeros((batch, oh, ow, 2));
    for b in 0..batch {
        let corners = boxes.index_axis(Axis(0), if broadcast { 0 } else { b });
        for i in 0..oh {
            let u = edge_param(i, oh);
            for j in 0..ow {
                let v = edge_param(j, ow);
                let (y, x) = source_point(&corners, &corner_weights(u, v));
                grid[[b, i, j, 0]] = y;
                grid[[b, i, j, 1]] = x;
            }
        }
    }
    grid
}

/// Bilinear sampling of each image at its grid coordinates.
pub(crate) fn sample_grid(images: &ArrayView4<f64>, grid: &ArrayView4<f64>) -> Array4<f64> {
    let (batch, channels, height, width) = images.dim();
    let (oh, ow) = (grid.shape()[1], grid.shape()[2]);
    let mut out = Array4::<f64>::zeros((batch, channels, oh, ow));

    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(b, mut out_b)| {
            let img_b = images.index_axis(Axis(0), b);
            let grid_b = grid.index_axis(Axis(0), b);
            for i in 0..oh {
                for j in 0..ow {
                    let cell = make_cell(grid_b[[i, j, 0]], grid_b[[i, j, 1]], height, width);
                    for c in 0..channels {
                        out_b[[c, i, j]] = sample(&img_b.index_axis(Axis(0), c), &cell);
                    }
                }
            }
        });
    out
}

pub(crate) fn forward(
    images: &ArrayView4<f64>,
    boxes: &ArrayView3<f64>,
    broadcast: bool,
    size: OutputSize,
) -> Array4<f64> {
    let batch = images.dim().0;
    let grid = source_grid(boxes, broadcast, batch, size);
    sample_grid(images, &grid.view())
}

/// Reverse-mode pass. Image gradients are the scattered bilinear weights; box
/// gradients chain the sampled-value/coordinate derivative through the corner
/// blend weights. With a broadcast box, all batch elements accumulate into the
/// single box row.
pub(crate) fn backward(
    images: &ArrayView4<f64>,
    boxes: &ArrayView3<f64>,
    broadcast: bool,
    size: OutputSize,
    grad_output: &ArrayView4<f64>,
) -> (Array4<f64>, Array3<f64>) {
    let (batch, channels, height, width) = images.dim();
    let (oh, ow) = (size.height, size.width);
    let mut grad_images = Array4::<f64>::zeros(images.raw_dim());
    let mut grad_boxes = Array3::<f64>::zeros(boxes.raw_dim());

    for b in 0..batch {
        let img_b = images.index_axis(Axis(0), b);
        let box_idx = if broadcast { 0 } else { b };
        let corners = boxes.index_axis(Axis(0), box_idx);
        for i in 0..oh {
            let u = edge_param(i, oh);
            for j in 0..ow {
                let v = edge_param(j, ow);
                let weights = corner_weights(u, v);
                let (y, x) = source_point(&corners, &weights);
                let cell = make_cell(y, x, height, width);

                let mut gy = 0.0;
                let mut gx = 0.0;
                for c in 0..channels {
                    let g = grad_output[[b, c, i, j]];
                    grad_images[[b, c, cell.y0, cell.x0]] +=
                        g * (1.0 - cell.wy) * (1.0 - cell.wx);
                    grad_images[[b, c, cell.y0, cell.x1]] += g * (1.0 - cell.wy) * cell.wx;
                    grad_images[[b, c, cell.y1, cell.x0]] += g * cell.wy * (1.0 - cell.wx);
                    grad_images[[b, c, cell.y1, cell.x1]] += g * cell.wy * cell.wx;

                    let (dy, dx) = sample_coord_grad(&img_b.index_axis(Axis(0), c), &cell);
                    gy += g * dy;
                    gx += g * dx;
                }

                grad_boxes[[box_idx, corner::TOP_LEFT, 0]] += weights.tl * gy;
                grad_boxes[[box_idx, corner::TOP_LEFT, 1]] += weights.tl * gx;
                grad_boxes[[box_idx, corner::TOP_RIGHT, 0]] += weights.tr * gy;
                grad_boxes[[box_idx, corner::TOP_RIGHT, 1]] += weights.tr * gx;
                grad_boxes[[box_idx, corner::BOTTOM_LEFT, 0]] += weights.bl * gy;
                grad_boxes[[box_idx, corner::BOTTOM_LEFT, 1]] += weights.bl * gx;
                grad_boxes[[box_idx, corner::BOTTOM_RIGHT, 0]] += weights.br * gy;
                grad_boxes[[box_idx, corner::BOTTOM_RIGHT, 1]] += weights.br * gx;
            }
        }
    }
    (grad_images, grad_boxes)
}
