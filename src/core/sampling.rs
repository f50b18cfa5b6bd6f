//! Bilinear sampling kernels shared by the crop-and-resize forward and
//! backward passes: the box-corner blend that maps an output pixel to its
//! fractional source point, and the four-neighbor interpolation cell around
//! that point together with its derivatives.
use ndarray::ArrayView2;

use crate::types::corner;

/// Blend weights of the four box corners for one output pixel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CornerWeights {
    pub tl: f64,
    pub tr: f64,
    pub bl: f64,
    pub br: f64,
}

/// Normalized edge parameter for an output index: `i / (len - 1)`, degrading
/// to the leading corner when the output extent is 1.
pub(crate) fn edge_param(index: usize, len: usize) -> f64 {
    if len > 1 {
        index as f64 / (len - 1) as f64
    } else {
        0.0
    }
}

pub(crate) fn corner_weights(u: f64, v: f64) -> CornerWeights {
    CornerWeights {
        tl: (1.0 - u) * (1.0 - v),
        tr: (1.0 - u) * v,
        bl: u * (1.0 - v),
        br: u * v,
    }
}

/// Source `(y, x)` for an output pixel: bilinear blend of the box corners.
pub(crate) fn source_point(corners: &ArrayView2<f64>, w: &CornerWeights) -> (f64, f64) {
    let y = w.tl * corners[[corner::TOP_LEFT, 0]]
        + w.tr * corners[[corner::TOP_RIGHT, 0]]
        + w.bl * corners[[corner::BOTTOM_LEFT, 0]]
        + w.br * corners[[corner::BOTTOM_RIGHT, 0]];
    let x = w.tl * corners[[corner::TOP_LEFT, 1]]
        + w.tr * corners[[corner::TOP_RIGHT, 1]]
        + w.bl * corners[[corner::BOTTOM_LEFT, 1]]
        + w.br * corners[[corner::BOTTOM_RIGHT, 1]];
    (y, x)
}

/// Interpolation cell around a fractional source point, with the raw
/// coordinate clamped to the image extent. `in_y`/`in_x` record whether the
/// unclamped coordinate was inside the valid range; a clamped axis carries no
/// coordinate gradient.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SampleCell {
    pub y0: usize,
    pub x0: usize,
    pub y1: usize,
    pub x1: usize,
    pub wy: f64,
    pub wx: f64,
    pub in_y: bool,
    pub in_x: bool,
}

pub(crate) fn make_cell(y: f64, x: f64, height: usize, width: usize) -> SampleCell {
    let max_y = (height - 1) as f64;
    let max_x = (width - 1) as f64;
    let yc = y.clamp(0.0, max_y);
    let xc = x.clamp(0.0, max_x);
    let y0 = yc.floor() as usize;
    let x0 = xc.floor() as usize;
    SampleCell {
        y0,
        x0,
        y1: (y0 + 1).min(height - 1),
        x1: (x0 + 1).min(width - 1),
        wy: yc - y0 as f64,
        wx: xc - x0 as f64,
        in_y: (0.0..=max_y).contains(&y),
        in_x: (0.0..=max_x).contains(&x),
    }
}

pub(crate) fn sample(plane: &ArrayView2<f64>, c: &SampleCell) -> f64 {
    let top = (1.0 - c.wx) * plane[[c.y0, c.x0]] + c.wx * plane[[c.y0, c.x1]];
    let bottom = (1.0 - c.wx) * plane[[c.y1, c.x0]] + c.wx * plane[[c.y1, c.x1]];
    (1.0 - c.wy) * top + c.wy * bottom
}

/// Derivative of the sampled value with respect to the source coordinate.
pub(crate) fn sample_coord_grad(plane: &ArrayView2<f64>, c: &SampleCell) -> (f64, f64) {
    let dy = if c.in_y {
        (1.0 - c.wx) * (plane[[c.y1, c.x0]] - plane[[c.y0, c.x0]])
            + c.wx * (plane[[c.y1, c.x1]] - plane[[c.y0, c.x1]])
    } else {
        0.0
    };
    let dx = if c.in_x {
        (1.0 - c.wy) * (plane[[c.y0, c.x1]] - plane[[c.y0, c.x0]])
            + c.wy * (plane[[c.y1, c.x1]] - plane[[c.y1, c.x0]])
    } else {
        0.0
    };
    (dy, dx)
}
