//! Traced plans: capture an operation's primitive step sequence once, then
//! replay it against fresh inputs. A plan records ops only — offsets, sample
//! grids, and sizes are recomputed from the live arguments on every run, so a
//! plan traced at one shape serves any other valid shape and target size.
//! Plans serialize with serde, so they can be stored alongside presets.
use ndarray::{Array3, Array4, ArrayD};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{self, check_center_crop_args, check_crop_resize_args, restore_rank};
use crate::core::{center_crop, crop_resize};
use crate::error::{Error, Result};
use crate::types::OutputSize;

/// Primitive steps an operation can record. None carries geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Step {
    CenterOffsets,
    SliceWindow,
    CornerGrid,
    BilinearSample,
}

impl Step {
    fn name(self) -> &'static str {
        match self {
            Step::CenterOffsets => "CenterOffsets",
            Step::SliceWindow => "SliceWindow",
            Step::CornerGrid => "CornerGrid",
            Step::BilinearSample => "BilinearSample",
        }
    }
}

/// A center-crop computation captured by tracing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracedCenterCrop {
    steps: Vec<Step>,
}

impl TracedCenterCrop {
    /// Run `center_crop` once on example inputs and record its steps. The
    /// example output is discarded; only the step sequence is kept.
    pub fn trace(example: &ArrayD<f64>, size: impl Into<OutputSize>) -> Result<Self> {
        let size = size.into();
        api::center_crop(example, size)?;
        debug!(
            "traced center_crop at example shape {:?}, size {}",
            example.shape(),
            size
        );
        Ok(Self {
            steps: vec![Step::CenterOffsets, Step::SliceWindow],
        })
    }

    /// Replay the plan. Crop geometry is derived from `images` and `size`,
    /// never from the shapes seen while tracing.
    pub fn run(&self, images: &ArrayD<f64>, size: impl Into<OutputSize>) -> Result<ArrayD<f64>> {
        let size = size.into();
        check_center_crop_args(images, size)?;
        let ndim = images.ndim();

        let mut anchor: Option<(usize, usize)> = None;
        let mut out: Option<ArrayD<f64>> = None;
        for step in &self.steps {
            match step {
                Step::CenterOffsets => {
                    anchor = Some(center_crop::offsets(
                        images.shape()[ndim - 2],
                        images.shape()[ndim - 1],
                        size,
                    ));
                }
                Step::SliceWindow => {
                    let (top, left) = anchor.ok_or(Error::MalformedPlan {
                        step: "SliceWindow",
                        reason: "offsets not yet computed",
                    })?;
                    out = Some(center_crop::crop_at(&images.view(), top, left, size));
                }
                foreign => {
                    return Err(Error::MalformedPlan {
                        step: foreign.name(),
                        reason: "step does not belong to a center-crop plan",
                    });
                }
            }
        }
        out.ok_or(Error::MalformedPlan {
            step: "end",
            reason: "plan produced no output",
        })
    }

    /// Serialize the plan for storage alongside presets.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::external)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::external)
    }
}

/// A crop-and-resize computation captured by tracing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracedCropAndResize {
    steps: Vec<Step>,
}

impl TracedCropAndResize {
    pub fn trace(
        example: &ArrayD<f64>,
        boxes: &Array3<f64>,
        size: impl Into<OutputSize>,
    ) -> Result<Self> {
        let size = size.into();
        api::crop_and_resize(example, boxes, size)?;
        debug!(
            "traced crop_and_resize at example shape {:?}, size {}",
            example.shape(),
            size
        );
        Ok(Self {
            steps: vec![Step::CornerGrid, Step::BilinearSample],
        })
    }

    /// Replay the plan against fresh images, boxes, and size. Runs the exact
    /// step primitives the eager path runs, so results match eager
    /// bit-for-bit.
    pub fn run(
        &self,
        images: &ArrayD<f64>,
        boxes: &Array3<f64>,
        size: impl Into<OutputSize>,
    ) -> Result<ArrayD<f64>> {
        let size = size.into();
        let (images4, broadcast) = check_crop_resize_args(images, boxes, size)?;
        let batch = images4.dim().0;

        let mut grid: Option<Array4<f64>> = None;
        let mut out: Option<Array4<f64>> = None;
        for step in &self.steps {
            match step {
                Step::CornerGrid => {
                    grid = Some(crop_resize::source_grid(
                        &boxes.view(),
                        broadcast,
                        batch,
                        size,
                    ));
                }
                Step::BilinearSample => {
                    let grid = grid.as_ref().ok_or(Error::MalformedPlan {
                        step: "BilinearSample",
                        reason: "source grid not yet computed",
                    })?;
                    out = Some(crop_resize::sample_grid(&images4.view(), &grid.view()));
                }
                foreign => {
                    return Err(Error::MalformedPlan {
                        step: foreign.name(),
                        reason: "step does not belong to a crop-and-resize plan",
                    });
                }
            }
        }
        let out = out.ok_or(Error::MalformedPlan {
            step: "end",
            reason: "plan produced no output",
        })?;
        Ok(restore_rank(out.into_dyn(), images.ndim()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::external)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::external)
    }
}
