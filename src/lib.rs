#![doc = r#"
CROPKIT — differentiable crop primitives for batched image tensors.

This crate provides two pure, stateless operations over `ndarray` image
batches: bilinear `crop_and_resize` (extract a quadrilateral region per batch
element and resample it to a fixed grid) and `center_crop` (exact centered
window copy). Both ship with reverse-mode companions that return well-formed
gradients, a `gradcheck` facility for verifying them numerically, and traced
plans that replay an operation against inputs of any valid shape.

Both operations are side-effect free and safe to call concurrently; the
crop-and-resize forward pass parallelizes over the batch axis via rayon.

Conventions
-----------
- Images are `f64` arrays. `crop_and_resize` takes `(batch, channel, h, w)`
  or `(batch, h, w)`; `center_crop` takes any rank >= 2 with the trailing two
  axes as (height, width).
- Boxes are `(n, 4, 2)`: corners ordered top-left, top-right, bottom-left,
  bottom-right, each `(y, x)` in source pixel-index coordinates (not
  normalized). `n` is the batch size, or 1 to broadcast one box.
- Box corners on exact pixel rows/columns resample those pixels exactly.

Quick start: crop and resample a region
---------------------------------------
```rust
use ndarray::array;
use cropkit::crop_and_resize;

fn main() -> cropkit::Result<()> {
    let image = array![[
        [1., 2., 3., 4.],
        [5., 6., 7., 8.],
        [9., 10., 11., 12.],
        [13., 14., 15., 16.],
    ]]
    .into_dyn();
    let boxes = array![[[1., 1.], [1., 2.], [2., 1.], [2., 2.]]];

    let patch = crop_and_resize(&image, &boxes, (2, 2))?;
    assert_eq!(patch.shape(), &[1, 2, 2]);
    assert_eq!(patch[[0, 0, 0]], 6.0);
    Ok(())
}
```

Centered window
---------------
```rust
use ndarray::array;
use cropkit::center_crop;

fn main() -> cropkit::Result<()> {
    let image = array![[
        [1., 2., 3., 4.],
        [5., 6., 7., 8.],
        [9., 10., 11., 12.],
        [13., 14., 15., 16.],
    ]]
    .into_dyn();

    let out = center_crop(&image, (2, 4))?;
    assert_eq!(out.shape(), &[1, 2, 4]);
    assert_eq!(out[[0, 0, 0]], 5.0);
    Ok(())
}
```

Traced plans
------------
A plan captures the step sequence of an operation once and replays it later.
Geometry is recomputed from the live inputs on every run, so a plan traced at
one shape serves any other valid shape and target size:

```rust
use ndarray::ArrayD;
use cropkit::{TracedCenterCrop, center_crop};

fn main() -> cropkit::Result<()> {
    let example = ArrayD::<f64>::ones(ndarray::IxDyn(&[1, 2, 5, 4]));
    let plan = TracedCenterCrop::trace(&example, (4, 2))?;

    let fresh = ArrayD::<f64>::ones(ndarray::IxDyn(&[2, 1, 6, 3]));
    let traced = plan.run(&fresh, (2, 3))?;
    let eager = center_crop(&fresh, (2, 3))?;
    assert_eq!(traced, eager);
    Ok(())
}
```

Error handling
--------------
All public functions return `cropkit::Result<T>`; validation failures (box
count mismatch, zero or over-large sizes, fractional scalar sizes) surface
immediately at call entry, before any computation.

Useful modules
--------------
- [`api`] — the two operations and their reverse-mode companions.
- [`plan`] — traced, replayable plans.
- [`gradcheck`] — numerical-vs-analytic Jacobian comparison for tests.
- [`types`] — `OutputSize` and the box-corner layout.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod error;
pub mod gradcheck;
pub mod plan;
pub mod types;

mod core;

// Curated public API surface
pub use api::{CropResizeGrads, center_crop, center_crop_vjp, crop_and_resize, crop_and_resize_vjp};
pub use error::{Error, Result};
pub use gradcheck::gradcheck;
pub use plan::{TracedCenterCrop, TracedCropAndResize};
pub use types::{OutputSize, corner};
