//! Core numeric building blocks: argument validation, bilinear sampling
//! kernels, and the crop forward/backward passes. These are internal
//! primitives consumed by the high-level `api` module.
pub(crate) mod center_crop;
pub(crate) mod crop_resize;
pub(crate) mod sampling;
pub(crate) mod validate;
