//! Per-triangle affine warping and alpha blending.

/// Three-point affine solve.
pub mod affine;
/// Triangle warp and cross-dissolve.
pub mod compositor;
/// Pixel rectangles, coverage masks and bilinear sampling.
pub mod raster;
