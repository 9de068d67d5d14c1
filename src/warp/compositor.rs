use image::RgbaImage;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::MorphResult;
use crate::foundation::math::to_u8;
use crate::landmarks::set::LandmarkSet;
use crate::mesh::triangle::{Triangle, TriangleIndex};
use crate::render::frame::FrameRGBA;
use crate::warp::affine::solve_affine;
use crate::warp::raster::{Coverage, Patch, PixelRect};

/// One logical triangle resolved against the source, destination and interpolated sets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleInstance {
    /// Vertices in the source image.
    pub source: Triangle,
    /// Vertices in the destination image.
    pub dest: Triangle,
    /// Vertices in the output frame.
    pub target: Triangle,
}

impl TriangleInstance {
    /// Resolve `index` against all three landmark sets.
    pub fn resolve(
        index: TriangleIndex,
        source: &LandmarkSet,
        dest: &LandmarkSet,
        target: &LandmarkSet,
    ) -> MorphResult<Self> {
        Ok(Self {
            source: index.resolve(source)?,
            dest: index.resolve(dest)?,
            target: index.resolve(target)?,
        })
    }
}

/// Blended pixels for one target triangle, ready to be written through its coverage mask.
///
/// Produced from read-only inputs, so patches for one frame can be built concurrently and applied
/// afterwards.
#[derive(Clone, Debug)]
pub struct TrianglePatch {
    rect: PixelRect,
    mask: Vec<bool>,
    pixels: Vec<[u8; 4]>,
}

impl TrianglePatch {
    /// Target rectangle in frame pixel coordinates.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Number of pixels this patch writes.
    pub fn covered(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Write covered pixels into `frame`; everything else keeps its current value.
    pub fn apply(&self, frame: &mut FrameRGBA) {
        let clip = self.rect.intersect(PixelRect::of_canvas(frame.canvas()));
        if clip != self.rect {
            return;
        }
        let fw = frame.width as usize;
        let rw = self.rect.width() as usize;
        for (row, y) in (self.rect.y0..self.rect.y1).enumerate() {
            for (col, x) in (self.rect.x0..self.rect.x1).enumerate() {
                let i = row * rw + col;
                if !self.mask[i] {
                    continue;
                }
                let o = (y as usize * fw + x as usize) * 4;
                frame.data[o..o + 4].copy_from_slice(&self.pixels[i]);
            }
        }
    }
}

/// Warp `src` and `dst` into `tri.target` and blend them with weight `alpha` toward `dst`.
///
/// Returns `None` when nothing would be written: a zero-area target, a target entirely outside
/// `canvas`, or an empty input image.
pub fn render_patch(
    src: &RgbaImage,
    dst: &RgbaImage,
    tri: &TriangleInstance,
    alpha: f64,
    canvas: Canvas,
) -> Option<TrianglePatch> {
    let Some(coverage) = Coverage::new(&tri.target) else {
        tracing::trace!(target = ?tri.target, "skipping zero-area target triangle");
        return None;
    };
    let rect = PixelRect::bounding(&tri.target).intersect(PixelRect::of_canvas(canvas));
    if rect.is_empty() {
        return None;
    }
    let mask = coverage.mask(rect);

    let src_patch = Patch::new(src, PixelRect::bounding(&tri.source))?;
    let dst_patch = Patch::new(dst, PixelRect::bounding(&tri.dest))?;

    let target_local = tri.target.translated(rect.origin()).vertices();
    let src_local = tri.source.translated(src_patch.window().origin()).vertices();
    let dst_local = tri.dest.translated(dst_patch.window().origin()).vertices();

    // Maps run from the target back into each endpoint patch, so only the target has to be
    // invertible.
    let to_src = solve_affine(target_local, src_local).ok()?;
    let to_dst = solve_affine(target_local, dst_local).ok()?;

    let a = alpha as f32;
    let rw = rect.width() as usize;
    let mut pixels = vec![[0u8; 4]; mask.len()];
    for (i, px) in pixels.iter_mut().enumerate() {
        if !mask[i] {
            continue;
        }
        let local = Point::new((i % rw) as f64 + 0.5, (i / rw) as f64 + 0.5);
        let s = src_patch.sample(to_src * local);
        let d = dst_patch.sample(to_dst * local);
        for c in 0..4 {
            px[c] = to_u8((1.0 - a) * s[c] + a * d[c]);
        }
    }

    Some(TrianglePatch { rect, mask, pixels })
}

/// Composite one triangle instance into `frame`. Degenerate targets are a no-op.
pub fn composite_triangle(
    src: &RgbaImage,
    dst: &RgbaImage,
    frame: &mut FrameRGBA,
    tri: &TriangleInstance,
    alpha: f64,
) {
    if let Some(patch) = render_patch(src, dst, tri, alpha, frame.canvas()) {
        patch.apply(frame);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/warp/compositor.rs"]
mod tests;
