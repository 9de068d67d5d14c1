use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::core::Canvas;
use crate::foundation::error::{MorphError, MorphResult};
use crate::landmarks::set::{LandmarkSet, ensure_same_len};
use crate::mesh::delaunay::triangulate;
use crate::mesh::triangle::TriangleList;
use crate::render::frame::FrameRGBA;
use crate::warp::compositor::{TriangleInstance, composite_triangle, render_patch};

/// Everything needed to render one morph sequence.
///
/// Construction validates the whole job, so rendering any frame of a constructed job cannot fail
/// on input shape.
#[derive(Clone, Debug)]
pub struct MorphJob {
    source_image: RgbaImage,
    dest_image: RgbaImage,
    source: LandmarkSet,
    dest: LandmarkSet,
    triangles: TriangleList,
    frame_count: u64,
}

impl MorphJob {
    /// Validate and assemble a job from an existing shared triangulation.
    ///
    /// # Errors
    ///
    /// - [`MorphError::InvalidFrameCount`] when `frame_count < 2`.
    /// - [`MorphError::LandmarkCountMismatch`] when the two sets differ in length.
    /// - [`MorphError::ImageSizeMismatch`] when the two images differ in size.
    /// - [`MorphError::IndexOutOfRange`] when a triangle references a missing landmark.
    #[tracing::instrument(skip_all, fields(frames = frame_count, triangles = triangles.len()))]
    pub fn new(
        source_image: RgbaImage,
        dest_image: RgbaImage,
        source: LandmarkSet,
        dest: LandmarkSet,
        triangles: TriangleList,
        frame_count: u64,
    ) -> MorphResult<Self> {
        check_frame_count(frame_count)?;
        ensure_same_len(&source, &dest)?;
        check_images(&source_image, &dest_image)?;
        triangles.check_indices(source.len())?;
        if triangles.is_empty() {
            return Err(MorphError::geometry("morph job has no triangles"));
        }
        tracing::info!(
            width = source_image.width(),
            height = source_image.height(),
            landmarks = source.len(),
            "morph job ready"
        );
        Ok(Self {
            source_image,
            dest_image,
            source,
            dest,
            triangles,
            frame_count,
        })
    }

    /// Triangulate the average of `source` and `dest` and build a job on that topology.
    pub fn from_landmarks(
        source_image: RgbaImage,
        dest_image: RgbaImage,
        source: LandmarkSet,
        dest: LandmarkSet,
        frame_count: u64,
    ) -> MorphResult<Self> {
        check_frame_count(frame_count)?;
        check_images(&source_image, &dest_image)?;
        let reference = LandmarkSet::average(&source, &dest)?;
        let triangles = triangulate(source_image.width(), source_image.height(), &reference)?;
        Self::new(
            source_image,
            dest_image,
            source,
            dest,
            triangles,
            frame_count,
        )
    }

    /// Shared image size of both endpoints.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.source_image.width(),
            height: self.source_image.height(),
        }
    }

    /// Number of frames in the sequence, endpoints included.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Shared mesh topology.
    pub fn triangles(&self) -> &TriangleList {
        &self.triangles
    }

    /// Landmarks of the source face.
    pub fn source_landmarks(&self) -> &LandmarkSet {
        &self.source
    }

    /// Landmarks of the destination face.
    pub fn dest_landmarks(&self) -> &LandmarkSet {
        &self.dest
    }

    /// Blend weight of frame `j`: `j / (frame_count - 1)`.
    pub fn alpha_at(&self, j: u64) -> f64 {
        j as f64 / (self.frame_count - 1) as f64
    }

    /// Render frame `j` of the sequence.
    pub fn render_frame(&self, j: u64) -> MorphResult<FrameRGBA> {
        if j >= self.frame_count {
            return Err(MorphError::input(format!(
                "frame {j} out of range for a {}-frame sequence",
                self.frame_count
            )));
        }
        self.render_alpha(self.alpha_at(j))
    }

    /// Render the morph at an arbitrary `alpha` in `[0, 1]`.
    #[tracing::instrument(skip(self))]
    pub fn render_alpha(&self, alpha: f64) -> MorphResult<FrameRGBA> {
        check_alpha(alpha)?;
        let target = LandmarkSet::lerp(&self.source, &self.dest, alpha)?;
        let mut frame = FrameRGBA::blank(self.canvas());
        for &idx in &self.triangles {
            let tri = TriangleInstance::resolve(idx, &self.source, &self.dest, &target)?;
            composite_triangle(
                &self.source_image,
                &self.dest_image,
                &mut frame,
                &tri,
                alpha,
            );
        }
        Ok(frame)
    }

    /// Like [`MorphJob::render_alpha`], building triangle patches on the current rayon pool and
    /// applying them in list order.
    #[tracing::instrument(skip(self))]
    pub fn render_alpha_parallel(&self, alpha: f64) -> MorphResult<FrameRGBA> {
        check_alpha(alpha)?;
        let target = LandmarkSet::lerp(&self.source, &self.dest, alpha)?;
        let canvas = self.canvas();
        let patches = self
            .triangles
            .as_slice()
            .par_iter()
            .map(|&idx| {
                let tri = TriangleInstance::resolve(idx, &self.source, &self.dest, &target)?;
                Ok(render_patch(
                    &self.source_image,
                    &self.dest_image,
                    &tri,
                    alpha,
                    canvas,
                ))
            })
            .collect::<MorphResult<Vec<_>>>()?;

        let mut frame = FrameRGBA::blank(canvas);
        for patch in patches.iter().flatten() {
            patch.apply(&mut frame);
        }
        Ok(frame)
    }

    /// Consume the job into its frame sequence.
    pub fn frames(self) -> MorphFrames {
        MorphFrames { job: self, next: 0 }
    }
}

/// The ordered, single-pass frame sequence of one [`MorphJob`].
#[derive(Debug)]
pub struct MorphFrames {
    job: MorphJob,
    next: u64,
}

impl MorphFrames {
    /// Job being rendered.
    pub fn job(&self) -> &MorphJob {
        &self.job
    }
}

impl Iterator for MorphFrames {
    type Item = MorphResult<FrameRGBA>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.job.frame_count {
            return None;
        }
        let j = self.next;
        self.next += 1;
        tracing::debug!(frame = j, "rendering frame");
        Some(self.job.render_frame(j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.job.frame_count - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for MorphFrames {}

fn check_frame_count(frames: u64) -> MorphResult<()> {
    if frames < 2 {
        return Err(MorphError::InvalidFrameCount { frames });
    }
    Ok(())
}

fn check_images(src: &RgbaImage, dst: &RgbaImage) -> MorphResult<()> {
    if src.dimensions() != dst.dimensions() {
        return Err(MorphError::ImageSizeMismatch {
            src_w: src.width(),
            src_h: src.height(),
            dst_w: dst.width(),
            dst_h: dst.height(),
        });
    }
    if src.width() == 0 || src.height() == 0 {
        return Err(MorphError::input("images must be non-empty"));
    }
    Ok(())
}

fn check_alpha(alpha: f64) -> MorphResult<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(MorphError::input(format!(
            "alpha must be within [0, 1], got {alpha}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequencer.rs"]
mod tests;
