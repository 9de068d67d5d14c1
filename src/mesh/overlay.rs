//! Debug rendering of a mesh over an image.
//!
//! Wraps [`imageproc::drawing`] to draw triangle edges and landmark dots, and records one
//! overlay per incremental insertion when used as a [`TriangulationObserver`].

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::foundation::core::Point;
use crate::foundation::error::{MorphError, MorphResult};
use crate::landmarks::set::LandmarkSet;
use crate::mesh::delaunay::{InsertionStep, TriangulationObserver};
use crate::mesh::triangle::TriangleIndex;

const EDGE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DOT: Rgba<u8> = Rgba([255, 0, 0, 255]);
const INSERTED: Rgba<u8> = Rgba([0, 255, 0, 255]);
const DOT_RADIUS: i32 = 2;

/// Copy of `image` with every triangle outlined and every landmark dotted.
pub fn draw_mesh(
    image: &RgbaImage,
    landmarks: &LandmarkSet,
    triangles: &[TriangleIndex],
) -> MorphResult<RgbaImage> {
    let mut out = image.clone();
    draw_edges(&mut out, landmarks, triangles)?;
    for &p in landmarks.points() {
        draw_filled_circle_mut(&mut out, pixel(p), DOT_RADIUS, DOT);
    }
    Ok(out)
}

fn draw_edges(
    out: &mut RgbaImage,
    landmarks: &LandmarkSet,
    triangles: &[TriangleIndex],
) -> MorphResult<()> {
    for t in triangles {
        let [a, b, c] = t.resolve(landmarks)?.vertices();
        for (u, v) in [(a, b), (b, c), (c, a)] {
            draw_line_segment_mut(out, (u.x as f32, u.y as f32), (v.x as f32, v.y as f32), EDGE);
        }
    }
    Ok(())
}

fn pixel(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Observer that renders the partial mesh after every insertion.
///
/// Only landmarks inserted so far are dotted; the newest one is highlighted.
pub struct MeshAnimation<'a> {
    base: &'a RgbaImage,
    landmarks: &'a LandmarkSet,
    frames: Vec<RgbaImage>,
    failed: Option<MorphError>,
}

impl<'a> MeshAnimation<'a> {
    /// Animate over `base`, dotting `landmarks` as they are inserted.
    pub fn new(base: &'a RgbaImage, landmarks: &'a LandmarkSet) -> Self {
        Self {
            base,
            landmarks,
            frames: Vec::new(),
            failed: None,
        }
    }

    /// Rendered frames in insertion order, or the first drawing error.
    pub fn finish(self) -> MorphResult<Vec<RgbaImage>> {
        match self.failed {
            Some(e) => Err(e),
            None => Ok(self.frames),
        }
    }
}

impl TriangulationObserver for MeshAnimation<'_> {
    fn on_insert(&mut self, step: InsertionStep) {
        if self.failed.is_some() {
            return;
        }
        let mut out = self.base.clone();
        if let Err(e) = draw_edges(&mut out, self.landmarks, &step.triangles) {
            self.failed = Some(e);
            return;
        }
        let points = self.landmarks.points();
        for &p in points.iter().take(step.inserted) {
            draw_filled_circle_mut(&mut out, pixel(p), DOT_RADIUS, DOT);
        }
        if let Some(&p) = points.get(step.inserted) {
            draw_filled_circle_mut(&mut out, pixel(p), DOT_RADIUS + 1, INSERTED);
        }
        self.frames.push(out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/overlay.rs"]
mod tests;
