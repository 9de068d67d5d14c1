use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::lerp;

/// Number of synthetic anchors appended by [`LandmarkSet::with_anchors`].
pub const BOUNDARY_ANCHOR_COUNT: usize = 9;

/// Ordered, fixed-length landmark collection for one image.
///
/// Index `i` names the same logical feature in every set of one morph, so two sets are only
/// ever combined when their lengths match.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// Wrap an ordered point list.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a set from `(x, y)` pairs.
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    /// Number of landmarks.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no landmarks.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmarks in index order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Landmark `index`, or [`MorphError::IndexOutOfRange`].
    pub fn get(&self, index: usize) -> MorphResult<Point> {
        self.points
            .get(index)
            .copied()
            .ok_or(MorphError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    /// Append the nine boundary anchors for `canvas` so the mesh spans the whole frame.
    pub fn with_anchors(mut self, canvas: Canvas) -> Self {
        self.points.extend(boundary_anchors(canvas));
        self
    }

    /// Per-index blend `(1 - alpha) * a + alpha * b`.
    pub fn lerp(a: &Self, b: &Self, alpha: f64) -> MorphResult<Self> {
        ensure_same_len(a, b)?;
        let points = a
            .points
            .iter()
            .zip(&b.points)
            .map(|(pa, pb)| Point::new(lerp(pa.x, pb.x, alpha), lerp(pa.y, pb.y, alpha)))
            .collect();
        Ok(Self { points })
    }

    /// Midpoint set used as the triangulation reference.
    pub fn average(a: &Self, b: &Self) -> MorphResult<Self> {
        Self::lerp(a, b, 0.5)
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

pub(crate) fn ensure_same_len(a: &LandmarkSet, b: &LandmarkSet) -> MorphResult<()> {
    if a.len() != b.len() {
        return Err(MorphError::LandmarkCountMismatch {
            source_len: a.len(),
            dest_len: b.len(),
        });
    }
    Ok(())
}

/// Frame anchors in fixed order: the four corners, the top, bottom, left and right edge
/// midpoints, then the centre.
pub fn boundary_anchors(canvas: Canvas) -> [Point; BOUNDARY_ANCHOR_COUNT] {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let (cx, cy) = (w / 2.0, h / 2.0);
    [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
        Point::new(cx, 0.0),
        Point::new(cx, h),
        Point::new(0.0, cy),
        Point::new(w, cy),
        Point::new(cx, cy),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/set.rs"]
mod tests;
