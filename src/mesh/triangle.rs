use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::orient2d;
use crate::landmarks::set::LandmarkSet;

/// Three distinct landmark indices naming one mesh triangle.
///
/// Triangles are stored with indices sorted ascending; winding order carries no meaning.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TriangleIndex(pub [usize; 3]);

impl TriangleIndex {
    /// Build a normalised triple, rejecting repeated indices.
    pub fn new(a: usize, b: usize, c: usize) -> MorphResult<Self> {
        if a == b || b == c || a == c {
            return Err(MorphError::index(format!(
                "triangle indices must be distinct, got ({a}, {b}, {c})"
            )));
        }
        let mut v = [a, b, c];
        v.sort_unstable();
        Ok(Self(v))
    }

    /// Sorted landmark indices.
    pub fn indices(self) -> [usize; 3] {
        self.0
    }

    /// Largest index; a set must hold more points than this.
    pub fn max_index(self) -> usize {
        self.0[2]
    }

    /// Resolve against any landmark set built with the same ordering.
    pub fn resolve(self, landmarks: &LandmarkSet) -> MorphResult<Triangle> {
        let [a, b, c] = self.0;
        Ok(Triangle([
            landmarks.get(a)?,
            landmarks.get(b)?,
            landmarks.get(c)?,
        ]))
    }
}

/// Resolve `idx` against `landmarks`.
pub fn resolve(idx: TriangleIndex, landmarks: &LandmarkSet) -> MorphResult<Triangle> {
    idx.resolve(landmarks)
}

/// Concrete triangle vertices in image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle(pub [Point; 3]);

impl Triangle {
    /// Vertices in stored order.
    pub fn vertices(&self) -> [Point; 3] {
        self.0
    }

    /// Twice the signed area.
    pub fn signed_area2(&self) -> f64 {
        let [a, b, c] = self.0;
        orient2d(a, b, c)
    }

    /// Zero or non-finite area.
    pub fn is_degenerate(&self) -> bool {
        let a = self.signed_area2();
        a == 0.0 || !a.is_finite()
    }

    /// Tight floating-point bounds.
    pub fn bounds(&self) -> Rect {
        let [a, b, c] = self.0;
        Rect::from_points(a, b).union_pt(c)
    }

    /// Same triangle expressed relative to `origin`.
    pub fn translated(&self, origin: Point) -> Self {
        let off = origin.to_vec2();
        let [a, b, c] = self.0;
        Self([a - off, b - off, c - off])
    }
}

/// Ordered, deduplicated list of mesh triangles for one morph job.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TriangleList {
    triangles: Vec<TriangleIndex>,
}

impl TriangleList {
    /// Sort and deduplicate `triangles`.
    pub fn new(mut triangles: Vec<TriangleIndex>) -> Self {
        triangles.sort_unstable();
        triangles.dedup();
        Self { triangles }
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the list holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, TriangleIndex> {
        self.triangles.iter()
    }

    /// Triangles as a slice.
    pub fn as_slice(&self) -> &[TriangleIndex] {
        &self.triangles
    }

    /// Fail with [`MorphError::IndexOutOfRange`] unless every triple resolves in a set of `len`.
    pub fn check_indices(&self, len: usize) -> MorphResult<()> {
        for t in &self.triangles {
            let max = t.max_index();
            if max >= len {
                return Err(MorphError::IndexOutOfRange { index: max, len });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TriangleList {
    type Item = &'a TriangleIndex;
    type IntoIter = std::slice::Iter<'a, TriangleIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/triangle.rs"]
mod tests;
