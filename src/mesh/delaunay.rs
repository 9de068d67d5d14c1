use std::collections::{BTreeMap, HashMap};

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{MorphError, MorphResult};
use crate::foundation::math::{incircle, orient2d};
use crate::landmarks::set::LandmarkSet;
use crate::mesh::triangle::{TriangleIndex, TriangleList};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Scale of the enclosing triangle relative to the point spread.
const SUPER_SCALE: f64 = 256.0;

/// Snapshot handed to a [`TriangulationObserver`] after each incremental insertion.
#[derive(Clone, Debug)]
pub struct InsertionStep {
    /// Landmark index that was just inserted.
    pub inserted: usize,
    /// Triangles whose three vertices are all landmarks inserted so far.
    pub triangles: Vec<TriangleIndex>,
}

/// Receives the partial mesh after every insertion.
pub trait TriangulationObserver {
    /// Called with the mesh after landmark `step.inserted` is added.
    fn on_insert(&mut self, step: InsertionStep);
}

impl<F: FnMut(InsertionStep)> TriangulationObserver for F {
    fn on_insert(&mut self, step: InsertionStep) {
        self(step)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Edge(usize, usize);

impl Edge {
    fn new(a: usize, b: usize) -> Self {
        if a < b { Edge(a, b) } else { Edge(b, a) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tri(usize, usize, usize);

impl Tri {
    fn edges(self) -> [Edge; 3] {
        [
            Edge::new(self.0, self.1),
            Edge::new(self.1, self.2),
            Edge::new(self.2, self.0),
        ]
    }

    fn is_real(self, n: usize) -> bool {
        self.0 < n && self.1 < n && self.2 < n
    }
}

/// Delaunay-triangulate `reference` inside the `width x height` frame.
///
/// Triangles are emitted as landmark index triples so the same topology can be resolved
/// against the source, destination, and every interpolated set.
///
/// # Errors
///
/// - [`MorphError::InsufficientPoints`] for fewer than 3 points.
/// - [`MorphError::DegenerateInput`] when every point is collinear.
/// - [`MorphError::Geometry`] when no triangle survives the frame test.
pub fn triangulate(width: u32, height: u32, reference: &LandmarkSet) -> MorphResult<TriangleList> {
    triangulate_with(Canvas { width, height }, reference, None)
}

/// [`triangulate`] with an observer called after every incremental insertion.
pub fn triangulate_observed(
    width: u32,
    height: u32,
    reference: &LandmarkSet,
    observer: &mut dyn TriangulationObserver,
) -> MorphResult<TriangleList> {
    triangulate_with(Canvas { width, height }, reference, Some(observer))
}

#[tracing::instrument(skip(reference, observer), fields(points = reference.len()))]
fn triangulate_with(
    canvas: Canvas,
    reference: &LandmarkSet,
    mut observer: Option<&mut dyn TriangulationObserver>,
) -> MorphResult<TriangleList> {
    let input = reference.points();
    let n = input.len();
    if n < 3 {
        return Err(MorphError::InsufficientPoints { found: n });
    }
    if let Some(i) = input.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(MorphError::input(format!(
            "reference landmark {i} has a non-finite coordinate"
        )));
    }
    if all_collinear(input) {
        return Err(MorphError::DegenerateInput);
    }

    let mut points = input.to_vec();
    let (s0, s1, s2) = (n, n + 1, n + 2);
    points.extend(super_triangle(input));

    let mut triangles = vec![Tri(s0, s1, s2)];
    let mut first_at: HashMap<(u64, u64), usize> = HashMap::with_capacity(n);

    for pid in 0..n {
        let p = points[pid];
        if let Some(&first) = first_at.get(&coord_key(p)) {
            tracing::debug!(index = pid, first, "skipping coincident landmark");
            continue;
        }
        first_at.insert(coord_key(p), pid);

        insert_point(pid, &points, &mut triangles);

        if let Some(obs) = observer.as_deref_mut() {
            obs.on_insert(InsertionStep {
                inserted: pid,
                triangles: real_triangles(&triangles, n),
            });
        }
    }

    let mut rejected = 0usize;
    let mut out = Vec::with_capacity(triangles.len());
    for t in triangles {
        if !t.is_real(n) {
            continue;
        }
        if !(canvas.contains_closed(points[t.0])
            && canvas.contains_closed(points[t.1])
            && canvas.contains_closed(points[t.2]))
        {
            rejected += 1;
            continue;
        }
        out.push(TriangleIndex::new(t.0, t.1, t.2)?);
    }

    if out.is_empty() {
        return Err(MorphError::geometry(
            "no triangle lies inside the frame rectangle",
        ));
    }

    let list = TriangleList::new(out);
    tracing::debug!(triangles = list.len(), rejected, "triangulated reference set");
    Ok(list)
}

fn insert_point(pid: usize, points: &[Point], triangles: &mut Vec<Tri>) {
    let p = points[pid];

    let bad: Vec<usize> = triangles
        .iter()
        .enumerate()
        .filter_map(|(i, &t)| point_in_circumcircle(p, t, points).then_some(i))
        .collect();
    if bad.is_empty() {
        return;
    }

    // Cavity boundary edges are the ones owned by exactly one bad triangle.
    let mut edge_count = BTreeMap::<Edge, u8>::new();
    for &i in &bad {
        for e in triangles[i].edges() {
            *edge_count.entry(e).or_insert(0) += 1;
        }
    }

    for &i in bad.iter().rev() {
        triangles.swap_remove(i);
    }

    for (e, count) in edge_count {
        if count != 1 {
            continue;
        }
        let t = if orient2d(points[e.0], points[e.1], p) > 0.0 {
            Tri(e.0, e.1, pid)
        } else {
            Tri(e.0, pid, e.1)
        };
        triangles.push(t);
    }
}

fn point_in_circumcircle(p: Point, t: Tri, points: &[Point]) -> bool {
    let (a, b, c) = (points[t.0], points[t.1], points[t.2]);
    if orient2d(a, b, c) > 0.0 {
        incircle(a, b, c, p) > 0.0
    } else {
        incircle(a, c, b, p) > 0.0
    }
}

fn super_triangle(points: &[Point]) -> [Point; 3] {
    let (mut minx, mut miny) = (f64::INFINITY, f64::INFINITY);
    let (mut maxx, mut maxy) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        minx = minx.min(p.x);
        miny = miny.min(p.y);
        maxx = maxx.max(p.x);
        maxy = maxy.max(p.y);
    }
    let delta = (maxx - minx).max(maxy - miny);
    let (cx, cy) = ((minx + maxx) * 0.5, (miny + maxy) * 0.5);
    let r = SUPER_SCALE * delta + 1.0;
    [
        Point::new(cx, cy + 2.0 * r),
        Point::new(cx - SQRT_3 * r, cy - r),
        Point::new(cx + SQRT_3 * r, cy - r),
    ]
}

fn all_collinear(points: &[Point]) -> bool {
    let a = points[0];
    let Some(b) = points.iter().copied().find(|&p| p != a) else {
        return true;
    };
    points.iter().all(|&c| orient2d(a, b, c) == 0.0)
}

fn real_triangles(triangles: &[Tri], n: usize) -> Vec<TriangleIndex> {
    let mut out: Vec<TriangleIndex> = triangles
        .iter()
        .filter(|t| t.is_real(n))
        .filter_map(|t| TriangleIndex::new(t.0, t.1, t.2).ok())
        .collect();
    out.sort_unstable();
    out
}

fn coord_key(p: Point) -> (u64, u64) {
    // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/delaunay.rs"]
mod tests;
