use image::RgbaImage;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::math::{orient2d, reflect_101};
use crate::mesh::triangle::Triangle;

/// Half-open integer pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge, inclusive.
    pub x0: i64,
    /// Top edge, inclusive.
    pub y0: i64,
    /// Right edge, exclusive.
    pub x1: i64,
    /// Bottom edge, exclusive.
    pub y1: i64,
}

impl PixelRect {
    /// Smallest rectangle holding every pixel whose centre can fall inside `tri`.
    pub fn bounding(tri: &Triangle) -> Self {
        let b = tri.bounds();
        Self {
            x0: b.x0.floor() as i64,
            y0: b.y0.floor() as i64,
            x1: b.x1.ceil() as i64,
            y1: b.y1.ceil() as i64,
        }
    }

    /// Every pixel of `canvas`.
    pub fn of_canvas(canvas: Canvas) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: i64::from(canvas.width),
            y1: i64::from(canvas.height),
        }
    }

    /// Width in pixels, zero when inverted.
    pub fn width(self) -> i64 {
        (self.x1 - self.x0).max(0)
    }

    /// Height in pixels, zero when inverted.
    pub fn height(self) -> i64 {
        (self.y1 - self.y0).max(0)
    }

    /// Whether the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel count.
    pub fn area(self) -> usize {
        (self.width() * self.height()) as usize
    }

    /// Overlap of two rectangles; may be empty.
    pub fn intersect(self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    /// Clip to `bounds`, widening a collapsed axis to one pixel so it can still be sampled.
    ///
    /// Returns `None` only when `bounds` itself is empty.
    pub fn sample_window(self, bounds: Self) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        let clamp_x = |v: i64| v.clamp(bounds.x0, bounds.x1 - 1);
        let clamp_y = |v: i64| v.clamp(bounds.y0, bounds.y1 - 1);
        let mut r = self.intersect(bounds);
        if r.width() == 0 {
            r.x0 = clamp_x(self.x0);
            r.x1 = r.x0 + 1;
        }
        if r.height() == 0 {
            r.y0 = clamp_y(self.y0);
            r.y1 = r.y0 + 1;
        }
        Some(r)
    }

    /// Top-left corner as a continuous point.
    pub fn origin(self) -> Point {
        Point::new(self.x0 as f64, self.y0 as f64)
    }
}

/// Pixel-centre coverage test for one triangle.
///
/// Each edge is evaluated with its endpoints in a canonical order, so two triangles sharing an
/// edge compute bitwise-identical values for it. A centre lying exactly on an edge belongs to
/// the triangle on the positive side of the canonical direction; adjacent triangles therefore
/// never both claim, or both drop, a shared-edge pixel.
#[derive(Clone, Copy, Debug)]
pub struct Coverage {
    edges: [(Point, Point, bool); 3],
}

impl Coverage {
    /// Build the test for `tri` in absolute image coordinates. `None` for zero-area triangles.
    pub fn new(tri: &Triangle) -> Option<Self> {
        if tri.is_degenerate() {
            return None;
        }
        let [a, b, c] = tri.vertices();
        let edge = |u: Point, v: Point, w: Point| {
            let (p, q) = canonical(u, v);
            (p, q, orient2d(p, q, w) > 0.0)
        };
        Some(Self {
            edges: [edge(a, b, c), edge(b, c, a), edge(c, a, b)],
        })
    }

    /// Whether `p` lies inside the triangle under the shared-edge tie rule.
    pub fn contains(&self, p: Point) -> bool {
        self.edges.iter().all(|&(a, b, inside_positive)| {
            let e = orient2d(a, b, p);
            if e == 0.0 {
                inside_positive
            } else {
                (e > 0.0) == inside_positive
            }
        })
    }

    /// Binary mask over `rect`, row-major, testing each pixel centre.
    pub fn mask(&self, rect: PixelRect) -> Vec<bool> {
        let mut out = Vec::with_capacity(rect.area());
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                out.push(self.contains(pixel_center(x, y)));
            }
        }
        out
    }
}

fn canonical(u: Point, v: Point) -> (Point, Point) {
    if (u.x, u.y) <= (v.x, v.y) {
        (u, v)
    } else {
        (v, u)
    }
}

/// Continuous coordinate of pixel `(x, y)`'s centre.
pub fn pixel_center(x: i64, y: i64) -> Point {
    Point::new(x as f64 + 0.5, y as f64 + 0.5)
}

/// Cropped, read-only view of an image used as an interpolation source.
#[derive(Clone, Copy)]
pub struct Patch<'a> {
    image: &'a RgbaImage,
    window: PixelRect,
}

impl<'a> Patch<'a> {
    /// View `rect` of `image`; `None` for a zero-sized image.
    pub fn new(image: &'a RgbaImage, rect: PixelRect) -> Option<Self> {
        let bounds = PixelRect {
            x0: 0,
            y0: 0,
            x1: i64::from(image.width()),
            y1: i64::from(image.height()),
        };
        let window = rect.sample_window(bounds)?;
        Some(Self { image, window })
    }

    /// Image region this view samples from.
    pub fn window(&self) -> PixelRect {
        self.window
    }

    /// Bilinear sample at patch-local continuous coordinate `p`, mirroring past the patch
    /// border without repeating edge pixels.
    pub fn sample(&self, p: Point) -> [f32; 4] {
        let w = self.window.width();
        let h = self.window.height();

        let fx = p.x - 0.5;
        let fy = p.y - 0.5;
        let ix = fx.floor();
        let iy = fy.floor();
        let tx = (fx - ix) as f32;
        let ty = (fy - iy) as f32;
        let (ix, iy) = (ix as i64, iy as i64);

        let x0 = reflect_101(ix, w);
        let x1 = reflect_101(ix + 1, w);
        let y0 = reflect_101(iy, h);
        let y1 = reflect_101(iy + 1, h);

        let p00 = self.texel(x0, y0);
        let p10 = self.texel(x1, y0);
        let p01 = self.texel(x0, y1);
        let p11 = self.texel(x1, y1);

        let mut out = [0f32; 4];
        for c in 0..4 {
            let top = p00[c] + (p10[c] - p00[c]) * tx;
            let bottom = p01[c] + (p11[c] - p01[c]) * tx;
            out[c] = top + (bottom - top) * ty;
        }
        out
    }

    fn texel(&self, lx: i64, ly: i64) -> [f32; 4] {
        let x = (self.window.x0 + lx) as u32;
        let y = (self.window.y0 + ly) as u32;
        let px = self.image.get_pixel(x, y).0;
        [
            f32::from(px[0]),
            f32::from(px[1]),
            f32::from(px[2]),
            f32::from(px[3]),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/warp/raster.rs"]
mod tests;
