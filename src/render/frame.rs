use image::RgbaImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{MorphError, MorphResult};

/// A composited frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Zero-filled frame; pixels outside the mesh stay transparent black.
    pub fn blank(canvas: Canvas) -> Self {
        let len = canvas.width as usize * canvas.height as usize * 4;
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; len],
        }
    }

    /// Copy an `RgbaImage` into a frame.
    pub fn from_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().clone(),
        }
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(o..o + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Per-channel mean over every pixel, used by tests and diagnostics.
    pub fn mean_rgba(&self) -> [f64; 4] {
        let mut sum = [0f64; 4];
        let n = (self.data.len() / 4).max(1) as f64;
        for px in self.data.chunks_exact(4) {
            for (s, &v) in sum.iter_mut().zip(px) {
                *s += f64::from(v);
            }
        }
        sum.map(|s| s / n)
    }

    /// Convert back to an `RgbaImage`.
    pub fn into_image(self) -> MorphResult<RgbaImage> {
        let (w, h) = (self.width, self.height);
        RgbaImage::from_raw(w, h, self.data)
            .ok_or_else(|| MorphError::input(format!("frame buffer does not match {w}x{h}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
