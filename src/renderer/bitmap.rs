use crate::backend::{Point, Rect, Size};
use crate::color::Color;

/// Simple RGBA8 bitmap produced by the CPU backend.
///
/// Pixels are arranged in row-major order with the origin at the top-left.
/// Color channels are not premultiplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 4]>,
}

impl Bitmap {
    /// Creates a fully transparent bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width.saturating_mul(height);
        Self {
            width,
            height,
            pixels: vec![[0; 4]; len],
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(Point::zero(), self.size())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Overwrites a pixel. Out of bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, pixel: [u8; 4]) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = pixel;
        }
    }

    /// Fills every pixel with an opaque color.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill([color.r, color.g, color.b, 255]);
    }

    /// Draws `pixel` over the existing content using its alpha.
    pub fn blend_over(&mut self, x: i32, y: i32, pixel: [u8; 4]) {
        let Some(idx) = self.index(x, y) else {
            return;
        };

        let src_a = pixel[3] as u32;
        if src_a == 0 {
            return;
        }

        let dst = self.pixels[idx];
        let dst_a = dst[3] as u32;
        // Output alpha scaled by 255.
        let out_a = src_a * 255 + dst_a * (255 - src_a);
        if out_a == 0 {
            return;
        }

        let mut out = [0u8; 4];
        for c in 0..3 {
            let value =
                (pixel[c] as u32 * src_a * 255 + dst[c] as u32 * dst_a * (255 - src_a)) / out_a;
            out[c] = value.min(255) as u8;
        }
        out[3] = (out_a / 255).min(255) as u8;
        self.pixels[idx] = out;
    }
}

/// Copies `clip` from `src` to `dest.origin` in `dst`, clipped to both bitmaps.
///
/// With `blend` the source is alpha-composited; without it every pixel that
/// is not fully transparent replaces the destination.
pub fn blit(src: &Bitmap, clip: Rect, dst: &mut Bitmap, dest: Rect, blend: bool) {
    for row in 0..clip.size.height.max(0) {
        for col in 0..clip.size.width.max(0) {
            let Some(pixel) = src.get(clip.origin.x + col, clip.origin.y + row) else {
                continue;
            };
            let x = dest.origin.x + col;
            let y = dest.origin.y + row;

            if blend {
                dst.blend_over(x, y, pixel);
            } else if pixel[3] != 0 {
                dst.set(x, y, pixel);
            }
        }
    }
}
