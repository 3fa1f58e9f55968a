use std::path::Path;
use std::sync::Arc;

use crate::backend::{Rect, Size, TextBackend};
use crate::color::Color;
use crate::error::BackendError;
use crate::font_storage::FontStorage;

use super::bitmap::{Bitmap, blit};

/// A `fontdue` font opened at a fixed pixel size.
#[derive(Clone)]
pub struct CpuFont {
    pub id: fontdb::ID,
    pub font: Arc<fontdue::Font>,
    pub px: f32,
}

impl CpuFont {
    fn ascent(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|m| m.ascent)
            .unwrap_or(self.px)
    }

    /// Calls `f` with the glyph index and pen position of every character.
    fn for_each_glyph(&self, text: &str, mut f: impl FnMut(u16, f32)) -> f32 {
        let mut pen_x = 0.0;
        let mut prev: Option<u16> = None;

        for ch in text.chars() {
            let glyph_idx = self.font.lookup_glyph_index(ch);
            if let Some(prev) = prev {
                pen_x += self
                    .font
                    .horizontal_kern_indexed(prev, glyph_idx, self.px)
                    .unwrap_or(0.0);
            }
            f(glyph_idx, pen_x);
            pen_x += self.font.metrics_indexed(glyph_idx, self.px).advance_width;
            prev = Some(glyph_idx);
        }

        pen_x
    }
}

/// Alpha of one rasterized pixel.
///
/// Blended text scales glyph coverage by `alpha`. Unblended text is either
/// fully `alpha` or transparent, cut at half coverage.
fn coverage_alpha(coverage: u8, alpha: u8, blend: bool) -> u8 {
    if blend {
        (coverage as u32 * alpha as u32 / 255) as u8
    } else if coverage >= 128 {
        alpha
    } else {
        0
    }
}

/// Software [`TextBackend`] rasterizing with `fontdue` into RGBA [`Bitmap`]s.
///
/// Text drawn to the screen lands in a bitmap owned by the backend, which the
/// host can present or save however it likes.
pub struct CpuBackend {
    storage: FontStorage,
    screen: Bitmap,
}

impl CpuBackend {
    /// Creates a backend with a transparent screen of the given size.
    pub fn new(screen_width: usize, screen_height: usize) -> Self {
        Self {
            storage: FontStorage::new(),
            screen: Bitmap::new(screen_width, screen_height),
        }
    }

    /// Returns the bitmap that screen draws land in.
    pub fn screen(&self) -> &Bitmap {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Bitmap {
        &mut self.screen
    }

    /// Returns the storage holding the opened fonts.
    pub fn font_storage(&self) -> &FontStorage {
        &self.storage
    }

    /// Renders one line of text into a new bitmap as tall as the line skip.
    fn rasterize_line(
        &self,
        font: &CpuFont,
        text: &str,
        color: Color,
        alpha: u8,
        blend: bool,
    ) -> Bitmap {
        let size = self.text_size(font, text);
        let mut bitmap = Bitmap::new(size.width.max(0) as usize, size.height.max(0) as usize);
        let baseline = font.ascent();

        font.for_each_glyph(text, |glyph_idx, pen_x| {
            let (metrics, coverage) = font.font.rasterize_indexed(glyph_idx, font.px);
            if metrics.width == 0 || metrics.height == 0 {
                return;
            }

            let origin_x = (pen_x + metrics.xmin as f32).round() as i32;
            let origin_y = (baseline - (metrics.ymin as f32 + metrics.height as f32)).round() as i32;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let a = coverage_alpha(coverage[row * metrics.width + col], alpha, blend);
                    if a == 0 {
                        continue;
                    }

                    let x = origin_x + col as i32;
                    let y = origin_y + row as i32;
                    // Neighbouring glyphs may overlap; keep the stronger coverage.
                    if bitmap.get(x, y).is_some_and(|existing| existing[3] >= a) {
                        continue;
                    }
                    bitmap.set(x, y, [color.r, color.g, color.b, a]);
                }
            }
        });

        bitmap
    }
}

impl TextBackend for CpuBackend {
    type Font = CpuFont;
    type Surface = Bitmap;

    fn open_font(&mut self, path: &Path, point_size: u32) -> Result<CpuFont, BackendError> {
        let (id, font) = self.storage.open_file(path)?;
        Ok(CpuFont {
            id,
            font,
            px: point_size as f32,
        })
    }

    fn close_font(&mut self, font: CpuFont) {
        self.storage.release(font.id, font.font);
    }

    fn line_skip(&self, font: &CpuFont) -> i32 {
        font.font
            .horizontal_line_metrics(font.px)
            .map(|m| m.new_line_size.ceil() as i32)
            .unwrap_or(font.px.ceil() as i32)
    }

    fn text_size(&self, font: &CpuFont, text: &str) -> Size {
        let width = font.for_each_glyph(text, |_, _| {});
        Size::new(width.ceil() as i32, self.line_skip(font))
    }

    fn draw_text(
        &mut self,
        font: &CpuFont,
        text: &str,
        color: Color,
        alpha: u8,
        dest: Rect,
    ) -> Result<(), BackendError> {
        let line = self.rasterize_line(font, text, color, alpha, true);
        blit(
            &line,
            line.bounds(),
            &mut self.screen,
            Rect::new(dest.origin, line.size()),
            true,
        );
        Ok(())
    }

    fn render_text_to_surface(
        &mut self,
        font: &CpuFont,
        text: &str,
        color: Color,
        alpha: u8,
        blend: bool,
    ) -> Result<Bitmap, BackendError> {
        Ok(self.rasterize_line(font, text, color, alpha, blend))
    }

    fn surface_clip(&self, surface: &Bitmap) -> Rect {
        surface.bounds()
    }

    fn composite(
        &mut self,
        src: &Bitmap,
        clip: Rect,
        dst: &mut Bitmap,
        dest: Rect,
        blend: bool,
    ) -> Result<(), BackendError> {
        if !src.bounds().contains_rect(&clip) {
            return Err(BackendError::Composite(format!(
                "clip {:?} exceeds source bounds {:?}",
                clip,
                src.bounds()
            )));
        }
        blit(src, clip, dst, dest, blend);
        Ok(())
    }

    fn release_surface(&mut self, surface: Bitmap) {
        drop(surface);
    }
}
