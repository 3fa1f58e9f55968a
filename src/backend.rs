//! The interface to whatever actually measures and draws text.

#[cfg(test)]
pub(crate) mod mock;

use std::path::Path;

use crate::color::Color;
use crate::error::BackendError;

/// Integer pixel positions, **Y-axis goes down**.
pub type Point = euclid::default::Point2D<i32>;
pub type Size = euclid::default::Size2D<i32>;
pub type Rect = euclid::default::Rect<i32>;

/// Fully opaque alpha.
pub const OPAQUE: u8 = 255;

/// Text measurement and drawing primitives consumed by the layout engine.
///
/// Implementations own the font handles and surfaces they hand out; the
/// engine returns every handle through [`Self::close_font`] and every
/// transient surface through [`Self::release_surface`], exactly once.
pub trait TextBackend {
    /// An open font at a fixed point size.
    type Font;
    /// An image that text can be rendered into and composited from.
    type Surface;

    fn open_font(&mut self, path: &Path, point_size: u32) -> Result<Self::Font, BackendError>;

    fn close_font(&mut self, font: Self::Font);

    /// Recommended vertical advance between successive lines.
    fn line_skip(&self, font: &Self::Font) -> i32;

    /// Size of `text` rendered as a single line.
    fn text_size(&self, font: &Self::Font, text: &str) -> Size;

    /// Draws text straight onto the screen with its top-left corner at `dest.origin`.
    fn draw_text(
        &mut self,
        font: &Self::Font,
        text: &str,
        color: Color,
        alpha: u8,
        dest: Rect,
    ) -> Result<(), BackendError>;

    /// Renders text into a new surface sized to fit it.
    fn render_text_to_surface(
        &mut self,
        font: &Self::Font,
        text: &str,
        color: Color,
        alpha: u8,
        blend: bool,
    ) -> Result<Self::Surface, BackendError>;

    /// The region of `surface` that holds content.
    fn surface_clip(&self, surface: &Self::Surface) -> Rect;

    fn composite(
        &mut self,
        src: &Self::Surface,
        clip: Rect,
        dst: &mut Self::Surface,
        dest: Rect,
        blend: bool,
    ) -> Result<(), BackendError>;

    fn release_surface(&mut self, surface: Self::Surface);
}

/// Where rendered text ends up.
pub enum DrawTarget<'a, S> {
    /// Drawn directly by the backend.
    Screen,
    /// Rendered offscreen, then composited into the given surface.
    Surface(&'a mut S),
}

impl<S> DrawTarget<'_, S> {
    /// Borrows the target again for a shorter lifetime, so one target can
    /// receive several draw calls.
    pub fn reborrow(&mut self) -> DrawTarget<'_, S> {
        match self {
            DrawTarget::Screen => DrawTarget::Screen,
            DrawTarget::Surface(surface) => DrawTarget::Surface(&mut **surface),
        }
    }
}

impl<'a, S> From<&'a mut S> for DrawTarget<'a, S> {
    fn from(surface: &'a mut S) -> Self {
        DrawTarget::Surface(surface)
    }
}
