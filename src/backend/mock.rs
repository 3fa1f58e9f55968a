//! Recording backend used by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{Point, Rect, Size, TextBackend};
use crate::color::Color;
use crate::error::BackendError;

pub const ADVANCE: i32 = 8;
pub const LINE_SKIP: i32 = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockFont {
    pub id: u32,
    pub line_skip: i32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockSurface {
    pub id: u32,
    pub size: Size,
}

impl MockSurface {
    pub fn new(id: u32, width: i32, height: i32) -> Self {
        Self {
            id,
            size: Size::new(width, height),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    OpenFont(PathBuf, u32),
    CloseFont(u32),
    DrawText {
        text: String,
        color: Color,
        alpha: u8,
        origin: Point,
    },
    RenderToSurface {
        text: String,
        color: Color,
        alpha: u8,
        blend: bool,
        surface: u32,
    },
    Composite {
        src: u32,
        dst: u32,
        origin: Point,
        blend: bool,
    },
    ReleaseSurface(u32),
}

/// Every character advances by [`ADVANCE`] pixels unless the whole string
/// has an entry in `widths`.
#[derive(Default)]
pub struct MockBackend {
    pub widths: HashMap<String, i32>,
    pub line_skip: HashMap<PathBuf, i32>,
    pub unopenable: Vec<PathBuf>,
    pub fail_render: bool,
    pub fail_composite: bool,
    pub calls: Vec<Call>,
    /// Ids of closed fonts, readable after the backend has been dropped.
    pub closed: Rc<RefCell<Vec<u32>>>,
    next_id: u32,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, text: &str, width: i32) -> Self {
        self.widths.insert(text.to_string(), width);
        self
    }

    pub fn width_of(&self, text: &str) -> i32 {
        self.widths
            .get(text)
            .copied()
            .unwrap_or(text.chars().count() as i32 * ADVANCE)
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Text and origin of every screen draw, in call order.
    pub fn drawn(&self) -> Vec<(String, Point)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::DrawText { text, origin, .. } => Some((text.clone(), *origin)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(*call)).count()
    }
}

impl TextBackend for MockBackend {
    type Font = MockFont;
    type Surface = MockSurface;

    fn open_font(&mut self, path: &Path, point_size: u32) -> Result<MockFont, BackendError> {
        self.calls.push(Call::OpenFont(path.to_path_buf(), point_size));
        if self.unopenable.iter().any(|p| p == path) {
            return Err(BackendError::FontOpen {
                path: path.to_path_buf(),
                reason: "mock refused".to_string(),
            });
        }
        let line_skip = self.line_skip.get(path).copied().unwrap_or(LINE_SKIP);
        Ok(MockFont {
            id: self.next_id(),
            line_skip,
        })
    }

    fn close_font(&mut self, font: MockFont) {
        self.calls.push(Call::CloseFont(font.id));
        self.closed.borrow_mut().push(font.id);
    }

    fn line_skip(&self, font: &MockFont) -> i32 {
        font.line_skip
    }

    fn text_size(&self, font: &MockFont, text: &str) -> Size {
        Size::new(self.width_of(text), font.line_skip)
    }

    fn draw_text(
        &mut self,
        _font: &MockFont,
        text: &str,
        color: Color,
        alpha: u8,
        dest: Rect,
    ) -> Result<(), BackendError> {
        self.calls.push(Call::DrawText {
            text: text.to_string(),
            color,
            alpha,
            origin: dest.origin,
        });
        Ok(())
    }

    fn render_text_to_surface(
        &mut self,
        font: &MockFont,
        text: &str,
        color: Color,
        alpha: u8,
        blend: bool,
    ) -> Result<MockSurface, BackendError> {
        if self.fail_render {
            return Err(BackendError::Render("mock render failure".to_string()));
        }
        let id = self.next_id();
        self.calls.push(Call::RenderToSurface {
            text: text.to_string(),
            color,
            alpha,
            blend,
            surface: id,
        });
        Ok(MockSurface::new(id, self.width_of(text), font.line_skip))
    }

    fn surface_clip(&self, surface: &MockSurface) -> Rect {
        Rect::new(Point::zero(), surface.size)
    }

    fn composite(
        &mut self,
        src: &MockSurface,
        _clip: Rect,
        dst: &mut MockSurface,
        dest: Rect,
        blend: bool,
    ) -> Result<(), BackendError> {
        if self.fail_composite {
            return Err(BackendError::Composite("mock composite failure".to_string()));
        }
        self.calls.push(Call::Composite {
            src: src.id,
            dst: dst.id,
            origin: dest.origin,
            blend,
        });
        Ok(())
    }

    fn release_surface(&mut self, surface: MockSurface) {
        self.calls.push(Call::ReleaseSurface(surface.id));
    }
}
