use std::str::FromStr;

use crate::backend::{DrawTarget, Point, Rect, TextBackend};
use crate::color::Color;
use crate::error::BackendError;
use crate::text::wrap_text;

/// Horizontal anchor policy turning an anchor point into a draw origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    /// The anchor is the left edge.
    #[default]
    Left,
    /// The anchor is the right edge.
    Right,
    /// The anchor is the horizontal center.
    Center,
}

impl Justify {
    /// Converts a numeric justification code (`0` left, `1` right, `2` center).
    ///
    /// Unknown codes are logged and treated as [`Justify::Left`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Justify::Left,
            1 => Justify::Right,
            2 => Justify::Center,
            other => {
                log::warn!("Unhandled justify={}, assuming left.", other);
                Justify::Left
            }
        }
    }

    /// Left edge of a line `text_width` pixels wide anchored at `x`.
    pub fn origin_x(self, x: i32, text_width: i32) -> i32 {
        match self {
            Justify::Left => x,
            Justify::Right => x - text_width,
            Justify::Center => x - text_width / 2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown justification `{0}`")]
pub struct ParseJustifyError(String);

impl FromStr for Justify {
    type Err = ParseJustifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Justify::Left),
            "right" => Ok(Justify::Right),
            "center" => Ok(Justify::Center),
            _ => Err(ParseJustifyError(s.to_string())),
        }
    }
}

/// The parts of the active style the renderer needs.
pub struct ActiveFont<'a, F> {
    pub font: &'a F,
    pub blend: bool,
    pub line_height: i32,
}

impl<F> Clone for ActiveFont<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for ActiveFont<'_, F> {}

/// An offscreen text surface that is handed back to the backend when dropped,
/// whichever way the render call exits.
struct ScopedSurface<'b, B: TextBackend> {
    backend: &'b mut B,
    surface: Option<B::Surface>,
}

impl<B: TextBackend> ScopedSurface<'_, B> {
    fn composite_into(
        &mut self,
        dst: &mut B::Surface,
        origin: Point,
        blend: bool,
    ) -> Result<(), BackendError> {
        let Some(surface) = self.surface.as_ref() else {
            return Ok(());
        };
        let clip = self.backend.surface_clip(surface);
        let dest = Rect::new(origin, clip.size);
        self.backend.composite(surface, clip, dst, dest, blend)
    }
}

impl<B: TextBackend> Drop for ScopedSurface<'_, B> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.backend.release_surface(surface);
        }
    }
}

/// Draws one line of text anchored at `(x, y)` and returns its top-left origin.
///
/// There is no vertical justification: `y` is always the top of the line.
pub fn render_line<B: TextBackend>(
    backend: &mut B,
    active: ActiveFont<'_, B::Font>,
    text: &str,
    x: i32,
    y: i32,
    justify: Justify,
    target: DrawTarget<'_, B::Surface>,
    color: Color,
    alpha: u8,
) -> Result<Point, BackendError> {
    let size = backend.text_size(active.font, text);
    let origin = Point::new(justify.origin_x(x, size.width), y);

    match target {
        DrawTarget::Screen => {
            backend.draw_text(active.font, text, color, alpha, Rect::new(origin, size))?;
        }
        DrawTarget::Surface(dst) => {
            let surface =
                backend.render_text_to_surface(active.font, text, color, alpha, active.blend)?;
            let mut scoped = ScopedSurface {
                backend,
                surface: Some(surface),
            };
            scoped.composite_into(dst, origin, active.blend)?;
        }
    }

    Ok(origin)
}

/// Wraps `text` to `width` and draws each line below the previous one.
///
/// Returns the y coordinate just below the last line.
pub fn render_wrapped<B: TextBackend>(
    backend: &mut B,
    active: ActiveFont<'_, B::Font>,
    text: &str,
    x: i32,
    y: i32,
    justify: Justify,
    mut target: DrawTarget<'_, B::Surface>,
    width: i32,
    color: Color,
    alpha: u8,
) -> Result<i32, BackendError> {
    let lines = wrap_text(text, width, |line| backend.text_size(active.font, line).width);

    let mut cursor_y = y;
    for line in lines {
        render_line(
            backend,
            active,
            line,
            x,
            cursor_y,
            justify,
            target.reborrow(),
            color,
            alpha,
        )?;
        cursor_y += active.line_height;
    }

    Ok(cursor_y)
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::OPAQUE;
    use crate::backend::mock::{Call, MockBackend, MockFont, MockSurface};

    fn font() -> MockFont {
        MockFont {
            id: 100,
            line_skip: 16,
        }
    }

    fn active(font: &MockFont) -> ActiveFont<'_, MockFont> {
        ActiveFont {
            font,
            blend: true,
            line_height: font.line_skip,
        }
    }

    #[test]
    fn justify_origin_arithmetic() {
        assert_eq!(Justify::Left.origin_x(100, 40), 100);
        assert_eq!(Justify::Right.origin_x(100, 40), 60);
        assert_eq!(Justify::Center.origin_x(100, 40), 80);
        // Odd widths round toward the anchor.
        assert_eq!(Justify::Center.origin_x(100, 11), 95);
    }

    #[test]
    fn justify_codes_fall_back_to_left() {
        assert_eq!(Justify::from_code(1), Justify::Right);
        assert_eq!(Justify::from_code(2), Justify::Center);
        assert_eq!(Justify::from_code(7), Justify::Left);
        assert_eq!(Justify::from_code(-1), Justify::Left);
    }

    #[test]
    fn justify_from_str() {
        assert_eq!("Center".parse::<Justify>().unwrap(), Justify::Center);
        assert_eq!(" right ".parse::<Justify>().unwrap(), Justify::Right);
        assert!("middle".parse::<Justify>().is_err());
    }

    #[test]
    fn centered_line_on_screen() {
        let mut backend = MockBackend::new().with_width("X", 10);
        let font = font();
        let origin = render_line(
            &mut backend,
            active(&font),
            "X",
            100,
            50,
            Justify::Center,
            DrawTarget::Screen,
            Color::WHITE,
            OPAQUE,
        )
        .unwrap();

        assert_eq!(origin, Point::new(95, 50));
        assert_eq!(backend.drawn(), vec![("X".to_string(), Point::new(95, 50))]);
    }

    #[test]
    fn right_justified_line_ends_at_anchor() {
        let mut backend = MockBackend::new();
        let font = font();
        // "abcd" is 32px wide.
        let origin = render_line(
            &mut backend,
            active(&font),
            "abcd",
            200,
            10,
            Justify::Right,
            DrawTarget::Screen,
            Color::WHITE,
            OPAQUE,
        )
        .unwrap();
        assert_eq!(origin, Point::new(168, 10));
    }

    #[test]
    fn surface_target_composites_and_releases() {
        let mut backend = MockBackend::new().with_width("X", 10);
        let mut target = MockSurface::new(900, 320, 240);
        let font = font();

        render_line(
            &mut backend,
            active(&font),
            "X",
            100,
            50,
            Justify::Center,
            DrawTarget::Surface(&mut target),
            Color::new(1, 2, 3),
            128,
        )
        .unwrap();

        let Call::RenderToSurface { surface, alpha, blend, .. } = backend.calls[0].clone() else {
            panic!("expected offscreen render, got {:?}", backend.calls);
        };
        assert_eq!(alpha, 128);
        assert!(blend);
        assert_eq!(
            backend.calls[1..],
            [
                Call::Composite {
                    src: surface,
                    dst: 900,
                    origin: Point::new(95, 50),
                    blend: true,
                },
                Call::ReleaseSurface(surface),
            ]
        );
    }

    #[test]
    fn surface_is_released_when_composite_fails() {
        let mut backend = MockBackend::new();
        backend.fail_composite = true;
        let mut target = MockSurface::new(900, 320, 240);
        let font = font();

        let result = render_line(
            &mut backend,
            active(&font),
            "oops",
            0,
            0,
            Justify::Left,
            DrawTarget::Surface(&mut target),
            Color::WHITE,
            OPAQUE,
        );

        assert!(matches!(result, Err(BackendError::Composite(_))));
        assert_eq!(
            backend.count(|call| matches!(call, Call::ReleaseSurface(_))),
            1
        );
    }

    #[test]
    fn failed_offscreen_render_draws_nothing() {
        let mut backend = MockBackend::new();
        backend.fail_render = true;
        let mut target = MockSurface::new(900, 320, 240);
        let font = font();

        let result = render_line(
            &mut backend,
            active(&font),
            "oops",
            0,
            0,
            Justify::Left,
            DrawTarget::Surface(&mut target),
            Color::WHITE,
            OPAQUE,
        );

        assert!(matches!(result, Err(BackendError::Render(_))));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn wrapped_lines_advance_by_line_height() {
        let mut backend = MockBackend::new()
            .with_width("Hello", 40)
            .with_width("Hello World", 95);
        let font = font();

        let end_y = render_wrapped(
            &mut backend,
            active(&font),
            "Hello World",
            10,
            20,
            Justify::Left,
            DrawTarget::Screen,
            60,
            Color::WHITE,
            OPAQUE,
        )
        .unwrap();

        assert_eq!(end_y, 52);
        assert_eq!(
            backend.drawn(),
            vec![
                ("Hello".to_string(), Point::new(10, 20)),
                ("World".to_string(), Point::new(10, 36)),
            ]
        );
    }

    #[test]
    fn wrapped_cursor_starts_fresh_each_call() {
        let mut backend = MockBackend::new();
        let font = font();

        for _ in 0..2 {
            let end_y = render_wrapped(
                &mut backend,
                active(&font),
                "aa bb cc",
                0,
                5,
                Justify::Left,
                DrawTarget::Screen,
                40,
                Color::WHITE,
                OPAQUE,
            )
            .unwrap();
            assert_eq!(end_y, 37);
        }

        let ys: Vec<i32> = backend.drawn().iter().map(|(_, p)| p.y).collect();
        assert_eq!(ys, vec![5, 21, 5, 21]);
    }

    #[test]
    fn wrapped_lines_into_surface_reuse_the_target() {
        let mut backend = MockBackend::new();
        let mut target = MockSurface::new(7, 320, 240);
        let font = font();

        render_wrapped(
            &mut backend,
            active(&font),
            "aa bb cc\ndd",
            100,
            0,
            Justify::Right,
            DrawTarget::Surface(&mut target),
            40,
            Color::WHITE,
            OPAQUE,
        )
        .unwrap();

        let composites: Vec<Point> = backend
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Composite { dst: 7, origin, .. } => Some(*origin),
                _ => None,
            })
            .collect();
        // "aa bb" 40px, "cc" 16px, "dd" 16px.
        assert_eq!(
            composites,
            vec![Point::new(60, 0), Point::new(84, 16), Point::new(84, 32)]
        );
        assert_eq!(
            backend.count(|call| matches!(call, Call::ReleaseSurface(_))),
            3
        );
    }
}
