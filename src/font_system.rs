use parking_lot::{Mutex, MutexGuard};

use crate::{
    backend::{DrawTarget, Point, Size, TextBackend},
    color::Color,
    config::EngineConfig,
    error::FontEngineError,
    font_engine::FontEngine,
    renderer::layout::Justify,
};

/// A [`FontEngine`] behind a lock, for hosts that share one engine between threads.
///
/// The engine itself is single threaded: the active style is shared state
/// that every call reads. Each method here holds the lock for exactly one
/// engine call. Use [`FontSystem::with_style`] when a style switch and the
/// calls depending on it must not interleave with other users.
///
/// The engine is public to allow several calls under one lock when necessary.
pub struct FontSystem<B: TextBackend> {
    pub engine: Mutex<FontEngine<B>>,
}

impl<B: TextBackend> FontSystem<B> {
    /// Wraps an already constructed engine.
    pub fn new(engine: FontEngine<B>) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// See [`FontEngine::from_config`].
    pub fn from_config(backend: B, config: &EngineConfig) -> Result<Self, FontEngineError> {
        FontEngine::from_config(backend, config).map(Self::new)
    }

    /// Locks the engine for several calls in a row.
    pub fn lock(&self) -> MutexGuard<'_, FontEngine<B>> {
        self.engine.lock()
    }

    /// Consumes the system and returns the engine.
    pub fn into_inner(self) -> FontEngine<B> {
        self.engine.into_inner()
    }

    /// Runs `f` with `name` as the active style, then restores the previous style.
    pub fn with_style<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut FontEngine<B>) -> R,
    ) -> Result<R, FontEngineError> {
        let mut engine = self.engine.lock();
        let previous = engine.active_style_name()?.to_string();

        engine.set_active_style(name)?;
        let result = f(&mut engine);
        engine.set_active_style(&previous)?;

        Ok(result)
    }
}

/// styles and colors
impl<B: TextBackend> FontSystem<B> {
    /// See [`FontEngine::set_active_style`].
    pub fn set_active_style(&self, name: &str) -> Result<(), FontEngineError> {
        self.engine.lock().set_active_style(name)
    }

    /// Returns the name of the active style.
    ///
    /// # Performance
    /// This method allocates a new `String` to avoid holding a lock on the engine.
    pub fn active_style_name(&self) -> Result<String, FontEngineError> {
        self.engine.lock().active_style_name().map(str::to_string)
    }

    /// See [`FontEngine::active_line_height`].
    pub fn active_line_height(&self) -> Result<i32, FontEngineError> {
        self.engine.lock().active_line_height()
    }

    /// Looks up a named color, falling back to white.
    pub fn lookup_color(&self, name: &str) -> Color {
        self.engine.lock().lookup_color(name)
    }
}

/// measurement
impl<B: TextBackend> FontSystem<B> {
    /// Measures `text` as a single line in the active style.
    pub fn measure_width(&self, text: &str) -> Result<i32, FontEngineError> {
        self.engine.lock().measure_width(text)
    }

    /// See [`FontEngine::measure_block`].
    pub fn measure_block(&self, text: &str, width: i32) -> Result<Size, FontEngineError> {
        self.engine.lock().measure_block(text, width)
    }
}

/// rendering
impl<B: TextBackend> FontSystem<B> {
    /// See [`FontEngine::render_line`].
    pub fn render_line(
        &self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        color: Color,
    ) -> Result<Point, FontEngineError> {
        self.engine
            .lock()
            .render_line(text, x, y, justify, target, color)
    }

    /// See [`FontEngine::render_wrapped`].
    pub fn render_wrapped(
        &self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        width: i32,
        color: Color,
    ) -> Result<i32, FontEngineError> {
        self.engine
            .lock()
            .render_wrapped(text, x, y, justify, target, width, color)
    }

    /// See [`FontEngine::render_line_shadowed`].
    pub fn render_line_shadowed(
        &self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        color: Color,
    ) -> Result<Point, FontEngineError> {
        self.engine
            .lock()
            .render_line_shadowed(text, x, y, justify, target, color)
    }

    /// See [`FontEngine::render_wrapped_shadowed`].
    pub fn render_wrapped_shadowed(
        &self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        width: i32,
        color: Color,
    ) -> Result<i32, FontEngineError> {
        self.engine
            .lock()
            .render_wrapped_shadowed(text, x, y, justify, target, width, color)
    }
}
