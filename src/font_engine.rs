use std::path::{Path, PathBuf};

use crate::{
    backend::{DrawTarget, OPAQUE, Point, Size, TextBackend},
    color::{Color, ColorPalette},
    config::{EngineConfig, FontStyleDef, parse_font_colors, parse_font_settings, read_settings_file},
    error::FontEngineError,
    font_style::{FontStyle, FontStyleRegistry},
    renderer::layout::{self, ActiveFont, Justify},
    text,
};

/// Measures and draws text with a set of named font styles and colors.
///
/// Every measurement and render call uses the active style. The engine
/// owns the backend's font handles and closes each of them exactly once
/// when it is dropped.
pub struct FontEngine<B: TextBackend> {
    backend: B,
    styles: FontStyleRegistry<B::Font>,
    palette: ColorPalette,
}

/// construction
impl<B: TextBackend> FontEngine<B> {
    /// Reads the font settings and colors below `config.data_dir` and selects
    /// `config.default_style`.
    ///
    /// Fails with [`FontEngineError::NoDefaultFont`] when the default style is
    /// missing or its font could not be opened.
    pub fn from_config(backend: B, config: &EngineConfig) -> Result<Self, FontEngineError> {
        let settings = read_settings_file(&config.font_settings_path())?;
        let colors = read_settings_file(&config.font_colors_path())?;

        Self::with_styles(
            backend,
            parse_font_settings(&settings, &config.language),
            parse_font_colors(&colors),
            |path| config.locate_font(path),
            &config.default_style,
        )
    }

    /// Opens a font for every style definition and activates `default_style`.
    ///
    /// `locate` maps a configured font path to the file handed to the backend.
    /// Styles whose font fails to open are kept but are unusable.
    pub fn with_styles(
        mut backend: B,
        defs: impl IntoIterator<Item = FontStyleDef>,
        palette: ColorPalette,
        locate: impl Fn(&Path) -> PathBuf,
        default_style: &str,
    ) -> Result<Self, FontEngineError> {
        let mut styles = FontStyleRegistry::new();
        for def in defs {
            styles.push(load_style(&mut backend, def, &locate));
        }

        let mut engine = Self {
            backend,
            styles,
            palette,
        };

        if let Err(e) = engine.styles.set_active(default_style) {
            log::error!("FontEngine: Unable to determine default font: {}", e);
            return Err(FontEngineError::NoDefaultFont(default_style.to_string()));
        }

        log::debug!(
            "FontEngine: {} font styles, {} colors, active style `{}`",
            engine.styles.len(),
            engine.palette.len(),
            default_style
        );
        Ok(engine)
    }
}

fn load_style<B: TextBackend>(
    backend: &mut B,
    def: FontStyleDef,
    locate: &impl Fn(&Path) -> PathBuf,
) -> FontStyle<B::Font> {
    let mut style = FontStyle::new(def.name);
    style.path = def.path;
    style.point_size = def.point_size;
    style.blend = def.blend;

    if style.path.as_os_str().is_empty() {
        log::warn!("FontEngine: style `{}` has no font entry.", style.name);
        return style;
    }

    match backend.open_font(&locate(&style.path), style.point_size) {
        Ok(font) => {
            let line_skip = backend.line_skip(&font);
            style.with_handle(font, line_skip)
        }
        Err(e) => {
            log::error!("FontEngine: style `{}`: {}", style.name, e);
            style
        }
    }
}

/// styles and colors
impl<B: TextBackend> FontEngine<B> {
    /// Switches the active style. On failure the previous style stays active.
    pub fn set_active_style(&mut self, name: &str) -> Result<(), FontEngineError> {
        self.styles.set_active(name).inspect_err(|e| {
            log::warn!("FontEngine: cannot activate `{}`: {}", name, e);
        })
    }

    /// Returns the name of the active style.
    pub fn active_style_name(&self) -> Result<&str, FontEngineError> {
        self.styles.active().map(|style| style.name.as_str())
    }

    /// Returns the vertical advance between lines of the active style.
    pub fn active_line_height(&self) -> Result<i32, FontEngineError> {
        self.styles.active_line_height()
    }

    /// Returns the font height of the active style.
    pub fn active_font_height(&self) -> Result<i32, FontEngineError> {
        self.styles.active_font_height()
    }

    /// Looks up a named color, falling back to white.
    pub fn lookup_color(&self, name: &str) -> Color {
        self.palette.lookup(name)
    }

    /// Returns every loaded style, usable or not.
    pub fn styles(&self) -> &FontStyleRegistry<B::Font> {
        &self.styles
    }

    /// Returns the named colors read from the configuration.
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Returns a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a mutable reference to the backend.
    ///
    /// Fonts opened by the engine stay owned by it; do not close them here.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Splits the engine into the backend and the active style so both can be
    /// used at once.
    fn split_active(&mut self) -> Result<(&mut B, ActiveFont<'_, B::Font>), FontEngineError> {
        let active = active_font(&self.styles)?;
        Ok((&mut self.backend, active))
    }
}

fn active_font<F>(styles: &FontStyleRegistry<F>) -> Result<ActiveFont<'_, F>, FontEngineError> {
    let style = styles.active()?;
    let font = style
        .handle()
        .ok_or_else(|| FontEngineError::StyleUnusable(style.name.clone()))?;
    Ok(ActiveFont {
        font,
        blend: style.blend,
        line_height: style.line_height,
    })
}

/// measurement
impl<B: TextBackend> FontEngine<B> {
    /// Width of `text` drawn as a single line.
    pub fn measure_width(&self, text: &str) -> Result<i32, FontEngineError> {
        let active = active_font(&self.styles)?;
        Ok(self.backend.text_size(active.font, text).width)
    }

    /// Bounding box of `text` wrapped to `width`, honoring embedded newlines.
    pub fn measure_block(&self, text: &str, width: i32) -> Result<Size, FontEngineError> {
        let active = active_font(&self.styles)?;
        Ok(text::measure_block(text, width, active.line_height, |line| {
            self.backend.text_size(active.font, line).width
        }))
    }

    /// The lines [`Self::render_wrapped`] would draw for `text`.
    pub fn wrap_lines<'t>(&self, text: &'t str, width: i32) -> Result<Vec<&'t str>, FontEngineError> {
        let active = active_font(&self.styles)?;
        Ok(text::wrap_text(text, width, |line| {
            self.backend.text_size(active.font, line).width
        }))
    }
}

/// rendering
impl<B: TextBackend> FontEngine<B> {
    /// Draws a single line anchored at `(x, y)` and returns its top-left origin.
    pub fn render_line(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        color: Color,
    ) -> Result<Point, FontEngineError> {
        self.render_line_with_alpha(text, x, y, justify, target, color, OPAQUE)
    }

    pub fn render_line_with_alpha(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        color: Color,
        alpha: u8,
    ) -> Result<Point, FontEngineError> {
        let (backend, active) = self.split_active()?;
        Ok(layout::render_line(
            backend, active, text, x, y, justify, target, color, alpha,
        )?)
    }

    /// Wraps `text` to `width` and draws the lines top to bottom starting at `y`.
    ///
    /// Returns the y coordinate below the last line.
    pub fn render_wrapped(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        width: i32,
        color: Color,
    ) -> Result<i32, FontEngineError> {
        self.render_wrapped_with_alpha(text, x, y, justify, target, width, color, OPAQUE)
    }

    pub fn render_wrapped_with_alpha(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        target: DrawTarget<'_, B::Surface>,
        width: i32,
        color: Color,
        alpha: u8,
    ) -> Result<i32, FontEngineError> {
        let (backend, active) = self.split_active()?;
        Ok(layout::render_wrapped(
            backend, active, text, x, y, justify, target, width, color, alpha,
        )?)
    }

    /// Draws an opaque black copy one pixel down and right, then the text itself.
    pub fn render_line_shadowed(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        mut target: DrawTarget<'_, B::Surface>,
        color: Color,
    ) -> Result<Point, FontEngineError> {
        let (backend, active) = self.split_active()?;
        layout::render_line(
            backend,
            active,
            text,
            x + 1,
            y + 1,
            justify,
            target.reborrow(),
            Color::BLACK,
            OPAQUE,
        )?;
        Ok(layout::render_line(
            backend, active, text, x, y, justify, target, color, OPAQUE,
        )?)
    }

    /// Wrapped variant of [`Self::render_line_shadowed`].
    pub fn render_wrapped_shadowed(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        justify: Justify,
        mut target: DrawTarget<'_, B::Surface>,
        width: i32,
        color: Color,
    ) -> Result<i32, FontEngineError> {
        let (backend, active) = self.split_active()?;
        layout::render_wrapped(
            backend,
            active,
            text,
            x + 1,
            y + 1,
            justify,
            target.reborrow(),
            width,
            Color::BLACK,
            OPAQUE,
        )?;
        Ok(layout::render_wrapped(
            backend, active, text, x, y, justify, target, width, color, OPAQUE,
        )?)
    }
}

impl<B: TextBackend> Drop for FontEngine<B> {
    fn drop(&mut self) {
        for font in self.styles.drain_handles() {
            self.backend.close_font(font);
        }
    }
}
