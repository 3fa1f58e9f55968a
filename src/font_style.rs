use std::path::PathBuf;

use crate::error::FontEngineError;

/// One named font style such as `font_regular` or `font_bold`.
///
/// `F` is the backend's font handle. A style without a handle (its font
/// failed to open, or no entry applied to it) is kept so it can still be
/// found by name, but it can never become the active style.
#[derive(Debug)]
pub struct FontStyle<F> {
    pub name: String,
    /// Font file relative to the font directory. Empty until configured.
    pub path: PathBuf,
    pub point_size: u32,
    pub blend: bool,
    pub line_height: i32,
    pub font_height: i32,
    handle: Option<F>,
}

impl<F> FontStyle<F> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: PathBuf::new(),
            point_size: 0,
            blend: true,
            line_height: 0,
            font_height: 0,
            handle: None,
        }
    }

    /// Attaches a loaded font. Line metrics are derived from the backend's
    /// line skip, and line height and font height are the same value.
    pub fn with_handle(mut self, handle: F, line_skip: i32) -> Self {
        self.handle = Some(handle);
        self.line_height = line_skip;
        self.font_height = line_skip;
        self
    }

    pub fn handle(&self) -> Option<&F> {
        self.handle.as_ref()
    }

    pub fn is_usable(&self) -> bool {
        self.handle.is_some()
    }

    /// Detaches the font handle so the caller can release it.
    pub fn take_handle(&mut self) -> Option<F> {
        self.handle.take()
    }
}

/// Ordered collection of font styles with a single active selection.
///
/// Styles keep their configuration order and lookup is a linear scan where
/// the first style with a matching name wins.
#[derive(Debug)]
pub struct FontStyleRegistry<F> {
    styles: Vec<FontStyle<F>>,
    active: Option<usize>,
}

impl<F> Default for FontStyleRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FontStyleRegistry<F> {
    /// Creates an empty registry with no active style.
    pub fn new() -> Self {
        Self {
            styles: Vec::new(),
            active: None,
        }
    }

    /// Appends a style after all existing ones.
    pub fn push(&mut self, style: FontStyle<F>) {
        self.styles.push(style);
    }

    /// Returns the number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Returns the styles in configuration order.
    pub fn styles(&self) -> impl Iterator<Item = &FontStyle<F>> {
        self.styles.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.styles.iter().position(|style| style.name == name)
    }

    /// Finds the first style called `name`.
    pub fn resolve(&self, name: &str) -> Result<&FontStyle<F>, FontEngineError> {
        self.position(name)
            .map(|index| &self.styles[index])
            .ok_or_else(|| FontEngineError::StyleNotFound(name.to_string()))
    }

    /// Makes `name` the active style.
    ///
    /// On failure the previously active style stays selected.
    pub fn set_active(&mut self, name: &str) -> Result<(), FontEngineError> {
        let index = self
            .position(name)
            .ok_or_else(|| FontEngineError::StyleNotFound(name.to_string()))?;

        if !self.styles[index].is_usable() {
            return Err(FontEngineError::StyleUnusable(name.to_string()));
        }

        self.active = Some(index);
        Ok(())
    }

    /// Returns the active style.
    pub fn active(&self) -> Result<&FontStyle<F>, FontEngineError> {
        self.active
            .map(|index| &self.styles[index])
            .ok_or(FontEngineError::NoActiveStyle)
    }

    /// Returns the line height of the active style.
    pub fn active_line_height(&self) -> Result<i32, FontEngineError> {
        self.active().map(|style| style.line_height)
    }

    pub fn active_font_height(&self) -> Result<i32, FontEngineError> {
        self.active().map(|style| style.font_height)
    }

    /// Detaches every font handle and clears the selection.
    ///
    /// Each handle is yielded exactly once; the styles stay registered but
    /// are unusable afterwards.
    pub fn drain_handles(&mut self) -> impl Iterator<Item = F> + '_ {
        self.active = None;
        self.styles.iter_mut().filter_map(FontStyle::take_handle)
    }
}
