use std::collections::HashMap;

/// An opaque 8-bit RGB color.
///
/// Alpha is not part of the color: blending is controlled by the style's
/// `blend` flag and by the alpha passed to the render calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Named text colors, e.g. `menu_normal` or `item_bonus`.
///
/// Lookups are total: a name without an entry resolves to [`Color::WHITE`].
#[derive(Clone, Debug, Default)]
pub struct ColorPalette {
    colors: HashMap<String, Color, fxhash::FxBuildHasher>,
}

impl ColorPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named color. The last definition of a name wins.
    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        self.colors.insert(name.into(), color);
    }

    pub fn lookup(&self, name: &str) -> Color {
        // Misses are the normal way of asking for the default text color,
        // so they are not reported.
        self.colors.get(name).copied().unwrap_or(Color::WHITE)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Color)> for ColorPalette {
    fn from_iter<I: IntoIterator<Item = (S, Color)>>(iter: I) -> Self {
        let mut palette = Self::new();
        for (name, color) in iter {
            palette.insert(name, color);
        }
        palette
    }
}
