//! Engine configuration and the settings files it reads.
//!
//! Both `engine/font_settings.txt` and `engine/font_colors.txt` use the same
//! line-oriented format:
//!
//! ```text
//! # comment
//! [font_regular]
//! default=LinLibertine_Rg.ttf,12,true
//! ja=unifont.ttf,10,false
//! ```
//!
//! Values are comma separated lists consumed from the front.

use std::path::{Path, PathBuf};

use crate::color::{Color, ColorPalette};
use crate::error::FontEngineError;

pub const FONT_SETTINGS_FILE: &str = "engine/font_settings.txt";
pub const FONT_COLORS_FILE: &str = "engine/font_colors.txt";

/// Settings used to build a [`FontEngine`](crate::FontEngine) from a data directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root of the game data. Settings files and fonts live below it.
    pub data_dir: PathBuf,
    /// Font directory, relative to `data_dir`.
    pub font_dir: PathBuf,
    /// Two-letter language code selecting per-language font entries.
    pub language: String,
    /// Style that must be usable for the engine to start.
    pub default_style: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            font_dir: PathBuf::from("fonts"),
            language: "en".to_string(),
            default_style: "font_regular".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn font_settings_path(&self) -> PathBuf {
        self.data_dir.join(FONT_SETTINGS_FILE)
    }

    pub fn font_colors_path(&self) -> PathBuf {
        self.data_dir.join(FONT_COLORS_FILE)
    }

    /// Location of a font file named in the font settings.
    pub fn locate_font(&self, path: &Path) -> PathBuf {
        self.data_dir.join(&self.font_dir).join(path)
    }
}

/// Reads a settings file. A missing file is not an error and reads as empty.
pub fn read_settings_file(path: &Path) -> Result<String, FontEngineError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Settings file {} not found, using no entries.", path.display());
            Ok(String::new())
        }
        Err(source) => Err(FontEngineError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// A single line of a settings file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsEntry<'a> {
    Section(&'a str),
    Pair {
        line: usize,
        key: &'a str,
        value: &'a str,
    },
}

/// Splits settings text into section headers and key/value pairs.
///
/// Comments, blank lines and lines without `=` are skipped; the latter are logged.
pub fn settings_entries(src: &str) -> impl Iterator<Item = SettingsEntry<'_>> {
    src.lines().enumerate().filter_map(|(index, raw)| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            return Some(SettingsEntry::Section(section.trim()));
        }

        match line.split_once('=') {
            Some((key, value)) => Some(SettingsEntry::Pair {
                line: index + 1,
                key: key.trim(),
                value: value.trim(),
            }),
            None => {
                log::warn!("Ignoring settings line {}: `{}`", index + 1, line);
                None
            }
        }
    })
}

/// Consumes a comma separated value list from the front.
struct ValueList<'a> {
    rest: Option<&'a str>,
}

impl<'a> ValueList<'a> {
    fn new(value: &'a str) -> Self {
        Self { rest: Some(value) }
    }

    fn pop_str(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let (first, tail) = match rest.split_once(',') {
            Some((first, tail)) => (first, Some(tail)),
            None => (rest, None),
        };
        self.rest = tail;
        Some(first.trim())
    }

    fn pop_int<T: std::str::FromStr>(&mut self) -> Option<T> {
        self.pop_str()?.parse().ok()
    }

    /// A missing value reads as `false`.
    fn pop_bool(&mut self) -> bool {
        self.pop_str().is_some_and(parse_bool)
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") || value == "1"
}

/// The font triple chosen for one style section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontStyleDef {
    pub name: String,
    /// Empty when no entry applied to the section.
    pub path: PathBuf,
    pub point_size: u32,
    pub blend: bool,
}

impl FontStyleDef {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: PathBuf::new(),
            point_size: 0,
            blend: false,
        }
    }
}

/// Parses font settings, picking one font triple per style section.
///
/// Within a section the first `default` entry is used unless an entry keyed by
/// `language` appears, which always overrides. A `default` entry after a path
/// has been chosen is ignored.
pub fn parse_font_settings(src: &str, language: &str) -> Vec<FontStyleDef> {
    let mut styles: Vec<FontStyleDef> = Vec::new();

    for entry in settings_entries(src) {
        let (line, key, value) = match entry {
            SettingsEntry::Section(name) => {
                styles.push(FontStyleDef::new(name));
                continue;
            }
            SettingsEntry::Pair { line, key, value } => (line, key, value),
        };

        let Some(style) = styles.last_mut() else {
            continue;
        };

        let applies = (key == "default" && style.path.as_os_str().is_empty()) || key == language;
        if !applies {
            continue;
        }

        let mut values = ValueList::new(value);
        let path = values.pop_str().filter(|p| !p.is_empty());
        let point_size = values.pop_int::<u32>().filter(|size| *size > 0);
        let blend = values.pop_bool();

        match (path, point_size) {
            (Some(path), Some(point_size)) => {
                style.path = PathBuf::from(path);
                style.point_size = point_size;
                style.blend = blend;
            }
            _ => log::warn!(
                "Ignoring malformed font entry `{}` for style `{}` on line {}.",
                key,
                style.name,
                line
            ),
        }
    }

    styles
}

/// Parses `name=r,g,b` (or `name=r g b`) color entries.
pub fn parse_font_colors(src: &str) -> ColorPalette {
    let mut palette = ColorPalette::new();

    for entry in settings_entries(src) {
        let SettingsEntry::Pair { line, key, value } = entry else {
            continue;
        };

        match parse_rgb(value) {
            Some(color) => palette.insert(key, color),
            None => log::warn!("Ignoring malformed color `{}` on line {}.", key, line),
        }
    }

    palette
}

fn parse_rgb(value: &str) -> Option<Color> {
    let mut channels = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>().ok().map(|v| v.clamp(0, 255) as u8));

    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    Some(Color::new(r, g, b))
}
