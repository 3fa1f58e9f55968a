//! # Typeset
//!
//! Font styles, word wrapping and justified text placement for 2D games.
//!
//! ## Overview
//!
//! `typeset` turns a string, an anchor point and an optional wrap width into
//! drawable lines. The core of the library is the [`FontEngine`], which owns a
//! set of named font styles, a named color palette and a [`TextBackend`] that
//! does the actual measuring and drawing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use typeset::{CpuBackend, DrawTarget, EngineConfig, FontEngine, Justify};
//!
//! // 1. Create a backend and read engine/font_settings.txt and engine/font_colors.txt
//! let config = EngineConfig {
//!     data_dir: "data".into(),
//!     ..Default::default()
//! };
//! let mut engine = FontEngine::from_config(CpuBackend::new(640, 480), &config)
//!     .expect("no usable default font");
//!
//! // 2. Measure
//! let size = engine.measure_block("Hello World", 60).unwrap();
//! println!("block: {}x{}", size.width, size.height);
//!
//! // 3. Render, wrapped and with a drop shadow
//! let color = engine.lookup_color("menu_normal");
//! engine
//!     .render_wrapped_shadowed("Hello World", 320, 10, Justify::Center, DrawTarget::Screen, 60, color)
//!     .unwrap();
//! ```
//!
//! ## Features
//!
//! *   **Greedy Word Wrap**: Space separated wrapping where embedded newlines always break.
//! *   **Consistent Metrics**: Measured block sizes match rendered output line for line.
//! *   **Pluggable Backend**: Implement [`TextBackend`] or use the bundled `fontdue` [`CpuBackend`].
//! *   **Per-language Fonts**: Style entries can be overridden per language code.

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod font_engine;
pub mod font_storage;
pub mod font_style;
pub mod font_system;
pub mod renderer;
pub mod text;

// common re-exports
pub use backend::{DrawTarget, Point, Rect, Size, TextBackend};
pub use color::{Color, ColorPalette};
pub use config::EngineConfig;
pub use error::{BackendError, FontEngineError};
pub use font_engine::FontEngine;
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use renderer::{Bitmap, CpuBackend, Justify};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use parking_lot;
