use std::path::PathBuf;

/// Failures reported by a [`TextBackend`](crate::backend::TextBackend).
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to open font {path:?}: {reason}")]
    FontOpen { path: PathBuf, reason: String },

    /// A face is known but its data could not be read or parsed.
    #[error("failed to load font face: {0}")]
    FontData(String),

    #[error("text rendering failed: {0}")]
    Render(String),

    #[error("surface compositing failed: {0}")]
    Composite(String),
}

/// Errors surfaced by [`FontEngine`](crate::FontEngine) and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum FontEngineError {
    #[error("font style `{0}` does not exist")]
    StyleNotFound(String),

    /// The style exists but its font failed to load.
    #[error("font style `{0}` has no usable font handle")]
    StyleUnusable(String),

    #[error("no active font style has been selected")]
    NoActiveStyle,

    /// The configured default style could not be made active. The engine cannot
    /// render anything in this state, so hosts usually treat it as fatal.
    #[error("unable to determine default font `{0}`")]
    NoDefaultFont(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
