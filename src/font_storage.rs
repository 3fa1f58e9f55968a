use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::error::BackendError;

/// Loads font files with `fontdb` and keeps parsed `fontdue` fonts around.
///
/// Fonts are keyed by file path, so several styles sharing a file (at
/// different point sizes) parse it once. A parsed font is dropped again when
/// the last handle to it is released.
pub struct FontStorage {
    /// Faces loaded into fontdb.
    font_db: fontdb::Database,
    /// Face chosen for each opened file.
    by_path: HashMap<PathBuf, fontdb::ID, fxhash::FxBuildHasher>,
    /// Parsed fonts currently handed out.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            by_path: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }

    /// Number of faces known to the database.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Number of parsed fonts currently held.
    pub fn loaded_len(&self) -> usize {
        self.loaded_font.len()
    }

    /// Opens the first face of the font file at `path`.
    pub fn open_file(
        &mut self,
        path: &Path,
    ) -> Result<(fontdb::ID, Arc<fontdue::Font>), BackendError> {
        let id = match self.by_path.get(path) {
            Some(id) => *id,
            None => {
                let ids = self
                    .font_db
                    .load_font_source(fontdb::Source::File(path.to_path_buf()));
                let id = ids.first().copied().ok_or_else(|| BackendError::FontOpen {
                    path: path.to_path_buf(),
                    reason: "no usable font face".to_string(),
                })?;
                self.by_path.insert(path.to_path_buf(), id);
                id
            }
        };

        let font = self.font(id).map_err(|e| BackendError::FontOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok((id, font))
    }

    /// Retrieves a parsed font by ID, parsing it if necessary.
    pub fn font(&mut self, id: fontdb::ID) -> Result<Arc<fontdue::Font>, BackendError> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self
                    .font_db
                    .with_face_data(id, |data, index| {
                        fontdue::Font::from_bytes(
                            data,
                            fontdue::FontSettings {
                                collection_index: index,
                                scale: 40.0,
                                load_substitutions: true,
                            },
                        )
                    })
                    .ok_or_else(|| BackendError::FontData(format!("no face data for {:?}", id)))?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Ok(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        Err(BackendError::FontData(e.to_string()))
                    }
                }
            }
        }
    }

    /// Returns a handle obtained from [`Self::open_file`].
    ///
    /// The parsed font is dropped once no other handle refers to it.
    pub fn release(&mut self, id: fontdb::ID, font: Arc<fontdue::Font>) {
        drop(font);
        if let Some(stored) = self.loaded_font.get(&id)
            && Arc::strong_count(stored) == 1
        {
            self.loaded_font.remove(&id);
        }
    }
}
