//! The immutable tile catalog.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a tile name means.
///
/// The store only cares about `solid`; glyph and description exist for
/// hosts that render or debug-print the world.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TileDef {
    /// Whether this tile blocks movement when present on the solids mask.
    pub solid: bool,
    /// Single-character debug glyph.
    pub glyph: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
}

impl TileDef {
    /// A solid (movement-blocking) definition.
    #[must_use]
    pub fn solid() -> Self {
        Self {
            solid: true,
            ..Self::default()
        }
    }
}

/// Immutable mapping from tile name to definition.
///
/// Built once before any generation or load happens and read-only for the
/// rest of the process. Lookups that miss are not errors: the store treats
/// an unresolvable name as an explicit "clear this cell".
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    tiles: HashMap<String, TileDef>,
}

/// On-disk shape of a catalog file.
#[derive(Deserialize)]
struct CatalogFile {
    tiles: HashMap<String, TileDef>,
}

impl TileCatalog {
    /// Loads a catalog from a TOML file of the form:
    ///
    /// ```toml
    /// [tiles.wall_rock]
    /// solid = true
    /// glyph = "#"
    ///
    /// [tiles.door]
    /// glyph = "+"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Parse`] if it is not a valid catalog document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile = toml::from_str(&text).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { tiles: file.tiles })
    }

    /// Builds a catalog from in-memory definitions.
    #[must_use]
    pub fn from_defs(defs: impl IntoIterator<Item = (String, TileDef)>) -> Self {
        Self {
            tiles: defs.into_iter().collect(),
        }
    }

    /// Looks up a tile definition by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&TileDef> {
        self.tiles.get(name)
    }

    /// Whether the catalog defines `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tiles.contains_key(name)
    }

    /// Number of defined tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Why a catalog file failed to load.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read tile catalog {path}: {source}")]
    Io {
        /// The catalog file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid catalog document.
    #[error("failed to parse tile catalog {path}: {source}")]
    Parse {
        /// The catalog file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_document() {
        let doc = r##"
            [tiles.wall_rock]
            solid = true
            glyph = "#"

            [tiles.door]
            glyph = "+"
            description = "a wooden door"
        "##;
        let file: CatalogFile = toml::from_str(doc).unwrap();
        let catalog = TileCatalog { tiles: file.tiles };

        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve("wall_rock").unwrap().solid);
        assert!(!catalog.resolve("door").unwrap().solid);
        assert!(catalog.resolve("lava").is_none());
    }

    #[test]
    fn test_from_defs() {
        let catalog =
            TileCatalog::from_defs([("solid".to_string(), TileDef::solid())]);
        assert!(catalog.contains("solid"));
        assert!(!catalog.contains("floor"));
    }
}
