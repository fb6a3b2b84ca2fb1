//! # VELDT World State
//!
//! The layered tile store and the catalog it resolves names against.
//!
//! Five independent sparse grids share one infinite coordinate space.
//! Generation seeds them with defaults, snapshot replay lays authored
//! changes on top, and gameplay mutates them live - every write funnels
//! through [`LayeredTileStore::set_tile`], which is also where
//! persist-worthy edits enter the change buffer and where subscribers hear
//! about the new cell state.

pub mod catalog;
pub mod store;

pub use catalog::{CatalogError, TileCatalog, TileDef};
pub use store::LayeredTileStore;
