//! # VELDT Shared Types
//!
//! The vocabulary every other crate speaks: cell coordinates, the fixed
//! layer set, authored change records and their wire format, world events,
//! and the tuning constants and config surface for a session.
//!
//! Nothing in here touches the filesystem except [`WorldConfig::from_path`]
//! and it never allocates on the lookup paths.

pub mod config;
pub mod constants;
pub mod coords;
pub mod events;
pub mod layer;
pub mod record;

pub use config::{ConfigError, WorldConfig};
pub use coords::TilePos;
pub use events::TileChanged;
pub use layer::{Layer, UnknownLayer};
pub use record::{ChangeRecord, RecordParseError};
