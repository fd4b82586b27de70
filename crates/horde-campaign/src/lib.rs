//! Save-data persistence for HORDE.
//!
//! Three record tables (save slots, character stats, character inventory)
//! kept in one JSON file. Multi-table writes are staged in memory and
//! committed by replacing the file, so a failed write leaves no partial
//! rows behind.

pub mod error;
pub mod records;
pub mod store;

pub use error::StoreError;
pub use records::{CharacterInventory, CharacterStats, NewSave, SaveRecord};
pub use store::SaveStore;
