//! Character store adapters.
//!
//! - [`InMemoryCharacterStore`]: process-local, for tests and dry runs
//! - [`SqliteCharacterStore`]: durable store keyed by character id

mod memory;
mod sqlite;

pub use memory::InMemoryCharacterStore;
pub use sqlite::SqliteCharacterStore;
