pub mod file;
pub mod memory;
pub mod migrate;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// A flat key/value store holding string entries, in the manner of a
/// browser's local storage.
pub trait LocalStorage {
    /// Returns `Ok(None)` when the key has never been written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}
