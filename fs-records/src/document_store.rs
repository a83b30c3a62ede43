use data_error::Result;
use std::time::SystemTime;

/// Durable key-value store holding one independent document per key.
///
/// Implementations must replace documents as a whole: a reader racing a
/// writer of the same key observes one complete document or the other.
pub trait DocumentStore {
    /// Read the document stored under `key`, `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Create or overwrite the document stored under `key`.
    fn put(&self, key: &str, document: &[u8]) -> Result<()>;

    /// Time of the last write to `key`, `None` if there is no document.
    fn last_modified(&self, key: &str) -> Result<Option<SystemTime>>;
}
