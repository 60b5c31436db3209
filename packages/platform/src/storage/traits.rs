use super::error::StorageError;

/// String key-value persistence for session and preference state.
///
/// Implementations differ only in durability:
/// [`MemoryStore`](crate::storage::MemoryStore) forgets everything when
/// dropped, while [`FileStore`](crate::storage::FileStore) survives
/// restarts.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`.
    ///
    /// Returns `true` if a value was removed, `false` if none existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
