mod error;
mod traits;

pub mod file;
pub mod memory;
pub mod vault;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
pub use vault::MaterialVault;
