use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use super::error::StorageError;

/// Holds the bytes of uploaded teaching materials as staged files.
///
/// Every upload is staged under a fresh key and stays readable until
/// [`release`](Self::release) is called for it. Dropping the vault
/// releases everything still staged, so abandoned uploads do not
/// accumulate across runs.
pub struct MaterialVault {
    base_path: PathBuf,
    staged: Mutex<HashMap<String, PathBuf>>,
}

impl MaterialVault {
    /// Create a vault rooted at `base_path`, creating it as needed.
    pub fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path)?;
        fs::create_dir_all(base_path.join(".tmp"))?;
        Ok(Self {
            base_path,
            staged: Mutex::new(HashMap::new()),
        })
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Write `data` into the vault and return the key it is staged under.
    pub fn stage(&self, data: &[u8]) -> Result<String, StorageError> {
        let key = uuid::Uuid::new_v4().to_string();
        let final_path = self.base_path.join(&key);

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        let mut staged = self.staged.lock().unwrap_or_else(|e| e.into_inner());
        staged.insert(key.clone(), final_path);
        Ok(key)
    }

    /// Read back the bytes staged under `key`.
    pub fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = {
            let staged = self.staged.lock().unwrap_or_else(|e| e.into_inner());
            staged.get(key).cloned()
        };
        match path {
            Some(path) => Ok(fs::read(path)?),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

    /// Check whether `key` is currently staged.
    pub fn contains(&self, key: &str) -> bool {
        let staged = self.staged.lock().unwrap_or_else(|e| e.into_inner());
        staged.contains_key(key)
    }

    /// Delete the staged file under `key`.
    ///
    /// Returns `true` if the key was staged, `false` if it was unknown
    /// or already released; releasing twice never errors.
    pub fn release(&self, key: &str) -> Result<bool, StorageError> {
        let path = {
            let mut staged = self.staged.lock().unwrap_or_else(|e| e.into_inner());
            staged.remove(key)
        };
        match path {
            Some(path) => match fs::remove_file(&path) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
                Err(e) => Err(e.into()),
            },
            None => Ok(false),
        }
    }
}

impl Drop for MaterialVault {
    fn drop(&mut self) {
        let staged = self.staged.get_mut().unwrap_or_else(|e| e.into_inner());
        for path in staged.values() {
            let _ = fs::remove_file(path);
        }
        staged.clear();
    }
}
