//! Directory-backed key/value persistence.
//!
//! Every store serializes its whole record array under one fixed key. Writes are
//! best-effort: a failure is logged and the in-memory copy stays authoritative
//! for the rest of the session.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::fs;

pub mod keys {
    pub const CART: &str = "reform-cart";
    pub const ORDERS: &str = "reform-orders";
    pub const PRODUCTS: &str = "reform-products";
    pub const MITRAS: &str = "reform-mitras";
    pub const BUSINESSES: &str = "reform-businesses";
    pub const COLLECTIONS: &str = "reform-collections";
    pub const WASTE_CONTRIBUTIONS: &str = "reform-waste-contributions";
    pub const SYSTEM_USERS: &str = "reform-system-users";
    pub const LAST_ORDER: &str = "last-order";

    pub const ALL: [&str; 9] = [
        CART,
        ORDERS,
        PRODUCTS,
        MITRAS,
        BUSINESSES,
        COLLECTIONS,
        WASTE_CONTRIBUTIONS,
        SYSTEM_USERS,
        LAST_ORDER,
    ];
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Open (and create if needed) the storage directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.path_for(key);
        // write-then-rename so a crash never leaves a truncated record array
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Missing keys and unreadable values both come back as `None`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.read(key).await {
            Ok(value) => {
                if value.is_some() {
                    tracing::debug!(key, "loaded from local storage");
                }
                value
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "error loading from local storage");
                None
            }
        }
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match self.write(key, value).await {
            Ok(()) => tracing::debug!(key, "saved to local storage"),
            Err(err) => tracing::error!(key, error = %err, "error saving to local storage"),
        }
    }

    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
