//! File-backed credential storage.
//!
//! Keeps all fields in one JSON object keyed by the storage key names:
//!
//! ```text
//! {
//!   "Authorization": "Bearer eyJ...",
//!   "nickName": "Reader",
//!   "userName": "reader",
//!   "uid": "42"
//! }
//! ```
//!
//! The file is read once on open and rewritten atomically (write to a temp
//! file, then rename) after every mutation. The in-memory view only changes
//! once the new contents are on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::auth::{CredentialField, CredentialStore};
use crate::error::{AppError, Result};

/// Credential store persisted to a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
    /// Serializes writers so a slower persist never overwrites a newer one.
    writer: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(AppError::Io(e)),
        };
        log::debug!("Opened credential file {}", path.display());
        Ok(Self {
            path,
            entries: RwLock::new(entries),
            writer: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `change` to a copy, persist it, then publish it.
    async fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) + Send,
    ) -> Result<()> {
        let _writer = self.writer.lock().await;
        let mut next = self.snapshot();
        change(&mut next);
        self.persist(&next).await?;
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    /// Write the map atomically.
    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    fn get(&self, field: CredentialField) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(field.key()).cloned()
    }

    async fn set(&self, field: CredentialField, value: &str) -> Result<()> {
        let value = value.to_string();
        self.update(move |entries| {
            entries.insert(field.key().to_string(), value);
        })
        .await
    }

    async fn remove(&self, field: CredentialField) -> Result<()> {
        self.update(|entries| {
            entries.remove(field.key());
        })
        .await
    }

    async fn clear_all(&self) -> Result<()> {
        self.update(|entries| {
            for field in CredentialField::ALL {
                entries.remove(field.key());
            }
        })
        .await
    }
}
