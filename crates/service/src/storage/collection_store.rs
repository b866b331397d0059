use std::{io, marker::PhantomData, path::PathBuf, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::WriteMode;

/// Generic JSON file-backed collection of records.
///
/// The whole collection lives in one file as a JSON array. Nothing is cached
/// in memory: every read loads the file and every mutation rewrites it.
///
/// Loading never fails. A missing, unreadable or malformed file reads as an
/// empty collection, so a fresh data directory behaves like an empty store.
/// Writes do fail loudly with [`ServiceError::Storage`].
pub struct CollectionStore<T> {
    name: String,
    file_path: PathBuf,
    write_mode: WriteMode,
    write_gate: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> CollectionStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the collection stored at `path`. The parent directory is created
    /// if missing; the file itself is created on the first write.
    pub async fn open<P: Into<PathBuf>>(
        name: &str,
        path: P,
        write_mode: WriteMode,
    ) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage(name, e))?;
        }
        debug!(collection = name, path = %file_path.display(), ?write_mode, "collection opened");
        Ok(Arc::new(Self {
            name: name.to_string(),
            file_path,
            write_mode,
            write_gate: Mutex::new(()),
            _records: PhantomData,
        }))
    }

    /// Read the full collection. Takes no lock: a read sees the last
    /// completed write, since writes replace the file by rename.
    pub async fn load(&self) -> Vec<T> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(collection = %self.name, path = %self.file_path.display(), error = %e, "collection unreadable; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(collection = %self.name, path = %self.file_path.display(), error = %e, "collection payload invalid; treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the collection with `records`.
    ///
    /// The payload goes to a sibling temp file which is then renamed over the
    /// target, so the file is never observed half-written.
    pub async fn persist(&self, records: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(records).map_err(|e| ServiceError::storage(&self.name, e))?;
        let tmp_path = self.tmp_path();
        if let Err(e) = fs::write(&tmp_path, &data).await {
            error!(collection = %self.name, path = %tmp_path.display(), error = %e, "collection write failed");
            let _ = fs::remove_file(&tmp_path).await;
            return Err(ServiceError::storage(&self.name, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.file_path).await {
            error!(collection = %self.name, path = %self.file_path.display(), error = %e, "collection replace failed");
            let _ = fs::remove_file(&tmp_path).await;
            return Err(ServiceError::storage(&self.name, e));
        }
        debug!(collection = %self.name, records = records.len(), bytes = data.len(), "collection persisted");
        Ok(())
    }

    /// Load, mutate with `f`, persist. If `f` returns an error the file is
    /// left untouched and the error is returned.
    ///
    /// Under [`WriteMode::Serialized`] cycles on the same store run one at a
    /// time. Under [`WriteMode::LastWriterWins`] they may interleave and the
    /// later rewrite discards the earlier one's change.
    pub async fn apply<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = match self.write_mode {
            WriteMode::Serialized => Some(self.write_gate.lock().await),
            WriteMode::LastWriterWins => None,
        };
        let mut records = self.load().await;
        let out = f(&mut records)?;
        self.persist(&records).await?;
        Ok(out)
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone());
        self.file_path
            .with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
    }
}
