use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use scout_logging::scout_info;
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

use scout_core::{RunConfig, SeenUrls};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bucket {bucket} unavailable: {reason}")]
    Bucket { bucket: String, reason: String },
    #[error("failed to read {key} from {bucket}: {reason}")]
    Get {
        bucket: String,
        key: String,
        reason: String,
    },
    #[error("failed to write {key} to {bucket}: {reason}")]
    Save {
        bucket: String,
        key: String,
        reason: String,
    },
    #[error("document {key} in {bucket} is malformed: {reason}")]
    Malformed {
        bucket: String,
        key: String,
        reason: String,
    },
}

/// Object-storage collaborator boundary: JSON documents under bucket/key.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches a stored document. Absent keys are `None`, not an error.
    async fn get_json(&self, bucket: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Stores a document, overwriting any existing one.
    async fn save_json(&self, bucket: &str, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Creates the bucket when missing; succeeds if it already exists.
    async fn ensure_bucket(&self, bucket: &str) -> Result<(), StoreError>;
}

/// Filesystem-backed object store: a bucket is a directory under `root`,
/// a key is a file inside it. Writes are atomic (temp file then rename).
pub struct DirObjectStore {
    root: PathBuf,
}

impl DirObjectStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }
}

#[async_trait::async_trait]
impl ObjectStore for DirObjectStore {
    async fn get_json(&self, bucket: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.bucket_dir(bucket).join(key);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                scout_info!("Document {} in bucket {} does not exist.", key, bucket);
                return Ok(None);
            }
            Err(err) => {
                return Err(StoreError::Get {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        let value = serde_json::from_str(&content).map_err(|err| StoreError::Malformed {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Some(value))
    }

    async fn save_json(&self, bucket: &str, key: &str, value: &Value) -> Result<(), StoreError> {
        let dir = self.bucket_dir(bucket);
        self.ensure_bucket(bucket).await?;

        let save_error = |reason: String| StoreError::Save {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason,
        };

        // Documents are pretty-printed so operators can inspect them.
        let content =
            serde_json::to_string_pretty(value).map_err(|err| save_error(err.to_string()))?;

        let target = dir.join(key);
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|err| save_error(err.to_string()))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.flush())
            .and_then(|_| tmp.as_file_mut().sync_all())
            .map_err(|err| save_error(err.to_string()))?;

        // Replace any existing document to keep the overwrite atomic.
        if target.exists() {
            fs::remove_file(&target).map_err(|err| save_error(err.to_string()))?;
        }
        tmp.persist(&target)
            .map_err(|err| save_error(err.error.to_string()))?;
        Ok(())
    }

    async fn ensure_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let dir = self.bucket_dir(bucket);
        if dir.exists() {
            let meta = fs::metadata(&dir).map_err(|err| StoreError::Bucket {
                bucket: bucket.to_string(),
                reason: err.to_string(),
            })?;
            if !meta.is_dir() {
                return Err(StoreError::Bucket {
                    bucket: bucket.to_string(),
                    reason: "path exists but is not a directory".to_string(),
                });
            }
            scout_info!("Validated that bucket {} exists.", bucket);
        } else {
            scout_info!("Bucket {} does not exist, creating now.", bucket);
            fs::create_dir_all(&dir).map_err(|err| StoreError::Bucket {
                bucket: bucket.to_string(),
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }
}

/// Typed access to the two durable documents behind an [`ObjectStore`].
#[derive(Clone)]
pub struct StateStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    config_key: String,
    seen_key: String,
}

impl StateStore {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        config_key: impl Into<String>,
        seen_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            config_key: config_key.into(),
            seen_key: seen_key.into(),
        }
    }

    pub async fn ensure_bucket(&self) -> Result<(), StoreError> {
        self.store.ensure_bucket(&self.bucket).await
    }

    pub async fn load_config(&self) -> Result<Option<RunConfig>, StoreError> {
        self.load(&self.config_key).await
    }

    pub async fn save_config(&self, config: &RunConfig) -> Result<(), StoreError> {
        self.save(&self.config_key, config).await
    }

    pub async fn load_seen(&self) -> Result<Option<SeenUrls>, StoreError> {
        self.load(&self.seen_key).await
    }

    pub async fn save_seen(&self, seen: &SeenUrls) -> Result<(), StoreError> {
        self.save(&self.seen_key, seen).await
    }

    async fn load<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let Some(value) = self.store.get_json(&self.bucket, key).await? else {
            return Ok(None);
        };
        // A present but undecodable document is an error, never "absent".
        let decoded = serde_json::from_value(value).map_err(|err| StoreError::Malformed {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Some(decoded))
    }

    async fn save<T: serde::Serialize>(&self, key: &str, document: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(document).map_err(|err| StoreError::Save {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            reason: err.to_string(),
        })?;
        self.store.save_json(&self.bucket, key, &value).await
    }
}
