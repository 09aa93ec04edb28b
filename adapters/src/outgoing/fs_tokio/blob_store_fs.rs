use std::io::{Error as IoError, ErrorKind};
use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use domain::blob::{BlobEntry, BlobName, BlobVersion};
use photo_reducer_application::{
    error::{AppError, AppResult},
    ports::outgoing::blob_store::BlobStorePort,
};

const STAGING_SUFFIX: &str = ".tmp";

/// Blob storage laid out as `<root>/<container>/<name>`.
///
/// In-progress writes are staged as `.<name>.<uuid>.tmp` next to their target
/// and are never listed.
pub struct FsBlobStoreAdapter {
    root: PathBuf,
}

impl FsBlobStoreAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn container_path(&self, container: &str) -> PathBuf {
        self.root.join(container)
    }

    fn blob_path(&self, container: &str, name: &BlobName) -> PathBuf {
        self.container_path(container).join(name.as_str())
    }

    pub async fn ensure_container(&self, container: &str) -> AppResult<()> {
        let path = self.container_path(container);
        fs::create_dir_all(&path)
            .await
            .map_err(|e| storage_error(&format!("create container {}", path.display()), &e))
    }
}

fn is_staging_name(raw: &str) -> bool {
    raw.starts_with('.') && raw.ends_with(STAGING_SUFFIX)
}

fn storage_error(action: &str, e: &IoError) -> AppError {
    AppError::StorageError {
        message: format!("Failed to {action}: {e}"),
    }
}

#[async_trait::async_trait]
impl BlobStorePort for FsBlobStoreAdapter {
    #[instrument(skip(self))]
    async fn list(&self, container: &str) -> AppResult<Vec<BlobEntry>> {
        let path = self.container_path(container);
        let mut entries = match fs::read_dir(&path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error(&format!("list {}", path.display()), &e)),
        };

        let mut blobs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| storage_error(&format!("list {}", path.display()), &e))?
        {
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            let Ok(raw) = entry.file_name().into_string() else {
                warn!("Skipping blob with non UTF-8 name in {}", path.display());
                continue;
            };
            if is_staging_name(&raw) {
                debug!("Skipping staging file {} in {}", raw, container);
                continue;
            }

            match BlobName::parse(raw) {
                Ok(name) => blobs.push(BlobEntry {
                    name,
                    version: BlobVersion::new(metadata.len(), metadata.modified().ok()),
                }),
                Err(e) => warn!("Skipping blob in {}: {}", path.display(), e),
            }
        }

        blobs.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Listed {} blobs in {}", blobs.len(), container);
        Ok(blobs)
    }

    #[instrument(skip(self), fields(blob_name = %name))]
    async fn read(&self, container: &str, name: &BlobName) -> AppResult<Vec<u8>> {
        let path = self.blob_path(container, name);
        fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::StorageError {
                message: format!("Blob not found: {container}/{name}"),
            },
            _ => storage_error(&format!("read {}", path.display()), &e),
        })
    }

    #[instrument(skip(self, bytes), fields(blob_name = %name, bytes = bytes.len()))]
    async fn write(&self, container: &str, name: &BlobName, bytes: &[u8]) -> AppResult<()> {
        self.ensure_container(container).await?;

        let path = self.blob_path(container, name);
        let staging = self
            .container_path(container)
            .join(format!(".{}.{}{}", name, Uuid::new_v4(), STAGING_SUFFIX));

        fs::write(&staging, bytes)
            .await
            .map_err(|e| storage_error(&format!("write {}", staging.display()), &e))?;

        if let Err(e) = fs::rename(&staging, &path).await {
            if let Err(cleanup) = fs::remove_file(&staging).await {
                warn!("Failed to remove {}: {}", staging.display(), cleanup);
            }
            return Err(storage_error(&format!("publish {}", path.display()), &e));
        }

        debug!("Wrote {} bytes to {}/{}", bytes.len(), container, name);
        Ok(())
    }

    async fn exists(&self, container: &str, name: &BlobName) -> AppResult<bool> {
        let path = self.blob_path(container, name);
        fs::try_exists(&path)
            .await
            .map_err(|e| storage_error(&format!("stat {}", path.display()), &e))
    }
}
