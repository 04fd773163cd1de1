use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Persists the account-service session cookie between invocations
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Option<String>, SessionStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let cookie = contents.trim();
                Ok((!cookie.is_empty()).then(|| cookie.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, cookie: &str) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, cookie).await?;
        debug!("Session saved to {:?}", self.path);
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Session file {:?} removed", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save the cookie when there is one, clear the file otherwise
    pub async fn sync(&self, cookie: Option<&str>) -> Result<(), SessionStoreError> {
        match cookie {
            Some(cookie) => self.save(cookie).await,
            None => self.clear().await,
        }
    }
}
