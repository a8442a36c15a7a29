//! Flat-file storage backend

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::traits::*;
use crate::types::*;
use crate::utils::record::{format_records, parse_records};

/// Stores every account as one comma-separated line in a text file
#[derive(Debug, Clone)]
pub struct FlatFileStorage {
    path: PathBuf,
}

impl FlatFileStorage {
    /// Create a storage backed by the file at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl AccountStorage for FlatFileStorage {
    async fn load_accounts(&self) -> BankResult<Vec<Account>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "store file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        parse_records(&contents)
    }

    async fn save_accounts(&mut self, accounts: &[&Account]) -> BankResult<()> {
        let staging = self.staging_path();
        fs::write(&staging, format_records(accounts)).await?;
        fs::rename(&staging, &self.path).await?;
        tracing::debug!(path = %self.path.display(), count = accounts.len(), "store rewritten");
        Ok(())
    }
}
