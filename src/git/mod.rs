//! Where raw commit history comes from.

mod repo;

pub use repo::{find_repository, is_repository, GitLog, GitRepo};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Produces `<name>;<email>` headers with optional `--shortstat` summaries,
/// one block per commit, for the repository at a path.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Whether `path` names a git repository. Checked before [`Self::log`].
    async fn is_repository(&self, path: &Path) -> bool {
        find_repository(path).await
    }

    async fn log(&self, repo: &Path) -> Result<String>;
}
