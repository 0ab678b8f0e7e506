use super::HistorySource;
use crate::error::{ContributorsError, Result};
use async_trait::async_trait;
use gix::{discover, Repository};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

const PRETTY_FORMAT: &str = "--pretty=format:%aN;%aE";

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Discover the repository containing `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = discover(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False for a freshly initialised repository whose HEAD is unborn.
    pub fn has_commits(&self) -> Result<bool> {
        Ok(!self.repo.head()?.is_unborn())
    }
}

/// Blocking check that `path` lies inside a git repository. Subdirectories of
/// a work tree count, the same as for `git` itself.
pub fn is_repository(path: &Path) -> bool {
    match GitRepo::open(path) {
        Ok(repo) => {
            debug!(path = %path.display(), root = %repo.path().display(), "found git repository");
            true
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "not a git repository");
            false
        }
    }
}

/// [`is_repository`] on the blocking thread pool.
pub async fn find_repository(path: &Path) -> bool {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || is_repository(&path))
        .await
        .unwrap_or(false)
}

/// [`HistorySource`] backed by the `git` binary.
#[derive(Debug, Clone, Default)]
pub struct GitLog {
    since: Option<String>,
    until: Option<String>,
    timeout: Option<Duration>,
}

impl GitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only count commits more recent than a date or revision git understands.
    pub fn with_since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    pub fn with_until(mut self, until: impl Into<String>) -> Self {
        self.until = Some(until.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--no-color".to_string(),
            "--shortstat".to_string(),
            PRETTY_FORMAT.to_string(),
        ];
        if let Some(since) = &self.since {
            args.push(format!("--since={since}"));
        }
        if let Some(until) = &self.until {
            args.push(format!("--until={until}"));
        }
        args
    }

    async fn run(&self, repo: &Path) -> Result<std::process::Output> {
        let args = self.args();
        debug!(repo = %repo.display(), ?args, "running git");

        let mut cmd = Command::new("git");
        cmd.args(&args)
            .current_dir(repo)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| {
                    ContributorsError::Source(format!(
                        "git log timed out after {}",
                        humantime::format_duration(limit)
                    ))
                })?,
            None => cmd.output().await,
        };

        output.map_err(|e| ContributorsError::Source(format!("Failed to run git: {e}")))
    }
}

#[async_trait]
impl HistorySource for GitLog {
    async fn log(&self, repo: &Path) -> Result<String> {
        let path = repo.to_path_buf();
        let has_commits = tokio::task::spawn_blocking(move || GitRepo::open(&path)?.has_commits())
            .await
            .map_err(|e| ContributorsError::Source(format!("Repository lookup failed: {e}")))??;
        if !has_commits {
            debug!(repo = %repo.display(), "repository has no commits yet");
            return Ok(String::new());
        }

        let output = self.run(repo).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, %stderr, "git log failed");
            return Err(ContributorsError::Source(if stderr.is_empty() {
                format!("git log exited with {}", output.status)
            } else {
                stderr
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
