use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContributorsError>;

#[derive(Error, Debug)]
pub enum ContributorsError {
    #[error("Could not find .git repository at \"{}\"", .path.display())]
    RepositoryNotFound { path: PathBuf },
    /// The history source failed; its message is passed through untouched.
    #[error("{0}")]
    Source(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
}

impl ContributorsError {
    pub fn repository_not_found(path: impl Into<PathBuf>) -> Self {
        ContributorsError::RepositoryNotFound { path: path.into() }
    }
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::discover::Error> for ContributorsError {
    fn from(err: gix::discover::Error) -> Self {
        ContributorsError::GitDiscover(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for ContributorsError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        ContributorsError::RefFind(Box::new(err))
    }
}
