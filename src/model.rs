use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;

/// A single commit as read from the history text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub author_name: String,
    pub author_email: String,
    pub insertions: u64,
    pub deletions: u64,
}

impl CommitRecord {
    pub fn new(author_name: impl Into<String>, author_email: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
            insertions: 0,
            deletions: 0,
        }
    }

    pub fn with_counts(mut self, insertions: u64, deletions: u64) -> Self {
        self.insertions = insertions;
        self.deletions = deletions;
        self
    }
}

/// Canonical grouping key for a contributor: the trimmed, lowercased email.
pub fn identity_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStat {
    pub commits: u32,
    pub name: String,
    pub email: String,
    pub insertions: u64,
    pub deletions: u64,
    #[serde(skip)]
    pub(crate) identity_key: String,
}

impl ContributorStat {
    pub fn new(record: &CommitRecord) -> Self {
        Self {
            commits: 1,
            name: record.author_name.clone(),
            email: record.author_email.clone(),
            insertions: record.insertions,
            deletions: record.deletions,
            identity_key: identity_key(&record.author_email),
        }
    }

    /// Fold another commit of the same identity into this entry. The display
    /// name follows the latest record; the display email keeps its first casing.
    pub fn add_commit(&mut self, record: &CommitRecord) {
        self.commits += 1;
        self.insertions += record.insertions;
        self.deletions += record.deletions;
        self.name.clone_from(&record.author_name);
    }

    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }
}

/// Options accepted by [`crate::list`].
///
/// Deserializes from a configuration object such as
/// `{"cwd": "path/to/repo", "markdown": true}`; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub cwd: Option<PathBuf>,
    pub markdown: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// The repository path to inspect. An absent or empty `cwd` falls back to
    /// the process's current directory.
    pub fn resolve_cwd(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) if !cwd.as_os_str().is_empty() => Ok(cwd.clone()),
            _ => std::env::current_dir(),
        }
    }
}

impl From<&str> for Options {
    fn from(cwd: &str) -> Self {
        Options::new().with_cwd(cwd)
    }
}

impl From<String> for Options {
    fn from(cwd: String) -> Self {
        Options::new().with_cwd(cwd)
    }
}

impl From<&Path> for Options {
    fn from(cwd: &Path) -> Self {
        Options::new().with_cwd(cwd)
    }
}

impl From<PathBuf> for Options {
    fn from(cwd: PathBuf) -> Self {
        Options::new().with_cwd(cwd)
    }
}

impl<T: Into<Options>> From<Option<T>> for Options {
    fn from(options: Option<T>) -> Self {
        options.map(Into::into).unwrap_or_default()
    }
}

/// The rendered result of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Listing {
    Records(Vec<ContributorStat>),
    Markdown(String),
}

impl Listing {
    pub fn as_records(&self) -> Option<&[ContributorStat]> {
        match self {
            Listing::Records(records) => Some(records),
            Listing::Markdown(_) => None,
        }
    }

    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            Listing::Markdown(text) => Some(text),
            Listing::Records(_) => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<ContributorStat>> {
        match self {
            Listing::Records(records) => Some(records),
            Listing::Markdown(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub contributors: usize,
    pub commits: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl From<&[ContributorStat]> for Summary {
    fn from(stats: &[ContributorStat]) -> Self {
        stats.iter().fold(
            Summary {
                contributors: stats.len(),
                ..Summary::default()
            },
            |mut acc, s| {
                acc.commits += u64::from(s.commits);
                acc.insertions += s.insertions;
                acc.deletions += s.deletions;
                acc
            },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub contributors: Vec<ContributorStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_from_missing_value_uses_defaults() {
        let options = Options::from(None::<&str>);
        assert_eq!(options, Options::default());
        assert!(!options.markdown);
    }

    #[test]
    fn options_from_string_sets_cwd() {
        let options = Options::from("some/repo");
        assert_eq!(options.cwd, Some(PathBuf::from("some/repo")));
        assert_eq!(options.resolve_cwd().unwrap(), PathBuf::from("some/repo"));
    }

    #[test]
    fn empty_cwd_falls_back_to_current_dir() {
        let options = Options::from("");
        assert_eq!(options.resolve_cwd().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn options_ignore_unknown_keys() {
        let options: Options =
            serde_json::from_str(r#"{"cwd": ".", "markdown": true, "format": "html"}"#).unwrap();
        assert_eq!(options, Options::new().with_cwd(".").with_markdown(true));
    }

    #[test]
    fn email_casing_is_kept_but_key_is_canonical() {
        let mut stat = ContributorStat::new(&CommitRecord::new("Al", " Alice@Example.COM "));
        stat.add_commit(&CommitRecord::new("Alice", "alice@example.com").with_counts(3, 1));
        assert_eq!(stat.identity_key(), "alice@example.com");
        assert_eq!(stat.email, " Alice@Example.COM ");
        assert_eq!(stat.name, "Alice");
        assert_eq!((stat.commits, stat.insertions, stat.deletions), (2, 3, 1));
    }

    #[test]
    fn summary_totals_all_entries() {
        let mut a = ContributorStat::new(&CommitRecord::new("A", "a@x").with_counts(5, 1));
        a.add_commit(&CommitRecord::new("A", "a@x").with_counts(2, 2));
        let b = ContributorStat::new(&CommitRecord::new("B", "b@x").with_counts(1, 0));
        let summary = Summary::from(&[a, b][..]);
        assert_eq!(
            summary,
            Summary {
                contributors: 2,
                commits: 3,
                insertions: 8,
                deletions: 3
            }
        );
    }
}
