//! Line-oriented parser for `git log --shortstat --pretty=format:%aN;%aE`.
//!
//! Each commit is a `<name>;<email>` header line, optionally followed by a
//! diffstat summary such as
//! ` 3 files changed, 10 insertions(+), 2 deletions(-)`. Commits are
//! separated by blank lines. Lines that fit neither shape are dropped.

use crate::model::CommitRecord;
use std::iter::Peekable;
use std::str::Lines;
use tracing::trace;

const AUTHOR_DELIMITER: char = ';';

/// Lazily parse raw history text into one [`CommitRecord`] per commit.
///
/// The returned iterator borrows `raw` and is `Clone`, so it can be restarted
/// from any point.
pub fn parse_log(raw: &str) -> CommitRecords<'_> {
    CommitRecords {
        lines: raw.lines().peekable(),
    }
}

#[derive(Debug, Clone)]
pub struct CommitRecords<'a> {
    lines: Peekable<Lines<'a>>,
}

impl Iterator for CommitRecords<'_> {
    type Item = CommitRecord;

    fn next(&mut self) -> Option<CommitRecord> {
        loop {
            let line = self.lines.next()?.trim();
            if line.is_empty() {
                continue;
            }

            let Some((name, email)) = parse_author(line) else {
                trace!(line, "skipping line without a commit header");
                continue;
            };

            let mut record = CommitRecord::new(name, email);
            if let Some(stat) = self.lines.peek().and_then(|l| parse_diffstat(l)) {
                self.lines.next();
                record.insertions = stat.insertions;
                record.deletions = stat.deletions;
            }
            return Some(record);
        }
    }
}

/// Counts pulled from a `--shortstat` summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diffstat {
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
}

/// Parse `<N> file(s) changed[, <I> insertion(s)(+)][, <D> deletion(s)(-)]`.
pub fn parse_diffstat(line: &str) -> Option<Diffstat> {
    let mut clauses = line.trim().split(", ");

    let (files, rest) = split_count(clauses.next()?)?;
    if rest != "file changed" && rest != "files changed" {
        return None;
    }

    let mut stat = Diffstat {
        files_changed: files,
        ..Diffstat::default()
    };
    for clause in clauses {
        let (count, rest) = split_count(clause)?;
        if rest.starts_with("insertion") {
            stat.insertions = count;
        } else if rest.starts_with("deletion") {
            stat.deletions = count;
        } else {
            return None;
        }
    }
    Some(stat)
}

fn split_count(clause: &str) -> Option<(u64, &str)> {
    let (count, rest) = clause.trim().split_once(' ')?;
    Some((count.parse().ok()?, rest))
}

fn parse_author(line: &str) -> Option<(&str, &str)> {
    if parse_diffstat(line).is_some() {
        return None;
    }
    let (name, email) = line.split_once(AUTHOR_DELIMITER)?;
    Some((name.trim(), email.trim()))
}
