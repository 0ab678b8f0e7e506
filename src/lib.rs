pub mod aggregate;
pub mod cli;
pub mod contributors;
pub mod error;
pub mod git;
pub mod model;
pub mod parse;
pub mod render;
pub mod sort;

pub use contributors::{collect, list, list_with};
pub use error::{ContributorsError, Result};
pub use git::{GitLog, HistorySource};
pub use model::{CommitRecord, ContributorStat, Listing, Options, Summary};
