//! Entry points tying the history source to parsing, aggregation, ordering
//! and rendering.

use crate::aggregate::aggregate;
use crate::error::{ContributorsError, Result};
use crate::git::{GitLog, HistorySource};
use crate::model::{ContributorStat, Listing, Options};
use crate::parse::parse_log;
use crate::render::render;
use crate::sort::sort_contributors;
use tracing::debug;

/// List the contributors of a repository using the local `git` binary.
///
/// `options` may be a path, `None` (current directory, record output) or a
/// full [`Options`] value.
///
/// ```no_run
/// # async fn demo() -> git_contributors::Result<()> {
/// use git_contributors::{list, Options};
///
/// let listing = list(Options::new().with_cwd(".").with_markdown(true)).await?;
/// println!("{}", listing.as_markdown().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub async fn list(options: impl Into<Options>) -> Result<Listing> {
    list_with(&GitLog::default(), options).await
}

/// Same as [`list`] but reads history from `source`.
pub async fn list_with<S>(source: &S, options: impl Into<Options>) -> Result<Listing>
where
    S: HistorySource + ?Sized,
{
    let options = options.into();
    let path = options.resolve_cwd()?;

    if !source.is_repository(&path).await {
        return Err(ContributorsError::repository_not_found(path));
    }

    let raw = source.log(&path).await?;
    let stats = collect(&raw);
    debug!(
        path = %path.display(),
        contributors = stats.len(),
        markdown = options.markdown,
        "collected contributor stats"
    );

    Ok(render(stats, options.markdown))
}

/// Parse, aggregate and order raw history text.
pub fn collect(raw: &str) -> Vec<ContributorStat> {
    sort_contributors(aggregate(parse_log(raw)))
}
