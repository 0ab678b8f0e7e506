use crate::error::Result;
use crate::model::{ContributorStat, Listing};
use serde::Serialize;

const MARKDOWN_HEADER: &str = "| Name | Commits | Insertions | Deletions |\n| :--- | ---: | ---: | ---: |\n";

/// Project sorted contributors into the requested output shape.
pub fn render(stats: Vec<ContributorStat>, markdown: bool) -> Listing {
    if markdown {
        Listing::Markdown(to_markdown(&stats))
    } else {
        Listing::Records(stats)
    }
}

/// A markdown table with one row per contributor, in the given order.
pub fn to_markdown(stats: &[ContributorStat]) -> String {
    let mut out = String::from(MARKDOWN_HEADER);
    for s in stats {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&s.name),
            s.commits,
            s.insertions,
            s.deletions
        ));
    }
    out
}

/// Pretty-printed JSON for contributor records or a whole output document.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
