use crate::git::{GitLog, GitRepo};
use crate::model::{ContributorStat, ContributorsOutput, Listing, Options, Summary, SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgGroup, Parser};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "git-contributors")]
#[command(about = "List contributors of a git repository with commit, insertion and deletion counts")]
#[command(version)]
#[command(group(ArgGroup::new("format").args(["markdown", "json"])))]
pub struct Cli {
    #[arg(long, help = "Path to git repository (defaults to the current directory)")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Output a markdown table")]
    pub markdown: bool,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Only count commits after this date or revision")]
    pub since: Option<String>,

    #[arg(long, help = "Only count commits before this date or revision")]
    pub until: Option<String>,

    #[arg(long, value_parser = humantime::parse_duration, help = "Give up on git after this long (e.g. 30s, 2m)")]
    pub timeout: Option<Duration>,

    #[arg(short, long, help = "Log debug output to stderr")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn options(&self) -> Options {
        Options {
            cwd: self.repo.clone(),
            markdown: self.markdown,
        }
    }

    pub fn source(&self) -> GitLog {
        let mut source = GitLog::new();
        if let Some(since) = &self.since {
            source = source.with_since(since);
        }
        if let Some(until) = &self.until {
            source = source.with_until(until);
        }
        if let Some(timeout) = self.timeout {
            source = source.with_timeout(timeout);
        }
        source
    }

    pub async fn execute(self) -> Result<()> {
        let options = self.options();
        let source = self.source();

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading commit history...");
        pb.enable_steady_tick(Duration::from_millis(100));

        let listing = crate::list_with(&source, options.clone()).await;
        pb.finish_and_clear();

        match listing? {
            Listing::Markdown(text) => print!("{text}"),
            Listing::Records(stats) if self.json => output_json(&stats, &options, &self)?,
            Listing::Records(stats) => output_table(&stats),
        }

        Ok(())
    }
}

fn output_json(stats: &[ContributorStat], options: &Options, cli: &Cli) -> Result<()> {
    let cwd = options
        .resolve_cwd()
        .context("Failed to resolve repository path")?;
    let repository_path = GitRepo::open(&cwd)
        .map(|repo| repo.path().to_path_buf())
        .unwrap_or(cwd);

    let output = ContributorsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repository_path.to_string_lossy().to_string(),
        since: cli.since.clone(),
        until: cli.until.clone(),
        contributors: stats.to_vec(),
    };
    println!("{}", crate::render::to_json(&output)?);
    Ok(())
}

fn output_table(stats: &[ContributorStat]) {
    if stats.is_empty() {
        println!("No commits found");
        return;
    }

    println!(
        "{:<30} {:<36} {:>8} {:>11} {:>10}",
        style("Name").bold(),
        style("Email").bold(),
        style("Commits").bold(),
        style("Insertions").bold(),
        style("Deletions").bold()
    );
    println!("{}", "─".repeat(99));
    for s in stats {
        println!(
            "{:<30} {:<36} {:>8} {:>11} {:>10}",
            s.name,
            s.email,
            s.commits,
            style(s.insertions).green(),
            style(s.deletions).red()
        );
    }

    let summary = Summary::from(stats);
    println!("{}", "─".repeat(99));
    println!(
        "{} contributors, {} commits, {} insertions, {} deletions",
        style(summary.contributors).yellow(),
        style(summary.commits).cyan(),
        style(summary.insertions).green(),
        style(summary.deletions).red()
    );
}
