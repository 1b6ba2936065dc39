use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use shared::list::{ListQuery, SortSpec};

#[derive(Parser, Debug)]
#[command(name = "admin-cli", about = "Art club admin dashboard lists")]
pub struct Cli {
    /// Overrides the configured API base url.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Config file; defaults to ./dashboard.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one page of a resource.
    List {
        resource: ResourceKind,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Write the loaded page to `<resource>_<date>.csv`.
    Export {
        resource: ResourceKind,
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Apply a row action to every listed id on the loaded page.
    Bulk {
        resource: ResourceKind,
        action: String,
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<i64>,
        #[arg(long)]
        feedback: Option<String>,
        #[command(flatten)]
        query: QueryArgs,
    },
    Delete {
        resource: ResourceKind,
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<i64>,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Read search text from stdin, one line per keystroke burst, and print
    /// the page once typing settles.
    Watch {
        resource: ResourceKind,
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Members,
    Artworks,
    Events,
    Projects,
    Notifications,
}

#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub search: Option<String>,
    /// `key=value`; repeatable. `key=all` clears the filter.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl QueryArgs {
    pub fn to_list_query(&self) -> ListQuery {
        let mut query = ListQuery::default();
        if let Some(search) = &self.search {
            query.set_search(search.clone());
        }
        for (key, value) in &self.filters {
            query.set_filter(key.clone(), value.clone());
        }
        query.page = self.page.max(1);
        query.sort = self.sort.as_ref().map(|key| {
            if self.desc {
                SortSpec::desc(key.clone())
            } else {
                SortSpec::asc(key.clone())
            }
        });
        query
    }
}

pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod cli_tests;
