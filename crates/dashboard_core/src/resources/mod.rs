//! Per-resource wiring for the five admin list screens.

mod artworks;
mod events;
mod members;
mod notifications;
mod projects;

pub use artworks::artworks;
pub use events::events;
pub use members::members;
pub use notifications::notifications;
pub use projects::projects;

use chrono::{DateTime, Utc};

use crate::export::CsvColumn;

/// A row-scoped mutation offered by a screen (`PATCH /<resource>/<id>/<name>/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAction {
    pub name: &'static str,
    pub label: &'static str,
    /// Reviewer feedback must accompany the request, e.g. when rejecting.
    pub requires_feedback: bool,
}

impl RowAction {
    pub const fn plain(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            requires_feedback: false,
        }
    }

    pub const fn with_feedback(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            requires_feedback: true,
        }
    }
}

/// Everything that differs between list screens.
pub struct ResourceConfig<T> {
    /// Used in export file names and log fields.
    pub name: &'static str,
    pub endpoint: &'static str,
    /// Filter keys in the order they are composed into the query.
    pub filter_keys: &'static [&'static str],
    pub actions: &'static [RowAction],
    pub columns: Vec<CsvColumn<T>>,
}

impl<T> ResourceConfig<T> {
    pub fn action(&self, name: &str) -> Option<&RowAction> {
        self.actions.iter().find(|action| action.name == name)
    }
}

impl<T> Clone for ResourceConfig<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            endpoint: self.endpoint,
            filter_keys: self.filter_keys,
            actions: self.actions,
            columns: self.columns.clone(),
        }
    }
}

fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn yes_no(value: bool) -> String {
    let label = if value { "Yes" } else { "No" };
    label.to_string()
}

#[cfg(test)]
#[path = "../tests/resources_tests.rs"]
mod resources_tests;
