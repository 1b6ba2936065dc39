//! Query, sort and page types shared by every resource list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter value meaning "no constraint"; never sent to the server.
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Result of clicking the `key` column header while `current` is active.
    ///
    /// Same column flips the direction, any other column starts ascending.
    pub fn after_click(current: Option<&SortSpec>, key: &str) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key: spec.key.clone(),
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::asc(key),
        }
    }
}

/// Canonical description of what one list screen is asking the server for.
///
/// Changing `search` or any filter through the mutators below resets `page`
/// to 1, so a query never pairs a stale page with a new constraint set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub sort: Option<SortSpec>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
        }
    }
}

impl ListQuery {
    /// Returns true when the search text actually changed.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if normalize_search(&search) == normalize_search(&self.search) {
            return false;
        }
        self.search = search;
        self.page = 1;
        true
    }

    /// Returns true when the effective value of `key` changed.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if is_unconstrained(&value) {
            if self.filters.remove(&key).is_none() {
                return false;
            }
        } else if self.filters.get(&key) == Some(&value) {
            return false;
        } else {
            self.filters.insert(key, value);
        }
        self.page = 1;
        true
    }

    /// Drops every filter and the search text. Returns false if already clear.
    pub fn clear_constraints(&mut self) -> bool {
        let had_constraints =
            !normalize_search(&self.search).is_empty() || self.active_filters().next().is_some();
        self.search.clear();
        self.filters.clear();
        if had_constraints {
            self.page = 1;
        }
        had_constraints
    }

    /// Current value of a filter, `"all"` when unset.
    pub fn filter(&self, key: &str) -> &str {
        self.filters
            .get(key)
            .map(String::as_str)
            .unwrap_or(FILTER_ALL)
    }

    /// Filters that constrain the result set, in key order.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !is_unconstrained(value))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Search text as it is sent to the server, `None` when blank.
    pub fn effective_search(&self) -> Option<&str> {
        let search = normalize_search(&self.search);
        (!search.is_empty()).then_some(search)
    }

    /// True when both queries constrain the result set identically.
    pub fn same_constraints(&self, other: &ListQuery) -> bool {
        self.effective_search() == other.effective_search()
            && self.active_filters().eq(other.active_filters())
    }
}

fn normalize_search(search: &str) -> &str {
    search.trim()
}

fn is_unconstrained(value: &str) -> bool {
    value.is_empty() || value == FILTER_ALL
}

/// One decoded page of a collection.
///
/// `has_next`/`has_prev` come from the server's `next`/`previous` links and
/// are never recomputed from `total_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
