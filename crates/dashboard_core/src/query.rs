//! Turns a [`ListQuery`] into the exact parameter list sent to the server.
//!
//! Parameter order is fixed: `page`, then `search` (when not blank), then the
//! resource's declared filter keys in declaration order, then any remaining
//! filter keys alphabetically. Filters set to `"all"` are omitted. The same
//! inputs therefore always yield a byte-identical query string.

use shared::list::ListQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuery {
    page: u32,
    params: Vec<(String, String)>,
}

impl ComposedQuery {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

/// Remembers the previously composed constraints so that a change in search
/// text or filters always sends page 1, whatever page the caller asked for.
#[derive(Debug, Clone)]
pub struct QueryComposer {
    filter_order: Vec<String>,
    previous: Option<ListQuery>,
}

impl QueryComposer {
    pub fn new<I, S>(filter_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filter_order: filter_order.into_iter().map(Into::into).collect(),
            previous: None,
        }
    }

    /// Composes `query` and remembers it as the new baseline.
    pub fn compose(&mut self, query: &ListQuery) -> ComposedQuery {
        let composed = self.preview(query);
        self.record(query, composed.page());
        composed
    }

    /// Composes `query` against the current baseline without moving it.
    pub fn preview(&self, query: &ListQuery) -> ComposedQuery {
        let page = match &self.previous {
            Some(previous) if !previous.same_constraints(query) => 1,
            _ => query.page.max(1),
        };
        compose_with_order(&self.filter_order, query, page)
    }

    /// Makes `query` the baseline later compositions are compared against.
    pub fn record(&mut self, query: &ListQuery, page: u32) {
        self.previous = Some(ListQuery {
            page,
            ..query.clone()
        });
    }
}

/// Stateless composition with an explicit page.
pub fn compose_with_order(filter_order: &[String], query: &ListQuery, page: u32) -> ComposedQuery {
    let mut params = vec![("page".to_string(), page.to_string())];
    if let Some(search) = query.effective_search() {
        params.push(("search".to_string(), search.to_string()));
    }

    let active: Vec<(&str, &str)> = query.active_filters().collect();
    for key in filter_order {
        if let Some((_, value)) = active.iter().find(|(name, _)| name == key) {
            params.push((key.clone(), (*value).to_string()));
        }
    }
    for (key, value) in active {
        if !filter_order.iter().any(|declared| declared == key) {
            params.push((key.to_string(), value.to_string()));
        }
    }

    ComposedQuery { page, params }
}
