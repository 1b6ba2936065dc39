//! Remote resource list controller for the art-club admin dashboard.
//!
//! Each admin screen (members, artworks, events, projects, notifications)
//! instantiates one [`ListController`] with its [`ResourceConfig`]. The
//! controller turns search text, filters, sort clicks, page navigation and
//! row selection into paginated requests against a [`ResourceApi`], and fans
//! bulk commands out as one row-scoped request per selected id.

pub mod bulk;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod events;
pub mod export;
pub mod fetch;
pub mod http;
pub mod pagination;
pub mod query;
pub mod record;
pub mod resources;
pub mod selection;
pub mod sort;

pub use bulk::{run_bulk, BulkOutcome, BulkStatus};
pub use controller::{DebouncedSearch, FetchOutcome, ListController, ListSnapshot, ViewState};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use error::{ListError, NoticeCategory};
pub use events::{ControllerEvent, Notice, NoticeLevel};
pub use export::{export_file_name, to_csv, CsvColumn, CsvExport};
pub use fetch::{FetchOrchestrator, MissingResourceApi, ResourceApi};
pub use http::HttpResourceApi;
pub use pagination::PaginationState;
pub use query::{ComposedQuery, QueryComposer};
pub use record::{FieldValue, Record};
pub use resources::{ResourceConfig, RowAction};

#[cfg(test)]
#[path = "tests/support.rs"]
mod support;

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod query_tests;

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod debounce_tests;

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod sort_tests;

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod selection_tests;

#[cfg(test)]
#[path = "tests/bulk_tests.rs"]
mod bulk_tests;

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod export_tests;

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod fetch_tests;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod http_tests;
