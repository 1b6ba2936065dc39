//! One list screen's state container.
//!
//! A [`ListController`] is built once per screen from a [`ResourceConfig`]
//! and owns that screen's query, loaded page, selection and fetch bookkeeping.
//! Nothing here is shared between screens. Commands never panic into the
//! caller: failures are returned as values and also published as a
//! [`Notice`] on the event channel.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use shared::{
    list::{ListQuery, Page, SortSpec},
    protocol::FeedbackPayload,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::{
    bulk::{run_bulk, BulkOutcome, BulkStatus},
    debounce::Debouncer,
    error::{classify_message, ListError, NoticeCategory},
    events::{ControllerEvent, Notice, NoticeLevel},
    export::{export_file_name, to_csv, CsvExport},
    fetch::{FetchOrchestrator, FetchTracker, ResourceApi},
    pagination::PaginationState,
    query::QueryComposer,
    record::Record,
    resources::{ResourceConfig, RowAction},
    selection::SelectionTracker,
    sort::sort_items,
};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded {
        page: u32,
        item_count: usize,
        total_count: u64,
    },
    /// The command did not change the query, so nothing was fetched.
    Unchanged,
    /// A newer request was issued before this one resolved; its response was
    /// dropped.
    Stale,
    /// The previous page stays displayed.
    Failed(ListError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Empty,
    Error,
    Populated,
}

#[derive(Debug, Clone)]
pub struct ListSnapshot<T: Record> {
    pub query: ListQuery,
    /// Loaded rows in display order (client sort applied).
    pub rows: Vec<T>,
    pub total_count: u64,
    pub selected: Vec<T::Id>,
    pub all_selected: bool,
    pub pagination: PaginationState,
    pub view: ViewState,
    pub last_error: Option<ListError>,
}

struct ListState<T: Record> {
    /// Query of the page on screen.
    query: ListQuery,
    /// Query of the latest outstanding fetch; becomes `query` once its page
    /// is applied.
    pending: Option<ListQuery>,
    composer: QueryComposer,
    page: Option<Page<T>>,
    selection: SelectionTracker<T::Id>,
    last_error: Option<ListError>,
}

impl<T: Record> ListState<T> {
    /// What the next command builds on. A pending query whose fetch was
    /// settled without being applied is ignored.
    fn working_query(&self, loading: bool) -> ListQuery {
        match &self.pending {
            Some(pending) if loading => pending.clone(),
            _ => self.query.clone(),
        }
    }

    fn pagination(&self, loading: bool) -> PaginationState {
        let (has_next, has_prev) = self
            .page
            .as_ref()
            .map(|page| (page.has_next, page.has_prev))
            .unwrap_or((false, false));
        PaginationState {
            page: self.query.page,
            has_next,
            has_prev,
            loading,
        }
    }

    fn view_state(&self, loading: bool) -> ViewState {
        if self.page.as_ref().is_some_and(|page| !page.is_empty()) {
            return ViewState::Populated;
        }
        if loading {
            return ViewState::Loading;
        }
        if self.last_error.is_some() {
            return ViewState::Error;
        }
        match self.page {
            Some(_) => ViewState::Empty,
            None => ViewState::Loading,
        }
    }

    fn display_rows(&self) -> Vec<T> {
        match (&self.page, &self.query.sort) {
            (Some(page), Some(spec)) => sort_items(&page.items, spec),
            (Some(page), None) => page.items.clone(),
            (None, _) => Vec::new(),
        }
    }
}

enum BulkOp {
    Action {
        action: RowAction,
        payload: Option<serde_json::Value>,
    },
    Delete,
}

pub struct ListController<T: Record> {
    config: ResourceConfig<T>,
    fetcher: FetchOrchestrator,
    fetches: FetchTracker,
    inner: Mutex<ListState<T>>,
    events: broadcast::Sender<ControllerEvent<T::Id>>,
}

impl<T: Record> ListController<T> {
    pub fn new(config: ResourceConfig<T>, api: Arc<dyn ResourceApi>) -> Arc<Self> {
        Self::with_query(config, api, ListQuery::default())
    }

    /// Starts from a prepared query, e.g. filters restored from a link.
    pub fn with_query(
        config: ResourceConfig<T>,
        api: Arc<dyn ResourceApi>,
        query: ListQuery,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let fetcher = FetchOrchestrator::new(api, config.endpoint);
        let composer = QueryComposer::new(config.filter_keys.iter().copied());
        Arc::new(Self {
            config,
            fetcher,
            fetches: FetchTracker::default(),
            inner: Mutex::new(ListState {
                query,
                pending: None,
                composer,
                page: None,
                selection: SelectionTracker::new(),
                last_error: None,
            }),
            events,
        })
    }

    pub fn config(&self) -> &ResourceConfig<T> {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent<T::Id>> {
        self.events.subscribe()
    }

    fn emit(&self, event: ControllerEvent<T::Id>) {
        let _ = self.events.send(event);
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                info!(resource = self.config.name, "{}", notice.message)
            }
            NoticeLevel::Warning => warn!(resource = self.config.name, "{}", notice.message),
            NoticeLevel::Error => error!(resource = self.config.name, "{}", notice.message),
        }
        self.emit(ControllerEvent::Notice(notice));
    }

    /// Fetches the page described by the current query.
    ///
    /// Only the response to the most recently issued fetch is applied; a
    /// failed fetch leaves the previous page in place.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch_with(|_| true).await
    }

    /// Applies `edit` to the working query and fetches the result; nothing is
    /// fetched when `edit` reports no change. The query on screen only moves
    /// to the edited one when its page is applied, so a failed, stale or
    /// abandoned fetch leaves page number and rows consistent.
    async fn fetch_with(&self, edit: impl FnOnce(&mut ListQuery) -> bool) -> FetchOutcome {
        let (fetch, draft, composed) = {
            let mut state = self.inner.lock().await;
            let mut draft = state.working_query(self.fetches.is_loading());
            if !edit(&mut draft) {
                return FetchOutcome::Unchanged;
            }
            let composed = state.composer.preview(&draft);
            draft.page = composed.page();
            state.pending = Some(draft.clone());
            (self.fetches.guard(self.fetches.begin()), draft, composed)
        };
        let token = fetch.token();
        debug!(
            resource = self.config.name,
            token,
            page = composed.page(),
            "issuing list request"
        );

        let result = self.fetcher.fetch_page::<T>(&composed).await;

        let mut state = self.inner.lock().await;
        if !fetch.finish() {
            debug!(
                resource = self.config.name,
                token,
                latest = self.fetches.latest(),
                "discarding stale list response"
            );
            self.emit(ControllerEvent::StaleResponseDiscarded { token });
            return FetchOutcome::Stale;
        }
        state.pending = None;

        match result {
            Ok(page) => {
                state.composer.record(&draft, draft.page);
                state.query = draft;
                let item_count = page.items.len();
                let total_count = page.total_count;
                let pruned = state
                    .selection
                    .replace_page(page.items.iter().map(Record::id));
                state.page = Some(page);
                state.last_error = None;
                let page_number = state.query.page;
                let selected = state.selection.selected();
                drop(state);

                if pruned > 0 {
                    self.emit(ControllerEvent::SelectionChanged { selected });
                }
                self.emit(ControllerEvent::PageLoaded {
                    page: page_number,
                    item_count,
                    total_count,
                });
                FetchOutcome::Loaded {
                    page: page_number,
                    item_count,
                    total_count,
                }
            }
            Err(err) => {
                state.last_error = Some(err.clone());
                drop(state);
                self.notify(Notice::error(
                    err.category(),
                    format!("Failed to load {}: {err}", self.config.name),
                ));
                FetchOutcome::Failed(err)
            }
        }
    }

    pub async fn set_search(&self, search: impl Into<String>) -> FetchOutcome {
        let search = search.into();
        self.fetch_with(move |query| query.set_search(search)).await
    }

    /// Sets one filter; `"all"` removes the constraint.
    pub async fn set_filter(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> FetchOutcome {
        let (key, value) = (key.into(), value.into());
        self.fetch_with(move |query| query.set_filter(key, value)).await
    }

    /// Resets every filter to `"all"` and clears the search text.
    pub async fn clear_filters(&self) -> FetchOutcome {
        self.fetch_with(ListQuery::clear_constraints).await
    }

    /// Column header click. Reorders the loaded page only; the server is not
    /// asked for a re-sorted page. Ignored while a fetch is outstanding.
    pub async fn sort_by(&self, key: &str) -> Option<SortSpec> {
        let mut state = self.inner.lock().await;
        if self.fetches.is_loading() {
            return None;
        }
        let spec = SortSpec::after_click(state.query.sort.as_ref(), key);
        state.query.sort = Some(spec.clone());
        Some(spec)
    }

    pub async fn next_page(&self) -> FetchOutcome {
        let target = self.pagination().await.next_target();
        self.navigate(target).await
    }

    pub async fn prev_page(&self) -> FetchOutcome {
        let target = self.pagination().await.prev_target();
        self.navigate(target).await
    }

    pub async fn go_to(&self, page: u32) -> FetchOutcome {
        let target = self.pagination().await.target(page);
        self.navigate(target).await
    }

    async fn navigate(&self, target: Option<u32>) -> FetchOutcome {
        let Some(page) = target else {
            return FetchOutcome::Unchanged;
        };
        self.fetch_with(|query| {
            query.page = page;
            true
        })
        .await
    }

    /// Returns whether the row is selected afterwards. Rows that are not on
    /// the loaded page cannot be selected.
    pub async fn toggle(&self, id: T::Id) -> bool {
        let (selected_now, selected) = {
            let mut state = self.inner.lock().await;
            let selected_now = state.selection.toggle(id);
            (selected_now, state.selection.selected())
        };
        self.emit(ControllerEvent::SelectionChanged { selected });
        selected_now
    }

    pub async fn select_all(&self, select: bool) {
        let selected = {
            let mut state = self.inner.lock().await;
            state.selection.select_all(select);
            state.selection.selected()
        };
        self.emit(ControllerEvent::SelectionChanged { selected });
    }

    pub async fn clear_selection(&self) {
        self.select_all(false).await;
    }

    pub async fn is_selected(&self, id: T::Id) -> bool {
        self.inner.lock().await.selection.is_selected(id)
    }

    pub async fn selected(&self) -> Vec<T::Id> {
        self.inner.lock().await.selection.selected()
    }

    fn resolve_action(
        &self,
        name: &str,
        feedback: Option<&str>,
    ) -> Result<(RowAction, Option<serde_json::Value>), ListError> {
        let action = self
            .config
            .action(name)
            .copied()
            .ok_or_else(|| ListError::UnknownAction {
                resource: self.config.name.to_string(),
                action: name.to_string(),
            })?;

        let feedback = feedback.map(str::trim).filter(|text| !text.is_empty());
        if action.requires_feedback && feedback.is_none() {
            return Err(ListError::Validation(format!(
                "{} requires feedback text",
                action.label
            )));
        }
        let payload = feedback
            .map(|text| {
                serde_json::to_value(FeedbackPayload {
                    feedback: text.to_string(),
                })
            })
            .transpose()
            .map_err(|err| ListError::Validation(err.to_string()))?;
        Ok((action, payload))
    }

    /// Runs one row action. Validation failures are reported before any
    /// request is made. The list is refetched afterwards either way.
    pub async fn run_action(
        &self,
        id: T::Id,
        action: &str,
        feedback: Option<&str>,
    ) -> Result<(), ListError> {
        let (action, payload) = match self.resolve_action(action, feedback) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.notify(Notice::warning(err.category(), err.to_string()));
                return Err(err);
            }
        };

        let result = self
            .fetcher
            .api()
            .perform(self.config.endpoint, &id.to_string(), action.name, payload)
            .await
            .map_err(ListError::from_transport);

        match &result {
            Ok(()) => self.notify(Notice::success(format!(
                "{} applied to {} {id}",
                action.label, self.config.name
            ))),
            Err(err) => self.notify(Notice::error(
                err.category(),
                format!("{} failed for {} {id}: {err}", action.label, self.config.name),
            )),
        }
        self.reconcile().await;
        result
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), ListError> {
        let result = self
            .fetcher
            .api()
            .delete(self.config.endpoint, &id.to_string())
            .await
            .map_err(ListError::from_transport);

        match &result {
            Ok(()) => self.notify(Notice::success(format!(
                "Deleted {} {id}",
                self.config.name
            ))),
            Err(err) => self.notify(Notice::error(
                err.category(),
                format!("Delete failed for {} {id}: {err}", self.config.name),
            )),
        }
        self.reconcile().await;
        result
    }

    /// Applies `action` to every selected row.
    ///
    /// With nothing selected this issues no request and only warns. Otherwise
    /// each row's result is reported individually, and the list is refetched
    /// so the server decides the final state.
    pub async fn run_bulk_action(
        &self,
        action: &str,
        feedback: Option<&str>,
    ) -> Result<BulkOutcome<T::Id>, ListError> {
        let ids = self.selected().await;
        if ids.is_empty() {
            self.warn_empty_selection();
            return Ok(BulkOutcome::empty());
        }
        let (action, payload) = match self.resolve_action(action, feedback) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.notify(Notice::warning(err.category(), err.to_string()));
                return Err(err);
            }
        };
        Ok(self
            .fan_out(action.label, &ids, BulkOp::Action { action, payload })
            .await)
    }

    pub async fn bulk_delete(&self) -> BulkOutcome<T::Id> {
        let ids = self.selected().await;
        if ids.is_empty() {
            self.warn_empty_selection();
            return BulkOutcome::empty();
        }
        self.fan_out("Delete", &ids, BulkOp::Delete).await
    }

    fn warn_empty_selection(&self) {
        self.notify(Notice::warning(
            NoticeCategory::Validation,
            format!("No {} selected", self.config.name),
        ));
    }

    async fn fan_out(&self, label: &str, ids: &[T::Id], op: BulkOp) -> BulkOutcome<T::Id> {
        let api = self.fetcher.api().clone();
        let endpoint = self.config.endpoint;
        let op = &op;
        let outcome = run_bulk(ids, |id| {
            let api = api.clone();
            async move {
                let id = id.to_string();
                let result = match op {
                    BulkOp::Action { action, payload } => {
                        api.perform(endpoint, &id, action.name, payload.clone())
                            .await
                    }
                    BulkOp::Delete => api.delete(endpoint, &id).await,
                };
                result.map_err(ListError::from_transport)
            }
        })
        .await;

        let name = self.config.name;
        let notice = match outcome.status() {
            BulkStatus::NoOp => Notice::warning(NoticeCategory::Validation, "Nothing to do"),
            BulkStatus::Succeeded => Notice::success(format!(
                "{label} applied to {} {name}",
                outcome.succeeded
            )),
            BulkStatus::Partial | BulkStatus::Failed => {
                let failed = outcome
                    .failed_ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let category = outcome
                    .last_error
                    .as_deref()
                    .map(classify_message)
                    .unwrap_or(NoticeCategory::Unknown);
                Notice::error(
                    category,
                    format!(
                        "{label} failed for {} of {} {name} (ids {failed}); {} succeeded",
                        outcome.failed_ids.len(),
                        outcome.attempted,
                        outcome.succeeded
                    ),
                )
            }
        };
        self.notify(notice);
        self.emit(ControllerEvent::BulkCompleted(outcome.clone()));
        self.reconcile().await;
        outcome
    }

    /// After a mutation: drop the selection and let the server be
    /// authoritative.
    async fn reconcile(&self) {
        self.clear_selection().await;
        self.refresh().await;
    }

    /// CSV of the loaded page in display order.
    pub async fn export_csv(&self, date: NaiveDate) -> Result<CsvExport, ListError> {
        let rows = self.inner.lock().await.display_rows();
        let contents = to_csv(&rows, &self.config.columns)?;
        let file_name = export_file_name(self.config.name, date);
        info!(
            resource = self.config.name,
            rows = rows.len(),
            file = %file_name,
            "exported loaded page"
        );
        Ok(CsvExport {
            file_name,
            contents,
        })
    }

    pub async fn pagination(&self) -> PaginationState {
        self.inner.lock().await.pagination(self.fetches.is_loading())
    }

    pub async fn view_state(&self) -> ViewState {
        self.inner.lock().await.view_state(self.fetches.is_loading())
    }

    pub async fn query(&self) -> ListQuery {
        self.inner.lock().await.query.clone()
    }

    pub async fn snapshot(&self) -> ListSnapshot<T> {
        let state = self.inner.lock().await;
        ListSnapshot {
            query: state.query.clone(),
            rows: state.display_rows(),
            total_count: state.page.as_ref().map_or(0, |page| page.total_count),
            selected: state.selection.selected(),
            all_selected: state.selection.all_selected(),
            pagination: state.pagination(self.fetches.is_loading()),
            view: state.view_state(self.fetches.is_loading()),
            last_error: state.last_error.clone(),
        }
    }
}

/// Search box wired to a controller through a [`Debouncer`].
///
/// Keystrokes are coalesced and only the last value of a burst reaches
/// [`ListController::set_search`]. Dropping it cancels any pending value.
pub struct DebouncedSearch {
    debouncer: Debouncer<String>,
    forwarder: JoinHandle<()>,
}

impl DebouncedSearch {
    pub fn attach<T: Record>(controller: Arc<ListController<T>>, delay: Duration) -> Self {
        let (debouncer, mut settled) = Debouncer::new(delay);
        let forwarder = tokio::spawn(async move {
            while let Some(text) = settled.recv().await {
                controller.set_search(text).await;
            }
        });
        Self {
            debouncer,
            forwarder,
        }
    }

    pub fn input(&mut self, text: impl Into<String>) {
        self.debouncer.push(text.into());
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.debouncer.cancel();
        self.forwarder.abort();
    }
}
