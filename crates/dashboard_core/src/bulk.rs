//! Fan-out of one row action over many ids.
//!
//! Every request is awaited to completion and its outcome recorded on its
//! own, so a failing request never hides the ones that succeeded. Requests
//! are independent server-side mutations: there is no ordering between them
//! and no rollback.

use std::{collections::BTreeSet, future::Future};

use futures::future::join_all;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStatus {
    /// Nothing was selected; no request was issued.
    NoOp,
    Succeeded,
    /// Some requests succeeded and some failed. The server state is only
    /// known after a refetch.
    Partial,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome<Id> {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed_ids: BTreeSet<Id>,
    pub last_error: Option<String>,
}

impl<Id: Ord> BulkOutcome<Id> {
    pub fn empty() -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
            failed_ids: BTreeSet::new(),
            last_error: None,
        }
    }

    pub fn status(&self) -> BulkStatus {
        if self.attempted == 0 {
            BulkStatus::NoOp
        } else if self.failed_ids.is_empty() {
            BulkStatus::Succeeded
        } else if self.succeeded > 0 {
            BulkStatus::Partial
        } else {
            BulkStatus::Failed
        }
    }
}

/// Runs `action` once per id concurrently and aggregates every outcome.
///
/// An empty id list issues nothing and yields an outcome whose status is
/// [`BulkStatus::NoOp`].
pub async fn run_bulk<Id, F, Fut, E>(ids: &[Id], action: F) -> BulkOutcome<Id>
where
    Id: Copy + Ord + std::fmt::Display,
    F: Fn(Id) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    if ids.is_empty() {
        warn!("bulk action invoked with an empty selection");
        return BulkOutcome::empty();
    }

    let requests = ids.iter().copied().map(|id| {
        let request = action(id);
        async move { (id, request.await) }
    });
    let settled = join_all(requests).await;

    let mut outcome = BulkOutcome::empty();
    outcome.attempted = settled.len();
    for (id, result) in settled {
        match result {
            Ok(()) => outcome.succeeded += 1,
            Err(err) => {
                warn!(%id, error = %err, "bulk sub-request failed");
                outcome.last_error = Some(err.to_string());
                outcome.failed_ids.insert(id);
            }
        }
    }

    info!(
        attempted = outcome.attempted,
        succeeded = outcome.succeeded,
        failed = outcome.failed_ids.len(),
        "bulk action settled"
    );
    outcome
}
