//! Events published by a list controller for whatever renders it.

use crate::{bulk::BulkOutcome, error::NoticeCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, user-visible message (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub category: NoticeCategory,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            category: NoticeCategory::Unknown,
            message: message.into(),
        }
    }

    pub fn warning(category: NoticeCategory, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            category,
            message: message.into(),
        }
    }

    pub fn error(category: NoticeCategory, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            category,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ControllerEvent<Id> {
    PageLoaded {
        page: u32,
        item_count: usize,
        total_count: u64,
    },
    StaleResponseDiscarded {
        token: u64,
    },
    SelectionChanged {
        selected: Vec<Id>,
    },
    BulkCompleted(BulkOutcome<Id>),
    Notice(Notice),
}
