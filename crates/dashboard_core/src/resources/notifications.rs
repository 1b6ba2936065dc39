use shared::{domain::NotificationId, protocol::Notification};

use super::{format_timestamp, yes_no, ResourceConfig, RowAction};
use crate::{
    export::CsvColumn,
    record::{FieldValue, Record},
};

const ACTIONS: &[RowAction] = &[RowAction::plain("mark_read", "Mark as read")];

impl Record for Notification {
    type Id = NotificationId;

    fn id(&self) -> NotificationId {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.0.into()),
            "title" => Some(self.title.as_str().into()),
            "notification_type" => Some(self.notification_type.as_str().into()),
            "is_read" => Some(self.is_read.into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

pub fn notifications() -> ResourceConfig<Notification> {
    ResourceConfig {
        name: "notifications",
        endpoint: "notifications",
        filter_keys: &["notification_type", "is_read"],
        actions: ACTIONS,
        columns: vec![
            CsvColumn::new("ID", |n: &Notification| n.id.to_string()),
            CsvColumn::new("Title", |n: &Notification| n.title.clone()),
            CsvColumn::new("Type", |n: &Notification| n.notification_type.to_string()),
            CsvColumn::new("Read", |n: &Notification| yes_no(n.is_read)),
            CsvColumn::new("Created", |n: &Notification| format_timestamp(&n.created_at)),
        ],
    }
}
