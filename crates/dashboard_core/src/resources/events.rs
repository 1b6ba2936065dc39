use shared::{domain::EventId, protocol::Event};

use super::{format_timestamp, ResourceConfig, RowAction};
use crate::{
    export::CsvColumn,
    record::{FieldValue, Record},
};

const ACTIONS: &[RowAction] = &[
    RowAction::plain("publish", "Publish"),
    RowAction::plain("cancel", "Cancel"),
];

impl Record for Event {
    type Id = EventId;

    fn id(&self) -> EventId {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.0.into()),
            "title" => Some(self.title.as_str().into()),
            "event_type" => self.event_type.as_deref().map(FieldValue::from),
            "location" => self.location.as_deref().map(FieldValue::from),
            "start_date" => Some(self.start_date.into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }
}

pub fn events() -> ResourceConfig<Event> {
    ResourceConfig {
        name: "events",
        endpoint: "events",
        filter_keys: &["status", "event_type"],
        actions: ACTIONS,
        columns: vec![
            CsvColumn::new("ID", |e: &Event| e.id.to_string()),
            CsvColumn::new("Title", |e: &Event| e.title.clone()),
            CsvColumn::new("Type", |e: &Event| e.event_type.clone().unwrap_or_default()),
            CsvColumn::new("Location", |e: &Event| e.location.clone().unwrap_or_default()),
            CsvColumn::new("Starts", |e: &Event| format_timestamp(&e.start_date)),
            CsvColumn::new("Status", |e: &Event| e.status.to_string()),
        ],
    }
}
