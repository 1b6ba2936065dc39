use shared::{domain::ProjectId, protocol::Project};

use super::{ResourceConfig, RowAction};
use crate::{
    export::CsvColumn,
    record::{FieldValue, Record},
};

const ACTIONS: &[RowAction] = &[
    RowAction::plain("approve", "Approve"),
    RowAction::with_feedback("reject", "Reject"),
];

impl Record for Project {
    type Id = ProjectId;

    fn id(&self) -> ProjectId {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.0.into()),
            "title" => Some(self.title.as_str().into()),
            "lead_name" => self.lead_name.as_deref().map(FieldValue::from),
            "status" => Some(self.status.as_str().into()),
            "start_date" => self.start_date.map(FieldValue::from),
            "member_count" => Some(i64::from(self.member_count).into()),
            _ => None,
        }
    }
}

pub fn projects() -> ResourceConfig<Project> {
    ResourceConfig {
        name: "projects",
        endpoint: "projects",
        filter_keys: &["status"],
        actions: ACTIONS,
        columns: vec![
            CsvColumn::new("ID", |p: &Project| p.id.to_string()),
            CsvColumn::new("Title", |p: &Project| p.title.clone()),
            CsvColumn::new("Lead", |p: &Project| p.lead_name.clone().unwrap_or_default()),
            CsvColumn::new("Status", |p: &Project| p.status.to_string()),
            CsvColumn::new("Start", |p: &Project| {
                p.start_date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            }),
            CsvColumn::new("Members", |p: &Project| p.member_count.to_string()),
        ],
    }
}
