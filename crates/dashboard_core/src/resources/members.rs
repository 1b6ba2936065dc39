use shared::{domain::MemberId, protocol::Member};

use super::{format_timestamp, yes_no, ResourceConfig, RowAction};
use crate::{
    export::CsvColumn,
    record::{FieldValue, Record},
};

const ACTIONS: &[RowAction] = &[
    RowAction::plain("activate", "Activate"),
    RowAction::plain("deactivate", "Deactivate"),
];

impl Record for Member {
    type Id = MemberId;

    fn id(&self) -> MemberId {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.0.into()),
            "username" => Some(self.username.as_str().into()),
            "full_name" => Some(self.full_name().into()),
            "email" => Some(self.email.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            "is_active" => Some(self.is_active.into()),
            "date_joined" => Some(self.date_joined.into()),
            _ => None,
        }
    }
}

pub fn members() -> ResourceConfig<Member> {
    ResourceConfig {
        name: "members",
        endpoint: "members",
        filter_keys: &["role", "is_active"],
        actions: ACTIONS,
        columns: vec![
            CsvColumn::new("ID", |m: &Member| m.id.to_string()),
            CsvColumn::new("Username", |m: &Member| m.username.clone()),
            CsvColumn::new("Full Name", |m: &Member| m.full_name()),
            CsvColumn::new("Email", |m: &Member| m.email.clone()),
            CsvColumn::new("Role", |m: &Member| m.role.to_string()),
            CsvColumn::new("Active", |m: &Member| yes_no(m.is_active)),
            CsvColumn::new("Joined", |m: &Member| format_timestamp(&m.date_joined)),
        ],
    }
}
