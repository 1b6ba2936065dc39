use shared::{domain::ArtworkId, protocol::Artwork};

use super::{format_timestamp, ResourceConfig, RowAction};
use crate::{
    export::CsvColumn,
    record::{FieldValue, Record},
};

const ACTIONS: &[RowAction] = &[
    RowAction::plain("approve", "Approve"),
    RowAction::with_feedback("reject", "Reject"),
];

impl Record for Artwork {
    type Id = ArtworkId;

    fn id(&self) -> ArtworkId {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.0.into()),
            "title" => Some(self.title.as_str().into()),
            "artist_name" => Some(self.artist_name.as_str().into()),
            "category" => self.category.as_deref().map(FieldValue::from),
            "approval_status" => Some(self.approval_status.as_str().into()),
            "price" => self.price.map(FieldValue::from),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

pub fn artworks() -> ResourceConfig<Artwork> {
    ResourceConfig {
        name: "artworks",
        endpoint: "artworks",
        filter_keys: &["approval_status", "category"],
        actions: ACTIONS,
        columns: vec![
            CsvColumn::new("ID", |a: &Artwork| a.id.to_string()),
            CsvColumn::new("Title", |a: &Artwork| a.title.clone()),
            CsvColumn::new("Artist", |a: &Artwork| a.artist_name.clone()),
            CsvColumn::new("Category", |a: &Artwork| {
                a.category.clone().unwrap_or_default()
            }),
            CsvColumn::new("Status", |a: &Artwork| a.approval_status.to_string()),
            CsvColumn::new("Price", |a: &Artwork| {
                a.price.map(|price| format!("{price:.2}")).unwrap_or_default()
            }),
            CsvColumn::new("Submitted", |a: &Artwork| format_timestamp(&a.created_at)),
        ],
    }
}
