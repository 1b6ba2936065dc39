use chrono::NaiveDate;
use csv::ReaderBuilder;
use shared::protocol::Artwork;

use crate::{
    export::{export_file_name, to_csv, CsvColumn},
    resources::artworks,
    support::artwork,
};

fn page_of(n: i64) -> Vec<Artwork> {
    (1..=n)
        .map(|id| artwork(id, &format!("Piece {id}"), "Ana", Some("print")))
        .collect()
}

#[test]
fn quotes_every_field_and_doubles_embedded_quotes() {
    let mut items = page_of(25);
    items[4].title = "She said \"hi\", ok".to_string();

    let csv = to_csv(&items, &artworks().columns).expect("csv");
    assert_eq!(csv.lines().count(), 26);
    assert!(csv.contains(r#""She said ""hi"", ok""#));
    assert!(csv.starts_with(r#""ID","Title","Artist","Category","Status","Price","Submitted""#));
}

#[test]
fn output_reparses_to_the_original_fields() {
    let mut items = page_of(3);
    items[1].title = "Comma, \"quote\" and more".to_string();
    items[2].artist_name = "O\"Neil".to_string();

    let columns = [
        CsvColumn::new("Title", |a: &Artwork| a.title.clone()),
        CsvColumn::new("Artist", |a: &Artwork| a.artist_name.clone()),
    ];
    let csv = to_csv(&items, &columns).expect("csv");

    let mut reader = ReaderBuilder::new().from_reader(csv.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Title", "Artist"]);

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|record| {
            record
                .expect("record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "Comma, \"quote\" and more");
    assert_eq!(rows[2][1], "O\"Neil");
}

#[test]
fn empty_page_exports_only_the_header() {
    let csv = to_csv::<Artwork>(&[], &artworks().columns).expect("csv");
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn file_name_embeds_iso_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
    assert_eq!(export_file_name("artworks", date), "artworks_2024-03-09.csv");
}
