use clap::Parser;
use shared::list::SortDirection;

use super::*;

#[test]
fn list_flags_build_the_initial_query() {
    let cli = Cli::try_parse_from([
        "admin-cli",
        "list",
        "artworks",
        "--page",
        "3",
        "--search",
        "  dusk ",
        "--filter",
        "approval_status=pending",
        "--filter",
        "category=all",
        "--sort",
        "artist_name",
        "--desc",
    ])
    .expect("parse");

    let Command::List { resource, query } = cli.command else {
        panic!("expected list");
    };
    assert_eq!(resource, ResourceKind::Artworks);

    let query = query.to_list_query();
    assert_eq!(query.page, 3);
    assert_eq!(query.effective_search(), Some("dusk"));
    assert_eq!(query.filter("approval_status"), "pending");
    assert_eq!(query.active_filters().count(), 1);
    let sort = query.sort.expect("sort");
    assert_eq!(sort.key, "artist_name");
    assert_eq!(sort.direction, SortDirection::Desc);
}

#[test]
fn bulk_ids_are_comma_separated() {
    let cli = Cli::try_parse_from([
        "admin-cli",
        "--api-url",
        "http://localhost:8000/api",
        "bulk",
        "projects",
        "reject",
        "--ids",
        "4,5,9",
        "--feedback",
        "Out of scope",
    ])
    .expect("parse");

    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8000/api"));
    let Command::Bulk {
        resource,
        action,
        ids,
        feedback,
        ..
    } = cli.command
    else {
        panic!("expected bulk");
    };
    assert_eq!(resource, ResourceKind::Projects);
    assert_eq!(action, "reject");
    assert_eq!(ids, vec![4, 5, 9]);
    assert_eq!(feedback.as_deref(), Some("Out of scope"));
}

#[test]
fn delete_requires_ids() {
    assert!(Cli::try_parse_from(["admin-cli", "delete", "members"]).is_err());
}

#[test]
fn desc_without_sort_is_rejected() {
    assert!(Cli::try_parse_from(["admin-cli", "list", "events", "--desc"]).is_err());
}

#[test]
fn unknown_resource_is_rejected() {
    assert!(Cli::try_parse_from(["admin-cli", "list", "invoices"]).is_err());
}

#[test]
fn filter_values_must_be_key_value_pairs() {
    assert_eq!(
        parse_filter("role = admin"),
        Ok(("role".to_string(), "admin".to_string()))
    );
    assert!(parse_filter("role").is_err());
    assert!(parse_filter("=admin").is_err());
}
