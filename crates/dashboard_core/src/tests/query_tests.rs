use shared::list::{ListQuery, SortSpec, FILTER_ALL};

use crate::query::{compose_with_order, QueryComposer};

fn artwork_composer() -> QueryComposer {
    QueryComposer::new(["approval_status", "category"])
}

#[test]
fn composes_page_search_then_declared_filters() {
    let mut query = ListQuery::default();
    query.set_search("art");
    query.set_filter("category", "painting");
    query.set_filter("approval_status", "pending");

    let composed = artwork_composer().compose(&query);
    assert_eq!(
        composed.to_query_string(),
        "page=1&search=art&approval_status=pending&category=painting"
    );
}

#[test]
fn omits_all_sentinel_and_blank_search() {
    let mut query = ListQuery::default();
    query.search = "   ".into();
    query
        .filters
        .insert("approval_status".into(), FILTER_ALL.into());

    let composed = artwork_composer().compose(&query);
    assert_eq!(composed.to_query_string(), "page=1");
    assert!(composed.get("approval_status").is_none());
}

#[test]
fn undeclared_filters_follow_declared_ones_alphabetically() {
    let mut query = ListQuery::default();
    query.set_filter("zeta", "1");
    query.set_filter("alpha", "2");
    query.set_filter("category", "sculpture");

    let composed = compose_with_order(&["category".to_string()], &query, 2);
    assert_eq!(
        composed.to_query_string(),
        "page=2&category=sculpture&alpha=2&zeta=1"
    );
}

#[test]
fn identical_inputs_compose_identically() {
    let mut query = ListQuery::default();
    query.set_search("She said \"hi\"");
    query.set_filter("category", "mixed media");

    let a = artwork_composer().compose(&query).to_query_string();
    let b = artwork_composer().compose(&query).to_query_string();
    assert_eq!(a, b);
    assert!(a.contains("category=mixed+media"));
}

#[test]
fn filter_change_forces_first_page() {
    let mut composer = artwork_composer();
    let mut query = ListQuery {
        page: 3,
        ..ListQuery::default()
    };
    assert_eq!(composer.compose(&query).page(), 3);

    // A caller that forgets to reset the page still gets page 1.
    query
        .filters
        .insert("approval_status".into(), "pending".into());
    let composed = composer.compose(&query);
    assert_eq!(composed.to_query_string(), "page=1&approval_status=pending");
}

#[test]
fn unchanged_constraints_keep_requested_page() {
    let mut composer = artwork_composer();
    let mut query = ListQuery::default();
    query.set_filter("category", "print");
    composer.compose(&query);

    query.page = 4;
    query.sort = Some(SortSpec::asc("title"));
    assert_eq!(composer.compose(&query).page(), 4);
}

#[test]
fn sort_is_not_sent_to_the_server() {
    let query = ListQuery {
        sort: Some(SortSpec::desc("artist_name")),
        ..ListQuery::default()
    };
    let composed = artwork_composer().compose(&query);
    assert_eq!(composed.params().len(), 1);
}

#[test]
fn preview_leaves_the_baseline_alone() {
    let mut composer = artwork_composer();
    let shown = ListQuery {
        page: 2,
        ..ListQuery::default()
    };
    composer.compose(&shown);

    let mut attempted = shown.clone();
    attempted.set_filter("category", "print");
    assert_eq!(composer.preview(&attempted).page(), 1);

    // The filtered query was never recorded, so the shown one keeps its page.
    let next = ListQuery {
        page: 3,
        ..ListQuery::default()
    };
    assert_eq!(composer.preview(&next).page(), 3);

    composer.record(&attempted, 1);
    assert_eq!(composer.preview(&next).page(), 1);
}
