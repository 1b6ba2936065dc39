use shared::domain::ArtworkId;

use crate::selection::SelectionTracker;

fn tracker_with_page(ids: &[i64]) -> SelectionTracker<ArtworkId> {
    let mut tracker = SelectionTracker::new();
    tracker.replace_page(ids.iter().copied().map(ArtworkId));
    tracker
}

#[test]
fn select_all_selects_exactly_the_loaded_page() {
    let mut tracker = tracker_with_page(&[1, 2, 3]);
    tracker.select_all(true);
    assert_eq!(
        tracker.selected(),
        vec![ArtworkId(1), ArtworkId(2), ArtworkId(3)]
    );
    assert!(tracker.all_selected());

    tracker.select_all(false);
    assert!(tracker.is_empty());
    assert!(!tracker.all_selected());
}

#[test]
fn toggle_flips_membership() {
    let mut tracker = tracker_with_page(&[1, 2]);
    assert!(tracker.toggle(ArtworkId(2)));
    assert!(tracker.is_selected(ArtworkId(2)));
    assert!(!tracker.toggle(ArtworkId(2)));
    assert!(!tracker.is_selected(ArtworkId(2)));
}

#[test]
fn ids_outside_the_page_cannot_be_selected() {
    let mut tracker = tracker_with_page(&[1, 2]);
    assert!(!tracker.toggle(ArtworkId(99)));
    assert!(tracker.is_empty());
}

#[test]
fn new_page_prunes_ids_no_longer_present() {
    let mut tracker = tracker_with_page(&[1, 2, 3]);
    tracker.select_all(true);

    let pruned = tracker.replace_page([3, 4, 5].map(ArtworkId));
    assert_eq!(pruned, 2);
    assert_eq!(tracker.selected(), vec![ArtworkId(3)]);
    assert!(!tracker.all_selected());
}

#[test]
fn empty_page_is_never_all_selected() {
    let mut tracker = tracker_with_page(&[]);
    tracker.select_all(true);
    assert!(tracker.is_empty());
    assert!(!tracker.all_selected());
}
