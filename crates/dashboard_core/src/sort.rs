//! Client-side ordering of the currently loaded page.

use std::cmp::Ordering;

use shared::list::{SortDirection, SortSpec};

use crate::record::Record;

/// Compares two rows on `spec.key`. A missing value on either side is
/// treated as equal so the rows keep their server order.
pub fn compare_by<T: Record>(a: &T, b: &T, spec: &SortSpec) -> Ordering {
    let (Some(left), Some(right)) = (a.field(&spec.key), b.field(&spec.key)) else {
        return Ordering::Equal;
    };
    let ordering = left.natural_cmp(&right);
    match spec.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Returns `items` stably reordered by `spec`.
pub fn sort_items<T: Record>(items: &[T], spec: &SortSpec) -> Vec<T> {
    let mut sorted = items.to_vec();
    stable_insertion_sort(&mut sorted, |a, b| compare_by(a, b, spec));
    sorted
}

// Comparator is not a total order; insertion sort keeps equal items in place.
fn stable_insertion_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
