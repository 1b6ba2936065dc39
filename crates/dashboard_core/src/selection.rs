use std::collections::BTreeSet;

/// Selected row ids, always a subset of the ids on the loaded page.
///
/// "Select all" means every row on the loaded page, not every row matching
/// the current filters across pages.
#[derive(Debug, Clone)]
pub struct SelectionTracker<Id> {
    visible: Vec<Id>,
    selected: BTreeSet<Id>,
}

impl<Id> Default for SelectionTracker<Id> {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            selected: BTreeSet::new(),
        }
    }
}

impl<Id: Copy + Ord> SelectionTracker<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the ids of a newly loaded page and prunes selected ids that
    /// are no longer on it. Returns how many ids were pruned.
    pub fn replace_page<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = Id>,
    {
        self.visible = ids.into_iter().collect();
        let before = self.selected.len();
        let visible = &self.visible;
        self.selected.retain(|id| visible.contains(id));
        before - self.selected.len()
    }

    /// Flips one row. Ids not on the loaded page are ignored.
    /// Returns whether the row is selected afterwards.
    pub fn toggle(&mut self, id: Id) -> bool {
        if !self.visible.contains(&id) {
            return false;
        }
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn select_all(&mut self, select: bool) {
        if select {
            self.selected = self.visible.iter().copied().collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: Id) -> bool {
        self.selected.contains(&id)
    }

    /// True when the page is non-empty and every row on it is selected.
    pub fn all_selected(&self) -> bool {
        !self.visible.is_empty() && self.selected.len() == self.visible.len()
    }

    pub fn selected(&self) -> Vec<Id> {
        self.selected.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
