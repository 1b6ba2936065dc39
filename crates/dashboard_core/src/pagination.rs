/// Navigation state derived from the last applied page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub loading: bool,
}

impl PaginationState {
    pub fn can_next(&self) -> bool {
        self.has_next && !self.loading
    }

    pub fn can_prev(&self) -> bool {
        self.has_prev && !self.loading && self.page > 1
    }

    /// Page to fetch for a jump to `page`, or `None` when the move is not
    /// allowed: while loading, towards a side the server reported as
    /// exhausted, below page 1, or onto the current page.
    pub fn target(&self, page: u32) -> Option<u32> {
        if page == 0 || page == self.page {
            return None;
        }
        let allowed = if page > self.page {
            self.can_next()
        } else {
            self.can_prev()
        };
        allowed.then_some(page)
    }

    pub fn next_target(&self) -> Option<u32> {
        self.target(self.page.saturating_add(1))
    }

    pub fn prev_target(&self) -> Option<u32> {
        self.target(self.page.saturating_sub(1))
    }
}
