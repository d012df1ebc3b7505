use crate::{PostSummary, PostSummaryPage};

/// Result of merging a page into a [`PostSummaryPaginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Items were appended; `count` may be zero for an empty page.
    Appended { count: usize },
    /// No next page was pending, so nothing changed.
    Exhausted,
}

/// Append-only list of post summaries assembled from successive pages.
///
/// Existing items are never reordered or removed. The paginator does not
/// deduplicate; identifiers are trusted to be unique at the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostSummaryPaginator {
    accumulated: Vec<PostSummary>,
    next_page_token: Option<String>,
}

impl PostSummaryPaginator {
    pub fn new(initial: PostSummaryPage) -> Self {
        Self {
            accumulated: initial.items,
            next_page_token: initial.next_page_token,
        }
    }

    pub fn items(&self) -> &[PostSummary] {
        &self.accumulated
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page_token.is_some()
    }

    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// Appends a fetched page after all existing items and adopts its token.
    ///
    /// A no-op when the paginator is already exhausted.
    pub fn append_page(&mut self, page: PostSummaryPage) -> AppendOutcome {
        if self.next_page_token.is_none() {
            return AppendOutcome::Exhausted;
        }
        let count = page.items.len();
        self.accumulated.extend(page.items);
        self.next_page_token = page.next_page_token;
        AppendOutcome::Appended { count }
    }

    pub fn into_items(self) -> Vec<PostSummary> {
        self.accumulated
    }
}
