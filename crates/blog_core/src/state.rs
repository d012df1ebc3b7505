use crate::view_model::{FeedViewModel, PostCardView};
use crate::{AppendOutcome, PostSummaryPage, PostSummaryPaginator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    /// A page fetch is in flight; further load requests are ignored.
    Loading,
}

/// Feed state owned by exactly one controller and advanced by [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedState {
    paginator: PostSummaryPaginator,
    phase: FeedPhase,
    last_error: Option<String>,
    dirty: bool,
}

impl FeedState {
    pub fn new(initial: PostSummaryPage) -> Self {
        Self {
            paginator: PostSummaryPaginator::new(initial),
            phase: FeedPhase::Idle,
            last_error: None,
            dirty: true,
        }
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    pub fn paginator(&self) -> &PostSummaryPaginator {
        &self.paginator
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True once no further page exists and nothing is in flight.
    pub fn is_exhausted(&self) -> bool {
        self.phase == FeedPhase::Idle && !self.paginator.has_next_page()
    }

    pub fn view(&self) -> FeedViewModel {
        FeedViewModel {
            posts: self
                .paginator
                .items()
                .iter()
                .map(PostCardView::from_summary)
                .collect(),
            show_load_more: self.phase == FeedPhase::Idle && self.paginator.has_next_page(),
            loading: self.phase == FeedPhase::Loading,
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Moves to `Loading` and returns the locator to fetch, if a load may start.
    pub(crate) fn begin_load(&mut self) -> Option<String> {
        if self.phase != FeedPhase::Idle {
            return None;
        }
        let locator = self.paginator.next_page_token()?.to_string();
        self.phase = FeedPhase::Loading;
        self.last_error = None;
        self.mark_dirty();
        Some(locator)
    }

    pub(crate) fn finish_load(&mut self, page: PostSummaryPage) -> Option<AppendOutcome> {
        if self.phase != FeedPhase::Loading {
            return None;
        }
        self.phase = FeedPhase::Idle;
        let outcome = self.paginator.append_page(page);
        self.mark_dirty();
        Some(outcome)
    }

    pub(crate) fn fail_load(&mut self, message: String) -> bool {
        if self.phase != FeedPhase::Loading {
            return false;
        }
        self.phase = FeedPhase::Idle;
        self.last_error = Some(message);
        self.mark_dirty();
        true
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
