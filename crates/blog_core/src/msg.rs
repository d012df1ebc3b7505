use crate::PostSummaryPage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for the next page of posts.
    LoadMoreClicked,
    /// Engine delivered the requested page, already transformed.
    PageLoaded(PostSummaryPage),
    /// Engine failed to fetch or transform the requested page.
    PageFailed(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
