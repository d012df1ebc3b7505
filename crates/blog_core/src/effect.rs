#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the page at `locator` and report back with `PageLoaded` or `PageFailed`.
    FetchPage { locator: String },
}
