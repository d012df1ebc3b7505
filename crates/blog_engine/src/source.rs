use std::collections::HashSet;

use blog_logging::blog_warn;

use crate::{ContentError, RawPostDocument, RawPostPage};

/// The content-fetch collaborator: where pages and documents come from.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Locator of the first listing page with `page_size` records.
    async fn first_page_locator(&self, page_size: u32) -> Result<String, ContentError>;

    /// Fetches and validates the page at an opaque locator.
    async fn fetch_page(&self, locator: &str) -> Result<RawPostPage, ContentError>;

    /// Fetches and validates one document by identifier.
    async fn fetch_document(&self, identifier: &str) -> Result<RawPostDocument, ContentError>;

    /// Follows every page and collects identifiers in listing order.
    async fn list_all_identifiers(&self, page_size: u32) -> Result<Vec<String>, ContentError> {
        let mut identifiers = Vec::new();
        let mut visited = HashSet::new();
        let mut locator = Some(self.first_page_locator(page_size).await?);
        while let Some(current) = locator.take() {
            if !visited.insert(current.clone()) {
                blog_warn!("Pagination revisited {current}; stopping");
                break;
            }
            let page = self.fetch_page(&current).await?;
            identifiers.extend(page.results.into_iter().map(|record| record.uid));
            locator = page.next_page;
        }
        Ok(identifiers)
    }
}
