use serde::{Deserialize, Serialize};

/// Display-ready summary of a post, as shown in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Stable, URL-safe identifier (the CMS `uid`).
    pub identifier: String,
    /// Already formatted, e.g. `19 Apr 2021`.
    pub publication_date: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One page of summaries. `next_page_token == None` means no further pages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostSummaryPage {
    pub next_page_token: Option<String>,
    pub items: Vec<PostSummary>,
}

impl PostSummaryPage {
    pub fn new(items: Vec<PostSummary>, next_page_token: Option<String>) -> Self {
        Self {
            next_page_token,
            items,
        }
    }

    /// A page with no successor.
    pub fn last(items: Vec<PostSummary>) -> Self {
        Self::new(items, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyFragment {
    /// Pre-rendered HTML produced by the rich-text renderer.
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body_fragments: Vec<BodyFragment>,
}

/// A fully prepared post, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDocument {
    pub identifier: String,
    pub publication_date: String,
    pub title: String,
    pub banner_url: Option<String>,
    pub author: String,
    pub sections: Vec<Section>,
}
