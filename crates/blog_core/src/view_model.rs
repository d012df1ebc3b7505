use crate::{PostDocument, PostSummary, ReadTimeEstimator, WordCounter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedViewModel {
    pub posts: Vec<PostCardView>,
    /// Only offered when a next page exists and no load is in flight.
    pub show_load_more: bool,
    pub loading: bool,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCardView {
    pub href: String,
    pub title: String,
    pub subtitle: String,
    pub publication_date: String,
    pub author: String,
}

impl PostCardView {
    pub fn from_summary(summary: &PostSummary) -> Self {
        Self {
            href: post_path(&summary.identifier),
            title: summary.title.clone(),
            subtitle: summary.subtitle.clone(),
            publication_date: summary.publication_date.clone(),
            author: summary.author.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub heading: String,
    pub fragments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostViewModel {
    pub href: String,
    pub title: String,
    pub publication_date: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub read_time_minutes: u32,
    pub sections: Vec<SectionView>,
}

impl PostViewModel {
    pub fn from_document(document: &PostDocument, counter: &dyn WordCounter) -> Self {
        let read_time_minutes = ReadTimeEstimator::new(counter).estimate(&document.sections);
        Self {
            href: post_path(&document.identifier),
            title: document.title.clone(),
            publication_date: document.publication_date.clone(),
            author: document.author.clone(),
            banner_url: document
                .banner_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            read_time_minutes,
            sections: document
                .sections
                .iter()
                .map(|section| SectionView {
                    heading: section.heading.clone(),
                    fragments: section
                        .body_fragments
                        .iter()
                        .map(|fragment| fragment.markup.clone())
                        .collect(),
                })
                .collect(),
        }
    }

    /// Label shown next to the clock icon, e.g. `4 min`.
    pub fn read_time_label(&self) -> String {
        format!("{} min", self.read_time_minutes)
    }
}

/// Route of a single post page.
pub fn post_path(identifier: &str) -> String {
    format!("/post/{identifier}")
}
