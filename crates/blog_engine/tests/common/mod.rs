#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use blog_engine::{
    parse_document, parse_page, ContentError, ContentSource, FailureKind, FetchError,
    RawPostDocument, RawPostPage,
};
use serde_json::{json, Value};

pub fn init_logging() {
    blog_logging::initialize_for_tests();
}

pub fn record(uid: &str, date: &str) -> Value {
    json!({
        "uid": uid,
        "first_publication_date": date,
        "data": {
            "title": format!("Title {uid}"),
            "subtitle": format!("Subtitle {uid}"),
            "author": "Joseph Oliveira"
        }
    })
}

pub fn page_json(records: Vec<Value>, next: Option<&str>) -> Value {
    json!({ "next_page": next, "results": records })
}

pub fn document_json(uid: &str, content: Value) -> Value {
    json!({
        "uid": uid,
        "first_publication_date": "2021-03-25T19:25:28+0000",
        "data": {
            "title": format!("Title {uid}"),
            "author": "Danilo Vieira",
            "banner": { "url": format!("https://images.test/{uid}.png") },
            "content": content
        }
    })
}

/// In-memory content source keyed by locator and uid.
#[derive(Default)]
pub struct FakeSource {
    pub first_locator: String,
    pages: HashMap<String, Value>,
    documents: HashMap<String, Value>,
    failing: HashMap<String, FailureKind>,
    pub page_fetches: AtomicUsize,
}

impl FakeSource {
    pub fn new(first_locator: &str) -> Self {
        Self {
            first_locator: first_locator.to_string(),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, locator: &str, page: Value) -> Self {
        self.pages.insert(locator.to_string(), page);
        self
    }

    pub fn with_document(mut self, uid: &str, document: Value) -> Self {
        self.documents.insert(uid.to_string(), document);
        self
    }

    pub fn failing_on(mut self, key: &str, kind: FailureKind) -> Self {
        self.failing.insert(key.to_string(), kind);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }

    fn check(&self, key: &str) -> Result<(), FetchError> {
        match self.failing.get(key) {
            Some(kind) => Err(FetchError::new(kind.clone(), "injected failure")),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for FakeSource {
    async fn first_page_locator(&self, _page_size: u32) -> Result<String, ContentError> {
        Ok(self.first_locator.clone())
    }

    async fn fetch_page(&self, locator: &str) -> Result<RawPostPage, ContentError> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        self.check(locator)?;
        let page = self
            .pages
            .get(locator)
            .ok_or_else(|| FetchError::new(FailureKind::HttpStatus(404), locator))?;
        Ok(parse_page(page.to_string().as_bytes())?)
    }

    async fn fetch_document(&self, identifier: &str) -> Result<RawPostDocument, ContentError> {
        self.check(identifier)?;
        let document = self
            .documents
            .get(identifier)
            .ok_or_else(|| FetchError::new(FailureKind::NotFound, identifier))?;
        Ok(parse_document(document.to_string().as_bytes())?)
    }
}
