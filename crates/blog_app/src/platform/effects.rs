use std::time::Duration;

use blog_core::{update, Effect, FeedState, FeedViewModel, Msg};
use blog_engine::{EngineEvent, EngineHandle};
use blog_logging::{blog_info, blog_warn};

/// Executes feed effects on the engine and turns its events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    timeout: Duration,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Runs the effects and waits for one event per fetch.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut pending = 0usize;
        for effect in effects {
            match effect {
                Effect::FetchPage { locator } => {
                    blog_info!("FetchPage locator_len={}", locator.len());
                    self.engine.fetch_page(locator);
                    pending += 1;
                }
            }
        }

        (0..pending)
            .map(|_| match self.engine.recv_timeout(self.timeout) {
                Some(event) => map_event(event),
                None => Msg::PageFailed(format!(
                    "no response from engine within {:?}",
                    self.timeout
                )),
            })
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageLoaded { locator, result } => match result {
            Ok(page) => Msg::PageLoaded(page),
            Err(err) => {
                blog_warn!("Page {} failed: {}", locator, err);
                Msg::PageFailed(err.to_string())
            }
        },
    }
}

/// Clicks "load more" until the feed is exhausted or a load fails.
///
/// `on_change` sees the view after every state change that marked it dirty.
pub fn drain_feed(
    mut state: FeedState,
    runner: &EffectRunner,
    mut on_change: impl FnMut(&FeedViewModel),
) -> FeedState {
    while !state.is_exhausted() {
        let (next, effects) = update(state, Msg::LoadMoreClicked);
        state = next;
        if effects.is_empty() {
            break;
        }
        for msg in runner.run(effects) {
            state = update(state, msg).0;
        }
        if state.consume_dirty() {
            on_change(&state.view());
        }
        if state.last_error().is_some() {
            break;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use blog_core::{PostSummary, PostSummaryPage};
    use blog_engine::{
        ContentError, ContentSource, FailureKind, FetchError, RawPostDocument, RawPostPage,
        RawPostRecord, RawSummaryData,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    struct PagedSource {
        pages: HashMap<String, RawPostPage>,
    }

    #[async_trait::async_trait]
    impl ContentSource for PagedSource {
        async fn first_page_locator(&self, _page_size: u32) -> Result<String, ContentError> {
            Ok("p1".to_string())
        }

        async fn fetch_page(&self, locator: &str) -> Result<RawPostPage, ContentError> {
            self.pages.get(locator).cloned().ok_or_else(|| {
                FetchError::new(FailureKind::HttpStatus(503), locator.to_string()).into()
            })
        }

        async fn fetch_document(&self, identifier: &str) -> Result<RawPostDocument, ContentError> {
            Err(FetchError::new(FailureKind::NotFound, identifier.to_string()).into())
        }
    }

    fn raw_page(uids: &[&str], next: Option<&str>) -> RawPostPage {
        RawPostPage {
            next_page: next.map(ToOwned::to_owned),
            results: uids
                .iter()
                .map(|uid| RawPostRecord {
                    uid: uid.to_string(),
                    first_publication_date: "2021-04-19T10:00:00Z".to_string(),
                    data: RawSummaryData {
                        title: uid.to_string(),
                        subtitle: String::new(),
                        author: "Rafael Camarda".to_string(),
                    },
                })
                .collect(),
        }
    }

    fn initial(uid: &str, next: &str) -> PostSummaryPage {
        PostSummaryPage::new(
            vec![PostSummary {
                identifier: uid.to_string(),
                publication_date: "19 Apr 2021".to_string(),
                title: uid.to_string(),
                subtitle: String::new(),
                author: "Rafael Camarda".to_string(),
            }],
            Some(next.to_string()),
        )
    }

    fn runner(pages: Vec<(&str, RawPostPage)>) -> EffectRunner {
        let source = PagedSource {
            pages: pages
                .into_iter()
                .map(|(locator, page)| (locator.to_string(), page))
                .collect(),
        };
        let engine = EngineHandle::new(Arc::new(source)).unwrap();
        EffectRunner::new(engine, Duration::from_secs(5))
    }

    #[test]
    fn drains_every_page_in_order() {
        blog_logging::initialize_for_tests();
        let runner = runner(vec![
            ("p2", raw_page(&["b", "c"], Some("p3"))),
            ("p3", raw_page(&["d"], None)),
        ]);
        let mut seen = Vec::new();

        let state = drain_feed(FeedState::new(initial("a", "p2")), &runner, |view| {
            seen.push(view.posts.len())
        });

        let hrefs: Vec<_> = state.view().posts.into_iter().map(|p| p.href).collect();
        assert_eq!(hrefs, vec!["/post/a", "/post/b", "/post/c", "/post/d"]);
        assert!(state.is_exhausted());
        assert_eq!(seen, vec![3, 4]);
    }

    #[test]
    fn failure_stops_draining_and_keeps_posts() {
        blog_logging::initialize_for_tests();
        let runner = runner(vec![("p2", raw_page(&["b"], Some("p3")))]);

        let state = drain_feed(FeedState::new(initial("a", "p2")), &runner, |_| {});

        assert_eq!(state.paginator().len(), 2);
        assert_eq!(state.paginator().next_page_token(), Some("p3"));
        assert!(state.last_error().is_some_and(|e| e.contains("503")));
    }
}
