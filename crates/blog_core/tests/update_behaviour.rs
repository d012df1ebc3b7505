use std::sync::Once;

use blog_core::{
    update, Effect, FeedPhase, FeedState, Msg, PostSummary, PostSummaryPage,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(blog_logging::initialize_for_tests);
}

fn summary(uid: &str) -> PostSummary {
    PostSummary {
        identifier: uid.to_string(),
        publication_date: "15 Mar 2021".to_string(),
        title: uid.to_uppercase(),
        subtitle: String::new(),
        author: "Danilo Vieira".to_string(),
    }
}

fn page(uids: &[&str], next: Option<&str>) -> PostSummaryPage {
    PostSummaryPage::new(
        uids.iter().map(|uid| summary(uid)).collect(),
        next.map(ToOwned::to_owned),
    )
}

#[test]
fn load_more_emits_fetch_and_enters_loading() {
    init_logging();
    let mut state = FeedState::new(page(&["a", "b", "c"], Some("https://cms/p2")));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::LoadMoreClicked);

    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            locator: "https://cms/p2".to_string()
        }]
    );
    assert_eq!(state.phase(), FeedPhase::Loading);
    let view = state.view();
    assert!(view.loading);
    assert!(!view.show_load_more);
    assert!(state.consume_dirty());
}

#[test]
fn second_click_while_loading_is_ignored() {
    init_logging();
    let state = FeedState::new(page(&["a"], Some("p2")));
    let (mut state, _) = update(state, Msg::LoadMoreClicked);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::LoadMoreClicked);

    assert!(effects.is_empty());
    assert_eq!(state.phase(), FeedPhase::Loading);
    assert!(!state.consume_dirty());
}

#[test]
fn loaded_page_appends_after_existing_posts() {
    init_logging();
    let state = FeedState::new(page(&["a", "b"], Some("p2")));
    let (state, _) = update(state, Msg::LoadMoreClicked);
    let (state, effects) = update(state, Msg::PageLoaded(page(&["c"], Some("p3"))));

    assert!(effects.is_empty());
    let hrefs: Vec<_> = state.view().posts.into_iter().map(|p| p.href).collect();
    assert_eq!(hrefs, vec!["/post/a", "/post/b", "/post/c"]);
    assert_eq!(state.paginator().next_page_token(), Some("p3"));
    assert!(state.view().show_load_more);
}

#[test]
fn last_page_hides_load_more() {
    init_logging();
    let state = FeedState::new(page(&["a"], Some("p2")));
    let (state, _) = update(state, Msg::LoadMoreClicked);
    let (state, _) = update(state, Msg::PageLoaded(page(&["b"], None)));

    assert!(state.is_exhausted());
    assert!(!state.view().show_load_more);

    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert!(effects.is_empty());
    assert_eq!(state.paginator().len(), 2);
}

#[test]
fn failed_page_keeps_posts_and_token() {
    init_logging();
    let state = FeedState::new(page(&["a"], Some("p2")));
    let before = state.paginator().clone();
    let (state, _) = update(state, Msg::LoadMoreClicked);
    let (state, _) = update(state, Msg::PageFailed("http status 503".to_string()));

    assert_eq!(state.paginator(), &before);
    assert_eq!(state.phase(), FeedPhase::Idle);
    assert_eq!(state.last_error(), Some("http status 503"));
    assert!(state.view().show_load_more);

    // Retrying clears the error and asks for the same page again.
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            locator: "p2".to_string()
        }]
    );
    assert_eq!(state.last_error(), None);
}

#[test]
fn unsolicited_page_is_ignored() {
    init_logging();
    let state = FeedState::new(page(&["a"], Some("p2")));
    let (state, _) = update(state, Msg::PageLoaded(page(&["x"], None)));

    assert_eq!(state.paginator().len(), 1);
    assert_eq!(state.paginator().next_page_token(), Some("p2"));
}
