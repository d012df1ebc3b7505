use blog_core::{update, FeedState, Msg, PostSummaryPage};

#[test]
fn update_is_noop() {
    let state = FeedState::new(PostSummaryPage::default());
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
