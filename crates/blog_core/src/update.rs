use crate::{Effect, FeedState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadMoreClicked => match state.begin_load() {
            Some(locator) => vec![Effect::FetchPage { locator }],
            // Already loading or exhausted: a second request would race on the token.
            None => Vec::new(),
        },
        Msg::PageLoaded(page) => {
            state.finish_load(page);
            Vec::new()
        }
        Msg::PageFailed(message) => {
            state.fail_load(message);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
