//! Blog core: pure pagination, read-time and feed state machine helpers.
mod date;
mod effect;
mod msg;
mod paginator;
mod post;
mod read_time;
mod state;
mod update;
mod view_model;

pub use date::{format_publication_date, DateFormatError, DISPLAY_DATE_FORMAT};
pub use effect::Effect;
pub use msg::Msg;
pub use paginator::{AppendOutcome, PostSummaryPaginator};
pub use post::{BodyFragment, PostDocument, PostSummary, PostSummaryPage, Section};
pub use read_time::{
    estimate_read_time, ReadTimeEstimator, WhitespaceWordCounter, WordCounter, WORDS_PER_MINUTE,
};
pub use state::{FeedPhase, FeedState};
pub use update::update;
pub use view_model::{post_path, FeedViewModel, PostCardView, PostViewModel, SectionView};
