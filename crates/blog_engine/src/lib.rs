//! Blog engine: content fetching, boundary validation and effect execution.
mod client;
mod engine;
mod filename;
mod loader;
mod persist;
mod prepare;
mod raw;
mod richtext;
mod source;
mod types;
mod words;

pub use client::{ClientSettings, PrismicClient};
pub use engine::EngineHandle;
pub use filename::prepared_filename;
pub use loader::{load_first_page, load_next_page, load_post, summarize_page};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use prepare::{prepare_documents, PrepareError, PrepareOptions, PrepareSummary, PreparedPost};
pub use raw::{
    parse_document, parse_page, RawDocumentData, RawEmbed, RawPostDocument, RawPostPage,
    RawPostRecord, RawSection, RawSummaryData, RichTextBlock, RichTextSpan, SpanData,
};
pub use richtext::{HtmlRichTextRenderer, RichTextRenderer};
pub use source::ContentSource;
pub use types::{
    ContentError, EngineEvent, FailureKind, FetchError, LoadOutcome, MalformedRecordError,
};
pub use words::PlainTextWordCounter;
