use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use blog_core::{post_path, PostDocument, ReadTimeEstimator, WordCounter};
use blog_logging::{blog_info, blog_warn};
use serde::Serialize;

use crate::loader::load_post;
use crate::{
    prepared_filename, AtomicFileWriter, ContentError, ContentSource, PersistError,
    RichTextRenderer,
};

#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Page size used while listing identifiers.
    pub page_size: u32,
    /// Prepared files younger than this are left alone.
    pub revalidate: Duration,
    /// Rewrite every document regardless of age.
    pub force: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            revalidate: Duration::from_secs(60 * 60 * 5),
            force: false,
        }
    }
}

/// What gets written for each post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedPost {
    pub path: String,
    pub read_time_minutes: u32,
    #[serde(flatten)]
    pub document: PostDocument,
}

impl PreparedPost {
    pub fn new(document: PostDocument, counter: &dyn WordCounter) -> Self {
        Self {
            path: post_path(&document.identifier),
            read_time_minutes: ReadTimeEstimator::new(counter).estimate(&document.sections),
            document,
        }
    }
}

#[derive(Debug, Default)]
pub struct PrepareSummary {
    pub written: Vec<PathBuf>,
    pub skipped_fresh: usize,
    /// Documents that could not be fetched or validated; the rest still get written.
    pub failed: Vec<(String, ContentError)>,
}

#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    #[error("listing identifiers failed: {0}")]
    Listing(#[from] ContentError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Lists every post and writes its prepared JSON into `output_dir`.
pub async fn prepare_documents(
    source: &dyn ContentSource,
    renderer: &dyn RichTextRenderer,
    counter: &dyn WordCounter,
    output_dir: &Path,
    options: &PrepareOptions,
) -> Result<PrepareSummary, PrepareError> {
    let identifiers = source.list_all_identifiers(options.page_size).await?;
    blog_info!("Preparing {} posts into {:?}", identifiers.len(), output_dir);

    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let mut summary = PrepareSummary::default();
    for identifier in identifiers {
        let filename = prepared_filename(&identifier);
        if !options.force && is_fresh(&writer.dir().join(&filename), options.revalidate) {
            summary.skipped_fresh += 1;
            continue;
        }

        let document = match load_post(source, &identifier, renderer).await {
            Ok(document) => document,
            Err(err) => {
                blog_warn!("Skipping {identifier}: {err}");
                summary.failed.push((identifier, err));
                continue;
            }
        };
        let prepared = PreparedPost::new(document, counter);
        summary.written.push(writer.write_json(&filename, &prepared)?);
    }
    Ok(summary)
}

fn is_fresh(path: &Path, revalidate: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|meta| meta.modified()) else {
        return false;
    };
    SystemTime::now()
        .duration_since(modified)
        .map(|age| age < revalidate)
        // A modification time in the future counts as fresh.
        .unwrap_or(true)
}
