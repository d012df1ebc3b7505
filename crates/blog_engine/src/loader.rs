use blog_core::{
    format_publication_date, AppendOutcome, BodyFragment, PostDocument, PostSummaryPage,
    PostSummaryPaginator, Section,
};
use blog_logging::{blog_debug, blog_info};

use crate::{
    ContentError, ContentSource, LoadOutcome, MalformedRecordError, RawPostDocument, RawPostPage,
    RichTextRenderer,
};

/// Transforms every record of a raw page; fails as a whole if any record does.
pub fn summarize_page(raw: &RawPostPage) -> Result<PostSummaryPage, MalformedRecordError> {
    let items = raw
        .results
        .iter()
        .map(|record| record.to_summary())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PostSummaryPage::new(items, raw.next_page.clone()))
}

/// Fetches the first listing page, ready to seed a paginator.
pub async fn load_first_page(
    source: &dyn ContentSource,
    page_size: u32,
) -> Result<PostSummaryPage, ContentError> {
    let locator = source.first_page_locator(page_size).await?;
    let raw = source.fetch_page(&locator).await?;
    let page = summarize_page(&raw)?;
    blog_info!(
        "Loaded first page: {} posts, more={}",
        page.items.len(),
        page.next_page_token.is_some()
    );
    Ok(page)
}

/// Fetches the paginator's next page and appends it.
///
/// Nothing is fetched when the paginator is exhausted. On any error the
/// paginator is left exactly as it was.
pub async fn load_next_page(
    paginator: &mut PostSummaryPaginator,
    source: &dyn ContentSource,
) -> Result<LoadOutcome, ContentError> {
    let Some(locator) = paginator.next_page_token().map(ToOwned::to_owned) else {
        blog_debug!("load_next_page called on an exhausted paginator");
        return Ok(LoadOutcome::Exhausted);
    };

    let raw = source.fetch_page(&locator).await?;
    let page = summarize_page(&raw)?;

    Ok(match paginator.append_page(page) {
        AppendOutcome::Appended { count } => {
            blog_debug!("Appended {count} posts from {locator}");
            LoadOutcome::Appended { count }
        }
        AppendOutcome::Exhausted => LoadOutcome::Exhausted,
    })
}

/// Fetches one document and renders its rich text into markup fragments.
pub async fn load_post(
    source: &dyn ContentSource,
    identifier: &str,
    renderer: &dyn RichTextRenderer,
) -> Result<PostDocument, ContentError> {
    let raw = source.fetch_document(identifier).await?;
    Ok(prepare_document(raw, renderer)?)
}

pub(crate) fn prepare_document(
    raw: RawPostDocument,
    renderer: &dyn RichTextRenderer,
) -> Result<PostDocument, MalformedRecordError> {
    let publication_date = format_publication_date(&raw.first_publication_date)
        .map_err(|err| MalformedRecordError::from_date(format!("uid {:?}", raw.uid), err))?;
    let sections = raw
        .data
        .content
        .into_iter()
        .map(|section| Section {
            heading: section.heading,
            body_fragments: section
                .body
                .iter()
                .map(|block| BodyFragment {
                    markup: renderer.render_block(block),
                })
                .collect(),
        })
        .collect();
    Ok(PostDocument {
        identifier: raw.uid,
        publication_date,
        title: raw.data.title,
        banner_url: raw.data.banner_url,
        author: raw.data.author,
        sections,
    })
}
