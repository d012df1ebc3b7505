//! Boundary shapes for the CMS JSON payloads.
//!
//! Payloads are deserialized into permissive `*Payload` structs first and then
//! validated into the fixed `Raw*` shapes, so a missing field surfaces as a
//! [`MalformedRecordError`] naming the record instead of a dynamic value
//! leaking inward.

use blog_core::{format_publication_date, PostSummary};
use serde::{Deserialize, Deserializer};

use crate::MalformedRecordError;

/// One rich-text block as stored by the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub spans: Vec<RichTextSpan>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub oembed: Option<RawEmbed>,
}

impl RichTextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: Some(text.into()),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }
}

/// Inline formatting over a block's text. Offsets are UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RichTextSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawEmbed {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSummaryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// A listing record after validation, before display formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPostRecord {
    pub uid: String,
    pub first_publication_date: String,
    pub data: RawSummaryData,
}

impl RawPostRecord {
    /// Display-formats the record. Pure: the same record always yields the same summary.
    pub fn to_summary(&self) -> Result<PostSummary, MalformedRecordError> {
        let publication_date = format_publication_date(&self.first_publication_date)
            .map_err(|err| MalformedRecordError::from_date(uid_context(&self.uid), err))?;
        Ok(PostSummary {
            identifier: self.uid.clone(),
            publication_date,
            title: self.data.title.clone(),
            subtitle: self.data.subtitle.clone(),
            author: self.data.author.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPostPage {
    /// Locator of the following page; `None` on the last page.
    pub next_page: Option<String>,
    pub results: Vec<RawPostRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    pub heading: String,
    pub body: Vec<RichTextBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocumentData {
    pub title: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub content: Vec<RawSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPostDocument {
    pub uid: String,
    pub first_publication_date: String,
    pub data: RawDocumentData,
}

#[derive(Deserialize)]
struct PagePayload<T> {
    #[serde(default)]
    next_page: Option<String>,
    results: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct RecordPayload {
    uid: Option<String>,
    first_publication_date: Option<String>,
    data: Option<SummaryDataPayload>,
}

#[derive(Deserialize)]
struct SummaryDataPayload {
    title: Option<String>,
    /// Outer `None` when the key is absent, inner `None` for JSON `null`.
    #[serde(default, deserialize_with = "present")]
    subtitle: Option<Option<String>>,
    author: Option<String>,
}

#[derive(Deserialize)]
struct DocumentPayload {
    uid: Option<String>,
    first_publication_date: Option<String>,
    data: Option<DocumentDataPayload>,
}

#[derive(Deserialize)]
struct DocumentDataPayload {
    title: Option<String>,
    author: Option<String>,
    #[serde(default)]
    banner: Option<BannerPayload>,
    content: Option<Vec<SectionPayload>>,
}

#[derive(Deserialize)]
struct BannerPayload {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct SectionPayload {
    heading: Option<String>,
    #[serde(default)]
    body: Vec<RichTextBlock>,
}

/// Parses and validates one listing page. All records must be valid.
pub fn parse_page(bytes: &[u8]) -> Result<RawPostPage, MalformedRecordError> {
    let payload: PagePayload<RecordPayload> = serde_json::from_slice(bytes)
        .map_err(|err| MalformedRecordError::new("page", err.to_string()))?;
    let results = payload
        .results
        .ok_or_else(|| MalformedRecordError::missing("page", "results"))?
        .into_iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RawPostPage {
        next_page: payload.next_page.filter(|next| !next.is_empty()),
        results,
    })
}

/// Parses and validates a single document object.
pub fn parse_document(bytes: &[u8]) -> Result<RawPostDocument, MalformedRecordError> {
    let payload: DocumentPayload = serde_json::from_slice(bytes)
        .map_err(|err| MalformedRecordError::new("document", err.to_string()))?;
    validate_document("document".to_string(), payload)
}

/// Parses a search response whose results are full documents.
pub(crate) fn parse_document_results(
    bytes: &[u8],
) -> Result<Vec<RawPostDocument>, MalformedRecordError> {
    let payload: PagePayload<DocumentPayload> = serde_json::from_slice(bytes)
        .map_err(|err| MalformedRecordError::new("document search", err.to_string()))?;
    payload
        .results
        .ok_or_else(|| MalformedRecordError::missing("document search", "results"))?
        .into_iter()
        .enumerate()
        .map(|(index, document)| validate_document(format!("results[{index}]"), document))
        .collect()
}

fn validate_record(
    index: usize,
    record: RecordPayload,
) -> Result<RawPostRecord, MalformedRecordError> {
    let context = format!("results[{index}]");
    let uid = required(record.uid, &context, "uid")?;
    let context = uid_context(&uid);
    let first_publication_date =
        required(record.first_publication_date, &context, "first_publication_date")?;
    let data = record
        .data
        .ok_or_else(|| MalformedRecordError::missing(context.as_str(), "data"))?;
    Ok(RawPostRecord {
        data: RawSummaryData {
            title: required(data.title, &context, "data.title")?,
            // The CMS stores an empty key-text field as null.
            subtitle: data
                .subtitle
                .ok_or_else(|| MalformedRecordError::missing(context.as_str(), "data.subtitle"))?
                .unwrap_or_default(),
            author: required(data.author, &context, "data.author")?,
        },
        uid,
        first_publication_date,
    })
}

fn validate_document(
    context: String,
    document: DocumentPayload,
) -> Result<RawPostDocument, MalformedRecordError> {
    let uid = required(document.uid, &context, "uid")?;
    let context = uid_context(&uid);
    let first_publication_date =
        required(document.first_publication_date, &context, "first_publication_date")?;
    let data = document
        .data
        .ok_or_else(|| MalformedRecordError::missing(context.as_str(), "data"))?;
    let content = data
        .content
        .ok_or_else(|| MalformedRecordError::missing(context.as_str(), "data.content"))?
        .into_iter()
        .enumerate()
        .map(|(index, section)| -> Result<RawSection, MalformedRecordError> {
            Ok(RawSection {
                heading: required(
                    section.heading,
                    &context,
                    &format!("data.content[{index}].heading"),
                )?,
                body: section.body,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RawPostDocument {
        data: RawDocumentData {
            title: required(data.title, &context, "data.title")?,
            author: required(data.author, &context, "data.author")?,
            banner_url: data
                .banner
                .and_then(|banner| banner.url)
                .filter(|url| !url.is_empty()),
            content,
        },
        uid,
        first_publication_date,
    })
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn required(
    value: Option<String>,
    context: &str,
    field: &str,
) -> Result<String, MalformedRecordError> {
    value.ok_or_else(|| MalformedRecordError::missing(context, field))
}

fn uid_context(uid: &str) -> String {
    format!("uid {uid:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_subtitle_becomes_empty() {
        let json = br#"{"next_page":null,"results":[{"uid":"a","first_publication_date":"2021-04-19T10:00:00+0000","data":{"title":"T","subtitle":null,"author":"A"}}]}"#;
        let page = parse_page(json).unwrap();
        assert_eq!(page.results[0].data.subtitle, "");
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn absent_subtitle_key_is_malformed() {
        let json = br#"{"results":[{"uid":"a","first_publication_date":"2021-04-19T10:00:00Z","data":{"title":"T","author":"A"}}]}"#;
        let err = parse_page(json).unwrap_err();
        assert_eq!(err.context, "uid \"a\"");
        assert!(err.message.contains("data.subtitle"));
    }

    #[test]
    fn missing_uid_names_the_record_index() {
        let json = br#"{"results":[{"first_publication_date":"2021-04-19","data":{"title":"T","author":"A"}}]}"#;
        let err = parse_page(json).unwrap_err();
        assert_eq!(err.context, "results[0]");
        assert!(err.message.contains("uid"));
    }

    #[test]
    fn empty_next_page_is_treated_as_absent() {
        let json = br#"{"next_page":"","results":[]}"#;
        assert_eq!(parse_page(json).unwrap().next_page, None);
    }
}
