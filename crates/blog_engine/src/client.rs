use std::sync::Mutex;
use std::time::Duration;

use blog_logging::{blog_debug, blog_info};
use futures_util::StreamExt;
use serde::Deserialize;
use url::Url;

use crate::raw::parse_document_results;
use crate::{
    parse_page, ContentError, ContentSource, FailureKind, FetchError, MalformedRecordError,
    RawPostDocument, RawPostPage,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Repository API root, e.g. `https://my-blog.cdn.prismic.io/api/v2`.
    pub endpoint: String,
    pub access_token: Option<String>,
    /// Custom type queried for posts.
    pub document_type: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl ClientSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_token: None,
            document_type: "posts".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Deserialize)]
struct ApiPayload {
    #[serde(default)]
    refs: Vec<RefPayload>,
}

#[derive(Deserialize)]
struct RefPayload {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// [`ContentSource`] backed by a Prismic-style REST API.
#[derive(Debug)]
pub struct PrismicClient {
    settings: ClientSettings,
    client: reqwest::Client,
    master_ref: Mutex<Option<String>>,
}

impl PrismicClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            client,
            master_ref: Mutex::new(None),
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Resolves the ref of the published content, caching it for the client's lifetime.
    pub async fn master_ref(&self) -> Result<String, ContentError> {
        if let Some(cached) = self.cached_ref() {
            return Ok(cached);
        }

        let url = self.with_token(parse_url(&self.settings.endpoint)?);
        let bytes = self.get_bytes(url).await?;
        let api: ApiPayload = serde_json::from_slice(&bytes)
            .map_err(|err| MalformedRecordError::new("api", err.to_string()))?;
        let master = api
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| FetchError::new(FailureKind::MissingMasterRef, "no ref with isMasterRef"))?;

        blog_info!("Resolved master ref {master}");
        if let Ok(mut slot) = self.master_ref.lock() {
            *slot = Some(master.clone());
        }
        Ok(master)
    }

    fn cached_ref(&self) -> Option<String> {
        self.master_ref.lock().ok().and_then(|slot| slot.clone())
    }

    async fn search_url(&self, query: &str, page_size: u32) -> Result<Url, ContentError> {
        let master = self.master_ref().await?;
        let base = format!(
            "{}/documents/search",
            self.settings.endpoint.trim_end_matches('/')
        );
        let mut url = parse_url(&base)?;
        url.query_pairs_mut()
            .append_pair("ref", &master)
            .append_pair("q", query)
            .append_pair("pageSize", &page_size.to_string());
        Ok(self.with_token(url))
    }

    fn with_token(&self, mut url: Url) -> Url {
        if let Some(token) = self.settings.access_token.as_deref() {
            let present = url.query_pairs().any(|(key, _)| key == "access_token");
            if !present {
                url.query_pairs_mut().append_pair("access_token", token);
            }
        }
        url
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        blog_debug!("GET {}", redact(&url));
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ContentSource for PrismicClient {
    async fn first_page_locator(&self, page_size: u32) -> Result<String, ContentError> {
        let query = format!("[[at(document.type,\"{}\")]]", self.settings.document_type);
        Ok(self.search_url(&query, page_size).await?.to_string())
    }

    async fn fetch_page(&self, locator: &str) -> Result<RawPostPage, ContentError> {
        let url = self.with_token(parse_url(locator)?);
        let bytes = self.get_bytes(url).await?;
        Ok(parse_page(&bytes)?)
    }

    async fn fetch_document(&self, identifier: &str) -> Result<RawPostDocument, ContentError> {
        let query = format!(
            "[[at(my.{}.uid,\"{}\")]]",
            self.settings.document_type,
            quote_predicate_value(identifier)
        );
        let url = self.search_url(&query, 1).await?;
        let bytes = self.get_bytes(url).await?;
        parse_document_results(&bytes)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                FetchError::new(FailureKind::NotFound, format!("no document with uid {identifier:?}"))
                    .into()
            })
    }
}

/// Escapes a value for a double-quoted predicate argument.
fn quote_predicate_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{raw}: {err}")))
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

/// The URL with its access token blanked, for logging.
fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "access_token" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
