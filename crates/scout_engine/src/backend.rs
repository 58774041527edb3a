use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use scout_core::{Contact, Post, PostLink};
use scout_logging::scout_debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

/// The lead backend: contact store, scraping proxy and blacklist.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn contacts(&self) -> Result<Vec<Contact>, FetchError>;
    async fn upsert_contact(&self, contact: &Contact) -> Result<(), FetchError>;
    async fn post_links(&self, source_uri: &str) -> Result<Vec<PostLink>, FetchError>;
    /// Returns the raw phone number for a post; empty when the post has none.
    async fn phone_number(&self, post_link_uri: &str) -> Result<String, FetchError>;
    async fn post_details(&self, post_link_uri: &str) -> Result<Post, FetchError>;
    /// `true` when the number is not blacklisted.
    async fn is_number_allowed(&self, phone_number: &str) -> Result<bool, FetchError>;
    async fn block_number(&self, phone_number: &str) -> Result<(), FetchError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockNumberRequest<'a> {
    phone_number: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    settings: BackendSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, FetchError> {
        let mut base = settings.base_url.trim().to_string();
        // Relative endpoint paths only join under a trailing slash.
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, FetchError> {
        scout_debug!("{} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::new(FailureKind::NotFound, status.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(bytes)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let bytes = self.send(Method::GET, url, None).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let bytes = self.send(Method::GET, url, None).await?;
        String::from_utf8(bytes).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: Url, body: &T) -> Result<(), FetchError> {
        let body = serde_json::to_vec(body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        self.send(Method::POST, url, Some(body)).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn contacts(&self) -> Result<Vec<Contact>, FetchError> {
        let url = self.endpoint("api/contact", &[])?;
        self.get_json(url).await
    }

    async fn upsert_contact(&self, contact: &Contact) -> Result<(), FetchError> {
        let url = self.endpoint("api/contact", &[])?;
        self.post_json(url, contact).await
    }

    async fn post_links(&self, source_uri: &str) -> Result<Vec<PostLink>, FetchError> {
        let url = self.endpoint("api/browser/GetPostLinks", &[("uri", source_uri)])?;
        self.get_json(url).await
    }

    async fn phone_number(&self, post_link_uri: &str) -> Result<String, FetchError> {
        let url = self.endpoint(
            "api/browser/GetPhoneNumber",
            &[("postLinkUri", post_link_uri)],
        )?;
        let text = self.get_text(url).await?;
        Ok(text.trim().trim_matches('"').trim().to_string())
    }

    async fn post_details(&self, post_link_uri: &str) -> Result<Post, FetchError> {
        let url = self.endpoint(
            "api/browser/GetPostDetails",
            &[("postLinkUri", post_link_uri)],
        )?;
        self.get_json(url).await
    }

    async fn is_number_allowed(&self, phone_number: &str) -> Result<bool, FetchError> {
        let url = self.endpoint(
            "api/blacklist/CheckNumber",
            &[("phoneNumber", phone_number)],
        )?;
        let text = self.get_text(url).await?;
        parse_bool(&text).ok_or_else(|| {
            FetchError::new(FailureKind::Decode, format!("expected boolean, got {text:?}"))
        })
    }

    async fn block_number(&self, phone_number: &str) -> Result<(), FetchError> {
        let url = self.endpoint("api/blacklist/AddPhoneNumber", &[])?;
        self.post_json(url, &BlockNumberRequest { phone_number })
            .await
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let value = raw.trim().trim_matches('"');
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
