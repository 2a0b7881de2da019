//! HTTP client for a ParkenDD-style parking API.
//!
//! Wraps `reqwest` with typed response deserialization and classifies every
//! failure so callers can tell "offline" apart from "server sent garbage".
//! There is no retry here: a failed fetch is terminal and the caller decides
//! when to try again.

use std::time::Duration;

use lotlist_core::config::DEFAULT_API_BASE_URL;
use lotlist_core::{DataSource, FetchError, LotRecord, ServerNotice};
use reqwest::{Client, StatusCode, Url};

use crate::error::ClientError;
use crate::normalize::normalize_lots;
use crate::types::{CityResponse, NoticeResponse};

const NOTICE_PATH: &str = "notification";

/// Client for the parking API of a single city.
///
/// Use [`ParkingApiClient::new`] for the public API or
/// [`ParkingApiClient::with_base_url`] to point at another deployment or a
/// mock server in tests.
pub struct ParkingApiClient {
    client: Client,
    lots_url: Url,
    notice_url: Url,
}

impl ParkingApiClient {
    /// Creates a client for `city` on the public API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(city: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_API_BASE_URL, city, timeout_secs, user_agent)
    }

    /// Creates a client for `city` on the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        city: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let lots_url = endpoint_url(base_url, city)?;
        let notice_url = endpoint_url(base_url, NOTICE_PATH)?;

        Ok(Self {
            client,
            lots_url,
            notice_url,
        })
    }

    #[must_use]
    pub fn lots_url(&self) -> &Url {
        &self.lots_url
    }

    #[must_use]
    pub fn notice_url(&self) -> &Url {
        &self.notice_url
    }

    /// Fetches and normalizes the current lot list, in server order.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn get_lots(&self) -> Result<Vec<LotRecord>, ClientError> {
        tracing::debug!(url = %self.lots_url, "fetching lot list");
        let (status, body) = self.request(&self.lots_url).await?;
        if !status.is_success() {
            return Err(unexpected_status(status, &self.lots_url));
        }

        let response: CityResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: self.lots_url.to_string(),
                source: e,
            })?;

        let received = response.lots.len();
        let lots = normalize_lots(response.lots);
        tracing::info!(
            received,
            kept = lots.len(),
            last_updated = response.last_updated.as_deref().unwrap_or("unknown"),
            "fetched lot list"
        );
        Ok(lots)
    }

    /// Fetches the operator notice.
    ///
    /// `None` when the endpoint is absent (404), answers without content, or
    /// publishes a notice with neither title nor message.
    ///
    /// # Errors
    ///
    /// Same as [`ParkingApiClient::get_lots`].
    pub async fn get_notice(&self) -> Result<Option<ServerNotice>, ClientError> {
        let (status, body) = self.request(&self.notice_url).await?;
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(unexpected_status(status, &self.notice_url));
        }
        if body.trim().is_empty() {
            return Ok(None);
        }

        let response: NoticeResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: self.notice_url.to_string(),
                source: e,
            })?;

        let title = response.title.unwrap_or_default().trim().to_owned();
        let message = response.message.unwrap_or_default().trim().to_owned();
        if title.is_empty() && message.is_empty() {
            return Ok(None);
        }
        tracing::info!(%title, "server notice published");
        Ok(Some(ServerNotice { title, message }))
    }

    /// Sends a GET request and returns the status with the raw body.
    async fn request(&self, url: &Url) -> Result<(StatusCode, String), ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

impl DataSource for ParkingApiClient {
    async fn fetch_lots(&self) -> Result<Vec<LotRecord>, FetchError> {
        self.get_lots().await.map_err(FetchError::from)
    }

    async fn fetch_server_notice(&self) -> Result<Option<ServerNotice>, FetchError> {
        self.get_notice().await.map_err(FetchError::from)
    }
}

/// Resolve `segment` as a single path segment below `base_url`.
///
/// The base is normalised to exactly one trailing slash first, so
/// `https://host/api` and `https://host/api/` behave the same.
fn endpoint_url(base_url: &str, segment: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base".to_owned()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

fn unexpected_status(status: StatusCode, url: &Url) -> ClientError {
    ClientError::UnexpectedStatus {
        status: status.as_u16(),
        url: url.to_string(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
