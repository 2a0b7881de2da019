use lotlist_core::FetchError;
use thiserror::Error;

/// Errors returned by the parking API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// `true` when the server was never reached, as opposed to answering
    /// with something unusable.
    #[must_use]
    pub fn is_request_failure(&self) -> bool {
        match self {
            ClientError::Http(e) => !(e.is_decode() || e.is_status()),
            ClientError::InvalidBaseUrl { .. } => true,
            ClientError::UnexpectedStatus { .. } | ClientError::Deserialize { .. } => false,
        }
    }
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        if err.is_request_failure() {
            FetchError::Request(err.to_string())
        } else {
            FetchError::Server(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize_err() -> ClientError {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        ClientError::Deserialize {
            context: "test".to_owned(),
            source,
        }
    }

    #[test]
    fn malformed_payload_is_a_server_error() {
        let fetch: FetchError = deserialize_err().into();
        assert!(matches!(fetch, FetchError::Server(_)));
    }

    #[test]
    fn bad_status_is_a_server_error() {
        let fetch: FetchError = ClientError::UnexpectedStatus {
            status: 502,
            url: "https://api.example.com/Dresden".to_owned(),
        }
        .into();
        assert!(matches!(fetch, FetchError::Server(ref m) if m.contains("502")));
    }

    #[tokio::test]
    async fn connection_failure_is_a_request_error() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();
        let fetch: FetchError = ClientError::Http(err).into();
        assert!(matches!(fetch, FetchError::Request(_)));
    }
}
