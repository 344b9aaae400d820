use crate::model::OrderBy;
use thiserror::Error;

/// Every way a single `find_users` call can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("limit must be > 0")]
    InvalidLimit,
    #[error("offset must be > 0")]
    InvalidOffset,
    #[error("Bad AccessToken")]
    BadAccessToken,
    #[error("cant unpack error json: {0}")]
    UnpackError(String),
    #[error("cant unpack result json: {0}")]
    UnpackResult(String),
    #[error("OrderFeld {0} invalid")]
    BadOrderField(String),
    #[error("unknown bad request error: ErrorBadOrderBy")]
    BadOrderBy(OrderBy),
    #[error("unknown bad request error: no items with this offset")]
    OffsetOutOfRange { offset: i64 },
    #[error("unknown bad request error: ErrorBadParams")]
    BadParams,
    #[error("unknown bad request error: {0}")]
    UnknownBadRequest(String),
    #[error("SearchServer fatal error")]
    ServerFatal,
    #[error("unknown error, status {0}")]
    UnknownStatus(u16),
    #[error("timeout for {url}")]
    Timeout { url: String },
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid search url: {0}")]
    InvalidUrl(String),
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// True for failures detected before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidLimit | Self::InvalidOffset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_documented_texts() {
        assert_eq!(ClientError::InvalidLimit.to_string(), "limit must be > 0");
        assert_eq!(ClientError::InvalidOffset.to_string(), "offset must be > 0");
        assert_eq!(ClientError::BadAccessToken.to_string(), "Bad AccessToken");
        assert_eq!(
            ClientError::BadOrderField("Random".to_string()).to_string(),
            "OrderFeld Random invalid"
        );
        assert_eq!(
            ClientError::BadOrderBy(OrderBy::Desc).to_string(),
            "unknown bad request error: ErrorBadOrderBy"
        );
        assert_eq!(
            ClientError::UnknownBadRequest("boom".to_string()).to_string(),
            "unknown bad request error: boom"
        );
        assert_eq!(
            ClientError::OffsetOutOfRange { offset: 100_500 }.to_string(),
            "unknown bad request error: no items with this offset"
        );
        assert_eq!(
            ClientError::BadParams.to_string(),
            "unknown bad request error: ErrorBadParams"
        );
        assert_eq!(ClientError::ServerFatal.to_string(), "SearchServer fatal error");
        assert_eq!(
            ClientError::UnknownStatus(418).to_string(),
            "unknown error, status 418"
        );
        assert_eq!(
            ClientError::Timeout {
                url: "http://127.0.0.1:8080/".to_string()
            }
            .to_string(),
            "timeout for http://127.0.0.1:8080/"
        );
    }

    #[test]
    fn only_local_checks_are_validation() {
        assert!(ClientError::InvalidLimit.is_validation());
        assert!(ClientError::InvalidOffset.is_validation());
        assert!(!ClientError::BadAccessToken.is_validation());
        assert!(!ClientError::OffsetOutOfRange { offset: 3 }.is_validation());
    }
}
