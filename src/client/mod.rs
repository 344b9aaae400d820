//! HTTP client for the search endpoint.
//!
//! [`SearchClient::find_users`] validates the request locally, performs one
//! `GET` and turns every status the server can answer with into either a
//! [`SearchResponse`] or a [`ClientError`].
//!
//! To tell whether another page exists the client asks for one record more than
//! the caller wanted (after capping the page at [`MAX_PAGE_SIZE`]) and drops the
//! extra record from the response. The page size actually used is reported back
//! as [`SearchResponse::page_size`]; callers walking pages step `offset` by it.
//!
//! A limit of zero is sent as is and means "no cap": the server returns the whole
//! filtered tail in one response and no next page is reported. Skipping the
//! [`MAX_PAGE_SIZE`] cap in that case is deliberate, it is the only way to ask
//! for every match at once.

mod error;

pub use error::ClientError;

use crate::{
    model::{
        ErrorCode, SearchErrorResponse, SearchRequest, SearchResponse, User, ACCESS_TOKEN_HEADER,
        MAX_PAGE_SIZE,
    },
    APP_USER_AGENT,
};
use reqwest::{redirect::Policy, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info_span, instrument, Instrument};
use url::Url;

/// Per-request timeout used by [`SearchClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

const MAX_REDIRECTS: usize = 10;

pub struct SearchClient {
    url: Url,
    access_token: SecretString,
    client: Client,
}

// Query string as sent on the wire, in this field order.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct WireQuery<'a> {
    limit: i64,
    offset: i64,
    query: &'a str,
    order_field: &'a str,
    order_by: i8,
}

impl SearchClient {
    /// # Errors
    /// Returns an error if `url` is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(url: &str, access_token: SecretString) -> Result<Self, ClientError> {
        Self::with_timeout(url, access_token, DEFAULT_TIMEOUT)
    }

    /// # Errors
    /// Returns an error if `url` is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn with_timeout(
        url: &str,
        access_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let url = Url::parse(url).map_err(|err| ClientError::InvalidUrl(format!("{url}: {err}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme {}",
                url.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            url,
            access_token,
            client,
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Search the remote directory.
    ///
    /// # Errors
    /// Returns a [`ClientError`] describing why no page could be produced.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn find_users(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let limit = page_limit(request)?;
        let wire = wire_query(request, limit);

        debug!("Wire query: {:?}", wire);

        let span = info_span!(
            "search.find_users",
            http.method = "GET",
            url = %self.url
        );
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .query(&wire)
            .send()
            .instrument(span)
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;

        debug!("Response status: {}, {} bytes", status, body.len());

        decode(status, &body, request, limit)
    }

    /// Same as [`find_users`](Self::find_users), but gives up at `deadline`.
    ///
    /// # Errors
    /// Returns [`ClientError::Timeout`] if the deadline passes first, otherwise
    /// whatever `find_users` returns.
    pub async fn find_users_until(
        &self,
        request: &SearchRequest,
        deadline: Instant,
    ) -> Result<SearchResponse, ClientError> {
        tokio::time::timeout_at(deadline, self.find_users(request))
            .await
            .map_err(|_| ClientError::Timeout {
                url: self.url.to_string(),
            })?
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                url: self.url.to_string(),
            }
        } else {
            ClientError::Transport(err)
        }
    }
}

// Reject negative values and cap the page size.
fn page_limit(request: &SearchRequest) -> Result<i64, ClientError> {
    if request.limit < 0 {
        return Err(ClientError::InvalidLimit);
    }

    if request.offset < 0 {
        return Err(ClientError::InvalidOffset);
    }

    Ok(request.limit.min(MAX_PAGE_SIZE))
}

fn wire_query(request: &SearchRequest, limit: i64) -> WireQuery<'_> {
    WireQuery {
        // one extra record tells us whether a next page exists
        limit: if limit == 0 { 0 } else { limit + 1 },
        offset: request.offset,
        query: &request.query,
        order_field: &request.order_field,
        order_by: request.order_by.as_i8(),
    }
}

fn decode(
    status: StatusCode,
    body: &[u8],
    request: &SearchRequest,
    limit: i64,
) -> Result<SearchResponse, ClientError> {
    match status {
        StatusCode::OK => {
            let mut users: Vec<User> = serde_json::from_slice(body)
                .map_err(|err| ClientError::UnpackResult(err.to_string()))?;

            let page = usize::try_from(limit).unwrap_or(usize::MAX);
            let next_page = page > 0 && users.len() > page;
            if next_page {
                users.truncate(page);
            }

            Ok(SearchResponse {
                users,
                next_page,
                page_size: limit,
            })
        }
        StatusCode::UNAUTHORIZED => Err(ClientError::BadAccessToken),
        StatusCode::BAD_REQUEST => {
            let error: SearchErrorResponse = serde_json::from_slice(body)
                .map_err(|err| ClientError::UnpackError(err.to_string()))?;

            Err(match ErrorCode::parse(&error.error) {
                Some(ErrorCode::BadOrderField) => {
                    ClientError::BadOrderField(request.order_field.clone())
                }
                Some(ErrorCode::BadOrderBy) => ClientError::BadOrderBy(request.order_by),
                Some(ErrorCode::OffsetOutOfRange) => ClientError::OffsetOutOfRange {
                    offset: request.offset,
                },
                Some(ErrorCode::BadParams) => ClientError::BadParams,
                None => ClientError::UnknownBadRequest(error.error),
            })
        }
        StatusCode::INTERNAL_SERVER_ERROR => Err(ClientError::ServerFatal),
        other => Err(ClientError::UnknownStatus(other.as_u16())),
    }
}
