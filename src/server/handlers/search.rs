use crate::{
    model::{ErrorCode, OrderBy, SearchErrorResponse, User, ACCESS_TOKEN_HEADER},
    search::{self, SearchError, SearchParams},
    server::SearchState,
};
use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::IntoParams;

// Raw query values; numbers are parsed by hand so malformed input maps to an
// `ErrorBadParams` body instead of axum's plain-text rejection.
#[derive(IntoParams, Debug, Deserialize, Default)]
#[into_params(parameter_in = Query)]
pub struct SearchArgs {
    /// Page size, 0 for no cap
    limit: Option<String>,
    /// Records to skip
    offset: Option<String>,
    /// Substring matched against name and about
    query: Option<String>,
    /// Id, Age, Name or empty
    order_field: Option<String>,
    /// -1 descending, 0 as is, 1 ascending
    order_by: Option<String>,
}

#[utoipa::path(
    get,
    path = "/",
    params(SearchArgs),
    responses(
        (status = 200, description = "Page of matching users", body = [User], content_type = "application/json"),
        (status = 400, description = "Invalid parameters, order field, order or offset", body = SearchErrorResponse),
        (status = 401, description = "Missing or wrong AccessToken header"),
        (status = 500, description = "Directory unavailable"),
    ),
    tag = "search",
)]
#[instrument(skip(state, headers, query))]
pub async fn find_users(
    Extension(state): Extension<Arc<SearchState>>,
    headers: HeaderMap,
    query: Result<Query<SearchArgs>, QueryRejection>,
) -> Response {
    if !authorized(&headers, &state.access_token) {
        debug!("Rejected request with bad access token");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let users = match state.directory.users() {
        Ok(users) => users,
        Err(err) => {
            error!("Failed to load directory: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let params = match parse_params(query) {
        Ok(params) => params,
        Err(code) => return bad_request(code),
    };

    debug!("Search params: {:?}", params);

    match search::search(&users, &params) {
        Ok(page) => {
            debug!(
                "Returning {} of {} users, more: {}",
                page.users.len(),
                page.total,
                page.has_more
            );
            (StatusCode::OK, Json(page.users)).into_response()
        }
        Err(err) => {
            debug!("Search failed: {err}");
            bad_request(error_code(&err))
        }
    }
}

fn authorized(headers: &HeaderMap, expected: &SecretString) -> bool {
    headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|token| token == expected.expose_secret())
}

fn parse_params(query: Result<Query<SearchArgs>, QueryRejection>) -> Result<SearchParams, ErrorCode> {
    let Ok(Query(args)) = query else {
        error!("Failed to parse query parameters");
        return Err(ErrorCode::BadParams);
    };

    let order_by = parse_number::<i64>(args.order_by.as_deref())?;
    let order_by = OrderBy::try_from(order_by).map_err(|err| {
        debug!("Rejected order_by: {err}");
        ErrorCode::BadOrderBy
    })?;

    Ok(SearchParams {
        limit: parse_number(args.limit.as_deref())?,
        offset: parse_number(args.offset.as_deref())?,
        query: args.query.unwrap_or_default(),
        order_field: args.order_field.unwrap_or_default(),
        order_by,
    })
}

// Missing or empty values count as zero; negative values fail for `usize`.
fn parse_number<T>(raw: Option<&str>) -> Result<T, ErrorCode>
where
    T: std::str::FromStr + Default,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse().map_err(|_| {
            debug!("Malformed numeric parameter: {value}");
            ErrorCode::BadParams
        }),
    }
}

fn error_code(err: &SearchError) -> ErrorCode {
    match err {
        SearchError::BadOrderField(_) => ErrorCode::BadOrderField,
        SearchError::OffsetOutOfRange { .. } => ErrorCode::OffsetOutOfRange,
    }
}

fn bad_request(code: ErrorCode) -> Response {
    (StatusCode::BAD_REQUEST, Json(SearchErrorResponse::from(code))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    #[test]
    fn parse_number_defaults_and_rejects() {
        assert_eq!(parse_number::<usize>(None), Ok(0));
        assert_eq!(parse_number::<usize>(Some("")), Ok(0));
        assert_eq!(parse_number::<usize>(Some(" 12 ")), Ok(12));
        assert_eq!(parse_number::<usize>(Some("-1")), Err(ErrorCode::BadParams));
        assert_eq!(parse_number::<i64>(Some("-1")), Ok(-1));
        assert_eq!(parse_number::<i64>(Some("1e3")), Err(ErrorCode::BadParams));
    }

    #[test]
    fn authorized_compares_the_header() {
        let expected = SecretString::from("access allowed".to_string());
        let mut headers = HeaderMap::new();
        assert!(!authorized(&headers, &expected));

        let name = HeaderName::from_static("accesstoken");
        headers.insert(name.clone(), HeaderValue::from_static("access denied"));
        assert!(!authorized(&headers, &expected));

        headers.insert(name, HeaderValue::from_static("access allowed"));
        assert!(authorized(&headers, &expected));
    }

    #[test]
    fn search_errors_map_to_wire_codes() {
        assert_eq!(
            error_code(&SearchError::BadOrderField("Random".to_string())),
            ErrorCode::BadOrderField
        );
        assert_eq!(
            error_code(&SearchError::OffsetOutOfRange {
                offset: 9,
                total: 2
            }),
            ErrorCode::OffsetOutOfRange
        );
    }
}
