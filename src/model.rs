//! Types shared by the search server and the search client.
//!
//! The wire format keeps the capitalized field names (`Id`, `Name`, ...) and the
//! numeric `order_by` values (`-1`, `0`, `1`) that existing consumers rely on.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Header carrying the shared access token.
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Largest page the client asks for, before the extra next-page probe record.
pub const MAX_PAGE_SIZE: i64 = 25;

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "About")]
    pub about: String,
    #[serde(rename = "Gender")]
    pub gender: String,
}

/// Sort direction. The discriminants are the values sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    Desc = -1,
    #[default]
    AsIs = 0,
    Asc = 1,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order: {0}")]
pub struct ParseOrderError(pub String);

impl OrderBy {
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        self as i8
    }
}

impl TryFrom<i64> for OrderBy {
    type Error = ParseOrderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Desc),
            0 => Ok(Self::AsIs),
            1 => Ok(Self::Asc),
            other => Err(ParseOrderError(other.to_string())),
        }
    }
}

// Accepts the numeric wire form as well as the names used on the command line.
impl FromStr for OrderBy {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            "as-is" | "asis" => Ok(Self::AsIs),
            other => other
                .parse::<i64>()
                .map_err(|_| ParseOrderError(s.to_string()))
                .and_then(Self::try_from),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Record attribute used as sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Age,
    Name,
}

impl FromStr for OrderField {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "Name" => Ok(Self::Name),
            "Id" => Ok(Self::Id),
            "Age" => Ok(Self::Age),
            other => Err(ParseOrderError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub limit: i64,
    pub offset: i64,
    /// Substring matched against name and about text.
    pub query: String,
    /// `Id`, `Age`, `Name` or empty (sorts by name).
    pub order_field: String,
    pub order_by: OrderBy,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub users: Vec<User>,
    pub next_page: bool,
    /// Limit the page was cut with after capping; 0 when uncapped.
    pub page_size: i64,
}

/// Closed set of error codes a 400 response may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadOrderField,
    BadOrderBy,
    BadParams,
    OffsetOutOfRange,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadOrderField => "ErrorBadOrderField",
            Self::BadOrderBy => "ErrorBadOrderBy",
            Self::BadParams => "ErrorBadParams",
            Self::OffsetOutOfRange => "no items with this offset",
        }
    }

    /// Returns `None` for codes this build does not know about.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        [
            Self::BadOrderField,
            Self::BadOrderBy,
            Self::BadParams,
            Self::OffsetOutOfRange,
        ]
        .into_iter()
        .find(|known| known.as_str() == code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
}

impl From<ErrorCode> for SearchErrorResponse {
    fn from(code: ErrorCode) -> Self {
        Self {
            error: code.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_keeps_wire_values() {
        assert_eq!(OrderBy::Desc.as_i8(), -1);
        assert_eq!(OrderBy::AsIs.as_i8(), 0);
        assert_eq!(OrderBy::Asc.as_i8(), 1);
        assert_eq!(OrderBy::default(), OrderBy::AsIs);
    }

    #[test]
    fn order_by_rejects_values_outside_the_enum() {
        assert_eq!(OrderBy::try_from(1_i64), Ok(OrderBy::Asc));
        assert_eq!(
            OrderBy::try_from(100_500_i64),
            Err(ParseOrderError("100500".to_string()))
        );
        assert!(OrderBy::try_from(2_i64).is_err());
    }

    #[test]
    fn order_by_parses_names_and_numbers() {
        assert_eq!("asc".parse::<OrderBy>(), Ok(OrderBy::Asc));
        assert_eq!("DESC".parse::<OrderBy>(), Ok(OrderBy::Desc));
        assert_eq!("as-is".parse::<OrderBy>(), Ok(OrderBy::AsIs));
        assert_eq!("-1".parse::<OrderBy>(), Ok(OrderBy::Desc));
        assert!("sideways".parse::<OrderBy>().is_err());
    }

    #[test]
    fn order_field_defaults_to_name() {
        assert_eq!("".parse::<OrderField>(), Ok(OrderField::Name));
        assert_eq!("Name".parse::<OrderField>(), Ok(OrderField::Name));
        assert_eq!("Id".parse::<OrderField>(), Ok(OrderField::Id));
        assert_eq!("Age".parse::<OrderField>(), Ok(OrderField::Age));
        assert_eq!(
            "Random".parse::<OrderField>(),
            Err(ParseOrderError("Random".to_string()))
        );
        // field names are case-sensitive
        assert!("id".parse::<OrderField>().is_err());
    }

    #[test]
    fn error_codes_round_trip_through_their_text() {
        for code in [
            ErrorCode::BadOrderField,
            ErrorCode::BadOrderBy,
            ErrorCode::BadParams,
            ErrorCode::OffsetOutOfRange,
        ] {
            assert_eq!(ErrorCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(ErrorCode::parse("ErrorSomethingElse"), None);
    }

    #[test]
    fn user_uses_capitalized_wire_names() -> anyhow::Result<()> {
        let user = User {
            id: 7,
            name: "Leann Travis".to_string(),
            age: 34,
            about: "Lorem".to_string(),
            gender: "female".to_string(),
        };
        let value = serde_json::to_value(&user)?;
        assert_eq!(value["Id"], 7);
        assert_eq!(value["Name"], "Leann Travis");
        assert_eq!(value["Gender"], "female");

        let body = serde_json::to_string(&SearchErrorResponse::from(ErrorCode::BadOrderField))?;
        assert_eq!(body, r#"{"Error":"ErrorBadOrderField"}"#);
        Ok(())
    }
}
