//! Filter, sort and paginate a user directory.
//!
//! The stages always run in the same order: substring filter, then sort, then
//! the offset/limit slice. Every stage works on borrowed records; users are only
//! cloned into the final [`Page`].

mod paginate;
mod sort;

pub use paginate::{paginate, Page};
pub use sort::sort;

use crate::model::{OrderBy, User};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid order field: {0}")]
    BadOrderField(String),
    #[error("no items with this offset: {offset} >= {total}")]
    OffsetOutOfRange { offset: usize, total: usize },
}

/// Server-side search parameters, already validated for sign.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: String,
    pub order_field: String,
    pub order_by: OrderBy,
    /// Zero means no cap.
    pub limit: usize,
    pub offset: usize,
}

/// Users whose name or about text contains `query`, in directory order.
///
/// Matching is plain case-sensitive containment; an empty query keeps
/// everything.
#[must_use]
pub fn filter<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    if query.is_empty() {
        return users.iter().collect();
    }

    users
        .iter()
        .filter(|user| user.name.contains(query) || user.about.contains(query))
        .collect()
}

/// Run the whole pipeline over `users`.
///
/// # Errors
/// Returns [`SearchError::BadOrderField`] for an unknown sort field and
/// [`SearchError::OffsetOutOfRange`] when the offset is past the filtered set.
pub fn search(users: &[User], params: &SearchParams) -> Result<Page, SearchError> {
    let mut found = filter(users, &params.query);
    sort(&mut found, &params.order_field, params.order_by)?;
    paginate(&found, params.offset, params.limit)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn user(id: i64, name: &str, age: i64, about: &str) -> User {
        User {
            id,
            name: name.to_string(),
            age,
            about: about.to_string(),
            gender: if id % 2 == 0 { "male" } else { "female" }.to_string(),
        }
    }

    pub(crate) fn sample() -> Vec<User> {
        vec![
            user(3, "Everett Dillard", 27, "Sint eu id sint irure"),
            user(0, "Boyd Wolf", 22, "Nulla cillum enim"),
            user(2, "Brooks Aguilar", 25, "Velit ullamco est"),
            user(1, "Hilda Mayer", 21, "Sit commodo consectetur"),
            user(4, "Owen Lynn", 30, "Elit anim elit"),
        ]
    }

    #[test]
    fn empty_query_keeps_directory_order() {
        let users = sample();
        let ids: Vec<i64> = filter(&users, "").iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 0, 2, 1, 4]);
    }

    #[test]
    fn query_matches_name_or_about() {
        let users = sample();
        // "Wolf" is only in a name, "commodo" only in an about text
        let by_name: Vec<i64> = filter(&users, "Wolf").iter().map(|u| u.id).collect();
        let by_about: Vec<i64> = filter(&users, "commodo").iter().map(|u| u.id).collect();
        assert_eq!(by_name, vec![0]);
        assert_eq!(by_about, vec![1]);
    }

    #[test]
    fn query_is_case_sensitive() {
        let users = sample();
        assert!(filter(&users, "wolf").is_empty());
        assert_eq!(filter(&users, "Sint").len(), 1);
    }

    #[test]
    fn search_filters_before_sorting_and_paging() -> Result<(), SearchError> {
        let users = sample();
        let params = SearchParams {
            query: "ll".to_string(),
            order_field: "Id".to_string(),
            order_by: OrderBy::Asc,
            limit: 1,
            offset: 1,
        };

        let page = search(&users, &params)?;
        let ids: Vec<i64> = page.users.iter().map(|u| u.id).collect();

        // ids matching "ll": 3, 0, 2 -> sorted 0, 2, 3 -> skip one, take one
        assert_eq!(ids, vec![2]);
        assert!(page.has_more);
        assert_eq!(page.total, 3);
        Ok(())
    }

    #[test]
    fn bad_order_field_wins_over_as_is() {
        let users = sample();
        let params = SearchParams {
            order_field: "Random".to_string(),
            ..SearchParams::default()
        };
        assert_eq!(
            search(&users, &params),
            Err(SearchError::BadOrderField("Random".to_string()))
        );
    }

    #[test]
    fn offset_is_checked_after_filtering() {
        let users = sample();
        let params = SearchParams {
            query: "Wolf".to_string(),
            offset: 1,
            ..SearchParams::default()
        };
        assert_eq!(
            search(&users, &params),
            Err(SearchError::OffsetOutOfRange {
                offset: 1,
                total: 1
            })
        );
    }

    #[test]
    fn identical_requests_give_identical_pages() -> Result<(), SearchError> {
        let users = sample();
        let params = SearchParams {
            order_field: "Age".to_string(),
            order_by: OrderBy::Desc,
            limit: 3,
            ..SearchParams::default()
        };
        assert_eq!(search(&users, &params)?, search(&users, &params)?);
        Ok(())
    }
}
