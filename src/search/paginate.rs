use super::SearchError;
use crate::model::User;

/// One slice of a filtered and sorted result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub users: Vec<User>,
    /// Records exist past the end of this page.
    pub has_more: bool,
    /// Size of the filtered result the page was cut from.
    pub total: usize,
}

/// Cut `[offset, offset + limit)` out of `users`, clamped to its length.
///
/// A `limit` of zero means no cap: the whole tail from `offset` is returned.
///
/// # Errors
/// Returns [`SearchError::OffsetOutOfRange`] when `offset >= users.len()`, which
/// includes any offset into an empty result.
pub fn paginate(users: &[&User], offset: usize, limit: usize) -> Result<Page, SearchError> {
    let total = users.len();

    if offset >= total {
        return Err(SearchError::OffsetOutOfRange { offset, total });
    }

    let end = if limit == 0 {
        total
    } else {
        offset.saturating_add(limit).min(total)
    };

    Ok(Page {
        users: users[offset..end].iter().map(|&user| user.clone()).collect(),
        has_more: end < total,
        total,
    })
}
