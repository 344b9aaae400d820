use super::SearchError;
use crate::model::{OrderBy, OrderField, User};
use std::cmp::Ordering;

/// Order `users` in place by `field` and `direction`.
///
/// `Asc` is ascending and `Desc` descending, numerically for `Id`/`Age` and
/// lexically for `Name`. `AsIs` leaves the slice untouched, but the field is
/// still validated. The sort is stable in both directions, so records with equal
/// keys keep their directory order.
///
/// # Errors
/// Returns [`SearchError::BadOrderField`] if `field` is not `Id`, `Age`, `Name` or
/// empty.
pub fn sort(users: &mut [&User], field: &str, direction: OrderBy) -> Result<(), SearchError> {
    let field = field
        .parse::<OrderField>()
        .map_err(|_| SearchError::BadOrderField(field.to_string()))?;

    let compare: fn(&User, &User) -> Ordering = match field {
        OrderField::Id => |a, b| a.id.cmp(&b.id),
        OrderField::Age => |a, b| a.age.cmp(&b.age),
        OrderField::Name => |a, b| a.name.cmp(&b.name),
    };

    match direction {
        OrderBy::AsIs => {}
        OrderBy::Asc => users.sort_by(|a, b| compare(a, b)),
        OrderBy::Desc => users.sort_by(|a, b| compare(b, a)),
    }

    Ok(())
}
