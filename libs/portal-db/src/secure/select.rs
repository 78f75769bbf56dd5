use sea_orm::{ColumnTrait, QueryFilter, Select};

use super::{ScopableEntity, build_predicate_condition};
use portal_security::RowPredicate;

/// Narrow an existing query by a [`RowPredicate`].
///
/// The rendered condition is ANDed with whatever the caller already filtered
/// on. An unconstrained predicate leaves the query untouched.
pub trait ScopedSelect: Sized {
    #[must_use]
    fn scoped(self, predicate: &RowPredicate) -> Self;
}

impl<E> ScopedSelect for Select<E>
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    fn scoped(self, predicate: &RowPredicate) -> Self {
        if predicate.is_unconstrained() {
            return self;
        }
        self.filter(build_predicate_condition::<E>(predicate))
    }
}
