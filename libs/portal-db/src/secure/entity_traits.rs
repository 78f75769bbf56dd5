use sea_orm::sea_query::SelectStatement;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, QueryTrait};

use super::cond::build_predicate_condition;
use portal_security::{RowPredicate, properties};

/// Contract for entities that can be filtered by a [`RowPredicate`].
///
/// # Example
/// ```rust,ignore
/// impl ScopableEntity for turma::Entity {
///     fn resolve_property(property: &str) -> Option<Self::Column> {
///         match property {
///             properties::RESOURCE_ID => Some(turma::Column::Name),
///             properties::OWNER_PRIMARY => Some(turma::Column::Catequista),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ScopableEntity: EntityTrait {
    /// Map an authorization property to a column.
    ///
    /// Returning `None` makes any filter on that property fail closed.
    fn resolve_property(property: &str) -> Option<Self::Column>;

    /// Resolve a foreign-key property to the local column and a subquery
    /// selecting the referenced keys that satisfy `predicate`.
    ///
    /// Returning `None` makes the `Related` predicate fail closed.
    fn resolve_reference(
        property: &str,
        predicate: &RowPredicate,
    ) -> Option<(Self::Column, SelectStatement)> {
        let _ = (property, predicate);
        None
    }
}

/// `SELECT <target id> FROM <target> WHERE <predicate>`.
///
/// Returns `None` when the target does not expose [`properties::RESOURCE_ID`].
pub fn reference_subquery<T>(predicate: &RowPredicate) -> Option<SelectStatement>
where
    T: ScopableEntity,
    T::Column: ColumnTrait + Copy,
{
    let key = T::resolve_property(properties::RESOURCE_ID)?;
    Some(
        T::find()
            .select_only()
            .column(key)
            .filter(build_predicate_condition::<T>(predicate))
            .into_query(),
    )
}
