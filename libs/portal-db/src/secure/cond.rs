use sea_orm::{ColumnTrait, Condition, sea_query::Expr};

use super::ScopableEntity;
use portal_security::{FilterOp, RowPredicate, ScopeFilter};

/// Build a deny-all condition (`WHERE false`).
fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// Builds a `SeaORM` `Condition` from a [`RowPredicate`] using property resolution.
///
/// # Semantics
///
/// - Values are always bound parameters, never spliced into SQL text
/// - Unknown properties and unresolvable references fail closed (`false`)
/// - `AllOf` is AND, `AnyOf` is OR; an empty `AnyOf` denies
///
/// # Policy Rules
///
/// | Predicate | Behavior |
/// |-------|----------|
/// | `DenyAll` | `WHERE false` |
/// | `Unconstrained` | No filtering (empty condition) |
/// | `Filter` | `"table"."column" = ?` |
/// | `Related` | `"table"."fk" IN (SELECT ..)` |
pub fn build_predicate_condition<E>(predicate: &RowPredicate) -> Condition
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    match predicate {
        RowPredicate::Unconstrained => Condition::all(),
        RowPredicate::DenyAll => deny_all(),
        RowPredicate::Filter(filter) => build_filter_condition::<E>(filter),
        RowPredicate::AllOf(parts) => build_all_of::<E>(parts),
        RowPredicate::AnyOf(parts) => build_any_of::<E>(parts),
        RowPredicate::Related { via, predicate } => match E::resolve_reference(via, predicate) {
            Some((fk, subquery)) => Condition::all().add(fk.in_subquery(subquery)),
            None => {
                tracing::debug!(property = %via, "Unresolvable reference, failing closed");
                deny_all()
            }
        },
    }
}

fn build_filter_condition<E>(filter: &ScopeFilter) -> Condition
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    let Some(col) = E::resolve_property(filter.property()) else {
        tracing::debug!(property = %filter.property(), "Unknown property, failing closed");
        return deny_all();
    };
    match filter.op() {
        FilterOp::Eq => Condition::all().add(col.eq(filter.value())),
    }
}

fn build_all_of<E>(parts: &[RowPredicate]) -> Condition
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    if parts.iter().any(RowPredicate::is_deny_all) {
        return deny_all();
    }
    parts
        .iter()
        .filter(|p| !p.is_unconstrained())
        .fold(Condition::all(), |acc, p| {
            acc.add(build_predicate_condition::<E>(p))
        })
}

fn build_any_of<E>(parts: &[RowPredicate]) -> Condition
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    if parts.iter().any(RowPredicate::is_unconstrained) {
        return Condition::all();
    }
    let live: Vec<&RowPredicate> = parts.iter().filter(|p| !p.is_deny_all()).collect();
    if live.is_empty() {
        return deny_all();
    }
    live.into_iter().fold(Condition::any(), |acc, p| {
        acc.add(build_predicate_condition::<E>(p))
    })
}
