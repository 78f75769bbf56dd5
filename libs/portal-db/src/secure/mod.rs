//! Row-level scoping for `SeaORM` queries.
//!
//! Entities opt in by implementing [`ScopableEntity`], which maps
//! authorization property names to columns. [`build_predicate_condition`]
//! turns a [`RowPredicate`] into a `Condition`, and [`ScopedSelect`] ANDs that
//! condition into an existing `Select` without touching the caller's own
//! constraints.

mod cond;
mod entity_traits;
mod select;

pub use cond::build_predicate_condition;
pub use entity_traits::{ScopableEntity, reference_subquery};
pub use portal_security::{AccessScope, RowPredicate};
pub use select::ScopedSelect;
