//! Row predicates for the list path.
//!
//! The predicates built here are also what the document check evaluates,
//! so a record appears in a list exactly when opening it would be allowed.

use catequista_scope_sdk::EntityKind;
use catequista_scope_sdk::models::ACTIVE_LABEL;
use portal_security::{AccessScope, ProfileId, RowPredicate, properties};

/// Predicate for classes: owned through either teacher slot.
///
/// Status is not part of it, so a teacher still sees their closed classes.
#[must_use]
pub fn build_owning_filter(scope: &AccessScope) -> RowPredicate {
    match scope {
        AccessScope::Unrestricted => RowPredicate::Unconstrained,
        AccessScope::Denied => RowPredicate::DenyAll,
        AccessScope::Restricted(profile) => owned_by(profile),
    }
}

/// Predicate for students: enrolled in an active class owned by the profile.
#[must_use]
pub fn build_dependent_filter(scope: &AccessScope) -> RowPredicate {
    match scope {
        AccessScope::Unrestricted => RowPredicate::Unconstrained,
        AccessScope::Denied => RowPredicate::DenyAll,
        AccessScope::Restricted(profile) => RowPredicate::related(
            properties::OWNING_ENTITY_ID,
            RowPredicate::AllOf(vec![
                owned_by(profile),
                RowPredicate::eq(properties::STATUS, ACTIVE_LABEL),
            ]),
        ),
    }
}

/// Dispatch on the entity kind a list hook was registered for.
#[must_use]
pub fn build_filter(kind: EntityKind, scope: &AccessScope) -> RowPredicate {
    match kind {
        EntityKind::Turma => build_owning_filter(scope),
        EntityKind::Catecumeno => build_dependent_filter(scope),
    }
}

fn owned_by(profile: &ProfileId) -> RowPredicate {
    RowPredicate::AnyOf(vec![
        RowPredicate::eq(properties::OWNER_PRIMARY, profile.as_str()),
        RowPredicate::eq(properties::OWNER_SECONDARY, profile.as_str()),
    ])
}
