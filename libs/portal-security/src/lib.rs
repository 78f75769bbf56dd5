#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Security primitives shared by the catechesis portal crates.
//!
//! - [`Identity`] - the authenticated actor, threaded explicitly through every call
//! - [`AccessScope`] - the per-request visibility decision for one identity
//! - [`RowPredicate`] - storage-neutral row filter rendered by `portal-db`

pub mod access_scope;
pub mod identity;
pub mod ids;

pub use access_scope::{
    AccessScope, FilterOp, RowPredicate, ScopableRow, ScopeFilter, properties,
};
pub use identity::{Identity, IdentityBuilder};
pub use ids::{IdentityId, ProfileId};
