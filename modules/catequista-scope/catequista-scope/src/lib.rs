#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Catequista scope module.
//!
//! Narrows what a holder of the restricted teacher role sees: only the
//! classes (`Turma`) they teach and the students (`Catecumeno`) enrolled in
//! their active classes. Everyone else is unaffected.
//!
//! ## Layout
//!
//! - [`domain`] - scope computation, predicate building, document checks,
//!   role sync and the hook registry the host calls into
//! - [`infra::storage`] - `SeaORM` entities, migrations and a repository
//!   implementing the SDK ports
//! - [`setup`] - installer that provisions the role and its baseline permissions
//! - [`config`] - module configuration
//!
//! ## Flow
//!
//! ```text
//! Identity ──► ScopeComputer ──► AccessScope ──► build_*_filter ──► RowPredicate
//!                                                                     │
//!                         list path: Select::scoped(&predicate) ◄─────┤
//!                     document path: predicate.matches(&document) ◄───┘
//! ```

pub mod config;
pub mod domain;
pub mod infra;
pub mod setup;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{EntityPermissionConfig, ScopeConfig};
pub use domain::document::DocumentAccessChecker;
pub use domain::error::DomainError;
pub use domain::filter::{build_dependent_filter, build_filter, build_owning_filter};
pub use domain::hooks::{ScopeHooks, ScopePorts};
pub use domain::ports::{NoticePublisher, SyncNotice, TracingNoticePublisher};
pub use domain::role_sync::{RoleSynchronizer, SyncOutcome};
pub use domain::scope::ScopeComputer;
pub use infra::storage::OrmScopeRepository;
