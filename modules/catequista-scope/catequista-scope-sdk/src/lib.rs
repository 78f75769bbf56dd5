//! Catequista Scope SDK
//!
//! This crate provides the public contract of the `catequista_scope` module:
//!
//! - [`Profile`], [`Turma`], [`Catecumeno`] - the documents the scope is computed over
//! - [`ProfileLinkResolver`], [`IdentityDirectory`], [`TurmaReader`] - ports the module reads through
//! - [`EntityKind`], [`Operation`], [`PermissionDecision`], [`SaveEvent`] - host hook contracts
//! - [`ScopeError`] - port error type
//!
//! ## Usage
//!
//! ```ignore
//! use catequista_scope_sdk::{DocumentRef, EntityKind, Operation, PermissionDecision};
//!
//! // List path: AND the predicate into the host query
//! let predicate = hooks.list_filter(EntityKind::Turma, &identity).await;
//!
//! // Document path: `Defer` means "use the host's default permission logic"
//! match hooks.has_permission(DocumentRef::Turma(&turma), Operation::Read, &identity).await {
//!     PermissionDecision::Allow => {}
//!     PermissionDecision::Deny => return Err(forbidden()),
//!     PermissionDecision::Defer => host_default_check()?,
//! }
//! ```

pub mod api;
pub mod error;
pub mod hooks;
pub mod models;

pub use api::{IdentityDirectory, ProfileLinkResolver, TurmaReader};
pub use error::ScopeError;
pub use hooks::{DocumentRef, EntityKind, Operation, PermissionDecision, SaveEvent};
pub use models::{Catecumeno, OtherStatus, Profile, Turma, TurmaStatus};
