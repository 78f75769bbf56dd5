//! Ports consumed by the scope module.
//!
//! The host (or the module's own `SeaORM` storage) implements these. All of
//! them are read-mostly, single-record lookups; only
//! [`IdentityDirectory::add_role`] writes.

use std::collections::BTreeSet;

use async_trait::async_trait;
use portal_security::{IdentityId, ProfileId};

use crate::error::ScopeError;
use crate::models::Turma;

/// Finds the teacher profile linked to an identity.
#[async_trait]
pub trait ProfileLinkResolver: Send + Sync {
    /// Return the profile whose `linked_identity` is `identity`, if any.
    ///
    /// # Errors
    ///
    /// - `Storage` if the lookup cannot be performed
    async fn find_profile_for_identity(
        &self,
        identity: &IdentityId,
    ) -> Result<Option<ProfileId>, ScopeError>;
}

/// Read and extend the role set of an identity.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Current roles of `identity`, or `None` if no such identity exists.
    ///
    /// # Errors
    ///
    /// - `Storage` if the lookup cannot be performed
    async fn roles_of(&self, identity: &IdentityId) -> Result<Option<BTreeSet<String>>, ScopeError>;

    /// Grant `role` to `identity`. Granting a role that is already present
    /// must leave exactly one grant.
    ///
    /// # Errors
    ///
    /// - `Storage` if the write fails
    async fn add_role(&self, identity: &IdentityId, role: &str) -> Result<(), ScopeError>;
}

/// Read access to class records by id.
#[async_trait]
pub trait TurmaReader: Send + Sync {
    /// # Errors
    ///
    /// - `Storage` if the lookup cannot be performed
    async fn get_turma(&self, id: &str) -> Result<Option<Turma>, ScopeError>;
}
