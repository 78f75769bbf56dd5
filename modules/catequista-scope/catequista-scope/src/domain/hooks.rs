//! The hook registry the host calls into.
//!
//! Hooks never fail towards the host. Restricted identities get a narrowed
//! result or an explicit deny when a lookup breaks; other identities are
//! resolved without any lookup and so are never affected.

use std::sync::Arc;

use catequista_scope_sdk::{
    DocumentRef, EntityKind, IdentityDirectory, Operation, PermissionDecision, Profile,
    ProfileLinkResolver, SaveEvent, TurmaReader,
};
use portal_security::{Identity, RowPredicate};
use tracing::{debug, error, instrument};

use crate::config::ScopeConfig;
use crate::domain::document::DocumentAccessChecker;
use crate::domain::filter::build_filter;
use crate::domain::ports::NoticePublisher;
use crate::domain::role_sync::{RoleSynchronizer, SyncOutcome};
use crate::domain::scope::ScopeComputer;

/// Port implementations the hooks read and write through.
#[derive(Clone)]
pub struct ScopePorts {
    pub profiles: Arc<dyn ProfileLinkResolver>,
    pub identities: Arc<dyn IdentityDirectory>,
    pub turmas: Arc<dyn TurmaReader>,
}

/// Entry points registered with the host against [`EntityKind`] tags.
#[derive(Clone)]
pub struct ScopeHooks {
    scope: ScopeComputer,
    documents: DocumentAccessChecker,
    sync: RoleSynchronizer,
}

impl ScopeHooks {
    #[must_use]
    pub fn new(config: &ScopeConfig, ports: ScopePorts, notices: Arc<dyn NoticePublisher>) -> Self {
        Self {
            scope: ScopeComputer::new(ports.profiles, config),
            documents: DocumentAccessChecker::new(ports.turmas),
            sync: RoleSynchronizer::new(ports.identities, notices, config),
        }
    }

    /// Predicate the host ANDs into a list query for `kind`.
    ///
    /// Falls back to `DenyAll` if the scope cannot be computed.
    #[instrument(skip(self, identity), fields(identity = %identity.id()))]
    pub async fn list_filter(&self, kind: EntityKind, identity: &Identity) -> RowPredicate {
        match self.scope.compute(identity).await {
            Ok(scope) => build_filter(kind, &scope),
            Err(e) => {
                error!(error = %e, ?kind, "scope computation failed; denying list");
                RowPredicate::DenyAll
            }
        }
    }

    /// Document-permission hook.
    ///
    /// Identities without the restricted role get `Defer` so the host's own
    /// permission logic applies unchanged. The operation does not change the
    /// decision: role permissions already gate which operations are possible.
    #[instrument(skip(self, doc, identity), fields(identity = %identity.id(), kind = ?doc.kind()))]
    pub async fn has_permission(
        &self,
        doc: DocumentRef<'_>,
        operation: Operation,
        identity: &Identity,
    ) -> PermissionDecision {
        if !self.scope.is_restricted(identity) {
            return PermissionDecision::Defer;
        }

        let allowed = match self.scope.compute(identity).await {
            Ok(scope) => self.documents.can_access(&scope, doc).await,
            Err(e) => Err(e),
        };

        match allowed {
            Ok(true) => PermissionDecision::Allow,
            Ok(false) => {
                debug!(?operation, "document outside scope");
                PermissionDecision::Deny
            }
            Err(e) => {
                error!(error = %e, ?operation, "document check failed; denying");
                PermissionDecision::Deny
            }
        }
    }

    /// Profile save hook, called after insert and on every update.
    ///
    /// Failures are logged and swallowed so the host's save completes.
    #[instrument(skip(self, profile), fields(profile = %profile.id))]
    pub async fn on_document_saved(&self, profile: &Profile, event: SaveEvent) -> Option<SyncOutcome> {
        match self.sync.on_profile_saved(profile).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(error = %e, ?event, "role sync failed");
                None
            }
        }
    }
}
