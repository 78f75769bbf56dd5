use std::sync::Arc;

use catequista_scope_sdk::{IdentityDirectory, Profile};
use tracing::{debug, error, info, instrument};

use crate::config::ScopeConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::{NoticePublisher, SyncNotice};

/// What [`RoleSynchronizer::on_profile_saved`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The profile has no linked identity; nothing to do.
    NoLinkedIdentity,
    /// The linked identity does not exist in the directory.
    IdentityNotFound,
    /// The identity already held the role; nothing written.
    AlreadyAssigned,
    /// The role was granted and a notice published.
    RoleAssigned,
}

/// Keeps the restricted role in step with profile links: whoever a teacher
/// profile points at gets the role.
///
/// Never removes the role, not even when the link is cleared or moved.
#[derive(Clone)]
pub struct RoleSynchronizer {
    identities: Arc<dyn IdentityDirectory>,
    notices: Arc<dyn NoticePublisher>,
    restricted_role: String,
}

impl RoleSynchronizer {
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityDirectory>,
        notices: Arc<dyn NoticePublisher>,
        config: &ScopeConfig,
    ) -> Self {
        Self {
            identities,
            notices,
            restricted_role: config.restricted_role.clone(),
        }
    }

    /// Grant the restricted role to the profile's linked identity.
    ///
    /// Idempotent: a second call for the same profile writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory lookup or the role write fails.
    #[instrument(skip(self, profile), fields(profile = %profile.id))]
    pub async fn on_profile_saved(&self, profile: &Profile) -> Result<SyncOutcome, DomainError> {
        let Some(identity) = profile
            .linked_identity
            .as_ref()
            .filter(|id| !id.as_str().is_empty())
        else {
            debug!("profile has no linked identity");
            return Ok(SyncOutcome::NoLinkedIdentity);
        };

        let Some(roles) = self.identities.roles_of(identity).await? else {
            error!(
                identity = %identity,
                profile = %profile.id,
                "linked identity not found; role not assigned"
            );
            return Ok(SyncOutcome::IdentityNotFound);
        };

        if roles.contains(&self.restricted_role) {
            debug!(identity = %identity, "role already assigned");
            return Ok(SyncOutcome::AlreadyAssigned);
        }

        self.identities.add_role(identity, &self.restricted_role).await?;
        info!(identity = %identity, role = %self.restricted_role, "role assigned");
        self.notices.publish(&SyncNotice::RoleAssigned {
            identity: identity.clone(),
            role: self.restricted_role.clone(),
        });

        Ok(SyncOutcome::RoleAssigned)
    }
}
