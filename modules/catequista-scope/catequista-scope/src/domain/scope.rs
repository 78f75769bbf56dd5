use std::sync::Arc;

use catequista_scope_sdk::ProfileLinkResolver;
use portal_security::{AccessScope, Identity};
use tracing::{debug, instrument, warn};

use crate::config::ScopeConfig;
use crate::domain::error::DomainError;

/// Computes the [`AccessScope`] of an identity.
///
/// The scope is derived fresh on every call and never cached, so a change
/// to a profile's linked identity takes effect on the next request.
#[derive(Clone)]
pub struct ScopeComputer {
    profiles: Arc<dyn ProfileLinkResolver>,
    restricted_role: String,
}

impl ScopeComputer {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileLinkResolver>, config: &ScopeConfig) -> Self {
        Self {
            profiles,
            restricted_role: config.restricted_role.clone(),
        }
    }

    /// Whether `identity` holds the restricted role. Pure, no lookups.
    #[must_use]
    pub fn is_restricted(&self, identity: &Identity) -> bool {
        identity.has_role(&self.restricted_role)
    }

    /// Without the restricted role the scope is `Unrestricted` and no lookup
    /// is made. With it, the linked profile narrows the scope; a missing
    /// link or an empty profile id yields `Denied`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile lookup fails.
    #[instrument(skip(self, identity), fields(identity = %identity.id()))]
    pub async fn compute(&self, identity: &Identity) -> Result<AccessScope, DomainError> {
        if !self.is_restricted(identity) {
            return Ok(AccessScope::Unrestricted);
        }

        let profile = self
            .profiles
            .find_profile_for_identity(identity.id())
            .await?
            .filter(|p| !p.as_str().is_empty());

        match profile {
            Some(profile) => {
                debug!(profile = %profile, "restricted scope resolved");
                Ok(AccessScope::Restricted(profile))
            }
            None => {
                warn!(
                    role = %self.restricted_role,
                    "identity holds the restricted role but has no linked profile; denying"
                );
                Ok(AccessScope::Denied)
            }
        }
    }
}
