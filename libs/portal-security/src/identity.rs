use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::IdentityId;

/// Identity used for unauthenticated requests.
pub const GUEST_IDENTITY: &str = "Guest";

/// An authenticated actor and the roles granted to it.
///
/// Owned by the host's session system. This crate only reads it; callers pass
/// it explicitly instead of relying on any ambient session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: IdentityId,
    roles: BTreeSet<String>,
}

impl Identity {
    #[must_use]
    pub fn builder() -> IdentityBuilder {
        IdentityBuilder::default()
    }

    /// The guest identity: no roles at all.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: IdentityId::new(GUEST_IDENTITY),
            roles: BTreeSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Builder for [`Identity`].
#[derive(Debug, Default)]
pub struct IdentityBuilder {
    id: Option<IdentityId>,
    roles: BTreeSet<String>,
}

impl IdentityBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<IdentityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Build the identity. Without an explicit id the guest id is used.
    #[must_use]
    pub fn build(self) -> Identity {
        Identity {
            id: self.id.unwrap_or_else(|| IdentityId::new(GUEST_IDENTITY)),
            roles: self.roles,
        }
    }
}
