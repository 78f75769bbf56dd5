//! Documents the scope is computed over.
//!
//! Field names follow the authorization vocabulary
//! ([`portal_security::properties`]); the storage layer maps them onto the
//! host's columns (`catequista`, `catequista_adj`, `turma`, ...).

use serde::{Deserialize, Serialize};

use portal_security::{IdentityId, ProfileId, ScopableRow, properties};

/// Status label the host stores for an active class.
pub const ACTIVE_LABEL: &str = "Activo";

/// A teacher profile (`Catequista`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    /// The host user this profile belongs to. Editing it triggers role sync.
    pub linked_identity: Option<IdentityId>,
}

/// Lifecycle status of a class.
///
/// Built only from a label, so the active label always maps to `Active`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TurmaStatus {
    Active,
    /// Any other label, kept verbatim.
    Other(OtherStatus),
}

/// A status label other than [`ACTIVE_LABEL`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OtherStatus(String);

impl OtherStatus {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TurmaStatus {
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::from(label.to_owned())
    }

    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            Self::Active => ACTIVE_LABEL,
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for TurmaStatus {
    fn from(label: String) -> Self {
        if label == ACTIVE_LABEL {
            Self::Active
        } else {
            Self::Other(OtherStatus(label))
        }
    }
}

impl From<TurmaStatus> for String {
    fn from(status: TurmaStatus) -> Self {
        match status {
            TurmaStatus::Active => ACTIVE_LABEL.to_owned(),
            TurmaStatus::Other(OtherStatus(label)) => label,
        }
    }
}

/// A class (`Turma`), the owning entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turma {
    pub id: String,
    pub owner_primary: Option<ProfileId>,
    pub owner_secondary: Option<ProfileId>,
    pub status: TurmaStatus,
}

impl ScopableRow for Turma {
    fn property(&self, name: &str) -> Option<&str> {
        match name {
            properties::RESOURCE_ID => Some(self.id.as_str()),
            properties::OWNER_PRIMARY => self.owner_primary.as_ref().map(ProfileId::as_str),
            properties::OWNER_SECONDARY => self.owner_secondary.as_ref().map(ProfileId::as_str),
            properties::STATUS => Some(self.status.as_label()),
            _ => None,
        }
    }
}

/// A student (`Catecumeno`), the dependent entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catecumeno {
    pub id: String,
    /// Owning class id. Required by the host schema, but a loaded document
    /// may still carry an empty value.
    pub turma: Option<String>,
}

impl Catecumeno {
    /// The owning class id, treating an empty string as absent.
    #[must_use]
    pub fn turma_id(&self) -> Option<&str> {
        self.turma.as_deref().filter(|t| !t.is_empty())
    }
}

impl ScopableRow for Catecumeno {
    fn property(&self, name: &str) -> Option<&str> {
        match name {
            properties::RESOURCE_ID => Some(self.id.as_str()),
            properties::OWNING_ENTITY_ID => self.turma_id(),
            _ => None,
        }
    }
}
