//! Outbound ports owned by the domain.

use std::fmt;

use portal_security::IdentityId;

/// User-facing notices raised by the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncNotice {
    /// The restricted role was newly granted to an identity.
    RoleAssigned { identity: IdentityId, role: String },
}

impl fmt::Display for SyncNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoleAssigned { identity, role } => {
                write!(f, "Role {role} assigned to user {identity}")
            }
        }
    }
}

/// Delivers notices to whoever triggered the change (the host shows them
/// as a message to the editing user).
pub trait NoticePublisher: Send + Sync {
    fn publish(&self, notice: &SyncNotice);
}

/// Publisher that only logs the notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNoticePublisher;

impl NoticePublisher for TracingNoticePublisher {
    fn publish(&self, notice: &SyncNotice) {
        tracing::info!(%notice, "notice published");
    }
}
