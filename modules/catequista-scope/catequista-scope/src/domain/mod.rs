//! Domain layer: scoping rules and the hooks the host calls into.
//!
//! The domain reads identities and documents only through the SDK ports
//! ([`ProfileLinkResolver`](catequista_scope_sdk::ProfileLinkResolver),
//! [`IdentityDirectory`](catequista_scope_sdk::IdentityDirectory),
//! [`TurmaReader`](catequista_scope_sdk::TurmaReader)); it never touches the
//! database directly.

pub mod document;
pub mod error;
pub mod filter;
pub mod hooks;
pub mod ports;
pub mod role_sync;
pub mod scope;
