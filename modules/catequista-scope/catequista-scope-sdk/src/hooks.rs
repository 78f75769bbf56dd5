//! Host hook contracts.
//!
//! The host calls into the scope module at three points: before running a
//! list query, when opening a single document, and after saving a profile.

use serde::{Deserialize, Serialize};

use crate::models::{Catecumeno, Turma};

/// Entity kinds the list-filter and document hooks are registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Turma,
    Catecumeno,
}

/// The operation the host is about to perform on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
    Create,
    Delete,
}

/// Result of the document-permission hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionDecision {
    Allow,
    Deny,
    /// Not our call: the host falls back to its own permission logic.
    Defer,
}

/// Profile lifecycle events the host forwards to the save hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveEvent {
    AfterInsert,
    OnUpdate,
}

/// A borrowed, already-loaded document handed to the permission hook.
#[derive(Debug, Clone, Copy)]
pub enum DocumentRef<'a> {
    Turma(&'a Turma),
    Catecumeno(&'a Catecumeno),
}

impl DocumentRef<'_> {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Turma(_) => EntityKind::Turma,
            Self::Catecumeno(_) => EntityKind::Catecumeno,
        }
    }
}
