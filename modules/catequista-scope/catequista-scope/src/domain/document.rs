use std::sync::Arc;

use catequista_scope_sdk::{Catecumeno, DocumentRef, Turma, TurmaReader};
use portal_security::{AccessScope, ScopableRow, properties};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::filter::{build_dependent_filter, build_owning_filter};

/// A student together with its owning class, if that class was found.
///
/// Lets the dependent-entity predicate be evaluated in memory the same way
/// the storage layer renders it as a subquery.
#[derive(Debug, Clone, Copy)]
pub struct EnrolledStudent<'a> {
    student: &'a Catecumeno,
    class: Option<&'a Turma>,
}

impl<'a> EnrolledStudent<'a> {
    #[must_use]
    pub fn new(student: &'a Catecumeno, class: Option<&'a Turma>) -> Self {
        Self { student, class }
    }
}

impl ScopableRow for EnrolledStudent<'_> {
    fn property(&self, name: &str) -> Option<&str> {
        self.student.property(name)
    }

    fn related(&self, via: &str) -> Option<&dyn ScopableRow> {
        match via {
            properties::OWNING_ENTITY_ID => self.class.map(|t| t as &dyn ScopableRow),
            _ => None,
        }
    }
}

/// Decides whether a single, already-loaded document is visible under a scope.
#[derive(Clone)]
pub struct DocumentAccessChecker {
    turmas: Arc<dyn TurmaReader>,
}

impl DocumentAccessChecker {
    #[must_use]
    pub fn new(turmas: Arc<dyn TurmaReader>) -> Self {
        Self { turmas }
    }

    /// Owning-entity check. Needs no lookups.
    #[must_use]
    pub fn can_access_owning(scope: &AccessScope, doc: &Turma) -> bool {
        build_owning_filter(scope).matches(doc)
    }

    /// Dependent-entity check.
    ///
    /// The owning class is always fetched fresh; a class that is missing,
    /// inactive or owned by someone else denies.
    ///
    /// # Errors
    ///
    /// Returns an error if the class lookup fails.
    #[instrument(skip(self, scope, doc), fields(catecumeno = %doc.id))]
    pub async fn can_access_dependent(
        &self,
        scope: &AccessScope,
        doc: &Catecumeno,
    ) -> Result<bool, DomainError> {
        let predicate = build_dependent_filter(scope);
        if predicate.is_unconstrained() {
            return Ok(true);
        }
        if predicate.is_deny_all() {
            return Ok(false);
        }

        let Some(turma_id) = doc.turma_id() else {
            debug!("student has no owning class; denying");
            return Ok(false);
        };

        let class = self.turmas.get_turma(turma_id).await?;
        if class.is_none() {
            debug!(turma = turma_id, "owning class not found; denying");
        }

        Ok(predicate.matches(&EnrolledStudent::new(doc, class.as_ref())))
    }

    /// Check any supported document.
    ///
    /// # Errors
    ///
    /// Returns an error if a required lookup fails.
    pub async fn can_access(
        &self,
        scope: &AccessScope,
        doc: DocumentRef<'_>,
    ) -> Result<bool, DomainError> {
        match doc {
            DocumentRef::Turma(turma) => Ok(Self::can_access_owning(scope, turma)),
            DocumentRef::Catecumeno(student) => self.can_access_dependent(scope, student).await,
        }
    }
}
