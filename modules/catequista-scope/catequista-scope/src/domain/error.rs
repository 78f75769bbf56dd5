use catequista_scope_sdk::ScopeError;
use thiserror::Error;

/// Errors surfaced by the domain services.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Port(#[from] ScopeError),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
