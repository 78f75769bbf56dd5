//! Error types for the catequista scope ports.

use thiserror::Error;

/// Errors returned by the ports the scope module reads and writes through.
///
/// "Not found" is not an error at this level: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// The backing store failed or is unavailable.
    #[error("storage error: {0}")]
    Storage(String),
}
