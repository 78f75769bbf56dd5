#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Database helpers for the catechesis portal.
//!
//! - [`secure`] renders [`portal_security::RowPredicate`] values into `SeaORM`
//!   conditions, with every compared value bound as a parameter
//! - [`connect_db`] opens a pooled connection with explicit pool bounds

pub mod secure;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Pool options for [`connect_db`].
#[derive(Debug, Clone, Default)]
pub struct ConnectOpts {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    pub acquire_timeout: Option<Duration>,
}

/// Connect to the database at `url`.
///
/// In-memory `SQLite` databases exist per connection, so callers using
/// `sqlite::memory:` should pin `max_conns` to 1.
///
/// # Errors
///
/// Returns the driver error if the connection cannot be established.
pub async fn connect_db(url: &str, opts: ConnectOpts) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    if let Some(max) = opts.max_conns {
        options.max_connections(max);
    }
    if let Some(min) = opts.min_conns {
        options.min_connections(min);
    }
    if let Some(timeout) = opts.acquire_timeout {
        options.acquire_timeout(timeout);
    }
    options.sqlx_logging(false);

    tracing::debug!(max_conns = ?opts.max_conns, "Connecting to database");
    Database::connect(options).await
}
