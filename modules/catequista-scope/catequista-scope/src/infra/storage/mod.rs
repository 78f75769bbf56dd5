//! `SeaORM` storage for the scope module.
//!
//! Table and column names follow the host schema (`turmas.catequista`,
//! `catecumenos.turma`, `catequistas.user_id`, ...). The authorization
//! vocabulary is mapped onto them by the [`ScopableEntity`] impls in
//! [`entity`].
//!
//! [`ScopableEntity`]: portal_db::secure::ScopableEntity

pub mod entity;
pub mod migrations;
mod repo;

pub use repo::OrmScopeRepository;
