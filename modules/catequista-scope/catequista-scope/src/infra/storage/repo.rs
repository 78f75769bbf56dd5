use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use catequista_scope_sdk::models::ACTIVE_LABEL;
use catequista_scope_sdk::{
    Catecumeno, IdentityDirectory, ProfileLinkResolver, ScopeError, Turma, TurmaReader,
};
use portal_db::secure::{RowPredicate, ScopedSelect};
use portal_security::{IdentityId, ProfileId};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, instrument, warn};

use super::entity::{catecumeno, catequista, identity, identity_role, turma};
use super::migrations::Migrator;
use crate::domain::error::DomainError;
use crate::domain::hooks::ScopePorts;

fn storage(e: DbErr) -> ScopeError {
    ScopeError::Storage(e.to_string())
}

/// `SeaORM` implementation of the SDK ports, plus scoped list queries.
#[derive(Clone)]
pub struct OrmScopeRepository {
    db: DatabaseConnection,
}

impl OrmScopeRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns the driver error if a migration fails.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        Migrator::up(&self.db, None).await
    }

    /// Use this repository for every port.
    #[must_use]
    pub fn ports(self: &Arc<Self>) -> ScopePorts {
        ScopePorts {
            profiles: self.clone(),
            identities: self.clone(),
            turmas: self.clone(),
        }
    }

    /// List classes narrowed by `predicate`, optionally active only.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[instrument(skip(self, predicate))]
    pub async fn list_turmas(
        &self,
        predicate: &RowPredicate,
        only_active: bool,
    ) -> Result<Vec<Turma>, DomainError> {
        let mut query = turma::Entity::find();
        if only_active {
            query = query.filter(turma::Column::Status.eq(ACTIVE_LABEL));
        }
        let rows = query
            .scoped(predicate)
            .order_by_asc(turma::Column::Name)
            .all(&self.db)
            .await?;

        debug!(count = rows.len(), "turmas listed");
        Ok(rows.into_iter().map(Turma::from).collect())
    }

    /// List students narrowed by `predicate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[instrument(skip(self, predicate))]
    pub async fn list_catecumenos(
        &self,
        predicate: &RowPredicate,
    ) -> Result<Vec<Catecumeno>, DomainError> {
        let rows = catecumeno::Entity::find()
            .scoped(predicate)
            .order_by_asc(catecumeno::Column::Name)
            .all(&self.db)
            .await?;

        debug!(count = rows.len(), "catecumenos listed");
        Ok(rows.into_iter().map(Catecumeno::from).collect())
    }

    /// Load one student by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_catecumeno(&self, id: &str) -> Result<Option<Catecumeno>, DomainError> {
        let row = catecumeno::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;
        Ok(row.map(Catecumeno::from))
    }
}

#[async_trait]
impl ProfileLinkResolver for OrmScopeRepository {
    async fn find_profile_for_identity(
        &self,
        identity: &IdentityId,
    ) -> Result<Option<ProfileId>, ScopeError> {
        let rows = catequista::Entity::find()
            .filter(catequista::Column::UserId.eq(identity.as_str()))
            .order_by_asc(catequista::Column::Name)
            .limit(2)
            .all(&self.db)
            .await
            .map_err(storage)?;

        // The unique index prevents this; databases migrated without it may
        // still hold duplicates.
        if rows.len() > 1 {
            warn!(identity = %identity, "several profiles linked to one identity; using the first by name");
        }

        Ok(rows.into_iter().next().map(|m| ProfileId::new(m.name)))
    }
}

#[async_trait]
impl IdentityDirectory for OrmScopeRepository {
    async fn roles_of(&self, identity: &IdentityId) -> Result<Option<BTreeSet<String>>, ScopeError> {
        let exists = identity::Entity::find_by_id(identity.as_str().to_owned())
            .one(&self.db)
            .await
            .map_err(storage)?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let grants = identity_role::Entity::find()
            .filter(identity_role::Column::IdentityId.eq(identity.as_str()))
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(Some(grants.into_iter().map(|g| g.role).collect()))
    }

    async fn add_role(&self, identity: &IdentityId, role: &str) -> Result<(), ScopeError> {
        let grant = identity_role::ActiveModel {
            identity_id: Set(identity.as_str().to_owned()),
            role: Set(role.to_owned()),
        };

        identity_role::Entity::insert(grant)
            .on_conflict(
                OnConflict::columns([identity_role::Column::IdentityId, identity_role::Column::Role])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(storage)?;
        Ok(())
    }
}

#[async_trait]
impl TurmaReader for OrmScopeRepository {
    async fn get_turma(&self, id: &str) -> Result<Option<Turma>, ScopeError> {
        let row = turma::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await
            .map_err(storage)?;
        Ok(row.map(Turma::from))
    }
}
