//! Installer: provisions the restricted role and its baseline permissions.
//!
//! Safe to run on every start; existing rows are left in place and the
//! permission flags are brought back to the configured values.

use anyhow::Context;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::info;

use crate::config::{EntityPermissionConfig, ScopeConfig};
use crate::infra::storage::entity::{role, role_permission};

/// Run after the module's migrations.
///
/// # Errors
///
/// Returns an error if a role or permission row cannot be written.
pub async fn after_install<C: ConnectionTrait>(db: &C, config: &ScopeConfig) -> anyhow::Result<()> {
    ensure_role(db, &config.restricted_role)
        .await
        .with_context(|| format!("failed to provision role {}", config.restricted_role))?;

    for permission in &config.permissions {
        grant(db, &config.restricted_role, permission)
            .await
            .with_context(|| format!("failed to grant permissions on {}", permission.entity))?;
    }

    info!(
        role = %config.restricted_role,
        entities = config.permissions.len(),
        "catequista role provisioned"
    );
    Ok(())
}

async fn ensure_role<C: ConnectionTrait>(db: &C, name: &str) -> Result<(), sea_orm::DbErr> {
    let row = role::ActiveModel {
        name: Set(name.to_owned()),
        desk_access: Set(true),
    };
    role::Entity::insert(row)
        .on_conflict(OnConflict::column(role::Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

async fn grant<C: ConnectionTrait>(
    db: &C,
    role: &str,
    permission: &EntityPermissionConfig,
) -> Result<(), sea_orm::DbErr> {
    let row = role_permission::ActiveModel {
        role: Set(role.to_owned()),
        entity: Set(permission.entity.clone()),
        read: Set(permission.read),
        write: Set(permission.write),
        create: Set(permission.create),
        delete: Set(permission.delete),
    };
    role_permission::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([role_permission::Column::Role, role_permission::Column::Entity])
                .update_columns([
                    role_permission::Column::Read,
                    role_permission::Column::Write,
                    role_permission::Column::Create,
                    role_permission::Column::Delete,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
