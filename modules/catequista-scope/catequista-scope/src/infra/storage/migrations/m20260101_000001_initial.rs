use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_documents(manager).await?;
        create_profiles(manager).await?;
        create_identities(manager).await?;
        create_roles(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RolePermissions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IdentityRoles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Identities::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Catequistas::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Catecumenos::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Turmas::Table).if_exists().to_owned())
            .await
    }
}

async fn create_documents(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Turmas::Table)
                .if_not_exists()
                .col(ColumnDef::new(Turmas::Name).string().not_null().primary_key())
                .col(ColumnDef::new(Turmas::Fase).string().null())
                .col(ColumnDef::new(Turmas::Catequista).string().null())
                .col(ColumnDef::new(Turmas::CatequistaAdj).string().null())
                .col(ColumnDef::new(Turmas::Status).string().not_null())
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Catecumenos::Table)
                .if_not_exists()
                .col(ColumnDef::new(Catecumenos::Name).string().not_null().primary_key())
                .col(ColumnDef::new(Catecumenos::Fase).string().null())
                .col(ColumnDef::new(Catecumenos::Turma).string().null())
                .col(ColumnDef::new(Catecumenos::Status).string().null())
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name("idx_catecumenos_turma")
                .table(Catecumenos::Table)
                .col(Catecumenos::Turma)
                .to_owned(),
        )
        .await?;

    Ok(())
}

async fn create_profiles(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Catequistas::Table)
                .if_not_exists()
                .col(ColumnDef::new(Catequistas::Name).string().not_null().primary_key())
                .col(ColumnDef::new(Catequistas::UserId).string().null())
                .to_owned(),
        )
        .await?;

    // At most one profile per identity.
    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name("idx_catequistas_user_id")
                .table(Catequistas::Table)
                .col(Catequistas::UserId)
                .unique()
                .to_owned(),
        )
        .await
}

async fn create_identities(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Identities::Table)
                .if_not_exists()
                .col(ColumnDef::new(Identities::Id).string().not_null().primary_key())
                .col(ColumnDef::new(Identities::FullName).string().null())
                .col(
                    ColumnDef::new(Identities::Enabled)
                        .boolean()
                        .not_null()
                        .default(true),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(IdentityRoles::Table)
                .if_not_exists()
                .col(ColumnDef::new(IdentityRoles::IdentityId).string().not_null())
                .col(ColumnDef::new(IdentityRoles::Role).string().not_null())
                .primary_key(
                    Index::create()
                        .col(IdentityRoles::IdentityId)
                        .col(IdentityRoles::Role),
                )
                .to_owned(),
        )
        .await
}

async fn create_roles(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Roles::Table)
                .if_not_exists()
                .col(ColumnDef::new(Roles::Name).string().not_null().primary_key())
                .col(
                    ColumnDef::new(Roles::DeskAccess)
                        .boolean()
                        .not_null()
                        .default(true),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(RolePermissions::Table)
                .if_not_exists()
                .col(ColumnDef::new(RolePermissions::Role).string().not_null())
                .col(ColumnDef::new(RolePermissions::Entity).string().not_null())
                .col(ColumnDef::new(RolePermissions::Read).boolean().not_null().default(false))
                .col(ColumnDef::new(RolePermissions::Write).boolean().not_null().default(false))
                .col(ColumnDef::new(RolePermissions::Create).boolean().not_null().default(false))
                .col(ColumnDef::new(RolePermissions::Delete).boolean().not_null().default(false))
                .primary_key(
                    Index::create()
                        .col(RolePermissions::Role)
                        .col(RolePermissions::Entity),
                )
                .to_owned(),
        )
        .await?;

    Ok(())
}

#[derive(DeriveIden)]
enum Turmas {
    Table,
    Name,
    Fase,
    Catequista,
    CatequistaAdj,
    Status,
}

#[derive(DeriveIden)]
enum Catecumenos {
    Table,
    Name,
    Fase,
    Turma,
    Status,
}

#[derive(DeriveIden)]
enum Catequistas {
    Table,
    Name,
    UserId,
}

#[derive(DeriveIden)]
enum Identities {
    Table,
    Id,
    FullName,
    Enabled,
}

#[derive(DeriveIden)]
enum IdentityRoles {
    Table,
    IdentityId,
    Role,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Name,
    DeskAccess,
}

#[derive(DeriveIden)]
enum RolePermissions {
    Table,
    Role,
    Entity,
    Read,
    Write,
    Create,
    Delete,
}
