use catequista_scope_sdk::{Turma, TurmaStatus};
use portal_db::secure::ScopableEntity;
use portal_security::{ProfileId, properties};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "turmas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub fase: Option<String>,
    /// Main teacher profile.
    pub catequista: Option<String>,
    /// Assistant teacher profile.
    pub catequista_adj: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ScopableEntity for Entity {
    fn resolve_property(property: &str) -> Option<Self::Column> {
        match property {
            properties::RESOURCE_ID => Some(Column::Name),
            properties::OWNER_PRIMARY => Some(Column::Catequista),
            properties::OWNER_SECONDARY => Some(Column::CatequistaAdj),
            properties::STATUS => Some(Column::Status),
            _ => None,
        }
    }
}

impl From<Model> for Turma {
    fn from(m: Model) -> Self {
        Self {
            id: m.name,
            owner_primary: m.catequista.map(ProfileId::new),
            owner_secondary: m.catequista_adj.map(ProfileId::new),
            status: TurmaStatus::from(m.status),
        }
    }
}
