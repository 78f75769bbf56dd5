use catequista_scope_sdk::Catecumeno;
use portal_db::secure::{RowPredicate, ScopableEntity, reference_subquery};
use portal_security::properties;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::SelectStatement;

use super::turma;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "catecumenos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub fase: Option<String>,
    /// Owning class.
    pub turma: Option<String>,
    pub status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ScopableEntity for Entity {
    fn resolve_property(property: &str) -> Option<Self::Column> {
        match property {
            properties::RESOURCE_ID => Some(Column::Name),
            properties::OWNING_ENTITY_ID => Some(Column::Turma),
            _ => None,
        }
    }

    fn resolve_reference(
        property: &str,
        predicate: &RowPredicate,
    ) -> Option<(Self::Column, SelectStatement)> {
        match property {
            properties::OWNING_ENTITY_ID => {
                Some((Column::Turma, reference_subquery::<turma::Entity>(predicate)?))
            }
            _ => None,
        }
    }
}

impl From<Model> for Catecumeno {
    fn from(m: Model) -> Self {
        Self {
            id: m.name,
            turma: m.turma,
        }
    }
}
