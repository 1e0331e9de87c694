use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub available: bool,
    pub owner_id: Uuid,
    pub request_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_users::entity::Entity",
        from = "Column::OwnerId",
        to = "domain_users::entity::Column::Id"
    )]
    Owner,
}

impl Related<domain_users::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            available: model.available,
            owner_id: model.owner_id,
            request_id: model.request_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Item> for ActiveModel {
    fn from(item: crate::models::Item) -> Self {
        ActiveModel {
            id: Set(item.id),
            name: Set(item.name),
            description: Set(item.description),
            available: Set(item.available),
            owner_id: Set(item.owner_id),
            request_id: Set(item.request_id),
            created_at: Set(item.created_at.into()),
        }
    }
}
