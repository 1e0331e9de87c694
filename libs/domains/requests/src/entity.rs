use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the requests table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub requestor_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_users::entity::Entity",
        from = "Column::RequestorId",
        to = "domain_users::entity::Column::Id"
    )]
    Requestor,
}

impl Related<domain_users::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requestor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ItemRequest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            requestor_id: model.requestor_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::ItemRequest> for ActiveModel {
    fn from(request: crate::models::ItemRequest) -> Self {
        ActiveModel {
            id: Set(request.id),
            description: Set(request.description),
            requestor_id: Set(request.requestor_id),
            created_at: Set(request.created_at.into()),
        }
    }
}
