use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the comments table.
///
/// The author name is not stored here; repositories join against the
/// users table and attach it when building the domain model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
    #[sea_orm(
        belongs_to = "domain_users::entity::Entity",
        from = "Column::AuthorId",
        to = "domain_users::entity::Column::Id"
    )]
    Author,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<domain_users::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_comment(self, author_name: String) -> crate::models::Comment {
        crate::models::Comment {
            id: self.id,
            text: self.text,
            item_id: self.item_id,
            author_id: self.author_id,
            author_name,
            created_at: self.created_at.into(),
        }
    }
}

impl From<crate::models::Comment> for ActiveModel {
    fn from(comment: crate::models::Comment) -> Self {
        ActiveModel {
            id: Set(comment.id),
            text: Set(comment.text),
            item_id: Set(comment.item_id),
            author_id: Set(comment.author_id),
            created_at: Set(comment.created_at.into()),
        }
    }
}
