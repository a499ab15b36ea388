//! Contact message entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for blog_core::domain::Contact {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            body: model.body,
            created_at: model.created_at.into(),
        }
    }
}

impl From<blog_core::domain::Contact> for ActiveModel {
    fn from(contact: blog_core::domain::Contact) -> Self {
        Self {
            id: Set(contact.id),
            name: Set(contact.name),
            email: Set(contact.email),
            subject: Set(contact.subject),
            body: Set(contact.body),
            created_at: Set(contact.created_at.into()),
        }
    }
}
