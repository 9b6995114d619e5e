use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the addresses table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Address {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            street: model.street,
            number: model.number,
            complement: model.complement,
            neighborhood: model.neighborhood,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
        }
    }
}

impl ActiveModel {
    /// Insertable row for `user_id`; the id comes from the sequence.
    pub fn for_user(user_id: i32, address: crate::models::NewAddress) -> Self {
        Self {
            id: NotSet,
            street: Set(address.street),
            number: Set(address.number),
            complement: Set(address.complement),
            neighborhood: Set(address.neighborhood),
            city: Set(address.city),
            state: Set(address.state),
            postal_code: Set(address.postal_code),
            user_id: Set(user_id),
        }
    }
}
