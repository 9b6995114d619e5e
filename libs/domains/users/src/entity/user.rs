use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub cpf: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::address::Entity")]
    Addresses,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Attach already-loaded addresses.
    pub fn into_user(self, addresses: Vec<crate::models::Address>) -> crate::models::User {
        crate::models::User {
            id: self.id,
            name: self.name,
            cpf: self.cpf,
            email: self.email,
            phone: self.phone,
            password_hash: self.password_hash,
            addresses,
        }
    }
}
