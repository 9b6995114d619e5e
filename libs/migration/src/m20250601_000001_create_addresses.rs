use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250601_000000_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_auto(Addresses::Id))
                    .col(string_len(Addresses::Street, 200))
                    .col(string_len(Addresses::Number, 20))
                    .col(string_len(Addresses::Complement, 100).default(""))
                    .col(string_len(Addresses::Neighborhood, 100))
                    .col(string_len(Addresses::City, 100))
                    .col(string_len(Addresses::State, 2))
                    .col(string_len(Addresses::PostalCode, 8))
                    .col(integer(Addresses::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user_id")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_addresses_user_id")
                    .table(Addresses::Table)
                    .col(Addresses::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
    PostalCode,
    UserId,
}
