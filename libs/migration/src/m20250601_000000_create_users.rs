use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Name, 100))
                    .col(string_len(Users::Cpf, 11))
                    .col(string_len(Users::Email, 255))
                    .col(string_len(Users::Phone, 20))
                    .col(string_len(Users::PasswordHash, 255))
                    .to_owned(),
            )
            .await?;

        // Uniqueness backstop for concurrent registrations
        manager
            .create_index(
                Index::create()
                    .name("idx_users_cpf")
                    .table(Users::Table)
                    .col(Users::Cpf)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Name,
    Cpf,
    Email,
    Phone,
    PasswordHash,
}
