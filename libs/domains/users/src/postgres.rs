use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::collections::HashMap;

use crate::{
    entity::{address, user},
    error::{UserError, UserResult},
    models::{Address, NewUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach addresses (ordered by id) to each user row.
    async fn with_addresses<C: ConnectionTrait>(
        conn: &C,
        users: Vec<user::Model>,
    ) -> UserResult<Vec<User>> {
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
        let rows = address::Entity::find()
            .filter(address::Column::UserId.is_in(ids))
            .order_by_asc(address::Column::Id)
            .all(conn)
            .await
            .map_err(map_db_err)?;

        let mut by_user: HashMap<i32, Vec<Address>> = HashMap::new();
        for row in rows {
            by_user.entry(row.user_id).or_default().push(row.into());
        }

        Ok(users
            .into_iter()
            .map(|u| {
                let addresses = by_user.remove(&u.id).unwrap_or_default();
                u.into_user(addresses)
            })
            .collect())
    }

    async fn insert_addresses<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        user: NewUser,
    ) -> UserResult<Vec<Address>> {
        let mut addresses = Vec::with_capacity(user.addresses.len());
        for new_address in user.addresses {
            let row = address::ActiveModel::for_user(user_id, new_address)
                .insert(conn)
                .await
                .map_err(map_db_err)?;
            addresses.push(row.into());
        }
        Ok(addresses)
    }

    async fn is_taken(
        &self,
        column: user::Column,
        value: &str,
        exclude: Option<i32>,
    ) -> UserResult<bool> {
        let mut query = user::Entity::find().filter(column.eq(value));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }
}

/// Unique-index violations become duplicate errors; anything else is internal.
fn map_db_err(err: DbErr) -> UserError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        if detail.contains("cpf") {
            return UserError::DuplicateCpf;
        }
        if detail.contains("email") {
            return UserError::DuplicateEmail;
        }
    }
    UserError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_identity(
        &self,
        name: &str,
        cpf: &str,
        email: &str,
        phone: &str,
    ) -> UserResult<Vec<User>> {
        let rows = user::Entity::find()
            .filter(user::Column::Name.eq(name))
            .filter(user::Column::Cpf.eq(cpf))
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Phone.eq(phone))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Self::with_addresses(&self.db, rows).await
    }

    async fn cpf_taken(&self, cpf: &str, exclude: Option<i32>) -> UserResult<bool> {
        self.is_taken(user::Column::Cpf, cpf, exclude).await
    }

    async fn email_taken(&self, email: &str, exclude: Option<i32>) -> UserResult<bool> {
        self.is_taken(user::Column::Email, email, exclude).await
    }

    async fn create(&self, new_user: NewUser) -> UserResult<User> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let row = user::ActiveModel {
            id: NotSet,
            name: Set(new_user.name.clone()),
            cpf: Set(new_user.cpf.clone()),
            email: Set(new_user.email.clone()),
            phone: Set(new_user.phone.clone()),
            password_hash: Set(new_user.password_hash.clone()),
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        let addresses = Self::insert_addresses(&txn, row.id, new_user).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(user_id = row.id, "Created user");
        Ok(row.into_user(addresses))
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let Some(row) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(Self::with_addresses(&self.db, vec![row]).await?.pop())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let Some(row) = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(Self::with_addresses(&self.db, vec![row]).await?.pop())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Self::with_addresses(&self.db, rows).await
    }

    async fn replace(&self, id: i32, changes: NewUser) -> UserResult<User> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = user::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(UserError::NotFound(id))?;

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(changes.name.clone());
        active.cpf = Set(changes.cpf.clone());
        active.email = Set(changes.email.clone());
        active.phone = Set(changes.phone.clone());
        active.password_hash = Set(changes.password_hash.clone());
        let row = active.update(&txn).await.map_err(map_db_err)?;

        address::Entity::delete_many()
            .filter(address::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let addresses = Self::insert_addresses(&txn, id, changes).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(user_id = id, "Replaced user");
        Ok(row.into_user(addresses))
    }
}
