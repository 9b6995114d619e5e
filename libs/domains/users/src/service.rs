use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use validator::Validate;

use crate::audit;
use crate::error::{UserError, UserResult};
use crate::models::{AddressInput, NewUser, RegisterUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user with its addresses.
    ///
    /// Rejects an exact resubmission of an existing record before looking at
    /// CPF and email individually.
    pub async fn register(&self, input: RegisterUser) -> UserResult<UserResponse> {
        let input = input.normalized();
        input.validate()?;

        let mut candidate = NewUser {
            name: input.name,
            cpf: input.cpf,
            email: input.email,
            phone: input.phone,
            password_hash: String::new(),
            addresses: input
                .addresses
                .into_iter()
                .map(AddressInput::into_new_address)
                .collect(),
        };

        let lookalikes = self
            .repository
            .find_by_identity(
                &candidate.name,
                &candidate.cpf,
                &candidate.email,
                &candidate.phone,
            )
            .await?;
        if lookalikes.iter().any(|u| u.is_same_submission(&candidate)) {
            return Err(UserError::DuplicateSubmission);
        }

        if self.repository.cpf_taken(&candidate.cpf, None).await? {
            return Err(UserError::DuplicateCpf);
        }
        if self.repository.email_taken(&candidate.email, None).await? {
            return Err(UserError::DuplicateEmail);
        }

        candidate.password_hash = hash_password(&input.password)?;

        let user = self.repository.create(candidate).await?;
        audit::log_creation(&user);

        Ok(user.into())
    }

    /// All users, ordered by id
    pub async fn list(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// Replace a user's data and whole address set.
    ///
    /// The stored password hash is kept unless a non-empty password is given.
    pub async fn update(&self, id: i32, input: UpdateUser) -> UserResult<UserResponse> {
        let input = input.normalized();
        input.validate()?;

        let before = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if self.repository.cpf_taken(&input.cpf, Some(id)).await? {
            return Err(UserError::DuplicateCpf);
        }
        if self.repository.email_taken(&input.email, Some(id)).await? {
            return Err(UserError::DuplicateEmail);
        }

        let password_hash = match input.new_password() {
            Some(password) => hash_password(password)?,
            None => before.password_hash.clone(),
        };

        let changes = NewUser {
            name: input.name,
            cpf: input.cpf,
            email: input.email,
            phone: input.phone,
            password_hash,
            addresses: input
                .addresses
                .into_iter()
                .map(AddressInput::into_new_address)
                .collect(),
        };

        let after = self.repository.replace(id, changes).await?;
        audit::log_update(&before, &after);

        Ok(after.into())
    }
}

// Password helpers

pub(crate) fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

pub(crate) fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
