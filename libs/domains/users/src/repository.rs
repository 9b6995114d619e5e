use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
///
/// `create` and `replace` are atomic: the user row and its addresses are
/// written together or not at all. Implementations enforce CPF and email
/// uniqueness themselves and report violations as
/// [`UserError::DuplicateCpf`] / [`UserError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Users whose name, CPF, email and phone all match exactly
    async fn find_by_identity(
        &self,
        name: &str,
        cpf: &str,
        email: &str,
        phone: &str,
    ) -> UserResult<Vec<User>>;

    /// Whether a user other than `exclude` holds this CPF
    async fn cpf_taken(&self, cpf: &str, exclude: Option<i32>) -> UserResult<bool>;

    /// Whether a user other than `exclude` holds this email
    async fn email_taken(&self, email: &str, exclude: Option<i32>) -> UserResult<bool>;

    /// Insert a user with its addresses
    async fn create(&self, user: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users ordered by id, addresses ordered by id
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Overwrite the scalar fields and replace the whole address set
    async fn replace(&self, id: i32, user: NewUser) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i32, User>,
    last_user_id: i32,
    last_address_id: i32,
}

impl Store {
    fn others(&self, exclude: Option<i32>) -> impl Iterator<Item = &User> + '_ {
        self.users.values().filter(move |u| Some(u.id) != exclude)
    }

    fn check_unique(&self, user: &NewUser, exclude: Option<i32>) -> UserResult<()> {
        if self.others(exclude).any(|u| u.cpf == user.cpf) {
            return Err(UserError::DuplicateCpf);
        }
        if self.others(exclude).any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail);
        }
        Ok(())
    }

    fn materialize(&mut self, id: i32, user: NewUser) -> User {
        let addresses = user
            .addresses
            .into_iter()
            .map(|address| {
                self.last_address_id += 1;
                address.into_address(self.last_address_id)
            })
            .collect();

        User {
            id,
            name: user.name,
            cpf: user.cpf,
            email: user.email,
            phone: user.phone,
            password_hash: user.password_hash,
            addresses,
        }
    }
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Every mutation runs under one write lock, which gives the same
/// all-or-nothing and uniqueness guarantees as the database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_identity(
        &self,
        name: &str,
        cpf: &str,
        email: &str,
        phone: &str,
    ) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .filter(|u| u.name == name && u.cpf == cpf && u.email == email && u.phone == phone)
            .cloned()
            .collect())
    }

    async fn cpf_taken(&self, cpf: &str, exclude: Option<i32>) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store.others(exclude).any(|u| u.cpf == cpf))
    }

    async fn email_taken(&self, email: &str, exclude: Option<i32>) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store.others(exclude).any(|u| u.email == email))
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;
        store.check_unique(&user, None)?;

        store.last_user_id += 1;
        let id = store.last_user_id;
        let created = store.materialize(id, user);
        store.users.insert(id, created.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn replace(&self, id: i32, user: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;
        if !store.users.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }
        store.check_unique(&user, Some(id))?;

        let updated = store.materialize(id, user);
        store.users.insert(id, updated.clone());

        tracing::info!(user_id = id, "Replaced user");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewAddress;

    fn address(street: &str) -> NewAddress {
        NewAddress {
            street: street.to_string(),
            number: "10".to_string(),
            complement: String::new(),
            neighborhood: "Centro".to_string(),
            city: "Santos".to_string(),
            state: "SP".to_string(),
            postal_code: "11010000".to_string(),
        }
    }

    fn new_user(cpf: &str, email: &str) -> NewUser {
        NewUser {
            name: "Maria Silva".to_string(),
            cpf: cpf.to_string(),
            email: email.to_string(),
            phone: "11987654321".to_string(),
            password_hash: "hash".to_string(),
            addresses: vec![address("Rua A"), address("Rua B")],
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let repo = InMemoryUserRepository::new();

        let user = repo
            .create(new_user("11144477735", "maria@example.com"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(
            user.addresses.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let fetched = repo.get_by_id(user.id).await.unwrap();
        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_cpf_and_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("11144477735", "maria@example.com"))
            .await
            .unwrap();

        let result = repo
            .create(new_user("11144477735", "other@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::DuplicateCpf)));

        let result = repo
            .create(new_user("52998224725", "maria@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::DuplicateEmail)));

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_taken_checks_honor_exclusion() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(new_user("11144477735", "maria@example.com"))
            .await
            .unwrap();

        assert!(repo.cpf_taken("11144477735", None).await.unwrap());
        assert!(!repo.cpf_taken("11144477735", Some(user.id)).await.unwrap());
        assert!(repo.email_taken("maria@example.com", None).await.unwrap());
        assert!(!repo
            .email_taken("maria@example.com", Some(user.id))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_replace_swaps_address_set() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(new_user("11144477735", "maria@example.com"))
            .await
            .unwrap();

        let mut changes = new_user("11144477735", "maria@example.com");
        changes.addresses = vec![address("Rua C")];

        let updated = repo.replace(user.id, changes).await.unwrap();
        assert_eq!(updated.addresses.len(), 1);
        assert_eq!(updated.addresses[0].street, "Rua C");
        assert!(updated.addresses[0].id > 2);
    }

    #[tokio::test]
    async fn test_replace_missing_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo
            .replace(42, new_user("11144477735", "maria@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_cpf() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(new_user("11144477735", &format!("user{i}@example.com")))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
    }
}
