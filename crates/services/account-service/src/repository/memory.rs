//! In-memory account repository.
//!
//! Enforces the same uniqueness rules as the accounts table and hands out
//! sequential ids starting at 1. Used by tests and local runs without Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AccountRepository;
use common::AppResult;
use domain::{Account, DomainError, NewAccount};

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<i64, Account>,
    /// username -> id
    by_username: HashMap<String, i64>,
    /// email -> id
    by_email: HashMap<String, i64>,
    last_id: i64,
}

/// In-memory implementation of AccountRepository
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    tables: RwLock<Tables>,
}

impl InMemoryAccountStore {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.tables.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn create(&self, draft: NewAccount) -> AppResult<Account> {
        let mut tables = self.tables.write().await;

        if tables.by_username.contains_key(&draft.username)
            || tables.by_email.contains_key(&draft.email)
        {
            return Err(DomainError::duplicate_account().into());
        }

        tables.last_id += 1;
        let now = chrono::Utc::now();
        let account = Account {
            id: tables.last_id,
            username: draft.username,
            email: draft.email,
            password_hash: draft.password_hash,
            created_at: now,
            updated_at: now,
        };

        tables.by_username.insert(account.username.clone(), account.id);
        tables.by_email.insert(account.email.clone(), account.id);
        tables.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        Ok(self.tables.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_username
            .get(username)
            .and_then(|id| tables.accounts.get(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.accounts.get(id))
            .cloned())
    }

    async fn exists(&self, username: &str, email: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.by_username.contains_key(username) || tables.by_email.contains_key(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;

    fn draft(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = InMemoryAccountStore::new();
        let first = store.create(draft("alice", "alice@x.com")).await.unwrap();
        let second = store.create(draft("bob", "bob@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_conflicts() {
        let store = InMemoryAccountStore::new();
        store.create(draft("alice", "alice@x.com")).await.unwrap();

        let same_name = store.create(draft("alice", "other@x.com")).await;
        let same_email = store.create(draft("other", "alice@x.com")).await;

        assert!(matches!(same_name, Err(AppError::Conflict(_))));
        assert!(matches!(same_email, Err(AppError::Conflict(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = InMemoryAccountStore::new();
        assert!(store.is_empty().await);
        let created = store.create(draft("alice", "alice@x.com")).await.unwrap();

        assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(
            store.find_by_username("alice").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(store.find_by_email("alice@x.com").await.unwrap(), Some(created));
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
        assert!(store.exists("nobody", "alice@x.com").await.unwrap());
        assert!(!store.exists("nobody", "nobody@x.com").await.unwrap());
    }
}
