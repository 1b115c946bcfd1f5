//! Account repository backed by SeaORM.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sqlx, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, RuntimeErr, Set, SqlErr,
};

use super::entities::account::{self, ActiveModel, Entity as AccountEntity};
use common::{AppError, AppResult};
use domain::{Account, DomainError, NewAccount};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account storage contract.
///
/// Lookups return `Ok(None)` for a missing account; turning that into a
/// not-found error is the caller's decision. Keys are expected to be
/// normalized already.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account; the store assigns id and timestamps.
    ///
    /// A username or email collision fails with `AppError::Conflict`.
    async fn create(&self, draft: NewAccount) -> AppResult<Account>;

    /// Find account by id
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>>;

    /// Find account by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find account by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// True when any account holds `username` or `email`
    async fn exists(&self, username: &str, email: &str) -> AppResult<bool>;
}

/// Concrete implementation of AccountRepository over Postgres.
pub struct AccountStore {
    db: Arc<DatabaseConnection>,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// True when the driver reported a unique-key violation.
fn is_unique_violation(err: &DbErr) -> bool {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return true;
    }

    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e))) => e.is_unique_violation(),
        _ => false,
    }
}

/// Unique violations become the same conflict the pre-check reports.
fn map_insert_error(err: DbErr) -> AppError {
    if is_unique_violation(&err) {
        tracing::warn!(error = %err, "Account insert hit unique constraint");
        return DomainError::duplicate_account().into();
    }
    AppError::from(err)
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn create(&self, draft: NewAccount) -> AppResult<Account> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(draft.username),
            email: Set(draft.email),
            password_hash: Set(draft.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(map_insert_error)?;
        Ok(Account::from(model))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        let result = AccountEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn exists(&self, username: &str, email: &str) -> AppResult<bool> {
        let count = AccountEntity::find()
            .filter(
                Condition::any()
                    .add(account::Column::Username.eq(username))
                    .add(account::Column::Email.eq(email)),
            )
            .count(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;

    use chrono::Utc;
    use sea_orm::sqlx::error::{DatabaseError, ErrorKind};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(id: i64, username: &str, email: &str) -> account::Model {
        let now = Utc::now();
        account::Model {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Driver error as Postgres reports a duplicate key (SQLSTATE 23505).
    #[derive(Debug)]
    struct DuplicateKey;

    impl std::fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message())
        }
    }

    impl StdError for DuplicateKey {}

    impl DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"accounts_username_key\""
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    fn duplicate_key() -> DbErr {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(Box::new(
            DuplicateKey,
        ))))
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate_conflict() {
        let err = map_insert_error(duplicate_key());

        match err {
            AppError::Conflict(msg) => {
                assert_eq!(msg, "user with this username or email already exists")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_unique_violation_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([duplicate_key()])
            .into_connection();
        let store = AccountStore::new(Arc::new(db));

        let result = store
            .create(NewAccount {
                username: "alice".to_string(),
                email: "alice@x.com".to_string(),
                password_hash: "$argon2id$hash".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_non_constraint_errors_stay_infrastructure() {
        let err = map_insert_error(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_find_by_username_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "alice", "alice@x.com")]])
            .into_connection();
        let store = AccountStore::new(Arc::new(db));

        let account = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(account.id, 1);
        assert_eq!(account.email, "alice@x.com");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<account::Model>::new()])
            .into_connection();
        let store = AccountStore::new(Arc::new(db));

        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_returns_store_assigned_fields() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "carol", "carol@x.com")]])
            .into_connection();
        let store = AccountStore::new(Arc::new(db));

        let account = store
            .create(NewAccount {
                username: "carol".to_string(),
                email: "carol@x.com".to_string(),
                password_hash: "$argon2id$hash".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(account.id, 7);
        assert_eq!(account.username, "carol");
    }
}
