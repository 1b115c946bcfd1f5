//! Account service - registration, lookup and credential validation.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{
    normalize, Account, CredentialHasher, DomainError, LookupKey, NewAccount, RegisterAccount,
};

use crate::repository::AccountRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Validate, normalize and persist a new account.
    async fn register(&self, input: RegisterAccount) -> AppResult<Account>;

    /// Get account by id; ids must be positive
    async fn get_by_id(&self, id: i64) -> AppResult<Account>;

    /// Get account by (normalized) username
    async fn get_by_username(&self, username: &str) -> AppResult<Account>;

    /// Get account by (normalized) email
    async fn get_by_email(&self, email: &str) -> AppResult<Account>;

    /// Get account by whichever key the caller selected
    async fn lookup(&self, key: LookupKey) -> AppResult<Account> {
        match key {
            LookupKey::Username(username) => self.get_by_username(&username).await,
            LookupKey::Email(email) => self.get_by_email(&email).await,
            LookupKey::Id(id) => self.get_by_id(id).await,
        }
    }

    /// Return the account when `password` matches its stored hash.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// `InvalidCredentials` error.
    async fn validate_credentials(&self, username: &str, password: &str) -> AppResult<Account>;
}

/// Used only when the configured hasher cannot produce the decoy below.
const FALLBACK_DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$YWNjb3VudC1zZXJ2aWNlIQ$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Concrete implementation of AccountService over a repository and a hasher.
pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
    /// Verified against when the username is unknown, so both failure paths
    /// pay the same hashing cost.
    decoy_hash: String,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(repo: Arc<dyn AccountRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        let decoy_hash = hasher.hash("decoy-password").unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not build decoy hash, using fallback");
            FALLBACK_DECOY_HASH.to_string()
        });

        Self {
            repo,
            hasher,
            decoy_hash,
        }
    }

    /// Hashing is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("password hashing task failed: {}", e)))??;
        Ok(hash)
    }

    async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let (password, hash) = (password.to_owned(), hash.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("password verification task failed: {}", e)))
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, input: RegisterAccount) -> AppResult<Account> {
        let input = input.into_normalized()?;

        // Fast path only; the store's unique constraint has the final say.
        if self.repo.exists(&input.username, &input.email).await? {
            tracing::warn!(username = %input.username, "Registration rejected: duplicate account");
            return Err(DomainError::duplicate_account().into());
        }

        let password_hash = self.hash_password(input.password).await?;
        let account = self
            .repo
            .create(NewAccount {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Account> {
        if id <= 0 {
            return Err(DomainError::validation("id", "invalid user ID").into());
        }

        tracing::debug!(account_id = id, "Looking up account by id");
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Account> {
        let username = normalize(username);
        if username.is_empty() {
            return Err(DomainError::validation("username", "username is required").into());
        }

        tracing::debug!(%username, "Looking up account by username");
        self.repo.find_by_username(&username).await?.ok_or_not_found()
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Account> {
        let email = normalize(email);
        if email.is_empty() {
            return Err(DomainError::validation("email", "email is required").into());
        }

        tracing::debug!(%email, "Looking up account by email");
        self.repo.find_by_email(&email).await?.ok_or_not_found()
    }

    async fn validate_credentials(&self, username: &str, password: &str) -> AppResult<Account> {
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::validation(
                "credentials",
                "username and password are required",
            )
            .into());
        }

        let account = match self.get_by_username(username).await {
            Ok(account) => account,
            Err(AppError::NotFound | AppError::Validation { .. }) => {
                // Result is discarded; only the cost matters.
                self.verify_password(password, &self.decoy_hash).await?;
                tracing::warn!("Credential check failed");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self.verify_password(password, &account.password_hash).await? {
            tracing::warn!("Credential check failed");
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }
}
