//! Account service tests against the in-memory store.

use std::sync::Arc;

use account_service_lib::repository::{AccountRepository, InMemoryAccountStore};
use account_service_lib::service::{AccountManager, AccountService};
use common::AppError;
use domain::{Argon2Hasher, CredentialHasher, LookupKey, RegisterAccount};

struct Fixture {
    store: Arc<InMemoryAccountStore>,
    service: AccountManager,
}

/// Service with a low-cost hasher so tests stay fast.
fn setup() -> Fixture {
    let store = Arc::new(InMemoryAccountStore::new());
    let hasher = Arc::new(Argon2Hasher::with_cost(8, 1, 1).unwrap());
    let service = AccountManager::new(store.clone(), hasher);
    Fixture { store, service }
}

#[tokio::test]
async fn test_register_normalizes_and_hashes() {
    let fx = setup();

    let account = fx
        .service
        .register(RegisterAccount::new("  Alice ", "Alice@X.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(account.id, 1);
    assert_eq!(account.username, "alice");
    assert_eq!(account.email, "alice@x.com");
    assert_ne!(account.password_hash, "secret1");
    assert!(Argon2Hasher::new().verify("secret1", &account.password_hash));

    let stored = fx.store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored, account);
}

#[tokio::test]
async fn test_register_conflicts_on_either_key() {
    let fx = setup();
    fx.service
        .register(RegisterAccount::new("alice", "alice@x.com", "secret1"))
        .await
        .unwrap();

    let same_name = fx
        .service
        .register(RegisterAccount::new("ALICE", "other@x.com", "secret1"))
        .await;
    let same_email = fx
        .service
        .register(RegisterAccount::new("bob", "ALICE@x.com", "secret1"))
        .await;

    match same_name {
        Err(AppError::Conflict(msg)) => {
            assert_eq!(msg, "user with this username or email already exists")
        }
        other => panic!("expected conflict, got {:?}", other),
    }
    assert!(matches!(same_email, Err(AppError::Conflict(_))));
    assert_eq!(fx.store.len().await, 1);
}

#[tokio::test]
async fn test_register_reports_first_violation() {
    let fx = setup();

    let err = fx
        .service
        .register(RegisterAccount::new("al", "", ""))
        .await
        .unwrap_err();

    match err {
        AppError::Validation { field, reason } => {
            assert_eq!(field, "username");
            assert_eq!(reason, "username length must be between 3 and 50 characters");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(fx.store.is_empty().await);
}

#[tokio::test]
async fn test_lookup_by_each_key() {
    let fx = setup();
    fx.service
        .register(RegisterAccount::new("alice", "alice@x.com", "secret1"))
        .await
        .unwrap();
    let bob = fx
        .service
        .register(RegisterAccount::new("bob", "bob@x.com", "secret2"))
        .await
        .unwrap();
    assert_eq!(bob.id, 2);

    let by_name = fx
        .service
        .lookup(LookupKey::Username("BOB".into()))
        .await
        .unwrap();
    let by_email = fx
        .service
        .lookup(LookupKey::Email(" bob@x.com ".into()))
        .await
        .unwrap();
    let by_id = fx.service.lookup(LookupKey::Id(2)).await.unwrap();

    assert_eq!(by_name, bob);
    assert_eq!(by_email, bob);
    assert_eq!(by_id, bob);

    assert!(matches!(
        fx.service.lookup(LookupKey::Id(99)).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        fx.service.lookup(LookupKey::Id(0)).await,
        Err(AppError::Validation { field: "id", .. })
    ));
}

#[tokio::test]
async fn test_validate_credentials() {
    let fx = setup();
    let alice = fx
        .service
        .register(RegisterAccount::new("alice", "alice@x.com", "secret1"))
        .await
        .unwrap();

    let ok = fx
        .service
        .validate_credentials("Alice", "secret1")
        .await
        .unwrap();
    assert_eq!(ok.id, alice.id);

    let wrong_password = fx.service.validate_credentials("alice", "nope!!").await;
    let unknown_user = fx.service.validate_credentials("nobody", "secret1").await;
    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
    assert!(matches!(unknown_user, Err(AppError::InvalidCredentials)));

    let empty = fx.service.validate_credentials("alice", "").await;
    assert!(matches!(empty, Err(AppError::Validation { .. })));
}

#[tokio::test]
async fn test_concurrent_registrations_of_same_name() {
    let fx = setup();
    let service = Arc::new(fx.service);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .register(RegisterAccount::new(
                        "alice",
                        format!("alice{}@x.com", i),
                        "secret1",
                    ))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(fx.store.len().await, 1);
}
