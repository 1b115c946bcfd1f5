//! Repository layer for account storage.

mod account_repository;
pub mod entities;
mod memory;

pub use account_repository::{AccountRepository, AccountStore};
pub use memory::InMemoryAccountStore;

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
