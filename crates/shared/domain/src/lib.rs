//! Domain layer - Core account entities and business rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! registration validation and normalization, lookup key selection and
//! credential hashing.

pub mod account;
pub mod constants;
pub mod error;
pub mod lookup;
pub mod password;

pub use account::{normalize, Account, AccountResponse, NewAccount, RegisterAccount};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use lookup::LookupKey;
pub use password::{Argon2Hasher, CredentialHasher, HashError};
