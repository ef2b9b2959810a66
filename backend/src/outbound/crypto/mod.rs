//! Password hashing adapters.

mod bcrypt_password_hasher;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST, InvalidCostError};
