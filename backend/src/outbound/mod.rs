//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for running without a database
//! - **crypto**: bcrypt password hashing
//! - **token**: HS256 JWT session tokens
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod crypto;
pub mod memory;
pub mod persistence;
pub mod token;
