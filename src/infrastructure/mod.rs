//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`security`] - Argon2 password hashing and JWT signing

pub mod persistence;
pub mod security;
