//! Concrete implementations of the security capabilities.
//!
//! - [`Argon2PasswordHasher`] - Argon2id password hashing
//! - [`JwtSigner`] - HS256 JSON Web Tokens

pub mod argon2_hasher;
pub mod jwt_signer;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_signer::JwtSigner;
