//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository and security
//! traits and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Email/password verification
//! - [`services::token_service::TokenService`] - Bearer token issuing and verification
//! - [`services::identity_resolver::IdentityResolver`] - Caller identity from request headers
//! - [`services::link_service::LinkService`] - Short links, ownership and redirects
//! - [`services::user_service::UserService`] - User account management

pub mod services;
