//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, ownership-scoped lookups, click counting
//! - [`PgUserRepository`] - User accounts

pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
