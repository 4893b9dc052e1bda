//! Domain layer containing business entities and contracts.
//!
//! Defines entities, repository interfaces and the opaque security
//! capabilities, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`security`] - Password hashing and token signing contracts
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository and capability traits are implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
pub mod security;
