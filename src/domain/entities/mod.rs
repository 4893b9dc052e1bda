//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping, optionally owned by a user
//! - [`User`] - An account that can own links
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewLink`, `NewUser` - For creating new records
//! - `UserPatch` - For partial updates
//!
//! [`PublicUser`] is the only user shape that leaves the service layer.

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, PublicUser, User, UserPatch};
