//! HTTP middleware and request extractors.
//!
//! Provides bearer authentication extractors and request tracing.

pub mod auth;
pub mod tracing;

pub use auth::{AuthUser, MaybeUser};
