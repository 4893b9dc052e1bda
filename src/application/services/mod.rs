//! Business logic services for the application layer.

pub mod auth_service;
pub mod identity_resolver;
pub mod link_service;
mod password;
pub mod token_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use identity_resolver::{IdentityResolver, bearer_token};
pub use link_service::LinkService;
pub use token_service::TokenService;
pub use user_service::UserService;
