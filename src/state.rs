//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::{
    AuthService, IdentityResolver, LinkService, TokenService, UserService,
};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::domain::security::{PasswordHasher, TokenSigner};

/// Services behind the HTTP layer.
///
/// Repositories are held as trait objects so the same state type serves the
/// PostgreSQL deployment and in-memory test setups.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub token_service: Arc<TokenService>,
    pub identity_resolver: Arc<IdentityResolver<dyn UserRepository>>,
    pub user_service: Arc<UserService<dyn UserRepository>>,
}

impl AppState {
    /// Wires the services from their collaborators.
    ///
    /// `base_url` prefixes returned short URLs and `code_attempts` bounds
    /// short code generation per shorten call.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        user_repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        base_url: impl Into<String>,
        code_attempts: usize,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(signer));

        Self {
            link_service: Arc::new(LinkService::new(link_repository, base_url, code_attempts)),
            auth_service: Arc::new(AuthService::new(user_repository.clone(), hasher.clone())),
            identity_resolver: Arc::new(IdentityResolver::new(
                user_repository.clone(),
                token_service.clone(),
            )),
            user_service: Arc::new(UserService::new(user_repository, hasher)),
            token_service,
        }
    }
}
