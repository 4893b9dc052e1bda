//! API route configuration.
//!
//! Authentication is decided per handler through the
//! [`crate::api::middleware::AuthUser`] and [`crate::api::middleware::MaybeUser`]
//! extractors rather than a router-wide layer, because `/urls` mixes public,
//! optional and mandatory endpoints.

use crate::api::handlers::{
    delete_link_handler, delete_me_handler, list_links_handler, login_handler, me_handler,
    redirect_handler, register_handler, shorten_handler, update_link_handler, update_me_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST   /auth/login`    - Exchange credentials for a token (public)
/// - `POST   /users`         - Register (public)
/// - `GET    /users/me`      - Current account (token required)
/// - `PUT    /users/me`      - Update email/password (token required)
/// - `DELETE /users/me`      - Delete account (token required)
/// - `POST   /urls/shorten`  - Create a short link (token optional)
/// - `GET    /urls`          - List own links (token required)
/// - `GET    /urls/{id}`     - Redirect by short code (public)
/// - `PUT    /urls/{id}`     - Update own link by id (token required)
/// - `DELETE /urls/{id}`     - Soft-delete own link by id (token required)
///
/// `GET /urls/{id}` takes a short code while `PUT` and `DELETE` take a
/// numeric link id; they share one route because the path shapes coincide.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/users", post(register_handler))
        .route(
            "/users/me",
            get(me_handler)
                .put(update_me_handler)
                .delete(delete_me_handler),
        )
        .route("/urls", get(list_links_handler))
        .route("/urls/shorten", post(shorten_handler))
        .route(
            "/urls/{id}",
            get(redirect_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}
