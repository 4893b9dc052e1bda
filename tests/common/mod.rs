#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use owned_links::domain::entities::{Link, NewLink, NewUser, User, UserPatch};
use owned_links::domain::repositories::{LinkRepository, UserRepository};
use owned_links::error::AppError;
use owned_links::infrastructure::security::{Argon2PasswordHasher, JwtSigner};
use owned_links::routes::router;
use owned_links::state::AppState;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const BASE_URL: &str = "http://localhost:3077/urls";
pub const PASSWORD: &str = "correct-horse";

/// In-memory users and links with the same guarantees as the PostgreSQL schema:
/// unique emails, unique codes among active links, owner cleared on user delete.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    links: Mutex<Vec<Link>>,
    next_user_id: AtomicI64,
    next_link_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every stored link, deleted ones included.
    pub fn all_links(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    pub fn link_by_code(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code && l.deleted_at.is_none())
            .cloned()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links
            .iter()
            .any(|l| l.code == new_link.code && l.deleted_at.is_none())
        {
            return Err(AppError::CodeCollision);
        }

        let now = Utc::now();
        let link = Link {
            id: self.next_link_id.fetch_add(1, Ordering::SeqCst) + 1,
            original_url: new_link.original_url,
            code: new_link.code,
            owner_id: new_link.owner_id,
            click_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        links.push(link.clone());

        Ok(link)
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.link_by_code(code))
    }

    async fn find_active_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id && l.owner_id == Some(owner_id) && l.deleted_at.is_none())
            .cloned())
    }

    async fn list_active_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let mut owned: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.owner_id == Some(owner_id) && l.deleted_at.is_none())
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(owned)
    }

    async fn save(&self, link: Link) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        let stored = links
            .iter_mut()
            .find(|l| l.id == link.id && l.owner_id == link.owner_id && l.deleted_at.is_none())
            .ok_or(AppError::LinkNotFound)?;

        stored.original_url = link.original_url;
        stored.deleted_at = link.deleted_at;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut links = self.links.lock().unwrap();

        Ok(links
            .iter_mut()
            .find(|l| l.code == code && l.deleted_at.is_none())
            .map(|l| {
                l.click_count += 1;
                l.clone()
            }))
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.deleted_at.is_none())
            .count() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Email is already registered",
                json!({ "field": "email" }),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();

        if let Some(email) = &patch.email
            && users.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(AppError::conflict(
                "Email is already registered",
                json!({ "field": "email" }),
            ));
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(hash) = patch.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);

        if users.len() == before {
            return Ok(false);
        }

        for link in self.links.lock().unwrap().iter_mut() {
            if link.owner_id == Some(id) {
                link.owner_id = None;
            }
        }

        Ok(true)
    }
}

pub fn create_test_state(store: Arc<MemoryStore>, code_attempts: usize) -> AppState {
    AppState::new(
        store.clone(),
        store,
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtSigner::new(TEST_SECRET, None)),
        BASE_URL,
        code_attempts,
    )
}

pub fn make_server() -> (TestServer, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    let app = router(create_test_state(store.clone(), 5));
    (TestServer::new(app).unwrap(), store)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn register(server: &TestServer, email: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn login(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Registers `email` and returns a token for it.
pub async fn register_and_login(server: &TestServer, email: &str) -> String {
    register(server, email).await;
    login(server, email).await
}

/// Shortens `url` and returns the short code.
pub async fn shorten(server: &TestServer, url: &str, token: Option<&str>) -> String {
    let mut request = server
        .post("/urls/shorten")
        .json(&json!({ "originalUrl": url }));
    if let Some(token) = token {
        request = request.add_header("Authorization", bearer(token));
    }

    let response = request.await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let short_url = response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();
    let code = short_url
        .strip_prefix(&format!("{BASE_URL}/"))
        .unwrap()
        .to_string();
    assert_eq!(code.len(), 6);
    code
}
