//! Router harness over the in-memory store or the Postgres adapters.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use jobboard::application::ports::user_repository::{NewUser, UserRepository};
use jobboard::bootstrap::app_context::{AppContext, AppServices};
use jobboard::bootstrap::config::Config;
use jobboard::domain::users::user::{Role, User};
use jobboard::infrastructure::db::PgPool;
use jobboard::presentation::http::auth::issue_token;

use super::memory::MemoryStore;

pub struct TestApp {
    pub cfg: Config,
    users: Arc<dyn UserRepository>,
    memory: Option<Arc<MemoryStore>>,
    pool: Option<PgPool>,
    router: Router,
}

/// A seeded user and a bearer token minted for them.
pub struct Account {
    pub user: User,
    pub token: String,
}

impl Account {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(cfg: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let services = AppServices::new(store.clone(), store.clone(), store.clone());
        let mut app = Self::assemble(cfg, services, store.clone());
        app.memory = Some(store);
        app
    }

    /// Wires a router over `services`. `users` seeds accounts directly.
    pub(crate) fn assemble(
        cfg: Config,
        services: AppServices,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        let ctx = AppContext::new(cfg.clone(), services);
        let router = jobboard::presentation::http::router(ctx);
        Self {
            cfg,
            users,
            memory: None,
            pool: None,
            router,
        }
    }

    pub(crate) fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn store(&self) -> &MemoryStore {
        self.memory.as_deref().expect("app is backed by the memory store")
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref().expect("app is backed by Postgres")
    }

    /// Inserts a user directly, skipping password hashing.
    pub async fn seed_user(&self, full_name: &str, email: &str, role: Role) -> Account {
        let user = self
            .users
            .create_user(&NewUser {
                full_name: full_name.into(),
                email: email.into(),
                password_hash: "not-a-real-hash".into(),
                role,
            })
            .await
            .expect("store insert")
            .expect("email is unique");
        let token = issue_token(&self.cfg, &user).expect("token");
        Account { user, token }
    }

    pub async fn admin(&self, name: &str) -> Account {
        self.seed_user(name, &unique_email(name, "company.test"), Role::Admin)
            .await
    }

    pub async fn jobseeker(&self, name: &str) -> Account {
        self.seed_user(name, &unique_email(name, "seeker.test"), Role::Jobseeker)
            .await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.dispatch(request).await
    }

    /// Sends a prepared request, for cases the JSON helpers cannot express.
    pub async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Creates an open job owned by `admin` and returns its id.
    pub async fn create_job(&self, admin: &Account, title: &str, location: &str) -> Uuid {
        let (status, body) = self
            .post(
                "/jobs",
                Some(&admin.token),
                serde_json::json!({
                    "title": title,
                    "description": format!("{title} role"),
                    "location": location,
                    "salary": 50000.0,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        parse_id(&body)
    }

    pub async fn apply(&self, seeker: &Account, job_id: Uuid) -> (StatusCode, Value) {
        self.post(
            "/applications",
            Some(&seeker.token),
            serde_json::json!({
                "jobId": job_id,
                "resume": "https://cv.test/resume.pdf",
                "coverLetter": "I would love to work here",
            }),
        )
        .await
    }
}

/// Emails stay unique when several tests share one database.
fn unique_email(name: &str, domain: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}.{}@{domain}", name.to_lowercase(), &suffix[..8])
}

pub fn parse_id(body: &Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(|| panic!("no id in {body}"))
}
