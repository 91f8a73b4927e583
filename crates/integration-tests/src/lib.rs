//! Integration test harness for Student Records.
//!
//! Each [`TestApp`] owns a fresh `SQLite` file in a temporary directory and
//! drives the real router with `tower::ServiceExt::oneshot`, so no server or
//! external database is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p student-records-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use student_records_admin::config::AdminConfig;
use student_records_admin::db::{self, StudentRepository};
use student_records_admin::middleware::SESSION_COOKIE_NAME;
use student_records_admin::models::{Student, StudentInput};
use student_records_admin::routes;
use student_records_admin::services::AuthService;
use student_records_admin::state::AppState;

/// Username of the admin every [`TestApp`] is seeded with.
pub const ADMIN_USERNAME: &str = "admin";
/// Password of the seeded admin.
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Peer address every request arrives from (the login rate limiter keys on it).
const CLIENT_ADDR: ([u8; 4], u16) = ([198, 51, 100, 10], 40_000);

/// A fully wired application backed by a throwaway database.
pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
    _dir: TempDir,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Value of the session cookie set by this response, if any.
    ///
    /// `Some("")` means the cookie was cleared.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .filter(|(name, _)| name.trim() == SESSION_COOKIE_NAME)
            .map(|(_, value)| value.trim().to_string())
            .last()
    }

    /// Whether this is a redirect to `path`.
    #[must_use]
    pub fn is_redirect_to(&self, path: &str) -> bool {
        self.status.is_redirection() && self.location() == Some(path)
    }
}

/// Test configuration pointing at `database_url`.
#[must_use]
pub fn test_config(database_url: &str) -> AdminConfig {
    AdminConfig {
        database_url: SecretString::from(database_url.to_string()),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:5000".to_string(),
        trust_proxy_headers: false,
        json_logs: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
        tls: None,
    }
}

impl TestApp {
    /// Create a migrated database with one admin and build the router.
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Like [`TestApp::spawn`], but deployed behind a trusted reverse proxy.
    pub async fn spawn_behind_proxy() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(trust_proxy_headers: bool) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("students.db").display());
        let mut config = test_config(&url);
        config.trust_proxy_headers = trust_proxy_headers;

        let pool = db::create_pool(&config.database_url)
            .await
            .expect("failed to create pool");
        db::migrate(&pool).await.expect("failed to migrate");

        AuthService::new(&pool)
            .create_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("failed to seed admin");

        let router = routes::app(AppState::new(config, pool.clone()));

        Self {
            router,
            pool,
            _dir: dir,
        }
    }

    /// Start a client with an empty cookie jar.
    #[must_use]
    pub fn client(&self) -> TestClient<'_> {
        TestClient {
            app: self,
            cookie: None,
            forwarded_for: None,
        }
    }

    /// Start a client that presents `cookie` as its session id.
    #[must_use]
    pub fn client_with_cookie(&self, cookie: &str) -> TestClient<'_> {
        TestClient {
            app: self,
            cookie: Some(cookie.to_string()),
            forwarded_for: None,
        }
    }

    /// Start a client that is already logged in as the seeded admin.
    pub async fn logged_in_client(&self) -> TestClient<'_> {
        let mut client = self.client();
        let response = client.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
        assert!(response.is_redirect_to("/"), "login failed: {response:?}");
        client
    }

    /// Insert a student directly through the repository.
    pub async fn seed_student(&self, name: &str, age: &str, grade: &str) -> Student {
        let input = StudentInput::parse(name, age, grade).expect("invalid seed student");
        StudentRepository::new(&self.pool)
            .create(&input)
            .await
            .expect("failed to seed student")
    }

    /// All students, straight from the store.
    pub async fn students(&self) -> Vec<Student> {
        StudentRepository::new(&self.pool)
            .list_all()
            .await
            .expect("failed to list students")
    }
}

/// A client that carries the session cookie between requests.
pub struct TestClient<'a> {
    app: &'a TestApp,
    cookie: Option<String>,
    forwarded_for: Option<String>,
}

impl TestClient<'_> {
    /// The session cookie currently held, if any.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Send `ip` as `X-Forwarded-For` on subsequent requests.
    pub fn set_forwarded_for(&mut self, ip: &str) {
        self.forwarded_for = Some(ip.to_string());
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a POST request without a body.
    pub async fn post(&mut self, uri: &str) -> TestResponse {
        let empty: &[(&str, &str)] = &[];
        self.send(Method::POST, uri, Some(empty)).await
    }

    /// Send a POST request with a urlencoded form body.
    pub async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, uri, Some(form)).await
    }

    /// Submit the login form.
    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        form: Option<&[(&str, &str)]>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .extension(ConnectInfo(SocketAddr::from(CLIENT_ADDR)));

        if let Some(ip) = &self.forwarded_for {
            builder = builder.header("x-forwarded-for", ip);
        }

        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={cookie}"));
        }

        let body = match form {
            Some(fields) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(serde_urlencoded::to_string(fields).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let response = TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        };

        if let Some(cookie) = response.session_cookie() {
            self.cookie = (!cookie.is_empty()).then_some(cookie);
        }

        response
    }
}
