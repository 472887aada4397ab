//! Integration test harness for La Reyna.
//!
//! Each test boots its own mock REST backend, storefront and admin on
//! ephemeral ports and drives them over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p la-reyna-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let ctx = TestContext::start().await;
//! let client = ctx.client();
//! let resp = client.get(ctx.storefront("/health")).send().await?;
//! assert_eq!(resp.status(), 200);
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use la_reyna_admin::config::AdminConfig;
use la_reyna_storefront::catalog::CatalogSource;
use la_reyna_storefront::config::StorefrontConfig;
use serde::Deserialize;
use serde_json::{Value, json};

/// Seeded administrator account.
pub const ADMIN_EMAIL: &str = "admin@gmail.com";
pub const ADMIN_PASSWORD: &str = "admin";

/// Seeded customer account.
pub const CUSTOMER_EMAIL: &str = "lucia@example.com";
pub const CUSTOMER_PASSWORD: &str = "cliente";

/// A user stored by the mock backend.
#[derive(Debug, Clone)]
struct MockUser {
    password: String,
    record: Value,
}

type Users = Arc<Mutex<HashMap<String, MockUser>>>;

#[derive(Deserialize)]
struct LoginForm {
    correo: String,
    password: String,
}

async fn login(
    State(users): State<Users>,
    Form(form): Form<LoginForm>,
) -> (StatusCode, Json<Value>) {
    let user = users.lock().unwrap().get(&form.correo).cloned();
    match user {
        Some(user) if user.password == form.password => (
            StatusCode::OK,
            Json(json!({
                "message": format!("Bienvenido, {}", user.record["nombreCompleto"].as_str().unwrap_or_default()),
                "data": user.record,
                "token": "mock-token",
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Credenciales incorrectas"})),
        ),
    }
}

async fn create_user(State(users): State<Users>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["correo"].as_str().unwrap_or_default().to_string();
    let mut users = users.lock().unwrap();
    if users.contains_key(&email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "El usuario ya existe"})),
        );
    }
    let password = body["password"].as_str().unwrap_or_default().to_string();
    users.insert(
        email,
        MockUser {
            password,
            record: body.clone(),
        },
    );
    (
        StatusCode::CREATED,
        Json(json!({"message": "Usuario creado con éxito", "data": body})),
    )
}

async fn products() -> Json<Value> {
    Json(json!([
        {"id_producto": 1, "nombre_producto": "Cielo en Rosa Eau de Parfum", "precio": 113.0, "categoria": 1},
        {"id_producto": 2, "nombre_producto": "Ocean Breeze", "precio": 155.5, "categoria": 2}
    ]))
}

fn seed_users() -> Users {
    let mut users = HashMap::new();
    users.insert(
        ADMIN_EMAIL.to_string(),
        MockUser {
            password: ADMIN_PASSWORD.to_string(),
            record: json!({
                "id_usuario": 1,
                "nombreCompleto": "Administrador",
                "correo": ADMIN_EMAIL,
                "telefono": "999999999",
                "direccion": "Administración Central",
                "estado": "activo",
                "role": "ADMIN",
            }),
        },
    );
    users.insert(
        CUSTOMER_EMAIL.to_string(),
        MockUser {
            password: CUSTOMER_PASSWORD.to_string(),
            record: json!({
                "id_usuario": 2,
                "nombreCompleto": "Lucia Mendoza",
                "correo": CUSTOMER_EMAIL,
                "telefono": "912345678",
                "direccion": "Av. Primavera 1010",
                "estado": "activo",
                "role": "USER",
            }),
        },
    );
    Arc::new(Mutex::new(users))
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Running backend, storefront and admin for one test.
pub struct TestContext {
    pub backend_url: String,
    pub storefront_url: String,
    pub admin_url: String,
}

impl TestContext {
    /// Boot the mock backend and both apps.
    pub async fn start() -> Self {
        let backend = Router::new()
            .route("/auth/user/login", post(login))
            .route("/auth/user/create", post(create_user))
            .route("/api/productos", get(products))
            .with_state(seed_users());
        let backend_url = format!("http://{}", serve(backend).await);

        // Reserve the admin address first so the storefront can link to it
        let admin_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let admin_addr = admin_listener.local_addr().unwrap();
        let admin_url = format!("http://{admin_addr}");

        let storefront = la_reyna_storefront::app(la_reyna_storefront::state::AppState::new(
            StorefrontConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
                base_url: "http://localhost:3000".to_string(),
                backend_url: backend_url.clone(),
                admin_url: Some(admin_url.clone()),
                catalog_source: CatalogSource::Static,
                sentry_dsn: None,
                sentry_environment: None,
                sentry_sample_rate: 1.0,
                sentry_traces_sample_rate: 0.0,
            },
        ));
        let storefront_url = format!("http://{}", serve(storefront).await);

        let admin = la_reyna_admin::app(la_reyna_admin::state::AppState::new(AdminConfig {
            host: admin_addr.ip(),
            port: admin_addr.port(),
            base_url: admin_url.clone(),
            backend_url: backend_url.clone(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }));
        tokio::spawn(async move {
            axum::serve(admin_listener, admin).await.unwrap();
        });

        Self {
            backend_url,
            storefront_url,
            admin_url,
        }
    }

    /// Storefront URL for `path`.
    #[must_use]
    pub fn storefront(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    /// Admin URL for `path`.
    #[must_use]
    pub fn admin(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// A fresh browser: its own cookie jar, redirects not followed.
    #[must_use]
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    /// A browser already logged in to the admin.
    pub async fn admin_client(&self) -> reqwest::Client {
        let client = self.client();
        let resp = client
            .post(self.admin("/auth/login"))
            .form(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        client
    }
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(resp: &reqwest::Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
