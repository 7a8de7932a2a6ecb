//! Integration tests for Shopfront.
//!
//! Every test runs the storefront against [`FakeBackend`], an in-process
//! axum server standing in for the catalog and auth services, so no network
//! access is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_fetch` - Catalog query and feed parsing
//! - `login_flow` - Login form, token persistence and logout
//! - `cart_persistence` - Cart snapshots across restarts
//! - `storefront_session` - Full login → browse → cart → logout sessions

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use shopfront_storefront::config::{AuthConfig, CatalogConfig, StorefrontConfig};
use tokio::net::TcpListener;

/// Email the fake auth service accepts.
pub const VALID_EMAIL: &str = "shopper@example.com";

/// Password the fake auth service accepts.
pub const VALID_PASSWORD: &str = "hunter2";

/// Token the fake auth service issues.
pub const ISSUED_TOKEN: &str = "test-access-token";

#[derive(Default)]
struct Recorded {
    catalog_queries: Vec<HashMap<String, String>>,
    login_bodies: Vec<Value>,
}

#[derive(Clone)]
struct BackendState {
    catalog: Arc<Mutex<(StatusCode, String)>>,
    recorded: Arc<Mutex<Recorded>>,
}

/// In-process catalog and auth services.
pub struct FakeBackend {
    addr: SocketAddr,
    state: BackendState,
}

impl FakeBackend {
    /// Start serving on an ephemeral localhost port.
    pub async fn start() -> Self {
        let state = BackendState {
            catalog: Arc::new(Mutex::new((
                StatusCode::OK,
                json!({ "products": sample_products() }).to_string(),
            ))),
            recorded: Arc::new(Mutex::new(Recorded::default())),
        };

        let app = Router::new()
            .route("/api/catalog", get(catalog))
            .route("/api/auth", post(auth))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Storefront configuration pointing at this backend.
    #[must_use]
    pub fn config(&self, storage_dir: &Path) -> StorefrontConfig {
        StorefrontConfig {
            storage_dir: storage_dir.to_path_buf(),
            catalog: CatalogConfig {
                endpoint: format!("http://{}/api/catalog", self.addr),
                ..CatalogConfig::default()
            },
            auth: AuthConfig {
                endpoint: format!("http://{}/api/auth", self.addr),
            },
            http_timeout: Duration::from_secs(5),
        }
    }

    /// Serve `body` with `status` for subsequent catalog requests.
    pub fn set_catalog_response(&self, status: StatusCode, body: impl Into<String>) {
        *self.state.catalog.lock().unwrap() = (status, body.into());
    }

    /// Query parameters of every catalog request so far.
    #[must_use]
    pub fn catalog_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.recorded.lock().unwrap().catalog_queries.clone()
    }

    /// JSON bodies of every login request so far.
    #[must_use]
    pub fn login_bodies(&self) -> Vec<Value> {
        self.state.recorded.lock().unwrap().login_bodies.clone()
    }
}

/// Three listed products: one with a numeric price, one priced as a string
/// and one without a price.
#[must_use]
pub fn sample_products() -> Value {
    json!([
        {
            "id": 101,
            "name": "Laptop",
            "original_price": "1299.00",
            "thumb_img": { "files": { "webp": "https://img.example.com/101.webp" } },
            "brand": "Acme"
        },
        {
            "id": 102,
            "name": "Mouse",
            "original_price": 19.99,
            "thumb_img": { "files": { "webp": "https://img.example.com/102.webp" } }
        },
        {
            "id": "gift-card",
            "name": "Gift Card"
        }
    ])
}

async fn catalog(
    State(state): State<BackendState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.recorded.lock().unwrap().catalog_queries.push(params);
    let (status, body) = state.catalog.lock().unwrap().clone();
    (status, [("content-type", "application/json")], body).into_response()
}

async fn auth(State(state): State<BackendState>, Json(body): Json<Value>) -> Response {
    let accepted = body["Email"] == VALID_EMAIL && body["Password"] == VALID_PASSWORD;
    state.recorded.lock().unwrap().login_bodies.push(body);

    if accepted {
        Json(json!({ "data": { "access_token": ISSUED_TOKEN } })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "invalid credentials" })),
        )
            .into_response()
    }
}
