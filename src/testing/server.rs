//! In-process stand-in for the user-management service
//!
//! Serves the three endpoints the suite consumes with the same shapes and
//! status codes as the public service. The user table is part of
//! [`StubState`], so tests can serve broken data on purpose.

use std::io;

use actix_web::dev::ServerHandle;
use actix_web::web::{Data, Json, Path, Query, ServiceConfig};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, get, post};
use serde::Deserialize;
use serde_json::json;

use crate::requests::auth::LoginRequest;
use crate::responses::auth::{Authenticated, ErrorResponse};
use crate::responses::user::{SingleUser, User, UserPage};

pub const API_KEY_HEADER: &str = "x-api-key";
pub const TOKEN: &str = "QpwL5tke4Pnpja7X4";

const SEED: [(u64, &str, &str); 12] = [
    (1, "George", "Bluth"),
    (2, "Janet", "Weaver"),
    (3, "Emma", "Wong"),
    (4, "Eve", "Holt"),
    (5, "Charles", "Morris"),
    (6, "Tracey", "Ramos"),
    (7, "Michael", "Lawson"),
    (8, "Lindsay", "Ferguson"),
    (9, "Tobias", "Funke"),
    (10, "Byron", "Fields"),
    (11, "George", "Edwards"),
    (12, "Rachel", "Howell"),
];

/// Data served by the stub
#[derive(Debug, Clone)]
pub struct StubState {
    pub users: Vec<User>,
    pub per_page: usize,
    pub token: String,
    /// Requests without this `x-api-key` are rejected with 401
    pub api_key: Option<String>,
}

impl StubState {
    /// The twelve users the public service is seeded with
    pub fn seeded() -> Self {
        let users = SEED
            .iter()
            .map(|(id, first_name, last_name)| User {
                id: *id,
                email: format!(
                    "{}.{}@reqres.in",
                    first_name.to_lowercase(),
                    last_name.to_lowercase()
                ),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                avatar: Some(format!("https://reqres.in/img/faces/{id}-image.jpg")),
            })
            .collect();

        Self {
            users,
            per_page: 6,
            token: TOKEN.to_string(),
            api_key: Some("reqres-free-v1".to_string()),
        }
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn page(&self, page: usize) -> UserPage {
        let per_page = self.per_page.max(1);
        let total = self.users.len();
        let data = self
            .users
            .iter()
            .skip(page.saturating_sub(1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        UserPage {
            page: Some(page as u32),
            per_page: Some(per_page as u32),
            total: Some(total as u32),
            total_pages: Some(total.div_ceil(per_page) as u32),
            data,
        }
    }

    fn authorize(&self, request: &HttpRequest) -> Result<(), HttpResponse> {
        let Some(expected) = &self.api_key else {
            return Ok(());
        };

        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if provided == Some(expected.as_str()) {
            Ok(())
        } else {
            Err(HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Missing API key".to_string(),
            }))
        }
    }
}

impl Default for StubState {
    fn default() -> Self {
        Self::seeded()
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

#[post("/api/login")]
pub async fn login(
    state: Data<StubState>,
    request: HttpRequest,
    Json(body): Json<LoginRequest>,
) -> HttpResponse {
    if let Err(response) = state.authorize(&request) {
        return response;
    }

    let error = if body.password.is_empty() {
        Some("Missing password")
    } else if !state.users.iter().any(|user| user.email == body.email) {
        Some("user not found")
    } else {
        None
    };

    match error {
        Some(error) => HttpResponse::BadRequest().json(ErrorResponse {
            error: error.to_string(),
        }),
        None => HttpResponse::Ok().json(Authenticated {
            token: Some(state.token.clone()),
        }),
    }
}

#[get("/api/users")]
pub async fn paginate(
    state: Data<StubState>,
    request: HttpRequest,
    Query(query): Query<PageQuery>,
) -> HttpResponse {
    if let Err(response) = state.authorize(&request) {
        return response;
    }

    HttpResponse::Ok().json(state.page(query.page.unwrap_or(1)))
}

#[get("/api/users/{id}")]
pub async fn show(state: Data<StubState>, request: HttpRequest, id: Path<u64>) -> HttpResponse {
    if let Err(response) = state.authorize(&request) {
        return response;
    }

    match state.user(id.into_inner()) {
        Some(user) => HttpResponse::Ok().json(SingleUser { data: user.clone() }),
        None => HttpResponse::NotFound().json(json!({})),
    }
}

pub fn route(app: &mut ServiceConfig) {
    app.service(login);
    app.service(paginate);
    app.service(show);
}

/// A running stub bound to an ephemeral local port
pub struct StubServer {
    url: String,
    handle: ServerHandle,
}

impl StubServer {
    /// Start serving `state`; must be called from within an actix system
    pub fn start(state: StubState) -> io::Result<Self> {
        let state = Data::new(state);
        let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(route))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))?;

        let address = server
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| io::Error::other("stub server is not bound to any address"))?;

        let server = server.run();
        let handle = server.handle();

        actix_web::rt::spawn(server);

        ::tracing::debug!(%address, "stub server started");

        Ok(Self {
            url: format!("http://{address}"),
            handle,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
