use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::store::{SessionStore, UserStore};

use super::domain::{Address, BankAccount, LoginInput, RegisterInput};
use super::profile::ProfileService;
use super::service::{AuthError, AuthService};

/// Router builder exposing the auth endpoints.
pub fn auth_router<U, T>(auth: Arc<AuthService<U, T>>) -> Router
where
    U: UserStore + 'static,
    T: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/auth/register", post(register_handler::<U, T>))
        .route("/api/v1/auth/login", post(login_handler::<U, T>))
        .route("/api/v1/auth/logout", post(logout_handler::<U, T>))
        .route("/api/v1/auth/session", get(session_handler::<U, T>))
        .with_state(auth)
}

/// Router builder exposing the profile endpoints.
pub fn profile_router<U>(profile: Arc<ProfileService<U>>) -> Router
where
    U: UserStore + 'static,
{
    Router::new()
        .route("/api/v1/users/:user_id", get(profile_get_handler::<U>))
        .route("/api/v1/users/:user_id/bio", put(bio_handler::<U>))
        .route(
            "/api/v1/users/:user_id/bank-account",
            put(bank_account_handler::<U>),
        )
        .route(
            "/api/v1/users/:user_id/service-areas",
            put(service_areas_handler::<U>),
        )
        .route(
            "/api/v1/users/:user_id/addresses",
            post(add_address_handler::<U>),
        )
        .route(
            "/api/v1/users/:user_id/addresses/:index",
            put(update_address_handler::<U>).delete(remove_address_handler::<U>),
        )
        .with_state(profile)
}

fn error_response(error: &AuthError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}

async fn register_handler<U, T>(
    State(auth): State<Arc<AuthService<U, T>>>,
    axum::Json(input): axum::Json<RegisterInput>,
) -> Response
where
    U: UserStore + 'static,
    T: SessionStore + 'static,
{
    match auth.register(input).await {
        Ok(response) => (StatusCode::CREATED, axum::Json(response)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn login_handler<U, T>(
    State(auth): State<Arc<AuthService<U, T>>>,
    axum::Json(input): axum::Json<LoginInput>,
) -> Response
where
    U: UserStore + 'static,
    T: SessionStore + 'static,
{
    match auth.login(input).await {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn logout_handler<U, T>(State(auth): State<Arc<AuthService<U, T>>>) -> Response
where
    U: UserStore + 'static,
    T: SessionStore + 'static,
{
    match auth.logout() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(&error),
    }
}

async fn session_handler<U, T>(State(auth): State<Arc<AuthService<U, T>>>) -> Response
where
    U: UserStore + 'static,
    T: SessionStore + 'static,
{
    (StatusCode::OK, axum::Json(auth.session().snapshot())).into_response()
}

#[derive(Debug, Deserialize)]
struct BioPayload {
    bio: String,
}

async fn profile_get_handler<U>(
    State(profile): State<Arc<ProfileService<U>>>,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserStore + 'static,
{
    match profile.get(&user_id).await {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn bio_handler<U>(
    State(profile): State<Arc<ProfileService<U>>>,
    Path(user_id): Path<String>,
    axum::Json(payload): axum::Json<BioPayload>,
) -> Response
where
    U: UserStore + 'static,
{
    match profile.update_bio(&user_id, payload.bio).await {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn bank_account_handler<U>(
    State(profile): State<Arc<ProfileService<U>>>,
    Path(user_id): Path<String>,
    axum::Json(account): axum::Json<BankAccount>,
) -> Response
where
    U: UserStore + 'static,
{
    match profile.set_bank_account(&user_id, account).await {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn service_areas_handler<U>(
    State(profile): State<Arc<ProfileService<U>>>,
    Path(user_id): Path<String>,
    axum::Json(service_areas): axum::Json<Vec<String>>,
) -> Response
where
    U: UserStore + 'static,
{
    match profile.update_service_areas(&user_id, service_areas).await {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn add_address_handler<U>(
    State(profile): State<Arc<ProfileService<U>>>,
    Path(user_id): Path<String>,
    axum::Json(address): axum::Json<Address>,
) -> Response
where
    U: UserStore + 'static,
{
    match profile.add_address(&user_id, address).await {
        Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn update_address_handler<U>(
    State(profile): State<Arc<ProfileService<U>>>,
    Path((user_id, index)): Path<(String, usize)>,
    axum::Json(address): axum::Json<Address>,
) -> Response
where
    U: UserStore + 'static,
{
    match profile.update_address(&user_id, index, address).await {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn remove_address_handler<U>(
    State(profile): State<Arc<ProfileService<U>>>,
    Path((user_id, index)): Path<(String, usize)>,
) -> Response
where
    U: UserStore + 'static,
{
    match profile.remove_address(&user_id, index).await {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(&error),
    }
}
