//! User registration routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use roster_db::{NewUser, User};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

// ==================== Input Validation ====================

/// Maximum allowed email length
const MAX_EMAIL_LENGTH: usize = 100;
/// Maximum allowed name length
const MAX_NAME_LENGTH: usize = 100;
/// Maximum allowed password length
const MAX_PASSWORD_LENGTH: usize = 100;

/// Validate email format and length
fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::BadRequest("Email cannot be empty".to_string()));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Email exceeds maximum length of {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Email must contain '@'".to_string()));
    }
    Ok(())
}

/// Validate name length
fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name cannot be empty".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validate password presence
fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::BadRequest("Password cannot be empty".to_string()));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

// ==================== Types ====================

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
}

/// User representation returned by the API (password never leaves the server)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: i64,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            age: u.age,
        }
    }
}

// ==================== User Routes ====================

/// POST /users
async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_email(&request.email)?;
    validate_name(&request.name)?;
    validate_password(&request.password)?;
    if request.age < 0 {
        return Err(ApiError::BadRequest("Age cannot be negative".to_string()));
    }

    debug!(email = %request.email, "registering user");

    let user = state
        .service
        .register(NewUser {
            email: request.email,
            password: request.password,
            name: request.name,
            age: request.age,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create user routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users", get(list_users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use roster_core::{CacheProxy, RegistrationService};
    use roster_db::Database;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_app() -> axum::Router {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let proxy = Arc::new(CacheProxy::new(Arc::new(db)));
        let service = Arc::new(RegistrationService::new(proxy));
        crate::routes::create_router(AppState::new(service))
    }

    fn register_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_then_list_round_trip() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(register_request(serde_json::json!({
                "email": "a@x.com", "password": "p", "name": "A", "age": 25
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let users: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let list = users.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["email"], "a@x.com");
        assert_eq!(list[0]["age"], 25);
        assert!(list[0].get("password").is_none(), "password must not be serialized");
    }

    #[tokio::test]
    async fn test_underage_registration_returns_400() {
        let app = test_app().await;

        let response = app
            .oneshot(register_request(serde_json::json!({
                "email": "kid@x.com", "password": "p", "name": "Kid", "age": 17
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() {
        let app = test_app().await;

        let body = serde_json::json!({
            "email": "a@x.com", "password": "p", "name": "A", "age": 25
        });
        let response = app.clone().oneshot(register_request(body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(register_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_malformed_email_is_rejected() {
        let app = test_app().await;

        let response = app
            .oneshot(register_request(serde_json::json!({
                "email": "not-an-email", "password": "p", "name": "A", "age": 25
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
