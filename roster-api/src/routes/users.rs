/// User endpoints
///
/// # Endpoints
///
/// - `POST   /users`       - Register a user
/// - `GET    /users`       - List all users
/// - `GET    /users/:id`   - Fetch one user
/// - `PUT    /users/:id`   - Replace username and email
/// - `DELETE /users/:id`   - Remove a user
///
/// Payloads go through [`ValidatedJson`], so a handler body only runs once
/// both `username` and `email` are present strings of 1 to 128 characters.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use roster_shared::models::user::{NewUser, UpdateUser, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for registration and update
///
/// The 128-character limit matches the `VARCHAR(128)` columns.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserPayload {
    #[validate(length(min = 1, max = 128, message = "username must be 1-128 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "email must be 1-128 characters"))]
    pub email: String,
}

/// Single-message response body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Register a new user
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "username": "michael", "email": "michael@testdriven.io" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "message": "michael@testdriven.io was added!" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: payload validation failed, or email already exists
/// - `500 Internal Server Error`: the insert failed and was rolled back
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    if state.users.find_by_email(&payload.email).await?.is_some() {
        tracing::info!(email = %payload.email, "Registration rejected: email already exists");
        return Err(ApiError::duplicate_email());
    }

    let user = state
        .users
        .create(NewUser {
            username: payload.username,
            email: payload.email,
        })
        .await?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");

    Ok((
        StatusCode::CREATED,
        MessageResponse::new(format!("{} was added!", user.email)),
    ))
}

/// List all users
///
/// ```text
/// GET /users
/// ```
///
/// Returns a JSON array ordered by ID.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// Fetch a single user
///
/// # Errors
///
/// - `404 Not Found`: `User {id} does not exist`
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<User>> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;

    Ok(Json(user))
}

/// Replace a user's username and email
///
/// ```text
/// PUT /users/1
/// Content-Type: application/json
///
/// { "username": "me", "email": "me@testdriven.io" }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "1 was updated!" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: payload validation failed, or the email belongs to another user
/// - `404 Not Found`: `User {id} does not exist`
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> ApiResult<Json<MessageResponse>> {
    if state.users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::user_not_found(user_id));
    }

    if let Some(existing) = state.users.find_by_email(&payload.email).await? {
        if existing.id != user_id {
            return Err(ApiError::duplicate_email());
        }
    }

    // The row can vanish between the lookup and the write
    let user = state
        .users
        .update(
            user_id,
            UpdateUser {
                username: payload.username,
                email: payload.email,
            },
        )
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;

    tracing::info!(user_id = user.id, "User updated");

    Ok(MessageResponse::new(format!("{} was updated!", user.id)))
}

/// Remove a user
///
/// # Response
///
/// ```json
/// { "message": "michael@testdriven.io was removed!" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: `User {id} does not exist`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    let user = state
        .users
        .delete(user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;

    tracing::info!(user_id = user.id, "User removed");

    Ok(MessageResponse::new(format!("{} was removed!", user.email)))
}
