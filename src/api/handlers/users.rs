//! Handlers for the user endpoints (list, get, create, update, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::api::dto::pagination::UserListParams;
use crate::api::dto::user::{UserListResponse, UserPayload, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists users with optional search and pagination.
///
/// # Endpoint
///
/// `GET /api/users`
///
/// # Query Parameters
///
/// - `search` (optional): case-sensitive substring of first name, last name or email
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `pageSize` (optional): Items per page (default: 10, range: 1-100)
///
/// # Response
///
/// ```json
/// { "TotalUsers": 25, "CurrentPage": 1, "pageSize": 10, "Users": [ ... ] }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_users_handler(
    State(state): State<AppState>,
    params: Result<Query<UserListParams>, QueryRejection>,
) -> Result<Json<UserListResponse>, AppError> {
    let Query(params) = params?;

    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state
        .user_service
        .list_users(params.search.as_deref(), offset, limit)
        .await?;

    Ok(Json(UserListResponse {
        total_users: page.total,
        current_page: params.page(),
        page_size: params.page_size(),
        users: page.users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// Fetches a single user.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found (empty body) if the user does not exist.
pub async fn get_user_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(id) = id?;

    let user = state.user_service.get_user(id).await?;

    Ok(Json(user.into()))
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "email": "ada@x.com",
///   "dateOfBirth": "1815-12-10"
/// }
/// ```
///
/// Any `id` in the body is ignored.
///
/// # Response
///
/// 201 Created with `Location: /api/users/{id}` and the stored user.
///
/// # Errors
///
/// Returns 400 Bad Request with field errors if the body is invalid.
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let new_user = payload.into_new_user()?;

    let user = state.user_service.create_user(new_user).await?;
    let location = format!("/api/users/{}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from(user)),
    ))
}

/// Replaces a user's first name, last name, email and date of birth.
///
/// # Endpoint
///
/// `PUT /api/users/{id}`
///
/// The body must carry the same `id` as the path.
///
/// # Errors
///
/// Returns 400 Bad Request on id mismatch or invalid body.
/// Returns 404 Not Found if the user does not exist.
pub async fn update_user_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    payload.ensure_id(id)?;
    let changes = payload.into_changes()?;

    state.user_service.update_user(id, changes).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the user does not exist.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;

    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
