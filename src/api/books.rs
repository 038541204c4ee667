//! Books API endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInput},
};

use super::ApiKey;

/// Confirmation body for deletions
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_body(body: Result<Json<BookInput>, JsonRejection>) -> AppResult<BookInput> {
    let Json(data) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    Ok(data)
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Book list", body = Vec<Book>),
        (status = 401, description = "Missing or invalid API key", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    _auth: ApiKey,
) -> Json<Vec<Book>> {
    Json(state.services.books.list().await)
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "No such book", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    _auth: ApiKey,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(&id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("api_key" = [])),
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    _auth: ApiKey,
    body: Result<Json<BookInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let data = parse_body(body)?;
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorResponse),
        (status = 404, description = "No such book", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    _auth: ApiKey,
    Path(id): Path<String>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let data = parse_body(body)?;
    let book = state.services.books.update(&id, &data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "No such book", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    _auth: ApiKey,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: format!("Book {} deleted", id),
    }))
}
