//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record
///
/// `id` and `regdate` are assigned by the database at insert time and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i32,
    /// Registration timestamp, server-assigned at creation
    pub regdate: DateTime<Utc>,
}

/// Create/update book request body
///
/// `id` and `regdate` are ignored if a client sends them.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: i32,
}
