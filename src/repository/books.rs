//! Books repository, the single gateway to the books table

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInput},
};

/// Columns the rest of the server expects the books table to have
const EXPECTED_COLUMNS: [&str; 5] = ["id", "title", "author", "year", "regdate"];

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Full-table scan in registration order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, year, regdate FROM books ORDER BY regdate",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetch a single book by id
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, year, regdate FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a book and return the generated id.
    ///
    /// The id comes straight from the RETURNING clause, so the caller's
    /// follow-up read is unambiguous even with concurrent inserts.
    pub async fn insert(&self, data: &BookInput) -> AppResult<String> {
        let id: String = sqlx::query_scalar(
            "INSERT INTO books (title, author, year, regdate) VALUES ($1, $2, $3, NOW()) RETURNING id",
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Update a book's mutable fields, returning the number of rows affected
    pub async fn update(&self, id: &str, data: &BookInput) -> AppResult<u64> {
        let result = sqlx::query("UPDATE books SET title = $1, author = $2, year = $3 WHERE id = $4")
            .bind(&data.title)
            .bind(&data.author)
            .bind(data.year)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a book, returning the number of rows affected
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Startup diagnostic: confirm the books table exists and log its shape.
    ///
    /// A missing table is fatal; unexpected or missing columns only warn, the
    /// real row decoding is done by name in [`Book`]'s FromRow impl.
    pub async fn schema_check(&self) -> AppResult<()> {
        let columns: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT column_name, data_type FROM information_schema.columns
            WHERE table_name = 'books'
            ORDER BY ordinal_position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if columns.is_empty() {
            return Err(AppError::Internal(
                "books table not found in database".to_string(),
            ));
        }

        tracing::info!(
            "books table columns: {}",
            columns
                .iter()
                .map(|(name, data_type)| format!("{} ({})", name, data_type))
                .collect::<Vec<_>>()
                .join(", ")
        );

        for expected in EXPECTED_COLUMNS {
            if !columns.iter().any(|(name, _)| name == expected) {
                tracing::warn!("books table is missing expected column '{}'", expected);
            }
        }

        Ok(())
    }
}
