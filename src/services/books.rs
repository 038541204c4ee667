//! Books service
//!
//! Orchestrates every book operation: the database write comes first, the
//! mirror is only touched after the write is confirmed by a re-read of the
//! canonical row. A failed write therefore never shows up in the mirror.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    mirror::BookMirror,
    models::{Book, BookInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    mirror: Arc<BookMirror>,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            mirror: Arc::new(BookMirror::new()),
        }
    }

    /// Populate the mirror with a full table scan; called once at startup
    pub async fn load_mirror(&self) -> AppResult<usize> {
        let books = self.repository.books.list().await?;
        let count = books.len();
        self.mirror.load(books).await;
        Ok(count)
    }

    /// All books, served from the mirror without a database round trip
    pub async fn list(&self) -> Vec<Book> {
        self.mirror.all().await
    }

    /// A single book, served from the mirror
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.mirror
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Insert a book, read back the stored row, mirror it
    pub async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let id = self.repository.books.insert(data).await?;
        let book = self
            .repository
            .books
            .get_by_id(&id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("inserted book {} could not be read back", id)))?;
        self.mirror.append(book.clone()).await;
        Ok(book)
    }

    /// Update a book's mutable fields, read back the stored row, mirror it
    pub async fn update(&self, id: &str, data: &BookInput) -> AppResult<Book> {
        let affected = self.repository.books.update(id, data).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        let book = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("updated book {} could not be read back", id)))?;
        if !self.mirror.replace(id, book.clone()).await {
            // Recoverable drift, e.g. a row inserted directly into the table
            tracing::warn!("book {} updated in database but absent from mirror", id);
            self.mirror.append(book.clone()).await;
        }
        Ok(book)
    }

    /// Delete a book from the table and the mirror
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let affected = self.repository.books.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        if !self.mirror.remove(id).await {
            tracing::warn!("book {} deleted from database but absent from mirror", id);
        }
        Ok(())
    }
}
