//! In-memory mirror of the books table
//!
//! The mirror is a snapshot of the table, loaded once at startup and updated
//! by the books service only after a confirmed database write. Reads may run
//! concurrently with each other; any mutation takes the write lock and
//! excludes both readers and other writers.

use tokio::sync::RwLock;

use crate::models::Book;

/// Ordered in-process collection of books mirroring the table
#[derive(Default)]
pub struct BookMirror {
    books: RwLock<Vec<Book>>,
}

impl BookMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mirror with a freshly scanned table snapshot
    pub async fn load(&self, books: Vec<Book>) {
        *self.books.write().await = books;
    }

    /// Snapshot of all books in insertion order
    pub async fn all(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
    }

    pub async fn append(&self, book: Book) {
        self.books.write().await.push(book);
    }

    /// Replace the entry with the same id. Returns false if the id is not
    /// mirrored, which callers treat as a recoverable inconsistency.
    pub async fn replace(&self, id: &str, book: Book) -> bool {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|b| b.id == id) {
            Some(entry) => {
                *entry = book;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with the given id. Returns false if it was absent.
    pub async fn remove(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|book| book.id != id);
        books.len() < before
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(id: &str, title: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: "Author".to_string(),
            year: 2000,
            regdate: Utc::now(),
        }
    }

    #[tokio::test]
    async fn load_replaces_previous_contents() {
        let mirror = BookMirror::new();
        mirror.append(book("1", "Stale")).await;
        mirror.load(vec![book("2", "Fresh"), book("3", "Fresher")]).await;

        assert_eq!(mirror.len().await, 2);
        assert!(mirror.find_by_id("1").await.is_none());
        assert_eq!(mirror.find_by_id("2").await.unwrap().title, "Fresh");
    }

    #[tokio::test]
    async fn append_preserves_insertion_order() {
        let mirror = BookMirror::new();
        mirror.append(book("1", "First")).await;
        mirror.append(book("2", "Second")).await;
        mirror.append(book("3", "Third")).await;

        let titles: Vec<String> = mirror.all().await.into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn replace_updates_in_place() {
        let mirror = BookMirror::new();
        mirror.append(book("1", "First")).await;
        mirror.append(book("2", "Second")).await;

        assert!(mirror.replace("1", book("1", "Revised")).await);

        let books = mirror.all().await;
        assert_eq!(books[0].title, "Revised");
        assert_eq!(books[1].title, "Second");
        assert_eq!(mirror.len().await, 2);
    }

    #[tokio::test]
    async fn replace_of_absent_id_is_a_noop() {
        let mirror = BookMirror::new();
        mirror.append(book("1", "First")).await;

        assert!(!mirror.replace("missing", book("missing", "Ghost")).await);
        assert_eq!(mirror.len().await, 1);
        assert!(mirror.find_by_id("missing").await.is_none());
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_was_removed() {
        let mirror = BookMirror::new();
        mirror.append(book("1", "First")).await;

        assert!(mirror.remove("1").await);
        assert!(!mirror.remove("1").await);
        assert!(mirror.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_appends_are_serialized() {
        use std::sync::Arc;

        let mirror = Arc::new(BookMirror::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let mirror = Arc::clone(&mirror);
            handles.push(tokio::spawn(async move {
                mirror.append(book(&i.to_string(), "Book")).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(mirror.len().await, 32);
    }
}
