//! Data models for Bookbay

pub mod book;

pub use book::{Book, BookInput};
