use crate::domain::Book;
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory implementation of BookRepository
///
/// Books are kept in a `BTreeMap` keyed by book_id, so `list_all`
/// returns them in id order. Used when no database is configured
/// and as the store behind the router tests.
pub struct BookRepository {
    books: Mutex<BTreeMap<String, Book>>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(BTreeMap::new()),
        }
    }

    /// Build a repository pre-populated with the given books.
    /// Later entries win when ids repeat.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let books = books
            .into_iter()
            .map(|book| (book.book_id().to_string(), book))
            .collect();
        Self {
            books: Mutex::new(books),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Book>>> {
        self.books
            .lock()
            .map_err(|_| "in-memory book store lock poisoned".into())
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn insert(&self, book: Book) -> Result<bool> {
        let mut books = self.lock()?;
        if books.contains_key(book.book_id()) {
            return Ok(false);
        }
        books.insert(book.book_id().to_string(), book);
        Ok(true)
    }

    async fn get_by_id(&self, book_id: &str) -> Result<Option<Book>> {
        Ok(self.lock()?.get(book_id).cloned())
    }

    async fn update(&self, book: Book) -> Result<bool> {
        let mut books = self.lock()?;
        match books.get_mut(book.book_id()) {
            Some(stored) => {
                *stored = book;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, book_id: &str) -> Result<bool> {
        Ok(self.lock()?.remove(book_id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Book>> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
