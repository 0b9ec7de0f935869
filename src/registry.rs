use crate::constants::BOOKS_CATALOG;
use crate::error::{BibleError, Result};
use crate::source::{read_json, DataSource};
use crate::types::BookMetadata;
use std::collections::HashMap;
use tracing::info;

/// Book metadata catalog with id and order lookups
#[derive(Debug)]
pub struct BookRegistry {
    books: Vec<BookMetadata>,
    by_id: HashMap<String, usize>,
    by_order: HashMap<u32, usize>,
}

impl BookRegistry {
    /// Load `books.json` from the bundle
    pub fn load(source: &dyn DataSource) -> Result<Self> {
        let books: Vec<BookMetadata> = read_json(source, BOOKS_CATALOG)?;
        let registry = Self::from_books(books)?;
        info!("Loaded {} books from {}", registry.len(), source.describe());
        Ok(registry)
    }

    /// Build the lookup tables, rejecting duplicate ids or orders
    pub fn from_books(books: Vec<BookMetadata>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(books.len());
        let mut by_order = HashMap::with_capacity(books.len());

        for (pos, book) in books.iter().enumerate() {
            if book.id.is_empty() {
                return Err(BibleError::parse(
                    BOOKS_CATALOG,
                    format!("entry {} has an empty id", pos),
                ));
            }
            if book.order == 0 {
                return Err(BibleError::parse(
                    BOOKS_CATALOG,
                    format!("book '{}' has order 0; orders start at 1", book.id),
                ));
            }
            if by_id.insert(book.id.clone(), pos).is_some() {
                return Err(BibleError::parse(
                    BOOKS_CATALOG,
                    format!("duplicate book id '{}'", book.id),
                ));
            }
            if let Some(other) = by_order.insert(book.order, pos) {
                return Err(BibleError::parse(
                    BOOKS_CATALOG,
                    format!(
                        "books '{}' and '{}' share order {}",
                        books[other].id, book.id, book.order
                    ),
                ));
            }
        }

        Ok(Self {
            books,
            by_id,
            by_order,
        })
    }

    pub fn book(&self, id: &str) -> Result<&BookMetadata> {
        self.by_id
            .get(id)
            .map(|&pos| &self.books[pos])
            .ok_or_else(|| BibleError::not_found(format!("book {}", id)))
    }

    pub fn book_order(&self, id: &str) -> Result<u32> {
        self.book(id).map(|b| b.order)
    }

    pub fn book_id(&self, order: u32) -> Result<&str> {
        self.by_order
            .get(&order)
            .map(|&pos| self.books[pos].id.as_str())
            .ok_or_else(|| BibleError::not_found(format!("book with order {}", order)))
    }

    /// All books in catalog order
    pub fn books(&self) -> &[BookMetadata] {
        &self.books
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
