//! In-memory book inventory.
//!
//! [`Inventory`] owns every [`Book`] and enforces the lending rules:
//! ids are unique, fields are non-empty, and availability flips only through
//! [`Inventory::borrow_book`] and [`Inventory::return_book`]. Each successful
//! mutation is reported to the injected [`EventSink`].
mod book;

pub use book::Book;

use std::collections::HashMap;

use crate::error::{InventoryError, Result};
use crate::logging::EventSink;

/// Catalogue of books keyed by id, plus the sink that hears about changes.
#[derive(Debug, Default)]
pub struct Inventory {
    books: HashMap<String, Book>,
    sink: EventSink,
}

impl Inventory {
    /// Empty inventory that reports events nowhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty inventory that reports each successful mutation to `sink`.
    pub fn with_sink(sink: EventSink) -> Self {
        Self { books: HashMap::new(), sink }
    }

    /// Add a new, available book.
    ///
    /// Fails with `InvalidInput` if any field is empty, then with
    /// `DuplicateId` if the id is taken. Nothing is inserted on failure.
    pub fn add_book(&mut self, id: &str, title: &str, author: &str) -> Result<Book> {
        if id.is_empty() || title.is_empty() || author.is_empty() {
            return Err(InventoryError::InvalidInput);
        }
        if self.books.contains_key(id) {
            return Err(InventoryError::DuplicateId(id.to_string()));
        }

        let book = Book::new(id.to_string(), title.to_string(), author.to_string());
        self.books.insert(book.id().to_string(), book.clone());
        tracing::debug!(id, available = true, "book added");
        self.sink.emit(&format!("Book added: {book}"));
        Ok(book)
    }

    /// Lend a book out.
    pub fn borrow_book(&mut self, id: &str) -> Result<Book> {
        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        if !book.is_available() {
            return Err(InventoryError::NotAvailable(id.to_string()));
        }

        book.set_available(false);
        let snapshot = book.clone();
        tracing::debug!(id, available = false, "book borrowed");
        self.sink.emit(&format!("Book borrowed: {snapshot}"));
        Ok(snapshot)
    }

    /// Take a lent-out book back.
    pub fn return_book(&mut self, id: &str) -> Result<Book> {
        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        if book.is_available() {
            return Err(InventoryError::NotBorrowed(id.to_string()));
        }

        book.set_available(true);
        let snapshot = book.clone();
        tracing::debug!(id, available = true, "book returned");
        self.sink.emit(&format!("Book returned: {snapshot}"));
        Ok(snapshot)
    }

    /// Snapshots of every available book, sorted by id.
    pub fn list_available(&self) -> Vec<Book> {
        let mut out: Vec<Book> = self.books.values().filter(|b| b.is_available()).cloned().collect();
        out.sort_by(|a, b| a.id().cmp(b.id()));
        out
    }

    /// Snapshots of the whole catalogue, sorted by id.
    pub fn books(&self) -> Vec<Book> {
        let mut out: Vec<Book> = self.books.values().cloned().collect();
        out.sort_by(|a, b| a.id().cmp(b.id()));
        out
    }

    /// Snapshot of one book, if the id is known.
    pub fn get(&self, id: &str) -> Option<Book> {
        self.books.get(id).cloned()
    }

    /// Number of books, lent out or not.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// `true` when no book has been added.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Number of books currently on the shelf.
    pub fn available_count(&self) -> usize {
        self.books.values().filter(|b| b.is_available()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn ids(books: &[Book]) -> BTreeSet<String> {
        books.iter().map(|b| b.id().to_string()).collect()
    }

    #[test]
    fn lending_scenario() {
        let mut inv = Inventory::new();
        let added = inv.add_book("b1", "Dune", "Herbert").unwrap();
        assert!(added.is_available());
        assert_eq!(added.title(), "Dune");
        assert_eq!(added.author(), "Herbert");

        let borrowed = inv.borrow_book("b1").unwrap();
        assert!(!borrowed.is_available());
        assert_eq!(inv.borrow_book("b1"), Err(InventoryError::NotAvailable("b1".into())));

        let returned = inv.return_book("b1").unwrap();
        assert!(returned.is_available());
        assert_eq!(inv.return_book("b1"), Err(InventoryError::NotBorrowed("b1".into())));
    }

    #[test]
    fn duplicate_id_keeps_first_book() {
        let mut inv = Inventory::new();
        let first = inv.add_book("b1", "Dune", "Herbert").unwrap();
        let err = inv.add_book("b1", "Emma", "Austen").unwrap_err();
        assert_eq!(err, InventoryError::DuplicateId("b1".into()));
        assert_eq!(inv.get("b1"), Some(first));
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn empty_fields_are_rejected_without_insert() {
        let mut inv = Inventory::new();
        for (id, title, author) in [("", "T", "A"), ("x", "", "A"), ("x", "T", ""), ("", "", "")] {
            assert_eq!(inv.add_book(id, title, author), Err(InventoryError::InvalidInput));
        }
        assert!(inv.is_empty());
    }

    #[test]
    fn invalid_input_is_checked_before_duplicates() {
        let mut inv = Inventory::new();
        inv.add_book("b1", "Dune", "Herbert").unwrap();
        assert_eq!(inv.add_book("b1", "", "Herbert"), Err(InventoryError::InvalidInput));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut inv = Inventory::new();
        assert_eq!(inv.borrow_book("nope"), Err(InventoryError::NotFound("nope".into())));
        assert_eq!(inv.return_book("nope"), Err(InventoryError::NotFound("nope".into())));
    }

    #[test]
    fn listing_excludes_borrowed_books() {
        let mut inv = Inventory::new();
        inv.add_book("a", "A", "X").unwrap();
        inv.add_book("b", "B", "Y").unwrap();
        inv.borrow_book("b").unwrap();

        let avail = inv.list_available();
        assert_eq!(ids(&avail), BTreeSet::from(["a".to_string()]));
        assert_eq!(inv.available_count(), 1);
        assert_eq!(ids(&inv.books()), BTreeSet::from(["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn failures_leave_state_untouched() {
        let mut inv = Inventory::new();
        inv.add_book("a", "A", "X").unwrap();
        inv.add_book("b", "B", "Y").unwrap();
        inv.borrow_book("b").unwrap();
        let before = inv.books();

        assert!(inv.add_book("a", "Other", "Z").is_err());
        assert!(inv.add_book("c", "", "Z").is_err());
        assert!(inv.borrow_book("b").is_err());
        assert!(inv.borrow_book("zz").is_err());
        assert!(inv.return_book("a").is_err());
        assert!(inv.return_book("zz").is_err());

        assert_eq!(inv.books(), before);
    }

    #[test]
    fn snapshots_are_detached() {
        let mut inv = Inventory::new();
        let snap = inv.add_book("a", "A", "X").unwrap();
        inv.borrow_book("a").unwrap();
        assert!(snap.is_available());
        assert!(!inv.get("a").unwrap().is_available());
    }

    #[test]
    fn only_successful_mutations_reach_the_sink() {
        let (sink, log) = EventSink::memory();
        let mut inv = Inventory::with_sink(sink);
        inv.add_book("b1", "Dune", "Herbert").unwrap();
        let _ = inv.add_book("b1", "Dune", "Herbert");
        inv.borrow_book("b1").unwrap();
        let _ = inv.borrow_book("b1");
        inv.return_book("b1").unwrap();
        let _ = inv.return_book("b1");

        assert_eq!(
            log.lines(),
            vec![
                "Book added: Book ID: b1, Title: Dune, Author: Herbert, Available: true",
                "Book borrowed: Book ID: b1, Title: Dune, Author: Herbert, Available: false",
                "Book returned: Book ID: b1, Title: Dune, Author: Herbert, Available: true",
            ]
        );
    }

    #[test]
    fn display_format() {
        let mut inv = Inventory::new();
        let b = inv.add_book("42", "Title with, comma", "Someone").unwrap();
        assert_eq!(
            b.to_string(),
            "Book ID: 42, Title: Title with, comma, Author: Someone, Available: true"
        );
    }
}
