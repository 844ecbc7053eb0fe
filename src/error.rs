//! Error taxonomy for inventory operations.
//!
//! Every [`Inventory`](crate::inventory::Inventory) operation fails with
//! exactly one [`InventoryError`]. Front ends render the `Display` text.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// One or more of id/title/author was empty.
    #[error("Invalid book details provided.")]
    InvalidInput,
    #[error("Book ID already exists.")]
    DuplicateId(String),
    #[error("Book ID does not exist.")]
    NotFound(String),
    /// Borrow attempted while the book is lent out.
    #[error("Book is not available for borrowing.")]
    NotAvailable(String),
    /// Return attempted while the book is on the shelf.
    #[error("Book was not borrowed.")]
    NotBorrowed(String),
}

impl InventoryError {
    /// Stable short code, used in diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "BOOK-1001",
            Self::DuplicateId(_) => "BOOK-1002",
            Self::NotFound(_) => "BOOK-1003",
            Self::NotAvailable(_) => "BOOK-1004",
            Self::NotBorrowed(_) => "BOOK-1005",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::DuplicateId(_) => "DuplicateId",
            Self::NotFound(_) => "NotFound",
            Self::NotAvailable(_) => "NotAvailable",
            Self::NotBorrowed(_) => "NotBorrowed",
        }
    }

    /// The book id the failure refers to, when there is one.
    pub fn book_id(&self) -> Option<&str> {
        match self {
            Self::InvalidInput => None,
            Self::DuplicateId(id)
            | Self::NotFound(id)
            | Self::NotAvailable(id)
            | Self::NotBorrowed(id) => Some(id),
        }
    }
}
