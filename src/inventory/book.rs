use std::fmt;

/// One catalogue item.
///
/// Values handed out by [`Inventory`](super::Inventory) are snapshots: there
/// are no public mutators, so availability only changes through the inventory.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Book {
    id: String,
    title: String,
    author: String,
    available: bool,
}

impl Book {
    pub(super) fn new(id: String, title: String, author: String) -> Self {
        Self { id, title, author, available: true }
    }

    pub(super) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Unique identifier, as given to `add_book`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title as entered.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author as entered.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// `true` unless the book is currently lent out.
    pub fn is_available(&self) -> bool {
        self.available
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book ID: {}, Title: {}, Author: {}, Available: {}",
            self.id, self.title, self.author, self.available
        )
    }
}
