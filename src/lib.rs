//! Library crate for book-inventory.
//!
//! This crate exposes the building blocks of the tool:
//! - Book records and lending rules (`inventory`)
//! - Error taxonomy (`error`)
//! - Event sinks and diagnostics bootstrap (`logging`)
//! - Numbered-menu console front end (`shell`)
//! - Full-screen dashboard state and event loop (`app`) and its rendering (`ui`)
//! - Command-line configuration (`config`)
//!
//! It is used by the `book-inventory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod shell;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use error::{InventoryError, Result};
pub use inventory::{Book, Inventory};
pub use logging::EventSink;
