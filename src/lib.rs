//! Book catalog and lending state for a small library.
//!
//! A [`Library`] owns a set of [`CatalogEntry`] values keyed by their
//! case-insensitive title. Copies are a fungible count: borrowing takes one
//! off the shelf, returning puts one back, and every successful borrow is
//! recorded in an append-only history.

pub mod book_format;
pub mod catalog_entry;
pub mod config;
pub mod error;
pub mod events;
pub mod library;
pub mod observers;
pub mod report;

pub use book_format::BookFormat;
pub use catalog_entry::CatalogEntry;
pub use config::{ConfigError, LibraryConfig};
pub use error::LibraryError;
pub use events::{Activity, BorrowRecord, Notification};
pub use library::Library;
pub use observers::{LendingObserver, NotificationLogger, NotificationRecorder};
pub use report::{CatalogReport, Holding};
