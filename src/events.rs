use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog_entry::CatalogEntry;

/// Catalog changes recorded in the library activity log
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Activity {
    /// A title was added or merged into an existing title
    Added(String),
    /// A title was removed
    Removed(String),
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(title) => write!(f, "Added {title}"),
            Self::Removed(title) => write!(f, "Removed {title}"),
        }
    }
}

/// Snapshot of a title at the moment a copy was borrowed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BorrowRecord {
    /// Title as stored in the catalog
    pub title: String,
    /// Author of the title
    pub author: String,
    /// Publication year
    pub year: i32,
}

impl From<&CatalogEntry> for BorrowRecord {
    fn from(entry: &CatalogEntry) -> Self {
        Self { title: entry.title().to_string(), author: entry.author().to_string(), year: entry.year() }
    }
}

/// Emitted to observers after a successful borrow or return
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Notification {
    /// A copy left the shelf
    Borrowed {
        /// Title as stored in the catalog
        title: String,
        /// Copies remaining after the borrow
        copies_left: u32,
    },
    /// A copy came back
    Returned {
        /// Title as stored in the catalog
        title: String,
        /// Copies on the shelf after the return
        copies: u32,
    },
}

impl Notification {
    /// Title the notification is about
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Borrowed { title, .. } | Self::Returned { title, .. } => title,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed { title, copies_left } => {
                write!(f, "Borrowed: {title}, copies left: {copies_left}")
            }
            Self::Returned { title, copies } => write!(f, "Returned: {title}, copies: {copies}"),
        }
    }
}
