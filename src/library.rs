use std::{collections::HashMap, fmt, slice};

use crate::{
    catalog_entry::{CatalogEntry, normalize},
    error::LibraryError,
    events::{Activity, BorrowRecord, Notification},
    observers::{LendingObserver, NotificationLogger},
};

/// A collection of catalog entries keyed by normalized title
///
/// Entries keep their insertion order for iteration and indexed access.
/// Every title lookup is case-insensitive.
pub struct Library {
    /// Name of the branch
    name: String,
    /// Street address of the branch
    address: String,
    /// Entries in insertion order
    entries: Vec<CatalogEntry>,
    /// Normalized title to position in `entries`
    index: HashMap<String, usize>,
    /// Activity log, oldest first
    logs: Vec<Activity>,
    /// Successful borrows, oldest first
    borrow_history: Vec<BorrowRecord>,
    /// Registered lending observers
    observers: Vec<Box<dyn LendingObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("entries", &self.entries)
            .field("index", &self.index)
            .field("logs", &self.logs)
            .field("borrow_history", &self.borrow_history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Library {
    /// Create an empty library that logs lending notifications
    #[must_use]
    pub fn new(name: &str, address: &str) -> Self {
        let mut library = Self::without_observers(name, address);
        library.register_observer(Box::new(NotificationLogger));
        library
    }

    /// Create an empty library with no observers attached
    #[must_use]
    pub fn without_observers(name: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            entries: Vec::new(),
            index: HashMap::new(),
            logs: Vec::new(),
            borrow_history: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Name of the branch
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Street address of the branch
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Register an observer to be notified of borrows and returns
    pub fn register_observer(&mut self, observer: Box<dyn LendingObserver>) {
        self.observers.push(observer);
    }

    /// Drop every registered observer
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Add an entry, merging its copies into an existing title if present
    ///
    /// When the normalized title is already held, only the copy count of
    /// `entry` is kept; the stored entry keeps its title, author and format.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if the entry carries a negative
    /// or non-finite price or file size, or if the merged copy count would
    /// overflow. Nothing is changed in either case.
    pub fn add_book(&mut self, entry: CatalogEntry) -> Result<(), LibraryError> {
        entry.format().validate().inspect_err(|err| {
            tracing::warn!(title = entry.title(), %err, "Rejected entry");
        })?;

        let key = entry.normalized_title();
        let activity = Activity::Added(entry.title().to_string());

        match self.index.get(&key).and_then(|&pos| self.entries.get_mut(pos)) {
            Some(existing) => {
                existing.absorb_copies(entry.copies()).inspect_err(|err| {
                    tracing::warn!(title = entry.title(), %err, "Rejected merge");
                })?;
                tracing::debug!(
                    title = existing.title(),
                    added = entry.copies(),
                    copies = existing.copies(),
                    "Merged copies into existing title"
                );
            }
            None => {
                tracing::debug!(title = entry.title(), copies = entry.copies(), "Added new title");
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }

        self.logs.push(activity);
        Ok(())
    }

    /// Build a standard entry and add it
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if `copies` is negative or the
    /// merged copy count would overflow
    pub fn add_book_full(
        &mut self,
        title: &str,
        author: &str,
        year: i32,
        copies: i64,
    ) -> Result<(), LibraryError> {
        let mut entry = CatalogEntry::new(title, author, year, 0);
        entry.set_copies(copies)?;
        self.add_book(entry)
    }

    /// Remove a title, returning whether it was held
    pub fn remove_book(&mut self, title: &str) -> bool {
        let Some(pos) = self.index.remove(&normalize(title)) else {
            return false;
        };

        if pos < self.entries.len() {
            self.entries.remove(pos);
        } else {
            tracing::warn!(title, pos, len = self.entries.len(), "Index points past the catalog");
        }
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot = slot.saturating_sub(1);
            }
        }

        tracing::debug!(title, "Removed title");
        self.logs.push(Activity::Removed(title.to_string()));
        true
    }

    /// Look up a title, ignoring case
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        self.index.get(&normalize(title)).and_then(|&pos| self.entries.get(pos))
    }

    /// Look up a title for mutation, ignoring case
    pub fn find_by_title_mut(&mut self, title: &str) -> Option<&mut CatalogEntry> {
        self.index.get(&normalize(title)).and_then(|&pos| self.entries.get_mut(pos))
    }

    /// Entries matching every given filter, in insertion order
    ///
    /// Both filters compare case-insensitively for equality. With no filter
    /// every entry is returned.
    #[must_use]
    pub fn search(&self, author: Option<&str>, title: Option<&str>) -> Vec<&CatalogEntry> {
        let author = author.map(normalize);
        let title = title.map(normalize);

        self.entries
            .iter()
            .filter(|entry| author.as_ref().is_none_or(|a| normalize(entry.author()) == *a))
            .filter(|entry| title.as_ref().is_none_or(|t| entry.normalized_title() == *t))
            .collect()
    }

    /// Lend one copy of a title
    ///
    /// Returns `false` without changing anything if the title is not held or
    /// has no copies left.
    pub fn borrow(&mut self, title: &str) -> bool {
        let Some(entry) = self.index.get(&normalize(title)).and_then(|&pos| self.entries.get_mut(pos))
        else {
            tracing::debug!(title, "Borrow of unknown title");
            return false;
        };

        if !entry.take_copy() {
            tracing::debug!(title = entry.title(), "No copies left to borrow");
            return false;
        }

        self.borrow_history.push(BorrowRecord::from(&*entry));
        let notification =
            Notification::Borrowed { title: entry.title().to_string(), copies_left: entry.copies() };
        self.notify(&notification);
        true
    }

    /// Take back one copy of a title
    ///
    /// Returns `false` if the title is not held.
    pub fn return_book(&mut self, title: &str) -> bool {
        let Some(entry) = self.index.get(&normalize(title)).and_then(|&pos| self.entries.get_mut(pos))
        else {
            tracing::debug!(title, "Return of unknown title");
            return false;
        };

        if !entry.put_back_copy() {
            tracing::warn!(title = entry.title(), copies = entry.copies(), "Copy counter saturated");
            return false;
        }

        let notification =
            Notification::Returned { title: entry.title().to_string(), copies: entry.copies() };
        self.notify(&notification);
        true
    }

    /// Pass a notification to every observer
    fn notify(&self, notification: &Notification) {
        for observer in &self.observers {
            observer.on_notification(notification);
        }
    }

    /// Whether a title is held, ignoring case
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(&normalize(title))
    }

    /// Entry at a position in insertion order
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::IndexOutOfRange` if `index` is not below `len()`
    pub fn book_at(&self, index: usize) -> Result<&CatalogEntry, LibraryError> {
        self.entries.get(index).ok_or(LibraryError::IndexOutOfRange { index, len: self.entries.len() })
    }

    /// Number of distinct titles
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no title is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// All entries in insertion order
    #[must_use]
    pub fn get_all_books(&self) -> Vec<&CatalogEntry> {
        self.entries.iter().collect()
    }

    /// Copy of the borrow history, oldest first
    #[must_use]
    pub fn get_borrow_history(&self) -> Vec<BorrowRecord> {
        self.borrow_history.clone()
    }

    /// Activity log, oldest first
    #[must_use]
    pub fn get_logs(&self) -> &[Activity] {
        &self.logs
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a CatalogEntry;
    type IntoIter = slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Library({}, books={}, addr={})", self.name, self.entries.len(), self.address)
    }
}

#[cfg(test)]
mod tests;
