use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{
    book_format::{BookFormat, check_measure},
    error::LibraryError,
};

/// One title held by a library, with a fungible number of copies
///
/// Identity is the title compared case-insensitively. Title, author and year
/// are fixed at construction; only the copy count and the numeric fields of
/// the format can change afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogEntry {
    /// Title in its original case
    title: String,
    /// Author name
    author: String,
    /// Publication year
    year: i32,
    /// Copies currently on the shelf
    copies: u32,
    /// Format-specific data
    #[serde(default)]
    format: BookFormat,
}

impl CatalogEntry {
    /// Create a standard printed book
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32, copies: u32) -> Self {
        Self::with_format(title, author, year, copies, BookFormat::default())
    }

    /// Create an electronic book
    #[must_use]
    pub fn ebook(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        copies: u32,
        file_size_mb: f64,
    ) -> Self {
        Self::with_format(title, author, year, copies, BookFormat::EBook { file_size_mb })
    }

    /// Create an audio book
    #[must_use]
    pub fn audio_book(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        copies: u32,
        length_minutes: u32,
    ) -> Self {
        Self::with_format(title, author, year, copies, BookFormat::AudioBook { length_minutes })
    }

    /// Create an entry in an arbitrary format
    #[must_use]
    pub fn with_format(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        copies: u32,
        format: BookFormat,
    ) -> Self {
        Self { title: title.into(), author: author.into(), year, copies, format }
    }

    /// Attach a genre to a standard book; other formats are returned unchanged
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        if let BookFormat::Standard { genre: slot, .. } = &mut self.format {
            *slot = Some(genre.into());
        }
        self
    }

    /// Title in its original case
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author name
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Publication year
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Copies currently on the shelf
    #[must_use]
    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Format-specific data
    #[must_use]
    pub fn format(&self) -> &BookFormat {
        &self.format
    }

    /// Lookup key used by the library map
    #[must_use]
    pub fn normalized_title(&self) -> String {
        normalize(&self.title)
    }

    /// Name shown in catalog listings, depending on the format
    #[must_use]
    pub fn display_name(&self) -> String {
        self.format.display_name(&self.title)
    }

    /// Replace the copy count
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if `count` is negative or does
    /// not fit the copy counter. The entry is left unchanged.
    pub fn set_copies(&mut self, count: i64) -> Result<(), LibraryError> {
        if count < 0 {
            return Err(LibraryError::invalid(format!("copies cannot be negative, got {count}")));
        }
        self.copies = u32::try_from(count)
            .map_err(|_| LibraryError::invalid(format!("copies out of range, got {count}")))?;
        Ok(())
    }

    /// Set or clear the price of a standard book
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if the entry is not a standard
    /// book or the price is negative or not finite
    pub fn set_price(&mut self, price: Option<f64>) -> Result<(), LibraryError> {
        if let Some(value) = price {
            check_measure("price", value)?;
        }
        match &mut self.format {
            BookFormat::Standard { price: slot, .. } => {
                *slot = price;
                Ok(())
            }
            other => Err(wrong_format("price", other)),
        }
    }

    /// Set the download size of an e-book
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if the entry is not an e-book or
    /// the size is negative or not finite
    pub fn set_file_size_mb(&mut self, file_size_mb: f64) -> Result<(), LibraryError> {
        check_measure("file_size_mb", file_size_mb)?;
        match &mut self.format {
            BookFormat::EBook { file_size_mb: slot } => {
                *slot = file_size_mb;
                Ok(())
            }
            other => Err(wrong_format("file_size_mb", other)),
        }
    }

    /// Set the running time of an audio book
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` if the entry is not an audio book
    pub fn set_length_minutes(&mut self, length_minutes: u32) -> Result<(), LibraryError> {
        match &mut self.format {
            BookFormat::AudioBook { length_minutes: slot } => {
                *slot = length_minutes;
                Ok(())
            }
            other => Err(wrong_format("length_minutes", other)),
        }
    }

    /// Absorb copies from a merged entry
    pub(crate) fn absorb_copies(&mut self, extra: u32) -> Result<(), LibraryError> {
        self.copies = self.copies.checked_add(extra).ok_or_else(|| {
            LibraryError::invalid(format!("copy count overflow merging {extra} into {}", self.copies))
        })?;
        Ok(())
    }

    /// Take one copy off the shelf, if any is left
    pub(crate) fn take_copy(&mut self) -> bool {
        match self.copies.checked_sub(1) {
            Some(left) => {
                self.copies = left;
                true
            }
            None => false,
        }
    }

    /// Put one copy back on the shelf, unless the counter is saturated
    pub(crate) fn put_back_copy(&mut self) -> bool {
        match self.copies.checked_add(1) {
            Some(count) => {
                self.copies = count;
                true
            }
            None => false,
        }
    }
}

/// Lower-case a title for use as a lookup key
#[must_use]
pub fn normalize(title: &str) -> String {
    title.to_lowercase()
}

/// Error for a setter that does not apply to the entry's format
fn wrong_format(field: &str, format: &BookFormat) -> LibraryError {
    LibraryError::invalid(format!("{field} does not apply to a {} entry", format.kind()))
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_title() == other.normalized_title()
    }
}

impl Eq for CatalogEntry {}

impl AsRef<Self> for CatalogEntry {
    fn as_ref(&self) -> &Self {
        self
    }
}

// Copies are left out so the hash stays stable while the entry is lent out.
impl Hash for CatalogEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_title().hash(state);
        self.author.hash(state);
        self.year.hash(state);
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({}) x{}", self.title, self.author, self.year, self.copies)
    }
}
