//! Library configuration loaded from TOML
//!
//! A configuration names the branch, controls notification logging and can
//! seed the catalog with an initial set of books.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    catalog_entry::CatalogEntry, error::LibraryError, library::Library,
    observers::NotificationLogger,
};

/// Errors raised while loading a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for a library configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A seed book was rejected by the catalog
    #[error("Invalid seed book '{title}': {source}")]
    Invalid {
        /// Title of the rejected seed
        title: String,
        /// Why it was rejected
        source: LibraryError,
    },
}

/// Logging settings for the demo binary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Settings used to build a [`Library`]
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    /// Name of the branch
    #[serde(default = "default_name")]
    pub name: String,
    /// Street address of the branch
    #[serde(default = "default_address")]
    pub address: String,
    /// Log borrow and return notifications
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Books added to the catalog when the library is built
    #[serde(default)]
    pub books: Vec<CatalogEntry>,
}

/// Default branch name
fn default_name() -> String {
    "Central Library".to_string()
}

/// Default branch address
fn default_address() -> String {
    "Main Street 1".to_string()
}

/// Notifications are logged unless disabled
fn default_notifications() -> bool {
    true
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            address: default_address(),
            notifications: default_notifications(),
            logging: LoggingConfig::default(),
            books: Vec::new(),
        }
    }
}

impl LibraryConfig {
    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are not a valid configuration
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), books = config.books.len(), "Loaded configuration");
        Ok(config)
    }

    /// Parse a TOML configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if `text` is not a valid configuration
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Build a library and seed it with the configured books
    ///
    /// Seeds go through [`Library::add_book`], so repeated titles merge.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a seed carries an invalid format value
    /// or the merged copy count overflows
    pub fn build(&self) -> Result<Library, ConfigError> {
        let mut library = Library::without_observers(&self.name, &self.address);
        if self.notifications {
            library.register_observer(Box::new(NotificationLogger));
        }

        for book in &self.books {
            library
                .add_book(book.clone())
                .map_err(|source| ConfigError::Invalid { title: book.title().to_string(), source })?;
        }

        Ok(library)
    }
}
