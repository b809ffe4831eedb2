use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

/// The physical or digital form a catalog entry is published in
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookFormat {
    /// Printed book with optional pricing and genre
    Standard {
        /// Shelf price, if known
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price: Option<f64>,
        /// Genre label, if known
        #[serde(default, skip_serializing_if = "Option::is_none")]
        genre: Option<String>,
    },
    /// Electronic book
    #[serde(rename = "ebook")]
    EBook {
        /// Size of the download in megabytes
        file_size_mb: f64,
    },
    /// Narrated recording
    #[serde(rename = "audio")]
    AudioBook {
        /// Running time in minutes
        length_minutes: u32,
    },
}

impl Default for BookFormat {
    fn default() -> Self {
        Self::Standard { price: None, genre: None }
    }
}

impl BookFormat {
    /// Render the catalog display name for a title in this format
    #[must_use]
    pub fn display_name(&self, title: &str) -> String {
        match self {
            Self::Standard { .. } => title.to_string(),
            Self::EBook { .. } => format!("[EBOOK] {}", title.to_uppercase()),
            Self::AudioBook { .. } => format!("[AUDIO] {title}"),
        }
    }

    /// Short lowercase name of the format
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Standard { .. } => "standard",
            Self::EBook { .. } => "ebook",
            Self::AudioBook { .. } => "audio",
        }
    }

    /// Check the numeric fields carried by this format
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` when a price or file size is
    /// negative or not a finite number
    pub fn validate(&self) -> Result<(), LibraryError> {
        match self {
            Self::Standard { price: Some(price), .. } => check_measure("price", *price),
            Self::EBook { file_size_mb } => check_measure("file_size_mb", *file_size_mb),
            Self::Standard { price: None, .. } | Self::AudioBook { .. } => Ok(()),
        }
    }
}

/// Reject negative and non-finite measurements
pub(crate) fn check_measure(field: &str, value: f64) -> Result<(), LibraryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LibraryError::invalid(format!("{field} must be a non-negative number, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_per_format() {
        let title = "Clean Code";
        assert_eq!(BookFormat::default().display_name(title), "Clean Code");
        assert_eq!(BookFormat::EBook { file_size_mb: 5.2 }.display_name(title), "[EBOOK] CLEAN CODE");
        assert_eq!(
            BookFormat::AudioBook { length_minutes: 480 }.display_name(title),
            "[AUDIO] Clean Code"
        );
    }

    #[test]
    fn test_validate_rejects_bad_measures() {
        assert!(BookFormat::EBook { file_size_mb: -1.0 }.validate().is_err());
        assert!(BookFormat::EBook { file_size_mb: f64::NAN }.validate().is_err());
        assert!(BookFormat::Standard { price: Some(-0.5), genre: None }.validate().is_err());
        assert!(BookFormat::Standard { price: Some(12.0), genre: None }.validate().is_ok());
        assert!(BookFormat::AudioBook { length_minutes: 0 }.validate().is_ok());
    }
}
