use std::fmt::Write as _;

use serde::Serialize;

use crate::{
    catalog_entry::CatalogEntry,
    events::{Activity, BorrowRecord},
    library::Library,
};

/// Width of the rule printed around catalog listings
const RULE_WIDTH: usize = 50;

/// Text and JSON renderings of library state
#[derive(Debug)]
pub struct CatalogReport;

/// One title held by one library in a cross-library view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holding {
    /// Name of the holding library
    pub library: String,
    /// Title as stored in that library
    pub title: String,
}

/// Serialized shape of a library export
#[derive(Debug, Serialize)]
struct LibraryExport<'a> {
    /// Name of the branch
    name: &'a str,
    /// Street address of the branch
    address: &'a str,
    /// Entries in insertion order
    books: Vec<&'a CatalogEntry>,
    /// Activity log, oldest first
    activity: &'a [Activity],
    /// Successful borrows, oldest first
    borrow_history: Vec<BorrowRecord>,
}

impl CatalogReport {
    /// Header, then one line per entry between two rules
    #[must_use]
    pub fn overview(library: &Library) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "Library: {}", library.name());
        let _ = writeln!(out, "Address: {}", library.address());
        let _ = writeln!(out, "Books: {}", library.len());
        let _ = writeln!(out, "{rule}");
        for entry in library {
            let _ = writeln!(out, "  {entry}");
        }
        let _ = writeln!(out, "{rule}");
        out
    }

    /// Generate a markdown table of the borrow history
    #[must_use]
    pub fn history_table(records: &[BorrowRecord]) -> String {
        if records.is_empty() {
            return "No borrows recorded yet.".to_string();
        }

        let mut table = String::from("| # | Title | Author | Year |\n");
        table.push_str("|---|-------|--------|------|\n");

        for (number, record) in (1_usize..).zip(records) {
            let _ = writeln!(table, "| {number} | {} | {} | {} |", record.title, record.author, record.year);
        }

        table
    }

    /// Pretty JSON with the catalog, activity log and borrow history
    ///
    /// # Errors
    ///
    /// Returns an error if `serde_json` fails to serialize the export
    pub fn export_json(library: &Library) -> Result<String, serde_json::Error> {
        let export = LibraryExport {
            name: library.name(),
            address: library.address(),
            books: library.get_all_books(),
            activity: library.get_logs(),
            borrow_history: library.get_borrow_history(),
        };
        serde_json::to_string_pretty(&export)
    }

    /// Every title held by any of the given libraries
    #[must_use]
    pub fn holdings_across(libraries: &[&Library]) -> Vec<Holding> {
        libraries
            .iter()
            .flat_map(|&library| {
                library.iter().map(move |entry| Holding {
                    library: library.name().to_string(),
                    title: entry.title().to_string(),
                })
            })
            .collect()
    }
}
