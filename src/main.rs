use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use lending_library::{
    CatalogEntry, CatalogReport, ConfigError, Library, LibraryConfig, LibraryError,
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the lending library demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file naming the library and seeding its catalog
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every catalog operation
    #[arg(short, long)]
    verbose: bool,

    /// Print the library as JSON at the end
    #[arg(long)]
    json: bool,
}

/// Errors that abort the demo
#[derive(Debug, thiserror::Error)]
enum DemoError {
    /// Configuration could not be loaded or applied
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A catalog operation was rejected
    #[error(transparent)]
    Library(#[from] LibraryError),
    /// JSON export failed
    #[error("Failed to export library: {0}")]
    Export(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.config.as_deref().map(LibraryConfig::load).transpose() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.as_ref().map_or_else(|| "info".to_string(), |c| c.logging.level.clone())
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match run(config.as_ref(), args.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Build the library and walk through the lending operations
fn run(config: Option<&LibraryConfig>, json: bool) -> Result<(), DemoError> {
    let mut library = match config {
        Some(config) if !config.books.is_empty() => config.build()?,
        Some(config) => seed_demo_catalog(config.build()?)?,
        None => seed_demo_catalog(LibraryConfig::default().build()?)?,
    };

    println!("{}", "Lending Library Demonstration".green().bold());
    println!("=====================================\n");

    println!("{}", ">>> Library Overview:".yellow().bold());
    print!("{}", CatalogReport::overview(&library));
    for entry in &library {
        println!("  {}", entry.display_name());
    }

    println!("\n{}", ">>> Borrow/Return Operations:".yellow().bold());
    let first = library.book_at(0).map(|entry| entry.title().to_string())?;
    let second = library.book_at(1).ok().map(|entry| entry.title().to_string());
    report_outcome("borrow", &first, library.borrow(&first));
    if let Some(second) = &second {
        report_outcome("borrow", second, library.borrow(second));
    }
    report_outcome("return", &first, library.return_book(&first));
    report_outcome("borrow", "Unknown Book", library.borrow("Unknown Book"));

    println!("\n{}", ">>> Search:".yellow().bold());
    let author = library.book_at(0)?.author().to_string();
    let found: Vec<&str> =
        library.search(Some(author.as_str()), None).into_iter().map(CatalogEntry::title).collect();
    println!("Books by {author}: {found:?}");

    println!("\n{}", ">>> Containment Checks:".yellow().bold());
    println!("'{first}' in library: {}", library.contains(&first));
    println!("'Unknown Book' in library: {}", library.contains("Unknown Book"));

    println!("\n{}", ">>> Borrow History:".yellow().bold());
    println!("{}", CatalogReport::history_table(&library.get_borrow_history()));

    println!("\n{}", ">>> Activity Log:".yellow().bold());
    for activity in library.get_logs() {
        println!("  - {activity}");
    }

    println!("\n{library}");

    if json {
        println!("{}", CatalogReport::export_json(&library)?);
    }

    Ok(())
}

/// Fill an empty library with the sample catalog
fn seed_demo_catalog(mut library: Library) -> Result<Library, LibraryError> {
    library.add_book_full("Dune", "Frank Herbert", 1965, 3)?;
    library.add_book(CatalogEntry::new("1984", "George Orwell", 1949, 2))?;
    library.add_book(CatalogEntry::ebook("Clean Code", "Robert Martin", 2008, 10, 5.2))?;
    library.add_book(CatalogEntry::audio_book(
        "The Great Gatsby",
        "F. Scott Fitzgerald",
        1925,
        1,
        480,
    ))?;
    Ok(library)
}

/// Print whether a lending operation went through
fn report_outcome(operation: &str, title: &str, succeeded: bool) {
    if succeeded {
        println!("{} {operation} '{title}'", "ok".green());
    } else {
        println!("{} {operation} '{title}'", "refused".red());
    }
}
