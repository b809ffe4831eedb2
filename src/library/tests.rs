#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use crate::{
    book_format::BookFormat,
    catalog_entry::CatalogEntry,
    error::LibraryError,
    events::{Activity, BorrowRecord, Notification},
    library::Library,
    observers::NotificationRecorder,
};

/// Helper function to set up the demo catalog with a recorder attached
fn setup_test_library() -> (Library, NotificationRecorder) {
    let recorder = NotificationRecorder::new();
    let mut library = Library::without_observers("Central Library", "Main Street 1");
    library.register_observer(Box::new(recorder.clone()));

    library.add_book_full("Dune", "Frank Herbert", 1965, 3).unwrap();
    library.add_book(CatalogEntry::new("1984", "George Orwell", 1949, 2)).unwrap();
    library.add_book(CatalogEntry::ebook("Clean Code", "Robert Martin", 2008, 10, 5.2)).unwrap();
    library
        .add_book(CatalogEntry::audio_book("The Great Gatsby", "F. Scott Fitzgerald", 1925, 1, 480))
        .unwrap();

    (library, recorder)
}

/// Titles of the given entries, in order
fn titles<I, E>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = E>,
    E: AsRef<CatalogEntry>,
{
    entries.into_iter().map(|e| e.as_ref().title().to_string()).collect()
}

#[test]
fn test_empty_library() {
    let mut library = Library::new("Empty", "Nowhere");
    assert!(library.is_empty());
    assert!(library.search(None, None).is_empty());
    assert!(!library.contains("X"));
    assert!(!library.remove_book("X"));
    assert!(library.get_logs().is_empty());
}

#[test]
fn test_merge_keeps_first_title() {
    let mut library = Library::without_observers("Central Library", "Main Street 1");
    library.add_book_full("Dune", "Herbert", 1965, 3).unwrap();
    library.add_book(CatalogEntry::new("dune", "Herbert", 1965, 2)).unwrap();

    assert_eq!(library.len(), 1);
    let entry = library.find_by_title("DUNE").expect("Dune should be held");
    assert_eq!(entry.title(), "Dune");
    assert_eq!(entry.copies(), 5);
    assert_eq!(
        library.get_logs(),
        &[Activity::Added("Dune".to_string()), Activity::Added("dune".to_string())]
    );
}

#[test]
fn test_merge_overflow_leaves_entry_untouched() {
    let mut library = Library::without_observers("Central Library", "Main Street 1");
    library.add_book(CatalogEntry::new("Dune", "Herbert", 1965, u32::MAX)).unwrap();

    let result = library.add_book(CatalogEntry::new("Dune", "Herbert", 1965, 1));
    assert!(matches!(result, Err(LibraryError::InvalidArgument { .. })));
    assert_eq!(library.find_by_title("Dune").unwrap().copies(), u32::MAX);
    assert_eq!(library.get_logs().len(), 1);
}

#[test]
fn test_add_book_full_rejects_negative_copies() {
    let mut library = Library::without_observers("Central Library", "Main Street 1");
    let result = library.add_book_full("Dune", "Herbert", 1965, -1);

    assert!(matches!(result, Err(LibraryError::InvalidArgument { .. })));
    assert!(library.is_empty());
    assert!(library.get_logs().is_empty());
}

#[test]
fn test_add_book_rejects_invalid_format() {
    let mut library = Library::without_observers("Central Library", "Main Street 1");
    let result = library.add_book(CatalogEntry::ebook("Clean Code", "Robert Martin", 2008, 1, -5.0));

    assert!(matches!(result, Err(LibraryError::InvalidArgument { .. })));
    assert!(library.is_empty());
    assert!(!library.contains("Clean Code"));
    assert!(library.get_logs().is_empty());
}

#[test]
fn test_invalid_format_does_not_merge() {
    let (mut library, _) = setup_test_library();
    let logs_before = library.get_logs().len();

    let priced = CatalogEntry::with_format(
        "Dune",
        "Frank Herbert",
        1965,
        4,
        BookFormat::Standard { price: Some(f64::NAN), genre: None },
    );
    let result = library.add_book(priced);

    assert!(matches!(result, Err(LibraryError::InvalidArgument { .. })));
    assert_eq!(library.find_by_title("Dune").unwrap().copies(), 3);
    assert_eq!(library.len(), 4);
    assert_eq!(library.get_logs().len(), logs_before);
}

#[test]
fn test_lookup_ignores_case() {
    let (library, _) = setup_test_library();

    assert!(library.contains("dune"));
    assert!(library.contains("CLEAN CODE"));
    assert_eq!(library.find_by_title("the great GATSBY").unwrap().author(), "F. Scott Fitzgerald");
    assert!(library.find_by_title("Unknown Book").is_none());
}

#[test]
fn test_remove_book() {
    let (mut library, _) = setup_test_library();

    assert!(library.remove_book("1984"));
    assert!(!library.contains("1984"));
    assert_eq!(library.len(), 3);
    assert!(!library.remove_book("1984"));

    // Positions after the removed entry still resolve
    assert_eq!(library.find_by_title("Clean Code").unwrap().copies(), 10);
    assert_eq!(library.book_at(1).unwrap().title(), "Clean Code");
    assert_eq!(library.get_logs().last(), Some(&Activity::Removed("1984".to_string())));
}

#[test]
fn test_removals_keep_positions_in_sync() {
    let (mut library, _) = setup_test_library();

    assert!(library.remove_book("dune"));
    assert!(library.remove_book("CLEAN CODE"));

    assert_eq!(titles(&library), vec!["1984", "The Great Gatsby"]);
    for (pos, entry) in library.iter().enumerate() {
        assert_eq!(library.book_at(pos).unwrap(), entry);
        assert_eq!(library.find_by_title(entry.title()).unwrap().title(), entry.title());
    }
    assert!(matches!(
        library.book_at(2),
        Err(LibraryError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn test_remove_then_add_appends_at_end() {
    let (mut library, _) = setup_test_library();

    assert!(library.remove_book("DUNE"));
    library.add_book_full("Dune", "Frank Herbert", 1965, 1).unwrap();

    assert_eq!(
        titles(&library),
        vec!["1984", "Clean Code", "The Great Gatsby", "Dune"]
    );
    assert_eq!(library.find_by_title("dune").unwrap().copies(), 1);
}

#[test]
fn test_search_filters() {
    let (mut library, _) = setup_test_library();
    library.add_book_full("Animal Farm", "George Orwell", 1945, 1).unwrap();

    assert_eq!(library.search(None, None).len(), 5);
    assert_eq!(titles(library.search(Some("george orwell"), None)), vec!["1984", "Animal Farm"]);
    assert_eq!(titles(library.search(None, Some("DUNE"))), vec!["Dune"]);
    assert_eq!(titles(library.search(Some("George Orwell"), Some("animal farm"))), vec!["Animal Farm"]);
    assert!(library.search(Some("Frank Herbert"), Some("1984")).is_empty());
    assert!(library.search(Some("Orwell"), None).is_empty());
}

#[test]
fn test_borrow_and_return() {
    let (mut library, recorder) = setup_test_library();

    assert!(library.borrow("dune"));
    assert_eq!(library.find_by_title("Dune").unwrap().copies(), 2);

    assert!(library.return_book("Dune"));
    assert_eq!(library.find_by_title("Dune").unwrap().copies(), 3);

    assert_eq!(
        recorder.lines(),
        vec!["Borrowed: Dune, copies left: 2".to_string(), "Returned: Dune, copies: 3".to_string()]
    );
}

#[test]
fn test_borrow_fails_without_copies() {
    let (mut library, recorder) = setup_test_library();

    assert!(library.borrow("The Great Gatsby"));
    assert!(!library.borrow("The Great Gatsby"));
    assert!(!library.borrow("The Great Gatsby"));

    assert_eq!(library.find_by_title("The Great Gatsby").unwrap().copies(), 0);
    assert_eq!(library.get_borrow_history().len(), 1);
    assert_eq!(recorder.notifications().len(), 1);
}

#[test]
fn test_borrow_missing_title() {
    let recorder = NotificationRecorder::new();
    let mut library = Library::without_observers("Central Library", "Main Street 1");
    library.register_observer(Box::new(recorder.clone()));

    assert!(!library.borrow("Missing"));
    assert!(!library.return_book("Missing"));
    assert!(library.get_borrow_history().is_empty());
    assert!(recorder.notifications().is_empty());
}

#[test]
fn test_borrow_history_survives_removal() {
    let (mut library, _) = setup_test_library();

    assert!(library.borrow("Dune"));
    assert!(library.borrow("1984"));
    assert!(library.remove_book("Dune"));

    assert_eq!(
        library.get_borrow_history(),
        vec![
            BorrowRecord { title: "Dune".to_string(), author: "Frank Herbert".to_string(), year: 1965 },
            BorrowRecord { title: "1984".to_string(), author: "George Orwell".to_string(), year: 1949 },
        ]
    );
}

#[test]
fn test_borrow_history_is_a_copy() {
    let (mut library, _) = setup_test_library();
    assert!(library.borrow("Dune"));

    let mut history = library.get_borrow_history();
    history.clear();

    assert_eq!(library.get_borrow_history().len(), 1);
}

#[test]
fn test_set_copies_through_library() {
    let (mut library, recorder) = setup_test_library();

    library.find_by_title_mut("1984").unwrap().set_copies(0).unwrap();
    assert!(!library.borrow("1984"));

    let err = library.find_by_title_mut("1984").unwrap().set_copies(-3).unwrap_err();
    assert!(matches!(err, LibraryError::InvalidArgument { .. }));
    assert_eq!(library.find_by_title("1984").unwrap().copies(), 0);

    assert!(library.return_book("1984"));
    assert_eq!(
        recorder.notifications(),
        vec![Notification::Returned { title: "1984".to_string(), copies: 1 }]
    );
}

#[test]
fn test_indexed_access() {
    let (library, _) = setup_test_library();

    assert_eq!(library.book_at(0).unwrap().title(), "Dune");
    assert_eq!(library.book_at(3).unwrap().display_name(), "[AUDIO] The Great Gatsby");
    assert_eq!(library.book_at(4), Err(LibraryError::IndexOutOfRange { index: 4, len: 4 }));
}

#[test]
fn test_iteration_is_restartable() {
    let (library, _) = setup_test_library();

    let first: Vec<String> = titles(library.iter());
    let second: Vec<String> = titles(&library);
    assert_eq!(first, second);
    assert_eq!(first, titles(library.get_all_books()));
    assert_eq!(first, vec!["Dune", "1984", "Clean Code", "The Great Gatsby"]);
}

#[test]
fn test_display() {
    let (library, _) = setup_test_library();
    assert_eq!(library.to_string(), "Library(Central Library, books=4, addr=Main Street 1)");
    assert_eq!(library.book_at(2).unwrap().display_name(), "[EBOOK] CLEAN CODE");
}
