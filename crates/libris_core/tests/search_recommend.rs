use libris_core::{
    Book, BookId, InventoryService, LoanRecord, MemoryRecordStore, SearchFilter,
    MAX_RECOMMENDATIONS,
};

type MemoryInventory = InventoryService<MemoryRecordStore<Book>, MemoryRecordStore<LoanRecord>>;

fn memory_service() -> MemoryInventory {
    InventoryService::new(MemoryRecordStore::new(), MemoryRecordStore::new())
}

fn add(
    service: &mut MemoryInventory,
    title: &str,
    author: &str,
    genre: Option<&str>,
    quantity: i32,
) -> BookId {
    let mut book = Book::new(title, author, quantity);
    book.genre = genre.map(str::to_string);
    book.isbn = format!("978-{}", title.len());
    service.add_book(book).unwrap()
}

fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|book| book.title.as_str()).collect()
}

fn catalogue() -> MemoryInventory {
    let mut service = memory_service();
    add(&mut service, "Dune", "Frank Herbert", Some("Science Fiction"), 2);
    add(&mut service, "Emma", "Jane Austen", Some("Classic"), 1);
    add(&mut service, "Neuromancer", "William Gibson", None, 1);
    service
}

#[test]
fn blank_term_returns_everything() {
    let service = catalogue();

    let hits = service.search_books("  ", SearchFilter::Title);
    assert_eq!(titles(&hits), vec!["Dune", "Emma", "Neuromancer"]);
}

#[test]
fn field_filters_match_case_insensitive_substrings() {
    let service = catalogue();

    assert_eq!(titles(&service.search_books("DUN", SearchFilter::Title)), vec!["Dune"]);
    assert_eq!(
        titles(&service.search_books("austen", SearchFilter::Author)),
        vec!["Emma"]
    );
    assert_eq!(
        titles(&service.search_books("fiction", SearchFilter::Genre)),
        vec!["Dune"]
    );
    assert_eq!(
        titles(&service.search_books("978-11", SearchFilter::Isbn)),
        vec!["Neuromancer"]
    );
}

#[test]
fn absent_genre_never_matches() {
    let service = catalogue();

    let hits = service.search_books("n", SearchFilter::Genre);
    assert_eq!(titles(&hits), vec!["Dune"]);
}

#[test]
fn all_filter_matches_any_field() {
    let service = catalogue();

    let hits = service.search_books("classic", SearchFilter::parse("anything"));
    assert_eq!(titles(&hits), vec!["Emma"]);

    let hits = service.search_books("gibson", SearchFilter::All);
    assert_eq!(titles(&hits), vec!["Neuromancer"]);
}

#[test]
fn available_filter_ignores_term() {
    let mut service = catalogue();
    let emma = service.search_books("Emma", SearchFilter::Title)[0].id;
    assert!(service.lend_book(emma, "Alice").unwrap());

    let hits = service.search_books("", SearchFilter::Available);
    assert_eq!(titles(&hits), vec!["Dune", "Neuromancer"]);

    let hits = service.search_books("Emma", SearchFilter::Available);
    assert_eq!(titles(&hits), vec!["Dune", "Neuromancer"]);
}

#[test]
fn recommendations_are_empty_without_history_or_name() {
    let service = catalogue();

    assert!(service.get_recommended_books("").is_empty());
    assert!(service.get_recommended_books("Nobody").is_empty());
}

#[test]
fn recommendations_follow_genre_and_author() {
    let mut service = memory_service();
    let dune = add(&mut service, "Dune", "Frank Herbert", Some("Science Fiction"), 1);
    add(&mut service, "Emma", "Jane Austen", Some("Classic"), 1);
    add(&mut service, "Hyperion", "Dan Simmons", Some("Science Fiction"), 1);
    add(&mut service, "Whipping Star", "Frank Herbert", None, 1);
    add(&mut service, "Untagged", "Someone Else", None, 1);

    assert!(service.lend_book(dune, "Alice").unwrap());
    assert!(service.return_book(dune, "Alice").unwrap());

    let picks = service.get_recommended_books("ALICE");
    assert_eq!(titles(&picks), vec!["Hyperion", "Whipping Star"]);
}

#[test]
fn recommendations_exclude_borrowed_and_unavailable_books() {
    let mut service = memory_service();
    let dune = add(&mut service, "Dune", "Frank Herbert", Some("Science Fiction"), 2);
    let hyperion = add(&mut service, "Hyperion", "Dan Simmons", Some("Science Fiction"), 1);
    add(&mut service, "Foundation", "Isaac Asimov", Some("Science Fiction"), 1);

    assert!(service.lend_book(dune, "Alice").unwrap());
    assert!(service.lend_book(hyperion, "Bob").unwrap());

    let picks = service.get_recommended_books("Alice");
    assert_eq!(titles(&picks), vec!["Foundation"]);
    assert!(picks.iter().all(|book| book.id != dune));
    assert!(picks.iter().all(|book| book.available_quantity > 0));
}

#[test]
fn recommendations_are_capped() {
    let mut service = memory_service();
    let seed = add(&mut service, "Seed", "Prolific Author", Some("Mystery"), 1);
    for index in 0..8 {
        add(&mut service, &format!("Sequel {index}"), "Prolific Author", None, 1);
    }
    assert!(service.lend_book(seed, "Alice").unwrap());

    let picks = service.get_recommended_books("Alice");
    assert_eq!(picks.len(), MAX_RECOMMENDATIONS);
    assert_eq!(picks[0].title, "Sequel 0");
    assert_eq!(picks[4].title, "Sequel 4");
}

#[test]
fn deleted_history_books_are_skipped() {
    let mut service = memory_service();
    let gone = add(&mut service, "Gone", "Lost Author", Some("Horror"), 1);
    add(&mut service, "Other", "Lost Author", None, 1);
    assert!(service.lend_book(gone, "Alice").unwrap());
    assert!(service.return_book(gone, "Alice").unwrap());
    service.delete_book(gone).unwrap();

    assert!(service.get_recommended_books("Alice").is_empty());
}
