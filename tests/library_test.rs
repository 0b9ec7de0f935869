use bijbel_api::types::Paragraph;
use bijbel_api::{BibleError, Library};
use std::path::PathBuf;

fn bundle_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn library() -> Library {
    Library::open_dir(bundle_dir(), true).expect("sample bundle loads")
}

#[test]
fn test_registry_completeness() {
    let library = library();
    let registry = library.registry();
    assert_eq!(registry.books().len(), 73);

    for book in registry.books() {
        let order = registry.book_order(&book.id).unwrap();
        assert_eq!(registry.book_id(order).unwrap(), book.id);
    }
}

#[test]
fn test_registry_lookups() {
    let library = library();
    let registry = library.registry();
    assert_eq!(registry.book("genesis").unwrap().name, "Genesis");
    assert_eq!(registry.book("exodus").unwrap().name, "Exodus");
    assert_eq!(registry.book_order("genesis").unwrap(), 1);
    assert_eq!(registry.book_order("exodus").unwrap(), 2);
    assert_eq!(registry.book_id(64).unwrap(), "filemon");
    assert!(registry.book("pieter").unwrap_err().is_not_found());
    assert_eq!(registry.books()[0].id, "genesis");
    assert_eq!(registry.books()[72].id, "apokalyps");
}

#[test]
fn test_book_chapter_counts() {
    let library = library();
    assert_eq!(library.store().book("genesis").unwrap().chapter_count, 50);
    assert_eq!(library.store().book("exodus").unwrap().chapter_count, 40);
}

#[test]
fn test_genesis_first_chapter() {
    let library = library();
    let chapter = library.store().chapter("genesis", 1).unwrap();
    assert_eq!(chapter.name, "Genesis");
    assert_eq!(chapter.chapter, 1);
    assert_eq!(chapter.verses.len(), 31);
    assert_eq!(chapter.verses[0].verse, 1);
    assert_eq!(
        chapter.verses[0].text,
        "In het begin schiep God de hemel en de aarde."
    );
    assert_eq!(chapter.verses[2].text, "God zei: 'Er moet licht zijn!' En er was licht.");
    assert!(chapter.verses[30].text.ends_with("De zesde dag."));
}

#[test]
fn test_verse_paragraph_markers() {
    let library = library();
    let chapter = library.store().chapter("genesis", 1).unwrap();
    for (verse, expected) in [(1, Paragraph::Start), (2, Paragraph::Continue), (6, Paragraph::Start)] {
        assert_eq!(chapter.verses[verse - 1].paragraph, expected, "verse {}", verse);
    }
}

#[test]
fn test_verse_titles() {
    let library = library();
    let cases = [
        (1, "Schrijver, lezers, groet"),
        (2, "Het priesterschap van Gods volk"),
        (4, ""),
    ];
    for (chapter, title) in cases {
        let chapter = library.store().chapter("1petrus", chapter).unwrap();
        assert_eq!(chapter.verses[0].title, title);
    }
}

#[test]
fn test_control_characters_are_stripped() {
    let library = library();
    let chapter = library.store().chapter("ruth", 4).unwrap();
    let last = chapter.verses.last().unwrap();
    assert_eq!(last.text, "Obed verwekte Isai en Isai verwekte David.");
}

#[test]
fn test_book_without_verse_file_is_not_found() {
    let library = library();
    // in the catalog, but not shipped in the sample bundle
    let err = library.store().chapter("filemon", 1).unwrap_err();
    assert!(matches!(err, BibleError::NotFound(_)));
}

#[test]
fn test_mapping_is_a_bijection() {
    let library = library();
    let catalog = library.catalog();
    assert_eq!(catalog.mapping().mappings.len(), 66);
    assert_eq!(catalog.index().books.len(), 66);
    assert_eq!(catalog.index().total_books, 66);

    for (english, dutch) in &catalog.mapping().mappings {
        assert_eq!(catalog.dutch_to_english(dutch).unwrap(), english);
        assert_eq!(catalog.english_to_dutch(english).unwrap(), dutch);
    }
}

#[test]
fn test_known_translations() {
    let library = library();
    let catalog = library.catalog();
    for (english, dutch) in [
        ("Gen", "genesis"),
        ("Exod", "exodus"),
        ("Ps", "psalmen"),
        ("Matt", "matteus"),
        ("Rev", "apokalyps"),
        ("1Cor", "1korintiers"),
    ] {
        assert_eq!(catalog.english_to_dutch(english).unwrap(), dutch);
        assert_eq!(catalog.dutch_to_english(dutch).unwrap(), english);
    }
    assert!(catalog.english_to_dutch("InvalidBook").is_err());
}

#[test]
fn test_unmapped_books_have_no_cross_references() {
    let library = library();
    let catalog = library.catalog();
    let mut unmapped = Vec::new();
    for book in library.registry().books() {
        if !catalog.mapping().mappings.values().any(|d| d == &book.id) {
            assert!(!catalog.has_cross_references(&book.id));
            unmapped.push(book.id.clone());
        }
    }
    assert_eq!(unmapped.len(), 7);
    assert!(unmapped.contains(&"tobit".to_string()));
    assert!(unmapped.contains(&"wijsheid".to_string()));
    assert!(!catalog.has_cross_references("invalid-book"));
}

#[test]
fn test_cross_references_for_genesis_1_1() {
    let library = library();
    let refs = library
        .resolver()
        .cross_references_for_verse("genesis", 1, 1)
        .unwrap();
    assert!(!refs.is_empty());
    for r in &refs {
        assert!(r.from.is_at(1, 1));
        assert!(r.to.book.is_some());
        assert!(r.to.chapter > 0 && r.to.verse > 0);
    }
}

#[test]
fn test_cross_reference_sets() {
    let library = library();
    for id in ["genesis", "matteus", "apokalyps"] {
        let refs = library.resolver().cross_references(id).unwrap();
        assert!(refs.total_references > 0);
        assert!(!refs.cross_references.is_empty());
    }
    assert!(library
        .resolver()
        .cross_references("tobit")
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_cross_references_for_chapter_use_local_ids() {
    let library = library();
    let refs = library
        .resolver()
        .cross_references_for_chapter("genesis", 1)
        .unwrap();
    assert!(!refs.is_empty());
    assert!(refs.iter().any(|r| r.to.book.as_deref() == Some("johannes")));
    assert!(refs.iter().all(|r| r.from.chapter == 1));
    assert!(refs.iter().all(|r| r.from.book.as_deref() == Some("genesis")));
}

#[test]
fn test_check_reports_missing_sample_files() {
    let report = library().check();
    assert_eq!(report.books_checked, 73);
    assert_eq!(report.crossref_files_checked, 66);
    // only a handful of books ship verse and cross-reference data
    assert!(!report.is_ok());
    assert!(!report.failures.iter().any(|f| f.starts_with("genesis")));
}
