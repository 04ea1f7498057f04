use lectio::LectioError;
use lectio::canon::{BookIdentifier, Canon};

#[test]
fn every_naming_scheme_resolves_to_the_same_book() {
    let canon = Canon::new_testament();
    for book in canon.iter() {
        let by_name = canon.resolve(book.full_name()).map(|b| b.position());
        let by_abbreviation = canon.resolve(book.abbreviation()).map(|b| b.position());
        let by_alternate = canon.resolve(book.alternate_abbreviation()).map(|b| b.position());
        let by_position = canon.resolve(book.position()).map(|b| b.position());
        assert_eq!(by_name, Some(book.position()), "{}", book.full_name());
        assert_eq!(by_abbreviation, by_name, "{}", book.abbreviation());
        assert_eq!(by_alternate, by_name, "{}", book.alternate_abbreviation());
        assert_eq!(by_position, by_name);
    }
}

#[test]
fn known_names() {
    let canon = Canon::new_testament();
    let first_corinthians = ["1 Corinthians", "1Co", "1Cor"];
    for name in first_corinthians {
        assert_eq!(canon.resolve(name).map(|b| b.position()), Some(7), "{name}");
    }
    assert_eq!(canon.resolve("Philem").map(|b| b.full_name()), Some("Philemon"));
    assert_eq!(canon.resolve("Jn").map(|b| b.title()), Some("The Gospel According to John"));
}

#[test]
fn last_position_round_trips_through_offsets() {
    let canon = Canon::new_testament();
    let last = canon.resolve(27u8).expect("Revelation");
    let offset = canon.index_of(last.position()).expect("offset");
    assert_eq!(offset, 26);
    assert_eq!(canon.at(offset), Some(last));
    assert_eq!(canon.last(), Some(last));
    assert!(canon.at(27).is_none());
}

#[test]
fn misses_are_not_found() {
    let canon = Canon::new_testament();
    assert!(canon.resolve("Genesis").is_none());
    assert!(canon.resolve("matthew").is_none());
    assert!(canon.resolve(0u8).is_none());
    assert!(canon.resolve(BookIdentifier::Position(28)).is_none());
    assert!(matches!(canon.require("Gen"), Err(LectioError::UnknownBook(name)) if name == "Gen"));
}
