use std::fs;

use lectio::LectioError;
use lectio::address::Address;
use lectio::canon::Canon;
use lectio::morphgnt;
use lectio::navigate::{Directive, Navigator};

const JUDE: &str = "\
260125 N- ----DSM- θεῷ θεῷ θεῷ θεός
260101 N- ----NSM- Ἰούδας Ἰούδας Ἰούδας Ἰούδας
260102 N- ----NSN- ἔλεος ἔλεος ἔλεος ἔλεος
";

const REVELATION: &str = "\
270101 N- ----NSF- Ἀποκάλυψις Ἀποκάλυψις ἀποκάλυψις ἀποκάλυψις
272221 N- ----NSF- ἡ ἡ ἡ ὁ
272220 V- 3PAI-S-- λέγει λέγει λέγει λέγω
";

#[test]
fn loads_a_directory_of_books() {
    let dir = std::env::temp_dir().join("lectio_morphgnt_test");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("86-Jud-morphgnt.txt"), JUDE).unwrap();
    fs::write(dir.join("87-Re-morphgnt.txt"), REVELATION).unwrap();
    fs::write(dir.join("README.md"), "not verse data").unwrap();

    let canon = Canon::new_testament();
    let verses = morphgnt::load_dir(canon, &dir).unwrap();
    assert_eq!(verses.len(), 6);
    assert_eq!(verses.books(), vec![26, 27]);

    let navigator = Navigator::new(canon, &verses);
    assert_eq!(navigator.extents().max_verse(26, 1), 25);
    assert_eq!(navigator.extents().max_chapter(27), 22);
    let end = Address::new(27, 22, 21);
    assert_eq!(navigator.navigate(end, Directive::NextVerse).unwrap(), end);
    assert_eq!(
        navigator.navigate(Address::new(27, 1, 1), Directive::PreviousVerse).unwrap(),
        Address::new(26, 1, 25)
    );
    assert_eq!(navigator.jump("Rev 22:20").unwrap(), Address::new(27, 22, 20));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bad_line_names_the_file() {
    let dir = std::env::temp_dir().join("lectio_morphgnt_bad");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("bad.txt"), "260101 N- ----NSM- Ἰούδας\n").unwrap();
    match morphgnt::load_dir(Canon::new_testament(), &dir) {
        Err(LectioError::Parse { message, line, .. }) => {
            assert!(message.contains("bad.txt"), "{message}");
            assert_eq!(line, Some(1));
        }
        other => panic!("expected a parse error, got {:?}", other.map(|t| t.len())),
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = std::env::temp_dir().join("lectio_no_such_directory");
    let _ = fs::remove_dir_all(&dir);
    assert!(matches!(morphgnt::load_dir(Canon::new_testament(), &dir), Err(LectioError::Io(_))));
}
