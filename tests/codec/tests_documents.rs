//! Reading whole tileset documents.

use rstest::rstest;
use tilelisp::error::{Error, LexError, SchemaError, StructuralError};
use tilelisp::model::{Directions, Rect};
use tilelisp::{ImageRegion, ParseOptions, TileData, Warning, parse_document, parse_str};

use crate::helpers::source_fixtures::*;
use crate::helpers::tileset_helpers::parse_ok;

#[test]
fn test_single_tile_document() {
    let tileset = parse_document(SINGLE_TILE.as_bytes()).unwrap();
    let tile = tileset.get(5).unwrap();
    assert_eq!(tile.id(), Some(5));
    assert_eq!(tile.images, vec![ImageRegion::whole("box.png")]);
    assert!(tile.attributes.solid);
    assert!(!tile.hidden);
    assert_eq!(tile.data, TileData::Plain(0));
}

#[test]
fn test_wrapped_tileset() {
    let parsed = parse_ok(WRAPPED_TILESET);
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    let set = &parsed.tileset;
    assert_eq!(set.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(set.unassigned().len(), 1);
    assert_eq!(set.unassigned()[0].one_way.as_deref(), Some("up"));

    let names: Vec<_> = set.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Snow", "Bonus"]);

    let snow = set.get(1).unwrap();
    assert!(snow.attributes.solid && snow.attributes.ice);
    assert_eq!(snow.images[0].rect, Some(Rect::new(0, 0, 32, 32)));

    assert_eq!(set.get(2).unwrap().data, TileData::Slope(5));

    let bonus = set.get(3).unwrap();
    assert_eq!(bonus.data, TileData::BoxContent(2));
    assert_eq!(bonus.next_tile, Some(1));
    assert_eq!(bonus.anim_fps, 12.5);
    assert_eq!(bonus.images.len(), 3);
    assert_eq!(bonus.editor_images, vec![ImageRegion::whole("bonus-editor.png")]);
}

#[test]
fn test_unknown_key_is_skipped_with_warning() {
    let parsed = parse_ok(UNKNOWN_KEY);
    assert_eq!(
        parsed.warnings,
        vec![Warning::UnknownKey {
            record: "tile",
            key: "frobnicate".into(),
            line: 3,
        }]
    );
    assert_eq!(
        parsed.warnings[0].to_string(),
        "line 3: unknown tile element 'frobnicate'"
    );
    assert!(parsed.tileset.get(4).unwrap().attributes.water);
}

#[test]
fn test_fps_accepts_integers() {
    let parsed = parse_ok(r#"(tile (id 1) (images "a.png" "b.png") (fps 8))"#);
    assert_eq!(parsed.tileset.get(1).unwrap().anim_fps, 8.0);
}

#[test]
fn test_worldmap_option() {
    let source = "(tile (id 1) (south #t) (west #t) (stop #t))";
    let parsed = parse_str(source, &ParseOptions::worldmap()).unwrap();
    let expected = Directions {
        south: true,
        west: true,
        stop: true,
        ..Directions::default()
    };
    assert_eq!(parsed.tileset.get(1).unwrap().data, TileData::Worldmap(expected));
}

#[rstest]
#[case::eof_in_record("(tile (id 1) (images \"a.png\")")]
#[case::eof_in_field("(tile (id")]
#[case::eof_in_region("(tile (images (region \"a.png\" 0 0")]
fn test_truncated_documents(#[case] source: &str) {
    let err = parse_str(source, &ParseOptions::default()).unwrap_err();
    assert!(
        matches!(err, Error::Schema(SchemaError::UnexpectedEof { .. })),
        "unexpected error {err:?}"
    );
}

#[rstest]
#[case::bool_expected("(tile (solid 1))")]
#[case::integer_expected("(tile (id \"five\"))")]
#[case::string_expected("(tilegroup (name 5))")]
#[case::bare_atom_at_top("tile")]
#[case::extra_value("(tile (id 1 2))")]
#[case::id_too_large("(tile (id 4294967296))")]
fn test_schema_errors(#[case] source: &str) {
    let err = parse_str(source, &ParseOptions::default()).unwrap_err();
    assert!(
        matches!(err, Error::Schema(SchemaError::Expected { .. })),
        "unexpected error {err:?}"
    );
}

#[test]
fn test_structural_and_lex_errors() {
    let close = parse_str("(tile (id 1)))", &ParseOptions::default()).unwrap_err();
    assert!(matches!(
        close,
        Error::Structural(StructuralError::UnexpectedClose { line: 1 })
    ));

    let constant = parse_str("(tile\n (solid #yes))", &ParseOptions::default()).unwrap_err();
    assert!(matches!(
        constant,
        Error::Lex(LexError::UnknownConstant { line: 2, .. })
    ));
    assert_eq!(constant.to_string(), "line 2: unknown constant '#yes'");
}

#[test]
fn test_io_errors_propagate() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }
    assert!(matches!(parse_document(Broken), Err(Error::Io(_))));
}
