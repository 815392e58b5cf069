//! Writing tilesets and reading them back.

use std::fs::File;
use std::io::BufWriter;

use tilelisp::model::Rect;
use tilelisp::{
    ImageRegion, ParseOptions, Tile, TileData, TileGroup, TileSet, WriteOptions, parse_document,
    parse_document_with, write_document_with,
};

use crate::helpers::source_fixtures::*;
use crate::helpers::tileset_helpers::{parse_ok, tile, write_to_string};

#[test]
fn test_write_then_parse_is_identity() {
    let original = parse_ok(WRAPPED_TILESET).tileset;
    let text = write_to_string(&original);
    let reparsed = parse_ok(&text);
    assert!(reparsed.warnings.is_empty(), "{:?}", reparsed.warnings);
    assert_eq!(reparsed.tileset, original, "written text:\n{text}");
}

#[test]
fn test_written_layout() {
    let mut set = TileSet::new();
    set.add_group(TileGroup::with_tiles("Blocks", [7]));
    let mut block = tile(7, "block.png");
    block.attributes.solid = true;
    block.images.push(ImageRegion::cropped("sheet.png", Rect::new(64, 0, 32, 32)));
    set.insert(block);

    assert_eq!(
        write_to_string(&set),
        concat!(
            "(supertux-tiles\n",
            "  (tilegroup\n",
            "    (name \"Blocks\")\n",
            "    (tiles 7)\n",
            "  )\n",
            "  (tile\n",
            "    (id 7)\n",
            "    (images\n",
            "      \"block.png\"\n",
            "      (region \"sheet.png\" 64 0 32 32)\n",
            "    )\n",
            "    (solid #t)\n",
            "    (anim-fps 40.0)\n",
            "  )\n",
            ")\n",
        )
    );
}

#[test]
fn test_default_fps_of_animated_tile_becomes_40() {
    let parsed = parse_ok(ANIMATED_DEFAULT_FPS);
    assert_eq!(parsed.tileset.get(9).unwrap().anim_fps, Tile::DEFAULT_ANIM_FPS);

    let text = write_to_string(&parsed.tileset);
    assert!(text.contains("(anim-fps 40.0)"), "{text}");
    assert_eq!(parse_ok(&text).tileset.get(9).unwrap().anim_fps, 40.0);
}

#[test]
fn test_single_image_tile_omits_fps() {
    let mut set = TileSet::new();
    let mut slow = tile(1, "a.png");
    slow.anim_fps = 3.0;
    set.insert(slow);
    assert!(!write_to_string(&set).contains("anim-fps"));
}

#[test]
fn test_strings_are_escaped() {
    let mut set = TileSet::new();
    set.add_group(TileGroup::new("quote \" and \\ backslash\nnewline"));
    set.insert(tile(1, "dir\\file \"x\".png"));

    let reparsed = parse_ok(&write_to_string(&set)).tileset;
    assert_eq!(reparsed, set);
}

#[test]
fn test_worldmap_data_survives_with_option() {
    let source = "(tile (id 2) (images \"path.png\") (north #t) (east #t))";
    let parsed = tilelisp::parse_str(source, &ParseOptions::worldmap()).unwrap();
    let text = write_to_string(&parsed.tileset);
    assert!(text.contains("(data 5)"), "{text}");

    let again = parse_document_with(text.as_bytes(), &ParseOptions::worldmap()).unwrap();
    assert_eq!(again.tileset, parsed.tileset);

    let plain = parse_document(text.as_bytes()).unwrap();
    assert_eq!(plain.get(2).unwrap().data, TileData::Plain(5));
}

#[test]
fn test_tile_block_is_written_as_tiles() {
    let source = r#"(tiles (width 2) (height 1) (ids 3 4) (image "grid.png"))"#;
    let text = write_to_string(&parse_ok(source).tileset);
    assert!(!text.contains("(tiles\n"), "{text}");
    assert!(text.contains("(region \"grid.png\" 32 0 32 32)"), "{text}");

    let reparsed = parse_ok(&text).tileset;
    assert_eq!(reparsed.ids().collect::<Vec<_>>(), vec![3, 4]);
}

#[test]
fn test_file_round_trip() {
    let original = parse_ok(WRAPPED_TILESET).tileset;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiles.strf");

    let options = WriteOptions {
        header_comment: Some("Generated tileset\nDo not edit".into()),
        ..WriteOptions::default()
    };
    let out = write_document_with(&original, BufWriter::new(File::create(&path).unwrap()), &options)
        .unwrap();
    drop(out);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("; Generated tileset\n; Do not edit\n(supertux-tiles\n"));

    let reparsed = parse_document(File::open(&path).unwrap()).unwrap();
    assert_eq!(reparsed, original);
}
