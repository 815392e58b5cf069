//! Common tileset sources for tests.

pub const SINGLE_TILE: &str = r#"(tile (id 5) (images "box.png") (solid #t))"#;

pub const WRAPPED_TILESET: &str = r#"
; Snow tiles
(supertux-tiles
  (tilegroup
    (name (_ "Snow"))
    (tiles 1 2 3))
  (tilegroup
    (name "Bonus")
    (tiles 3))
  (tile
    (id 1)
    (images (region "snow.png" 0 0 32 32))
    (solid #t)
    (ice #t))
  (tile
    (id 2)
    (images (region "snow.png" 32 0 32 32))
    (slope-type 5)
    (data 5)
    (solid #t))
  (tile
    (id 3)
    (images "bonus-1.png" "bonus-2.png" "bonus-3.png")
    (fullbox #t)
    (data 2)
    (next-tile 1)
    (anim-fps 12.5)
    (editor-images "bonus-editor.png"))
  (tile
    (id -1)
    (images "scratch.png")
    (one-way "up")))
"#;

pub const ANIMATED_DEFAULT_FPS: &str = r#"(tile (id 9) (images "a.png" "b.png"))"#;

pub const UNKNOWN_KEY: &str = r#"(tile
  (id 4)
  (frobnicate 1 (deeper "x" #t) 2.5)
  (water #t))"#;
