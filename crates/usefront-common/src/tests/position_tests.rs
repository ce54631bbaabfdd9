use crate::position::{LineMap, Position};

#[test]
fn test_line_map_single_line() {
    let map = LineMap::build("const a = 1;");
    assert_eq!(map.line_count(), 1);
    assert_eq!(map.line_of(6), 0);
    assert_eq!(map.offset_to_position(6, "const a = 1;"), Position::new(0, 6));
}

#[test]
fn test_line_map_multiple_lines() {
    let source = "a;\nbb;\r\nccc;";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.line_of(0), 0);
    assert_eq!(map.line_of(3), 1);
    assert_eq!(map.line_of(8), 2);
    assert_eq!(map.offset_to_position(9, source), Position::new(2, 1));
    assert_eq!(map.line_text(1, source), "bb;");
    assert_eq!(map.line_text(2, source), "ccc;");
}

#[test]
fn test_line_map_lone_carriage_return() {
    let source = "a;\rb;";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 2);
    assert_eq!(map.line_of(3), 1);
}

#[test]
fn test_line_text_out_of_range_is_empty() {
    let map = LineMap::build("x");
    assert_eq!(map.line_text(5, "x"), "");
}
