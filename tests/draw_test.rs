mod common;
use block::mach::{Point, Size};
use common::*;

#[test]
fn test_draw_commands_reach_the_canvas() {
    let mut out = Recorder::default();
    let mut screen = Screen::default();
    exec_with(
        r#"[
            { "id": "1", "type": "clear_screen" },
            { "id": "2", "type": "draw_line",
              "x1": { "id": "3", "type": "literal", "expression": 0 },
              "y1": { "id": "4", "type": "literal", "expression": 0 },
              "x2": { "id": "5", "type": "literal", "expression": 10 },
              "y2": { "id": "6", "type": "literal", "expression": 20 } },
            { "id": "7", "type": "draw_rect",
              "x": { "id": "8", "type": "literal", "expression": 1 },
              "y": { "id": "9", "type": "literal", "expression": 2 },
              "w": { "id": "10", "type": "literal", "expression": 3 },
              "h": { "id": "11", "type": "literal", "expression": 4 } },
            { "id": "12", "type": "draw_pixel",
              "x": { "id": "13", "type": "literal", "expression": 5.5 },
              "y": { "id": "14", "type": "literal", "expression": 6 } }
        ]"#,
        &mut out,
        &mut screen,
    )
    .unwrap();
    assert_eq!(
        screen.commands,
        vec![
            Draw::Clear,
            Draw::Line(Point { x: 0.0, y: 0.0 }, Point { x: 10.0, y: 20.0 }),
            Draw::Rect(Point { x: 1.0, y: 2.0 }, Size { w: 3.0, h: 4.0 }),
            Draw::Pixel(Point { x: 5.5, y: 6.0 }),
        ]
    );
}

#[test]
fn test_coordinates_come_from_expressions() {
    let mut out = Recorder::default();
    let mut screen = Screen::default();
    exec_with(
        r#"[
            { "id": "1", "type": "definition", "name": "x", "primitive": "number",
              "expression": { "id": "2", "type": "literal", "expression": 4 } },
            { "id": "3", "type": "draw_pixel",
              "x": { "id": "4", "type": "multiply", "expression": [
                { "id": "5", "type": "variable", "definitionId": "1" },
                { "id": "6", "type": "literal", "expression": 2 } ] },
              "y": { "id": "7", "type": "literal", "expression": 0 } }
        ]"#,
        &mut out,
        &mut screen,
    )
    .unwrap();
    assert_eq!(screen.commands, vec![Draw::Pixel(Point { x: 8.0, y: 0.0 })]);
}

#[test]
fn test_clear_output_resets_the_sink() {
    let mut out = Recorder::default();
    let mut screen = Screen::default();
    exec_with(
        r#"[
            { "id": "1", "type": "print",
              "expression": { "id": "2", "type": "literal", "expression": "gone" } },
            { "id": "3", "type": "clear_output" },
            { "id": "4", "type": "print",
              "expression": { "id": "5", "type": "literal", "expression": "kept" } }
        ]"#,
        &mut out,
        &mut screen,
    )
    .unwrap();
    assert_eq!(out.printed, vec!["kept"]);
    assert_eq!(out.cleared, 1);
}

#[test]
fn test_draw_requires_numeric_coordinates() {
    let mut out = Recorder::default();
    let mut screen = Screen::default();
    let error = exec_with(
        r#"[
            { "id": "1", "type": "draw_pixel",
              "x": { "id": "2", "type": "literal", "expression": "left" },
              "y": { "id": "3", "type": "literal", "expression": 0 } }
        ]"#,
        &mut out,
        &mut screen,
    )
    .unwrap_err();
    assert_eq!(error.code(), block::lang::ErrorCode::TypeMismatch);
    assert!(screen.commands.is_empty());
}
