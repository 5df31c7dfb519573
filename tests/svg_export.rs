use egui::{pos2, vec2};
use plano_sketch::{InputEvent, LineEditor};

fn two_segment_plan() -> LineEditor {
    let mut editor = LineEditor::default();
    editor.set_cursor(pos2(100.0, 100.0));
    editor.append_segment(2.0).unwrap();
    editor.append_segment(3.0).unwrap();
    editor
}

#[test]
fn test_export_contains_lines_and_labels() {
    let svg = two_segment_plan().export_vector();

    let expected = "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"1335\" height=\"660\">\n\
        \x20 <line x1=\"100\" y1=\"100\" x2=\"200\" y2=\"100\" style=\"stroke:black;stroke-width:2\" />\n\
        \x20 <line x1=\"200\" y1=\"100\" x2=\"350\" y2=\"100\" style=\"stroke:black;stroke-width:2\" />\n\
        \x20 <text x=\"150\" y=\"90\" font-family=\"Arial\" font-size=\"12\" fill=\"black\" text-anchor=\"middle\">2.00 m</text>\n\
        \x20 <text x=\"275\" y=\"90\" font-family=\"Arial\" font-size=\"12\" fill=\"black\" text-anchor=\"middle\">3.00 m</text>\n\
        </svg>\n";
    assert_eq!(svg, expected);
}

#[test]
fn test_export_is_deterministic_and_read_only() {
    let editor = two_segment_plan();
    let revision = editor.revision();

    let first = editor.export_vector();
    let second = editor.export_vector();

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(editor.revision(), revision);
}

#[test]
fn test_export_follows_surface_size() {
    let mut editor = two_segment_plan();
    editor.set_surface_size(vec2(800.0, 450.5));
    assert!(editor.export_vector().starts_with(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"800\" height=\"450.5\">"
    ));
}

#[test]
fn test_labels_track_dragged_geometry() {
    let mut editor = two_segment_plan();
    assert!(editor.select_point_near(pos2(350.0, 100.0)));
    editor.drag_to(pos2(200.0, 250.0));
    editor.end_drag();

    let svg = editor.export_vector();
    assert!(svg.contains("<line x1=\"200\" y1=\"100\" x2=\"200\" y2=\"250\""));
    assert!(svg.contains(">3.00 m</text>"));
    assert!(svg.contains("<text x=\"200\" y=\"165\""));
}

#[test]
fn test_annotations_are_escaped_and_blue() {
    let mut editor = two_segment_plan();
    editor.arm_annotation("Sala & <Comedor>").unwrap();
    editor.handle_event(&InputEvent::PointerDown {
        position: pos2(400.0, 300.0),
    });

    let svg = editor.export_vector();
    assert!(svg.contains(
        "<text x=\"400\" y=\"300\" font-family=\"Arial\" font-size=\"12\" fill=\"blue\" text-anchor=\"middle\">Sala &amp; &lt;Comedor&gt;</text>"
    ));
    assert_eq!(svg.matches("<line ").count(), 2);
    assert_eq!(svg.matches("<text ").count(), 3);
}
