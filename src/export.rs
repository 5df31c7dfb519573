//! SVG export of the floor plan.
//!
//! Generating the document is pure; writing it to disk is a separate step
//! the host takes after asking the user for a path.

use std::fs;
use std::path::Path;

use crate::editor::LineEditor;
use crate::geometry::{format_length, hit_testing};
use crate::persistence::PersistenceResult;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Builds a standalone SVG document of the editor's plan.
///
/// Lines come first, then the length labels, then the free annotations, so
/// text always lands on top. The canvas matches the current surface size.
pub fn svg_document(editor: &LineEditor) -> String {
    let config = editor.config();
    let size = editor.surface_size();
    let mut output = String::new();

    output.push_str(&format!(
        "<svg xmlns=\"{}\" version=\"1.1\" width=\"{}\" height=\"{}\">\n",
        SVG_NAMESPACE, size.x, size.y
    ));

    for segment in editor.segments() {
        let (start, end) = (segment.start(), segment.end());
        output.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" style=\"stroke:black;stroke-width:{}\" />\n",
            start.x, start.y, end.x, end.y, config.stroke_width
        ));
    }

    for segment in editor.segments() {
        let anchor = hit_testing::label_anchor(segment, config.label_offset);
        let label = format_length(segment.length_m(config.pixels_per_meter));
        output.push_str(&text_element(anchor.x, anchor.y, config.font_size, "black", &label));
    }

    for annotation in editor.document().annotations() {
        output.push_str(&text_element(
            annotation.position.x,
            annotation.position.y,
            config.font_size,
            "blue",
            &annotation.text,
        ));
    }

    output.push_str("</svg>\n");
    output
}

fn text_element(x: f32, y: f32, font_size: f32, fill: &str, text: &str) -> String {
    format!(
        "  <text x=\"{}\" y=\"{}\" font-family=\"Arial\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\">{}</text>\n",
        x,
        y,
        font_size,
        fill,
        escape_xml(text)
    )
}

/// Escapes the five XML special characters
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Writes an SVG document to `path`
pub fn save_svg(path: &Path, svg: &str) -> PersistenceResult<()> {
    fs::write(path, svg)?;
    log::info!("SVG saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Sala & <Cocina>"), "Sala &amp; &lt;Cocina&gt;");
        assert_eq!(escape_xml("it's \"big\""), "it&apos;s &quot;big&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_empty_plan_is_bare_canvas() {
        let editor = LineEditor::default();
        assert_eq!(
            svg_document(&editor),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"1335\" height=\"660\">\n</svg>\n"
        );
    }
}
