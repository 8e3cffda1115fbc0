//! SVG document assembly.
//!
//! The document structure is fixed: a `100%`-sized root, exactly one
//! arrowhead marker definition referenced by every connector path, and one
//! content group translated by the diagram inset. Block groups come first in
//! declaration order, then connector paths in creation order, so connectors
//! draw over the shapes they join.

use svg::Document;
use svg::node::element::Group;

use flowkit_core::draw::{arrow, shape};

use crate::{config::StyleConfig, diagram::Diagram};

/// Distance from the document origin to the diagram's grid origin.
const DOCUMENT_INSET: f32 = 30.0;

/// Renders built diagrams into SVG strings.
pub struct SvgRenderer<'a> {
    style: &'a StyleConfig,
}

impl<'a> SvgRenderer<'a> {
    /// Creates a renderer using the given style configuration.
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Assembles the complete SVG document for a diagram.
    pub fn render(&self, diagram: &Diagram) -> String {
        let stroke = self.style.stroke();

        let mut content = Group::new().set(
            "transform",
            format!("translate({DOCUMENT_INSET},{DOCUMENT_INSET})"),
        );
        for block in diagram.blocks() {
            content = content.add(shape::block_group(block, &stroke));
        }
        for link in diagram.links() {
            content = content.add(arrow::connector_path(link.points(), &stroke));
        }

        Document::new()
            .set("width", "100%")
            .set("height", "100%")
            .add(arrow::arrow_marker())
            .add(content)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use flowkit_core::draw::arrow::ARROW_MARKER_ID;

    use crate::config::LayoutConfig;

    use super::*;

    fn render(source: &str) -> String {
        let program = flowkit_parser::parse(source).expect("program should parse");
        let diagram =
            Diagram::build(&program, &LayoutConfig::default()).expect("program should build");
        SvgRenderer::new(&StyleConfig::default()).render(&diagram)
    }

    #[test]
    fn test_document_declares_one_marker() {
        let markup = render("st=>start:A\ne=>end:B\nst->e");

        assert_eq!(markup.matches("<marker").count(), 1);
        assert!(markup.contains(&format!("id=\"{ARROW_MARKER_ID}\"")));
    }

    #[test]
    fn test_every_link_references_the_marker() {
        let markup = render("st=>start:A\ne=>end:B\nop=>operation:C\nst->op->e");

        let references = markup
            .matches(&format!("marker-end: url(#{ARROW_MARKER_ID});"))
            .count();
        assert_eq!(references, 2);
    }

    #[test]
    fn test_content_is_inset_from_origin() {
        let markup = render("st=>start:A");

        assert!(markup.contains("translate(30,30)"));
    }

    #[test]
    fn test_block_groups_use_their_own_translation() {
        let markup = render("st=>start:A\ne=>end:Wider Title\nst->e");

        // The narrower start block (width 27) is centered within the column
        // sized by the end block (width 97), so its group translation
        // carries the centering offset (97 - 27) / 2 = 35.
        assert!(markup.contains("translate(35,0)"));
    }

    #[test]
    fn test_document_is_full_size() {
        let markup = render("st=>start:A");

        assert!(markup.contains("width=\"100%\""));
        assert!(markup.contains("height=\"100%\""));
    }
}
