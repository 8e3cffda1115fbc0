//! Per-kind SVG shape rendering for blocks.
//!
//! Each block renders as one `<g>` translated to the block's position; all
//! child coordinates are block-local. The outlines per kind:
//!
//! - start / end: a rounded rectangle (`rx` 20)
//! - operation: a plain rectangle
//! - subroutine: a rectangle with a second, inset outline (double border)
//! - input-output: a slanted parallelogram path
//! - condition: a diamond path with the fixed `No` / `Yes` exit labels

use svg::node::element as svg_element;
use svg::node::element::path::Data;

use crate::{
    block::{Block, BlockKind, Side},
    draw::Stroke,
};

/// Renders a positioned block into an SVG group.
pub fn block_group(block: &Block, stroke: &Stroke) -> svg_element::Group {
    let width = block.width();
    let position = block.position();

    let mut group = svg_element::Group::new().set(
        "transform",
        format!("translate({},{})", position.x(), position.y()),
    );

    group = group.add(title_text(block));

    match block.kind() {
        BlockKind::Start | BlockKind::End => {
            group = group.add(outline_rect(width, stroke).set("rx", 20));
        }
        BlockKind::Operation => {
            group = group.add(outline_rect(width, stroke));
        }
        BlockKind::Subroutine => {
            // Inset outline first so the outer border draws over it.
            group = group.add(outline_rect(width - 10.0, stroke).set("x", 5));
            group = group.add(outline_rect(width, stroke));
        }
        BlockKind::InputOutput => {
            let data = Data::new()
                .move_to((0, 0))
                .line_to((width - 10.0, 0.0))
                .line_to((width, 36.0))
                .line_to((10, 36))
                .close();
            group = group.add(outline_path(data, stroke));
        }
        BlockKind::Condition => {
            let data = Data::new()
                .move_to((0, 18))
                .line_to((width / 2.0, -14.0))
                .line_to((width, 18.0))
                .line_to((width / 2.0, 50.0))
                .close();
            group = group.add(outline_path(data, stroke));
        }
    }

    for (side, label) in block.kind().exit_labels() {
        group = group.add(exit_label(*side, label, width));
    }

    group
}

/// The block title, rendered in the fixed-pitch font the width formula
/// assumes (7 units per character at 14px monospace).
fn title_text(block: &Block) -> svg_element::Text {
    // The condition diamond needs a deeper inset to clear its left apex.
    let inset = match block.kind() {
        BlockKind::Condition => 20.0,
        _ => 10.0,
    };

    svg_element::Text::new("")
        .set("x", format!("{inset}px"))
        .set("y", "14px")
        .set("style", " font: 14px \"monospace\";")
        .set("font-size", "14px")
        .set("textLength", block.width() - inset * 2.0)
        .add(svg_element::TSpan::new(block.title()).set("dy", "8.5"))
}

/// A fixed exit label (`No` / `Yes`) anchored beside the named exit.
fn exit_label(side: Side, label: &str, width: f32) -> svg_element::Text {
    let (x, y) = match side {
        Side::Right => (width, 11.0),
        _ => (width / 2.0 + 4.0, 60.0),
    };

    svg_element::Text::new(label)
        .set("x", x)
        .set("y", y)
        .set("style", " font: 12px \"monospace\";")
        .set("font-size", "12px")
}

fn outline_rect(width: f32, stroke: &Stroke) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("width", width)
        .set("height", 36)
        .set("fill", "transparent")
        .set("stroke", stroke.color())
        .set("stroke-width", stroke.width())
}

fn outline_path(data: Data, stroke: &Stroke) -> svg_element::Path {
    svg_element::Path::new()
        .set("d", data)
        .set("fill", "transparent")
        .set("stroke", stroke.color())
        .set("stroke-width", stroke.width())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::Point, identifier::Id};

    fn positioned(kind: BlockKind, title: &str) -> Block {
        let mut block = Block::new(Id::new("b"), kind, title);
        block.set_position(Point::new(40.0, 60.0), block.width());
        block
    }

    #[test]
    fn test_group_is_translated_to_block_position() {
        let block = positioned(BlockKind::Operation, "X");
        let markup = block_group(&block, &Stroke::default()).to_string();

        assert!(markup.contains("translate(40,60)"));
        // Children are block-local: the outline starts at the origin.
        assert!(!markup.contains("x=\"40\""));
    }

    #[test]
    fn test_start_outline_is_rounded() {
        let block = positioned(BlockKind::Start, "Start");
        let markup = block_group(&block, &Stroke::default()).to_string();

        assert!(markup.contains("rx=\"20\""));
        assert!(markup.contains("height=\"36\""));
    }

    #[test]
    fn test_subroutine_has_double_border() {
        let block = positioned(BlockKind::Subroutine, "sub");
        let markup = block_group(&block, &Stroke::default()).to_string();

        assert_eq!(markup.matches("<rect").count(), 2);
        assert!(markup.contains("x=\"5\""));
    }

    #[test]
    fn test_condition_carries_exit_labels() {
        let block = positioned(BlockKind::Condition, "Yes or No?");
        let markup = block_group(&block, &Stroke::default()).to_string();

        assert!(markup.contains(">No</text>"));
        assert!(markup.contains(">Yes</text>"));
    }

    #[test]
    fn test_operation_has_no_labels() {
        let block = positioned(BlockKind::Operation, "X");
        let markup = block_group(&block, &Stroke::default()).to_string();

        assert!(!markup.contains(">No<"));
        assert!(!markup.contains(">Yes<"));
    }

    #[test]
    fn test_title_text_length_accounts_for_inset() {
        let block = positioned(BlockKind::Operation, "My Operation");
        let markup = block_group(&block, &Stroke::default()).to_string();

        // width 104, inset 10 on both sides
        assert!(markup.contains("textLength=\"84\""));
        assert!(markup.contains("My Operation"));
    }

    #[test]
    fn test_stroke_width_is_applied() {
        let block = positioned(BlockKind::End, "End");
        let markup = block_group(&block, &Stroke::new(3.0)).to_string();

        assert!(markup.contains("stroke-width=\"3\""));
    }
}
