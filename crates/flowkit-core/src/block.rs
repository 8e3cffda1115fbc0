//! The block model: kinds, geometry, attachment points, and edge tables.
//!
//! A [`Block`] is a declared diagram node. Its [`BlockKind`] fixes the width
//! formula, the attachment-point adjustment, and any fixed exit labels; the
//! height is uniform for all kinds. The layout engine assigns each block a
//! `(row, column)` slot and a pixel position, after which the four attachment
//! points are recomputed and the router reads them as connector endpoints.

use std::fmt;

use crate::{
    geometry::{Point, Size},
    identifier::Id,
};

/// Uniform block height in diagram units.
pub const BLOCK_HEIGHT: f32 = 36.0;

/// One of the four attachment sides of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// All sides, in the order links are collected from a block's edge table.
    ///
    /// Routing mutates the diagram margins, so the visual stacking of detoured
    /// connectors depends on this order staying fixed.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];

    /// Returns the lowercase side name as used in the DSL.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Top => 2,
            Side::Bottom => 3,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of block kinds.
///
/// Each kind carries its own geometry as pure functions: a width formula, an
/// attachment-point adjustment, and a (possibly empty) set of fixed exit
/// labels. Keeping these per-kind keeps the match sites exhaustively
/// checkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Start,
    End,
    Operation,
    Subroutine,
    InputOutput,
    Condition,
}

impl BlockKind {
    /// Resolves a DSL kind keyword, or `None` for an unknown token.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "start" => Some(BlockKind::Start),
            "end" => Some(BlockKind::End),
            "operation" => Some(BlockKind::Operation),
            "subroutine" => Some(BlockKind::Subroutine),
            "inputoutput" => Some(BlockKind::InputOutput),
            "condition" => Some(BlockKind::Condition),
            _ => None,
        }
    }

    /// Returns the DSL keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::Start => "start",
            BlockKind::End => "end",
            BlockKind::Operation => "operation",
            BlockKind::Subroutine => "subroutine",
            BlockKind::InputOutput => "inputoutput",
            BlockKind::Condition => "condition",
        }
    }

    /// Computes the pixel width of a block with the given title.
    ///
    /// All kinds reserve 7 units per character; the padding differs so that
    /// slanted and diamond outlines keep clear of the text.
    pub fn width_for(self, title: &str) -> f32 {
        let text = title.chars().count() as f32 * 7.0;
        match self {
            BlockKind::Start | BlockKind::End | BlockKind::Operation => text + 20.0,
            BlockKind::Subroutine | BlockKind::InputOutput => text + 40.0,
            BlockKind::Condition => text + 60.0,
        }
    }

    /// Applies the kind-specific attachment adjustment in place.
    ///
    /// Input-output blocks slant their vertical edges (parallelogram), so the
    /// left and right attachments shift inward; condition blocks extend their
    /// apexes beyond the box outline, so top and bottom shift outward.
    pub fn adjust_attachments(self, attachments: &mut Attachments) {
        match self {
            BlockKind::InputOutput => {
                attachments.shift(Side::Left, 5.0, 0.0);
                attachments.shift(Side::Right, -5.0, 0.0);
            }
            BlockKind::Condition => {
                attachments.shift(Side::Top, 0.0, -14.0);
                attachments.shift(Side::Bottom, 0.0, 14.0);
            }
            _ => {}
        }
    }

    /// Fixed labels attached next to this kind's exits.
    pub fn exit_labels(self) -> &'static [(Side, &'static str)] {
        match self {
            BlockKind::Condition => &[(Side::Right, "No"), (Side::Bottom, "Yes")],
            _ => &[],
        }
    }

    /// Returns true for the unique entry-point kind.
    pub fn is_start(self) -> bool {
        matches!(self, BlockKind::Start)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The four side-specific connector endpoints of a positioned block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Attachments {
    left: Point,
    right: Point,
    top: Point,
    bottom: Point,
}

impl Attachments {
    /// Computes the default attachment points for an axis-aligned box.
    ///
    /// `left`/`right` sit at mid-height, `top`/`bottom` at mid-width.
    pub fn for_box(position: Point, size: Size) -> Self {
        Self {
            left: position.offset(0.0, size.height() / 2.0),
            right: position.offset(size.width(), size.height() / 2.0),
            top: position.offset(size.width() / 2.0, 0.0),
            bottom: position.offset(size.width() / 2.0, size.height()),
        }
    }

    /// Returns the attachment point on the given side.
    pub fn get(self, side: Side) -> Point {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    fn shift(&mut self, side: Side, dx: f32, dy: f32) {
        let point = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        };
        *point = point.offset(dx, dy);
    }
}

/// A declared diagram node.
///
/// Blocks are created by `Init` instructions, wired together by edge
/// installation, placed into a `(row, column)` grid slot, positioned in
/// pixels, and finally routed against. The struct carries the whole
/// lifecycle; the layout engine owns the only mutable reference.
#[derive(Debug, Clone)]
pub struct Block {
    name: Id,
    kind: BlockKind,
    title: String,
    width: f32,
    cell_width: f32,
    position: Point,
    attachments: Attachments,
    edges: [Option<Id>; 4],
    placed: bool,
    row: usize,
    column: usize,
    top_slot: u32,
    bottom_slot: u32,
}

impl Block {
    /// Creates an unplaced block; the width is fixed by kind and title.
    pub fn new(name: Id, kind: BlockKind, title: impl Into<String>) -> Self {
        let title = title.into();
        let width = kind.width_for(&title);
        Self {
            name,
            kind,
            title,
            width,
            cell_width: 0.0,
            position: Point::default(),
            attachments: Attachments::default(),
            edges: [None; 4],
            placed: false,
            row: 0,
            column: 0,
            top_slot: 1,
            bottom_slot: 1,
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the block's dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, BLOCK_HEIGHT)
    }

    /// Returns the top-left corner in diagram space.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the outgoing edge on the given side, if any.
    pub fn edge(&self, side: Side) -> Option<Id> {
        self.edges[side.index()]
    }

    /// Installs an outgoing edge; a repeated install on the same side
    /// replaces the previous target.
    pub fn set_edge(&mut self, side: Side, target: Id) {
        self.edges[side.index()] = Some(target);
    }

    pub fn placed(&self) -> bool {
        self.placed
    }

    /// Assigns the grid slot and marks the block placed.
    pub fn place(&mut self, row: usize, column: usize) {
        self.placed = true;
        self.row = row;
        self.column = column;
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Fixes the pixel position, centering the block within its column slot,
    /// and recomputes the attachment points.
    pub fn set_position(&mut self, origin: Point, cell_width: f32) {
        self.cell_width = cell_width;
        self.position = origin.offset((cell_width - self.width) / 2.0, 0.0);

        let mut attachments = Attachments::for_box(self.position, self.size());
        self.kind.adjust_attachments(&mut attachments);
        self.attachments = attachments;
    }

    /// Returns the connector endpoint on the given side.
    ///
    /// Only meaningful once [`set_position`](Self::set_position) has run.
    pub fn attachment(&self, side: Side) -> Point {
        self.attachments.get(side)
    }

    /// 1-based stacking slot for connectors entering through the top.
    pub fn top_slot(&self) -> u32 {
        self.top_slot
    }

    /// 1-based stacking slot for connectors leaving through the bottom.
    pub fn bottom_slot(&self) -> u32 {
        self.bottom_slot
    }

    pub fn set_top_slot(&mut self, slot: u32) {
        self.top_slot = slot;
    }

    pub fn set_bottom_slot(&mut self, slot: u32) {
        self.bottom_slot = slot;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_names() {
        assert_eq!(Side::Left.as_str(), "left");
        assert_eq!(Side::Bottom.to_string(), "bottom");
    }

    #[test]
    fn test_kind_keywords_roundtrip() {
        for kind in [
            BlockKind::Start,
            BlockKind::End,
            BlockKind::Operation,
            BlockKind::Subroutine,
            BlockKind::InputOutput,
            BlockKind::Condition,
        ] {
            assert_eq!(BlockKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(BlockKind::from_keyword("foo"), None);
        assert_eq!(BlockKind::from_keyword("Start"), None);
    }

    #[test]
    fn test_width_formulas() {
        assert_eq!(BlockKind::Start.width_for("Start"), 5.0 * 7.0 + 20.0);
        assert_eq!(BlockKind::End.width_for("End"), 3.0 * 7.0 + 20.0);
        assert_eq!(BlockKind::Operation.width_for("op"), 2.0 * 7.0 + 20.0);
        assert_eq!(BlockKind::Subroutine.width_for("sub"), 3.0 * 7.0 + 40.0);
        assert_eq!(BlockKind::InputOutput.width_for("io"), 2.0 * 7.0 + 40.0);
        // "Yes or No?" is 10 characters: 70 + 60 = 130
        assert_eq!(BlockKind::Condition.width_for("Yes or No?"), 130.0);
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        assert_eq!(BlockKind::Operation.width_for("déjà"), 4.0 * 7.0 + 20.0);
    }

    #[test]
    fn test_default_attachments() {
        let attachments =
            Attachments::for_box(Point::new(10.0, 20.0), Size::new(50.0, BLOCK_HEIGHT));

        assert_eq!(attachments.get(Side::Left), Point::new(10.0, 38.0));
        assert_eq!(attachments.get(Side::Right), Point::new(60.0, 38.0));
        assert_eq!(attachments.get(Side::Top), Point::new(35.0, 20.0));
        assert_eq!(attachments.get(Side::Bottom), Point::new(35.0, 56.0));
    }

    #[test]
    fn test_input_output_attachment_adjustment() {
        let mut block = Block::new(Id::new("io"), BlockKind::InputOutput, "catch");
        block.set_position(Point::new(0.0, 0.0), block.width());

        let plain = Attachments::for_box(block.position(), block.size());
        assert_eq!(
            block.attachment(Side::Left),
            plain.get(Side::Left).offset(5.0, 0.0)
        );
        assert_eq!(
            block.attachment(Side::Right),
            plain.get(Side::Right).offset(-5.0, 0.0)
        );
        // Top and bottom are untouched by the slant.
        assert_eq!(block.attachment(Side::Top), plain.get(Side::Top));
        assert_eq!(block.attachment(Side::Bottom), plain.get(Side::Bottom));
    }

    #[test]
    fn test_condition_attachment_adjustment() {
        let mut block = Block::new(Id::new("cond"), BlockKind::Condition, "Yes or No?");
        block.set_position(Point::new(0.0, 0.0), block.width());

        let plain = Attachments::for_box(block.position(), block.size());
        assert_eq!(
            block.attachment(Side::Top),
            plain.get(Side::Top).offset(0.0, -14.0)
        );
        assert_eq!(
            block.attachment(Side::Bottom),
            plain.get(Side::Bottom).offset(0.0, 14.0)
        );
    }

    #[test]
    fn test_condition_exit_labels() {
        let labels = BlockKind::Condition.exit_labels();
        assert_eq!(labels, &[(Side::Right, "No"), (Side::Bottom, "Yes")]);
        assert!(BlockKind::Operation.exit_labels().is_empty());
    }

    #[test]
    fn test_set_position_centers_in_cell() {
        let mut block = Block::new(Id::new("e"), BlockKind::End, "End");
        assert_eq!(block.width(), 41.0);

        block.set_position(Point::new(0.0, 100.0), 55.0);
        assert_eq!(block.position(), Point::new(7.0, 100.0));
    }

    #[test]
    fn test_edges_default_empty_and_replace() {
        let mut block = Block::new(Id::new("st"), BlockKind::Start, "Start");
        for side in Side::ALL {
            assert_eq!(block.edge(side), None);
        }

        block.set_edge(Side::Bottom, Id::new("a"));
        block.set_edge(Side::Bottom, Id::new("b"));
        assert_eq!(block.edge(Side::Bottom), Some(Id::new("b")));
        assert_eq!(block.edge(Side::Right), None);
    }

    #[test]
    fn test_place() {
        let mut block = Block::new(Id::new("op"), BlockKind::Operation, "X");
        assert!(!block.placed());

        block.place(2, 3);
        assert!(block.placed());
        assert_eq!(block.row(), 2);
        assert_eq!(block.column(), 3);
    }

    #[test]
    fn test_display() {
        let block = Block::new(Id::new("op1"), BlockKind::Operation, "My Operation");
        assert_eq!(block.to_string(), "op1 : My Operation");
    }
}
