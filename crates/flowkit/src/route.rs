//! Connector routing: waypoint polylines between attachment points.
//!
//! Every installed edge becomes one [`Link`]. Routing runs after all block
//! positions are final and produces an axis-aligned polyline from the
//! source's exit attachment to the target's entry attachment:
//!
//! - a **bottom exit** flows straight down when the target lies below,
//!   and detours through the left margin when it does not (a backward
//!   edge);
//! - every **other exit** leaves through the right attachment: directly
//!   to the target's left attachment on the same row, or through the
//!   right margin across rows.
//!
//! Margin detours consume the margin counters, so concurrently routed
//! links stack outward instead of overlapping. Routing order is the link
//! creation order and must stay deterministic.

use indexmap::IndexMap;

use flowkit_core::{
    block::{Block, Side},
    geometry::Point,
    identifier::Id,
};

/// Vertical clearance per stacking slot before a connector turns.
const STACK_STEP: f32 = 13.0;

/// The left/right detour corridors of the diagram.
///
/// Each use moves the corridor outward by a fixed step; the router is the
/// only mutator, in link-creation order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Margins {
    left: f32,
    right: f32,
}

impl Margins {
    const STEP: f32 = 10.0;

    /// Seeds the right corridor just past the laid-out grid.
    pub(crate) fn seed_right(&mut self, right: f32) {
        self.right = right;
    }

    /// Claims the next left corridor position.
    pub(crate) fn next_left(&mut self) -> f32 {
        self.left -= Self::STEP;
        self.left
    }

    /// Claims the next right corridor position.
    pub(crate) fn next_right(&mut self) -> f32 {
        self.right += Self::STEP;
        self.right
    }
}

/// A routed connection between two blocks.
///
/// Created once per installed edge after layout; the waypoints are computed
/// in the routing pass and never mutated afterward.
#[derive(Debug, Clone)]
pub struct Link {
    source: Id,
    target: Id,
    exit: Side,
    points: Vec<Point>,
}

impl Link {
    pub(crate) fn new(source: Id, target: Id, exit: Side) -> Self {
        Self {
            source,
            target,
            exit,
            points: Vec::new(),
        }
    }

    /// The block this link leaves from.
    pub fn source(&self) -> Id {
        self.source
    }

    /// The block this link arrives at.
    pub fn target(&self) -> Id {
        self.target
    }

    /// The side of the source the edge was installed on.
    pub fn exit(&self) -> Side {
        self.exit
    }

    /// The routed waypoints, at least two once routing has run.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Computes the waypoint polyline for this link.
    pub(crate) fn route(&mut self, blocks: &IndexMap<Id, Block>, margins: &mut Margins) {
        let source = &blocks[&self.source];
        let target = &blocks[&self.target];

        self.points = match self.exit {
            Side::Bottom => Self::route_downward(source, target, margins),
            _ => Self::route_sideways(source, target, margins),
        };
    }

    /// Bottom-exit rule: straight down, or around the left margin for a
    /// backward edge.
    fn route_downward(source: &Block, target: &Block, margins: &mut Margins) -> Vec<Point> {
        let exit = source.attachment(Side::Bottom);
        let entry = target.attachment(Side::Top);
        let exit_turn = exit.y() + source.bottom_slot() as f32 * STACK_STEP;
        let entry_turn = entry.y() - target.top_slot() as f32 * STACK_STEP;

        if exit.y() < entry.y() {
            vec![
                exit,
                exit.with_y(exit_turn),
                entry.with_y(exit_turn),
                entry,
            ]
        } else {
            let left = margins.next_left();
            vec![
                exit,
                exit.with_y(exit_turn),
                Point::new(left, exit_turn),
                Point::new(left, entry_turn),
                entry.with_y(entry_turn),
                entry,
            ]
        }
    }

    /// Right-exit rule, also used for left and top exits: the path always
    /// leaves through the right attachment.
    fn route_sideways(source: &Block, target: &Block, margins: &mut Margins) -> Vec<Point> {
        let exit = source.attachment(Side::Right);

        if source.row() == target.row() {
            return vec![exit, target.attachment(Side::Left)];
        }

        let right = margins.next_right();
        let entry = target.attachment(Side::Top);
        let entry_turn = entry.y() - target.top_slot() as f32 * STACK_STEP;

        vec![
            exit,
            exit.with_x(right),
            Point::new(right, entry_turn),
            entry.with_y(entry_turn),
            entry,
        ]
    }
}

#[cfg(test)]
mod tests {
    use flowkit_core::block::BlockKind;

    use super::*;

    fn placed_block(name: &str, row: usize, column: usize, origin: Point) -> Block {
        let mut block = Block::new(Id::new(name), BlockKind::Operation, "op");
        block.place(row, column);
        block.set_position(origin, block.width());
        block
    }

    fn block_map(blocks: Vec<Block>) -> IndexMap<Id, Block> {
        blocks.into_iter().map(|b| (b.name(), b)).collect()
    }

    #[test]
    fn test_margins_stack_outward() {
        let mut margins = Margins::default();
        margins.seed_right(400.0);

        assert_eq!(margins.next_left(), -10.0);
        assert_eq!(margins.next_left(), -20.0);
        assert_eq!(margins.next_right(), 410.0);
        assert_eq!(margins.next_right(), 420.0);
    }

    #[test]
    fn test_downward_link_is_four_points() {
        let blocks = block_map(vec![
            placed_block("a", 0, 0, Point::new(0.0, 0.0)),
            placed_block("b", 1, 0, Point::new(0.0, 100.0)),
        ]);
        let mut margins = Margins::default();

        let mut link = Link::new(Id::new("a"), Id::new("b"), Side::Bottom);
        link.route(&blocks, &mut margins);

        let points = link.points();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], blocks[&Id::new("a")].attachment(Side::Bottom));
        assert_eq!(points[3], blocks[&Id::new("b")].attachment(Side::Top));
        // Untouched margins: the direct path claimed no corridor.
        assert_eq!(margins, Margins::default());
    }

    #[test]
    fn test_backward_link_detours_left() {
        let blocks = block_map(vec![
            placed_block("a", 1, 0, Point::new(0.0, 100.0)),
            placed_block("b", 0, 0, Point::new(0.0, 0.0)),
        ]);
        let mut margins = Margins::default();

        let mut link = Link::new(Id::new("a"), Id::new("b"), Side::Bottom);
        link.route(&blocks, &mut margins);

        let points = link.points();
        assert_eq!(points.len(), 6);
        assert_eq!(points[2].x(), -10.0);
        assert_eq!(points[3].x(), -10.0);
        assert_eq!(points[0], blocks[&Id::new("a")].attachment(Side::Bottom));
        assert_eq!(points[5], blocks[&Id::new("b")].attachment(Side::Top));
    }

    #[test]
    fn test_same_row_right_link_is_direct() {
        let blocks = block_map(vec![
            placed_block("a", 0, 0, Point::new(0.0, 0.0)),
            placed_block("b", 0, 1, Point::new(60.0, 0.0)),
        ]);
        let mut margins = Margins::default();

        let mut link = Link::new(Id::new("a"), Id::new("b"), Side::Right);
        link.route(&blocks, &mut margins);

        let points = link.points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], blocks[&Id::new("a")].attachment(Side::Right));
        assert_eq!(points[1], blocks[&Id::new("b")].attachment(Side::Left));
    }

    #[test]
    fn test_cross_row_right_link_uses_right_margin() {
        let blocks = block_map(vec![
            placed_block("a", 1, 0, Point::new(0.0, 100.0)),
            placed_block("b", 0, 1, Point::new(60.0, 0.0)),
        ]);
        let mut margins = Margins::default();
        margins.seed_right(200.0);

        let mut link = Link::new(Id::new("a"), Id::new("b"), Side::Right);
        link.route(&blocks, &mut margins);

        let points = link.points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[1].x(), 210.0);
        assert_eq!(points[2].x(), 210.0);
        assert_eq!(points[4], blocks[&Id::new("b")].attachment(Side::Top));
    }

    #[test]
    fn test_left_exit_routes_like_right_exit() {
        let blocks = block_map(vec![
            placed_block("a", 0, 0, Point::new(0.0, 0.0)),
            placed_block("b", 0, 1, Point::new(60.0, 0.0)),
        ]);
        let mut margins = Margins::default();

        let mut link = Link::new(Id::new("a"), Id::new("b"), Side::Left);
        link.route(&blocks, &mut margins);

        // The path still leaves through the right attachment.
        assert_eq!(link.points()[0], blocks[&Id::new("a")].attachment(Side::Right));
    }
}
