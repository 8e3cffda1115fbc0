//! The layout engine: grid assignment, pixel geometry, and link collection.
//!
//! [`Diagram::build`] consumes a parsed instruction list and runs the whole
//! pipeline in a fixed order:
//!
//! 1. **Install**: create blocks, resolve the entry point, and record each
//!    link instruction as an outgoing edge on its source block.
//! 2. **Place**: walk edges into a row/column grid: row 0 follows the
//!    `right` chain from the start block, each further row is seeded by the
//!    `bottom` edges of the row above. Column widths take the maximum block
//!    width seen at each index.
//! 3. **Collect**: count connector traffic per row, assign stacking slots,
//!    and create one [`Link`] per installed edge.
//! 4. **Position**: assign pixel coordinates; the gap below a row grows
//!    with the connectors crossing it. Seed the right detour corridor just
//!    past the grid.
//! 5. **Route**: compute every link's waypoints (see [`crate::route`]).
//!
//! The order is load-bearing: routing requires final positions, which in
//! turn require the traffic counts of the completed grid. Each build owns
//! its whole state; nothing is shared across diagrams.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};

use flowkit_core::{
    block::{Block, Side},
    geometry::Point,
    identifier::Id,
    semantic::Instruction,
};

use crate::{
    config::LayoutConfig,
    error::BuildError,
    route::{Link, Margins},
};

/// Connector traffic across one row boundary: links entering blocks of the
/// row through their tops, and links leaving through their bottoms.
#[derive(Debug, Clone, Copy, Default)]
struct RowTraffic {
    incoming: u32,
    outgoing: u32,
}

/// A fully built diagram: placed blocks and routed links.
#[derive(Debug)]
pub struct Diagram {
    blocks: IndexMap<Id, Block>,
    links: Vec<Link>,
    start: Id,
    rows: Vec<Vec<Option<Id>>>,
    column_widths: Vec<f32>,
    traffic: Vec<RowTraffic>,
    margins: Margins,
}

impl Diagram {
    /// Builds a diagram from a parsed program.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingEntryPoint`] when no `start` block was
    /// declared, and [`BuildError::DanglingReference`] when a chain names a
    /// block no declaration introduced.
    pub fn build(program: &[Instruction], layout: &LayoutConfig) -> Result<Self, BuildError> {
        let (blocks, start) = Self::install(program)?;
        let start = start.ok_or(BuildError::MissingEntryPoint)?;

        let mut diagram = Self {
            blocks,
            links: Vec::new(),
            start,
            rows: Vec::new(),
            column_widths: Vec::new(),
            traffic: Vec::new(),
            margins: Margins::default(),
        };

        diagram.place_rows()?;
        debug!(rows = diagram.rows.len(), columns = diagram.column_widths.len(); "Grid assigned");
        trace!(grid = diagram.to_string(); "Grid occupancy");

        diagram.collect_links()?;
        diagram.assign_positions(layout);
        diagram.route_links();
        debug!(blocks = diagram.blocks.len(), links = diagram.links.len(); "Diagram built");

        Ok(diagram)
    }

    /// The resolved entry-point block name.
    pub fn start(&self) -> Id {
        self.start
    }

    /// All blocks in declaration order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Looks up a block by name.
    pub fn block(&self, name: Id) -> Option<&Block> {
        self.blocks.get(&name)
    }

    /// All links in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Creates the block table and installs every edge.
    ///
    /// A redeclared name replaces the earlier block in place; a later
    /// `start` declaration replaces the resolved entry name. Installing an
    /// edge on one side twice keeps the last target.
    fn install(program: &[Instruction]) -> Result<(IndexMap<Id, Block>, Option<Id>), BuildError> {
        let mut blocks: IndexMap<Id, Block> = IndexMap::new();
        let mut start = None;

        for instruction in program {
            match instruction {
                Instruction::Init { name, kind, title } => {
                    if kind.is_start() {
                        start = Some(*name);
                    }
                    blocks.insert(*name, Block::new(*name, *kind, title.clone()));
                }
                Instruction::Link {
                    source,
                    port,
                    target,
                } => {
                    let side = port.map_or(Side::Bottom, |port| port.side());
                    let block = blocks
                        .get_mut(source)
                        .ok_or(BuildError::DanglingReference(*source))?;
                    block.set_edge(side, *target);
                    trace!(source = source.to_string(), side = side.as_str(), target = target.to_string(); "Edge installed");
                }
            }
        }

        Ok((blocks, start))
    }

    /// Assigns every reachable block a `(row, column)` slot.
    fn place_rows(&mut self) -> Result<(), BuildError> {
        // Row 0: the right-chain from the start block.
        let mut row: Vec<Option<Id>> = Vec::new();
        let mut current = self.start;
        loop {
            let column = row.len();
            row.push(Some(current));
            let width = {
                let block = self
                    .blocks
                    .get_mut(&current)
                    .ok_or(BuildError::DanglingReference(current))?;
                block.place(0, column);
                block.width()
            };
            self.note_column_width(column, width);

            let Some(next) = self.blocks[&current].edge(Side::Right) else {
                break;
            };
            let next_block = self
                .blocks
                .get(&next)
                .ok_or(BuildError::DanglingReference(next))?;
            if next_block.placed() {
                // Cycle through `right`: the chain stops at the first block
                // already in the grid.
                break;
            }
            current = next;
        }
        self.rows.push(row);

        // Each further row is seeded by the bottom edges of the row above.
        let mut level = 1;
        loop {
            let previous = self.rows[level - 1].clone();
            let mut row: Vec<Option<Id>> = vec![None; previous.len()];

            for (column, slot) in previous.iter().enumerate() {
                let Some(parent) = slot else { continue };
                let Some(seed) = self.blocks[parent].edge(Side::Bottom) else {
                    continue;
                };
                if self
                    .blocks
                    .get(&seed)
                    .ok_or(BuildError::DanglingReference(seed))?
                    .placed()
                {
                    continue;
                }

                // The seed lands in its parent's column, then its own
                // right-chain fills the columns after it.
                let mut column = place_slot(&mut row, column, seed);
                self.place_block(seed, level, column);

                let mut current = seed;
                loop {
                    let Some(next) = self.blocks[&current].edge(Side::Right) else {
                        break;
                    };
                    let next_block = self
                        .blocks
                        .get(&next)
                        .ok_or(BuildError::DanglingReference(next))?;
                    if next_block.placed() {
                        break;
                    }
                    column = place_slot(&mut row, column + 1, next);
                    self.place_block(next, level, column);
                    current = next;
                }
            }

            if row.iter().all(Option::is_none) {
                break;
            }
            self.rows.push(row);
            level += 1;
        }

        Ok(())
    }

    fn place_block(&mut self, name: Id, row: usize, column: usize) {
        let block = &mut self.blocks[&name];
        block.place(row, column);
        let width = block.width();
        self.note_column_width(column, width);
    }

    /// Widens the column to the largest block seen at that index.
    fn note_column_width(&mut self, column: usize, width: f32) {
        if self.column_widths.len() <= column {
            self.column_widths.resize(column + 1, 0.0);
        }
        if self.column_widths[column] < width {
            self.column_widths[column] = width;
        }
    }

    /// Counts connector traffic, assigns stacking slots, and creates links.
    ///
    /// Blocks are visited in declaration order and sides in the fixed
    /// [`Side::ALL`] order so that slot assignment and margin consumption
    /// stay deterministic.
    fn collect_links(&mut self) -> Result<(), BuildError> {
        self.traffic = vec![RowTraffic::default(); self.rows.len()];

        for index in 0..self.blocks.len() {
            let (source, source_row, bottom, right) = {
                let (name, block) = self
                    .blocks
                    .get_index(index)
                    .expect("block index is in range");
                (
                    *name,
                    block.row(),
                    block.edge(Side::Bottom),
                    block.edge(Side::Right),
                )
            };

            if let Some(target) = bottom {
                let target_row = self.resolve(target)?.row();
                self.traffic[source_row].outgoing += 1;
                self.traffic[target_row].incoming += 1;

                let bottom_slot = self.traffic[source_row].outgoing + 1;
                self.blocks[&source].set_bottom_slot(bottom_slot);
                let top_slot = self.traffic[target_row].incoming + 1;
                self.blocks[&target].set_top_slot(top_slot);
            }

            // A right edge crossing row boundaries enters its target from
            // the top, so it contributes to the target row like a bottom
            // edge does.
            if let Some(target) = right {
                let target_row = self.resolve(target)?.row();
                if target_row != source_row {
                    self.traffic[target_row].incoming += 1;
                    let top_slot = self.traffic[target_row].incoming + 1;
                    self.blocks[&target].set_top_slot(top_slot);
                }
            }

            for side in Side::ALL {
                if let Some(target) = self.blocks[&source].edge(side) {
                    self.resolve(target)?;
                    self.links.push(Link::new(source, target, side));
                }
            }
        }

        Ok(())
    }

    /// Assigns pixel positions row by row and seeds the right corridor.
    fn assign_positions(&mut self, layout: &LayoutConfig) {
        let Self {
            blocks,
            rows,
            column_widths,
            traffic,
            margins,
            ..
        } = self;

        let mut y = 0.0;
        for (level, row) in rows.iter().enumerate() {
            let mut x = 0.0;
            for (column, slot) in row.iter().enumerate() {
                if let Some(name) = slot {
                    blocks[name].set_position(Point::new(x, y), column_widths[column]);
                }
                x += column_widths[column] + layout.column_gap();
            }

            if level + 1 < rows.len() {
                let crossing = traffic[level].outgoing + traffic[level + 1].incoming;
                y += crossing as f32 * layout.link_spacing() + layout.row_gap();
            }
        }

        let grid_width: f32 = column_widths.iter().sum();
        margins.seed_right(grid_width + layout.column_gap() * column_widths.len() as f32);
    }

    /// Routes every link, in creation order.
    fn route_links(&mut self) {
        let Self {
            blocks,
            links,
            margins,
            ..
        } = self;

        for link in links.iter_mut() {
            link.route(blocks, margins);
        }
    }

    fn resolve(&self, name: Id) -> Result<&Block, BuildError> {
        self.blocks
            .get(&name)
            .ok_or(BuildError::DanglingReference(name))
    }
}

impl fmt::Display for Diagram {
    /// Renders the occupancy grid of block names, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for slot in row {
                match slot {
                    Some(name) => write!(f, "{}  ", name)?,
                    None => write!(f, "    ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Writes `name` into the first free column at or after `wanted`, growing
/// the row as needed, and returns the column used.
fn place_slot(row: &mut Vec<Option<Id>>, wanted: usize, name: Id) -> usize {
    let mut column = wanted;
    while column < row.len() && row[column].is_some() {
        column += 1;
    }
    if column >= row.len() {
        row.resize(column + 1, None);
    }
    row[column] = Some(name);
    column
}
