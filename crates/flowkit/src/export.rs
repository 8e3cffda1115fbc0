//! Export backends for built diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Instruction List
//!     ↓ build (layout + routing)
//! Diagram
//!     ↓ export (this module)
//! Output Markup
//! ```
//!
//! Export is pure: a built [`Diagram`](crate::Diagram) already carries every
//! position and waypoint, so rendering only assembles markup in memory.
//! Writing the result anywhere is the caller's concern.

pub mod svg;
