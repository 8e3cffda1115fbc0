//! Flowkit Core Types and Definitions
//!
//! This crate provides the foundational types and definitions for the Flowkit
//! flow-chart language. It includes:
//!
//! - **Identifiers**: Efficient string-interned block names ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Blocks**: The block model with kinds, widths, and attachment points
//!   ([`block`] module)
//! - **Semantic**: The parsed instruction model ([`semantic`] module)
//! - **Draw**: SVG building blocks for shapes and connectors ([`draw`] module)

pub mod block;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
