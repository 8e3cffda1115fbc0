//! Error types for Flowkit operations.
//!
//! This module provides the main error type [`FlowkitError`] which wraps
//! the error conditions that can occur while compiling a program, and the
//! structural [`BuildError`] raised by the layout engine.

use std::io;

use thiserror::Error;

use flowkit_core::identifier::Id;
use flowkit_parser::error::ParseError;

/// The main error type for Flowkit operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the structured diagnostics together with the
/// source text, so callers can render rich reports with code snippets.
#[derive(Debug, Error)]
pub enum FlowkitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl FlowkitError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Structural errors raised while building the diagram.
///
/// Both variants abort the build; no partial diagram is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The program declares no block of kind `start`.
    #[error("no entry point: the program declares no `start` block")]
    MissingEntryPoint,

    /// A chain references a block name that no declaration introduced.
    #[error("reference to undeclared block `{0}`")]
    DanglingReference(Id),
}
