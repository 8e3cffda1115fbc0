//! # Flowkit Parser
//!
//! Parser for the Flowkit flow-chart language. The language is line
//! oriented: every non-blank line is either a block declaration or a
//! connection chain, and chains expand into one link instruction per
//! adjacent pair of steps.
//!
//! ## Usage
//!
//! ```
//! # use flowkit_parser::error::ParseError;
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! st=>start:Start
//! e=>end:End
//!
//! st->e";
//!
//!     let program = flowkit_parser::parse(source)?;
//!     assert_eq!(program.len(), 3);
//!     Ok(())
//! }
//! ```

pub mod error;

mod parser;
mod span;

pub use span::Span;

use log::debug;

use flowkit_core::semantic::Instruction;

use error::ParseError;

/// Parse source text into an ordered instruction list.
///
/// Blank lines are skipped (a trailing carriage return does not count as
/// content). Every other line must fully match one statement form. Errors
/// are collected per line and returned together; any diagnostic aborts the
/// build.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying one [`error::Diagnostic`] per
/// offending line: `E100` for an unrecognized statement, `E101` for an
/// unknown block kind, `E102` for an unknown port.
pub fn parse(source: &str) -> Result<Vec<Instruction>, ParseError> {
    let mut instructions = Vec::new();
    let mut diagnostics = Vec::new();

    let mut offset = 0;
    for (index, raw_line) in source.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if !line.is_empty() {
            match parser::parse_line(line, index, offset) {
                Ok(parsed) => instructions.extend(parsed),
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }
        offset += raw_line.len() + 1;
    }

    if !diagnostics.is_empty() {
        debug!(errors = diagnostics.len(); "Program rejected");
        return Err(ParseError::new(diagnostics));
    }

    debug!(instructions = instructions.len(); "Program parsed");
    Ok(instructions)
}
