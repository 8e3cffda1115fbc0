//! Error codes for the Flowkit diagnostic system.
//!
//! Parse-phase codes use the `E1xx` range; structural build errors are typed
//! separately in the engine crate and carry no codes.

use std::fmt;

/// Error codes for categorizing parse diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unrecognized statement.
    ///
    /// A non-blank line matched neither a block declaration
    /// (`name=>kind:title`) nor a connection chain (`a->b(port)->c`).
    E100,

    /// Unknown block kind.
    ///
    /// A declaration named a kind outside the fixed set: `start`, `end`,
    /// `operation`, `subroutine`, `inputoutput`, `condition`.
    E101,

    /// Unknown port.
    ///
    /// A chain step named a port outside the recognized set: `left`,
    /// `right`, `top`, `bottom`, `yes`, `no`.
    E102,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unrecognized statement",
            ErrorCode::E101 => "unknown block kind",
            ErrorCode::E102 => "unknown port",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
