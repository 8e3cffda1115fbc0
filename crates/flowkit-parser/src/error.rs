//! Error types and diagnostics for the parsing phase.
//!
//! Parsing produces [`Diagnostic`]s (structured errors with an
//! [`ErrorCode`], a message, and labeled source [`Span`](crate::Span)s)
//! collected into a [`ParseError`]. The CLI adapts these to rich terminal
//! reports; library users can inspect codes and spans directly.

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
