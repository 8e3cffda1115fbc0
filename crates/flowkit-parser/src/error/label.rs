//! Labeled source spans for diagnostic messages.
//!
//! A label associates a message with a span in the source code, providing
//! context for where an error occurred.

use crate::span::Span;

/// A message anchored to a source span.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    /// Create a primary label, the main location of the problem.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    /// Create a secondary label, supporting context for the problem.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: false,
        }
    }

    /// Get the source span this label points at.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Returns true if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(3..8), "not a recognized port");
        assert_eq!(label.span(), Span::new(3..8));
        assert_eq!(label.message(), "not a recognized port");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(0..2), "declared here");
        assert!(label.is_secondary());
        assert!(!label.is_primary());
    }
}
