//! Configuration types for Flowkit diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Grid spacing used by the layout engine.
//! - [`StyleConfig`] - Visual styling options such as stroke width.
//!
//! The defaults reproduce the classic geometry exactly; an absent or empty
//! configuration file changes nothing.

use serde::Deserialize;

use flowkit_core::draw::Stroke;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Grid spacing used by the layout engine.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal gap between grid columns.
    #[serde(default = "default_column_gap")]
    column_gap: f32,

    /// Base vertical gap between grid rows, before connector traffic is
    /// added on top.
    #[serde(default = "default_row_gap")]
    row_gap: f32,

    /// Extra vertical space reserved per connector crossing a row boundary.
    #[serde(default = "default_link_spacing")]
    link_spacing: f32,
}

impl LayoutConfig {
    /// Returns the horizontal gap between grid columns.
    pub fn column_gap(&self) -> f32 {
        self.column_gap
    }

    /// Returns the base vertical gap between grid rows.
    pub fn row_gap(&self) -> f32 {
        self.row_gap
    }

    /// Returns the per-connector vertical spacing.
    pub fn link_spacing(&self) -> f32 {
        self.link_spacing
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_gap: default_column_gap(),
            row_gap: default_row_gap(),
            link_spacing: default_link_spacing(),
        }
    }
}

fn default_column_gap() -> f32 {
    20.0
}

fn default_row_gap() -> f32 {
    80.0
}

fn default_link_spacing() -> f32 {
    10.0
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Stroke width for block outlines and connector paths.
    #[serde(default = "default_stroke_width")]
    stroke_width: f32,
}

impl StyleConfig {
    /// Returns the configured stroke width.
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Builds the [`Stroke`] applied to shapes and connectors.
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_width: default_stroke_width(),
        }
    }
}

fn default_stroke_width() -> f32 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults_match_classic_geometry() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.column_gap(), 20.0);
        assert_eq!(layout.row_gap(), 80.0);
        assert_eq!(layout.link_spacing(), 10.0);
    }

    #[test]
    fn test_style_default_stroke() {
        let style = StyleConfig::default();
        assert_eq!(style.stroke_width(), 2.0);
        assert_eq!(style.stroke().width(), 2.0);
    }

    #[test]
    fn test_app_config_accessors() {
        let config = AppConfig::new(LayoutConfig::default(), StyleConfig::default());
        assert_eq!(config.layout().column_gap(), 20.0);
        assert_eq!(config.style().stroke_width(), 2.0);
    }
}
