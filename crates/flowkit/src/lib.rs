//! Flowkit - A flow-chart language compiling to laid-out SVG diagrams.
//!
//! Parsing, layout, routing, and rendering for the Flowkit flow-chart
//! language. Programs declare named blocks (`name=>kind:title`) and connect
//! them with chains (`a->b(port)->c`); the engine assigns every block a grid
//! slot, computes pixel geometry, routes the connectors, and renders SVG.

pub mod config;

mod diagram;
mod error;
mod export;
mod route;

pub use flowkit_core::{block, draw, geometry, identifier, semantic};

pub use diagram::Diagram;
pub use error::{BuildError, FlowkitError};
pub use route::Link;

use log::{debug, info};

use flowkit_core::semantic::Instruction;

use config::AppConfig;
use export::svg::SvgRenderer;

/// Builder for parsing, laying out, and rendering Flowkit programs.
///
/// # Examples
///
/// ```
/// use flowkit::{DiagramBuilder, config::AppConfig};
///
/// let source = "st=>start:Start\ne=>end:End\n\nst->e";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let program = builder.parse(source).expect("Failed to parse");
/// let diagram = builder.build(&program).expect("Failed to lay out");
/// let svg = builder.render_svg(&diagram);
///
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse source code into an instruction list.
    ///
    /// # Errors
    ///
    /// Returns [`FlowkitError::Parse`] carrying one diagnostic per
    /// offending line, together with the source text for reporting.
    pub fn parse(&self, source: &str) -> Result<Vec<Instruction>, FlowkitError> {
        info!("Parsing program");

        let program = flowkit_parser::parse(source)
            .map_err(|err| FlowkitError::new_parse_error(err, source))?;

        debug!(instructions = program.len(); "Program parsed");
        Ok(program)
    }

    /// Lay out a parsed program into a routed [`Diagram`].
    ///
    /// # Errors
    ///
    /// Returns [`FlowkitError::Build`] when the program declares no `start`
    /// block or a chain references an undeclared name.
    pub fn build(&self, program: &[Instruction]) -> Result<Diagram, FlowkitError> {
        info!("Laying out diagram");

        let diagram = Diagram::build(program, self.config.layout())?;

        debug!("Diagram laid out");
        Ok(diagram)
    }

    /// Render a built diagram to an SVG string.
    ///
    /// Rendering is pure assembly of precomputed geometry and cannot fail.
    pub fn render_svg(&self, diagram: &Diagram) -> String {
        info!("Rendering SVG");
        SvgRenderer::new(self.config.style()).render(diagram)
    }

    /// Compile a program straight to SVG: parse, build, render.
    ///
    /// # Errors
    ///
    /// Returns the first error of the underlying stages.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowkit::DiagramBuilder;
    ///
    /// let svg = DiagramBuilder::default()
    ///     .compile("st=>start:Start\ne=>end:End\n\nst->e")
    ///     .expect("Failed to compile");
    ///
    /// assert!(svg.contains("markerArrow"));
    /// ```
    pub fn compile(&self, source: &str) -> Result<String, FlowkitError> {
        let program = self.parse(source)?;
        let diagram = self.build(&program)?;
        Ok(self.render_svg(&diagram))
    }
}
