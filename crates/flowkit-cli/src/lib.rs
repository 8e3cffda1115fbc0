//! CLI logic for the Flowkit flow-chart tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use flowkit::{DiagramBuilder, FlowkitError};

/// Run the Flowkit CLI application
///
/// This function processes the input file through the Flowkit pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FlowkitError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), FlowkitError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing flow chart"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process the program using the DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let program = builder.parse(&source)?;
    let diagram = builder.build(&program)?;
    let svg = builder.render_svg(&diagram);

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
