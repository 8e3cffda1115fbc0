//! Line parsers for the Flowkit DSL.
//!
//! Each non-blank source line is parsed independently: first as a block
//! declaration, then as a connection chain. The winnow parsers here match
//! line *structure* only; token validation (kinds, ports) happens afterwards
//! so diagnostics can name the offending token instead of a grammar position.

use std::ops::Range;

use winnow::{
    ModalResult, Parser,
    combinator::{delimited, opt, preceded, repeat},
    stream::LocatingSlice,
    token::take_while,
};

use flowkit_core::{
    block::BlockKind,
    identifier::Id,
    semantic::{Instruction, Port},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

type Input<'src> = LocatingSlice<&'src str>;

/// A structurally matched declaration line; tokens not yet validated.
struct RawInit<'src> {
    name: &'src str,
    kind: &'src str,
    kind_span: Range<usize>,
    title: &'src str,
}

/// One step of a chain line: `name` or `name(port)`.
struct RawStep<'src> {
    name: &'src str,
    port: Option<(&'src str, Range<usize>)>,
}

/// Parse a name token: letters, digits, and underscores.
fn word<'src>(input: &mut Input<'src>) -> ModalResult<&'src str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// Parse a whole declaration line: `name=>kind:title`.
///
/// The title is the remainder of the line after the first `:`, taken
/// verbatim; an empty title fails the structural match.
fn init_line<'src>(input: &mut Input<'src>) -> ModalResult<RawInit<'src>> {
    let name = word.parse_next(input)?;
    let _ = "=>".parse_next(input)?;
    let (kind, kind_span) = word.with_span().parse_next(input)?;
    let _ = ':'.parse_next(input)?;
    // The title is whatever remains on the line; it must be non-empty.
    let title = take_while(1.., |_: char| true).parse_next(input)?;

    Ok(RawInit {
        name,
        kind,
        kind_span,
        title,
    })
}

/// Parse one chain step with its optional parenthesized port.
fn step<'src>(input: &mut Input<'src>) -> ModalResult<RawStep<'src>> {
    let name = word.parse_next(input)?;
    let port = opt(delimited('(', word.with_span(), ')')).parse_next(input)?;

    Ok(RawStep { name, port })
}

/// Parse a whole chain line: two or more steps separated by `->`.
fn chain_line<'src>(input: &mut Input<'src>) -> ModalResult<Vec<RawStep<'src>>> {
    let first = step.parse_next(input)?;
    let mut steps: Vec<RawStep<'src>> = repeat(1.., preceded("->", step)).parse_next(input)?;
    steps.insert(0, first);

    Ok(steps)
}

/// Parse one non-blank source line into instructions.
///
/// `index` is the 0-based line number and `offset` the byte offset of the
/// line within the whole source, used to lift token spans for diagnostics.
pub(crate) fn parse_line(
    line: &str,
    index: usize,
    offset: usize,
) -> Result<Vec<Instruction>, Diagnostic> {
    if let Ok(init) = init_line.parse(LocatingSlice::new(line)) {
        let Some(kind) = BlockKind::from_keyword(init.kind) else {
            return Err(Diagnostic::error(format!("unknown block kind `{}`", init.kind))
                .with_code(ErrorCode::E101)
                .with_label(
                    Span::from(init.kind_span).shifted(offset),
                    "not a recognized block kind",
                )
                .with_help(
                    "expected one of `start`, `end`, `operation`, `subroutine`, \
                     `inputoutput`, `condition`",
                ));
        };

        return Ok(vec![Instruction::Init {
            name: Id::new(init.name),
            kind,
            title: init.title.to_string(),
        }]);
    }

    if let Ok(steps) = chain_line.parse(LocatingSlice::new(line)) {
        return expand_chain(&steps, offset);
    }

    Err(Diagnostic::error(format!("unrecognized statement: {line}"))
        .with_code(ErrorCode::E100)
        .with_label(
            Span::new(0..line.len()).shifted(offset),
            format!("line {index} is neither a declaration nor a connection chain"),
        )
        .with_help("expected `name=>kind:title` or `a->b(port)->c`"))
}

/// Expand a chain into one `Link` per adjacent pair of steps.
///
/// Iterative by construction; long chains cost no stack. Every step's port
/// is validated, including the final step's, whose port is otherwise unused.
fn expand_chain(steps: &[RawStep<'_>], offset: usize) -> Result<Vec<Instruction>, Diagnostic> {
    let mut resolved = Vec::with_capacity(steps.len());
    for step in steps {
        let port = step
            .port
            .as_ref()
            .map(|(token, span)| {
                Port::from_keyword(token).ok_or_else(|| {
                    Diagnostic::error(format!("unknown port `{token}`"))
                        .with_code(ErrorCode::E102)
                        .with_label(
                            Span::from(span.clone()).shifted(offset),
                            "not a recognized port",
                        )
                        .with_help(
                            "expected one of `left`, `right`, `top`, `bottom`, `yes`, `no`",
                        )
                })
            })
            .transpose()?;

        resolved.push((Id::new(step.name), port));
    }

    let mut links = Vec::with_capacity(steps.len() - 1);
    for pair in resolved.windows(2) {
        links.push(Instruction::Link {
            source: pair[0].0,
            port: pair[0].1,
            target: pair[1].0,
        });
    }

    Ok(links)
}
