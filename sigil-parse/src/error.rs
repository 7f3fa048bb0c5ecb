#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;

pub type Span = miette::SourceSpan;

pub fn span(start: usize, len: usize) -> Span {
    Span::new(start.into(), len)
}

pub fn span_between(start: usize, end: usize) -> Span {
    debug_assert!(end >= start);
    span(start, end - start)
}

/// A canonical type string failed to parse.
///
/// Each variant carries the offending substring and a span into the input.
/// Never recovered locally; callers abort the enclosing unit.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("malformed struct reference: {message}")]
    #[diagnostic(code(sigil::parse::struct_ref))]
    MalformedStructRef {
        message: String,
        #[label]
        span: Span,
    },

    #[error("malformed vector type: {message}")]
    #[diagnostic(code(sigil::parse::vector))]
    MalformedVector {
        message: String,
        #[label]
        span: Span,
    },

    #[error("malformed type parameter placeholder: {message}")]
    #[diagnostic(code(sigil::parse::type_param))]
    MalformedTypeParam {
        message: String,
        #[label]
        span: Span,
    },

    #[error("unrecognized type tag: {message}")]
    #[diagnostic(code(sigil::parse::unrecognized))]
    UnrecognizedTag {
        message: String,
        #[label]
        span: Span,
    },

    #[error("trailing input after type tag: `{trailing}`")]
    #[diagnostic(code(sigil::parse::trailing))]
    TrailingInput {
        trailing: String,
        #[label("unconsumed")]
        span: Span,
    },
}
