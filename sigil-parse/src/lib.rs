#![forbid(unsafe_code)]

//! Parser for the contract language's canonical type notation.
//!
//! Two entry points mirror the two ways callers hold type text:
//! [`parse_type_tag`] when the whole string must denote exactly one type
//! (e.g. one generic-argument string out of an RPC response), and
//! [`parse_type_tag_prefix`] when composing within a larger grammar and the
//! unconsumed remainder belongs to the caller.

mod error;
mod parser;

pub use error::{span, span_between, ParseError, Span};
pub use parser::Parser;

use sigil_tag::{Address, StructTag, TypeTag};

/// Parse a string that must contain exactly one canonical type, nothing
/// more.
pub fn parse_type_tag(src: &str) -> Result<TypeTag, ParseError> {
    let (tag, rest) = parse_type_tag_prefix(src)?;
    if !rest.is_empty() {
        return Err(ParseError::TrailingInput {
            trailing: rest.to_string(),
            span: span_between(src.len() - rest.len(), src.len()),
        });
    }
    Ok(tag)
}

/// Parse the leading canonical type and hand back the unconsumed remainder,
/// for callers composing nested or comma-separated contexts.
pub fn parse_type_tag_prefix(src: &str) -> Result<(TypeTag, &str), ParseError> {
    let mut parser = Parser::new(src);
    let tag = parser.parse_tag()?;
    Ok((tag, parser.rest()))
}

/// Build a concrete [`StructTag`] from the structured shape chain state
/// reports resource types in: address, module, and name as separate fields,
/// and each generic argument as its own canonical string.
pub fn struct_tag_from_parts<S: AsRef<str>>(
    address: &str,
    module: &str,
    name: &str,
    type_args: &[S],
) -> Result<StructTag, ParseError> {
    let address = Address::parse(address).map_err(|e| ParseError::MalformedStructRef {
        message: e.to_string(),
        span: span(0, address.len()),
    })?;
    if module.is_empty() || name.is_empty() {
        return Err(ParseError::MalformedStructRef {
            message: "module and struct name must be non-empty".to_string(),
            span: span(0, 0),
        });
    }
    let type_params = type_args
        .iter()
        .map(|s| parse_type_tag(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StructTag::new(address, module, name, type_params))
}

/// `#[serde(deserialize_with = …)]` helpers for fields holding canonical
/// type strings.
#[cfg(feature = "serde")]
pub mod de {
    use serde::Deserialize;
    use sigil_tag::TypeTag;

    pub fn type_tag<'de, D>(deserializer: D) -> Result<TypeTag, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        crate::parse_type_tag(&text).map_err(serde::de::Error::custom)
    }
}
