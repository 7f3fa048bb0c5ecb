#![forbid(unsafe_code)]

use sigil_tag::{Address, AtomicTag, StructTag, TypeTag};

use crate::error::{span, span_between, ParseError};

/// Position-based scanner over a canonical type string.
///
/// There is no tokenizer: the grammar is bounded enough that each variant is
/// recognized by direct prefix/substring inspection at the current position.
/// Sub-parses never backtrack; each either produces a node and advances the
/// cursor or fails with a span into the original input.
pub struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Parser<'a> {
        Parser { src, pos: 0 }
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Parse one leading type tag, attempting variants in this fixed
    /// priority order: atomic keyword, `vector<…>`, struct reference,
    /// `$tv{i}` placeholder. The order matters: keywords, `vector`,
    /// addresses, and placeholders share leading characters in edge cases.
    pub fn parse_tag(&mut self) -> Result<TypeTag, ParseError> {
        let rest = self.rest();
        if rest.is_empty() {
            return Err(ParseError::UnrecognizedTag {
                message: "expected a type, found end of input".to_string(),
                span: span(self.pos, 0),
            });
        }

        if let Some((atomic, len)) = match_atomic_keyword(rest) {
            self.pos += len;
            return Ok(TypeTag::Atomic(atomic));
        }

        if rest.starts_with("vector<") {
            return self.parse_vector();
        }

        if leads_with_struct(rest) {
            return self.parse_struct();
        }

        if rest.starts_with("$tv") {
            return self.parse_type_param();
        }

        let shown = leading_token(rest);
        Err(ParseError::UnrecognizedTag {
            message: format!("`{shown}` does not start any known type"),
            span: span(self.pos, shown.len()),
        })
    }

    fn parse_vector(&mut self) -> Result<TypeTag, ParseError> {
        let start = self.pos;
        self.pos += "vector<".len();
        let elem = self.parse_tag()?;
        if !self.rest().starts_with('>') {
            return Err(ParseError::MalformedVector {
                message: format!(
                    "`{}` is missing the closing `>` after its element type",
                    &self.src[start..self.pos]
                ),
                span: span(self.pos, 0),
            });
        }
        self.pos += 1;
        Ok(TypeTag::vector(elem))
    }

    fn parse_struct(&mut self) -> Result<TypeTag, ParseError> {
        let start = self.pos;
        let rest = self.rest();

        // Routing guaranteed the first `::` sits before any delimiter.
        let sep = rest.find("::").unwrap_or(rest.len());
        let address = Address::parse(&rest[..sep]).map_err(|e| ParseError::MalformedStructRef {
            message: e.to_string(),
            span: span_between(start, start + sep.max(1)),
        })?;
        self.pos += sep + 2;

        let rest = self.rest();
        let module = match rest.find("::") {
            Some(i) if !rest[..i].contains(['<', ',', '>']) && i > 0 => &rest[..i],
            _ => {
                return Err(ParseError::MalformedStructRef {
                    message: format!(
                        "`{}` needs `module::name` after the address",
                        leading_token(self.rest())
                    ),
                    span: span_between(start, self.pos + rest.find(['<', ',', '>']).unwrap_or(rest.len())),
                });
            }
        };
        self.pos += module.len() + 2;

        let rest = self.rest();
        let name_len = rest.find(['<', ',', '>']).unwrap_or(rest.len());
        if name_len == 0 {
            return Err(ParseError::MalformedStructRef {
                message: "empty struct name".to_string(),
                span: span_between(start, self.pos),
            });
        }
        let name = &rest[..name_len];
        self.pos += name_len;

        let mut type_params = Vec::new();
        if self.rest().starts_with('<') {
            self.pos += 1;
            loop {
                type_params.push(self.parse_tag()?);
                let r = self.rest();
                if let Some(after) = r.strip_prefix(", ").or_else(|| r.strip_prefix(",")) {
                    self.pos += r.len() - after.len();
                } else if r.starts_with('>') {
                    self.pos += 1;
                    break;
                } else {
                    return Err(ParseError::MalformedStructRef {
                        message: format!(
                            "type-argument list of `{}` expects `,` or `>` here",
                            &self.src[start..self.pos]
                        ),
                        span: span(self.pos, 0),
                    });
                }
            }
        }

        Ok(TypeTag::Struct(StructTag::new(address, module, name, type_params)))
    }

    fn parse_type_param(&mut self) -> Result<TypeTag, ParseError> {
        let after = &self.rest()["$tv".len()..];
        let digits = after.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(ParseError::MalformedTypeParam {
                message: "`$tv` must be followed by at least one digit".to_string(),
                span: span(self.pos, 3),
            });
        }
        let index: u16 = after[..digits].parse().map_err(|_| ParseError::MalformedTypeParam {
            message: format!("`$tv{}` index does not fit u16", &after[..digits]),
            span: span(self.pos, 3 + digits),
        })?;
        self.pos += 3 + digits;
        Ok(TypeTag::TypeParam(index))
    }
}

/// Boundary rule for atomic keywords: a keyword only counts when the input
/// ends right after it or the next character is `,` or `>`. This is what
/// keeps `address` from swallowing the start of `addressbook::M::S`.
fn at_tag_boundary(rest: &str) -> bool {
    matches!(rest.bytes().next(), None | Some(b',' | b'>'))
}

/// Longest atomic keyword at the front of `rest` that respects the boundary
/// rule, with its byte length.
fn match_atomic_keyword(rest: &str) -> Option<(AtomicTag, usize)> {
    for atomic in AtomicTag::ALL {
        let keyword = atomic.keyword();
        if let Some(after) = rest.strip_prefix(keyword) {
            if at_tag_boundary(after) {
                return Some((atomic, keyword.len()));
            }
        }
    }
    None
}

/// A struct reference leads the input iff `::` appears before any `<`, `,`
/// or `>`. Checking plain containment is not enough in composed positions:
/// inside `<$tv0, 0x1::T::T>` the remainder still contains `::` while the
/// leading type is a placeholder.
fn leads_with_struct(rest: &str) -> bool {
    match rest.find("::") {
        Some(i) => !rest[..i].contains(['<', ',', '>']),
        None => false,
    }
}

fn leading_token(rest: &str) -> &str {
    &rest[..rest.find(['<', ',', '>']).unwrap_or(rest.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_accepts_end_comma_and_close_bracket_only() {
        assert!(at_tag_boundary(""));
        assert!(at_tag_boundary(",next"));
        assert!(at_tag_boundary(">"));
        assert!(!at_tag_boundary("book::M::S"));
        assert!(!at_tag_boundary(" "));
        assert!(!at_tag_boundary("::M::S"));
    }

    #[test]
    fn atomic_keyword_matching_is_longest_first() {
        assert_eq!(match_atomic_keyword("u128>"), Some((AtomicTag::U128, 4)));
        assert_eq!(match_atomic_keyword("u8,"), Some((AtomicTag::U8, 2)));
        assert_eq!(match_atomic_keyword("u12"), None);
        assert_eq!(match_atomic_keyword("addressbook"), None);
        assert_eq!(match_atomic_keyword("address"), Some((AtomicTag::Address, 7)));
    }

    #[test]
    fn struct_routing_looks_only_before_delimiters() {
        assert!(leads_with_struct("0x1::M::S"));
        assert!(leads_with_struct("addressbook::M::S, u8"));
        assert!(!leads_with_struct("$tv0, 0x1::T::T>"));
        assert!(!leads_with_struct("u8>, 0x1::T::T"));
        assert!(!leads_with_struct("u8"));
    }
}
