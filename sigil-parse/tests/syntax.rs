use sigil_parse::{parse_type_tag, parse_type_tag_prefix, ParseError};
use sigil_tag::{Address, AtomicTag, StructTag, TypeTag};

#[test]
fn parses_atomic_keywords() {
    assert_eq!(parse_type_tag("u64").expect("parse"), TypeTag::Atomic(AtomicTag::U64));
    assert_eq!(parse_type_tag("bool").expect("parse"), TypeTag::Atomic(AtomicTag::Bool));
    assert_eq!(
        parse_type_tag("signer").expect("parse"),
        TypeTag::Atomic(AtomicTag::Signer)
    );
}

#[test]
fn parses_vector_of_u8() {
    let t = parse_type_tag("vector<u8>").expect("parse");
    assert_eq!(t, TypeTag::vector(AtomicTag::U8.into()));
}

#[test]
fn parses_generic_struct_with_struct_argument() {
    let t = parse_type_tag("0x1::Coin::Coin<0x1::TestCoin::TestCoin>").expect("parse");
    let addr = Address::parse("0x1").unwrap();
    let expected = TypeTag::Struct(StructTag::new(
        addr.clone(),
        "Coin",
        "Coin",
        vec![TypeTag::Struct(StructTag::new(addr, "TestCoin", "TestCoin", vec![]))],
    ));
    assert_eq!(t, expected);
}

#[test]
fn parses_type_param_placeholder() {
    assert_eq!(parse_type_tag("$tv2").expect("parse"), TypeTag::TypeParam(2));
    assert_eq!(parse_type_tag("$tv17").expect("parse"), TypeTag::TypeParam(17));
}

#[test]
fn bare_placeholder_prefix_is_rejected() {
    let err = parse_type_tag("$tv").expect_err("no digits");
    assert!(matches!(err, ParseError::MalformedTypeParam { .. }));
    assert!(err.to_string().contains("at least one digit"));
}

// The boundary rule: `address` is an atomic keyword only when the input ends
// (or hits `,`/`>`) right after it.
#[test]
fn keyword_vs_struct_name_priority() {
    assert_eq!(
        parse_type_tag("address").expect("parse"),
        TypeTag::Atomic(AtomicTag::Address)
    );

    let t = parse_type_tag("addressbook::M::S").expect("parse");
    let TypeTag::Struct(s) = t else {
        panic!("expected a struct tag");
    };
    assert_eq!(s.address, Address::named("addressbook"));
    assert_eq!(s.module, "M");
    assert_eq!(s.name, "S");
    assert!(s.type_params.is_empty());
}

#[test]
fn comma_separator_accepts_both_spellings() {
    let spaced = parse_type_tag("0x1::P::P<u8, u64>").expect("parse");
    let tight = parse_type_tag("0x1::P::P<u8,u64>").expect("parse");
    assert_eq!(spaced, tight);
}

#[test]
fn placeholder_argument_before_struct_argument() {
    // While parsing `$tv0` the remainder still contains `::`; the leading
    // type must still be recognized as a placeholder.
    let t = parse_type_tag("0x1::P::P<$tv0, 0x1::T::T>").expect("parse");
    let TypeTag::Struct(s) = t else {
        panic!("expected a struct tag");
    };
    assert_eq!(s.type_params[0], TypeTag::TypeParam(0));
    assert!(s.type_params[1].struct_tag().is_some());
}

#[test]
fn prefix_parse_returns_the_remainder() {
    let (t, rest) = parse_type_tag_prefix("u8>, tail").expect("parse");
    assert_eq!(t, TypeTag::Atomic(AtomicTag::U8));
    assert_eq!(rest, ">, tail");

    let (t, rest) = parse_type_tag_prefix("0x1::M::S, u64").expect("parse");
    assert!(t.struct_tag().is_some());
    assert_eq!(rest, ", u64");
}

#[test]
fn strict_parse_rejects_trailing_input() {
    let err = parse_type_tag("u8>").expect_err("trailing `>`");
    let ParseError::TrailingInput { trailing, .. } = err else {
        panic!("expected a trailing-input error");
    };
    assert_eq!(trailing, ">");
}

#[test]
fn struct_reference_needs_two_separators() {
    let err = parse_type_tag("0x1::M").expect_err("missing second `::`");
    assert!(matches!(err, ParseError::MalformedStructRef { .. }));
    assert!(err.to_string().contains("module::name"));
}

#[test]
fn unterminated_vector_is_rejected() {
    for src in ["vector<u8", "vector<u8,"] {
        let err = parse_type_tag(src).expect_err("missing `>`");
        assert!(matches!(err, ParseError::MalformedVector { .. }), "input: {src}");
        assert!(err.to_string().contains("closing `>`"));
    }
}

#[test]
fn unterminated_argument_list_is_rejected() {
    let err = parse_type_tag("0x1::M::S<u8").expect_err("missing `>`");
    assert!(matches!(err, ParseError::MalformedStructRef { .. }));
}

#[test]
fn garbage_is_unrecognized() {
    for src in ["", "??", "u12", "Coin", "vector"] {
        let err = parse_type_tag(src).expect_err("no grammar rule matches");
        assert!(matches!(err, ParseError::UnrecognizedTag { .. }), "input: {src}");
    }
}

#[test]
fn bad_hex_address_is_a_struct_error() {
    let err = parse_type_tag("0xZZ::M::S").expect_err("invalid hex");
    assert!(matches!(err, ParseError::MalformedStructRef { .. }));
    assert!(err.to_string().contains("invalid hex"));
}

#[test]
fn error_spans_point_at_the_offence() {
    let err = parse_type_tag("vector<u8").expect_err("missing `>`");
    let ParseError::MalformedVector { span, .. } = err else {
        panic!("expected a vector error");
    };
    // The label sits where the `>` should have been.
    assert_eq!(span.offset(), "vector<u8".len());

    let err = parse_type_tag("$tvx").expect_err("no digits");
    let ParseError::MalformedTypeParam { span, .. } = err else {
        panic!("expected a placeholder error");
    };
    assert_eq!(span.offset(), 0);
    assert_eq!(span.len(), 3);
}
