#![forbid(unsafe_code)]

//! Structural type descriptors for the contract language.
//!
//! A [`TypeTag`] is an immutable value tree identifying a contract-language
//! type: a primitive, a vector, a (possibly generic) struct, or an unbound
//! generic-parameter placeholder.

mod fmt;
mod subst;

pub use subst::UnboundTypeParam;

/// The fixed set of primitive types.
///
/// Two atomic tags of the same kind are equal; there is no payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AtomicTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
}

impl AtomicTag {
    /// Canonical keyword spelling, exactly as the chain's own type-name
    /// parser expects it.
    pub fn keyword(self) -> &'static str {
        match self {
            AtomicTag::Bool => "bool",
            AtomicTag::U8 => "u8",
            AtomicTag::U64 => "u64",
            AtomicTag::U128 => "u128",
            AtomicTag::Address => "address",
            AtomicTag::Signer => "signer",
        }
    }

    /// All atomic tags, longest keyword first (the order keyword matching
    /// must try them in).
    pub const ALL: [AtomicTag; 6] = [
        AtomicTag::Address,
        AtomicTag::Signer,
        AtomicTag::U128,
        AtomicTag::Bool,
        AtomicTag::U64,
        AtomicTag::U8,
    ];
}

/// The declaring account of a struct type. Either a `0x`-prefixed numeric
/// on-chain address or a named address from contract source; the two forms
/// never compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    /// On-chain account address. Rendered in short form (`0x1`, not
    /// `0x0000…0001`), which is the chain-conventional spelling.
    Numeric([u8; 32]),
    /// Named address from contract source, rendered verbatim.
    Named(String),
}

/// Reasons an address token cannot be turned into an [`Address`].
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("empty address")]
    Empty,
    #[error("invalid hex address `{0}`")]
    InvalidHex(String),
    #[error("hex address `{0}` longer than 32 bytes")]
    TooLong(String),
    #[error("`{0}` is not a valid named address")]
    InvalidName(String),
}

impl Address {
    /// Numeric address from its trailing bytes (left-padded with zeroes).
    pub fn numeric(bytes: &[u8]) -> Result<Address, AddressError> {
        if bytes.len() > 32 {
            return Err(AddressError::TooLong(hex_of(bytes)));
        }
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(Address::Numeric(out))
    }

    pub fn named(name: impl Into<String>) -> Address {
        Address::Named(name.into())
    }

    /// Parse an address token: `0x`-prefixed hex becomes [`Address::Numeric`]
    /// (leading zeroes irrelevant, so `0x01` and `0x1` are the same address);
    /// any identifier-shaped token becomes [`Address::Named`].
    pub fn parse(token: &str) -> Result<Address, AddressError> {
        if token.is_empty() {
            return Err(AddressError::Empty);
        }
        let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) else {
            let mut bytes = token.bytes();
            let head_ok = matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_');
            if !head_ok || !bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_') {
                return Err(AddressError::InvalidName(token.to_string()));
            }
            return Ok(Address::Named(token.to_string()));
        };
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidHex(token.to_string()));
        }
        if hex.len() > 64 {
            return Err(AddressError::TooLong(token.to_string()));
        }
        let mut out = [0u8; 32];
        let mut nibbles = hex.bytes().rev().map(hex_val);
        for i in (0..32).rev() {
            let lo = nibbles.next().unwrap_or(0);
            let hi = nibbles.next().unwrap_or(0);
            out[i] = (hi << 4) | lo;
        }
        Ok(Address::Numeric(out))
    }
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => unreachable!("caller checked is_ascii_hexdigit"),
    }
}

fn hex_of(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    for b in bytes {
        s.push_str(&format!("{b:02x}"));
    }
    s
}

/// A struct (resource) type: declaring address, module, struct name, and the
/// positional type arguments it was instantiated with (empty for non-generic
/// structs).
///
/// Equality is field-wise and positional over `type_params`. The number of
/// type arguments is NOT checked against the struct's declared generic arity;
/// this core is declaration-agnostic, and an arity mismatch only surfaces
/// downstream (at code generation or on-chain-call time).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    pub fn new(
        address: Address,
        module: impl Into<String>,
        name: impl Into<String>,
        type_params: Vec<TypeTag>,
    ) -> StructTag {
        StructTag {
            address,
            module: module.into(),
            name: name.into(),
            type_params,
        }
    }

    /// The paramless identity of this struct: same address/module/name, no
    /// type arguments. Used for lookups that match a resource type regardless
    /// of which generics it was instantiated with.
    pub fn paramless(&self) -> StructTag {
        StructTag {
            address: self.address.clone(),
            module: self.module.clone(),
            name: self.name.clone(),
            type_params: Vec::new(),
        }
    }
}

/// A contract-language type. Closed sum; every consumer matches exhaustively
/// so an unhandled variant is a compile error, not a silent fallthrough.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Atomic(AtomicTag),
    /// Homogeneous vector; nests arbitrarily (`vector<vector<u8>>`).
    Vector(Box<TypeTag>),
    Struct(StructTag),
    /// Position in the ambient generic-parameter list of the enclosing
    /// declaration. Carries no binding; the environment is supplied at
    /// substitution time.
    TypeParam(u16),
}

impl TypeTag {
    pub fn vector(elem: TypeTag) -> TypeTag {
        TypeTag::Vector(Box::new(elem))
    }

    /// Narrow to the struct variant, if that is what this is.
    pub fn struct_tag(&self) -> Option<&StructTag> {
        match self {
            TypeTag::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl From<AtomicTag> for TypeTag {
    fn from(a: AtomicTag) -> TypeTag {
        TypeTag::Atomic(a)
    }
}

impl From<StructTag> for TypeTag {
    fn from(s: StructTag) -> TypeTag {
        TypeTag::Struct(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypeTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Canonical text is the interchange form for type identity.
        serializer.serialize_str(&self.full_name())
    }
}
