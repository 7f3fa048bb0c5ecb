#![forbid(unsafe_code)]

//! Canonical textual rendering.
//!
//! Full names must match the chain's own type-name notation byte for byte;
//! they go verbatim into transaction and query payloads. `$tv{i}` is this
//! toolchain's placeholder notation for unbound generic parameters, not
//! valid contract-language source.

use std::fmt;

use crate::{Address, AtomicTag, StructTag, TypeTag};

impl TypeTag {
    /// Complete canonical form, e.g. `vector<0x1::Coin::Coin<u64>>`.
    pub fn full_name(&self) -> String {
        let mut out = String::new();
        write_tag(&mut out, self);
        out
    }

    /// Identity-only form: drops a struct's type arguments
    /// (`0x1::Coin::Coin`), renders any vector as plain `vector`, and leaves
    /// atomics and placeholders as in [`TypeTag::full_name`].
    pub fn paramless_name(&self) -> String {
        match self {
            TypeTag::Atomic(a) => a.keyword().to_string(),
            TypeTag::Vector(_) => "vector".to_string(),
            TypeTag::Struct(s) => s.paramless_name(),
            TypeTag::TypeParam(i) => format!("$tv{i}"),
        }
    }
}

impl StructTag {
    /// Canonical form including type arguments when present.
    pub fn full_name(&self) -> String {
        let mut out = String::new();
        write_struct(&mut out, self);
        out
    }

    /// `address::module::name`, independent of instantiation.
    pub fn paramless_name(&self) -> String {
        format!("{}::{}::{}", self.address, self.module, self.name)
    }
}

fn write_tag(out: &mut String, tag: &TypeTag) {
    match tag {
        TypeTag::Atomic(a) => out.push_str(a.keyword()),
        TypeTag::Vector(elem) => {
            out.push_str("vector<");
            write_tag(out, elem);
            out.push('>');
        }
        TypeTag::Struct(s) => write_struct(out, s),
        TypeTag::TypeParam(i) => {
            out.push_str("$tv");
            out.push_str(&i.to_string());
        }
    }
}

fn write_struct(out: &mut String, s: &StructTag) {
    out.push_str(&s.paramless_name());
    if !s.type_params.is_empty() {
        out.push('<');
        for (i, p) in s.type_params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_tag(out, p);
        }
        out.push('>');
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl fmt::Display for AtomicTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Short form: leading zero bytes and a leading zero nibble are
            // dropped; the zero address prints `0x0`.
            Address::Numeric(bytes) => {
                let first = bytes.iter().position(|b| *b != 0);
                match first {
                    None => f.write_str("0x0"),
                    Some(i) => {
                        write!(f, "0x{:x}", bytes[i])?;
                        for b in &bytes[i + 1..] {
                            write!(f, "{b:02x}")?;
                        }
                        Ok(())
                    }
                }
            }
            Address::Named(name) => f.write_str(name),
        }
    }
}
