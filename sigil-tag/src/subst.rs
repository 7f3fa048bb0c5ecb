#![forbid(unsafe_code)]

//! Generic-parameter substitution and the concreteness predicate.
//!
//! A placeholder's binding is never stored on the tag itself; the ordered
//! instantiation environment is threaded through every call.

use miette::Diagnostic;
use thiserror::Error;

use crate::{StructTag, TypeTag};

/// A placeholder referenced a position the instantiation environment does
/// not have. This is an upstream generic-arity bug, not a recoverable input
/// condition.
#[derive(Debug, Error, Diagnostic)]
#[error("unbound type parameter $tv{index}: environment has {env_len} entries")]
#[diagnostic(code(sigil::subst::unbound))]
pub struct UnboundTypeParam {
    pub index: u16,
    pub env_len: usize,
}

impl TypeTag {
    /// Replace every `$tv{i}` placeholder with `env[i]`, producing a new
    /// tree. The input is never mutated. Fails on the first placeholder
    /// whose index is outside `env`.
    pub fn substitute(&self, env: &[TypeTag]) -> Result<TypeTag, UnboundTypeParam> {
        match self {
            TypeTag::Atomic(a) => Ok(TypeTag::Atomic(*a)),
            TypeTag::Vector(elem) => Ok(TypeTag::vector(elem.substitute(env)?)),
            TypeTag::Struct(s) => Ok(TypeTag::Struct(s.substitute(env)?)),
            TypeTag::TypeParam(i) => {
                env.get(usize::from(*i)).cloned().ok_or(UnboundTypeParam {
                    index: *i,
                    env_len: env.len(),
                })
            }
        }
    }

    /// True iff no `$tv` placeholder occurs anywhere in this tree.
    pub fn is_concrete(&self) -> bool {
        match self {
            TypeTag::Atomic(_) => true,
            TypeTag::Vector(elem) => elem.is_concrete(),
            TypeTag::Struct(s) => s.type_params.iter().all(TypeTag::is_concrete),
            TypeTag::TypeParam(_) => false,
        }
    }
}

impl StructTag {
    /// Substitute through the type-argument list, keeping the struct
    /// identity unchanged.
    pub fn substitute(&self, env: &[TypeTag]) -> Result<StructTag, UnboundTypeParam> {
        let type_params = self
            .type_params
            .iter()
            .map(|p| p.substitute(env))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StructTag {
            address: self.address.clone(),
            module: self.module.clone(),
            name: self.name.clone(),
            type_params,
        })
    }
}
