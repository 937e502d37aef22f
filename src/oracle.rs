//! External capability seams: the subtype oracle and the reflection provider.
//!
//! The domain algebra never inspects types itself. Everything reduces to a
//! single primitive, [`SubtypeOracle::is_subtype`], answered by the host
//! over a closed, already-resolved type universe. The closure builder
//! additionally needs the declared-supertype structure, supplied by
//! [`TypeProvider`].

use thiserror::Error;

use crate::types::{GenericId, TypeId};

/// Errors surfaced at the oracle boundary.
///
/// The algebra itself has no failure modes: inconsistent bounds are legal
/// values, discoverable only via `is_empty`. Failures belong to the host
/// facility that resolves types.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum TypeError {
    /// The provider was asked about a type it cannot resolve.
    #[error("unresolved type {0}")]
    Unresolved(TypeId),
}

/// Answers the subtype relation `a <: b` over a closed type universe.
///
/// Implementations must provide a partial order: reflexive, transitive, and
/// antisymmetric up to handle identity, with `bottom() <: t` and
/// `t <: top()` for every `t` in the universe.
///
/// All domain operations are bounded by the sizes of the bound sets
/// involved, so the oracle is queried on small inputs but frequently;
/// implementations are expected to answer from already-resolved data
/// without I/O.
pub trait SubtypeOracle {
    /// Returns `true` iff `a` is a subtype of `b`.
    fn is_subtype(&self, a: TypeId, b: TypeId) -> bool;

    /// The universal bottom type (`⊥ <: t` for all `t`).
    fn bottom(&self) -> TypeId;

    /// The universal top type (`t <: ⊤` for all `t`).
    fn top(&self) -> TypeId;
}

impl<O: SubtypeOracle + ?Sized> SubtypeOracle for &O {
    fn is_subtype(&self, a: TypeId, b: TypeId) -> bool {
        (**self).is_subtype(a, b)
    }

    fn bottom(&self) -> TypeId {
        (**self).bottom()
    }

    fn top(&self) -> TypeId {
        (**self).top()
    }
}

/// The reflection facility behind the closure builder.
///
/// Supplies the *declared* structure of a type: its direct supertypes
/// (superclass and superinterfaces), the generic-interface instantiations
/// it introduces, and the generic class it instantiates, if any.
pub trait TypeProvider {
    /// The direct declared supertypes of `t`.
    fn declared_supertypes(&self, t: TypeId) -> Result<Vec<TypeId>, TypeError>;

    /// The generic-interface instantiations declared directly on `t`
    /// (e.g. `Comparable<Integer>` for `Integer`).
    fn generic_instantiations(&self, t: TypeId) -> Result<Vec<TypeId>, TypeError>;

    /// The generic class that `t` instantiates, or `None` if `t` is not an
    /// instantiation.
    fn generic_of(&self, t: TypeId) -> Option<GenericId>;
}
