//! The type closure builder.
//!
//! [`TypeSet`] accumulates the types a generator has seen, closed under
//! declared supertypes and generic-interface instantiations. Adding one
//! concrete class registers its whole ancestry, so the set can later act as
//! the candidate pool behind a [`Set`][crate::domain::TypeDomain::Set]
//! domain.
//!
//! Expansion is a plain work-queue over the
//! [`TypeProvider`][crate::oracle::TypeProvider] facility; there is no
//! subtype-combination logic here.

use std::collections::{BTreeSet, VecDeque};

use log::debug;

use crate::domain::TypeDomain;
use crate::oracle::{TypeError, TypeProvider};
use crate::types::{GenericId, TypeId};

/// A growing collection of types, closed under reachable supertypes.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TypeSet {
    types: BTreeSet<TypeId>,
}

impl TypeSet {
    pub fn new() -> Self {
        TypeSet::default()
    }

    /// Registers `ty` together with its transitive declared supertypes and
    /// the generic instantiations reachable from its ancestry.
    ///
    /// Returns whether anything new was registered; re-adding a present
    /// type with an already-registered ancestry is a no-op.
    pub fn add<P>(&mut self, ty: TypeId, provider: &P) -> Result<bool, TypeError>
    where
        P: TypeProvider + ?Sized,
    {
        let mut queue = VecDeque::from([ty]);
        let mut grew = false;
        while let Some(t) = queue.pop_front() {
            if !self.types.insert(t) {
                continue;
            }
            debug!("typeset registers {}", t);
            grew = true;
            queue.extend(provider.declared_supertypes(t)?);
            queue.extend(provider.generic_instantiations(t)?);
        }
        Ok(grew)
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.types.contains(&ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types.iter().copied()
    }

    /// All registered instantiations of generic class `g`.
    pub fn match_generic<P>(&self, g: GenericId, provider: &P) -> Vec<TypeId>
    where
        P: TypeProvider + ?Sized,
    {
        self.types
            .iter()
            .copied()
            .filter(|&t| provider.generic_of(t) == Some(g))
            .collect()
    }

    /// Seeds a set domain with everything registered so far.
    pub fn to_domain(&self) -> TypeDomain {
        TypeDomain::set(self.iter())
    }
}
