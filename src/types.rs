///! Type-safe handles into the resolved type universe.
///!
///! This module provides newtype wrappers that enforce compile-time
///! distinction between concrete type values and generic class identities,
///! preventing common mistakes when wiring domains to an oracle.
use std::fmt;

/// A handle to a concrete type in the resolved universe.
///
/// The algebra treats types as opaque values; all semantic questions are
/// delegated to a [`SubtypeOracle`][crate::oracle::SubtypeOracle]. A handle
/// carries no meaning on its own and is only valid for the universe that
/// issued it.
///
/// # Invariants
///
/// - Handles are stable: the same handle always names the same type.
/// - Equality of handles is identity of types.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TypeId(u32);

impl TypeId {
    /// Creates a handle with the given raw id.
    pub const fn new(id: u32) -> Self {
        TypeId(id)
    }

    /// Returns the raw id as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the raw id as a `usize`, for indexing side tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl From<TypeId> for u32 {
    fn from(ty: TypeId) -> Self {
        ty.0
    }
}

/// The identity of a generic class or interface, before instantiation.
///
/// Distinct from [`TypeId`]: `Comparable` is a `GenericId`, while
/// `Comparable<Integer>` is a `TypeId`. The closure builder uses this to
/// answer "which registered types instantiate generic class `g`".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GenericId(u32);

impl GenericId {
    /// Creates a generic-class handle with the given raw id.
    pub const fn new(id: u32) -> Self {
        GenericId(id)
    }

    /// Returns the raw id as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the raw id as a `usize`, for indexing side tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GenericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

impl From<GenericId> for u32 {
    fn from(g: GenericId) -> Self {
        g.0
    }
}
