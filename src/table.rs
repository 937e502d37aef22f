//! An in-memory type universe.
//!
//! [`TypeTable`] is a concrete implementation of both
//! [`SubtypeOracle`][crate::oracle::SubtypeOracle] and
//! [`TypeProvider`][crate::oracle::TypeProvider] over a universe declared by
//! hand: named types, declared-supertype edges, and generic instantiation
//! tags. Subtyping is answered by reachability over the declared edges,
//! with the bottom and top types treated as universal bounds.
//!
//! Production callers are expected to plug a reflection-backed oracle into
//! the same traits; the table exists for tests, demos, and small closed
//! universes.

use std::collections::BTreeSet;
use std::fmt;

use crate::oracle::{SubtypeOracle, TypeError, TypeProvider};
use crate::types::{GenericId, TypeId};

struct Entry {
    name: String,
    supers: Vec<TypeId>,
    generic: Option<GenericId>,
}

/// A closed type universe with declared subtype edges.
pub struct TypeTable {
    entries: Vec<Entry>,
    generic_names: Vec<String>,
    bottom: TypeId,
    top: TypeId,
}

impl TypeTable {
    /// Creates a universe containing only the two universal bounds,
    /// named `null` and `Object`.
    pub fn new() -> Self {
        let mut table = TypeTable {
            entries: Vec::new(),
            generic_names: Vec::new(),
            bottom: TypeId::new(0),
            top: TypeId::new(0),
        };
        table.bottom = table.declare("null");
        table.top = table.declare("Object");
        table
    }

    /// Declares a new type with no supertype edges (implicitly below top).
    pub fn declare(&mut self, name: &str) -> TypeId {
        let id = TypeId::new(self.entries.len() as u32);
        self.entries.push(Entry {
            name: name.to_string(),
            supers: Vec::new(),
            generic: None,
        });
        id
    }

    /// Declares a generic class identity (not itself a type).
    pub fn declare_generic(&mut self, name: &str) -> GenericId {
        let id = GenericId::new(self.generic_names.len() as u32);
        self.generic_names.push(name.to_string());
        id
    }

    /// Declares a type that instantiates generic class `g`.
    pub fn instantiate(&mut self, g: GenericId, name: &str) -> TypeId {
        let id = self.declare(name);
        self.entries[id.index()].generic = Some(g);
        id
    }

    /// Adds a declared supertype edge `sub <: sup`.
    ///
    /// Edges to the bottom or top type are never needed: the universal
    /// bounds are built into the subtype answer.
    pub fn add_supertype(&mut self, sub: TypeId, sup: TypeId) {
        self.entries[sub.index()].supers.push(sup);
    }

    /// The declared name of `t`.
    pub fn name(&self, t: TypeId) -> &str {
        &self.entries[t.index()].name
    }

    /// Number of declared types, including the two universal bounds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, t: TypeId) -> Result<&Entry, TypeError> {
        self.entries.get(t.index()).ok_or(TypeError::Unresolved(t))
    }

    /// Reachability over declared edges, iterative with a visited set.
    fn reaches(&self, from: TypeId, to: TypeId) -> bool {
        let mut visited = BTreeSet::new();
        let mut stack = vec![from];
        while let Some(t) = stack.pop() {
            if t == to {
                return true;
            }
            if !visited.insert(t) {
                continue;
            }
            if let Some(entry) = self.entries.get(t.index()) {
                stack.extend(entry.supers.iter().copied());
            }
        }
        false
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        TypeTable::new()
    }
}

impl fmt::Debug for TypeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTable")
            .field("types", &self.entries.len())
            .field("generics", &self.generic_names.len())
            .finish()
    }
}

impl SubtypeOracle for TypeTable {
    fn is_subtype(&self, a: TypeId, b: TypeId) -> bool {
        a == b || a == self.bottom || b == self.top || self.reaches(a, b)
    }

    fn bottom(&self) -> TypeId {
        self.bottom
    }

    fn top(&self) -> TypeId {
        self.top
    }
}

impl TypeProvider for TypeTable {
    fn declared_supertypes(&self, t: TypeId) -> Result<Vec<TypeId>, TypeError> {
        let entry = self.resolve(t)?;
        if entry.supers.is_empty() && t != self.top && t != self.bottom {
            // Every declared type is below Object, even without edges.
            return Ok(vec![self.top]);
        }
        Ok(entry.supers.clone())
    }

    fn generic_instantiations(&self, t: TypeId) -> Result<Vec<TypeId>, TypeError> {
        let entry = self.resolve(t)?;
        Ok(entry
            .supers
            .iter()
            .copied()
            .filter(|s| {
                self.entries
                    .get(s.index())
                    .is_some_and(|e| e.generic.is_some())
            })
            .collect())
    }

    fn generic_of(&self, t: TypeId) -> Option<GenericId> {
        self.entries.get(t.index()).and_then(|e| e.generic)
    }
}
