//! The type-domain algebra.
//!
//! A [`TypeDomain`] is an immutable value denoting a set of candidate types
//! constrained by the subtype partial order. A caller accumulates
//! constraints by *restriction*: `restrict_down` intersects the domain with
//! "subtypes of a bound", `restrict_up` with "supertypes of a bound", and
//! the domain-argument forms intersect two domains. Every operation returns
//! a fresh value; nothing is ever mutated after construction.
//!
//! # Canonicalization
//!
//! Two rules keep values in canonical form, maintained eagerly by every
//! constructor and restriction:
//!
//! - any value denoting the empty set is represented by
//!   [`TypeDomain::Empty`];
//! - a sum that a restriction leaves with one live branch is that branch
//!   itself, and with zero live branches is `Empty`.
//!
//! Because of the first rule, equality special-cases emptiness before
//! comparing structure: `Empty` compares equal to anything that denotes ∅.
//!
//! # Variants
//!
//! - [`Empty`][TypeDomain::Empty] — the canonical bottom of the algebra.
//! - [`Set`][TypeDomain::Set] — an explicit finite set of types.
//! - [`Interval`][TypeDomain::Interval] — all types between a lower and an
//!   upper antichain of bounds.
//! - [`DownSum`][TypeDomain::DownSum] / [`UpSum`][TypeDomain::UpSum] — a
//!   union of branch domains, keyed by the bound type each branch was
//!   narrowed toward. The two kinds answer queries identically and exist
//!   to preserve the direction the branches were produced in.

use std::collections::btree_set;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use log::debug;

use crate::bounds;
use crate::oracle::SubtypeOracle;
use crate::types::TypeId;

/// An immutable set of candidate types, constrained by the subtype order.
///
/// Build values through the constructors ([`set`][TypeDomain::set],
/// [`interval`][TypeDomain::interval], [`down_sum`][TypeDomain::down_sum],
/// ...), which canonicalize; the variants are exposed for inspection and
/// matching, not for direct assembly.
#[derive(Debug, Clone)]
pub enum TypeDomain {
    /// The unique representative of the empty set of types.
    Empty,
    /// Exactly the given finite set of types (no implied closure).
    Set {
        types: BTreeSet<TypeId>,
    },
    /// All types `T` with `l <: T` for every lower bound and `T <: u` for
    /// every upper bound. Both bound sets are antichains.
    Interval {
        lowers: BTreeSet<TypeId>,
        uppers: BTreeSet<TypeId>,
    },
    /// The union of the branch domains, produced by narrowing downward
    /// (toward upper bounds). Keys record the bound each branch came from.
    DownSum {
        branches: BTreeMap<TypeId, TypeDomain>,
    },
    /// The union of the branch domains, produced by narrowing upward
    /// (toward lower bounds).
    UpSum {
        branches: BTreeMap<TypeId, TypeDomain>,
    },
}

#[derive(Copy, Clone)]
enum SumKind {
    Down,
    Up,
}

impl SumKind {
    fn wrap(self, branches: BTreeMap<TypeId, TypeDomain>) -> TypeDomain {
        match self {
            SumKind::Down => TypeDomain::DownSum { branches },
            SumKind::Up => TypeDomain::UpSum { branches },
        }
    }
}

impl TypeDomain {
    /// The canonical empty domain.
    pub fn empty() -> Self {
        TypeDomain::Empty
    }

    /// A domain of exactly the given types; `Empty` if there are none.
    pub fn set(types: impl IntoIterator<Item = TypeId>) -> Self {
        let types: BTreeSet<TypeId> = types.into_iter().collect();
        if types.is_empty() {
            return TypeDomain::Empty;
        }
        TypeDomain::Set { types }
    }

    /// The interval `[lower, upper]`; `Empty` unless `lower <: upper`.
    pub fn interval<O>(lower: TypeId, upper: TypeId, oracle: &O) -> Self
    where
        O: SubtypeOracle + ?Sized,
    {
        Self::interval_bounds([lower], [upper], oracle)
    }

    /// An interval from arbitrary candidate bound collections.
    ///
    /// Each side is reduced to an antichain; an empty side defaults to the
    /// corresponding universal bound. Returns `Empty` if some lower bound
    /// is not below some upper bound.
    pub fn interval_bounds<O>(
        lowers: impl IntoIterator<Item = TypeId>,
        uppers: impl IntoIterator<Item = TypeId>,
        oracle: &O,
    ) -> Self
    where
        O: SubtypeOracle + ?Sized,
    {
        let mut lowers = bounds::reduce_lower(lowers, oracle);
        let mut uppers = bounds::reduce_upper(uppers, oracle);
        if lowers.is_empty() {
            lowers.insert(oracle.bottom());
        }
        if uppers.is_empty() {
            uppers.insert(oracle.top());
        }
        Self::interval_reduced(lowers, uppers, oracle)
    }

    /// The trivial interval `[⊥, ⊤]`, containing every type.
    pub fn universal<O>(oracle: &O) -> Self
    where
        O: SubtypeOracle + ?Sized,
    {
        TypeDomain::Interval {
            lowers: BTreeSet::from([oracle.bottom()]),
            uppers: BTreeSet::from([oracle.top()]),
        }
    }

    /// A union of branches produced while narrowing downward.
    ///
    /// All-empty branches collapse to `Empty`, and a single-entry map to
    /// that branch's value; otherwise the map is kept as given, including
    /// branches that are individually empty.
    pub fn down_sum(branches: BTreeMap<TypeId, TypeDomain>) -> Self {
        Self::sum_domain(SumKind::Down, branches)
    }

    /// A union of branches produced while narrowing upward.
    pub fn up_sum(branches: BTreeMap<TypeId, TypeDomain>) -> Self {
        Self::sum_domain(SumKind::Up, branches)
    }

    fn sum_domain(kind: SumKind, branches: BTreeMap<TypeId, TypeDomain>) -> Self {
        if branches.values().all(|d| d.is_empty()) {
            return TypeDomain::Empty;
        }
        if branches.len() == 1 {
            return Self::collapse(kind, branches);
        }
        kind.wrap(branches)
    }

    /// Interval construction from already-reduced antichains: only the
    /// consistency check remains.
    fn interval_reduced<O>(lowers: BTreeSet<TypeId>, uppers: BTreeSet<TypeId>, oracle: &O) -> Self
    where
        O: SubtypeOracle + ?Sized,
    {
        if bounds::consistent(&lowers, &uppers, oracle) {
            TypeDomain::Interval { lowers, uppers }
        } else {
            TypeDomain::Empty
        }
    }

    fn collapse(kind: SumKind, branches: BTreeMap<TypeId, TypeDomain>) -> Self {
        match branches.len() {
            0 => TypeDomain::Empty,
            1 => match branches.into_values().next() {
                Some(only) => only,
                None => TypeDomain::Empty,
            },
            _ => kind.wrap(branches),
        }
    }

    /// Distributes a restriction over sum branches, drops branches that
    /// became empty, and collapses degenerate results.
    fn sum_restricted(
        kind: SumKind,
        branches: &BTreeMap<TypeId, TypeDomain>,
        f: impl Fn(&TypeDomain) -> TypeDomain,
    ) -> Self {
        let live: BTreeMap<TypeId, TypeDomain> = branches
            .iter()
            .map(|(&key, branch)| (key, f(branch)))
            .filter(|(_, restricted)| !restricted.is_empty())
            .collect();
        Self::collapse(kind, live)
    }

    /// Whether the domain denotes no type at all.
    ///
    /// Needs no oracle: inconsistency is detected eagerly, at construction
    /// and restriction time.
    pub fn is_empty(&self) -> bool {
        match self {
            TypeDomain::Empty => true,
            TypeDomain::Set { types } => types.is_empty(),
            TypeDomain::Interval { .. } => false,
            TypeDomain::DownSum { branches } | TypeDomain::UpSum { branches } => {
                branches.values().all(|d| d.is_empty())
            }
        }
    }

    /// Intersects with "subtypes of `bound`".
    pub fn restrict_down<O>(&self, bound: TypeId, oracle: &O) -> TypeDomain
    where
        O: SubtypeOracle + ?Sized,
    {
        debug!("restrict_down({}, {})", self, bound);
        match self {
            TypeDomain::Empty => TypeDomain::Empty,
            TypeDomain::Set { types } => Self::set(
                types
                    .iter()
                    .copied()
                    .filter(|&t| oracle.is_subtype(t, bound)),
            ),
            TypeDomain::Interval { lowers, uppers } => {
                let merged = bounds::merge_upper(uppers, bound, oracle);
                if merged == *uppers {
                    return self.clone();
                }
                Self::interval_reduced(lowers.clone(), merged, oracle)
            }
            TypeDomain::DownSum { branches } => {
                Self::sum_restricted(SumKind::Down, branches, |d| d.restrict_down(bound, oracle))
            }
            TypeDomain::UpSum { branches } => {
                Self::sum_restricted(SumKind::Up, branches, |d| d.restrict_down(bound, oracle))
            }
        }
    }

    /// Intersects with "supertypes of `bound`".
    pub fn restrict_up<O>(&self, bound: TypeId, oracle: &O) -> TypeDomain
    where
        O: SubtypeOracle + ?Sized,
    {
        debug!("restrict_up({}, {})", self, bound);
        match self {
            TypeDomain::Empty => TypeDomain::Empty,
            TypeDomain::Set { types } => Self::set(
                types
                    .iter()
                    .copied()
                    .filter(|&t| oracle.is_subtype(bound, t)),
            ),
            TypeDomain::Interval { lowers, uppers } => {
                let merged = bounds::merge_lower(lowers, bound, oracle);
                if merged == *lowers {
                    return self.clone();
                }
                Self::interval_reduced(merged, uppers.clone(), oracle)
            }
            TypeDomain::DownSum { branches } => {
                Self::sum_restricted(SumKind::Down, branches, |d| d.restrict_up(bound, oracle))
            }
            TypeDomain::UpSum { branches } => {
                Self::sum_restricted(SumKind::Up, branches, |d| d.restrict_up(bound, oracle))
            }
        }
    }

    /// Intersects with another domain, keeping elements that have a
    /// supertype in `other`.
    ///
    /// For two intervals this is the full interval intersection, which is
    /// symmetric: `a.restrict_down_domain(&b)` equals
    /// `b.restrict_down_domain(&a)` and both `restrict_up_domain` forms.
    /// An interval restricted by a finite set becomes a [`DownSum`] over
    /// the per-bound restrictions.
    pub fn restrict_down_domain<O>(&self, other: &TypeDomain, oracle: &O) -> TypeDomain
    where
        O: SubtypeOracle + ?Sized,
    {
        debug!("restrict_down_domain({}, {})", self, other);
        if other.is_empty() {
            return TypeDomain::Empty;
        }
        match self {
            TypeDomain::Empty => TypeDomain::Empty,
            TypeDomain::Set { types } => Self::set(
                types
                    .iter()
                    .copied()
                    .filter(|&t| other.has_supertype_of(t, oracle)),
            ),
            TypeDomain::Interval { lowers, uppers } => match other {
                TypeDomain::Empty => TypeDomain::Empty,
                TypeDomain::Set { types } => {
                    let branches = types
                        .iter()
                        .map(|&s| (s, self.restrict_down(s, oracle)))
                        .filter(|(_, d)| !d.is_empty())
                        .collect();
                    Self::collapse(SumKind::Down, branches)
                }
                TypeDomain::Interval {
                    lowers: other_lowers,
                    uppers: other_uppers,
                } => Self::intersect_intervals(
                    lowers,
                    uppers,
                    other_lowers,
                    other_uppers,
                    oracle,
                ),
                TypeDomain::DownSum { branches } => {
                    Self::sum_restricted(SumKind::Down, branches, |d| {
                        self.restrict_down_domain(d, oracle)
                    })
                }
                TypeDomain::UpSum { branches } => {
                    Self::sum_restricted(SumKind::Up, branches, |d| {
                        self.restrict_down_domain(d, oracle)
                    })
                }
            },
            TypeDomain::DownSum { branches } => Self::sum_restricted(SumKind::Down, branches, |d| {
                d.restrict_down_domain(other, oracle)
            }),
            TypeDomain::UpSum { branches } => Self::sum_restricted(SumKind::Up, branches, |d| {
                d.restrict_down_domain(other, oracle)
            }),
        }
    }

    /// Intersects with another domain, keeping elements that have a
    /// subtype in `other`. See [`restrict_down_domain`][Self::restrict_down_domain]
    /// for the interval symmetry.
    pub fn restrict_up_domain<O>(&self, other: &TypeDomain, oracle: &O) -> TypeDomain
    where
        O: SubtypeOracle + ?Sized,
    {
        debug!("restrict_up_domain({}, {})", self, other);
        if other.is_empty() {
            return TypeDomain::Empty;
        }
        match self {
            TypeDomain::Empty => TypeDomain::Empty,
            TypeDomain::Set { types } => Self::set(
                types
                    .iter()
                    .copied()
                    .filter(|&t| other.has_subtype_of(t, oracle)),
            ),
            TypeDomain::Interval { lowers, uppers } => match other {
                TypeDomain::Empty => TypeDomain::Empty,
                TypeDomain::Set { types } => {
                    let branches = types
                        .iter()
                        .map(|&s| (s, self.restrict_up(s, oracle)))
                        .filter(|(_, d)| !d.is_empty())
                        .collect();
                    Self::collapse(SumKind::Up, branches)
                }
                TypeDomain::Interval {
                    lowers: other_lowers,
                    uppers: other_uppers,
                } => Self::intersect_intervals(
                    lowers,
                    uppers,
                    other_lowers,
                    other_uppers,
                    oracle,
                ),
                TypeDomain::DownSum { branches } => {
                    Self::sum_restricted(SumKind::Down, branches, |d| {
                        self.restrict_up_domain(d, oracle)
                    })
                }
                TypeDomain::UpSum { branches } => {
                    Self::sum_restricted(SumKind::Up, branches, |d| {
                        self.restrict_up_domain(d, oracle)
                    })
                }
            },
            TypeDomain::DownSum { branches } => Self::sum_restricted(SumKind::Down, branches, |d| {
                d.restrict_up_domain(other, oracle)
            }),
            TypeDomain::UpSum { branches } => Self::sum_restricted(SumKind::Up, branches, |d| {
                d.restrict_up_domain(other, oracle)
            }),
        }
    }

    /// Full intersection of two intervals: merge both bound antichains and
    /// re-check consistency.
    fn intersect_intervals<O>(
        lowers: &BTreeSet<TypeId>,
        uppers: &BTreeSet<TypeId>,
        other_lowers: &BTreeSet<TypeId>,
        other_uppers: &BTreeSet<TypeId>,
        oracle: &O,
    ) -> TypeDomain
    where
        O: SubtypeOracle + ?Sized,
    {
        let lowers = bounds::reduce_lower(
            lowers.iter().chain(other_lowers.iter()).copied(),
            oracle,
        );
        let uppers = bounds::reduce_upper(
            uppers.iter().chain(other_uppers.iter()).copied(),
            oracle,
        );
        Self::interval_reduced(lowers, uppers, oracle)
    }

    /// Whether some member of the domain is a supertype of `t`.
    pub fn has_supertype_of<O>(&self, t: TypeId, oracle: &O) -> bool
    where
        O: SubtypeOracle + ?Sized,
    {
        match self {
            TypeDomain::Empty => false,
            TypeDomain::Set { types } => types.iter().any(|&e| oracle.is_subtype(t, e)),
            TypeDomain::Interval { .. } => !self.restrict_up(t, oracle).is_empty(),
            TypeDomain::DownSum { branches } | TypeDomain::UpSum { branches } => {
                branches.values().any(|d| d.has_supertype_of(t, oracle))
            }
        }
    }

    /// Whether some member of the domain is a subtype of `t`.
    pub fn has_subtype_of<O>(&self, t: TypeId, oracle: &O) -> bool
    where
        O: SubtypeOracle + ?Sized,
    {
        match self {
            TypeDomain::Empty => false,
            TypeDomain::Set { types } => types.iter().any(|&e| oracle.is_subtype(e, t)),
            TypeDomain::Interval { .. } => !self.restrict_down(t, oracle).is_empty(),
            TypeDomain::DownSum { branches } | TypeDomain::UpSum { branches } => {
                branches.values().any(|d| d.has_subtype_of(t, oracle))
            }
        }
    }

    /// Enumerates the members, where enumeration is defined: the empty
    /// domain, explicit sets, and singleton intervals. Returns `None` for
    /// general intervals and sums; restrict further until the value
    /// collapses to a set.
    pub fn iter(&self) -> Option<DomainIter<'_>> {
        match self {
            TypeDomain::Empty => Some(DomainIter(IterImpl::Empty)),
            TypeDomain::Set { types } => Some(DomainIter(IterImpl::Set(types.iter()))),
            TypeDomain::Interval { lowers, uppers } => {
                if lowers.len() == 1 && lowers == uppers {
                    let only = lowers.iter().copied().next();
                    Some(DomainIter(IterImpl::Singleton(only)))
                } else {
                    None
                }
            }
            TypeDomain::DownSum { .. } | TypeDomain::UpSum { .. } => None,
        }
    }
}

impl Default for TypeDomain {
    fn default() -> Self {
        TypeDomain::Empty
    }
}

/// Iterator over the members of an enumerable domain.
pub struct DomainIter<'a>(IterImpl<'a>);

enum IterImpl<'a> {
    Empty,
    Set(btree_set::Iter<'a, TypeId>),
    Singleton(Option<TypeId>),
}

impl Iterator for DomainIter<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        match &mut self.0 {
            IterImpl::Empty => None,
            IterImpl::Set(types) => types.next().copied(),
            IterImpl::Singleton(only) => only.take(),
        }
    }
}

// Equality is denotation-based for emptiness (everything empty equals the
// canonical `Empty`) and structural otherwise. Two sums over different
// partitions of the same denotation are *not* equal; that check would not
// be cheap, and callers only rely on the representation-level one.
impl PartialEq for TypeDomain {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }
        match (self, other) {
            (TypeDomain::Set { types: a }, TypeDomain::Set { types: b }) => a == b,
            (
                TypeDomain::Interval {
                    lowers: la,
                    uppers: ua,
                },
                TypeDomain::Interval {
                    lowers: lb,
                    uppers: ub,
                },
            ) => la == lb && ua == ub,
            (TypeDomain::DownSum { branches: a }, TypeDomain::DownSum { branches: b }) => a == b,
            (TypeDomain::UpSum { branches: a }, TypeDomain::UpSum { branches: b }) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeDomain {}

impl Hash for TypeDomain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            state.write_u8(0);
            return;
        }
        match self {
            TypeDomain::Empty => {}
            TypeDomain::Set { types } => {
                state.write_u8(1);
                types.hash(state);
            }
            TypeDomain::Interval { lowers, uppers } => {
                state.write_u8(2);
                lowers.hash(state);
                uppers.hash(state);
            }
            TypeDomain::DownSum { branches } => {
                state.write_u8(3);
                branches.hash(state);
            }
            TypeDomain::UpSum { branches } => {
                state.write_u8(4);
                branches.hash(state);
            }
        }
    }
}

fn fmt_types(f: &mut fmt::Formatter<'_>, types: &BTreeSet<TypeId>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", t)?;
    }
    write!(f, "}}")
}

impl fmt::Display for TypeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDomain::Empty => write!(f, "∅"),
            TypeDomain::Set { types } => fmt_types(f, types),
            TypeDomain::Interval { lowers, uppers } => {
                write!(f, "[")?;
                fmt_types(f, lowers)?;
                write!(f, ", ")?;
                fmt_types(f, uppers)?;
                write!(f, "]")
            }
            TypeDomain::DownSum { branches } | TypeDomain::UpSum { branches } => {
                let kind = if matches!(self, TypeDomain::DownSum { .. }) {
                    "down"
                } else {
                    "up"
                };
                write!(f, "{}{{", kind)?;
                for (i, (key, branch)) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, branch)?;
                }
                write!(f, "}}")
            }
        }
    }
}
