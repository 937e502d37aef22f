//! Antichain maintenance for interval bounds.
//!
//! An interval domain keeps each side of the interval as an *antichain*: a
//! set of types in which no two elements are comparable under `<:`. These
//! routines are the single place where bounds are merged and reduced; both
//! interval construction and restriction go through them.
//!
//! The reduction rules are dual:
//! - a candidate lower bound `l` is redundant if some kept `l'` has
//!   `l <: l'` (then `l' <: T` already implies `l <: T`);
//! - a candidate upper bound `u` is redundant if some kept `u'` has
//!   `u' <: u` (then `T <: u'` already implies `T <: u`).
//!
//! Pairwise comparisons are quadratic in the antichain size, which is
//! expected to stay small (tens of types).

use std::collections::BTreeSet;

use crate::oracle::SubtypeOracle;
use crate::types::TypeId;

/// `t <: b` for every `b` in `bounds`.
pub fn below_all<O>(t: TypeId, bounds: &BTreeSet<TypeId>, oracle: &O) -> bool
where
    O: SubtypeOracle + ?Sized,
{
    bounds.iter().all(|&b| oracle.is_subtype(t, b))
}

/// `b <: t` for every `b` in `bounds`.
pub fn all_below<O>(bounds: &BTreeSet<TypeId>, t: TypeId, oracle: &O) -> bool
where
    O: SubtypeOracle + ?Sized,
{
    bounds.iter().all(|&b| oracle.is_subtype(b, t))
}

/// Merges `ty` into a lower-bound antichain.
///
/// Returns `bounds` unchanged if `ty` is implied by an existing bound;
/// otherwise drops the bounds `ty` now implies and inserts `ty`.
pub fn merge_lower<O>(bounds: &BTreeSet<TypeId>, ty: TypeId, oracle: &O) -> BTreeSet<TypeId>
where
    O: SubtypeOracle + ?Sized,
{
    if bounds.iter().any(|&l| oracle.is_subtype(ty, l)) {
        return bounds.clone();
    }
    let mut merged: BTreeSet<TypeId> = bounds
        .iter()
        .copied()
        .filter(|&l| !oracle.is_subtype(l, ty))
        .collect();
    merged.insert(ty);
    merged
}

/// Merges `ty` into an upper-bound antichain; dual of [`merge_lower`].
pub fn merge_upper<O>(bounds: &BTreeSet<TypeId>, ty: TypeId, oracle: &O) -> BTreeSet<TypeId>
where
    O: SubtypeOracle + ?Sized,
{
    if bounds.iter().any(|&u| oracle.is_subtype(u, ty)) {
        return bounds.clone();
    }
    let mut merged: BTreeSet<TypeId> = bounds
        .iter()
        .copied()
        .filter(|&u| !oracle.is_subtype(ty, u))
        .collect();
    merged.insert(ty);
    merged
}

/// Reduces an arbitrary collection of candidate lower bounds to an antichain.
pub fn reduce_lower<O>(candidates: impl IntoIterator<Item = TypeId>, oracle: &O) -> BTreeSet<TypeId>
where
    O: SubtypeOracle + ?Sized,
{
    let mut bounds = BTreeSet::new();
    for ty in candidates {
        bounds = merge_lower(&bounds, ty, oracle);
    }
    bounds
}

/// Reduces an arbitrary collection of candidate upper bounds to an antichain.
pub fn reduce_upper<O>(candidates: impl IntoIterator<Item = TypeId>, oracle: &O) -> BTreeSet<TypeId>
where
    O: SubtypeOracle + ?Sized,
{
    let mut bounds = BTreeSet::new();
    for ty in candidates {
        bounds = merge_upper(&bounds, ty, oracle);
    }
    bounds
}

/// Checks that every lower bound is below every upper bound.
///
/// A single violated pairing proves the interval denotes no type at all, by
/// transitivity of `<:`.
pub fn consistent<O>(lowers: &BTreeSet<TypeId>, uppers: &BTreeSet<TypeId>, oracle: &O) -> bool
where
    O: SubtypeOracle + ?Sized,
{
    lowers.iter().all(|&l| below_all(l, uppers, oracle))
}
