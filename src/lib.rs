//! # typedom-rs: Subtype-Constrained Type Domains in Rust
//!
//! **`typedom-rs`** is a small, dense algebra over *type domains*: immutable
//! values that represent sets of candidate types constrained by the subtype
//! partial order. It is the piece of a feedback-directed test generator
//! that picks a concrete type for an unbound generic type parameter or
//! wildcard once constraints start accumulating.
//!
//! ## What is a type domain?
//!
//! A domain denotes a (possibly empty) set of types drawn from a closed
//! universe with a subtype lattice: a bottom type `⊥` below everything and
//! a top type `⊤` above everything. Constraints like "must implement
//! interface X" or "must be assignable from Y" intersect the domain with a
//! half-space of the lattice; the algebra keeps the result in a canonical,
//! cheaply-comparable form.
//!
//! ## Key Features
//!
//! - **Closed variant set**: [`TypeDomain`][crate::domain::TypeDomain] is a
//!   five-variant enum (`Empty`, `Set`, `Interval`, `DownSum`, `UpSum`)
//!   with exhaustive matching --- no unhandled case can slip through.
//! - **Eager canonicalization**: anything that denotes ∅ *is* `Empty`, and
//!   degenerate sums collapse to their single branch, so equality and
//!   emptiness checks never consult the oracle.
//! - **Antichain bounds**: interval bounds carry no redundant element;
//!   reduction is a single shared routine in [`bounds`].
//! - **Oracle at the seam**: all subtype questions go through the
//!   [`SubtypeOracle`][crate::oracle::SubtypeOracle] trait; the algebra
//!   itself never inspects a type.
//! - **Purely functional**: every operation returns a fresh value; domains
//!   are safe to share across parallel search branches.
//!
//! ## Basic Usage
//!
//! ```rust
//! use typedom_rs::domain::TypeDomain;
//! use typedom_rs::table::TypeTable;
//!
//! // 1. Declare a small universe: Integer <: Number <: Object.
//! let mut table = TypeTable::new();
//! let number = table.declare("Number");
//! let integer = table.declare("Integer");
//! let string = table.declare("String");
//! table.add_supertype(integer, number);
//!
//! // 2. Start from the universal interval [⊥, ⊤].
//! let domain = TypeDomain::universal(&table);
//!
//! // 3. Accumulate constraints.
//! let domain = domain.restrict_down(number, &table); // must be below Number
//! let domain = domain.restrict_up(integer, &table); // must be above Integer
//!
//! // 4. Query.
//! assert!(!domain.is_empty());
//! assert_eq!(domain, TypeDomain::interval(integer, number, &table));
//! assert!(domain.has_supertype_of(integer, &table));
//! assert!(!domain.has_subtype_of(string, &table));
//! ```
//!
//! ## Core Components
//!
//! - **[`domain`]**: the heart of the crate. The [`TypeDomain`][crate::domain::TypeDomain] algebra and its restriction operations.
//! - **[`bounds`]**: antichain insert-and-reduce helpers shared by interval construction and restriction.
//! - **[`typeset`]**: the [`TypeSet`][crate::typeset::TypeSet] closure builder, supplying candidate pools.
//! - **[`table`]**: a declared in-memory universe implementing both oracle traits, for tests and demos.

pub mod bounds;
pub mod domain;
pub mod oracle;
pub mod table;
pub mod types;
pub mod typeset;
