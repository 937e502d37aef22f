//! End-to-end checks of the domain algebra over two closed universes: a
//! boxed-numeric hierarchy (Integer/Number/String with a Comparable
//! instantiation) and a four-interface lattice whose types are named by
//! which interfaces they carry (`A1100` implements `A1000` and `A0100`,
//! and so on down to leaf classes implementing three interfaces each).

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use typedom_rs::domain::TypeDomain;
use typedom_rs::oracle::SubtypeOracle;
use typedom_rs::table::TypeTable;
use typedom_rs::types::TypeId;

use test_log::test;

struct Numbers {
    table: TypeTable,
    number: TypeId,
    integer: TypeId,
    double: TypeId,
    string: TypeId,
    comp_int: TypeId,
}

fn numbers() -> Numbers {
    let mut table = TypeTable::new();
    let comparable = table.declare_generic("Comparable");
    let number = table.declare("Number");
    let integer = table.declare("Integer");
    let double = table.declare("Double");
    let string = table.declare("String");
    let comp_int = table.instantiate(comparable, "Comparable<Integer>");
    table.add_supertype(integer, number);
    table.add_supertype(double, number);
    table.add_supertype(integer, comp_int);
    Numbers {
        table,
        number,
        integer,
        double,
        string,
        comp_int,
    }
}

#[allow(dead_code)]
struct Lattice {
    table: TypeTable,
    a1000: TypeId,
    a0100: TypeId,
    a0010: TypeId,
    a0001: TypeId,
    a1100: TypeId,
    a1010: TypeId,
    a1001: TypeId,
    a0110: TypeId,
    a0101: TypeId,
    a0011: TypeId,
    a1110: TypeId,
    a1101: TypeId,
    a1011: TypeId,
    a0111: TypeId,
}

fn lattice() -> Lattice {
    let mut table = TypeTable::new();
    let a1000 = table.declare("A1000");
    let a0100 = table.declare("A0100");
    let a0010 = table.declare("A0010");
    let a0001 = table.declare("A0001");
    let pairs = [
        ("A1100", a1000, a0100),
        ("A1010", a1000, a0010),
        ("A1001", a1000, a0001),
        ("A0110", a0100, a0010),
        ("A0101", a0100, a0001),
        ("A0011", a0010, a0001),
    ];
    let mut pair_ids = Vec::new();
    for (name, x, y) in pairs {
        let t = table.declare(name);
        table.add_supertype(t, x);
        table.add_supertype(t, y);
        pair_ids.push(t);
    }
    let [a1100, a1010, a1001, a0110, a0101, a0011]: [TypeId; 6] =
        pair_ids.try_into().expect("six pairwise types");
    let leaves = [
        ("A1110", a1100, a1010, a0110),
        ("A1101", a1100, a1001, a0101),
        ("A1011", a1010, a1001, a0011),
        ("A0111", a0110, a0101, a0011),
    ];
    let mut leaf_ids = Vec::new();
    for (name, x, y, z) in leaves {
        let t = table.declare(name);
        table.add_supertype(t, x);
        table.add_supertype(t, y);
        table.add_supertype(t, z);
        leaf_ids.push(t);
    }
    let [a1110, a1101, a1011, a0111]: [TypeId; 4] =
        leaf_ids.try_into().expect("four leaf classes");
    Lattice {
        table,
        a1000,
        a0100,
        a0010,
        a0001,
        a1100,
        a1010,
        a1001,
        a0110,
        a0101,
        a0011,
        a1110,
        a1101,
        a1011,
        a0111,
    }
}

#[test]
fn restrict_down_by_type() {
    let u = numbers();
    let table = &u.table;
    let trivial = TypeDomain::universal(table);
    let int_down = TypeDomain::interval(table.bottom(), u.integer, table);
    assert!(!trivial.is_empty());
    assert!(!int_down.is_empty());

    // [null, Object] down Integer
    assert_eq!(trivial.restrict_down(u.integer, table), int_down);

    // [null, Integer] down Object: no restriction
    assert_eq!(int_down.restrict_down(table.top(), table), int_down);

    // [null, Integer] down String: incomparable bounds accumulate
    let restricted = int_down.restrict_down(u.string, table);
    assert!(!restricted.is_empty());
    assert_eq!(
        restricted,
        TypeDomain::interval_bounds([table.bottom()], [u.string, u.integer], table)
    );

    // [null, Integer] down Comparable<Integer>: implied, no restriction
    assert_eq!(int_down.restrict_down(u.comp_int, table), int_down);

    // [null, Number] down Comparable<Integer>: both bounds stay
    let number_down = TypeDomain::interval(table.bottom(), u.number, table);
    let restricted = number_down.restrict_down(u.comp_int, table);
    assert!(!restricted.is_empty());
    assert_eq!(
        restricted,
        TypeDomain::interval_bounds([table.bottom()], [u.comp_int, u.number], table)
    );

    // [Integer, Number] down String: inconsistent
    let int_to_number = TypeDomain::interval(u.integer, u.number, table);
    assert!(int_to_number.restrict_down(u.string, table).is_empty());
}

#[test]
fn restrict_up_by_type() {
    let u = numbers();
    let table = &u.table;
    let trivial = TypeDomain::universal(table);
    let int_up = TypeDomain::interval(u.integer, table.top(), table);
    assert!(!int_up.is_empty());

    // [null, Object] up Integer
    assert_eq!(trivial.restrict_up(u.integer, table), int_up);

    // [Integer, Object] up null: no restriction
    assert_eq!(int_up.restrict_up(table.bottom(), table), int_up);

    // [Integer, Object] up String
    let restricted = int_up.restrict_up(u.string, table);
    assert!(!restricted.is_empty());
    assert_eq!(
        restricted,
        TypeDomain::interval_bounds([u.string, u.integer], [table.top()], table)
    );

    // [Number, Object] up Comparable<Integer>
    let number_up = TypeDomain::interval(u.number, table.top(), table);
    let restricted = number_up.restrict_up(u.comp_int, table);
    assert!(!restricted.is_empty());
    assert_eq!(
        restricted,
        TypeDomain::interval_bounds([u.comp_int, u.number], [table.top()], table)
    );

    // [Integer, Number] up String: inconsistent
    let int_to_number = TypeDomain::interval(u.integer, u.number, table);
    assert!(int_to_number.restrict_up(u.string, table).is_empty());
}

#[test]
fn restrict_by_interval() {
    let u = numbers();
    let table = &u.table;
    let integer_down = TypeDomain::interval(table.bottom(), u.integer, table);
    let number_down = TypeDomain::interval(table.bottom(), u.number, table);
    let int_to_comp_int = TypeDomain::interval(u.integer, u.comp_int, table);

    // [null, Number] down [Integer, Comparable<Integer>]
    let restricted = number_down.restrict_down_domain(&int_to_comp_int, table);
    let expected = TypeDomain::interval_bounds([u.integer], [u.number, u.comp_int], table);
    assert!(!restricted.is_empty());
    assert_eq!(restricted, expected);

    // ... down [null, Integer] squeezes to the point interval
    let restricted = restricted.restrict_down_domain(&integer_down, table);
    let expected = TypeDomain::interval(u.integer, u.integer, table);
    assert!(!restricted.is_empty());
    assert_eq!(restricted, expected);
    // A point interval enumerates its one member.
    let members: Vec<TypeId> = restricted.iter().expect("enumerable").collect();
    assert_eq!(members, vec![u.integer]);
}

#[test]
fn interval_intersection_is_symmetric() {
    let l = lattice();
    let table = &l.table;
    let a = TypeDomain::interval(l.a1110, l.a1000, table);
    let b = TypeDomain::interval(l.a1101, l.a0100, table);
    let expected =
        TypeDomain::interval_bounds([l.a1110, l.a1101], [l.a1000, l.a0100], table);
    assert!(!expected.is_empty());
    assert_eq!(a.restrict_down_domain(&b, table), expected);
    assert_eq!(a.restrict_up_domain(&b, table), expected);
    assert_eq!(b.restrict_down_domain(&a, table), expected);
    assert_eq!(b.restrict_up_domain(&a, table), expected);
}

#[test]
fn incomparable_leaves_make_empty_intersection() {
    let l = lattice();
    let table = &l.table;
    let a1000_down = TypeDomain::interval(table.bottom(), l.a1000, table);
    let a0111_up = TypeDomain::interval(l.a0111, table.top(), table);
    assert!(a1000_down.restrict_down_domain(&a0111_up, table).is_empty());
    assert!(a1000_down.restrict_up_domain(&a0111_up, table).is_empty());
}

#[test]
fn implied_bounds_leave_interval_unchanged() {
    let l = lattice();
    let table = &l.table;
    let a1100_up = TypeDomain::interval(l.a1100, table.top(), table);
    let a1110_up = TypeDomain::interval(l.a1110, table.top(), table);
    // a1110 <: a1100, so the a1100 lower bound already implies the other.
    let restricted = a1100_up.restrict_down_domain(&a1110_up, table);
    assert!(!restricted.is_empty());
    assert_eq!(restricted, a1100_up);
}

#[test]
fn antichain_bounds_stay_minimal() {
    let l = lattice();
    let table = &l.table;
    let mut domain = TypeDomain::universal(table);
    for bound in [l.a1000, l.a0100, l.a1100, l.a0010, table.top()] {
        domain = domain.restrict_down(bound, table);
        assert_antichains(&domain, table);
    }
    for bound in [l.a1110, table.bottom()] {
        domain = domain.restrict_up(bound, table);
        assert_antichains(&domain, table);
    }
}

fn assert_antichains(domain: &TypeDomain, table: &TypeTable) {
    let TypeDomain::Interval { lowers, uppers } = domain else {
        panic!("expected an interval, got {}", domain);
    };
    for side in [lowers, uppers] {
        for &a in side {
            for &b in side {
                if a != b {
                    assert!(
                        !table.is_subtype(a, b),
                        "redundant bound: {} <: {}",
                        table.name(a),
                        table.name(b)
                    );
                }
            }
        }
    }
}

#[test]
fn set_restriction_scenarios() {
    let u = numbers();
    let table = &u.table;
    // No proper supertype of Object exists among concrete classes.
    let candidates = TypeDomain::set([u.string, u.integer, u.double]);
    assert_eq!(
        candidates.restrict_up(table.top(), table),
        TypeDomain::empty()
    );

    let l = lattice();
    let table = &l.table;
    let singles = TypeDomain::set([l.a1000, l.a0100, l.a0010]);
    let from_a0110 = TypeDomain::set([l.a0110]);
    // A0110 carries A0100 and A0010 but not A1000.
    assert_eq!(
        singles.restrict_up_domain(&from_a0110, table),
        TypeDomain::set([l.a0100, l.a0010])
    );
    // The mirror: which elements of {A0110} fit below each single?
    let pool = TypeDomain::set([l.a0110]);
    let below_singles = pool.restrict_down_domain(&singles, table);
    assert_eq!(below_singles, pool);
}

#[test]
fn restriction_is_idempotent_across_variants() {
    let l = lattice();
    let table = &l.table;
    let set = TypeDomain::set([l.a1110, l.a1101, l.a0111]);
    let interval = TypeDomain::universal(table);
    let sum = TypeDomain::up_sum(BTreeMap::from([
        (l.a1100, TypeDomain::interval(l.a1100, table.top(), table)),
        (l.a0110, TypeDomain::interval(l.a0110, table.top(), table)),
    ]));
    for domain in [set, interval, sum] {
        let once = domain.restrict_down(l.a0100, table);
        assert_eq!(once.restrict_down(l.a0100, table), once);
        let once = domain.restrict_up(l.a0111, table);
        assert_eq!(once.restrict_up(l.a0111, table), once);
    }
}

#[test]
fn sum_collapse_in_the_lattice() {
    let l = lattice();
    let table = &l.table;
    let sum = TypeDomain::up_sum(BTreeMap::from([
        (l.a1000, TypeDomain::interval(l.a1000, table.top(), table)),
        (l.a0100, TypeDomain::interval(l.a0100, table.top(), table)),
    ]));
    assert!(matches!(sum, TypeDomain::UpSum { .. }));
    // Narrowing below A1000 kills the A0100 branch; the survivor unwraps.
    assert_eq!(
        sum.restrict_down(l.a1000, table),
        TypeDomain::interval(l.a1000, l.a1000, table)
    );
    // Narrowing below the bottom type kills both.
    assert_eq!(sum.restrict_down(table.bottom(), table), TypeDomain::empty());
}

#[test]
fn narrowing_to_enumerable_candidates() {
    // The intended end-to-end flow: seed a pool, constrain, enumerate.
    let l = lattice();
    let table = &l.table;
    let leaves = TypeDomain::set([l.a1110, l.a1101, l.a1011, l.a0111]);
    let constraint = TypeDomain::interval(table.bottom(), l.a1100, table);
    let admitted = leaves.restrict_down_domain(&constraint, table);
    assert_eq!(admitted, TypeDomain::set([l.a1110, l.a1101]));
    let members: BTreeSet<TypeId> = admitted.iter().expect("enumerable").collect();
    assert_eq!(members, BTreeSet::from([l.a1110, l.a1101]));
}
