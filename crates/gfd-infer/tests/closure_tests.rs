//! Closure engine tests.
//!
//! Stores are seeded by hand: the engine combines stored membership
//! only, so the numeric shapes behind the ids are irrelevant; the
//! arena exists to give every id its kind and canonical order.

use gfd_infer::saturate;
use gfd_types::{canonical_tuple, Arena, Circle, Line, ObjId, Point, PropertyStore, Relation};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn points(arena: &mut Arena, n: u32) -> Vec<ObjId> {
    (0..n)
        .map(|i| arena.point(Point::new(f64::from(i), 1.0)))
        .collect()
}

fn lines(arena: &mut Arena, n: u32) -> Vec<ObjId> {
    (0..n)
        .map(|i| arena.line(Line::new(1.0, f64::from(i + 2), 0.0)))
        .collect()
}

fn circles(arena: &mut Arena, n: u32) -> Vec<ObjId> {
    (0..n)
        .map(|i| arena.circle(Circle::new(Point::new(0.0, 0.0), f64::from(i + 1))))
        .collect()
}

fn seed(store: &mut PropertyStore, arena: &Arena, rel: Relation, tuple: &[ObjId]) {
    store.insert(rel, canonical_tuple(arena, tuple));
}

// ─────────────────────────────────────────────────────────────────────
// Collinearity
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_three_points_on_a_line_are_collinear() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 3);
    let u = lines(&mut arena, 1)[0];
    let mut store = PropertyStore::new();
    for &a in &p {
        seed(&mut store, &arena, Relation::PointOnLine, &[a, u]);
    }
    saturate(&mut store);
    assert_eq!(store.count(Relation::Collinear), 1);
    assert!(store.contains(Relation::Collinear, &canonical_tuple(&arena, &p)));
}

#[test]
fn test_fourth_point_extends_the_collinear_family() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 4);
    let u = lines(&mut arena, 1)[0];
    let mut store = PropertyStore::new();
    for &a in &p[..3] {
        seed(&mut store, &arena, Relation::PointOnLine, &[a, u]);
    }
    saturate(&mut store);
    assert_eq!(store.count(Relation::Collinear), 1);
    seed(&mut store, &arena, Relation::PointOnLine, &[p[3], u]);
    saturate(&mut store);
    // Every 3-subset of the four points.
    assert_eq!(store.count(Relation::Collinear), 4);
    assert!(store.contains(
        Relation::Collinear,
        &canonical_tuple(&arena, &[p[0], p[1], p[3]])
    ));
}

#[test]
fn test_collinear_triple_puts_third_point_on_line() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 3);
    let u = lines(&mut arena, 1)[0];
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Collinear, &p);
    seed(&mut store, &arena, Relation::PointOnLine, &[p[0], u]);
    seed(&mut store, &arena, Relation::PointOnLine, &[p[1], u]);
    saturate(&mut store);
    assert!(store.contains(
        Relation::PointOnLine,
        &canonical_tuple(&arena, &[p[2], u])
    ));
}

#[test]
fn test_overlapping_triples_merge() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 4);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Collinear, &[p[0], p[1], p[2]]);
    seed(&mut store, &arena, Relation::Collinear, &[p[1], p[2], p[3]]);
    saturate(&mut store);
    assert_eq!(store.count(Relation::Collinear), 4);
    assert!(store.contains(
        Relation::Collinear,
        &canonical_tuple(&arena, &[p[0], p[1], p[3]])
    ));
}

#[test]
fn test_disjoint_triples_do_not_merge() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 5);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Collinear, &[p[0], p[1], p[2]]);
    // Shares only one point with the first triple.
    seed(&mut store, &arena, Relation::Collinear, &[p[2], p[3], p[4]]);
    saturate(&mut store);
    assert_eq!(store.count(Relation::Collinear), 2);
}

// ─────────────────────────────────────────────────────────────────────
// Parallel / perpendicular
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_parallel_is_transitive() {
    let mut arena = Arena::new();
    let l = lines(&mut arena, 3);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Parallel, &[l[0], l[1]]);
    seed(&mut store, &arena, Relation::Parallel, &[l[1], l[2]]);
    saturate(&mut store);
    assert!(store.contains(
        Relation::Parallel,
        &canonical_tuple(&arena, &[l[0], l[2]])
    ));
}

#[test]
fn test_two_perpendiculars_make_a_parallel() {
    let mut arena = Arena::new();
    let l = lines(&mut arena, 3);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Perpendicular, &[l[0], l[1]]);
    seed(&mut store, &arena, Relation::Perpendicular, &[l[1], l[2]]);
    saturate(&mut store);
    assert!(store.contains(
        Relation::Parallel,
        &canonical_tuple(&arena, &[l[0], l[2]])
    ));
    assert_eq!(store.count(Relation::Perpendicular), 2);
}

#[test]
fn test_parallel_then_perpendicular_chains() {
    let mut arena = Arena::new();
    let l = lines(&mut arena, 4);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Parallel, &[l[0], l[1]]);
    seed(&mut store, &arena, Relation::Perpendicular, &[l[1], l[2]]);
    seed(&mut store, &arena, Relation::Parallel, &[l[2], l[3]]);
    saturate(&mut store);
    assert!(store.contains(
        Relation::Perpendicular,
        &canonical_tuple(&arena, &[l[0], l[2]])
    ));
    assert!(store.contains(
        Relation::Perpendicular,
        &canonical_tuple(&arena, &[l[0], l[3]])
    ));
}

// ─────────────────────────────────────────────────────────────────────
// Concurrency
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_lines_through_a_common_point_are_concurrent() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 1)[0];
    let l = lines(&mut arena, 4);
    let mut store = PropertyStore::new();
    for &u in &l {
        seed(&mut store, &arena, Relation::PointOnLine, &[p, u]);
    }
    saturate(&mut store);
    // C(4, 3) triples.
    assert_eq!(store.count(Relation::Concurrent), 4);
}

// ─────────────────────────────────────────────────────────────────────
// Concyclicity
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_points_on_a_circle_are_concyclic() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 5);
    let s = circles(&mut arena, 1)[0];
    let mut store = PropertyStore::new();
    for &a in &p {
        seed(&mut store, &arena, Relation::PointOnCircle, &[a, s]);
    }
    saturate(&mut store);
    // C(5, 4) quadruples.
    assert_eq!(store.count(Relation::Concyclic), 5);
}

#[test]
fn test_concyclic_quadruple_puts_fourth_point_on_circle() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 4);
    let s = circles(&mut arena, 1)[0];
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Concyclic, &p);
    for &a in &p[..3] {
        seed(&mut store, &arena, Relation::PointOnCircle, &[a, s]);
    }
    saturate(&mut store);
    assert!(store.contains(
        Relation::PointOnCircle,
        &canonical_tuple(&arena, &[p[3], s])
    ));
}

#[test]
fn test_overlapping_quadruples_merge() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 5);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Concyclic, &[p[0], p[1], p[2], p[3]]);
    seed(&mut store, &arena, Relation::Concyclic, &[p[1], p[2], p[3], p[4]]);
    saturate(&mut store);
    // Every 4-subset of the five points.
    assert_eq!(store.count(Relation::Concyclic), 5);
    assert!(store.contains(
        Relation::Concyclic,
        &canonical_tuple(&arena, &[p[0], p[1], p[2], p[4]])
    ));
}

#[test]
fn test_perpendicular_diagonals_give_a_concyclic_quadruple() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 4);
    let l = lines(&mut arena, 4);
    let (u, v, w, x) = (l[0], l[1], l[2], l[3]);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::Perpendicular, &[u, v]);
    seed(&mut store, &arena, Relation::Perpendicular, &[w, x]);
    // p0 = u∩w, p1 = u∩x, p2 = v∩x, p3 = v∩w.
    for (a, ls) in [(p[0], [u, w]), (p[1], [u, x]), (p[2], [v, x]), (p[3], [v, w])] {
        for line in ls {
            seed(&mut store, &arena, Relation::PointOnLine, &[a, line]);
        }
    }
    saturate(&mut store);
    assert!(store.contains(Relation::Concyclic, &canonical_tuple(&arena, &p)));
}

// ─────────────────────────────────────────────────────────────────────
// Tangency
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_shared_touch_point_makes_circles_tangent() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 1)[0];
    let u = lines(&mut arena, 1)[0];
    let s = circles(&mut arena, 2);
    let mut store = PropertyStore::new();
    for &c in &s {
        seed(&mut store, &arena, Relation::LineTangentToCircle, &[u, c]);
        seed(&mut store, &arena, Relation::PointOnCircle, &[p, c]);
    }
    seed(&mut store, &arena, Relation::PointOnLine, &[p, u]);
    saturate(&mut store);
    assert!(store.contains(
        Relation::CircleTangentToCircle,
        &canonical_tuple(&arena, &s)
    ));
}

#[test]
fn test_tangency_does_not_fire_without_the_shared_point() {
    let mut arena = Arena::new();
    let u = lines(&mut arena, 1)[0];
    let s = circles(&mut arena, 2);
    let mut store = PropertyStore::new();
    for &c in &s {
        seed(&mut store, &arena, Relation::LineTangentToCircle, &[u, c]);
    }
    saturate(&mut store);
    assert_eq!(store.count(Relation::CircleTangentToCircle), 0);
}

#[test]
fn test_line_tangency_transfers_across_circle_tangency() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 1)[0];
    let u = lines(&mut arena, 1)[0];
    let s = circles(&mut arena, 2);
    let mut store = PropertyStore::new();
    seed(&mut store, &arena, Relation::CircleTangentToCircle, &s);
    seed(&mut store, &arena, Relation::LineTangentToCircle, &[u, s[0]]);
    seed(&mut store, &arena, Relation::PointOnLine, &[p, u]);
    for &c in &s {
        seed(&mut store, &arena, Relation::PointOnCircle, &[p, c]);
    }
    saturate(&mut store);
    assert!(store.contains(
        Relation::LineTangentToCircle,
        &canonical_tuple(&arena, &[u, s[1]])
    ));
}

// ─────────────────────────────────────────────────────────────────────
// Fixed point
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_saturation_is_idempotent() {
    let mut arena = Arena::new();
    let p = points(&mut arena, 4);
    let u = lines(&mut arena, 2);
    let s = circles(&mut arena, 1)[0];
    let mut store = PropertyStore::new();
    for &a in &p {
        seed(&mut store, &arena, Relation::PointOnLine, &[a, u[0]]);
        seed(&mut store, &arena, Relation::PointOnCircle, &[a, s]);
    }
    seed(&mut store, &arena, Relation::Perpendicular, &[u[0], u[1]]);
    saturate(&mut store);
    let after_first = store.total();
    saturate(&mut store);
    assert_eq!(store.total(), after_first);
}
