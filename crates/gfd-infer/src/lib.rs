//! Relation closure engine.
//!
//! The post-construction probe only ever sees one call's inputs and
//! outputs, so relations spanning objects that were never jointly passed
//! to a construction stay undiscovered. [`saturate`] derives them from
//! the facts already in the [`PropertyStore`]: each rule family runs to
//! its own fixed point, and the families loop until a full pass adds
//! nothing.
//!
//! Rules combine stored membership only. They never re-run numeric
//! predicates, so they propagate true positives exactly but cannot
//! repair an epsilon check's false negative. Termination follows from
//! every relation set being bounded by the combinatorics of the finite
//! object arena.

use gfd_types::{ObjId, PropertyStore, Relation};
use std::collections::{BTreeMap, BTreeSet};

/// Saturate the store: run all rule families until a global fixed point.
pub fn saturate(store: &mut PropertyStore) {
    loop {
        let mut changed = false;
        changed |= close_parallel_perpendicular(store);
        changed |= close_collinearity(store);
        changed |= close_concurrency(store);
        changed |= close_concyclicity(store);
        changed |= close_tangency(store);
        if !changed {
            break;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────

/// Canonical unordered pair of same-kind objects.
fn pair(a: ObjId, b: ObjId) -> Vec<ObjId> {
    let mut t = vec![a, b];
    t.sort_unstable();
    t
}

/// Binary relation tuples as `(first, second)` pairs.
fn pairs_of(store: &PropertyStore, rel: Relation) -> Vec<(ObjId, ObjId)> {
    store.tuples(rel).map(|t| (t[0], t[1])).collect()
}

/// Index an incidence relation (`[member, container]` tuples) by its
/// container object.
fn by_container(store: &PropertyStore, rel: Relation) -> BTreeMap<ObjId, BTreeSet<ObjId>> {
    let mut map: BTreeMap<ObjId, BTreeSet<ObjId>> = BTreeMap::new();
    for t in store.tuples(rel) {
        map.entry(t[1]).or_default().insert(t[0]);
    }
    map
}

/// Index an incidence relation by its member object.
fn by_member(store: &PropertyStore, rel: Relation) -> BTreeMap<ObjId, BTreeSet<ObjId>> {
    let mut map: BTreeMap<ObjId, BTreeSet<ObjId>> = BTreeMap::new();
    for t in store.tuples(rel) {
        map.entry(t[0]).or_default().insert(t[1]);
    }
    map
}

/// Visit every k-subset of `items`, preserving order (sorted input gives
/// canonical subsets).
fn each_combination(items: &[ObjId], k: usize, f: &mut impl FnMut(&[ObjId])) {
    fn rec<F: FnMut(&[ObjId])>(
        items: &[ObjId],
        k: usize,
        start: usize,
        acc: &mut Vec<ObjId>,
        f: &mut F,
    ) {
        if acc.len() == k {
            f(acc);
            return;
        }
        for i in start..items.len() {
            acc.push(items[i]);
            rec(items, k, i + 1, acc, f);
            acc.pop();
        }
    }
    let mut acc = Vec::with_capacity(k);
    rec(items, k, 0, &mut acc, f);
}

/// Compositions of two symmetric binary facts over their shared pivot.
/// Yields nothing when they share no object; degenerate results (both
/// ends equal) are dropped.
fn compose(p: (ObjId, ObjId), q: (ObjId, ObjId)) -> impl Iterator<Item = (ObjId, ObjId)> {
    let (a, b) = p;
    let (c, d) = q;
    [
        (b == c, (a, d)),
        (b == d, (a, c)),
        (a == c, (b, d)),
        (a == d, (b, c)),
    ]
    .into_iter()
    .filter(|&(shared, (x, y))| shared && x != y)
    .map(|(_, xy)| xy)
}

// ─────────────────────────────────────────────────────────────────────
// Rule families
// ─────────────────────────────────────────────────────────────────────

/// par∘par ⇒ par, perp∘perp ⇒ par, par∘perp ⇒ perp, pivoted on a
/// shared line.
fn close_parallel_perpendicular(store: &mut PropertyStore) -> bool {
    let mut added = false;
    loop {
        let par = pairs_of(store, Relation::Parallel);
        let perp = pairs_of(store, Relation::Perpendicular);
        let mut new = false;
        for &p in &par {
            for &q in &par {
                for (x, y) in compose(p, q) {
                    new |= store.insert(Relation::Parallel, pair(x, y));
                }
            }
        }
        for &p in &perp {
            for &q in &perp {
                for (x, y) in compose(p, q) {
                    new |= store.insert(Relation::Parallel, pair(x, y));
                }
            }
        }
        for &p in &par {
            for &q in &perp {
                for (x, y) in compose(p, q) {
                    new |= store.insert(Relation::Perpendicular, pair(x, y));
                }
            }
        }
        if !new {
            break;
        }
        added = true;
    }
    added
}

fn close_collinearity(store: &mut PropertyStore) -> bool {
    let mut added = false;
    loop {
        let mut new = false;
        let on_line = by_container(store, Relation::PointOnLine);
        // Three points on one line are collinear.
        for pts in on_line.values() {
            let pts: Vec<ObjId> = pts.iter().copied().collect();
            each_combination(&pts, 3, &mut |triple| {
                new |= store.insert(Relation::Collinear, triple.to_vec());
            });
        }
        let triples: Vec<Vec<ObjId>> = store.tuples(Relation::Collinear).cloned().collect();
        // A collinear triple with two members on a line puts the third
        // member on it too.
        for t in &triples {
            for (&line, pts) in &on_line {
                let on: Vec<bool> = t.iter().map(|p| pts.contains(p)).collect();
                if on.iter().filter(|&&b| b).count() == 2 {
                    for (i, &p) in t.iter().enumerate() {
                        if !on[i] {
                            new |= store.insert(Relation::PointOnLine, vec![p, line]);
                        }
                    }
                }
            }
        }
        // Two triples sharing two of four distinct points: every
        // 3-subset of the four is collinear.
        for (i, t1) in triples.iter().enumerate() {
            for t2 in triples.iter().skip(i + 1) {
                let union: BTreeSet<ObjId> = t1.iter().chain(t2.iter()).copied().collect();
                if union.len() == 4 {
                    let four: Vec<ObjId> = union.into_iter().collect();
                    each_combination(&four, 3, &mut |triple| {
                        new |= store.insert(Relation::Collinear, triple.to_vec());
                    });
                }
            }
        }
        if !new {
            break;
        }
        added = true;
    }
    added
}

/// Every 3-subset of the lines through a common point is concurrent.
/// One pass is the fixed point: the rule's input never grows from its
/// own output.
fn close_concurrency(store: &mut PropertyStore) -> bool {
    let mut new = false;
    let through = by_member(store, Relation::PointOnLine);
    for lines in through.values() {
        let lines: Vec<ObjId> = lines.iter().copied().collect();
        each_combination(&lines, 3, &mut |t| {
            new |= store.insert(Relation::Concurrent, t.to_vec());
        });
    }
    new
}

fn close_concyclicity(store: &mut PropertyStore) -> bool {
    let mut added = false;
    loop {
        let mut new = false;
        let on_circle = by_container(store, Relation::PointOnCircle);
        // Four points on one circle are concyclic.
        for pts in on_circle.values() {
            let pts: Vec<ObjId> = pts.iter().copied().collect();
            each_combination(&pts, 4, &mut |quad| {
                new |= store.insert(Relation::Concyclic, quad.to_vec());
            });
        }
        let quads: Vec<Vec<ObjId>> = store.tuples(Relation::Concyclic).cloned().collect();
        // Three members of a concyclic quadruple on a circle put the
        // fourth member on it too.
        for q in &quads {
            for (&circle, pts) in &on_circle {
                let on: Vec<bool> = q.iter().map(|p| pts.contains(p)).collect();
                if on.iter().filter(|&&b| b).count() == 3 {
                    for (i, &p) in q.iter().enumerate() {
                        if !on[i] {
                            new |= store.insert(Relation::PointOnCircle, vec![p, circle]);
                        }
                    }
                }
            }
        }
        new |= perpendicular_diagonals(store);
        // Two quadruples sharing three of five points: every 4-subset of
        // the five is concyclic.
        for (i, q1) in quads.iter().enumerate() {
            for q2 in quads.iter().skip(i + 1) {
                let union: BTreeSet<ObjId> = q1.iter().chain(q2.iter()).copied().collect();
                if union.len() == 5 {
                    let five: Vec<ObjId> = union.into_iter().collect();
                    each_combination(&five, 4, &mut |quad| {
                        new |= store.insert(Relation::Concyclic, quad.to_vec());
                    });
                }
            }
        }
        if !new {
            break;
        }
        added = true;
    }
    added
}

/// Perpendicular-diagonals criterion: two perpendicular line pairs whose
/// four pairwise intersection points are all known give a concyclic
/// quadruple. Opposite vertices see equal angles, so the quadrilateral
/// is cyclic.
fn perpendicular_diagonals(store: &mut PropertyStore) -> bool {
    let mut new = false;
    let perp = pairs_of(store, Relation::Perpendicular);
    let on_line = by_container(store, Relation::PointOnLine);
    let corner = |l1: ObjId, l2: ObjId| -> Vec<ObjId> {
        match (on_line.get(&l1), on_line.get(&l2)) {
            (Some(s1), Some(s2)) => s1.intersection(s2).copied().collect(),
            _ => Vec::new(),
        }
    };
    for (i, &(u, v)) in perp.iter().enumerate() {
        for &(w, x) in perp.iter().skip(i + 1) {
            if u == w || u == x || v == w || v == x {
                continue;
            }
            for &a in &corner(u, w) {
                for &b in &corner(u, x) {
                    for &c in &corner(v, x) {
                        for &d in &corner(v, w) {
                            let quad: BTreeSet<ObjId> = [a, b, c, d].into_iter().collect();
                            if quad.len() == 4 {
                                new |= store
                                    .insert(Relation::Concyclic, quad.into_iter().collect());
                            }
                        }
                    }
                }
            }
        }
    }
    new
}

fn close_tangency(store: &mut PropertyStore) -> bool {
    let mut added = false;
    loop {
        let mut new = false;
        let tangents = pairs_of(store, Relation::LineTangentToCircle);
        let on_line = by_container(store, Relation::PointOnLine);
        let touch_point = |store: &PropertyStore, u: ObjId, s: ObjId, t: ObjId| -> bool {
            on_line.get(&u).is_some_and(|pts| {
                pts.iter().any(|&p| {
                    store.contains(Relation::PointOnCircle, &[p, s])
                        && store.contains(Relation::PointOnCircle, &[p, t])
                })
            })
        };
        // A line tangent to two circles through one shared on-line point
        // makes the circles tangent.
        for (i, &(u, s)) in tangents.iter().enumerate() {
            for &(u2, t) in tangents.iter().skip(i + 1) {
                if u2 != u || s == t {
                    continue;
                }
                if touch_point(store, u, s, t) {
                    new |= store.insert(Relation::CircleTangentToCircle, pair(s, t));
                }
            }
        }
        // Circle-circle tangency plus one line tangency at the shared
        // point transfers the line tangency to the other circle.
        let cc = pairs_of(store, Relation::CircleTangentToCircle);
        for &(s, t) in &cc {
            for &(u, c) in &tangents {
                let other = if c == s {
                    t
                } else if c == t {
                    s
                } else {
                    continue;
                };
                let transfers = touch_point(store, u, s, t);
                if transfers {
                    new |= store.insert(Relation::LineTangentToCircle, vec![u, other]);
                }
            }
        }
        if !new {
            break;
        }
        added = true;
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<u32>) -> Vec<ObjId> {
        range.map(ObjId).collect()
    }

    #[test]
    fn test_each_combination_counts() {
        let items = ids(0..5);
        let mut seen = Vec::new();
        each_combination(&items, 3, &mut |c| seen.push(c.to_vec()));
        assert_eq!(seen.len(), 10);
        assert!(seen.iter().all(|c| c.windows(2).all(|w| w[0] < w[1])));
    }

    #[test]
    fn test_compose_finds_every_pivot() {
        let [a, b, c] = [ObjId(0), ObjId(1), ObjId(2)];
        let derived: Vec<_> = compose((a, b), (b, c)).collect();
        assert_eq!(derived, vec![(a, c)]);
        assert!(compose((a, b), (a, b)).next().is_none());
        assert!(compose((a, b), (c, ObjId(3))).next().is_none());
    }
}
