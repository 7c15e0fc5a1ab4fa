//! Relation kinds and the per-run property store.

use crate::arena::Arena;
use crate::object::ObjId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Every relation kind the check functions and the inference engine can
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    PointOnLine,
    PointOnCircle,
    LineTangentToCircle,
    Perpendicular,
    Parallel,
    CircleTangentToCircle,
    Collinear,
    Concyclic,
    Concurrent,
}

impl Relation {
    pub const ALL: [Relation; 9] = [
        Relation::PointOnLine,
        Relation::PointOnCircle,
        Relation::LineTangentToCircle,
        Relation::Perpendicular,
        Relation::Parallel,
        Relation::CircleTangentToCircle,
        Relation::Collinear,
        Relation::Concyclic,
        Relation::Concurrent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PointOnLine => "point on line",
            Self::PointOnCircle => "point on circle",
            Self::LineTangentToCircle => "line tangent to circle",
            Self::Perpendicular => "line perpendicular to line",
            Self::Parallel => "line parallel to line",
            Self::CircleTangentToCircle => "circle tangent to circle",
            Self::Collinear => "collinear points",
            Self::Concyclic => "concyclic points",
            Self::Concurrent => "concurrent lines",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort a tuple of objects into canonical order: kind first, then id.
/// Symmetric relations stored this way never duplicate under argument
/// permutation.
pub fn canonical_tuple(arena: &Arena, ids: &[ObjId]) -> Vec<ObjId> {
    let mut tuple = ids.to_vec();
    tuple.sort_by_key(|&id| (arena.kind(id), id));
    tuple
}

/// Set-valued mapping from relation kind to the tuples known to hold.
/// Scoped to one run; a fresh figure gets a fresh store.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    sets: BTreeMap<Relation, BTreeSet<Vec<ObjId>>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a canonically sorted tuple. Returns `true` if it was new.
    pub fn insert(&mut self, relation: Relation, tuple: Vec<ObjId>) -> bool {
        self.sets.entry(relation).or_default().insert(tuple)
    }

    pub fn contains(&self, relation: Relation, tuple: &[ObjId]) -> bool {
        self.sets
            .get(&relation)
            .is_some_and(|set| set.contains(tuple))
    }

    /// All tuples of one relation, in set order.
    pub fn tuples(&self, relation: Relation) -> impl Iterator<Item = &Vec<ObjId>> {
        self.sets.get(&relation).into_iter().flatten()
    }

    pub fn count(&self, relation: Relation) -> usize {
        self.sets.get(&relation).map_or(0, BTreeSet::len)
    }

    /// Total number of stored tuples across all relations.
    pub fn total(&self) -> usize {
        self.sets.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Point;

    #[test]
    fn test_canonical_tuple_orders_by_kind_then_id() {
        let mut arena = Arena::new();
        let p = arena.point(Point::new(0.0, 0.0));
        let u = arena.line(crate::Line::new(0.0, 1.0, 0.0));
        let q = arena.point(Point::new(1.0, 0.0));
        // Creation order p < u < q, but canonical order is points first.
        assert_eq!(canonical_tuple(&arena, &[u, q, p]), vec![p, q, u]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut arena = Arena::new();
        let a = arena.point(Point::new(0.0, 0.0));
        let b = arena.point(Point::new(1.0, 0.0));
        let c = arena.point(Point::new(2.0, 0.0));
        let mut store = PropertyStore::new();
        let tuple = canonical_tuple(&arena, &[c, a, b]);
        assert!(store.insert(Relation::Collinear, tuple.clone()));
        assert!(!store.insert(Relation::Collinear, tuple));
        assert_eq!(store.count(Relation::Collinear), 1);
    }

    #[test]
    fn test_permutations_collapse_to_one_tuple() {
        let mut arena = Arena::new();
        let a = arena.point(Point::new(0.0, 0.0));
        let b = arena.point(Point::new(1.0, 0.0));
        let c = arena.point(Point::new(2.0, 0.0));
        let mut store = PropertyStore::new();
        for perm in [[a, b, c], [b, a, c], [c, b, a], [b, c, a]] {
            store.insert(Relation::Collinear, canonical_tuple(&arena, &perm));
        }
        assert_eq!(store.count(Relation::Collinear), 1);
    }

    #[test]
    fn test_relations_are_independent_sets() {
        let mut arena = Arena::new();
        let a = arena.point(Point::new(0.0, 0.0));
        let b = arena.point(Point::new(1.0, 0.0));
        let mut store = PropertyStore::new();
        store.insert(Relation::Collinear, vec![a, b]);
        assert_eq!(store.count(Relation::Concyclic), 0);
        assert!(!store.contains(Relation::Concyclic, &[a, b]));
        assert_eq!(store.total(), 1);
    }
}
