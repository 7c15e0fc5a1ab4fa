//! The canonical object arena.
//!
//! One arena holds every object of one run. Requesting a point, line or
//! circle that is numerically indistinguishable (within epsilon, by the
//! kind's own equality) from an already-stored object of the same kind
//! returns the existing id instead of allocating.
//!
//! The dedup policy is a strict pairwise epsilon check against the pool
//! in creation order, first match wins; near-boundary chains are *not*
//! transitively merged.

use crate::object::{Circle, Line, Obj, ObjId, ObjKind, Point, Provenance, Shape};

/// Per-run canonical pools for all three kinds, plus identity allocation.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    objs: Vec<Obj>,
}

impl Arena {
    /// Create an empty arena. A fresh arena per run is the reset story:
    /// nothing is shared between independent figures.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }

    pub fn get(&self, id: ObjId) -> &Obj {
        &self.objs[id.index()]
    }

    pub fn kind(&self, id: ObjId) -> ObjKind {
        self.get(id).kind()
    }

    pub fn name(&self, id: ObjId) -> &str {
        &self.get(id).name
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obj> {
        self.objs.iter()
    }

    /// Ids of every object of one kind, in creation order.
    pub fn ids_of_kind(&self, kind: ObjKind) -> impl Iterator<Item = ObjId> + '_ {
        self.objs
            .iter()
            .filter(move |o| o.kind() == kind)
            .map(|o| o.id)
    }

    fn alloc(&mut self, shape: Shape) -> ObjId {
        let id = ObjId(self.objs.len() as u32);
        self.objs.push(Obj {
            id,
            shape,
            name: format!("o_{:03}", id.0),
            provenance: None,
        });
        id
    }

    /// Canonical point: returns the first pooled point within epsilon of
    /// `p`, allocating otherwise.
    pub fn point(&mut self, p: Point) -> ObjId {
        for obj in &self.objs {
            if let Shape::Point(q) = obj.shape {
                if q.close_to(p) {
                    return obj.id;
                }
            }
        }
        self.alloc(Shape::Point(p))
    }

    /// Canonical line, proportionality equality.
    pub fn line(&mut self, l: Line) -> ObjId {
        for obj in &self.objs {
            if let Shape::Line(m) = obj.shape {
                if m.close_to(l) {
                    return obj.id;
                }
            }
        }
        self.alloc(Shape::Line(l))
    }

    /// Canonical circle: center and radius equality.
    pub fn circle(&mut self, c: Circle) -> ObjId {
        for obj in &self.objs {
            if let Shape::Circle(d) = obj.shape {
                if d.close_to(c) {
                    return obj.id;
                }
            }
        }
        self.alloc(Shape::Circle(c))
    }

    /// Allocate a point without the canonical scan. Random generators go
    /// through this so repeated calls can never alias an earlier sample.
    pub fn fresh_point(&mut self, p: Point) -> ObjId {
        self.alloc(Shape::Point(p))
    }

    /// Allocate a circle without the canonical scan.
    pub fn fresh_circle(&mut self, c: Circle) -> ObjId {
        self.alloc(Shape::Circle(c))
    }

    /// Allocate a line without the canonical scan.
    pub fn fresh_line(&mut self, l: Line) -> ObjId {
        self.alloc(Shape::Line(l))
    }

    /// Record the constructing operation for `id` unless it already has
    /// one. Depth is 1 + the deepest parent, 0 with no parents.
    pub fn set_provenance_once(&mut self, id: ObjId, op: &str, parents: &[ObjId]) {
        if self.objs[id.index()].provenance.is_some() {
            return;
        }
        let depth = parents
            .iter()
            .map(|&p| self.get(p).depth() + 1)
            .max()
            .unwrap_or(0);
        self.objs[id.index()].provenance = Some(Provenance {
            op: op.to_string(),
            parents: parents.to_vec(),
            depth,
        });
    }

    /// Bind a display name. Assignment may rename an object that already
    /// carries a synthetic placeholder or an earlier alias.
    pub fn set_name(&mut self, id: ObjId, name: &str) {
        self.objs[id.index()].name = name.to_string();
    }
}
