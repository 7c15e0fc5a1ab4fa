//! The per-run session value: arena + property store + RNG.

use gfd_types::{Arena, Circle, Line, ObjId, Point, PropertyStore, Shape};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One figure under construction. Creating a new `Figure` is the reset
/// between independent runs: nothing is process-global.
#[derive(Debug)]
pub struct Figure {
    pub arena: Arena,
    pub store: PropertyStore,
    rng: StdRng,
}

impl Figure {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            store: PropertyStore::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic figure for tests and reproducible random scripts.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            arena: Arena::new(),
            store: PropertyStore::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Display name of an object, for error messages.
    pub fn name(&self, id: ObjId) -> String {
        self.arena.name(id).to_string()
    }

    // Typed accessors. Callers are type-checked at dispatch, so a kind
    // mismatch here is a bug in the registry tables, not user input.

    pub fn point(&self, id: ObjId) -> Point {
        match self.arena.get(id).shape {
            Shape::Point(p) => p,
            ref other => panic!("object {id} is a {}, expected a point", other.kind()),
        }
    }

    pub fn line(&self, id: ObjId) -> Line {
        match self.arena.get(id).shape {
            Shape::Line(l) => l,
            ref other => panic!("object {id} is a {}, expected a line", other.kind()),
        }
    }

    pub fn circle(&self, id: ObjId) -> Circle {
        match self.arena.get(id).shape {
            Shape::Circle(c) => c,
            ref other => panic!("object {id} is a {}, expected a circle", other.kind()),
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}
