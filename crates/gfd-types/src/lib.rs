//! Shared types for the GFD geometric construction language.
//!
//! This is the leaf crate of the workspace: the canonical object model
//! ([`Point`], [`Line`], [`Circle`] behind [`Obj`]), the per-run [`Arena`]
//! that deduplicates numerically indistinguishable objects, the
//! [`PropertyStore`] of discovered relations, and the two error families
//! ([`FigureError`] for geometric preconditions, [`ScriptError`] for
//! positioned script failures).

pub mod arena;
pub mod error;
pub mod object;
pub mod relation;

pub use arena::Arena;
pub use error::{FigureError, ScriptError, ScriptErrorKind};
pub use object::{Circle, Line, Obj, ObjId, ObjKind, Point, Provenance, Shape};
pub use relation::{canonical_tuple, PropertyStore, Relation};

/// Coordinates are floating point, so every equality and membership test
/// in the system is an absolute-difference comparison against this bound.
pub const EPSILON: f64 = 1e-5;
