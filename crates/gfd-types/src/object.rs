//! The geometric object model: identity, kind tags, value shapes and
//! construction provenance.

use crate::EPSILON;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an object within one run's [`crate::Arena`].
///
/// Ids are dense and monotonically increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjId(pub u32);

impl ObjId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag. The discriminant doubles as the output-ordering key:
/// points render before lines, lines before circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjKind {
    Point = 0,
    Line = 1,
    Circle = 2,
}

impl fmt::Display for ObjKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "point"),
            Self::Line => write!(f, "line"),
            Self::Circle => write!(f, "circle"),
        }
    }
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise epsilon equality.
    pub fn close_to(self, other: Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

/// A line as the implicit equation `a·x + b·y = c`.
///
/// The triple is homogeneous: any nonzero scalar multiple describes the
/// same line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Signed residual of a point in this line's equation:
    /// `a·x + b·y − c`. Zero iff the point lies on the line.
    pub fn eval(self, p: Point) -> f64 {
        self.a * p.x + self.b * p.y - self.c
    }

    /// Epsilon equality up to scale. Cross-product proportionality is
    /// used instead of coefficient ratios so zero coefficients
    /// (axis-parallel lines, lines through the origin) never divide by
    /// zero.
    pub fn close_to(self, other: Line) -> bool {
        (self.a * other.b - other.a * self.b).abs() < EPSILON
            && (self.a * other.c - other.a * self.c).abs() < EPSILON
            && (self.b * other.c - other.b * self.c).abs() < EPSILON
    }
}

/// A circle as center and radius, `r >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub o: Point,
    pub r: f64,
}

impl Circle {
    pub fn new(o: Point, r: f64) -> Self {
        Self { o, r }
    }

    /// Center within epsilon component-wise and radius within epsilon.
    pub fn close_to(self, other: Circle) -> bool {
        self.o.close_to(other.o) && (self.r - other.r).abs() < EPSILON
    }
}

/// The closed union of value shapes behind an [`Obj`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Point(Point),
    Line(Line),
    Circle(Circle),
}

impl Shape {
    pub fn kind(&self) -> ObjKind {
        match self {
            Self::Point(_) => ObjKind::Point,
            Self::Line(_) => ObjKind::Line,
            Self::Circle(_) => ObjKind::Circle,
        }
    }
}

/// How an object came to exist: the construction operation, its ordered
/// inputs, and the derivation depth (1 + max parent depth, 0 for
/// parentless primitives).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub op: String,
    pub parents: Vec<ObjId>,
    pub depth: u32,
}

/// A geometric object: identity, value, display name, provenance.
///
/// Objects are immutable after creation except for the display name
/// (bound by script assignment) and the provenance, which is set at most
/// once; re-deriving a canonical object keeps its first recipe.
#[derive(Debug, Clone, Serialize)]
pub struct Obj {
    pub id: ObjId,
    pub shape: Shape,
    pub name: String,
    pub provenance: Option<Provenance>,
}

impl Obj {
    pub fn kind(&self) -> ObjKind {
        self.shape.kind()
    }

    /// Sort key for canonical ordering: kind first, then creation order.
    pub fn criteria(&self) -> (ObjKind, ObjId) {
        (self.kind(), self.id)
    }

    pub fn depth(&self) -> u32 {
        self.provenance.as_ref().map_or(0, |p| p.depth)
    }
}
