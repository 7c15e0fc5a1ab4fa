//! Relation predicates.
//!
//! Each predicate is a pure epsilon comparison over value shapes; the
//! recording side (inserting the canonical tuple into the property
//! store) lives in [`crate::registry::run_check`]. Predicates never
//! raise: degenerate input evaluates to `false` (NaN comparisons
//! included), which is the wanted behavior for near-degenerate geometry.

use crate::kernel::{angle, circle_circle_region, distance_pc, distance_pl, Region};
use gfd_types::{Circle, Line, Point, EPSILON};
use std::f64::consts::PI;

/// Line through two points. Degenerate (equal points) yields the zero
/// triple, which no predicate accepts.
pub fn line_through(a: Point, b: Point) -> Line {
    Line::new(b.y - a.y, a.x - b.x, a.x * b.y - a.y * b.x)
}

pub fn on_line(a: Point, u: Line) -> bool {
    distance_pl(a, u) < EPSILON
}

pub fn on_circle(a: Point, s: Circle) -> bool {
    distance_pc(a, s) < EPSILON
}

pub fn tangent_lc(u: Line, s: Circle) -> bool {
    (distance_pl(s.o, u) - s.r).abs() < EPSILON
}

pub fn parallel(u: Line, v: Line) -> bool {
    angle(u, v) < EPSILON
}

pub fn perpendicular(u: Line, v: Line) -> bool {
    PI / 2.0 - angle(u, v) < EPSILON
}

pub fn tangent_cc(s: Circle, t: Circle) -> bool {
    circle_circle_region(s, t) == Region::On
}

pub fn collinear(a: Point, b: Point, c: Point) -> bool {
    distance_pl(a, line_through(b, c)) < EPSILON
}

/// Inscribed-angle test: the chord `bc` subtends equal angles at `a`
/// and `d`, checked from both endpoints.
pub fn concyclic(a: Point, b: Point, c: Point, d: Point) -> bool {
    let at = |p: Point, q: Point, r: Point| angle(line_through(p, q), line_through(p, r));
    (at(a, b, c) - at(d, b, c)).abs() < EPSILON && (at(b, a, c) - at(d, a, c)).abs() < EPSILON
}

/// 3×3 coefficient determinant vanishes iff the lines meet in a point
/// (or are mutually parallel, which the epsilon keeps out for
/// non-degenerate input).
pub fn concurrent(u: Line, v: Line, w: Line) -> bool {
    (u.a * v.c * w.b + u.b * v.a * w.c + u.c * v.b * w.a
        - u.a * v.b * w.c
        - u.b * v.c * w.a
        - u.c * v.a * w.b)
        .abs()
        < EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collinear() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1.0);
        assert!(collinear(a, b, Point::new(2.0, 2.0)));
        assert!(!collinear(a, b, Point::new(2.0, 2.1)));
    }

    #[test]
    fn test_collinear_degenerate_is_false() {
        let a = Point::new(0.0, 0.0);
        // b == c: no line, NaN distance, must be false rather than a panic.
        assert!(!collinear(a, Point::new(1.0, 1.0), Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_concyclic_on_unit_circle() {
        let p = |t: f64| Point::new(t.cos(), t.sin());
        assert!(concyclic(p(0.3), p(1.2), p(2.8), p(4.4)));
        assert!(!concyclic(p(0.3), p(1.2), p(2.8), Point::new(0.5, 0.1)));
    }

    #[test]
    fn test_concurrent() {
        // Three lines through (1, 1).
        let u = Line::new(1.0, 0.0, 1.0);
        let v = Line::new(0.0, 1.0, 1.0);
        let w = Line::new(1.0, 1.0, 2.0);
        assert!(concurrent(u, v, w));
        assert!(!concurrent(u, v, Line::new(1.0, 1.0, 2.5)));
    }

    #[test]
    fn test_parallel_and_perpendicular() {
        let u = Line::new(1.0, 2.0, 0.0);
        assert!(parallel(u, Line::new(2.0, 4.0, 5.0)));
        assert!(perpendicular(u, Line::new(2.0, -1.0, 3.0)));
        assert!(!parallel(u, Line::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_tangencies() {
        let s = Circle::new(Point::new(0.0, 0.0), 1.0);
        assert!(tangent_lc(Line::new(0.0, 1.0, 1.0), s));
        assert!(!tangent_lc(Line::new(0.0, 1.0, 0.5), s));
        let t = Circle::new(Point::new(3.0, 0.0), 2.0);
        assert!(tangent_cc(s, t));
        // Internal tangency, in both argument orders.
        let inner = Circle::new(Point::new(0.5, 0.0), 0.5);
        assert!(tangent_cc(s, inner));
        assert!(tangent_cc(inner, s));
    }
}
