//! The construction function library.
//!
//! Every operation is a closed-form formula over its operands' values.
//! Operations compose by calling each other, and every call, nested
//! ones included, finishes through [`finalize`]: provenance is recorded
//! on outputs that do not have one yet, and every check function is
//! probed over the call's combined input/output set. That probing is how
//! implicit relationships (a foot lying on its line, a tangent point on
//! both the line and the circle) enter the property store without being
//! asserted.
//!
//! Preconditions fail fast with a [`FigureError`] before any unsafe
//! algebra runs.

use crate::checks;
use crate::figure::Figure;
use crate::kernel::{
    self, distance_pl, distance_pp, point_at_angle, point_circle_region, line_circle_region,
    circle_circle_region, solve_quadratic, Region,
};
use crate::registry::probe_all;
use gfd_types::{Circle, FigureError, Line, ObjId, Point, EPSILON};
use rand::Rng;
use std::f64::consts::{PI, TAU};

type Result<T> = std::result::Result<T, FigureError>;

/// Post-construction hook: provenance (first recipe wins) plus the
/// combinatorial check probe over inputs and outputs.
fn finalize(fig: &mut Figure, op: &'static str, parents: &[ObjId], outputs: &[ObjId]) {
    for &o in outputs {
        fig.arena.set_provenance_once(o, op, parents);
    }
    let mut combined = parents.to_vec();
    combined.extend_from_slice(outputs);
    combined.sort_unstable();
    combined.dedup();
    probe_all(fig, &combined);
}

/// Canonical point object at a circle's center.
fn center_point(fig: &mut Figure, s: ObjId) -> ObjId {
    let c = fig.circle(s);
    fig.arena.point(c.o)
}

// ─────────────────────────────────────────────────────────────────────
// Generators
// ─────────────────────────────────────────────────────────────────────

/// The fixed reference triangle.
pub fn triangle(fig: &mut Figure) -> Result<(ObjId, ObjId, ObjId)> {
    let a = fig.arena.point(Point::new(-0.256, 0.966));
    let b = fig.arena.point(Point::new(-0.905, -0.426));
    let c = fig.arena.point(Point::new(0.943, -0.333));
    finalize(fig, "triangle", &[], &[a, b, c]);
    Ok((a, b, c))
}

pub fn unit_circle(fig: &mut Figure) -> Result<ObjId> {
    let s = fig.arena.circle(Circle::new(Point::new(0.0, 0.0), 1.0));
    finalize(fig, "unit_circle", &[], &[s]);
    Ok(s)
}

// ─────────────────────────────────────────────────────────────────────
// Random generators (canonicalization-exempt)
// ─────────────────────────────────────────────────────────────────────

fn sample_arc(fig: &mut Figure, s: Circle, a1: f64, a2: f64) -> Point {
    let a1 = a1.rem_euclid(TAU);
    let mut a2 = a2.rem_euclid(TAU);
    if a2 < a1 {
        a2 += TAU;
    }
    let t = a1 + fig.rng().gen::<f64>() * (a2 - a1);
    point_at_angle(s, t)
}

pub fn random_point_on_circle(fig: &mut Figure, s: ObjId) -> Result<ObjId> {
    let c = fig.circle(s);
    let t = fig.rng().gen::<f64>() * TAU;
    let p = fig.arena.fresh_point(point_at_angle(c, t));
    finalize(fig, "random_point_on_circle", &[s], &[p]);
    Ok(p)
}

pub fn random_point_on_unit_circle(fig: &mut Figure) -> Result<ObjId> {
    let s = unit_circle(fig)?;
    let p = random_point_on_circle(fig, s)?;
    finalize(fig, "random_point_on_unit_circle", &[], &[p]);
    Ok(p)
}

pub fn random_point(fig: &mut Figure) -> Result<ObjId> {
    let p = random_point_on_unit_circle(fig)?;
    finalize(fig, "random_point", &[], &[p]);
    Ok(p)
}

pub fn random_point_on_segment(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let (pa, pb) = (fig.point(a), fig.point(b));
    let t = fig.rng().gen::<f64>();
    let p = fig
        .arena
        .fresh_point(Point::new(pa.x + (pb.x - pa.x) * t, pa.y + (pb.y - pa.y) * t));
    finalize(fig, "random_point_on_segment", &[a, b], &[p]);
    Ok(p)
}

/// Random point on the arc from `a` to `b` (counterclockwise) of `s`.
pub fn random_point_on_arc(fig: &mut Figure, s: ObjId, a: ObjId, b: ObjId) -> Result<ObjId> {
    let cs = fig.circle(s);
    let (pa, pb) = (fig.point(a), fig.point(b));
    if !checks::on_circle(pa, cs) {
        return Err(FigureError::PointNotOnCircle(fig.name(a), fig.name(s)));
    }
    if !checks::on_circle(pb, cs) {
        return Err(FigureError::PointNotOnCircle(fig.name(b), fig.name(s)));
    }
    let t1 = kernel::angle_on_circle(cs, pa);
    let t2 = kernel::angle_on_circle(cs, pb);
    let p = sample_arc(fig, cs, t1, t2);
    let p = fig.arena.fresh_point(p);
    finalize(fig, "random_point_on_arc", &[s, a, b], &[p]);
    Ok(p)
}

pub fn random_line(fig: &mut Figure) -> Result<ObjId> {
    let a = random_point(fig)?;
    let b = random_point(fig)?;
    let u = line(fig, a, b)?;
    finalize(fig, "random_line", &[], &[u]);
    Ok(u)
}

pub fn random_line_through_point(fig: &mut Figure, a: ObjId) -> Result<ObjId> {
    let pa = fig.point(a);
    let s = fig.arena.circle(Circle::new(pa, 1.0));
    let b = random_point_on_circle(fig, s)?;
    let u = line(fig, a, b)?;
    finalize(fig, "random_line_through_point", &[a], &[u]);
    Ok(u)
}

pub fn random_circle(fig: &mut Figure) -> Result<ObjId> {
    let a = random_point(fig)?;
    let o = fig.point(a);
    let r = fig.rng().gen::<f64>();
    let s = fig.arena.fresh_circle(Circle::new(o, r));
    finalize(fig, "random_circle", &[], &[s]);
    Ok(s)
}

pub fn random_triangle_on_circle(fig: &mut Figure, s: ObjId) -> Result<(ObjId, ObjId, ObjId)> {
    let a = random_point_on_circle(fig, s)?;
    let b = random_point_on_circle(fig, s)?;
    let c = random_point_on_circle(fig, s)?;
    finalize(fig, "random_triangle_on_circle", &[s], &[a, b, c]);
    Ok((a, b, c))
}

pub fn random_triangle_on_unit_circle(fig: &mut Figure) -> Result<(ObjId, ObjId, ObjId)> {
    let s = unit_circle(fig)?;
    let t = random_triangle_on_circle(fig, s)?;
    finalize(fig, "random_triangle_on_unit_circle", &[], &[t.0, t.1, t.2]);
    Ok(t)
}

/// Random triangle with angles near 60°, 45° and 75°.
pub fn random_nice_triangle(fig: &mut Figure) -> Result<(ObjId, ObjId, ObjId)> {
    let s = unit_circle(fig)?;
    let cs = fig.circle(s);
    let spread = 5.0;
    let deg = PI / 180.0;
    let mut vertex = |center: f64| {
        let p = sample_arc(fig, cs, (center - spread) * deg, (center + spread) * deg);
        fig.arena.fresh_point(p)
    };
    let a = vertex(120.0);
    let b = vertex(210.0);
    let c = vertex(330.0);
    finalize(fig, "random_nice_triangle", &[], &[a, b, c]);
    Ok((a, b, c))
}

// ─────────────────────────────────────────────────────────────────────
// One-object operations
// ─────────────────────────────────────────────────────────────────────

pub fn center(fig: &mut Figure, s: ObjId) -> Result<ObjId> {
    let p = center_point(fig, s);
    finalize(fig, "center", &[s], &[p]);
    Ok(p)
}

// ─────────────────────────────────────────────────────────────────────
// Point-point operations
// ─────────────────────────────────────────────────────────────────────

pub fn midpoint(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let (pa, pb) = (fig.point(a), fig.point(b));
    let m = fig
        .arena
        .point(Point::new((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0));
    finalize(fig, "midpoint", &[a, b], &[m]);
    Ok(m)
}

pub fn line(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let (pa, pb) = (fig.point(a), fig.point(b));
    let u = fig.arena.line(checks::line_through(pa, pb));
    finalize(fig, "line", &[a, b], &[u]);
    Ok(u)
}

pub fn perpendicular_bisector(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let (pa, pb) = (fig.point(a), fig.point(b));
    let u = fig.arena.line(Line::new(
        pa.x - pb.x,
        pa.y - pb.y,
        (pa.x * pa.x + pa.y * pa.y - pb.x * pb.x - pb.y * pb.y) / 2.0,
    ));
    finalize(fig, "perpendicular_bisector", &[a, b], &[u]);
    Ok(u)
}

pub fn circle_diameter(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let m = midpoint(fig, a, b)?;
    let (pa, pb, pm) = (fig.point(a), fig.point(b), fig.point(m));
    let s = fig
        .arena
        .circle(Circle::new(pm, distance_pp(pa, pb) / 2.0));
    finalize(fig, "circle_diameter", &[a, b], &[s]);
    Ok(s)
}

/// Reflection of `a` over `b`.
pub fn reflection_pp(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let (pa, pb) = (fig.point(a), fig.point(b));
    let p = fig
        .arena
        .point(Point::new(2.0 * pb.x - pa.x, 2.0 * pb.y - pa.y));
    finalize(fig, "reflection_pp", &[a, b], &[p]);
    Ok(p)
}

/// Line through `a` perpendicular to `ab`.
pub fn perpendicular_through(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let (pa, pb) = (fig.point(a), fig.point(b));
    let u = fig.arena.line(Line::new(
        pa.x - pb.x,
        pa.y - pb.y,
        pa.x * pa.x + pa.y * pa.y - pa.x * pb.x - pa.y * pb.y,
    ));
    finalize(fig, "perpendicular_through", &[a, b], &[u]);
    Ok(u)
}

/// Circle centered at `a` through `b`.
pub fn circle_centered(fig: &mut Figure, a: ObjId, b: ObjId) -> Result<ObjId> {
    let (pa, pb) = (fig.point(a), fig.point(b));
    let s = fig.arena.circle(Circle::new(pa, distance_pp(pa, pb)));
    finalize(fig, "circle_centered", &[a, b], &[s]);
    Ok(s)
}

// ─────────────────────────────────────────────────────────────────────
// Point-line operations
// ─────────────────────────────────────────────────────────────────────

pub fn reflection_pl(fig: &mut Figure, a: ObjId, u: ObjId) -> Result<ObjId> {
    let f = foot(fig, a, u)?;
    let p = reflection_pp(fig, a, f)?;
    finalize(fig, "reflection_pl", &[a, u], &[p]);
    Ok(p)
}

pub fn foot(fig: &mut Figure, a: ObjId, u: ObjId) -> Result<ObjId> {
    let v = perpendicular_line(fig, a, u)?;
    let p = intersection_ll(fig, u, v)?;
    finalize(fig, "foot", &[a, u], &[p]);
    Ok(p)
}

/// Line through `a` perpendicular to `u`.
pub fn perpendicular_line(fig: &mut Figure, a: ObjId, u: ObjId) -> Result<ObjId> {
    let (pa, lu) = (fig.point(a), fig.line(u));
    let v = fig
        .arena
        .line(Line::new(lu.b, -lu.a, pa.x * lu.b - pa.y * lu.a));
    finalize(fig, "perpendicular_line", &[a, u], &[v]);
    Ok(v)
}

/// Line through `a` parallel to `u`.
pub fn parallel_line(fig: &mut Figure, a: ObjId, u: ObjId) -> Result<ObjId> {
    let (pa, lu) = (fig.point(a), fig.line(u));
    let v = fig
        .arena
        .line(Line::new(lu.a, lu.b, pa.x * lu.a + pa.y * lu.b));
    finalize(fig, "parallel_line", &[a, u], &[v]);
    Ok(v)
}

// ─────────────────────────────────────────────────────────────────────
// Point-circle operations
// ─────────────────────────────────────────────────────────────────────

/// Touch points of the two tangents from `a` to `s`, via the Thales
/// circle over the segment from `a` to the center.
pub fn tangent_points(fig: &mut Figure, a: ObjId, s: ObjId) -> Result<(ObjId, ObjId)> {
    if point_circle_region(fig.point(a), fig.circle(s)) != Region::Outside {
        return Err(FigureError::PointNotOutside(fig.name(a), fig.name(s)));
    }
    let o = center_point(fig, s);
    let thales = circle_diameter(fig, a, o)?;
    let (p1, p2) = intersections_cc(fig, s, thales)?;
    finalize(fig, "tangent_points", &[a, s], &[p1, p2]);
    Ok((p1, p2))
}

pub fn tangent_lines(fig: &mut Figure, a: ObjId, s: ObjId) -> Result<(ObjId, ObjId)> {
    let (p1, p2) = tangent_points(fig, a, s)?;
    let u1 = line(fig, a, p1)?;
    let u2 = line(fig, a, p2)?;
    finalize(fig, "tangent_lines", &[a, s], &[u1, u2]);
    Ok((u1, u2))
}

/// The tangent at a point on the circle.
pub fn tangent_line(fig: &mut Figure, a: ObjId, s: ObjId) -> Result<ObjId> {
    if !checks::on_circle(fig.point(a), fig.circle(s)) {
        return Err(FigureError::PointNotOnCircle(fig.name(a), fig.name(s)));
    }
    let o = center_point(fig, s);
    let u = perpendicular_through(fig, a, o)?;
    finalize(fig, "tangent_line", &[a, s], &[u]);
    Ok(u)
}

/// Polar line of `a` with respect to `s`, via the inverse point.
pub fn polar(fig: &mut Figure, a: ObjId, s: ObjId) -> Result<ObjId> {
    let (pa, cs) = (fig.point(a), fig.circle(s));
    if distance_pp(pa, cs.o) < EPSILON {
        return Err(FigureError::PointIsCenter(fig.name(a), fig.name(s)));
    }
    let d = (cs.r / distance_pp(pa, cs.o)).powi(2);
    let inverse = fig.arena.point(Point::new(
        cs.o.x + d * (pa.x - cs.o.x),
        cs.o.y + d * (pa.y - cs.o.y),
    ));
    let o = center_point(fig, s);
    let u = perpendicular_through(fig, inverse, o)?;
    finalize(fig, "polar", &[a, s], &[u]);
    Ok(u)
}

// ─────────────────────────────────────────────────────────────────────
// Line-line operations
// ─────────────────────────────────────────────────────────────────────

pub fn intersection_ll(fig: &mut Figure, u: ObjId, v: ObjId) -> Result<ObjId> {
    let (lu, lv) = (fig.line(u), fig.line(v));
    if checks::parallel(lu, lv) {
        return Err(FigureError::ParallelLines(fig.name(u), fig.name(v)));
    }
    let p = fig.arena.point(Point::new(
        (lu.c * lv.b - lu.b * lv.c) / (lu.a * lv.b - lu.b * lv.a),
        (lu.c * lv.a - lu.a * lv.c) / (lu.b * lv.a - lu.a * lv.b),
    ));
    finalize(fig, "intersection_ll", &[u, v], &[p]);
    Ok(p)
}

/// One branch of the angle bisectors of `u` and `v` (sum of the
/// normalized equations).
pub fn angle_bisector(fig: &mut Figure, u: ObjId, v: ObjId) -> Result<ObjId> {
    let (lu, lv) = (fig.line(u), fig.line(v));
    let nu = (lu.a * lu.a + lu.b * lu.b).sqrt();
    let nv = (lv.a * lv.a + lv.b * lv.b).sqrt();
    let w = fig.arena.line(Line::new(
        lu.a / nu + lv.a / nv,
        lu.b / nu + lv.b / nv,
        lu.c / nu + lv.c / nv,
    ));
    finalize(fig, "angle_bisector", &[u, v], &[w]);
    Ok(w)
}

/// The other bisector branch (difference of the normalized equations).
pub fn angle_bisector2(fig: &mut Figure, u: ObjId, v: ObjId) -> Result<ObjId> {
    let (lu, lv) = (fig.line(u), fig.line(v));
    let nu = (lu.a * lu.a + lu.b * lu.b).sqrt();
    let nv = (lv.a * lv.a + lv.b * lv.b).sqrt();
    let w = fig.arena.line(Line::new(
        lu.a / nu - lv.a / nv,
        lu.b / nu - lv.b / nv,
        lu.c / nu - lv.c / nv,
    ));
    finalize(fig, "angle_bisector2", &[u, v], &[w]);
    Ok(w)
}

/// Reflection of `u` over `v`.
pub fn reflection_ll(fig: &mut Figure, u: ObjId, v: ObjId) -> Result<ObjId> {
    let i = intersection_ll(fig, u, v)?;
    let p = fig.point(i);
    let (lu, lv) = (fig.line(u), fig.line(v));
    let m = lu.a * lv.b * lv.b - lu.a * lv.a * lv.a - 2.0 * lu.b * lv.a * lv.b;
    let n = lu.b * lv.b * lv.b - lu.b * lv.a * lv.a - 2.0 * lu.a * lv.a * lv.b;
    let w = fig.arena.line(Line::new(m, -n, p.x * m - p.y * n));
    finalize(fig, "reflection_ll", &[u, v], &[w]);
    Ok(w)
}

// ─────────────────────────────────────────────────────────────────────
// Line-circle operations
// ─────────────────────────────────────────────────────────────────────

/// Both intersection points of a secant line with a circle, via the
/// quadratic formula. Solves in x or in y depending on which coordinate
/// the line constrains less, so axis-parallel lines are exact.
pub fn intersections_lc(fig: &mut Figure, u: ObjId, s: ObjId) -> Result<(ObjId, ObjId)> {
    let (lu, cs) = (fig.line(u), fig.circle(s));
    if line_circle_region(lu, cs) != Region::Inside {
        return Err(FigureError::LineMissesCircle(fig.name(u), fig.name(s)));
    }
    let (o, r) = (cs.o, cs.r);
    let qa = lu.a * lu.a + lu.b * lu.b;
    let (first, second) = if lu.b.abs() >= lu.a.abs() {
        let qb = 2.0 * (o.y * lu.a * lu.b - o.x * lu.b * lu.b - lu.a * lu.c);
        let qc = o.x * o.x * lu.b * lu.b + lu.c * lu.c - 2.0 * o.y * lu.b * lu.c
            + o.y * o.y * lu.b * lu.b
            - r * r * lu.b * lu.b;
        // Secancy was checked above; the discriminant is positive.
        let (x1, x2) = solve_quadratic(qa, qb, qc).unwrap_or((o.x, o.x));
        (
            Point::new(x1, (lu.c - lu.a * x1) / lu.b),
            Point::new(x2, (lu.c - lu.a * x2) / lu.b),
        )
    } else {
        let qb = 2.0 * (o.x * lu.a * lu.b - o.y * lu.a * lu.a - lu.b * lu.c);
        let qc = o.y * o.y * lu.a * lu.a + lu.c * lu.c - 2.0 * o.x * lu.a * lu.c
            + o.x * o.x * lu.a * lu.a
            - r * r * lu.a * lu.a;
        let (y1, y2) = solve_quadratic(qa, qb, qc).unwrap_or((o.y, o.y));
        (
            Point::new((lu.c - lu.b * y1) / lu.a, y1),
            Point::new((lu.c - lu.b * y2) / lu.a, y2),
        )
    };
    let p1 = fig.arena.point(first);
    let p2 = fig.arena.point(second);
    finalize(fig, "intersections_lc", &[u, s], &[p1, p2]);
    Ok((p1, p2))
}

/// Tangency point of a line known to touch the circle.
pub fn intersection_lc(fig: &mut Figure, u: ObjId, s: ObjId) -> Result<ObjId> {
    if !checks::tangent_lc(fig.line(u), fig.circle(s)) {
        return Err(FigureError::LineNotTangent(fig.name(u), fig.name(s)));
    }
    let o = center_point(fig, s);
    let p = foot(fig, o, u)?;
    finalize(fig, "intersection_lc", &[u, s], &[p]);
    Ok(p)
}

/// Pole of `u` with respect to `s` (inverse of the foot of the center).
pub fn pole(fig: &mut Figure, u: ObjId, s: ObjId) -> Result<ObjId> {
    let (lu, cs) = (fig.line(u), fig.circle(s));
    if checks::on_line(cs.o, lu) {
        return Err(FigureError::LineThroughCenter(fig.name(u), fig.name(s)));
    }
    let o = center_point(fig, s);
    let f = foot(fig, o, u)?;
    let pf = fig.point(f);
    let d = (cs.r / distance_pl(cs.o, lu)).powi(2);
    let p = fig.arena.point(Point::new(
        cs.o.x + d * (pf.x - cs.o.x),
        cs.o.y + d * (pf.y - cs.o.y),
    ));
    finalize(fig, "pole", &[u, s], &[p]);
    Ok(p)
}

// ─────────────────────────────────────────────────────────────────────
// Circle-circle operations
// ─────────────────────────────────────────────────────────────────────

pub fn radical_axis(fig: &mut Figure, s: ObjId, t: ObjId) -> Result<ObjId> {
    let (cs, ct) = (fig.circle(s), fig.circle(t));
    let u = fig.arena.line(Line::new(
        2.0 * (cs.o.x - ct.o.x),
        2.0 * (cs.o.y - ct.o.y),
        ct.r * ct.r - cs.r * cs.r + cs.o.x * cs.o.x - ct.o.x * ct.o.x + cs.o.y * cs.o.y
            - ct.o.y * ct.o.y,
    ));
    finalize(fig, "radical_axis", &[s, t], &[u]);
    Ok(u)
}

pub fn intersections_cc(fig: &mut Figure, s: ObjId, t: ObjId) -> Result<(ObjId, ObjId)> {
    if circle_circle_region(fig.circle(s), fig.circle(t)) != Region::Inside {
        return Err(FigureError::CirclesDisjoint(fig.name(s), fig.name(t)));
    }
    let u = radical_axis(fig, s, t)?;
    let (p1, p2) = intersections_lc(fig, u, s)?;
    finalize(fig, "intersections_cc", &[s, t], &[p1, p2]);
    Ok((p1, p2))
}

/// Tangency point of two tangent circles.
pub fn intersection_cc(fig: &mut Figure, s: ObjId, t: ObjId) -> Result<ObjId> {
    if !checks::tangent_cc(fig.circle(s), fig.circle(t)) {
        return Err(FigureError::CirclesNotTangent(fig.name(s), fig.name(t)));
    }
    let os = center_point(fig, s);
    let ot = center_point(fig, t);
    let axis = radical_axis(fig, s, t)?;
    let centers = line(fig, os, ot)?;
    let p = intersection_ll(fig, centers, axis)?;
    finalize(fig, "intersection_cc", &[s, t], &[p]);
    Ok(p)
}

/// Intersection of the external tangents (the external homothety
/// center). Undefined for equal radii.
pub fn tangent_intersection_external(fig: &mut Figure, s: ObjId, t: ObjId) -> Result<ObjId> {
    let (cs, ct) = (fig.circle(s), fig.circle(t));
    if (ct.r - cs.r).abs() < EPSILON {
        return Err(FigureError::EqualRadii(fig.name(s), fig.name(t)));
    }
    let p = fig.arena.point(Point::new(
        (cs.o.x * ct.r - ct.o.x * cs.r) / (ct.r - cs.r),
        (cs.o.y * ct.r - ct.o.y * cs.r) / (ct.r - cs.r),
    ));
    finalize(fig, "tangent_intersection_external", &[s, t], &[p]);
    Ok(p)
}

/// The internal homothety center.
pub fn tangent_intersection_internal(fig: &mut Figure, s: ObjId, t: ObjId) -> Result<ObjId> {
    let (cs, ct) = (fig.circle(s), fig.circle(t));
    let p = fig.arena.point(Point::new(
        (cs.o.x * ct.r + ct.o.x * cs.r) / (ct.r + cs.r),
        (cs.o.y * ct.r + ct.o.y * cs.r) / (ct.r + cs.r),
    ));
    finalize(fig, "tangent_intersection_internal", &[s, t], &[p]);
    Ok(p)
}

pub fn tangent_points_external(
    fig: &mut Figure,
    s: ObjId,
    t: ObjId,
) -> Result<(ObjId, ObjId, ObjId, ObjId)> {
    let x = tangent_intersection_external(fig, s, t)?;
    let (p1, p2) = tangent_points(fig, x, s)?;
    let (p3, p4) = tangent_points(fig, x, t)?;
    finalize(fig, "tangent_points_external", &[s, t], &[p1, p2, p3, p4]);
    Ok((p1, p2, p3, p4))
}

pub fn tangent_points_internal(
    fig: &mut Figure,
    s: ObjId,
    t: ObjId,
) -> Result<(ObjId, ObjId, ObjId, ObjId)> {
    let x = tangent_intersection_internal(fig, s, t)?;
    let (p1, p2) = tangent_points(fig, x, s)?;
    let (p3, p4) = tangent_points(fig, x, t)?;
    finalize(fig, "tangent_points_internal", &[s, t], &[p1, p2, p3, p4]);
    Ok((p1, p2, p3, p4))
}

pub fn tangent_lines_external(fig: &mut Figure, s: ObjId, t: ObjId) -> Result<(ObjId, ObjId)> {
    let x = tangent_intersection_external(fig, s, t)?;
    let lines = tangent_lines(fig, x, s)?;
    finalize(fig, "tangent_lines_external", &[s, t], &[lines.0, lines.1]);
    Ok(lines)
}

pub fn tangent_lines_internal(fig: &mut Figure, s: ObjId, t: ObjId) -> Result<(ObjId, ObjId)> {
    let x = tangent_intersection_internal(fig, s, t)?;
    let lines = tangent_lines(fig, x, s)?;
    finalize(fig, "tangent_lines_internal", &[s, t], &[lines.0, lines.1]);
    Ok(lines)
}

// ─────────────────────────────────────────────────────────────────────
// Triangle operations
// ─────────────────────────────────────────────────────────────────────

/// Choose between the two bisector branches of the angle at `a`: the
/// internal one separates `b` from `c`.
fn bisector_branches(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<(ObjId, ObjId)> {
    let ab = line(fig, a, b)?;
    let ac = line(fig, a, c)?;
    let first = angle_bisector(fig, ab, ac)?;
    let second = angle_bisector2(fig, ab, ac)?;
    Ok((first, second))
}

pub fn internal_angle_bisector(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let (first, second) = bisector_branches(fig, a, b, c)?;
    let (pb, pc, l1) = (fig.point(b), fig.point(c), fig.line(first));
    if checks::on_line(pb, l1) {
        return Err(FigureError::PointOnLine(fig.name(b), fig.name(first)));
    }
    if checks::on_line(pc, l1) {
        return Err(FigureError::PointOnLine(fig.name(c), fig.name(first)));
    }
    let picked = if kernel::same_side_of_line(pb, pc, l1) {
        second
    } else {
        first
    };
    finalize(fig, "internal_angle_bisector", &[a, b, c], &[picked]);
    Ok(picked)
}

pub fn external_angle_bisector(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let (first, second) = bisector_branches(fig, a, b, c)?;
    let (pb, pc, l1) = (fig.point(b), fig.point(c), fig.line(first));
    if checks::on_line(pb, l1) {
        return Err(FigureError::PointOnLine(fig.name(b), fig.name(first)));
    }
    if checks::on_line(pc, l1) {
        return Err(FigureError::PointOnLine(fig.name(c), fig.name(first)));
    }
    let picked = if kernel::same_side_of_line(pb, pc, l1) {
        first
    } else {
        second
    };
    finalize(fig, "external_angle_bisector", &[a, b, c], &[picked]);
    Ok(picked)
}

/// Altitude from `a` to `bc`.
pub fn altitude(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let bc = line(fig, b, c)?;
    let u = perpendicular_line(fig, a, bc)?;
    finalize(fig, "altitude", &[a, b, c], &[u]);
    Ok(u)
}

/// Median from `a` to `bc`.
pub fn median(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let m = midpoint(fig, b, c)?;
    let u = line(fig, a, m)?;
    finalize(fig, "median", &[a, b, c], &[u]);
    Ok(u)
}

/// Foot of the altitude from `a` to `bc`.
pub fn foot_ppp(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let bc = line(fig, b, c)?;
    let p = foot(fig, a, bc)?;
    finalize(fig, "foot_ppp", &[a, b, c], &[p]);
    Ok(p)
}

pub fn circumcenter(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let u = perpendicular_bisector(fig, a, b)?;
    let v = perpendicular_bisector(fig, a, c)?;
    let o = intersection_ll(fig, u, v)?;
    finalize(fig, "circumcenter", &[a, b, c], &[o]);
    Ok(o)
}

pub fn circumcircle(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let o = circumcenter(fig, a, b, c)?;
    let r = distance_pp(fig.point(o), fig.point(a));
    let po = fig.point(o);
    let s = fig.arena.circle(Circle::new(po, r));
    finalize(fig, "circumcircle", &[a, b, c], &[s]);
    Ok(s)
}

pub fn incenter(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let u = internal_angle_bisector(fig, b, a, c)?;
    let v = internal_angle_bisector(fig, c, a, b)?;
    let i = intersection_ll(fig, u, v)?;
    finalize(fig, "incenter", &[a, b, c], &[i]);
    Ok(i)
}

pub fn incircle(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let i = incenter(fig, a, b, c)?;
    let bc = line(fig, b, c)?;
    let r = distance_pl(fig.point(i), fig.line(bc));
    let pi = fig.point(i);
    let s = fig.arena.circle(Circle::new(pi, r));
    finalize(fig, "incircle", &[a, b, c], &[s]);
    Ok(s)
}

/// The excenter opposite `a`.
pub fn excenter(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let u = external_angle_bisector(fig, b, c, a)?;
    let v = external_angle_bisector(fig, c, a, b)?;
    let e = intersection_ll(fig, u, v)?;
    finalize(fig, "excenter", &[a, b, c], &[e]);
    Ok(e)
}

/// The excircle opposite `a`.
pub fn excircle(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let e = excenter(fig, a, b, c)?;
    let bc = line(fig, b, c)?;
    let r = distance_pl(fig.point(e), fig.line(bc));
    let pe = fig.point(e);
    let s = fig.arena.circle(Circle::new(pe, r));
    finalize(fig, "excircle", &[a, b, c], &[s]);
    Ok(s)
}

pub fn orthocenter(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let u = altitude(fig, b, c, a)?;
    let v = altitude(fig, c, a, b)?;
    let h = intersection_ll(fig, u, v)?;
    finalize(fig, "orthocenter", &[a, b, c], &[h]);
    Ok(h)
}

pub fn centroid(fig: &mut Figure, a: ObjId, b: ObjId, c: ObjId) -> Result<ObjId> {
    let (pa, pb, pc) = (fig.point(a), fig.point(b), fig.point(c));
    let g = fig.arena.point(Point::new(
        (pa.x + pb.x + pc.x) / 3.0,
        (pa.y + pb.y + pc.y) / 3.0,
    ));
    finalize(fig, "centroid", &[a, b, c], &[g]);
    Ok(g)
}

// ─────────────────────────────────────────────────────────────────────
// Second intersections
// ─────────────────────────────────────────────────────────────────────

/// The intersection of `u` and `s` other than `a`.
pub fn second_intersection_plc(fig: &mut Figure, a: ObjId, u: ObjId, s: ObjId) -> Result<ObjId> {
    let (pa, lu, cs) = (fig.point(a), fig.line(u), fig.circle(s));
    if line_circle_region(lu, cs) != Region::Inside {
        return Err(FigureError::LineMissesCircle(fig.name(u), fig.name(s)));
    }
    if !checks::on_line(pa, lu) {
        return Err(FigureError::PointNotOnLine(fig.name(a), fig.name(u)));
    }
    if !checks::on_circle(pa, cs) {
        return Err(FigureError::PointNotOnCircle(fig.name(a), fig.name(s)));
    }
    let (p1, p2) = intersections_lc(fig, u, s)?;
    let picked = if distance_pp(pa, fig.point(p2)) < EPSILON {
        p1
    } else {
        p2
    };
    finalize(fig, "second_intersection_plc", &[a, u, s], &[picked]);
    Ok(picked)
}

/// The intersection of `s` and `t` other than `a`.
pub fn second_intersection_pcc(fig: &mut Figure, a: ObjId, s: ObjId, t: ObjId) -> Result<ObjId> {
    let (pa, cs, ct) = (fig.point(a), fig.circle(s), fig.circle(t));
    if circle_circle_region(cs, ct) != Region::Inside {
        return Err(FigureError::CirclesDisjoint(fig.name(s), fig.name(t)));
    }
    if !checks::on_circle(pa, cs) {
        return Err(FigureError::PointNotOnCircle(fig.name(a), fig.name(s)));
    }
    if !checks::on_circle(pa, ct) {
        return Err(FigureError::PointNotOnCircle(fig.name(a), fig.name(t)));
    }
    let (p1, p2) = intersections_cc(fig, s, t)?;
    let picked = if distance_pp(pa, fig.point(p2)) < EPSILON {
        p1
    } else {
        p2
    };
    finalize(fig, "second_intersection_pcc", &[a, s, t], &[picked]);
    Ok(picked)
}

/// A midpoint of the arc `ab` on `s` (one endpoint of the diameter
/// perpendicular to the chord).
pub fn midpoint_of_arc(fig: &mut Figure, a: ObjId, b: ObjId, s: ObjId) -> Result<ObjId> {
    let cs = fig.circle(s);
    let (pa, pb) = (fig.point(a), fig.point(b));
    if !checks::on_circle(pa, cs) {
        return Err(FigureError::PointNotOnCircle(fig.name(a), fig.name(s)));
    }
    if !checks::on_circle(pb, cs) {
        return Err(FigureError::PointNotOnCircle(fig.name(b), fig.name(s)));
    }
    let u = perpendicular_bisector(fig, a, b)?;
    let (p, _) = intersections_lc(fig, u, s)?;
    finalize(fig, "midpoint_of_arc", &[a, b, s], &[p]);
    Ok(p)
}
