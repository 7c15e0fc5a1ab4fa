//! Name-indexed dispatch tables for construction and check functions,
//! and the post-construction probe.
//!
//! The tables are static: operation name → (ordered operand kinds,
//! function), resolved once when a [`Registry`] is built and immutable
//! afterwards. The evaluator type-checks operands against the declared
//! kinds before calling in, so the adapters can index their argument
//! slices directly.

use crate::checks;
use crate::construct;
use crate::figure::Figure;
use gfd_types::{canonical_tuple, FigureError, ObjId, ObjKind, Relation};
use std::collections::BTreeMap;

/// Declared operand kind of one parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Point,
    Line,
    Circle,
    Any,
}

impl ParamKind {
    pub fn matches(self, kind: ObjKind) -> bool {
        match self {
            Self::Point => kind == ObjKind::Point,
            Self::Line => kind == ObjKind::Line,
            Self::Circle => kind == ObjKind::Circle,
            Self::Any => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Any => "object",
        }
    }
}

type ConstructFn = fn(&mut Figure, &[ObjId]) -> Result<Vec<ObjId>, FigureError>;
type CheckFn = fn(&Figure, &[ObjId]) -> bool;

/// One registered construction operation.
pub struct ConstructionDef {
    pub name: &'static str,
    pub params: &'static [ParamKind],
    /// Number of objects the operation pushes.
    pub outputs: usize,
    run: ConstructFn,
}

impl ConstructionDef {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Run the operation. `args` must already be kind-checked against
    /// `params`.
    pub fn call(&self, fig: &mut Figure, args: &[ObjId]) -> Result<Vec<ObjId>, FigureError> {
        debug_assert_eq!(args.len(), self.arity());
        (self.run)(fig, args)
    }
}

/// One registered check function.
pub struct CheckDef {
    pub name: &'static str,
    pub params: &'static [ParamKind],
    pub relation: Relation,
    test: CheckFn,
}

impl CheckDef {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Evaluate a check and, when it holds, record the canonically sorted
/// tuple in the property store. Recording is idempotent.
pub fn run_check(fig: &mut Figure, def: &CheckDef, args: &[ObjId]) -> bool {
    let holds = (def.test)(fig, args);
    if holds {
        let tuple = canonical_tuple(&fig.arena, args);
        fig.store.insert(def.relation, tuple);
    }
    holds
}

/// Probe every check function over every type-matching combination of
/// pairwise-distinct objects drawn from `objs`.
pub fn probe_all(fig: &mut Figure, objs: &[ObjId]) {
    for def in CHECKS {
        let mut chosen = Vec::with_capacity(def.arity());
        probe_slot(fig, def, objs, &mut chosen);
    }
}

fn probe_slot(fig: &mut Figure, def: &CheckDef, objs: &[ObjId], chosen: &mut Vec<ObjId>) {
    if chosen.len() == def.arity() {
        run_check(fig, def, chosen);
        return;
    }
    let wanted = def.params[chosen.len()];
    for &o in objs {
        if !wanted.matches(fig.arena.kind(o)) || chosen.contains(&o) {
            continue;
        }
        chosen.push(o);
        probe_slot(fig, def, objs, chosen);
        chosen.pop();
    }
}

const P: ParamKind = ParamKind::Point;
const L: ParamKind = ParamKind::Line;
const C: ParamKind = ParamKind::Circle;

macro_rules! one {
    ($f:path $(, $i:expr)*) => {
        |fig, args| $f(fig $(, args[$i])*).map(|o| vec![o])
    };
}

/// The standard construction library.
#[rustfmt::skip]
pub static CONSTRUCTIONS: &[ConstructionDef] = &[
    // Generators.
    ConstructionDef { name: "triangle", params: &[], outputs: 3,
        run: |fig, _| construct::triangle(fig).map(|(a, b, c)| vec![a, b, c]) },
    ConstructionDef { name: "unit_circle", params: &[], outputs: 1,
        run: |fig, _| construct::unit_circle(fig).map(|s| vec![s]) },
    // Random generators.
    ConstructionDef { name: "random_point", params: &[], outputs: 1,
        run: |fig, _| construct::random_point(fig).map(|p| vec![p]) },
    ConstructionDef { name: "random_point_on_unit_circle", params: &[], outputs: 1,
        run: |fig, _| construct::random_point_on_unit_circle(fig).map(|p| vec![p]) },
    ConstructionDef { name: "random_point_on_circle", params: &[C], outputs: 1,
        run: one!(construct::random_point_on_circle, 0) },
    ConstructionDef { name: "random_point_on_segment", params: &[P, P], outputs: 1,
        run: one!(construct::random_point_on_segment, 0, 1) },
    ConstructionDef { name: "random_point_on_arc", params: &[C, P, P], outputs: 1,
        run: one!(construct::random_point_on_arc, 0, 1, 2) },
    ConstructionDef { name: "random_line", params: &[], outputs: 1,
        run: |fig, _| construct::random_line(fig).map(|u| vec![u]) },
    ConstructionDef { name: "random_line_through_point", params: &[P], outputs: 1,
        run: one!(construct::random_line_through_point, 0) },
    ConstructionDef { name: "random_circle", params: &[], outputs: 1,
        run: |fig, _| construct::random_circle(fig).map(|s| vec![s]) },
    ConstructionDef { name: "random_triangle_on_circle", params: &[C], outputs: 3,
        run: |fig, args| construct::random_triangle_on_circle(fig, args[0]).map(|(a, b, c)| vec![a, b, c]) },
    ConstructionDef { name: "random_triangle_on_unit_circle", params: &[], outputs: 3,
        run: |fig, _| construct::random_triangle_on_unit_circle(fig).map(|(a, b, c)| vec![a, b, c]) },
    ConstructionDef { name: "random_nice_triangle", params: &[], outputs: 3,
        run: |fig, _| construct::random_nice_triangle(fig).map(|(a, b, c)| vec![a, b, c]) },
    // Circle.
    ConstructionDef { name: "center", params: &[C], outputs: 1,
        run: one!(construct::center, 0) },
    // Point-point.
    ConstructionDef { name: "midpoint", params: &[P, P], outputs: 1,
        run: one!(construct::midpoint, 0, 1) },
    ConstructionDef { name: "line", params: &[P, P], outputs: 1,
        run: one!(construct::line, 0, 1) },
    ConstructionDef { name: "perpendicular_bisector", params: &[P, P], outputs: 1,
        run: one!(construct::perpendicular_bisector, 0, 1) },
    ConstructionDef { name: "circle_diameter", params: &[P, P], outputs: 1,
        run: one!(construct::circle_diameter, 0, 1) },
    ConstructionDef { name: "reflection_pp", params: &[P, P], outputs: 1,
        run: one!(construct::reflection_pp, 0, 1) },
    ConstructionDef { name: "perpendicular_through", params: &[P, P], outputs: 1,
        run: one!(construct::perpendicular_through, 0, 1) },
    ConstructionDef { name: "circle_centered", params: &[P, P], outputs: 1,
        run: one!(construct::circle_centered, 0, 1) },
    // Point-line.
    ConstructionDef { name: "reflection_pl", params: &[P, L], outputs: 1,
        run: one!(construct::reflection_pl, 0, 1) },
    ConstructionDef { name: "foot", params: &[P, L], outputs: 1,
        run: one!(construct::foot, 0, 1) },
    ConstructionDef { name: "perpendicular_line", params: &[P, L], outputs: 1,
        run: one!(construct::perpendicular_line, 0, 1) },
    ConstructionDef { name: "parallel_line", params: &[P, L], outputs: 1,
        run: one!(construct::parallel_line, 0, 1) },
    // Point-circle.
    ConstructionDef { name: "tangent_points", params: &[P, C], outputs: 2,
        run: |fig, args| construct::tangent_points(fig, args[0], args[1]).map(|(a, b)| vec![a, b]) },
    ConstructionDef { name: "tangent_lines", params: &[P, C], outputs: 2,
        run: |fig, args| construct::tangent_lines(fig, args[0], args[1]).map(|(u, v)| vec![u, v]) },
    ConstructionDef { name: "tangent_line", params: &[P, C], outputs: 1,
        run: one!(construct::tangent_line, 0, 1) },
    ConstructionDef { name: "polar", params: &[P, C], outputs: 1,
        run: one!(construct::polar, 0, 1) },
    // Line-line.
    ConstructionDef { name: "intersection_ll", params: &[L, L], outputs: 1,
        run: one!(construct::intersection_ll, 0, 1) },
    ConstructionDef { name: "angle_bisector", params: &[L, L], outputs: 1,
        run: one!(construct::angle_bisector, 0, 1) },
    ConstructionDef { name: "angle_bisector2", params: &[L, L], outputs: 1,
        run: one!(construct::angle_bisector2, 0, 1) },
    ConstructionDef { name: "reflection_ll", params: &[L, L], outputs: 1,
        run: one!(construct::reflection_ll, 0, 1) },
    // Line-circle.
    ConstructionDef { name: "intersections_lc", params: &[L, C], outputs: 2,
        run: |fig, args| construct::intersections_lc(fig, args[0], args[1]).map(|(a, b)| vec![a, b]) },
    ConstructionDef { name: "intersection_lc", params: &[L, C], outputs: 1,
        run: one!(construct::intersection_lc, 0, 1) },
    ConstructionDef { name: "tangent_point", params: &[L, C], outputs: 1,
        run: one!(construct::intersection_lc, 0, 1) },
    ConstructionDef { name: "pole", params: &[L, C], outputs: 1,
        run: one!(construct::pole, 0, 1) },
    // Circle-circle.
    ConstructionDef { name: "radical_axis", params: &[C, C], outputs: 1,
        run: one!(construct::radical_axis, 0, 1) },
    ConstructionDef { name: "intersections_cc", params: &[C, C], outputs: 2,
        run: |fig, args| construct::intersections_cc(fig, args[0], args[1]).map(|(a, b)| vec![a, b]) },
    ConstructionDef { name: "intersection_cc", params: &[C, C], outputs: 1,
        run: one!(construct::intersection_cc, 0, 1) },
    ConstructionDef { name: "tangent_intersection_external", params: &[C, C], outputs: 1,
        run: one!(construct::tangent_intersection_external, 0, 1) },
    ConstructionDef { name: "tangent_intersection_internal", params: &[C, C], outputs: 1,
        run: one!(construct::tangent_intersection_internal, 0, 1) },
    ConstructionDef { name: "tangent_points_external", params: &[C, C], outputs: 4,
        run: |fig, args| construct::tangent_points_external(fig, args[0], args[1]).map(|(a, b, c, d)| vec![a, b, c, d]) },
    ConstructionDef { name: "tangent_points_internal", params: &[C, C], outputs: 4,
        run: |fig, args| construct::tangent_points_internal(fig, args[0], args[1]).map(|(a, b, c, d)| vec![a, b, c, d]) },
    ConstructionDef { name: "tangent_lines_external", params: &[C, C], outputs: 2,
        run: |fig, args| construct::tangent_lines_external(fig, args[0], args[1]).map(|(u, v)| vec![u, v]) },
    ConstructionDef { name: "tangent_lines_internal", params: &[C, C], outputs: 2,
        run: |fig, args| construct::tangent_lines_internal(fig, args[0], args[1]).map(|(u, v)| vec![u, v]) },
    // Triangle.
    ConstructionDef { name: "internal_angle_bisector", params: &[P, P, P], outputs: 1,
        run: one!(construct::internal_angle_bisector, 0, 1, 2) },
    ConstructionDef { name: "external_angle_bisector", params: &[P, P, P], outputs: 1,
        run: one!(construct::external_angle_bisector, 0, 1, 2) },
    ConstructionDef { name: "altitude", params: &[P, P, P], outputs: 1,
        run: one!(construct::altitude, 0, 1, 2) },
    ConstructionDef { name: "median", params: &[P, P, P], outputs: 1,
        run: one!(construct::median, 0, 1, 2) },
    ConstructionDef { name: "foot_ppp", params: &[P, P, P], outputs: 1,
        run: one!(construct::foot_ppp, 0, 1, 2) },
    ConstructionDef { name: "circumcenter", params: &[P, P, P], outputs: 1,
        run: one!(construct::circumcenter, 0, 1, 2) },
    ConstructionDef { name: "circumcircle", params: &[P, P, P], outputs: 1,
        run: one!(construct::circumcircle, 0, 1, 2) },
    ConstructionDef { name: "incenter", params: &[P, P, P], outputs: 1,
        run: one!(construct::incenter, 0, 1, 2) },
    ConstructionDef { name: "incircle", params: &[P, P, P], outputs: 1,
        run: one!(construct::incircle, 0, 1, 2) },
    ConstructionDef { name: "excenter", params: &[P, P, P], outputs: 1,
        run: one!(construct::excenter, 0, 1, 2) },
    ConstructionDef { name: "excircle", params: &[P, P, P], outputs: 1,
        run: one!(construct::excircle, 0, 1, 2) },
    ConstructionDef { name: "orthocenter", params: &[P, P, P], outputs: 1,
        run: one!(construct::orthocenter, 0, 1, 2) },
    ConstructionDef { name: "centroid", params: &[P, P, P], outputs: 1,
        run: one!(construct::centroid, 0, 1, 2) },
    // Second intersections.
    ConstructionDef { name: "second_intersection_plc", params: &[P, L, C], outputs: 1,
        run: one!(construct::second_intersection_plc, 0, 1, 2) },
    ConstructionDef { name: "second_intersection_pcc", params: &[P, C, C], outputs: 1,
        run: one!(construct::second_intersection_pcc, 0, 1, 2) },
    ConstructionDef { name: "midpoint_of_arc", params: &[P, P, C], outputs: 1,
        run: one!(construct::midpoint_of_arc, 0, 1, 2) },
];

/// The standard check library.
#[rustfmt::skip]
pub static CHECKS: &[CheckDef] = &[
    CheckDef { name: "is_pl", params: &[P, L], relation: Relation::PointOnLine,
        test: |fig, a| checks::on_line(fig.point(a[0]), fig.line(a[1])) },
    CheckDef { name: "is_pc", params: &[P, C], relation: Relation::PointOnCircle,
        test: |fig, a| checks::on_circle(fig.point(a[0]), fig.circle(a[1])) },
    CheckDef { name: "is_lc", params: &[L, C], relation: Relation::LineTangentToCircle,
        test: |fig, a| checks::tangent_lc(fig.line(a[0]), fig.circle(a[1])) },
    CheckDef { name: "is_perpendicular", params: &[L, L], relation: Relation::Perpendicular,
        test: |fig, a| checks::perpendicular(fig.line(a[0]), fig.line(a[1])) },
    CheckDef { name: "is_parallel", params: &[L, L], relation: Relation::Parallel,
        test: |fig, a| checks::parallel(fig.line(a[0]), fig.line(a[1])) },
    CheckDef { name: "is_tangent", params: &[C, C], relation: Relation::CircleTangentToCircle,
        test: |fig, a| checks::tangent_cc(fig.circle(a[0]), fig.circle(a[1])) },
    CheckDef { name: "is_collinear", params: &[P, P, P], relation: Relation::Collinear,
        test: |fig, a| checks::collinear(fig.point(a[0]), fig.point(a[1]), fig.point(a[2])) },
    CheckDef { name: "is_concyclic", params: &[P, P, P, P], relation: Relation::Concyclic,
        test: |fig, a| checks::concyclic(fig.point(a[0]), fig.point(a[1]), fig.point(a[2]), fig.point(a[3])) },
    CheckDef { name: "is_concurrent", params: &[L, L, L], relation: Relation::Concurrent,
        test: |fig, a| checks::concurrent(fig.line(a[0]), fig.line(a[1]), fig.line(a[2])) },
];

/// Short aliases accepted in scripts for the n-ary relation checks.
const CHECK_ALIASES: &[(&str, &str)] = &[
    ("collinear", "is_collinear"),
    ("concyclic", "is_concyclic"),
    ("concurrent", "is_concurrent"),
];

/// Immutable-after-startup lookup tables over the static libraries.
pub struct Registry {
    constructions: BTreeMap<&'static str, &'static ConstructionDef>,
    checks: BTreeMap<&'static str, &'static CheckDef>,
}

impl Registry {
    /// Build the standard registry.
    pub fn standard() -> Self {
        let constructions = CONSTRUCTIONS.iter().map(|d| (d.name, d)).collect();
        let mut checks: BTreeMap<&'static str, &'static CheckDef> =
            CHECKS.iter().map(|d| (d.name, d)).collect();
        for &(alias, target) in CHECK_ALIASES {
            if let Some(def) = CHECKS.iter().find(|d| d.name == target) {
                checks.insert(alias, def);
            }
        }
        Self {
            constructions,
            checks,
        }
    }

    pub fn construction(&self, name: &str) -> Option<&'static ConstructionDef> {
        self.constructions.get(name).copied()
    }

    pub fn check(&self, name: &str) -> Option<&'static CheckDef> {
        self.checks.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let reg = Registry::standard();
        let mid = reg.construction("midpoint").unwrap();
        assert_eq!(mid.arity(), 2);
        assert_eq!(mid.outputs, 1);
        assert!(reg.construction("no_such_op").is_none());
        let coll = reg.check("is_collinear").unwrap();
        assert_eq!(coll.relation, Relation::Collinear);
    }

    #[test]
    fn test_check_aliases_resolve() {
        let reg = Registry::standard();
        assert_eq!(reg.check("collinear").unwrap().name, "is_collinear");
        assert_eq!(reg.check("concurrent").unwrap().name, "is_concurrent");
        assert_eq!(reg.check("concyclic").unwrap().name, "is_concyclic");
    }

    #[test]
    fn test_no_duplicate_construction_names() {
        let mut names: Vec<_> = CONSTRUCTIONS.iter().map(|d| d.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_param_kind_matching() {
        assert!(ParamKind::Point.matches(ObjKind::Point));
        assert!(!ParamKind::Point.matches(ObjKind::Line));
        assert!(ParamKind::Any.matches(ObjKind::Circle));
    }
}
