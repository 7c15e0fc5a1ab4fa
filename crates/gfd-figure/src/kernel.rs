//! Numeric kernels: distances, angles, the quadratic formula and the
//! point/line/circle region classifiers.
//!
//! Everything here is pure arithmetic on value shapes. Degenerate input
//! never raises; classification and epsilon tolerance absorb it, and the
//! construction layer checks preconditions before calling in.

use gfd_types::{Circle, Line, Point, EPSILON};
use std::f64::consts::PI;

pub fn distance_pp(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Point-to-line distance: |u(a)| / ‖(u.a, u.b)‖.
pub fn distance_pl(a: Point, u: Line) -> f64 {
    u.eval(a).abs() / (u.a * u.a + u.b * u.b).sqrt()
}

/// Distance from a point to the circle itself (not its center).
pub fn distance_pc(a: Point, s: Circle) -> f64 {
    (s.r - distance_pp(s.o, a)).abs()
}

/// Distance from a line to the circle, via the center's line distance.
pub fn distance_lc(u: Line, s: Circle) -> f64 {
    (s.r - distance_pl(s.o, u)).abs()
}

/// Unsigned angle between two lines: |atan(cross/dot)|, and exactly π/2
/// when the dot product is zero. The literal formula is load-bearing:
/// near-perpendicular lines with a tiny nonzero dot take the atan branch.
pub fn angle(u: Line, v: Line) -> f64 {
    let dot = u.a * v.a + u.b * v.b;
    if dot == 0.0 {
        PI / 2.0
    } else {
        ((v.a * u.b - u.a * v.b) / dot).atan().abs()
    }
}

/// Real roots of `a·x² + b·x + c = 0`, smaller root first. A
/// discriminant within epsilon of zero counts as a double root; a
/// negative one yields `None`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let d = b * b - 4.0 * a * c;
    if d.abs() < EPSILON {
        let x = -b / (2.0 * a);
        return Some((x, x));
    }
    if d < 0.0 {
        return None;
    }
    let sq = d.sqrt();
    Some(((-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)))
}

/// Where a point sits relative to a circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Outside,
    On,
    Inside,
}

pub fn point_circle_region(a: Point, s: Circle) -> Region {
    let d = distance_pp(s.o, a);
    if (s.r - d).abs() < EPSILON {
        Region::On
    } else if d > s.r {
        Region::Outside
    } else {
        Region::Inside
    }
}

/// `Outside` = no intersection, `On` = tangent, `Inside` = secant.
pub fn line_circle_region(u: Line, s: Circle) -> Region {
    let d = distance_pl(s.o, u);
    if (s.r - d).abs() < EPSILON {
        Region::On
    } else if d > s.r {
        Region::Outside
    } else {
        Region::Inside
    }
}

/// Circle-circle classifier: center distance against r₁+r₂ and |r₁−r₂|.
/// `On` covers both external and internal tangency; `Outside` covers
/// disjoint and contained; `Inside` means two intersection points.
pub fn circle_circle_region(s: Circle, t: Circle) -> Region {
    let d = distance_pp(s.o, t.o);
    if (d - (s.r + t.r)).abs() < EPSILON || (d - (s.r - t.r).abs()).abs() < EPSILON {
        Region::On
    } else if d > s.r + t.r || d < (s.r - t.r).abs() {
        Region::Outside
    } else {
        Region::Inside
    }
}

/// Whether `a` and `b` lie strictly on the same side of `u`. Callers
/// must rule out points on the line first.
pub fn same_side_of_line(a: Point, b: Point, u: Line) -> bool {
    u.eval(a) * u.eval(b) > 0.0
}

/// Angle of a point on a circle, measured at the center, in [0, 2π).
pub fn angle_on_circle(s: Circle, a: Point) -> f64 {
    (a.y - s.o.y).atan2(a.x - s.o.x).rem_euclid(2.0 * PI)
}

/// Point at a given center angle on a circle.
pub fn point_at_angle(s: Circle, t: f64) -> Point {
    Point::new(s.o.x + s.r * t.cos(), s.o.y + s.r * t.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Circle {
        Circle::new(Point::new(0.0, 0.0), 1.0)
    }

    #[test]
    fn test_distance_pp() {
        assert!((distance_pp(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_pl() {
        // x + y = 2, distance from origin is sqrt(2).
        let u = Line::new(1.0, 1.0, 2.0);
        let d = distance_pl(Point::new(0.0, 0.0), u);
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_angle_exact_perpendicular() {
        let u = Line::new(1.0, 0.0, 0.0);
        let v = Line::new(0.0, 1.0, 0.0);
        assert_eq!(angle(u, v), PI / 2.0);
    }

    #[test]
    fn test_angle_near_perpendicular_takes_atan_branch() {
        // Tiny nonzero dot product: the literal formula, not an
        // idealized signed angle.
        let u = Line::new(1.0, 0.0, 0.0);
        let v = Line::new(1e-9, 1.0, 0.0);
        let dot = u.a * v.a + u.b * v.b;
        let expected = ((v.a * u.b - u.a * v.b) / dot).atan().abs();
        assert_eq!(angle(u, v), expected);
        assert!((angle(u, v) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_of_parallels_is_zero() {
        let u = Line::new(1.0, 2.0, 0.0);
        let v = Line::new(2.0, 4.0, 7.0);
        assert!(angle(u, v) < 1e-12);
    }

    #[test]
    fn test_solve_quadratic_two_roots() {
        let (x1, x2) = solve_quadratic(1.0, -3.0, 2.0).unwrap();
        assert!((x1 - 1.0).abs() < 1e-12);
        assert!((x2 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_quadratic_double_root() {
        let (x1, x2) = solve_quadratic(1.0, -2.0, 1.0).unwrap();
        assert_eq!(x1, x2);
        assert!((x1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_quadratic_no_real_roots() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_point_circle_region() {
        assert_eq!(point_circle_region(Point::new(2.0, 0.0), unit()), Region::Outside);
        assert_eq!(point_circle_region(Point::new(1.0, 0.0), unit()), Region::On);
        assert_eq!(point_circle_region(Point::new(0.1, 0.2), unit()), Region::Inside);
    }

    #[test]
    fn test_line_circle_region() {
        let horizontal = |c| Line::new(0.0, 1.0, c);
        assert_eq!(line_circle_region(horizontal(2.0), unit()), Region::Outside);
        assert_eq!(line_circle_region(horizontal(1.0), unit()), Region::On);
        assert_eq!(line_circle_region(horizontal(0.5), unit()), Region::Inside);
    }

    #[test]
    fn test_circle_circle_region_all_cases() {
        let at = |x: f64, r: f64| Circle::new(Point::new(x, 0.0), r);
        // external tangency, internal tangency, disjoint, secant, contained
        assert_eq!(circle_circle_region(unit(), at(3.0, 2.0)), Region::On);
        assert_eq!(circle_circle_region(unit(), at(1.0, 2.0)), Region::On);
        assert_eq!(circle_circle_region(unit(), at(5.0, 1.0)), Region::Outside);
        assert_eq!(circle_circle_region(unit(), at(1.0, 1.0)), Region::Inside);
        assert_eq!(circle_circle_region(unit(), at(0.1, 0.2)), Region::Outside);
    }

    #[test]
    fn test_same_side_of_line() {
        let u = Line::new(0.0, 1.0, 0.0); // y = 0
        assert!(same_side_of_line(Point::new(0.0, 1.0), Point::new(5.0, 2.0), u));
        assert!(!same_side_of_line(Point::new(0.0, 1.0), Point::new(5.0, -2.0), u));
    }

    #[test]
    fn test_angle_on_circle_quadrants() {
        let s = unit();
        assert!((angle_on_circle(s, Point::new(1.0, 0.0)) - 0.0).abs() < 1e-12);
        assert!((angle_on_circle(s, Point::new(0.0, 1.0)) - PI / 2.0).abs() < 1e-12);
        assert!((angle_on_circle(s, Point::new(-1.0, 0.0)) - PI).abs() < 1e-12);
        assert!((angle_on_circle(s, Point::new(0.0, -1.0)) - 3.0 * PI / 2.0).abs() < 1e-12);
    }
}
