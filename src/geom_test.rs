#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

const EPS: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn assert_close(a: Point, b: Point, tol: f64) {
    assert!((a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol, "expected {b:?}, got {a:?}");
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_distance_is_euclidean() {
    assert_eq!(pt(0.0, 0.0).distance_to(pt(3.0, 4.0)), 5.0);
}

#[test]
fn point_offset_and_delta_are_inverse() {
    let p = pt(2.0, -7.0).offset(5.0, 3.0);
    assert_eq!(p, pt(7.0, -4.0));
    assert_eq!(p.delta_from(pt(2.0, -7.0)), (5.0, 3.0));
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_new_clamps_negative_size() {
    let r = Rect::new(1.0, 2.0, -5.0, -1.0);
    assert_eq!(r.width, 0.0);
    assert_eq!(r.height, 0.0);
}

#[test]
fn rect_center_and_edges() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.center(), pt(60.0, 45.0));
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
}

#[test]
fn rect_inflate_then_deflate_is_identity() {
    let r = Rect::new(0.0, 0.0, 150.0, 50.0);
    let framed = r.inflated(3.0);
    assert_eq!(framed, Rect::new(-3.0, -3.0, 156.0, 56.0));
    assert_eq!(framed.inflated(-3.0), r);
}

#[test]
fn rect_display_rotation_wraps() {
    assert_eq!(Rect::default().with_rotation(370.0).display_rotation(), 10.0);
    assert_eq!(Rect::default().with_rotation(-30.0).display_rotation(), 330.0);
    assert_eq!(Rect::default().with_rotation(720.0).display_rotation(), 0.0);
}

#[test]
fn rect_contains_axis_aligned() {
    let r = Rect::new(0.0, 0.0, 100.0, 20.0);
    assert!(r.contains(pt(50.0, 10.0)));
    assert!(!r.contains(pt(50.0, 30.0)));
}

#[test]
fn rect_contains_respects_rotation() {
    // A wide, short rect turned a quarter-turn becomes tall and narrow.
    let r = Rect::new(0.0, 40.0, 100.0, 20.0).with_rotation(90.0);
    assert!(r.contains(pt(50.0, 5.0)));
    assert!(!r.contains(pt(5.0, 50.0)));
}

// =============================================================
// rotate_around
// =============================================================

#[test]
fn rotate_zero_is_exact_identity() {
    let p = pt(0.1, 0.7);
    assert_eq!(rotate_around(pt(0.3, 0.9), p, 0.0), p);
}

#[test]
fn rotate_point_on_pivot_returns_pivot() {
    let pivot = pt(4.0, 4.0);
    assert_eq!(rotate_around(pivot, pivot, 123.0), pivot);
    assert_eq!(rotate_around(pivot, pivot, f64::NAN), pivot);
}

#[test]
fn rotate_quarter_turn_is_clockwise_on_screen() {
    // Right of the pivot moves to below it.
    let out = rotate_around(pt(0.0, 0.0), pt(10.0, 0.0), 90.0);
    assert_close(out, pt(0.0, 10.0), EPS);
}

#[test]
fn rotate_half_turn_mirrors_through_pivot() {
    let out = rotate_around(pt(5.0, 5.0), pt(8.0, 9.0), 180.0);
    assert_close(out, pt(2.0, 1.0), EPS);
}

#[test]
fn rotate_is_invertible() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let pivot = pt(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
        let p = pt(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
        let angle = rng.random_range(-720.0..720.0);
        let back = rotate_around(pivot, rotate_around(pivot, p, angle), -angle);
        assert_close(back, p, 1e-6);
    }
}

// =============================================================
// angle_between
// =============================================================

#[test]
fn angle_self_is_zero() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let pivot = pt(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0));
        let ray = pivot.offset(rng.random_range(1.0..50.0), rng.random_range(1.0..50.0));
        assert!(angle_between(pivot, ray, ray).abs() < 1e-5);
    }
}

#[test]
fn angle_quarter_clockwise_is_positive() {
    let a = angle_between(pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 10.0));
    assert!((a - 90.0).abs() < EPS);
}

#[test]
fn angle_quarter_counterclockwise_is_negative() {
    let a = angle_between(pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, -10.0));
    assert!((a + 90.0).abs() < EPS);
}

#[test]
fn angle_ignores_ray_length() {
    let a = angle_between(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 250.0));
    assert!((a - 90.0).abs() < EPS);
}

#[test]
fn angle_degenerate_zero_length_ray_is_zero() {
    assert_eq!(angle_between(pt(3.0, 3.0), pt(3.0, 3.0), pt(10.0, 0.0)), 0.0);
    assert_eq!(angle_between(pt(3.0, 3.0), pt(10.0, 0.0), pt(3.0, 3.0)), 0.0);
}

#[test]
fn angle_collinear_opposite_is_half_turn() {
    let a = angle_between(pt(0.0, 0.0), pt(10.0, 0.0), pt(-10.0, 0.0));
    assert!((a.abs() - 180.0).abs() < EPS);
}

#[test]
fn angle_non_finite_input_is_zero() {
    assert_eq!(angle_between(pt(0.0, 0.0), pt(f64::NAN, 1.0), pt(1.0, 1.0)), 0.0);
}

#[test]
fn angle_matches_rotation() {
    let pivot = pt(50.0, 50.0);
    let start = pt(50.0, 0.0);
    for deg in [5.0, 30.0, 89.0, 135.0, -45.0, -170.0] {
        let end = rotate_around(pivot, start, deg);
        assert!((angle_between(pivot, start, end) - deg).abs() < 1e-6, "deg {deg}");
    }
}

#[test]
fn normalize_handles_negative_and_large() {
    assert_eq!(normalize_degrees_360(-90.0), 270.0);
    assert_eq!(normalize_degrees_360(1080.5), 0.5);
}
