//! 2D vector and axis-aligned bounding box value types.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector (or point) of `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product — scalar z-component of the 3D cross of (x,y,0).
    pub fn cross_z(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// 90° counter-clockwise perpendicular: (x, y) -> (-y, x).
    pub fn perpendicular(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Normalized direction, or the zero vector when the magnitude is
    /// below the smallest representable positive value.
    pub fn normalize(self) -> Vec2 {
        let len = self.length();
        if len > f32::MIN_POSITIVE {
            self / len
        } else {
            Vec2::ZERO
        }
    }

    pub fn distance_sq(self, other: Vec2) -> f32 {
        (self - other).length_sq()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        self + (other - self) * t
    }

    pub fn rotated(self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// `vectors_are_ccw(a, b)` iff the signed angle from `a` to `b` lies in
/// `[0, pi)` — i.e. `b` is reached from `a` by a counter-clockwise turn.
pub fn vectors_are_ccw(a: Vec2, b: Vec2) -> bool {
    b.dot(a.perpendicular()) >= 0.0
}

/// Absolute area of a simple polygon via the shoelace formula.
pub fn polygon_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut signed = 0.0f32;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        signed += a.cross_z(b);
    }
    (signed * 0.5).abs()
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}
impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}
impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}
impl DivAssign<f32> for Vec2 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
    }
}
impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned bounding box. Degenerate (min > max on any axis) after
/// `clear()`; degenerate boxes never contain or intersect anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// A box that is degenerate until the first `expand_to_include`.
    pub fn empty() -> Self {
        Self {
            min: Vec2::new(f32::MAX, f32::MAX),
            max: Vec2::new(f32::MIN, f32::MIN),
        }
    }

    pub fn clear(&mut self) {
        *self = Aabb::empty();
    }

    pub fn is_degenerate(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_to_include(&mut self, point: Vec2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn expand_by(&mut self, margin: f32) {
        if self.is_degenerate() {
            return;
        }
        self.min.x -= margin;
        self.min.y -= margin;
        self.max.x += margin;
        self.max.y += margin;
    }

    pub fn contains(&self, point: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// (min_x, min_y, max_x, max_y) rectangle form.
    pub fn to_rect(self) -> (f32, f32, f32, f32) {
        (self.min.x, self.min.y, self.max.x, self.max.y)
    }

    pub fn from_rect(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_scalar_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(b / 1.0, b);
    }

    #[test]
    fn dot_and_cross() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.cross_z(b), 1.0);
    }

    #[test]
    fn perpendicular_is_90_ccw() {
        let a = Vec2::new(1.0, 0.0);
        assert_eq!(a.perpendicular(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn normalize_zero_vector_stays_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn normalize_fixed_point_on_unit_vector() {
        let u = Vec2::new(1.0, 0.0);
        let n = u.normalize();
        assert!((n.x - u.x).abs() < 1e-6);
        assert!((n.y - u.y).abs() < 1e-6);
    }

    #[test]
    fn rotate_then_rotate_back_recovers_original() {
        let v = Vec2::new(3.0, -2.0);
        let theta = 0.73;
        let round_tripped = v.rotated(theta).rotated(-theta);
        assert!((round_tripped.x - v.x).abs() < 1e-4);
        assert!((round_tripped.y - v.y).abs() < 1e-4);
    }

    #[test]
    fn vectors_are_ccw_matches_signed_angle_range() {
        // From +x axis, a CCW turn into the upper half-plane (angle in [0, pi)) is "ccw".
        assert!(vectors_are_ccw(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)));
        assert!(vectors_are_ccw(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)));
        assert!(!vectors_are_ccw(Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn polygon_area_shoelace_and_winding() {
        let square = [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];
        assert!((polygon_area(&square) - 4.0).abs() < 1e-5);
        let reversed: Vec<Vec2> = square.iter().rev().copied().collect();
        // Area is reported as an absolute value regardless of winding.
        assert!((polygon_area(&reversed) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_cleared_is_degenerate_and_excludes_everything() {
        let mut b = Aabb::empty();
        assert!(b.is_degenerate());
        assert!(!b.contains(Vec2::ZERO));
        b.clear();
        assert!(!b.intersects(&Aabb::from_rect(-1.0, -1.0, 1.0, 1.0)));
    }

    #[test]
    fn aabb_expand_to_include_grows_bounds() {
        let mut b = Aabb::empty();
        b.expand_to_include(Vec2::new(1.0, 2.0));
        b.expand_to_include(Vec2::new(-3.0, 5.0));
        assert_eq!(b.min, Vec2::new(-3.0, 2.0));
        assert_eq!(b.max, Vec2::new(1.0, 5.0));
    }

    #[test]
    fn aabb_contains_and_intersects() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(5.0, 5.0, 15.0, 15.0);
        let c = Aabb::from_rect(20.0, 20.0, 30.0, 30.0);
        assert!(a.contains(Vec2::new(5.0, 5.0)));
        assert!(!a.contains(Vec2::new(11.0, 5.0)));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
