//! A single point mass: position, velocity, and an accumulated force.

use crate::vector::Vec2;

/// A mass of exactly `0.0` is the static sentinel: infinite mass, never
/// integrated.
pub const STATIC_MASS: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub mass: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub force: Vec2,
}

impl PointMass {
    pub fn new(mass: f32, position: Vec2) -> Self {
        Self {
            mass,
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
        }
    }

    pub fn is_static(&self) -> bool {
        self.mass == STATIC_MASS
    }

    pub fn inv_mass(&self) -> f32 {
        if self.is_static() { 0.0 } else { 1.0 / self.mass }
    }

    /// Add to the force accumulator. Safe to call on a static point mass
    /// (the force is simply dropped on the next `integrate`).
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Explicit (semi-implicit) Euler step. No-op on a static mass.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static() {
            self.force = Vec2::ZERO;
            return;
        }
        self.velocity += self.force * (1.0 / self.mass) * dt;
        self.position += self.velocity * dt;
        self.force = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_accelerates_and_moves_point() {
        let mut p = PointMass::new(2.0, Vec2::ZERO);
        p.apply_force(Vec2::new(10.0, 0.0));
        p.integrate(1.0);
        // a = F/m = 5, v = 5*1 = 5, x = 5*1 = 5
        assert!((p.velocity.x - 5.0).abs() < 1e-5);
        assert!((p.position.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn force_cleared_after_integrate() {
        let mut p = PointMass::new(1.0, Vec2::ZERO);
        p.apply_force(Vec2::new(3.0, 4.0));
        p.integrate(0.1);
        assert_eq!(p.force, Vec2::ZERO);
    }

    #[test]
    fn static_mass_never_moves() {
        let mut p = PointMass::new(STATIC_MASS, Vec2::new(1.0, 2.0));
        p.apply_force(Vec2::new(1000.0, -1000.0));
        for _ in 0..100 {
            p.integrate(1.0 / 60.0);
        }
        assert_eq!(p.position, Vec2::new(1.0, 2.0));
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn static_mass_inv_mass_is_zero() {
        let p = PointMass::new(STATIC_MASS, Vec2::ZERO);
        assert_eq!(p.inv_mass(), 0.0);
    }
}
