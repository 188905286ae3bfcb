//! `BodyComponent`: internal and external force contributors attached to
//! a [`crate::body::Body`].
//!
//! Modeled as a tagged variant rather than a trait object — the set of
//! component kinds is closed and each one's per-step math is small
//! enough that dynamic dispatch would only cost an indirection for no
//! benefit. A component holds indices into its owning body's point-mass
//! ring, never a reference back to the body itself.

mod gravity;
mod pressure;
mod shape_matching;
mod spring;

pub use gravity::Gravity;
pub use pressure::Pressure;
pub use shape_matching::ShapeMatching;
pub use spring::{Spring, SpringEntry};

use crate::point_mass::PointMass;
use crate::vector::Vec2;

pub enum BodyComponent {
    Spring(Spring),
    Pressure(Pressure),
    ShapeMatching(ShapeMatching),
    Gravity(Gravity),
}

impl BodyComponent {
    /// Internal forces: spring network, pressure, shape matching. Only
    /// these three read the body's derived pose/scale.
    pub fn accumulate_internal_forces(
        &mut self,
        masses: &mut [PointMass],
        derived_pos: Vec2,
        derived_angle: f32,
        scale: f32,
    ) {
        match self {
            BodyComponent::Spring(s) => s.apply(masses),
            BodyComponent::Pressure(p) => p.apply(masses),
            BodyComponent::ShapeMatching(sm) => sm.apply(masses, derived_pos, derived_angle, scale),
            BodyComponent::Gravity(_) => {}
        }
    }

    /// External forces: gravity. Spring/Pressure/ShapeMatching are
    /// internal-only and no-op here.
    pub fn accumulate_external_forces(&mut self, masses: &mut [PointMass]) {
        if let BodyComponent::Gravity(g) = self {
            g.apply(masses);
        }
    }
}

impl From<Spring> for BodyComponent {
    fn from(s: Spring) -> Self {
        BodyComponent::Spring(s)
    }
}
impl From<Pressure> for BodyComponent {
    fn from(p: Pressure) -> Self {
        BodyComponent::Pressure(p)
    }
}
impl From<ShapeMatching> for BodyComponent {
    fn from(sm: ShapeMatching) -> Self {
        BodyComponent::ShapeMatching(sm)
    }
}
impl From<Gravity> for BodyComponent {
    fn from(g: Gravity) -> Self {
        BodyComponent::Gravity(g)
    }
}
