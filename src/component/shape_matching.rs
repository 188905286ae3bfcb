//! Shape matching: a restoring force that pulls each point mass toward
//! its rest-shape position, transformed by the body's current derived
//! pose. Pulls the silhouette back without forbidding deformation.

use crate::error::{Result, ensure};
use crate::point_mass::PointMass;
use crate::shape::ClosedShape;
use crate::vector::Vec2;

pub struct ShapeMatching {
    pub stiffness: f32,
    pub damping: f32,
    reference: ClosedShape,
}

impl ShapeMatching {
    pub fn new(stiffness: f32, damping: f32, reference: ClosedShape) -> Result<Self> {
        ensure!(stiffness.is_finite() && stiffness >= 0.0, "shape-matching stiffness must be finite and >= 0, got {stiffness}");
        ensure!(damping.is_finite() && damping >= 0.0, "shape-matching damping must be finite and >= 0, got {damping}");
        Ok(Self { stiffness, damping, reference })
    }

    /// Uses the same-step derived pose: the World derives pose before
    /// running the force phase of the *next* step, so this reads the
    /// pose produced by the previous step rather than lagging by one.
    pub fn apply(&self, masses: &mut [PointMass], derived_pos: Vec2, derived_angle: f32, scale: f32) {
        let local = self.reference.local_vertices();
        for (i, p) in masses.iter_mut().enumerate() {
            let target = local[i].rotated(derived_angle) * scale + derived_pos;
            let force = (target - p.position) * self.stiffness - p.velocity * self.damping;
            p.apply_force(force);
        }
    }
}
