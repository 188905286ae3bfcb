//! Constant acceleration applied to every non-static point mass. The
//! only external-only component — it never touches internal forces.

use crate::point_mass::PointMass;
use crate::vector::Vec2;

pub struct Gravity {
    pub acceleration: Vec2,
}

impl Gravity {
    pub fn new(acceleration: Vec2) -> Self {
        Self { acceleration }
    }

    pub fn apply(&self, masses: &mut [PointMass]) {
        for p in masses {
            if !p.is_static() {
                p.apply_force(self.acceleration * p.mass);
            }
        }
    }
}
