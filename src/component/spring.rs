//! Spring network: an ordered list of point-mass pairs held at a rest
//! length by a damped linear spring.

use crate::error::{Result, ensure};
use crate::point_mass::PointMass;

/// One `(i, j, rest_length, stiffness, damping)` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringEntry {
    pub i: usize,
    pub j: usize,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

pub struct Spring {
    entries: Vec<SpringEntry>,
}

impl Spring {
    /// Builds one entry per `(i, j)` pair in `edges`, sharing `stiffness`
    /// and `damping`, with rest length taken from the current distance
    /// between `point_masses[i]` and `point_masses[j]` — the usual case
    /// of springing a body's own perimeter edges. `internal_springs`
    /// carries fully-specified entries on top (typically interior
    /// "shape-holding" springs with their own length/stiffness/damping).
    pub fn new(
        point_masses: &[PointMass],
        edges: &[(usize, usize)],
        stiffness: f32,
        damping: f32,
        internal_springs: &[SpringEntry],
    ) -> Result<Self> {
        ensure!(stiffness.is_finite() && stiffness >= 0.0, "spring stiffness must be finite and >= 0, got {stiffness}");
        ensure!(damping.is_finite() && damping >= 0.0, "spring damping must be finite and >= 0, got {damping}");

        let mut entries = Vec::with_capacity(edges.len() + internal_springs.len());
        for &(i, j) in edges {
            ensure!(i < point_masses.len() && j < point_masses.len(), "spring edge ({i}, {j}) out of range for {} point masses", point_masses.len());
            ensure!(i != j, "spring edge ({i}, {j}) connects a point mass to itself");
            let rest_length = point_masses[j].position.distance(point_masses[i].position);
            entries.push(SpringEntry { i, j, rest_length, stiffness, damping });
        }
        for entry in internal_springs {
            ensure!(
                entry.i < point_masses.len() && entry.j < point_masses.len(),
                "internal spring ({}, {}) out of range for {} point masses",
                entry.i,
                entry.j,
                point_masses.len()
            );
            ensure!(entry.stiffness.is_finite() && entry.stiffness >= 0.0, "internal spring stiffness must be finite and >= 0, got {}", entry.stiffness);
            ensure!(entry.damping.is_finite() && entry.damping >= 0.0, "internal spring damping must be finite and >= 0, got {}", entry.damping);
            entries.push(*entry);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SpringEntry] {
        &self.entries
    }

    pub fn apply(&self, masses: &mut [PointMass]) {
        for entry in &self.entries {
            let pi = masses[entry.i].position;
            let pj = masses[entry.j].position;
            let d = pj - pi;
            let len = d.length();
            let u = d.normalize();
            let v = masses[entry.j].velocity - masses[entry.i].velocity;
            let force = entry.stiffness * (len - entry.rest_length) + entry.damping * u.dot(v);
            masses[entry.i].apply_force(u * force);
            masses[entry.j].apply_force(u * -force);
        }
    }
}
