//! Gas-pressure component: treats the body's interior as an inflated gas
//! volume and pushes each edge outward in proportion to gas amount /
//! enclosed area.

use crate::point_mass::PointMass;
use crate::vector::{Vec2, polygon_area};

/// Default floor on the enclosed area used in the pressure denominator,
/// preventing a force singularity as the polygon collapses.
pub const DEFAULT_AREA_FLOOR: f32 = 0.5;

pub struct Pressure {
    pub gas_amount: f32,
    pub area_floor: f32,
    normals: Vec<Vec2>,
}

impl Pressure {
    pub fn new(gas_amount: f32) -> Self {
        Self { gas_amount, area_floor: DEFAULT_AREA_FLOOR, normals: Vec::new() }
    }

    pub fn with_area_floor(mut self, area_floor: f32) -> Self {
        self.area_floor = area_floor;
        self
    }

    pub fn apply(&mut self, masses: &mut [PointMass]) {
        let n = masses.len();
        if n < 3 {
            return;
        }
        if self.normals.len() != n {
            self.normals.resize(n, Vec2::ZERO);
        }

        // Pass 1: per-vertex outward normal from the sum of its two
        // adjacent edge vectors, plus the enclosed area.
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let edge_in = masses[i].position - masses[prev].position;
            let edge_out = masses[next].position - masses[i].position;
            self.normals[i] = (edge_in + edge_out).perpendicular().normalize();
        }
        let points: Vec<Vec2> = masses.iter().map(|p| p.position).collect();
        let raw_area = polygon_area(&points);
        if raw_area < self.area_floor {
            log::debug!("pressure area floor engaged: raw area {raw_area} < floor {}", self.area_floor);
        }
        let volume = raw_area.max(self.area_floor);

        // Pass 2: push each edge outward by gas_amount * edge_length / volume.
        for i in 0..n {
            let j = (i + 1) % n;
            let edge_length = masses[j].position.distance(masses[i].position);
            let pressure = (self.gas_amount * edge_length) / volume;
            masses[i].apply_force(self.normals[i] * pressure);
            masses[j].apply_force(self.normals[j] * pressure);
        }
    }
}
