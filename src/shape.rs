//! `ClosedShape`: a template polygon in local (centroid-relative, unit
//! scale) coordinates.

use crate::error::{Result, ensure};
use crate::vector::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedShape {
    /// Centroid-relative, unit-scale vertices. CCW winding by convention.
    local_vertices: Vec<Vec2>,
}

impl ClosedShape {
    /// Validates the vertex count (>= 3) and finiteness of every vertex.
    pub fn new(local_vertices: Vec<Vec2>) -> Result<Self> {
        ensure!(
            local_vertices.len() >= 3,
            "ClosedShape needs at least 3 vertices, got {}",
            local_vertices.len()
        );
        for (i, v) in local_vertices.iter().enumerate() {
            ensure!(v.is_finite(), "ClosedShape vertex {i} is not finite: {v:?}");
        }
        Ok(Self { local_vertices })
    }

    /// A regular n-gon of the given radius, centered on the local origin.
    pub fn regular_polygon(sides: usize, radius: f32) -> Result<Self> {
        ensure!(sides >= 3, "regular_polygon needs at least 3 sides, got {sides}");
        let verts = (0..sides)
            .map(|i| {
                let angle = std::f32::consts::TAU * (i as f32) / (sides as f32);
                Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        ClosedShape::new(verts)
    }

    pub fn vertex_count(&self) -> usize {
        self.local_vertices.len()
    }

    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local_vertices
    }

    /// Transform local vertices into world space given a pose.
    pub fn transform_vertices(&self, position: Vec2, angle: f32, scale: f32) -> Vec<Vec2> {
        self.local_vertices
            .iter()
            .map(|v| v.rotated(angle) * scale + position)
            .collect()
    }
}
