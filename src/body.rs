//! `Body`: a deformable polygon — a ring of point masses plus the
//! components that hold it together, owned and stepped by a `World`.

use crate::component::BodyComponent;
use crate::error::{Result, ensure};
use crate::point_mass::PointMass;
use crate::shape::ClosedShape;
use crate::vector::{Aabb, Vec2, vectors_are_ccw};

/// An opaque material slot. The engine assigns no built-in meaning beyond
/// letting the resolver look up a restitution/friction pair; callers own
/// the table this indexes into.
pub type MaterialId = u32;

/// Per-body bitmasks used during broad-phase pair filtering. Two bodies
/// are eligible to collide only if each one's mask admits the other's
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    pub layer: u32,
    pub mask: u32,
}

impl CollisionFilter {
    pub const ALL: CollisionFilter = CollisionFilter { layer: u32::MAX, mask: u32::MAX };

    pub fn can_collide_with(&self, other: &CollisionFilter) -> bool {
        (self.mask & other.layer) != 0 && (other.mask & self.layer) != 0
    }
}

/// Behavior flags that gate which parts of the per-step pipeline a body
/// participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyFlags {
    /// Infinite mass in effect; `integrate` and pose derivation are
    /// skipped entirely.
    pub is_static: bool,
    /// Driven externally (by the caller, between steps); forces still
    /// accumulate but pose derivation is skipped.
    pub is_kinematic: bool,
    /// Pose derivation keeps `derived_pos`/`derived_vel` fixed at their
    /// last values instead of recomputing from the point-mass mean.
    pub is_pinned: bool,
    /// Whether `derived_angle`/`derived_omega` are tracked at all.
    pub free_rotate: bool,
    /// Advisory flag for renderer-side culling; unused by the engine.
    pub render: bool,
}

impl Default for BodyFlags {
    fn default() -> Self {
        Self {
            is_static: false,
            is_kinematic: false,
            is_pinned: false,
            free_rotate: true,
            render: true,
        }
    }
}

/// Result of `Body::closest_edge`: the flanking point-mass indices and
/// the parametric position between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestEdge {
    pub e1: usize,
    pub e2: usize,
    pub t: f32,
    pub distance: f32,
    pub hit_point: Vec2,
    pub normal: Vec2,
}

/// A point projected onto a single edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeProjection {
    pub hit_point: Vec2,
    pub normal: Vec2,
    pub distance_sq: f32,
    pub t: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Pose {
    position: Vec2,
    angle: f32,
    velocity: Vec2,
    omega: f32,
}

pub struct Body {
    base_shape: ClosedShape,
    point_masses: Vec<PointMass>,
    components: Vec<BodyComponent>,
    aabb: Aabb,
    pose: Pose,
    last_angle: f32,
    scale: f32,
    /// `(0, 1]`; velocities are multiplied by this every step, after
    /// resolution. `1.0` disables damping.
    pub vel_damping: f32,
    pub flags: BodyFlags,
    pub material: MaterialId,
    pub collision_filter: CollisionFilter,
    /// Opaque to the engine; callers stash whatever identifies the body
    /// in their own world.
    pub user_tag: u64,
}

impl Body {
    /// Transforms `shape` into world space at `(position, angle, scale)`,
    /// instantiates one point mass per vertex with the corresponding
    /// entry of `masses`, and computes the initial (zero-velocity) AABB.
    /// No components are attached; use [`Body::attach`] afterwards.
    pub fn new(
        shape: ClosedShape,
        masses: &[f32],
        position: Vec2,
        angle: f32,
        scale: f32,
        is_static: bool,
    ) -> Result<Body> {
        ensure!(
            masses.len() == shape.vertex_count(),
            "mass array length {} does not match shape vertex count {}",
            masses.len(),
            shape.vertex_count()
        );
        ensure!(position.is_finite(), "Body position must be finite, got {position:?}");
        ensure!(angle.is_finite(), "Body angle must be finite, got {angle}");
        ensure!(scale.is_finite() && scale > 0.0, "Body scale must be finite and positive, got {scale}");
        for (i, m) in masses.iter().enumerate() {
            ensure!(m.is_finite() && *m >= 0.0, "mass[{i}] must be finite and non-negative, got {m}");
        }

        let world_positions = shape.transform_vertices(position, angle, scale);
        let point_masses: Vec<PointMass> = world_positions
            .iter()
            .zip(masses)
            .map(|(p, m)| PointMass::new(*m, *p))
            .collect();

        let mut aabb = Aabb::empty();
        for p in &point_masses {
            aabb.expand_to_include(p.position);
        }

        let mut flags = BodyFlags::default();
        flags.is_static = is_static;

        Ok(Body {
            base_shape: shape,
            point_masses,
            components: Vec::new(),
            aabb,
            pose: Pose { position, angle, velocity: Vec2::ZERO, omega: 0.0 },
            last_angle: angle,
            scale,
            vel_damping: 0.999,
            flags,
            material: 0,
            collision_filter: CollisionFilter::ALL,
            user_tag: 0,
        })
    }

    /// Attaches a component, effective starting with the next step. Order
    /// is preserved: components fire in attachment order during the
    /// force phase.
    pub fn attach(&mut self, component: BodyComponent) {
        self.components.push(component);
    }

    pub fn base_shape(&self) -> &ClosedShape {
        &self.base_shape
    }

    pub fn point_masses(&self) -> &[PointMass] {
        &self.point_masses
    }

    pub fn point_masses_mut(&mut self) -> &mut [PointMass] {
        &mut self.point_masses
    }

    pub fn vertex_count(&self) -> usize {
        self.point_masses.len()
    }

    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn derived_position(&self) -> Vec2 {
        self.pose.position
    }

    pub fn derived_angle(&self) -> f32 {
        self.pose.angle
    }

    pub fn derived_velocity(&self) -> Vec2 {
        self.pose.velocity
    }

    pub fn derived_angular_velocity(&self) -> f32 {
        self.pose.omega
    }

    pub fn is_static(&self) -> bool {
        self.flags.is_static
    }

    /// Current world-space vertex ring, for rendering.
    pub fn vertices(&self) -> Vec<Vec2> {
        self.point_masses.iter().map(|p| p.position).collect()
    }

    /// Replaces the resting shape. Point-mass count must stay the same;
    /// world positions and velocities are left untouched (only the
    /// reference the shape-matching/AABB math compares against changes).
    pub fn set_shape(&mut self, shape: ClosedShape) -> Result<()> {
        ensure!(
            shape.vertex_count() == self.point_masses.len(),
            "set_shape vertex count {} does not match existing {} point masses",
            shape.vertex_count(),
            self.point_masses.len()
        );
        self.base_shape = shape;
        Ok(())
    }

    pub fn set_mass_all(&mut self, mass: f32) -> Result<()> {
        ensure!(mass.is_finite() && mass >= 0.0, "mass must be finite and non-negative, got {mass}");
        for p in &mut self.point_masses {
            p.mass = mass;
        }
        Ok(())
    }

    pub fn set_mass_from_list(&mut self, masses: &[f32]) -> Result<()> {
        ensure!(
            masses.len() == self.point_masses.len(),
            "mass list length {} does not match {} point masses",
            masses.len(),
            self.point_masses.len()
        );
        for (m, p) in masses.iter().zip(&mut self.point_masses) {
            ensure!(m.is_finite() && *m >= 0.0, "mass must be finite and non-negative, got {m}");
            p.mass = *m;
        }
        Ok(())
    }

    /// Teleports the body: re-derives every point-mass world position
    /// from the base shape at the given pose, zeroes velocity, and resets
    /// the derived pose to match exactly (no lag until the next step).
    pub fn set_position_angle(&mut self, position: Vec2, angle: f32) -> Result<()> {
        ensure!(position.is_finite(), "position must be finite, got {position:?}");
        ensure!(angle.is_finite(), "angle must be finite, got {angle}");
        let world_positions = self.base_shape.transform_vertices(position, angle, self.scale);
        for (p, wp) in self.point_masses.iter_mut().zip(world_positions) {
            p.position = wp;
            p.velocity = Vec2::ZERO;
        }
        self.pose.position = position;
        self.pose.angle = angle;
        self.pose.velocity = Vec2::ZERO;
        self.pose.omega = 0.0;
        self.last_angle = angle;
        Ok(())
    }

    /// Adds `perpendicular(normalize(p_i - derived_pos)) * tau` to each
    /// point's force.
    pub fn apply_torque(&mut self, tau: f32) {
        let center = self.pose.position;
        for p in &mut self.point_masses {
            let arm = (p.position - center).normalize();
            p.apply_force(arm.perpendicular() * tau);
        }
    }

    /// Sets every point's velocity to `perpendicular(normalize(p_i -
    /// derived_pos)) * omega`, mirroring `apply_torque`'s formula exactly
    /// but assigning velocity rather than accumulating force.
    pub fn set_angular_velocity(&mut self, omega: f32) {
        let center = self.pose.position;
        for p in &mut self.point_masses {
            let arm = (p.position - center).normalize();
            p.velocity = arm.perpendicular() * omega;
        }
    }

    /// Adds `perpendicular(normalize(p_i - derived_pos)) * omega` to each
    /// point's velocity, mirroring `apply_torque`'s accumulate-not-replace
    /// behavior.
    pub fn add_angular_velocity(&mut self, omega: f32) {
        let center = self.pose.position;
        for p in &mut self.point_masses {
            let arm = (p.position - center).normalize();
            p.velocity += arm.perpendicular() * omega;
        }
    }

    /// Adds `f` to every point's force plus a per-point torque of
    /// `perpendicular(p_i - pt) * cross_z(derived_pos - pt, f)`.
    pub fn add_global_force(&mut self, pt: Vec2, f: Vec2) {
        let center = self.pose.position;
        let torque_scale = (center - pt).cross_z(f);
        for p in &mut self.point_masses {
            let arm = p.position - pt;
            p.apply_force(f + arm.perpendicular() * torque_scale);
        }
    }

    /// `accumulate_external_forces` then `accumulate_internal_forces`,
    /// each invoking attached components in attachment order.
    pub fn accumulate_forces(&mut self) {
        let pose = self.pose;
        for c in &mut self.components {
            c.accumulate_external_forces(&mut self.point_masses);
        }
        for c in &mut self.components {
            c.accumulate_internal_forces(&mut self.point_masses, pose.position, pose.angle, self.scale);
        }
    }

    /// Integrates every point mass. No-op on static bodies (every point
    /// mass is the static sentinel already, so this is redundant but
    /// explicit).
    pub fn integrate(&mut self, dt: f32) {
        for p in &mut self.point_masses {
            p.integrate(dt);
        }
    }

    pub fn dampen_velocity(&mut self) {
        if self.vel_damping == 1.0 {
            return;
        }
        for p in &mut self.point_masses {
            p.velocity *= self.vel_damping;
        }
    }

    /// Skipped for static or kinematic bodies. See module docs on the
    /// angle-unwrapping convention.
    pub fn derive_position_and_angle(&mut self, dt: f32) {
        if self.flags.is_static || self.flags.is_kinematic {
            return;
        }

        if !self.flags.is_pinned {
            let n = self.point_masses.len() as f32;
            let mut sum_pos = Vec2::ZERO;
            let mut sum_vel = Vec2::ZERO;
            for p in &self.point_masses {
                sum_pos += p.position;
                sum_vel += p.velocity;
            }
            self.pose.position = sum_pos / n;
            self.pose.velocity = sum_vel / n;
        }

        if self.flags.free_rotate {
            let center = self.pose.position;
            let local = self.base_shape.local_vertices();
            let mut angles = Vec::with_capacity(self.point_masses.len());
            for (i, p) in self.point_masses.iter().enumerate() {
                let rest_dir = local[i].normalize();
                let offset_dir = (p.position - center).normalize();
                let cos_theta = rest_dir.dot(offset_dir).clamp(-1.0, 1.0);
                let mut theta = cos_theta.acos();
                if !vectors_are_ccw(rest_dir, offset_dir) {
                    theta = -theta;
                }
                if i > 0 {
                    let prev = angles[0];
                    let diff = theta - prev;
                    if diff > std::f32::consts::PI {
                        theta -= std::f32::consts::TAU;
                    } else if diff < -std::f32::consts::PI {
                        theta += std::f32::consts::TAU;
                    }
                }
                angles.push(theta);
            }
            let mean_angle = angles.iter().sum::<f32>() / angles.len() as f32;
            self.pose.angle = mean_angle;

            let mut omega = (self.pose.angle - self.last_angle) / dt;
            if omega > std::f32::consts::PI {
                omega -= std::f32::consts::TAU;
            } else if omega <= -std::f32::consts::PI {
                omega += std::f32::consts::TAU;
            }
            self.pose.omega = omega;
            self.last_angle = self.pose.angle;
        }
    }

    /// Recomputes as the union of point positions, padded by
    /// `velocity * dt` in each point's direction of travel.
    pub fn update_aabb(&mut self, dt: f32) {
        self.aabb.clear();
        for p in &self.point_masses {
            self.aabb.expand_to_include(p.position);
            self.aabb.expand_to_include(p.position + p.velocity * dt);
        }
    }

    fn edge(&self, i: usize) -> (Vec2, Vec2) {
        let n = self.point_masses.len();
        (self.point_masses[i].position, self.point_masses[(i + 1) % n].position)
    }

    /// Even-odd crossing test. `contains(pt) => aabb().contains(pt)`.
    pub fn contains(&self, pt: Vec2) -> bool {
        if !self.aabb.contains(pt) {
            return false;
        }
        let n = self.point_masses.len();
        let mut inside = false;
        for i in 0..n {
            let (start, end) = self.edge(i);
            let crosses = (start.y <= pt.y && end.y > pt.y) || (start.y > pt.y && end.y <= pt.y);
            if crosses {
                let hit_x = start.x + (pt.y - start.y) * (end.x - start.x) / (end.y - start.y);
                if hit_x > pt.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn intersects_line(&self, a: Vec2, b: Vec2) -> bool {
        if self.contains(a) || self.contains(b) {
            return true;
        }
        let n = self.point_masses.len();
        for i in 0..n {
            let (start, end) = self.edge(i);
            if segment_intersection_t(a, b, start, end).is_some() {
                return true;
            }
        }
        false
    }

    /// Nearest intersection of segment `[a, b]` against any edge, as a
    /// parametric `t` along `[a, b]` plus the hit point.
    pub fn raycast(&self, a: Vec2, b: Vec2) -> Option<(f32, Vec2)> {
        let n = self.point_masses.len();
        let mut best: Option<(f32, Vec2)> = None;
        for i in 0..n {
            let (start, end) = self.edge(i);
            if let Some(t) = segment_intersection_t(a, b, start, end) {
                let better = match best {
                    Some((best_t, _)) => t < best_t,
                    None => true,
                };
                if better {
                    best = Some((t, a.lerp(b, t)));
                }
            }
        }
        best
    }

    /// Projects `pt` onto edge `edge_index`, clamped to the segment.
    pub fn closest_point_on_edge(&self, pt: Vec2, edge_index: usize) -> EdgeProjection {
        let (start, end) = self.edge(edge_index);
        let d = end - start;
        let len_sq = d.length_sq();
        let t = if len_sq > f32::MIN_POSITIVE { ((pt - start).dot(d) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
        let hit_point = start + d * t;
        EdgeProjection {
            hit_point,
            normal: d.perpendicular().normalize(),
            distance_sq: pt.distance_sq(hit_point),
            t,
        }
    }

    /// Argmin of [`Body::closest_point_on_edge`] over every edge.
    pub fn closest_point(&self, pt: Vec2) -> EdgeProjection {
        let n = self.point_masses.len();
        let mut best = self.closest_point_on_edge(pt, 0);
        for i in 1..n {
            let candidate = self.closest_point_on_edge(pt, i);
            if candidate.distance_sq < best.distance_sq {
                best = candidate;
            }
        }
        best
    }

    /// Like [`Body::closest_point`], but also names the two flanking
    /// point masses. Unconditional — used by the narrow phase, which
    /// already knows `pt` lies inside this body.
    pub fn closest_edge_unconditional(&self, pt: Vec2) -> ClosestEdge {
        let n = self.point_masses.len();
        let mut best_i = 0usize;
        let mut best = self.closest_point_on_edge(pt, 0);
        for i in 1..n {
            let candidate = self.closest_point_on_edge(pt, i);
            if candidate.distance_sq < best.distance_sq {
                best = candidate;
                best_i = i;
            }
        }
        ClosestEdge {
            e1: best_i,
            e2: (best_i + 1) % n,
            t: best.t,
            distance: best.distance_sq.sqrt(),
            hit_point: best.hit_point,
            normal: best.normal,
        }
    }

    /// `None` if the minimum distance exceeds `tolerance`.
    pub fn closest_edge(&self, pt: Vec2, tolerance: f32) -> Option<ClosestEdge> {
        let candidate = self.closest_edge_unconditional(pt);
        if candidate.distance > tolerance { None } else { Some(candidate) }
    }
}

/// Parametric intersection of segment `[a, b]` against segment `[c, d]`,
/// returning `t` along `[a, b]` when the segments properly cross.
fn segment_intersection_t(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<f32> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross_z(s);
    if denom.abs() < f32::MIN_POSITIVE {
        return None;
    }
    let ac = c - a;
    let t = ac.cross_z(s) / denom;
    let u = ac.cross_z(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) { Some(t) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> ClosedShape {
        ClosedShape::new(vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn mismatched_mass_count_is_rejected() {
        let result = Body::new(unit_square(), &[1.0, 1.0], Vec2::ZERO, 0.0, 1.0, false);
        assert!(result.is_err());
    }

    #[test]
    fn construction_places_point_masses_in_world_space() {
        let body = Body::new(unit_square(), &[1.0; 4], Vec2::new(10.0, 0.0), 0.0, 1.0, false).unwrap();
        assert_eq!(body.vertices()[0], Vec2::new(9.5, -0.5));
        assert!(body.aabb().contains(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn contains_matches_s4_scenario() {
        let body = Body::new(unit_square(), &[1.0; 4], Vec2::ZERO, 0.0, 1.0, false).unwrap();
        assert!(body.contains(Vec2::ZERO));
        assert!(!body.contains(Vec2::new(0.6, 0.0)));
        assert!(body.contains(Vec2::new(-0.4999, 0.4999)));
    }

    #[test]
    fn static_body_ignores_forces_and_pose_derivation() {
        let mut body = Body::new(unit_square(), &[0.0; 4], Vec2::ZERO, 0.0, 1.0, true).unwrap();
        let before = body.vertices();
        body.apply_torque(1000.0);
        body.integrate(1.0 / 60.0);
        body.derive_position_and_angle(1.0 / 60.0);
        assert_eq!(body.vertices(), before);
    }

    #[test]
    fn set_position_angle_is_exact_round_trip_for_rigid_body() {
        let mut body = Body::new(unit_square(), &[0.0; 4], Vec2::ZERO, 0.0, 1.0, false).unwrap();
        body.set_position_angle(Vec2::new(3.0, -2.0), 0.4).unwrap();
        body.derive_position_and_angle(1.0 / 60.0);
        assert!((body.derived_position().x - 3.0).abs() < 1e-5);
        assert!((body.derived_position().y - (-2.0)).abs() < 1e-5);
        assert!((body.derived_angle() - 0.4).abs() < 1e-4);
    }

    #[test]
    fn raycast_finds_nearest_edge_hit() {
        let body = Body::new(unit_square(), &[1.0; 4], Vec2::ZERO, 0.0, 1.0, false).unwrap();
        let hit = body.raycast(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0));
        assert!(hit.is_some());
        let (_, point) = hit.unwrap();
        assert!((point.x - (-0.5)).abs() < 1e-4);
    }

    #[test]
    fn closest_edge_respects_tolerance() {
        let body = Body::new(unit_square(), &[1.0; 4], Vec2::ZERO, 0.0, 1.0, false).unwrap();
        assert!(body.closest_edge(Vec2::new(0.6, 0.0), 0.2).is_some());
        assert!(body.closest_edge(Vec2::new(5.0, 0.0), 0.1).is_none());
    }

    #[test]
    fn apply_torque_is_symmetric_about_center_for_regular_polygon() {
        let shape = ClosedShape::regular_polygon(8, 1.0).unwrap();
        let mut body = Body::new(shape, &[1.0; 8], Vec2::ZERO, 0.0, 1.0, false).unwrap();
        body.apply_torque(10.0);
        let sum: Vec2 = body.point_masses().iter().fold(Vec2::ZERO, |acc, p| acc + p.force);
        assert!(sum.length() < 1e-3);
    }
}
