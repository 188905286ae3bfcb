//! `World`: owns every body and runs the fixed-step pipeline — force
//! accumulation, integration, pose derivation, broad phase, narrow
//! phase, and impulse resolution, with an optional extra penetration
//! pass.

mod broadphase;
mod narrowphase;
mod resolve;

pub use narrowphase::{Contact, Side};
pub use resolve::MaterialResponse;

use crate::body::{Body, MaterialId};
use crate::error::{Result, ensure};
use crate::vector::{Aabb, Vec2};
use broadphase::{BroadphaseEntry, BroadphaseGrid};
use std::collections::HashMap;

/// A stable reference to a body stored in a `World`. Indices are reused
/// after removal; the generation counter keeps a stale handle from
/// aliasing whatever gets inserted into the freed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

struct Slot {
    body: Body,
    generation: u32,
}

/// Configuration recognized by the `World`, mirroring the documented
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub gravity: Vec2,
    pub penetration_threshold: f32,
    pub penetration_iterations: u32,
    pub bitmask_grid_size: (u32, u32),
    /// World extent the broad-phase grid maps cells against. Bodies
    /// outside these bounds are clamped to the nearest edge cell rather
    /// than dropped (see [`broadphase::BroadphaseGrid`]).
    pub bounds: Aabb,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.8),
            penetration_threshold: 0.3,
            penetration_iterations: 1,
            bitmask_grid_size: (32, 32),
            bounds: Aabb::from_rect(-500.0, -500.0, 500.0, 500.0),
        }
    }
}

pub struct World {
    slots: Vec<Option<Slot>>,
    free: Vec<u32>,
    config: WorldConfig,
    materials: HashMap<MaterialId, MaterialResponse>,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self { slots: Vec::new(), free: Vec::new(), config, materials: HashMap::new() }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn set_material(&mut self, id: MaterialId, response: MaterialResponse) {
        self.materials.insert(id, response);
    }

    fn material_pair(&self, a: MaterialId, b: MaterialId) -> MaterialResponse {
        let ra = self.materials.get(&a).copied().unwrap_or_default();
        let rb = self.materials.get(&b).copied().unwrap_or_default();
        MaterialResponse {
            restitution: ra.restitution.max(rb.restitution),
            friction: (ra.friction * rb.friction).sqrt(),
        }
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            let generation = slot.as_ref().map_or(0, |s| s.generation) + 1;
            *slot = Some(Slot { body, generation });
            BodyHandle { index, generation }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Some(Slot { body, generation: 0 }));
            BodyHandle { index, generation: 0 }
        }
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.as_ref().map(|s| s.generation) != Some(handle.generation) {
            return None;
        }
        let removed = slot.take()?;
        self.free.push(handle.index);
        Some(removed.body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        let slot = self.slots.get(handle.index as usize)?.as_ref()?;
        (slot.generation == handle.generation).then_some(&slot.body)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let slot = self.slots.get_mut(handle.index as usize)?.as_mut()?;
        (slot.generation == handle.generation).then_some(&mut slot.body)
    }

    fn live_handles(&self) -> Vec<BodyHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| BodyHandle { index: i as u32, generation: s.generation }))
            .collect()
    }

    pub fn bodies_intersecting(&self, point: Vec2) -> Vec<BodyHandle> {
        self.live_handles().into_iter().filter(|h| self.body(*h).is_some_and(|b| b.contains(point))).collect()
    }

    pub fn raycast(&self, a: Vec2, b: Vec2) -> Option<(BodyHandle, Vec2)> {
        let mut best: Option<(BodyHandle, f32, Vec2)> = None;
        for handle in self.live_handles() {
            let body = self.body(handle).unwrap();
            if let Some((t, point)) = body.raycast(a, b) {
                if best.as_ref().is_none_or(|(_, best_t, _)| t < *best_t) {
                    best = Some((handle, t, point));
                }
            }
        }
        best.map(|(handle, _, point)| (handle, point))
    }

    /// Runs the full pipeline once. Rejects `dt <= 0.0` or non-finite
    /// `dt` before touching any body.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        ensure!(dt.is_finite() && dt > 0.0, "World::step dt must be finite and positive, got {dt}");

        let handles = self.live_handles();

        for &handle in &handles {
            let body = self.body_mut(handle).expect("live handle");
            body.accumulate_forces();
            body.integrate(dt);
        }

        for &handle in &handles {
            let body = self.body_mut(handle).expect("live handle");
            body.dampen_velocity();
            body.derive_position_and_angle(dt);
            body.update_aabb(dt);
        }

        let iterations = self.config.penetration_iterations.max(1);
        for pass in 0..iterations {
            self.narrow_and_resolve(&handles);
            log::trace!("penetration pass {pass} of {iterations} complete");
        }

        log::debug!("step(dt={dt}) advanced {} bodies", handles.len());
        Ok(())
    }

    fn narrow_and_resolve(&mut self, handles: &[BodyHandle]) {
        let grid = BroadphaseGrid::new(self.config.bounds, self.config.bitmask_grid_size.0, self.config.bitmask_grid_size.1);
        let entries: Vec<BroadphaseEntry> = handles
            .iter()
            .map(|&h| {
                let body = self.body(h).expect("live handle");
                let (col_mask, row_mask) = grid.masks_for(body.aabb());
                BroadphaseEntry { aabb: body.aabb(), col_mask, row_mask, filter: body.collision_filter, is_static: body.is_static() }
            })
            .collect();

        for (i, j) in broadphase::candidate_pairs(&entries) {
            let ha = handles[i];
            let hb = handles[j];
            let ia = ha.index as usize;
            let ib = hb.index as usize;

            let contacts = {
                let body_a = &self.slots[ia].as_ref().unwrap().body;
                let body_b = &self.slots[ib].as_ref().unwrap().body;
                narrowphase::detect_pair(body_a, body_b)
            };
            if contacts.is_empty() {
                continue;
            }

            let (material_a, material_b) = {
                let body_a = &self.slots[ia].as_ref().unwrap().body;
                let body_b = &self.slots[ib].as_ref().unwrap().body;
                (body_a.material, body_b.material)
            };
            let response = self.material_pair(material_a, material_b);

            let (body_a, body_b) = self.pair_mut(ia, ib);
            for contact in &contacts {
                resolve::resolve_contact((body_a, body_b), contact, response);
            }
        }
    }

    fn pair_mut(&mut self, ia: usize, ib: usize) -> (&mut Body, &mut Body) {
        assert_ne!(ia, ib, "pair_mut requires distinct indices");
        if ia < ib {
            let (left, right) = self.slots.split_at_mut(ib);
            (&mut left[ia].as_mut().unwrap().body, &mut right[0].as_mut().unwrap().body)
        } else {
            let (left, right) = self.slots.split_at_mut(ia);
            (&mut right[0].as_mut().unwrap().body, &mut left[ib].as_mut().unwrap().body)
        }
    }
}
