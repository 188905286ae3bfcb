//! Impulse resolution: turns a [`Contact`] into a position correction
//! plus a velocity impulse, interpolating the colliding edge's two
//! flanking point masses by the contact's parametric `t`.

use crate::body::Body;
use crate::world::narrowphase::{Contact, Side};

/// Restitution and friction for a colliding material pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialResponse {
    pub restitution: f32,
    pub friction: f32,
}

impl Default for MaterialResponse {
    fn default() -> Self {
        Self { restitution: 0.0, friction: 0.0 }
    }
}

/// `bodies.0`/`bodies.1` correspond to `Side::A`/`Side::B` of `contact`.
pub fn resolve_contact(bodies: (&mut Body, &mut Body), contact: &Contact, response: MaterialResponse) {
    let (point_body, edge_body) = match contact.point_side {
        Side::A => (bodies.0, bodies.1),
        Side::B => (bodies.1, bodies.0),
    };

    let p = point_body.point_masses()[contact.point_index];
    let e1 = edge_body.point_masses()[contact.e1];
    let e2 = edge_body.point_masses()[contact.e2];

    let t = contact.t;
    let edge_vel = e1.velocity.lerp(e2.velocity, t);
    let normal = contact.normal;

    let wp = p.inv_mass();
    let we = (1.0 - t) * (1.0 - t) * e1.inv_mass() + t * t * e2.inv_mass();
    let total_w = wp + we;
    if total_w <= 0.0 {
        log::trace!("skipping contact with zero combined inverse mass (point {}, edge {}/{})", contact.point_index, contact.e1, contact.e2);
        return;
    }

    let penetration = contact.penetration.max(0.0);
    let point_mut = &mut point_body.point_masses_mut()[contact.point_index];
    point_mut.position += normal * (penetration * wp / total_w);

    {
        let edge_masses = edge_body.point_masses_mut();
        edge_masses[contact.e1].position -= normal * (penetration * ((1.0 - t) * e1.inv_mass()) / total_w);
        edge_masses[contact.e2].position -= normal * (penetration * (t * e2.inv_mass()) / total_w);
    }

    let relative_velocity = p.velocity - edge_vel;
    let closing_speed = relative_velocity.dot(normal);
    if closing_speed >= 0.0 {
        // Separating already — position correction above is enough.
        return;
    }

    let j = -(1.0 + response.restitution) * closing_speed / total_w;
    let point_mut = &mut point_body.point_masses_mut()[contact.point_index];
    point_mut.velocity += normal * (j * wp);
    {
        let edge_masses = edge_body.point_masses_mut();
        edge_masses[contact.e1].velocity -= normal * (j * (1.0 - t) * e1.inv_mass());
        edge_masses[contact.e2].velocity -= normal * (j * t * e2.inv_mass());
    }

    if response.friction > 0.0 {
        let tangent_velocity = relative_velocity - normal * closing_speed;
        let tangent_speed = tangent_velocity.length();
        if tangent_speed > f32::MIN_POSITIVE {
            let tangent = tangent_velocity / tangent_speed;
            let max_friction_impulse = response.friction * j.abs();
            let friction_j = (tangent_speed / total_w).min(max_friction_impulse);
            let point_mut = &mut point_body.point_masses_mut()[contact.point_index];
            point_mut.velocity -= tangent * (friction_j * wp);
            let edge_masses = edge_body.point_masses_mut();
            edge_masses[contact.e1].velocity += tangent * (friction_j * (1.0 - t) * e1.inv_mass());
            edge_masses[contact.e2].velocity += tangent * (friction_j * t * e2.inv_mass());
        }
    }
}
