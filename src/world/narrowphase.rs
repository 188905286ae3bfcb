//! Narrow phase: for a candidate pair, test every point mass of one body
//! against containment in the other, and record the contact geometry
//! needed to resolve it as an impulse.

use crate::body::Body;
use crate::vector::Vec2;

/// Which of the pair's two bodies a [`Contact`] field refers to — kept
/// pair-local rather than naming a `BodyHandle` so the same contact list
/// can be resolved against either borrow order the caller holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// One colliding point mass and the edge of the opposite body it
/// penetrated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub point_side: Side,
    pub point_index: usize,
    pub e1: usize,
    pub e2: usize,
    pub t: f32,
    pub hit_point: Vec2,
    pub normal: Vec2,
    pub penetration: f32,
}

/// Tests every point of `a` against containment in `b`, then every point
/// of `b` against containment in `a`. Order within each direction
/// follows point-mass index; `a`-into-`b` contacts precede `b`-into-`a`.
pub fn detect_pair(a: &Body, b: &Body) -> Vec<Contact> {
    let mut contacts = Vec::new();
    collect_direction(a, b, Side::A, &mut contacts);
    collect_direction(b, a, Side::B, &mut contacts);
    contacts
}

fn collect_direction(points_of: &Body, edges_of: &Body, point_side: Side, out: &mut Vec<Contact>) {
    for (index, p) in points_of.point_masses().iter().enumerate() {
        if !edges_of.contains(p.position) {
            continue;
        }
        let edge = edges_of.closest_edge_unconditional(p.position);
        out.push(Contact {
            point_side,
            point_index: index,
            e1: edge.e1,
            e2: edge.e2,
            t: edge.t,
            hit_point: edge.hit_point,
            normal: edge.normal,
            penetration: edge.distance,
        });
    }
}
