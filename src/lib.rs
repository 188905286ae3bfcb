//! A 2D soft-body physics engine: point masses connected by spring,
//! gas-pressure, and shape-matching internal forces, stepped forward
//! under external forces and resolved against other soft bodies via
//! broad-phase/narrow-phase collision.
//!
//! The per-step pipeline lives on [`world::World`]; see its module docs
//! for the exact phase ordering.

pub mod body;
pub mod component;
pub mod error;
pub mod point_mass;
pub mod shape;
pub mod vector;
pub mod world;

pub use body::Body;
pub use component::BodyComponent;
pub use error::{Error, Result};
pub use point_mass::PointMass;
pub use shape::ClosedShape;
pub use vector::{Aabb, Vec2};
pub use world::{BodyHandle, World, WorldConfig};
