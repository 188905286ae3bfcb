//! S5: two identical soft squares approach head-on and should separate
//! after contact is resolved, rather than passing through or sticking.

use softbody2d::component::{Pressure, Spring};
use softbody2d::world::MaterialResponse;
use softbody2d::{Body, ClosedShape, Vec2, World, WorldConfig};

fn square_body(center: Vec2, velocity: Vec2) -> Body {
    let shape = ClosedShape::new(vec![
        Vec2::new(-0.5, -0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(0.5, 0.5),
        Vec2::new(-0.5, 0.5),
    ])
    .unwrap();
    let mut body = Body::new(shape, &[1.0; 4], center, 0.0, 1.0, false).unwrap();
    let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
    let spring = Spring::new(body.point_masses(), &edges, 200.0, 5.0, &[]).unwrap();
    body.attach(spring.into());
    body.attach(Pressure::new(20.0).into());
    for p in body.point_masses_mut() {
        p.velocity = velocity;
    }
    body
}

#[test]
fn approaching_bodies_separate_after_collision() {
    env_logger::try_init().ok();

    let config = WorldConfig { gravity: Vec2::ZERO, penetration_iterations: 2, ..WorldConfig::default() };
    let mut world = World::new(config);
    world.set_material(0, MaterialResponse { restitution: 1.0, friction: 0.0 });

    let left = world.add_body(square_body(Vec2::new(-2.0, 0.0), Vec2::new(1.0, 0.0)));
    let right = world.add_body(square_body(Vec2::new(2.0, 0.0), Vec2::new(-1.0, 0.0)));

    let dt = 1.0 / 120.0;
    let mut prev_separation = f32::MAX;
    let mut monotonic_run = 0usize;
    let mut saw_contact = false;

    for _ in 0..600 {
        world.step(dt).unwrap();
        let lx = world.body(left).unwrap().derived_position().x;
        let rx = world.body(right).unwrap().derived_position().x;
        let separation = rx - lx;

        if separation < 1.1 {
            saw_contact = true;
        }
        if saw_contact {
            if separation >= prev_separation {
                monotonic_run += 1;
            } else {
                monotonic_run = 0;
            }
        }
        prev_separation = separation;
        if monotonic_run >= 30 {
            break;
        }
    }

    assert!(saw_contact, "bodies never came into contact");
    assert!(monotonic_run >= 30, "separation did not grow monotonically after contact, run={monotonic_run}");
}
