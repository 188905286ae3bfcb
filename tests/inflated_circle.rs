//! S3: a 16-sided polygon held together by edge springs and inflated by
//! gas pressure, no gravity, should settle into a stable near-circular
//! shape rather than collapsing or blowing up.

use softbody2d::component::{Pressure, Spring};
use softbody2d::vector::polygon_area;
use softbody2d::{Body, ClosedShape, Vec2, World, WorldConfig};

#[test]
fn inflated_polygon_settles_to_a_stable_area() {
    let shape = ClosedShape::regular_polygon(16, 1.0).unwrap();
    let rest_area = polygon_area(shape.local_vertices());

    let mut body = Body::new(shape, &[1.0; 16], Vec2::ZERO, 0.0, 1.0, false).unwrap();
    let edges: Vec<(usize, usize)> = (0..16).map(|i| (i, (i + 1) % 16)).collect();
    let spring = Spring::new(body.point_masses(), &edges, 300.0, 10.0, &[]).unwrap();
    body.attach(spring.into());
    body.attach(Pressure::new(40.0).into());

    let config = WorldConfig { gravity: Vec2::ZERO, ..WorldConfig::default() };
    let mut world = World::new(config);
    let handle = world.add_body(body);

    let dt = 1.0 / 240.0;
    for _ in 0..240 {
        world.step(dt).unwrap();
    }

    let settled = world.body(handle).unwrap();
    let max_speed = settled.point_masses().iter().map(|p| p.velocity.length()).fold(0.0f32, f32::max);
    assert!(max_speed < 1.0, "max_speed={max_speed}");

    let final_area = polygon_area(&settled.vertices());
    assert!(final_area > rest_area * 0.3, "final_area={final_area}, rest_area={rest_area}");
    assert!(final_area < rest_area * 5.0, "final_area={final_area}, rest_area={rest_area}");
}
