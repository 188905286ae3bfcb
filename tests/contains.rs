//! S4: unit square centered at the origin — the boundary cases are
//! explicitly don't-care, only interior/exterior points are asserted.

use softbody2d::{Body, ClosedShape, Vec2};

#[test]
fn unit_square_contains_matches_expected_interior_and_exterior() {
    let shape = ClosedShape::new(vec![
        Vec2::new(-0.5, -0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(0.5, 0.5),
        Vec2::new(-0.5, 0.5),
    ])
    .unwrap();
    let body = Body::new(shape, &[1.0; 4], Vec2::ZERO, 0.0, 1.0, false).unwrap();

    assert!(body.contains(Vec2::new(0.0, 0.0)));
    assert!(!body.contains(Vec2::new(0.6, 0.0)));
    assert!(body.contains(Vec2::new(-0.4999, 0.4999)));

    let probes = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.3, -0.2),
        Vec2::new(2.0, 2.0),
        Vec2::new(-0.6, 0.1),
    ];
    for pt in probes {
        if body.contains(pt) {
            assert!(body.aabb().contains(pt), "contains({pt:?}) implies aabb().contains");
        }
    }
}
