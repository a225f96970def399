// Registry and mutator behavior: palette order, nearest-shape lookup and
// keeping the rendering backend in step with the registry.

mod common;

use common::*;
use glam::{Vec2, Vec3};
use handscene_core::*;

#[test]
fn palette_cycles_in_order_and_wraps() {
    let mut palette = Palette::default();
    let colors: Vec<u32> = (0..NEON_PALETTE.len() + 2)
        .map(|_| palette.next_color().0)
        .collect();
    assert_eq!(&colors[..NEON_PALETTE.len()], &NEON_PALETTE[..]);
    assert_eq!(colors[NEON_PALETTE.len()], NEON_PALETTE[0]);
    assert_eq!(colors[NEON_PALETTE.len() + 1], NEON_PALETTE[1]);
}

#[test]
fn creation_and_recolor_share_one_palette_cursor() {
    let mut registry = ShapeRegistry::new(1);
    let a = registry.create(ShapeKind::Box, Vec3::ZERO);
    assert_eq!(registry.next_color(), Color(NEON_PALETTE[1]));
    let b = registry.create(ShapeKind::Cone, Vec3::ONE);
    assert_eq!(registry.get(a).unwrap().color, Color(NEON_PALETTE[0]));
    assert_eq!(registry.get(b).unwrap().color, Color(NEON_PALETTE[2]));
}

#[test]
fn new_shapes_start_at_unit_scale_with_kind_radius() {
    let mut registry = ShapeRegistry::new(1);
    let id = registry.create(ShapeKind::Cylinder, Vec3::new(1.0, 2.0, 0.0));
    let shape = registry.get(id).unwrap();
    assert_eq!(shape.scale, 1.0);
    assert_eq!(shape.outline, Color::WHITE);
    assert!(!shape.touched_by_left_hand);
    assert!((shape.scaled_radius() - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
}

#[test]
fn scaled_radius_follows_scale_and_falls_back_to_default() {
    let mut shape = Shape::new(ShapeId(1), ShapeKind::Sphere, Vec3::ZERO, Color::WHITE);
    shape.scale = 3.0;
    assert!((shape.scaled_radius() - 1.5).abs() < 1e-6);
    shape.bounding_radius = None;
    assert!((shape.scaled_radius() - DEFAULT_BOUNDING_RADIUS * 3.0).abs() < 1e-6);
}

#[test]
fn color_unpacks_to_unit_rgb() {
    assert_eq!(Color(0xFF0000).to_rgb(), [1.0, 0.0, 0.0]);
    assert_eq!(Color::WHITE.to_rgb(), [1.0, 1.0, 1.0]);
    assert_eq!(ShapeId(7).to_string(), "#7");
}

#[test]
fn ids_are_never_reused() {
    let mut registry = ShapeRegistry::new(1);
    let a = registry.create(ShapeKind::Box, Vec3::ZERO);
    registry.remove(a);
    let b = registry.create(ShapeKind::Box, Vec3::ZERO);
    assert_ne!(a, b);
    assert!(!registry.contains(a));
}

#[test]
fn random_kinds_come_from_the_pool() {
    let mut registry = ShapeRegistry::new(99).with_kinds(&[ShapeKind::Cone, ShapeKind::Sphere]);
    for _ in 0..32 {
        let id = registry.create_random(Vec3::ZERO);
        let kind = registry.get(id).unwrap().kind;
        assert!(matches!(kind, ShapeKind::Cone | ShapeKind::Sphere));
    }
}

#[test]
fn same_seed_same_kinds() {
    let kinds = |seed| {
        let mut registry = ShapeRegistry::new(seed);
        (0..16)
            .map(|_| {
                let id = registry.create_random(Vec3::ZERO);
                registry.get(id).unwrap().kind
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(kinds(42), kinds(42));
}

#[test]
fn nearest_uses_strict_threshold() {
    let mut registry = ShapeRegistry::new(1);
    let id = registry.create(ShapeKind::Box, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(registry.find_nearest(Vec3::ZERO, 2.0), None);
    assert_eq!(registry.find_nearest(Vec3::ZERO, 2.001), Some(id));
}

#[test]
fn nearest_prefers_closest_and_first_on_ties() {
    let mut registry = ShapeRegistry::new(1);
    let first = registry.create(ShapeKind::Box, Vec3::new(1.0, 0.0, 0.0));
    let _twin = registry.create(ShapeKind::Box, Vec3::new(-1.0, 0.0, 0.0));
    let closer = registry.create(ShapeKind::Box, Vec3::new(0.0, 0.5, 0.0));

    assert_eq!(registry.find_nearest(Vec3::ZERO, 2.0), Some(closer));
    registry.remove(closer);
    assert_eq!(registry.find_nearest(Vec3::ZERO, 2.0), Some(first));
}

#[test]
fn nearest_can_exclude_a_shape() {
    let mut registry = ShapeRegistry::new(1);
    let a = registry.create(ShapeKind::Box, Vec3::ZERO);
    let b = registry.create(ShapeKind::Box, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(registry.find_nearest_excluding(Vec3::ZERO, 2.0, Some(a)), Some(b));
    assert_eq!(registry.find_nearest_excluding(Vec3::ZERO, 0.5, Some(a)), None);
}

#[test]
fn nearest_on_empty_registry_or_nan_is_none() {
    let mut registry = ShapeRegistry::new(1);
    assert_eq!(registry.find_nearest(Vec3::ZERO, 2.0), None);
    registry.create(ShapeKind::Box, Vec3::ZERO);
    assert_eq!(registry.find_nearest(Vec3::splat(f32::NAN), 2.0), None);
}

#[test]
fn create_registers_and_attaches_backend_object() {
    let mut scene = boxes_only();
    let id = scene.apply_create(ShapeKind::Sphere, Vec3::new(1.0, -1.0, 0.0));

    let handle = scene.handle_of(id).unwrap();
    let object = &scene.backend().objects[&handle];
    assert_eq!(object.kind, ShapeKind::Sphere);
    assert_eq!(object.position, Vec3::new(1.0, -1.0, 0.0));
    assert_eq!(object.color, Color(NEON_PALETTE[0]));
}

#[test]
fn mutations_reach_registry_and_backend() {
    let mut scene = boxes_only();
    let id = scene.apply_create(ShapeKind::Box, Vec3::ZERO);
    let handle = scene.handle_of(id).unwrap();

    assert!(scene.apply_move(id, Vec3::new(2.0, 1.0, 0.0)));
    assert!(scene.apply_scale(id, 1.5));
    assert_eq!(scene.apply_recolor(id), Some(Color(NEON_PALETTE[1])));
    assert!(scene.apply_outline(id, Color(OUTLINE_DISPOSAL)));
    assert!(scene.apply_rotation(id, Vec2::splat(0.5)));
    assert!(scene.apply_rotation(id, Vec2::splat(0.5)));

    let shape = scene.registry().get(id).unwrap().clone();
    let object = &scene.backend().objects[&handle];
    assert_eq!(shape.position, object.position);
    assert_eq!(shape.scale, object.scale);
    assert_eq!(shape.color, object.color);
    assert_eq!(object.outline, Color(OUTLINE_DISPOSAL));
    assert_eq!(object.rotation, Vec2::ONE);
}

#[test]
fn delete_is_idempotent() {
    let mut scene = boxes_only();
    let id = scene.apply_create(ShapeKind::Box, Vec3::ZERO);

    assert!(scene.apply_delete(id));
    assert!(!scene.apply_delete(id));
    assert_eq!(scene.backend().removals, 1);
    assert!(scene.registry().is_empty());
    assert_eq!(scene.handle_of(id), None);
}

#[test]
fn mutations_on_removed_shape_are_no_ops() {
    let mut scene = boxes_only();
    let id = scene.apply_create(ShapeKind::Box, Vec3::ZERO);
    scene.apply_delete(id);

    assert!(!scene.apply_move(id, Vec3::ONE));
    assert!(!scene.apply_scale(id, 2.0));
    assert_eq!(scene.apply_recolor(id), None);
    assert!(!scene.apply_outline(id, Color::WHITE));
    assert!(!scene.set_touch_latch(id, true));
    assert!(!scene.apply_rotation(id, Vec2::ONE));
}

#[test]
fn backend_failure_is_swallowed() {
    let mut scene = boxes_only();
    let id = scene.apply_create(ShapeKind::Box, Vec3::ZERO);
    let handle = scene.handle_of(id).unwrap();
    scene.backend_mut().objects.remove(&handle);

    assert!(scene.apply_move(id, Vec3::ONE));
    assert_eq!(scene.registry().get(id).unwrap().position, Vec3::ONE);
    assert!(scene.apply_delete(id));
    assert_eq!(scene.backend().removals, 0);
    assert!(scene.registry().is_empty());
}

#[test]
fn disposal_signal_forwards_only_changes() {
    let mut scene = boxes_only();
    scene.set_disposal_active(false);
    scene.set_disposal_active(true);
    scene.set_disposal_active(true);
    scene.set_disposal_active(false);

    assert_eq!(scene.backend().disposal_toggles, 2);
    assert!(!scene.disposal_active());
}

#[test]
fn touch_latch_is_registry_only() {
    let mut scene = boxes_only();
    let id = scene.apply_create(ShapeKind::Box, Vec3::ZERO);
    assert!(scene.set_touch_latch(id, true));
    assert!(scene.registry().get(id).unwrap().touched_by_left_hand);
}
