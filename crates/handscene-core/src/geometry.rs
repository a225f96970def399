//! Coordinate mapping, distances and the disposal-zone hit test.

use glam::{Vec2, Vec3};

use crate::camera::{ScreenProjector, Viewport};
use crate::config::DisposalZone;
use crate::constants::WORLD_PLANE_SIZE;

/// Map normalized camera coordinates onto the world plane at z = 0.
///
/// The vertical axis is flipped: camera y grows downward, world y upward.
#[inline]
pub fn map_to_world(norm_x: f32, norm_y: f32) -> Vec3 {
    Vec3::new(
        (norm_x - 0.5) * WORLD_PLANE_SIZE,
        (0.5 - norm_y) * WORLD_PLANE_SIZE,
        0.0,
    )
}

/// Distance in the x/y plane, ignoring depth.
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.truncate().distance(b.truncate())
}

#[inline]
pub fn spatial_distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

/// Pixel rectangle of the zone: `(left, top, right, bottom)`.
pub fn disposal_zone_rect(zone: &DisposalZone, viewport: Viewport) -> (f32, f32, f32, f32) {
    let left = viewport.width - zone.margin - zone.size;
    let top = viewport.height - zone.margin - zone.size;
    (left, top, left + zone.size, top + zone.size)
}

/// Test an already-projected screen point against the zone.
///
/// The x coordinate is mirrored first: the camera feed is shown flipped, so a
/// shape rendered on the left of the framebuffer appears on the right.
pub fn screen_point_in_disposal_zone(
    screen: Vec2,
    zone: &DisposalZone,
    viewport: Viewport,
) -> bool {
    let (left, top, right, bottom) = disposal_zone_rect(zone, viewport);
    let mirrored_x = viewport.width - screen.x;
    mirrored_x >= left && mirrored_x <= right && screen.y >= top && screen.y <= bottom
}

pub fn is_in_disposal_zone(
    world_point: Vec3,
    projector: &impl ScreenProjector,
    zone: &DisposalZone,
) -> bool {
    let screen = projector.project_to_screen(world_point);
    screen_point_in_disposal_zone(screen, zone, projector.viewport())
}
