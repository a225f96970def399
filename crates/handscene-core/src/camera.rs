//! Perspective camera and screen projection.
//!
//! These types avoid platform-specific APIs so both frontends and the tests
//! share one projection path. The web frontend mirrors the three.js camera the
//! page renders with; the native frontend renders through the same matrices.

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{camera_eye, CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR};

/// Pixel dimensions of the render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Anything that can turn a world-space point into screen pixels.
///
/// Screen origin is the top-left corner, y grows downward.
pub trait ScreenProjector {
    fn project_to_screen(&self, point: Vec3) -> Vec2;
    fn viewport(&self) -> Viewport;
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The scene camera: 75° vertical fov, five units back from the origin.
    pub fn scene_default(viewport: Viewport) -> Self {
        Self {
            eye: camera_eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to pixel coordinates in `viewport`.
    pub fn project_to_screen(&self, point: Vec3, viewport: Viewport) -> Vec2 {
        let ndc = self.view_proj().project_point3(point);
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        )
    }
}

/// A [`Camera`] bound to the viewport it renders into.
#[derive(Clone, Debug)]
pub struct PerspectiveView {
    pub camera: Camera,
    pub viewport: Viewport,
}

impl PerspectiveView {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            camera: Camera::scene_default(viewport),
            viewport,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
    }
}

impl ScreenProjector for PerspectiveView {
    fn project_to_screen(&self, point: Vec3) -> Vec2 {
        self.camera.project_to_screen(point, self.viewport)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
