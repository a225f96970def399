use glam::Vec3;

// Shared gesture/scene tuning constants used by both web and native frontends.
// `InteractionConfig::default()` is built from these.

// Camera-space → world-space mapping
pub const WORLD_PLANE_SIZE: f32 = 10.0; // normalized [0,1] spans this many world units

// Landmark indices (MediaPipe hand model)
pub const LANDMARK_COUNT: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

// Pinch / proximity thresholds (normalized camera units)
pub const PINCH_3D_THRESHOLD: f32 = 0.06;
pub const RIGHT_PINCH_2D_THRESHOLD: f32 = 0.07;
pub const INDEX_TIPS_CLOSE_THRESHOLD: f32 = 0.12;

// Selection and touch (world units)
pub const SELECT_RADIUS: f32 = 2.0;
pub const LEFT_FINGER_TOUCH_BUFFER: f32 = 0.25;
pub const DEFAULT_BOUNDING_RADIUS: f32 = 0.5;

// Right-hand sphere scaling: pinch distance range → scale factor range
pub const RIGHT_SCALE_PINCH_MIN: f32 = 0.025;
pub const RIGHT_SCALE_PINCH_MAX: f32 = 0.15;
pub const RIGHT_SCALE_FACTOR_MIN: f32 = 0.3;
pub const RIGHT_SCALE_FACTOR_MAX: f32 = 2.5;

// Two-hand creation
pub const CREATION_COOLDOWN_MS: u64 = 1000;
pub const MIN_BASELINE_DISTANCE: f32 = 0.001;

// Idle animation (radians per render frame, applied to x and y)
pub const IDLE_ROTATION_STEP: f32 = 0.01;

// Disposal zone, screen pixels anchored bottom-right
pub const DISPOSAL_ZONE_SIZE: f32 = 160.0;
pub const DISPOSAL_ZONE_MARGIN: f32 = 60.0;

// Colors
pub const NEON_PALETTE: [u32; 8] = [
    0xFF00FF, 0x00FFFF, 0xFF3300, 0x39FF14, 0xFF0099, 0x00FF00, 0xFF6600, 0xFFFF00,
];
pub const OUTLINE_IDLE: u32 = 0xFFFFFF;
pub const OUTLINE_DISPOSAL: u32 = 0xFF0000;

// Default perspective camera
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

#[inline]
pub fn camera_eye() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_Z)
}
