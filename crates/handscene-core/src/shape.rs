use glam::{Vec2, Vec3};
use std::fmt;

use crate::constants::{DEFAULT_BOUNDING_RADIUS, NEON_PALETTE, OUTLINE_IDLE};

/// Registry identity of a shape. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rendering-engine identity of the object backing a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Sphere,
    Cone,
    Cylinder,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [Self::Box, Self::Sphere, Self::Cone, Self::Cylinder];

    /// Radius of the bounding sphere of the unit primitive: a unit cube,
    /// a 0.5-radius sphere, and a 0.5-radius cone/cylinder of height 1.
    pub fn bounding_radius(self) -> f32 {
        match self {
            Self::Box => 0.75_f32.sqrt(),
            Self::Sphere => 0.5,
            Self::Cone | Self::Cylinder => 0.5_f32.sqrt(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Cone => "cone",
            Self::Cylinder => "cylinder",
        }
    }
}

/// 0xRRGGBB color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(OUTLINE_IDLE);

    pub fn to_rgb(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xFF) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xFF) as f32 / 255.0;
        let b = (self.0 & 0xFF) as f32 / 255.0;
        [r, g, b]
    }
}

/// Round-robin cursor over the neon palette.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    cursor: usize,
}

impl Palette {
    pub fn next_color(&mut self) -> Color {
        let color = Color(NEON_PALETTE[self.cursor]);
        self.cursor = (self.cursor + 1) % NEON_PALETTE.len();
        color
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub position: Vec3,
    pub scale: f32,
    pub color: Color,
    pub outline: Color,
    /// Idle spin around x and y, radians.
    pub rotation: Vec2,
    /// Left index tip was inside the touch radius last frame.
    pub touched_by_left_hand: bool,
    /// Unscaled bounding radius; `None` falls back to a default.
    pub bounding_radius: Option<f32>,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind, position: Vec3, color: Color) -> Self {
        Self {
            id,
            kind,
            position,
            scale: 1.0,
            color,
            outline: Color::WHITE,
            rotation: Vec2::ZERO,
            touched_by_left_hand: false,
            bounding_radius: Some(kind.bounding_radius()),
        }
    }

    /// Bounding radius after applying the current scale.
    #[inline]
    pub fn scaled_radius(&self) -> f32 {
        self.bounding_radius.unwrap_or(DEFAULT_BOUNDING_RADIUS) * self.scale
    }

    #[inline]
    pub fn is_sphere(&self) -> bool {
        self.kind == ShapeKind::Sphere
    }
}
