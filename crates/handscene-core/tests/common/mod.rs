// Shared fixtures: a recording rendering backend and hand builders.

#![allow(dead_code)]

use glam::{Vec2, Vec3};
use handscene_core::*;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub kind: ShapeKind,
    pub position: Vec3,
    pub scale: f32,
    pub color: Color,
    pub outline: Color,
    pub rotation: Vec2,
}

/// In-memory engine that remembers every object and counts removals.
pub struct RecordingBackend {
    pub view: PerspectiveView,
    pub objects: HashMap<ObjectHandle, Object>,
    pub next_handle: u32,
    pub removals: usize,
    pub disposal_active: bool,
    pub disposal_toggles: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            view: PerspectiveView::new(Viewport::new(1280.0, 720.0)),
            objects: HashMap::new(),
            next_handle: 0,
            removals: 0,
            disposal_active: false,
            disposal_toggles: 0,
        }
    }

    fn object(&mut self, handle: ObjectHandle) -> Result<&mut Object, BackendError> {
        self.objects
            .get_mut(&handle)
            .ok_or(BackendError::UnknownHandle(handle))
    }
}

impl ScreenProjector for RecordingBackend {
    fn project_to_screen(&self, point: Vec3) -> Vec2 {
        self.view.project_to_screen(point)
    }

    fn viewport(&self) -> Viewport {
        self.view.viewport()
    }
}

impl SceneBackend for RecordingBackend {
    fn create_object(
        &mut self,
        kind: ShapeKind,
        position: Vec3,
        color: Color,
    ) -> Result<ObjectHandle, BackendError> {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(
            handle,
            Object {
                kind,
                position,
                scale: 1.0,
                color,
                outline: Color::WHITE,
                rotation: Vec2::ZERO,
            },
        );
        Ok(handle)
    }

    fn remove_object(&mut self, handle: ObjectHandle) -> Result<(), BackendError> {
        self.objects
            .remove(&handle)
            .ok_or(BackendError::UnknownHandle(handle))?;
        self.removals += 1;
        Ok(())
    }

    fn set_position(&mut self, handle: ObjectHandle, position: Vec3) -> Result<(), BackendError> {
        self.object(handle)?.position = position;
        Ok(())
    }

    fn set_scale(&mut self, handle: ObjectHandle, factor: f32) -> Result<(), BackendError> {
        self.object(handle)?.scale = factor;
        Ok(())
    }

    fn set_color(&mut self, handle: ObjectHandle, color: Color) -> Result<(), BackendError> {
        self.object(handle)?.color = color;
        Ok(())
    }

    fn set_outline_color(
        &mut self,
        handle: ObjectHandle,
        color: Color,
    ) -> Result<(), BackendError> {
        self.object(handle)?.outline = color;
        Ok(())
    }

    fn set_rotation(&mut self, handle: ObjectHandle, rotation: Vec2) -> Result<(), BackendError> {
        self.object(handle)?.rotation = rotation;
        Ok(())
    }

    fn set_disposal_active(&mut self, active: bool) {
        self.disposal_active = active;
        self.disposal_toggles += 1;
    }
}

pub fn scene_with(kinds: &[ShapeKind]) -> SceneMutator<RecordingBackend> {
    SceneMutator::new(
        ShapeRegistry::new(7).with_kinds(kinds),
        RecordingBackend::new(),
    )
}

pub fn boxes_only() -> SceneMutator<RecordingBackend> {
    scene_with(&[ShapeKind::Box])
}

/// A hand whose landmarks all sit on the index tip except the thumb, which is
/// offset along x by `thumb_gap`.
pub fn hand(handedness: Handedness, x: f32, y: f32, thumb_gap: f32) -> HandObservation {
    let mut points = [Vec3::new(x, y, 0.0); LANDMARK_COUNT];
    points[THUMB_TIP] = Vec3::new(x + thumb_gap, y, 0.0);
    HandObservation::new(handedness, points)
}

pub const PINCH_GAP: f32 = 0.02;
pub const OPEN_GAP: f32 = 0.2;

pub fn pinching(handedness: Handedness, x: f32, y: f32) -> HandObservation {
    hand(handedness, x, y, PINCH_GAP)
}

pub fn open(handedness: Handedness, x: f32, y: f32) -> HandObservation {
    hand(handedness, x, y, OPEN_GAP)
}

pub fn frame(hands: Vec<HandObservation>) -> HandFrame {
    HandFrame::new(hands)
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Both hands pinching with index tips `spread` apart around the frame center.
pub fn two_hand_pinch(spread: f32) -> HandFrame {
    frame(vec![
        pinching(Handedness::Left, 0.5 - spread / 2.0, 0.5),
        pinching(Handedness::Right, 0.5 + spread / 2.0, 0.5),
    ])
}

pub fn both_open() -> HandFrame {
    frame(vec![
        open(Handedness::Left, 0.3, 0.5),
        open(Handedness::Right, 0.7, 0.5),
    ])
}

/// Normalized camera point that maps inside the disposal zone of a
/// 1280×720 viewport with the default camera.
pub const IN_ZONE: (f32, f32) = (0.02, 0.75);
