use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use handscene_core::{
    BackendError, Color, ObjectHandle, PerspectiveView, SceneBackend, ScreenProjector, ShapeKind,
    Viewport,
};

/// What the renderer draws for one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub kind: ShapeKind,
    pub position: Vec3,
    pub scale: f32,
    pub color: Color,
    pub outline: Color,
    pub rotation: Vec2,
}

/// Retained scene for the wgpu renderer. Objects draw in handle order.
pub struct NativeBackend {
    view: PerspectiveView,
    objects: BTreeMap<u32, SceneObject>,
    next_handle: u32,
    disposal_active: bool,
}

impl NativeBackend {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            view: PerspectiveView::new(viewport),
            objects: BTreeMap::new(),
            next_handle: 1,
            disposal_active: false,
        }
    }

    #[inline]
    pub fn view(&self) -> &PerspectiveView {
        &self.view
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.view.resize(viewport);
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn disposal_active(&self) -> bool {
        self.disposal_active
    }

    fn object(&mut self, handle: ObjectHandle) -> Result<&mut SceneObject, BackendError> {
        self.objects
            .get_mut(&handle.0)
            .ok_or(BackendError::UnknownHandle(handle))
    }
}

impl ScreenProjector for NativeBackend {
    fn project_to_screen(&self, point: Vec3) -> Vec2 {
        self.view.project_to_screen(point)
    }

    fn viewport(&self) -> Viewport {
        self.view.viewport()
    }
}

impl SceneBackend for NativeBackend {
    fn create_object(
        &mut self,
        kind: ShapeKind,
        position: Vec3,
        color: Color,
    ) -> Result<ObjectHandle, BackendError> {
        let handle = self.next_handle;
        self.next_handle = self
            .next_handle
            .checked_add(1)
            .ok_or_else(|| BackendError::call("create_object", "handle space exhausted"))?;
        self.objects.insert(
            handle,
            SceneObject {
                kind,
                position,
                scale: 1.0,
                color,
                outline: Color::WHITE,
                rotation: Vec2::ZERO,
            },
        );
        Ok(ObjectHandle(handle))
    }

    fn remove_object(&mut self, handle: ObjectHandle) -> Result<(), BackendError> {
        self.objects
            .remove(&handle.0)
            .map(|_| ())
            .ok_or(BackendError::UnknownHandle(handle))
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
        if active {
            log::debug!("[scene] disposal zone armed");
        }
        self.disposal_active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> NativeBackend {
        NativeBackend::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn create_then_remove() {
        let mut b = backend();
        let h = b
            .create_object(ShapeKind::Cone, Vec3::ONE, Color(0x00FFFF))
            .unwrap();
        assert_eq!(b.len(), 1);
        b.remove_object(h).unwrap();
        assert_eq!(b.len(), 0);
        assert!(matches!(
            b.remove_object(h),
            Err(BackendError::UnknownHandle(_))
        ));
    }

    #[test]
    fn setters_update_the_object() {
        let mut b = backend();
        let h = b
            .create_object(ShapeKind::Box, Vec3::ZERO, Color(0xFF00FF))
            .unwrap();
        b.set_position(h, Vec3::new(1.0, 2.0, 0.0)).unwrap();
        b.set_scale(h, 2.0).unwrap();
        b.set_outline_color(h, Color(0xFF0000)).unwrap();
        b.set_rotation(h, Vec2::splat(0.3)).unwrap();
        let obj = b.objects().next().unwrap();
        assert_eq!(obj.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(obj.scale, 2.0);
        assert_eq!(obj.outline, Color(0xFF0000));
        assert_eq!(obj.rotation, Vec2::splat(0.3));
    }

    #[test]
    fn unknown_handle_errors() {
        let mut b = backend();
        assert!(b.set_scale(ObjectHandle(42), 1.0).is_err());
    }
}
