//! Applies scene mutations to the shape registry and the rendering engine.

use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

use crate::camera::ScreenProjector;
use crate::error::BackendError;
use crate::registry::ShapeRegistry;
use crate::shape::{Color, ObjectHandle, ShapeId, ShapeKind};

/// The rendering engine as seen from the core.
///
/// Implementations own the retained scene graph, camera and render loop. The
/// core never reads pixels back; projection is the only query.
pub trait SceneBackend: ScreenProjector {
    fn create_object(
        &mut self,
        kind: ShapeKind,
        position: Vec3,
        color: Color,
    ) -> Result<ObjectHandle, BackendError>;
    fn remove_object(&mut self, handle: ObjectHandle) -> Result<(), BackendError>;
    fn set_position(&mut self, handle: ObjectHandle, position: Vec3) -> Result<(), BackendError>;
    fn set_scale(&mut self, handle: ObjectHandle, factor: f32) -> Result<(), BackendError>;
    fn set_color(&mut self, handle: ObjectHandle, color: Color) -> Result<(), BackendError>;
    fn set_outline_color(&mut self, handle: ObjectHandle, color: Color)
        -> Result<(), BackendError>;
    fn set_rotation(&mut self, handle: ObjectHandle, rotation: Vec2) -> Result<(), BackendError>;
    /// The single UI signal: whether the disposal-zone indicator is lit.
    fn set_disposal_active(&mut self, active: bool);
}

/// Registry plus engine, kept in step.
///
/// Every `apply_*` call is a no-op returning `false`/`None` for an id that is
/// no longer registered. Engine failures are logged and swallowed so a bad
/// frame never aborts gesture processing.
pub struct SceneMutator<B: SceneBackend> {
    registry: ShapeRegistry,
    backend: B,
    handles: FnvHashMap<ShapeId, ObjectHandle>,
    disposal_active: bool,
}

fn log_backend_error(id: ShapeId, err: BackendError) {
    log::warn!("[scene] backend error for shape {}: {}", id, err);
}

impl<B: SceneBackend> SceneMutator<B> {
    pub fn new(registry: ShapeRegistry, backend: B) -> Self {
        Self {
            registry,
            backend,
            handles: FnvHashMap::default(),
            disposal_active: false,
        }
    }

    #[inline]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn disposal_active(&self) -> bool {
        self.disposal_active
    }

    #[inline]
    pub fn handle_of(&self, id: ShapeId) -> Option<ObjectHandle> {
        self.handles.get(&id).copied()
    }

    pub fn apply_create(&mut self, kind: ShapeKind, position: Vec3) -> ShapeId {
        let id = self.registry.create(kind, position);
        self.attach(id);
        id
    }

    /// Create a shape of a random kind, as the two-hand gesture does.
    pub fn apply_create_random(&mut self, position: Vec3) -> ShapeId {
        let id = self.registry.create_random(position);
        self.attach(id);
        id
    }

    fn attach(&mut self, id: ShapeId) {
        let Some(shape) = self.registry.get(id) else {
            return;
        };
        let (kind, position, color) = (shape.kind, shape.position, shape.color);
        match self.backend.create_object(kind, position, color) {
            Ok(handle) => {
                self.handles.insert(id, handle);
                log::info!(
                    "[scene] created {} {} at ({:.2},{:.2},{:.2})",
                    kind.as_str(),
                    id,
                    position.x,
                    position.y,
                    position.z
                );
            }
            Err(e) => log_backend_error(id, e),
        }
    }

    pub fn apply_move(&mut self, id: ShapeId, position: Vec3) -> bool {
        let Some(shape) = self.registry.get_mut(id) else {
            return false;
        };
        shape.position = position;
        if let Some(&handle) = self.handles.get(&id) {
            if let Err(e) = self.backend.set_position(handle, position) {
                log_backend_error(id, e);
            }
        }
        true
    }

    pub fn apply_scale(&mut self, id: ShapeId, factor: f32) -> bool {
        let Some(shape) = self.registry.get_mut(id) else {
            return false;
        };
        shape.scale = factor;
        if let Some(&handle) = self.handles.get(&id) {
            if let Err(e) = self.backend.set_scale(handle, factor) {
                log_backend_error(id, e);
            }
        }
        true
    }

    pub fn apply_color(&mut self, id: ShapeId, color: Color) -> bool {
        let Some(shape) = self.registry.get_mut(id) else {
            return false;
        };
        shape.color = color;
        if let Some(&handle) = self.handles.get(&id) {
            if let Err(e) = self.backend.set_color(handle, color) {
                log_backend_error(id, e);
            }
        }
        true
    }

    /// Advance the palette and paint the shape with it.
    pub fn apply_recolor(&mut self, id: ShapeId) -> Option<Color> {
        if !self.registry.contains(id) {
            return None;
        }
        let color = self.registry.next_color();
        self.apply_color(id, color);
        Some(color)
    }

    /// Outline color; the engine is only told when it changes.
    pub fn apply_outline(&mut self, id: ShapeId, color: Color) -> bool {
        let Some(shape) = self.registry.get_mut(id) else {
            return false;
        };
        if shape.outline == color {
            return true;
        }
        shape.outline = color;
        if let Some(&handle) = self.handles.get(&id) {
            if let Err(e) = self.backend.set_outline_color(handle, color) {
                log_backend_error(id, e);
            }
        }
        true
    }

    /// Registry-only: the left-hand touch latch has no engine counterpart.
    pub fn set_touch_latch(&mut self, id: ShapeId, touched: bool) -> bool {
        let Some(shape) = self.registry.get_mut(id) else {
            return false;
        };
        shape.touched_by_left_hand = touched;
        true
    }

    pub fn apply_rotation(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.registry.get_mut(id) else {
            return false;
        };
        shape.rotation += delta;
        let rotation = shape.rotation;
        if let Some(&handle) = self.handles.get(&id) {
            if let Err(e) = self.backend.set_rotation(handle, rotation) {
                log_backend_error(id, e);
            }
        }
        true
    }

    /// Remove a shape from the registry and the engine. Returns `false` if it
    /// was already gone.
    pub fn apply_delete(&mut self, id: ShapeId) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        if let Some(handle) = self.handles.remove(&id) {
            if let Err(e) = self.backend.remove_object(handle) {
                log_backend_error(id, e);
            }
        }
        log::info!("[scene] deleted {}", id);
        true
    }

    /// Light or clear the disposal-zone indicator. Forwarded only on change.
    pub fn set_disposal_active(&mut self, active: bool) {
        if self.disposal_active != active {
            self.disposal_active = active;
            self.backend.set_disposal_active(active);
        }
    }
}
