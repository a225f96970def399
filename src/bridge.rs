//! three.js rendering backend, reached through the `handsceneEngine` glue
//! object the page installs (`web/engine.js`).
//!
//! Projection stays on the Rust side: [`PerspectiveView`] is built with the
//! same fov/near/far/eye as the three.js camera, so screen-space tests agree
//! with what the user sees.

use glam::{Vec2, Vec3};
use handscene_core::{
    BackendError, Color, ObjectHandle, PerspectiveView, SceneBackend, ScreenProjector, ShapeKind,
    Viewport,
};
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::dom;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = handsceneEngine, js_name = createObject)]
    fn js_create_object(kind: &str, x: f32, y: f32, z: f32, color: u32) -> Result<u32, JsValue>;

    #[wasm_bindgen(catch, js_namespace = handsceneEngine, js_name = removeObject)]
    fn js_remove_object(handle: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = handsceneEngine, js_name = setPosition)]
    fn js_set_position(handle: u32, x: f32, y: f32, z: f32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = handsceneEngine, js_name = setScale)]
    fn js_set_scale(handle: u32, factor: f32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = handsceneEngine, js_name = setColor)]
    fn js_set_color(handle: u32, color: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = handsceneEngine, js_name = setOutlineColor)]
    fn js_set_outline_color(handle: u32, color: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = handsceneEngine, js_name = setRotation)]
    fn js_set_rotation(handle: u32, x: f32, y: f32) -> Result<(), JsValue>;
}

fn call_failed(op: &'static str, err: JsValue) -> BackendError {
    BackendError::call(op, format!("{:?}", err))
}

pub struct ThreeBackend {
    view: PerspectiveView,
    document: web::Document,
}

impl ThreeBackend {
    pub fn new(viewport: Viewport, document: web::Document) -> Self {
        Self {
            view: PerspectiveView::new(viewport),
            document,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.view.resize(viewport);
    }
}

impl ScreenProjector for ThreeBackend {
    fn project_to_screen(&self, point: Vec3) -> Vec2 {
        self.view.project_to_screen(point)
    }

    fn viewport(&self) -> Viewport {
        self.view.viewport()
    }
}

impl SceneBackend for ThreeBackend {
    fn create_object(
        &mut self,
        kind: ShapeKind,
        position: Vec3,
        color: Color,
    ) -> Result<ObjectHandle, BackendError> {
        js_create_object(kind.as_str(), position.x, position.y, position.z, color.0)
            .map(ObjectHandle)
            .map_err(|e| call_failed("create_object", e))
    }

    fn remove_object(&mut self, handle: ObjectHandle) -> Result<(), BackendError> {
        js_remove_object(handle.0).map_err(|e| call_failed("remove_object", e))
    }

    fn set_position(&mut self, handle: ObjectHandle, position: Vec3) -> Result<(), BackendError> {
        js_set_position(handle.0, position.x, position.y, position.z)
            .map_err(|e| call_failed("set_position", e))
    }

    fn set_scale(&mut self, handle: ObjectHandle, factor: f32) -> Result<(), BackendError> {
        js_set_scale(handle.0, factor).map_err(|e| call_failed("set_scale", e))
    }

    fn set_color(&mut self, handle: ObjectHandle, color: Color) -> Result<(), BackendError> {
        js_set_color(handle.0, color.0).map_err(|e| call_failed("set_color", e))
    }

    fn set_outline_color(
        &mut self,
        handle: ObjectHandle,
        color: Color,
    ) -> Result<(), BackendError> {
        js_set_outline_color(handle.0, color.0).map_err(|e| call_failed("set_outline_color", e))
    }

    fn set_rotation(&mut self, handle: ObjectHandle, rotation: Vec2) -> Result<(), BackendError> {
        js_set_rotation(handle.0, rotation.x, rotation.y)
            .map_err(|e| call_failed("set_rotation", e))
    }

    fn set_disposal_active(&mut self, active: bool) {
        dom::set_recycle_bin_active(&self.document, active);
    }
}
