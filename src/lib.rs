#![cfg(target_arch = "wasm32")]
use handscene_core::{
    Arbiter, FrameClock, InteractionConfig, SceneMutator, ShapeRegistry, Viewport,
};
use wasm_bindgen::prelude::*;

mod bridge;
mod constants;
mod dom;
mod overlay;
mod results;

use bridge::ThreeBackend;
use overlay::LandmarkOverlay;
use results::RawResults;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("handscene-web starting");
    Ok(())
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

/// Optional tuning object from the page. `undefined`/`null` means defaults.
fn load_config(value: JsValue) -> anyhow::Result<InteractionConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(InteractionConfig::default());
    }
    let config: InteractionConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| anyhow::anyhow!("invalid config object: {}", e))?;
    log::info!("[config] loaded interaction config from page");
    Ok(config)
}

/// One gesture session bound to the page's three.js scene.
///
/// The page feeds every MediaPipe result to [`WebApp::on_results`] and calls
/// [`WebApp::tick`] once per animation frame before rendering.
#[wasm_bindgen]
pub struct WebApp {
    arbiter: Arbiter,
    scene: SceneMutator<ThreeBackend>,
    clock: FrameClock,
    overlay: Option<LandmarkOverlay>,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WebApp, JsValue> {
        Self::build(config).map_err(to_js)
    }

    fn build(config: JsValue) -> anyhow::Result<WebApp> {
        let config = load_config(config)?;
        let arbiter = Arbiter::new(config)?;
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let (w, h) = dom::window_size().ok_or_else(|| anyhow::anyhow!("no window size"))?;
        let overlay = LandmarkOverlay::attach(&document);
        if overlay.is_none() {
            log::info!("no #{} canvas; landmark debug drawing off", constants::DEBUG_CANVAS_ID);
        }
        let seed = match (js_sys::Math::random() * u32::MAX as f64) as u64 {
            0 => constants::FALLBACK_SEED,
            s => s,
        };
        let backend = ThreeBackend::new(Viewport::new(w, h), document);
        Ok(WebApp {
            arbiter,
            scene: SceneMutator::new(ShapeRegistry::new(seed), backend),
            clock: FrameClock::start(),
            overlay,
        })
    }

    /// Run one gesture pass over a MediaPipe `Results` object. Never throws:
    /// a results object that does not decode is logged and skipped, leaving
    /// the interaction state untouched.
    #[wasm_bindgen(js_name = onResults)]
    pub fn on_results(&mut self, results: JsValue) {
        let raw: RawResults = match serde_wasm_bindgen::from_value(results) {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("[gesture] skipping undecodable results: {}", e);
                return;
            }
        };
        let frame = raw.into_frame();
        if let Some(overlay) = &self.overlay {
            overlay.draw(&frame);
        }
        let report = self
            .arbiter
            .process_frame(&frame, self.clock.now(), &mut self.scene);
        for event in &report.events {
            log::debug!("[gesture] {:?}", event);
        }
    }

    /// Advance the idle spin of shapes no hand is holding.
    pub fn tick(&mut self) {
        self.arbiter.advance_idle_rotation(&mut self.scene);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.scene
            .backend_mut()
            .resize(Viewport::new(width, height));
    }

    #[wasm_bindgen(getter, js_name = shapeCount)]
    pub fn shape_count(&self) -> usize {
        self.scene.registry().len()
    }
}
