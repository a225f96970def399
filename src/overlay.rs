use handscene_core::HandFrame;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;

/// Debug canvas over the video: a dot on every thumb tip and index tip.
pub struct LandmarkOverlay {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl LandmarkOverlay {
    /// `None` when the page has no debug canvas or it cannot give a 2D context.
    pub fn attach(document: &web::Document) -> Option<Self> {
        let canvas = document
            .get_element_by_id(DEBUG_CANVAS_ID)?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn draw(&self, frame: &HandFrame) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        for hand in &frame.hands {
            let thumb = hand.thumb_tip();
            let index = hand.index_tip();
            self.dot(thumb.x as f64 * w, thumb.y as f64 * h, THUMB_TIP_FILL);
            self.dot(index.x as f64 * w, index.y as f64 * h, INDEX_TIP_FILL);
        }
    }

    fn dot(&self, x: f64, y: f64, fill: &str) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(x, y, TIP_MARKER_RADIUS_PX, 0.0, std::f64::consts::TAU);
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
    }
}
