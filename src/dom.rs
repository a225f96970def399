use web_sys as web;

use crate::constants::{RECYCLE_BIN_ACTIVE_CLASS, RECYCLE_BIN_ID};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// CSS pixel size of the window, the space three.js renders into.
pub fn window_size() -> Option<(f32, f32)> {
    let window = web::window()?;
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some((w as f32, h as f32))
}

/// Light or clear the recycle-bin element. A page without one is fine.
pub fn set_recycle_bin_active(document: &web::Document, active: bool) {
    if let Some(el) = document.get_element_by_id(RECYCLE_BIN_ID) {
        let cl = el.class_list();
        let result = if active {
            cl.add_1(RECYCLE_BIN_ACTIVE_CLASS)
        } else {
            cl.remove_1(RECYCLE_BIN_ACTIVE_CLASS)
        };
        if let Err(e) = result {
            log::warn!("[scene] recycle-bin class toggle failed: {:?}", e);
        }
    }
}
