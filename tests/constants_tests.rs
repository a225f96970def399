// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn page_ids_are_set() {
    assert!(!RECYCLE_BIN_ID.is_empty());
    assert!(!RECYCLE_BIN_ACTIVE_CLASS.is_empty());
    assert!(!DEBUG_CANVAS_ID.is_empty());
    assert_ne!(RECYCLE_BIN_ID, DEBUG_CANVAS_ID);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn markers_are_visible_and_distinct() {
    assert!(TIP_MARKER_RADIUS_PX > 0.0);
    assert_ne!(THUMB_TIP_FILL, INDEX_TIP_FILL);
    assert_ne!(FALLBACK_SEED, 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn core_thresholds_keep_their_ordering() {
    use handscene_core::*;
    // The right-hand scaling pinch must be reachable before it counts as released.
    assert!(RIGHT_SCALE_PINCH_MIN < RIGHT_PINCH_2D_THRESHOLD);
    assert!(RIGHT_PINCH_2D_THRESHOLD < RIGHT_SCALE_PINCH_MAX);
    assert!(PINCH_3D_THRESHOLD < INDEX_TIPS_CLOSE_THRESHOLD);
    assert!(RIGHT_SCALE_FACTOR_MIN < 1.0 && 1.0 < RIGHT_SCALE_FACTOR_MAX);
}
