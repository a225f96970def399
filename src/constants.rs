/// Page wiring and debug-drawing constants for the browser front-end.
///
/// The element ids match the host page; the drawing values keep magic numbers
/// out of the overlay code.
// Disposal-zone indicator
pub const RECYCLE_BIN_ID: &str = "recycle-bin";
pub const RECYCLE_BIN_ACTIVE_CLASS: &str = "active";

// 2D canvas laid over the video feed for landmark debugging
pub const DEBUG_CANVAS_ID: &str = "canvas";

// Landmark markers (pixels / CSS colors)
pub const TIP_MARKER_RADIUS_PX: f64 = 10.0;
pub const THUMB_TIP_FILL: &str = "rgba(0, 255, 255, 0.7)";
pub const INDEX_TIP_FILL: &str = "rgba(255, 0, 255, 0.7)";

// Seed used when the page does not supply one
pub const FALLBACK_SEED: u64 = 0x5eed;
