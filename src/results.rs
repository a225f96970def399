// MediaPipe Hands results as handed over from JavaScript.
//
// Pure data: deserialized with serde (via `serde-wasm-bindgen` in the
// browser, `serde_json` in host tests) and converted into a core
// [`HandFrame`]. Hands that cannot be used are dropped here so the gesture
// pass never sees them.

use glam::Vec3;
use handscene_core::{HandFrame, HandObservation, Handedness};
use serde::Deserialize;

// Every coordinate is optional so one broken landmark costs its hand, not the
// whole frame.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawLandmark {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl RawLandmark {
    /// `None` when x or y is missing or any coordinate is not finite.
    /// Depth defaults to zero.
    fn to_vec3(self) -> Option<Vec3> {
        let point = Vec3::new(self.x?, self.y?, self.z.unwrap_or(0.0));
        point.is_finite().then_some(point)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawHandedness {
    pub label: String,
    pub score: f32,
}

/// The subset of a `Results` object the gesture pass needs. MediaPipe leaves
/// both lists undefined when no hand is in view.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawResults {
    pub multi_hand_landmarks: Option<Vec<Vec<RawLandmark>>>,
    pub multi_handedness: Option<Vec<RawHandedness>>,
}

impl RawResults {
    /// Pair each landmark list with the label at the same index. Lists with
    /// the wrong landmark count, missing coordinates or non-finite
    /// coordinates are skipped.
    pub fn into_frame(self) -> HandFrame {
        let labels = self.multi_handedness.unwrap_or_default();
        let hands = self
            .multi_hand_landmarks
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                let handedness = labels
                    .get(i)
                    .map(|h| Handedness::from_label(&h.label))
                    .unwrap_or_default();
                let Some(points) = raw
                    .into_iter()
                    .map(RawLandmark::to_vec3)
                    .collect::<Option<Vec<Vec3>>>()
                else {
                    log::debug!("[gesture] dropping hand {}: unusable landmark", i);
                    return None;
                };
                match HandObservation::from_landmarks(handedness, &points) {
                    Ok(hand) => Some(hand),
                    Err(e) => {
                        log::debug!("[gesture] dropping hand {}: {}", i, e);
                        None
                    }
                }
            })
            .collect();
        HandFrame::new(hands)
    }
}
