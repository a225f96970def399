// Host-side tests for MediaPipe result decoding.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod results {
    include!("../src/results.rs");
}

use handscene_core::{Handedness, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
use results::*;
use serde_json::{json, Value};

fn landmarks(n: usize, x: f32) -> Value {
    let points: Vec<Value> = (0..n)
        .map(|i| json!({ "x": x, "y": 0.5, "z": i as f32 * 0.01 }))
        .collect();
    Value::Array(points)
}

fn decode(value: Value) -> handscene_core::HandFrame {
    let raw: RawResults = serde_json::from_value(value).unwrap();
    raw.into_frame()
}

#[test]
fn two_labelled_hands_decode_in_order() {
    let frame = decode(json!({
        "multiHandLandmarks": [landmarks(21, 0.2), landmarks(21, 0.8)],
        "multiHandedness": [
            { "index": 0, "score": 0.98, "label": "Left" },
            { "index": 1, "score": 0.91, "label": "Right" }
        ]
    }));

    assert_eq!(frame.hands.len(), 2);
    assert_eq!(frame.hands[0].handedness, Handedness::Left);
    assert_eq!(frame.hands[1].handedness, Handedness::Right);
    assert_eq!(frame.hands[1].index_tip().x, 0.8);
    assert!((frame.hands[0].thumb_tip().z - THUMB_TIP as f32 * 0.01).abs() < 1e-6);
    assert!((frame.hands[0].index_tip().z - INDEX_TIP as f32 * 0.01).abs() < 1e-6);
}

#[test]
fn missing_lists_mean_no_hands() {
    assert!(decode(json!({})).is_empty());
    assert!(decode(json!({ "multiHandLandmarks": null, "multiHandedness": null })).is_empty());
}

#[test]
fn missing_label_is_unknown_handedness() {
    let frame = decode(json!({
        "multiHandLandmarks": [landmarks(21, 0.4), landmarks(21, 0.6)],
        "multiHandedness": [{ "label": "Right" }]
    }));
    assert_eq!(frame.hands[0].handedness, Handedness::Right);
    assert_eq!(frame.hands[1].handedness, Handedness::Unknown);
}

#[test]
fn short_landmark_list_is_dropped() {
    let frame = decode(json!({
        "multiHandLandmarks": [landmarks(LANDMARK_COUNT - 1, 0.4), landmarks(LANDMARK_COUNT, 0.6)],
        "multiHandedness": [{ "label": "Left" }, { "label": "Right" }]
    }));
    assert_eq!(frame.hands.len(), 1);
    assert_eq!(frame.hands[0].handedness, Handedness::Right);
}

#[test]
fn missing_depth_defaults_to_zero() {
    let points: Vec<Value> = (0..21).map(|_| json!({ "x": 0.1, "y": 0.2 })).collect();
    let frame = decode(json!({ "multiHandLandmarks": [points] }));
    assert_eq!(frame.hands.len(), 1);
    assert_eq!(frame.hands[0].index_tip().z, 0.0);
}

#[test]
fn extra_fields_are_ignored() {
    let frame = decode(json!({
        "image": { "width": 1280 },
        "multiHandWorldLandmarks": [],
        "multiHandLandmarks": [landmarks(21, 0.5)],
        "multiHandedness": [{ "label": "Left", "score": 0.5, "index": 0 }]
    }));
    assert_eq!(frame.hands.len(), 1);
}

#[test]
fn hand_with_missing_coordinate_is_dropped_alone() {
    let mut broken = landmarks(LANDMARK_COUNT, 0.3);
    broken[INDEX_TIP] = json!({ "y": 0.5, "z": 0.0 });
    let frame = decode(json!({
        "multiHandLandmarks": [broken, landmarks(LANDMARK_COUNT, 0.7)],
        "multiHandedness": [{ "label": "Left" }, { "label": "Right" }]
    }));
    assert_eq!(frame.hands.len(), 1);
    assert_eq!(frame.hands[0].handedness, Handedness::Right);
}

#[test]
fn null_coordinate_drops_the_hand() {
    let mut broken = landmarks(LANDMARK_COUNT, 0.3);
    broken[THUMB_TIP] = json!({ "x": null, "y": 0.5 });
    let frame = decode(json!({ "multiHandLandmarks": [broken] }));
    assert!(frame.is_empty());
}
