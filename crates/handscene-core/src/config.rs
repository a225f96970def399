//! Runtime-tunable interaction parameters.
//!
//! Defaults mirror the values in [`crate::constants`]. Frontends may load a
//! partial override (JSON natively, a JS object on the web); missing fields
//! keep their defaults.

use serde::Deserialize;
use std::time::Duration;

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisposalZone {
    /// Side length of the square zone, in pixels.
    pub size: f32,
    /// Gap between the zone and the viewport's bottom/right edges, in pixels.
    pub margin: f32,
}

impl Default for DisposalZone {
    fn default() -> Self {
        Self {
            size: DISPOSAL_ZONE_SIZE,
            margin: DISPOSAL_ZONE_MARGIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub pinch_3d_threshold: f32,
    pub right_pinch_2d_threshold: f32,
    pub index_tips_close_threshold: f32,
    pub select_radius: f32,
    pub touch_buffer: f32,
    pub right_scale_pinch_min: f32,
    pub right_scale_pinch_max: f32,
    pub right_scale_factor_min: f32,
    pub right_scale_factor_max: f32,
    pub creation_cooldown_ms: u64,
    pub min_baseline_distance: f32,
    pub idle_rotation_step: f32,
    pub disposal_zone: DisposalZone,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            pinch_3d_threshold: PINCH_3D_THRESHOLD,
            right_pinch_2d_threshold: RIGHT_PINCH_2D_THRESHOLD,
            index_tips_close_threshold: INDEX_TIPS_CLOSE_THRESHOLD,
            select_radius: SELECT_RADIUS,
            touch_buffer: LEFT_FINGER_TOUCH_BUFFER,
            right_scale_pinch_min: RIGHT_SCALE_PINCH_MIN,
            right_scale_pinch_max: RIGHT_SCALE_PINCH_MAX,
            right_scale_factor_min: RIGHT_SCALE_FACTOR_MIN,
            right_scale_factor_max: RIGHT_SCALE_FACTOR_MAX,
            creation_cooldown_ms: CREATION_COOLDOWN_MS,
            min_baseline_distance: MIN_BASELINE_DISTANCE,
            idle_rotation_step: IDLE_ROTATION_STEP,
            disposal_zone: DisposalZone::default(),
        }
    }
}

impl InteractionConfig {
    #[inline]
    pub fn creation_cooldown(&self) -> Duration {
        Duration::from_millis(self.creation_cooldown_ms)
    }

    /// Map a right-hand 2D pinch distance onto the sphere scale range.
    ///
    /// The input is clamped to `[right_scale_pinch_min, right_scale_pinch_max]`
    /// first, so the result always lies within the factor range.
    pub fn right_hand_scale_for(&self, pinch_distance: f32) -> f32 {
        let lo = self.right_scale_pinch_min;
        let hi = self.right_scale_pinch_max;
        let d = if pinch_distance.is_nan() { lo } else { pinch_distance };
        let t = ((d.max(lo).min(hi) - lo) / (hi - lo)).max(0.0).min(1.0);
        let (out_lo, out_hi) = (self.right_scale_factor_min, self.right_scale_factor_max);
        out_lo + t * (out_hi - out_lo)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pinch_3d_threshold", self.pinch_3d_threshold),
            ("right_pinch_2d_threshold", self.right_pinch_2d_threshold),
            ("index_tips_close_threshold", self.index_tips_close_threshold),
            ("select_radius", self.select_radius),
            ("right_scale_pinch_min", self.right_scale_pinch_min),
            ("right_scale_factor_min", self.right_scale_factor_min),
            ("min_baseline_distance", self.min_baseline_distance),
            ("disposal_zone.size", self.disposal_zone.size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        // zero allowed
        for (field, value) in [
            ("touch_buffer", self.touch_buffer),
            ("idle_rotation_step", self.idle_rotation_step),
            ("disposal_zone.margin", self.disposal_zone.margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.right_scale_pinch_min >= self.right_scale_pinch_max {
            return Err(ConfigError::InvertedRange {
                field: "right_scale_pinch",
                min: self.right_scale_pinch_min,
                max: self.right_scale_pinch_max,
            });
        }
        if self.right_scale_factor_min >= self.right_scale_factor_max {
            return Err(ConfigError::InvertedRange {
                field: "right_scale_factor",
                min: self.right_scale_factor_min,
                max: self.right_scale_factor_max,
            });
        }
        Ok(())
    }
}
