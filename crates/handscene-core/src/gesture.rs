//! Per-frame gesture classification.
//!
//! Everything here is stateless: the arbiter keeps the previous levels and
//! turns them into [`Edge`]s.

use glam::Vec3;

use crate::geometry::{planar_distance, spatial_distance};
use crate::hand::HandObservation;

/// Thumb-to-index distance including depth. Tolerant of hand rotation.
#[inline]
pub fn pinch_distance_3d(hand: &HandObservation) -> f32 {
    spatial_distance(hand.thumb_tip(), hand.index_tip())
}

/// Thumb-to-index distance ignoring depth. Steadier for a flat hand facing
/// the camera.
#[inline]
pub fn pinch_distance_2d(hand: &HandObservation) -> f32 {
    planar_distance(hand.thumb_tip(), hand.index_tip())
}

#[inline]
pub fn is_pinch_3d(hand: &HandObservation, threshold: f32) -> bool {
    pinch_distance_3d(hand) < threshold
}

#[inline]
pub fn is_pinch_2d(hand: &HandObservation, threshold: f32) -> bool {
    pinch_distance_2d(hand) < threshold
}

#[inline]
pub fn index_tip_distance(left: &HandObservation, right: &HandObservation) -> f32 {
    planar_distance(left.index_tip(), right.index_tip())
}

/// Midpoint of both index tips in normalized camera space (z dropped).
#[inline]
pub fn index_tip_midpoint(left: &HandObservation, right: &HandObservation) -> Vec3 {
    let mid = (left.index_tip() + right.index_tip()) * 0.5;
    Vec3::new(mid.x, mid.y, 0.0)
}

#[inline]
pub fn are_index_tips_close(
    left: &HandObservation,
    right: &HandObservation,
    threshold: f32,
) -> bool {
    index_tip_distance(left, right) < threshold
}

/// Transition of a boolean gesture level between two frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Became true this frame (pinch-start).
    Rising,
    /// Still true (pinch-active).
    High,
    /// Became false this frame (pinch-end).
    Falling,
    Low,
}

impl Edge {
    #[inline]
    pub fn from_levels(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => Self::Rising,
            (true, true) => Self::High,
            (true, false) => Self::Falling,
            (false, false) => Self::Low,
        }
    }
}
