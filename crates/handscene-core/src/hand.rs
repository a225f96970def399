//! Hand observations as delivered by the landmark detector, and the
//! left/right assignment applied to each frame.

use glam::Vec3;

use crate::constants::{INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
use crate::error::HandError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    /// Parse a detector label. Anything other than `Left`/`Right` is unknown.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Left" | "left" => Self::Left,
            "Right" | "right" => Self::Right,
            _ => Self::Unknown,
        }
    }
}

/// One detected hand: 21 landmarks, x/y normalized to the frame, z relative depth.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub handedness: Handedness,
    landmarks: [Vec3; LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(handedness: Handedness, landmarks: [Vec3; LANDMARK_COUNT]) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }

    pub fn from_landmarks(handedness: Handedness, points: &[Vec3]) -> Result<Self, HandError> {
        let landmarks: [Vec3; LANDMARK_COUNT] =
            points.try_into().map_err(|_| HandError::LandmarkCount {
                expected: LANDMARK_COUNT,
                found: points.len(),
            })?;
        Ok(Self::new(handedness, landmarks))
    }

    #[inline]
    pub fn thumb_tip(&self) -> Vec3 {
        self.landmarks[THUMB_TIP]
    }

    #[inline]
    pub fn index_tip(&self) -> Vec3 {
        self.landmarks[INDEX_TIP]
    }
}

/// All hands from one detector result, in detector order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<HandObservation>,
}

impl HandFrame {
    pub fn new(hands: Vec<HandObservation>) -> Self {
        Self { hands }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

/// At most one left and one right hand for the current frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolvedHands<'a> {
    pub left: Option<&'a HandObservation>,
    pub right: Option<&'a HandObservation>,
}

impl<'a> ResolvedHands<'a> {
    #[inline]
    pub fn both(&self) -> Option<(&'a HandObservation, &'a HandObservation)> {
        self.left.zip(self.right)
    }
}

/// Assign left/right hands for a frame.
///
/// Labels win when present; a later hand with the same label replaces an
/// earlier one. With exactly two hands and a side still unassigned, the
/// unlabeled hand is paired by elimination against the known index, or hand 0
/// becomes left and hand 1 right when neither side is known. The fallback is
/// best-effort and can swap hands when the detector order disagrees.
pub fn resolve_hands(frame: &HandFrame) -> ResolvedHands<'_> {
    let hands = &frame.hands;
    let mut left_index = None;
    let mut right_index = None;
    for (i, hand) in hands.iter().enumerate() {
        match hand.handedness {
            Handedness::Left => left_index = Some(i),
            Handedness::Right => right_index = Some(i),
            Handedness::Unknown => {}
        }
    }

    if hands.len() == 2 {
        match (left_index, right_index) {
            (None, None) => {
                left_index = Some(0);
                right_index = Some(1);
            }
            (None, Some(r)) => left_index = Some(1 - r),
            (Some(l), None) => right_index = Some(1 - l),
            (Some(_), Some(_)) => {}
        }
    }

    ResolvedHands {
        left: left_index.map(|i| &hands[i]),
        right: right_index.map(|i| &hands[i]),
    }
}
