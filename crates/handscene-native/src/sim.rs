//! Mouse/keyboard stand-in for the hand-landmark detector.
//!
//! Two virtual hands live in normalized camera space. The mouse drives the
//! focused hand's index tip; buttons and the wheel control the thumb gap.
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse move | Move the focused hand |
//! | Left button (hold) | Pinch the focused hand |
//! | Right button (hold) | Pinch both hands |
//! | Wheel | Open/close the focused hand's thumb gap |
//! | `1` / `2` | Show/hide the left / right hand |
//! | Tab | Switch focus between hands |
//! | Esc | Hide both hands |

use glam::Vec3;
use handscene_core::{HandFrame, HandObservation, Handedness, LANDMARK_COUNT, THUMB_TIP};

/// Thumb gap while a button holds a pinch; below the 3D pinch threshold.
pub const PINCH_GAP: f32 = 0.02;
pub const DEFAULT_OPEN_GAP: f32 = 0.12;
pub const GAP_STEP: f32 = 0.005;
pub const MAX_GAP: f32 = 0.25;

#[derive(Clone, Debug, PartialEq)]
pub struct VirtualHand {
    pub visible: bool,
    /// Index tip in normalized camera space.
    pub tip: (f32, f32),
    /// Thumb offset along x while not pinching.
    pub open_gap: f32,
    pub pinched: bool,
}

impl VirtualHand {
    fn new(x: f32, visible: bool) -> Self {
        Self {
            visible,
            tip: (x, 0.5),
            open_gap: DEFAULT_OPEN_GAP,
            pinched: false,
        }
    }

    #[inline]
    pub fn thumb_gap(&self) -> f32 {
        if self.pinched {
            PINCH_GAP
        } else {
            self.open_gap
        }
    }

    fn observe(&self, handedness: Handedness) -> HandObservation {
        let (x, y) = self.tip;
        let mut points = [Vec3::new(x, y, 0.0); LANDMARK_COUNT];
        points[THUMB_TIP] = Vec3::new(x + self.thumb_gap(), y, 0.0);
        HandObservation::new(handedness, points)
    }
}

#[derive(Clone, Debug)]
pub struct HandSimulator {
    pub left: VirtualHand,
    pub right: VirtualHand,
    focus: Handedness,
    both_pinched: bool,
}

impl Default for HandSimulator {
    fn default() -> Self {
        Self {
            left: VirtualHand::new(0.4, true),
            right: VirtualHand::new(0.6, false),
            focus: Handedness::Left,
            both_pinched: false,
        }
    }
}

impl HandSimulator {
    #[inline]
    pub fn focus(&self) -> Handedness {
        self.focus
    }

    fn focused_mut(&mut self) -> &mut VirtualHand {
        match self.focus {
            Handedness::Right => &mut self.right,
            _ => &mut self.left,
        }
    }

    /// Cursor in normalized window coordinates. The scene is shown mirrored,
    /// so window x is flipped to land the hand under the cursor.
    pub fn cursor_moved(&mut self, window_x: f32, window_y: f32) {
        let x = (1.0 - window_x).clamp(0.0, 1.0);
        let y = window_y.clamp(0.0, 1.0);
        self.focused_mut().tip = (x, y);
    }

    pub fn set_pinch(&mut self, pinched: bool) {
        self.focused_mut().pinched = pinched;
    }

    pub fn set_both_pinch(&mut self, pinched: bool) {
        self.both_pinched = pinched;
    }

    /// Wheel notches; positive opens the hand.
    pub fn adjust_gap(&mut self, notches: f32) {
        let hand = self.focused_mut();
        hand.open_gap = (hand.open_gap + notches * GAP_STEP).clamp(0.0, MAX_GAP);
    }

    pub fn toggle(&mut self, handedness: Handedness) {
        match handedness {
            Handedness::Left => self.left.visible = !self.left.visible,
            Handedness::Right => self.right.visible = !self.right.visible,
            Handedness::Unknown => {}
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Handedness::Left => Handedness::Right,
            _ => Handedness::Left,
        };
        log::info!("[sim] mouse now drives the {:?} hand", self.focus);
    }

    pub fn hide_all(&mut self) {
        self.left.visible = false;
        self.right.visible = false;
    }

    /// The detector output for this instant.
    pub fn frame(&self) -> HandFrame {
        let mut hands = Vec::with_capacity(2);
        let pair = [(&self.left, Handedness::Left), (&self.right, Handedness::Right)];
        for (hand, handedness) in pair {
            if !hand.visible {
                continue;
            }
            let mut hand = hand.clone();
            hand.pinched |= self.both_pinched;
            hands.push(hand.observe(handedness));
        }
        HandFrame::new(hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handscene_core::{is_pinch_2d, is_pinch_3d, PINCH_3D_THRESHOLD, RIGHT_PINCH_2D_THRESHOLD};

    #[test]
    fn starts_with_left_hand_only() {
        let sim = HandSimulator::default();
        let frame = sim.frame();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].handedness, Handedness::Left);
        assert!(!is_pinch_3d(&frame.hands[0], PINCH_3D_THRESHOLD));
    }

    #[test]
    fn cursor_is_mirrored() {
        let mut sim = HandSimulator::default();
        sim.cursor_moved(0.25, 0.75);
        let tip = sim.frame().hands[0].index_tip();
        assert!((tip.x - 0.75).abs() < 1e-6);
        assert!((tip.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn button_pinches_focused_hand() {
        let mut sim = HandSimulator::default();
        sim.set_pinch(true);
        assert!(is_pinch_3d(&sim.frame().hands[0], PINCH_3D_THRESHOLD));
        sim.set_pinch(false);
        assert!(!is_pinch_3d(&sim.frame().hands[0], PINCH_3D_THRESHOLD));
    }

    #[test]
    fn both_pinch_needs_both_hands_visible() {
        let mut sim = HandSimulator::default();
        sim.toggle(Handedness::Right);
        sim.set_both_pinch(true);
        let frame = sim.frame();
        assert_eq!(frame.hands.len(), 2);
        assert!(frame.hands.iter().all(|h| is_pinch_3d(h, PINCH_3D_THRESHOLD)));
    }

    #[test]
    fn focus_switch_moves_other_hand() {
        let mut sim = HandSimulator::default();
        sim.toggle(Handedness::Right);
        sim.switch_focus();
        sim.cursor_moved(0.0, 0.2);
        assert_eq!(sim.right.tip, (1.0, 0.2));
        assert_eq!(sim.left.tip, (0.4, 0.5));
    }

    #[test]
    fn wheel_reaches_scaling_pinch_without_3d_pinch() {
        let mut sim = HandSimulator::default();
        sim.switch_focus();
        sim.toggle(Handedness::Right);
        // 0.12 - 11 * 0.005 = 0.065
        sim.adjust_gap(-11.0);
        let right = sim.frame().hands.into_iter().find(|h| h.handedness == Handedness::Right);
        let right = right.unwrap();
        assert!(is_pinch_2d(&right, RIGHT_PINCH_2D_THRESHOLD));
        assert!(!is_pinch_3d(&right, PINCH_3D_THRESHOLD));
    }

    #[test]
    fn gap_is_clamped() {
        let mut sim = HandSimulator::default();
        sim.adjust_gap(-1000.0);
        assert_eq!(sim.left.open_gap, 0.0);
        sim.adjust_gap(1000.0);
        assert_eq!(sim.left.open_gap, MAX_GAP);
    }

    #[test]
    fn hide_all_yields_empty_frame() {
        let mut sim = HandSimulator::default();
        sim.toggle(Handedness::Right);
        sim.hide_all();
        assert!(sim.frame().is_empty());
    }
}
