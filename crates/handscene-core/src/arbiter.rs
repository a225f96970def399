//! The interaction state machine.
//!
//! Each detector result is one call to [`Arbiter::process_frame`]. Tracks run
//! in a fixed order and guard on each other's state:
//!
//! | Order | Track | Hands | Gate |
//! |---|---|---|---|
//! | 1 | sphere scale | right, 2D pinch | acquires only outside a two-hand pinch |
//! | 2 | touch recolor | left index tip | none |
//! | 3 | create + scale | both, 3D pinch | right hand not scaling |
//! | 4 | select / move / dispose | left or right, 3D pinch | track 3 not pinching; right only if not scaling |
//! | 5 | global reset | zero hands | replaces 1–4 |

use glam::Vec2;
use smallvec::SmallVec;
use std::time::Duration;

use crate::config::InteractionConfig;
use crate::constants::OUTLINE_DISPOSAL;
use crate::error::ConfigError;
use crate::geometry::{is_in_disposal_zone, map_to_world, spatial_distance};
use crate::gesture::{
    are_index_tips_close, index_tip_distance, index_tip_midpoint, is_pinch_3d, pinch_distance_2d,
    Edge,
};
use crate::hand::{resolve_hands, HandFrame, HandObservation, ResolvedHands};
use crate::mutator::{SceneBackend, SceneMutator};
use crate::shape::{Color, ShapeId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionEvent {
    Created(ShapeId),
    Selected(ShapeId),
    /// Selection dropped without deleting the shape.
    Released(ShapeId),
    Deleted(ShapeId),
    Recolored(ShapeId, Color),
    ScalingStarted(ShapeId),
    ScalingEnded(ShapeId),
    /// Two-hand pinch mode left; the shape keeps its last scale.
    PinchEnded(ShapeId),
    Reset,
}

/// Which tracks did work this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveTracks {
    pub right_scale: bool,
    pub left_touch: bool,
    pub two_hand: bool,
    pub select: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub tracks: ActiveTracks,
    pub events: SmallVec<[InteractionEvent; 4]>,
}

impl FrameReport {
    #[inline]
    fn push(&mut self, event: InteractionEvent) {
        self.events.push(event);
    }

    pub fn created(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.events.iter().filter_map(|e| match e {
            InteractionEvent::Created(id) => Some(*id),
            _ => None,
        })
    }

    pub fn deleted(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.events.iter().filter_map(|e| match e {
            InteractionEvent::Deleted(id) => Some(*id),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CreatePhase {
    #[default]
    Idle,
    Pinching { shape: ShapeId, baseline: f32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TwoHandTrack {
    pub phase: CreatePhase,
    /// No new shape before this instant.
    pub cooldown_until: Option<Duration>,
}

impl TwoHandTrack {
    #[inline]
    pub fn is_pinching(&self) -> bool {
        matches!(self.phase, CreatePhase::Pinching { .. })
    }

    #[inline]
    fn cooled_down(&self, now: Duration) -> bool {
        self.cooldown_until.map_or(true, |until| now >= until)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScaleTrack {
    pub active: bool,
    /// Kept after release as the "recently scaled" shape, which does not spin.
    pub target: Option<ShapeId>,
}

impl ScaleTrack {
    #[inline]
    pub fn active_target(&self) -> Option<ShapeId> {
        self.target.filter(|_| self.active)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectTrack {
    pub selected: Option<ShapeId>,
    pub in_zone: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub two_hand: TwoHandTrack,
    pub right_scale: ScaleTrack,
    pub select: SelectTrack,
}

impl InteractionState {
    pub fn two_hand_pinch_active(&self) -> bool {
        self.two_hand.is_pinching()
    }

    pub fn two_hand_pinch_shape(&self) -> Option<ShapeId> {
        match self.two_hand.phase {
            CreatePhase::Pinching { shape, .. } => Some(shape),
            CreatePhase::Idle => None,
        }
    }

    pub fn two_hand_pinch_baseline(&self) -> Option<f32> {
        match self.two_hand.phase {
            CreatePhase::Pinching { baseline, .. } => Some(baseline),
            CreatePhase::Idle => None,
        }
    }

    pub fn two_hand_pinch_cooldown_until(&self) -> Option<Duration> {
        self.two_hand.cooldown_until
    }

    pub fn right_hand_scaling(&self) -> bool {
        self.right_scale.active
    }

    pub fn right_hand_scaling_target(&self) -> Option<ShapeId> {
        self.right_scale.target
    }

    pub fn selected_shape(&self) -> Option<ShapeId> {
        self.select.selected
    }

    /// Nothing selected, scaled or pinched. A pending creation cooldown
    /// does not count as activity.
    pub fn is_idle(&self) -> bool {
        !self.two_hand.is_pinching()
            && self.right_scale == ScaleTrack::default()
            && self.select == SelectTrack::default()
    }

    /// Drop every reference to a shape that has left the registry.
    fn forget(&mut self, id: ShapeId) {
        if self.select.selected == Some(id) {
            self.select = SelectTrack::default();
        }
        if self.right_scale.target == Some(id) {
            self.right_scale = ScaleTrack::default();
        }
        if self.two_hand_pinch_shape() == Some(id) {
            self.two_hand.phase = CreatePhase::Idle;
        }
    }
}

pub struct Arbiter {
    config: InteractionConfig,
    state: InteractionState,
}

impl Default for Arbiter {
    fn default() -> Self {
        Self {
            config: InteractionConfig::default(),
            state: InteractionState::default(),
        }
    }
}

impl Arbiter {
    pub fn new(config: InteractionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: InteractionState::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Run one gesture pass. `now` is monotonic time since start.
    pub fn process_frame<B: SceneBackend>(
        &mut self,
        frame: &HandFrame,
        now: Duration,
        scene: &mut SceneMutator<B>,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if frame.is_empty() {
            self.global_reset(scene, &mut report);
            return report;
        }

        let hands = resolve_hands(frame);
        self.right_hand_scaling(hands.right, scene, &mut report);
        if let Some(left) = hands.left {
            self.left_hand_recolor(left, scene, &mut report);
        }
        self.two_hand_pinch(hands, now, scene, &mut report);
        if !self.state.two_hand.is_pinching() {
            self.single_hand_select(hands, scene, &mut report);
        }
        report
    }

    /// Spin every shape that is not held by a hand. Called from the render loop.
    pub fn advance_idle_rotation<B: SceneBackend>(&self, scene: &mut SceneMutator<B>) {
        let step = self.config.idle_rotation_step;
        if step == 0.0 {
            return;
        }
        let held = [self.state.select.selected, self.state.right_scale.target];
        for id in scene.registry().ids() {
            if held.contains(&Some(id)) {
                continue;
            }
            scene.apply_rotation(id, Vec2::splat(step));
        }
    }

    // ---------------- Track 1: right-hand sphere scaling ----------------

    fn right_hand_scaling<B: SceneBackend>(
        &mut self,
        right: Option<&HandObservation>,
        scene: &mut SceneMutator<B>,
        report: &mut FrameReport,
    ) {
        let pinch = right.map(|hand| (hand, pinch_distance_2d(hand)));
        let Some((hand, distance)) =
            pinch.filter(|(_, d)| *d < self.config.right_pinch_2d_threshold)
        else {
            self.end_scaling(report);
            return;
        };

        // While both hands hold a two-hand pinch the right hand belongs to it.
        if !self.state.right_scale.active && !self.state.two_hand.is_pinching() {
            let tip = hand.index_tip();
            let at = map_to_world(tip.x, tip.y);
            let candidate = scene.registry().find_nearest_excluding(
                at,
                self.config.select_radius,
                self.state.select.selected,
            );
            let sphere = candidate
                .filter(|id| scene.registry().get(*id).is_some_and(|s| s.is_sphere()));
            if let Some(id) = sphere {
                self.state.right_scale = ScaleTrack {
                    active: true,
                    target: Some(id),
                };
                log::debug!("[gesture] right hand scaling sphere {}", id);
                report.push(InteractionEvent::ScalingStarted(id));
            }
        }

        if let Some(id) = self.state.right_scale.active_target() {
            let factor = self.config.right_hand_scale_for(distance);
            if scene.apply_scale(id, factor) {
                report.tracks.right_scale = true;
            } else {
                self.state.forget(id);
            }
        }
    }

    fn end_scaling(&mut self, report: &mut FrameReport) {
        if let Some(id) = self.state.right_scale.active_target() {
            log::debug!("[gesture] right hand released sphere {}", id);
            report.push(InteractionEvent::ScalingEnded(id));
        }
        self.state.right_scale.active = false;
    }

    // ---------------- Track 2: left-hand touch recolor ----------------

    fn left_hand_recolor<B: SceneBackend>(
        &mut self,
        left: &HandObservation,
        scene: &mut SceneMutator<B>,
        report: &mut FrameReport,
    ) {
        let tip = left.index_tip();
        let finger = map_to_world(tip.x, tip.y);
        let buffer = self.config.touch_buffer;
        let edges: SmallVec<[(ShapeId, Edge); 8]> = scene
            .registry()
            .iter()
            .map(|shape| {
                let touching =
                    spatial_distance(shape.position, finger) < shape.scaled_radius() + buffer;
                (shape.id, Edge::from_levels(shape.touched_by_left_hand, touching))
            })
            .collect();

        report.tracks.left_touch = true;
        for (id, edge) in edges {
            match edge {
                Edge::Rising => {
                    scene.set_touch_latch(id, true);
                    if let Some(color) = scene.apply_recolor(id) {
                        report.push(InteractionEvent::Recolored(id, color));
                    }
                }
                Edge::Falling => {
                    scene.set_touch_latch(id, false);
                }
                Edge::High | Edge::Low => {}
            }
        }
    }

    // ---------------- Track 3: two-hand create + scale ----------------

    fn two_hand_pinch<B: SceneBackend>(
        &mut self,
        hands: ResolvedHands<'_>,
        now: Duration,
        scene: &mut SceneMutator<B>,
        report: &mut FrameReport,
    ) {
        let threshold = self.config.pinch_3d_threshold;
        let scaling = self.state.right_scale.active;
        let pair = hands
            .both()
            .filter(|(l, r)| !scaling && is_pinch_3d(l, threshold) && is_pinch_3d(r, threshold));

        let Some((left, right)) = pair else {
            if let Some(id) = self.state.two_hand_pinch_shape() {
                log::debug!("[gesture] two-hand pinch released shape {}", id);
                report.push(InteractionEvent::PinchEnded(id));
            }
            self.state.two_hand.phase = CreatePhase::Idle;
            return;
        };

        let distance = index_tip_distance(left, right);
        match self.state.two_hand.phase {
            CreatePhase::Idle => {
                let close =
                    are_index_tips_close(left, right, self.config.index_tips_close_threshold);
                if close && self.state.two_hand.cooled_down(now) {
                    let mid = index_tip_midpoint(left, right);
                    let id = scene.apply_create_random(map_to_world(mid.x, mid.y));
                    self.state.two_hand = TwoHandTrack {
                        phase: CreatePhase::Pinching {
                            shape: id,
                            baseline: distance,
                        },
                        cooldown_until: Some(now + self.config.creation_cooldown()),
                    };
                    report.push(InteractionEvent::Created(id));
                }
            }
            CreatePhase::Pinching { shape, baseline } => {
                if baseline > self.config.min_baseline_distance {
                    let ratio = distance / baseline;
                    if ratio.is_finite() {
                        scene.apply_scale(shape, ratio);
                    }
                }
            }
        }

        if let Some(id) = self.state.two_hand_pinch_shape() {
            report.tracks.two_hand = true;
            scene.set_disposal_active(false);
            if self.state.select.selected == Some(id) {
                self.state.select = SelectTrack::default();
            }
        }
    }

    // ---------------- Track 4: single-hand select / move / dispose ----------------

    fn single_hand_select<B: SceneBackend>(
        &mut self,
        hands: ResolvedHands<'_>,
        scene: &mut SceneMutator<B>,
        report: &mut FrameReport,
    ) {
        let threshold = self.config.pinch_3d_threshold;
        let scaling = self.state.right_scale.active;
        let hand = hands
            .left
            .filter(|h| is_pinch_3d(h, threshold))
            .or_else(|| hands.right.filter(|h| !scaling && is_pinch_3d(h, threshold)));

        let Some(hand) = hand else {
            self.release_selection(scene, report);
            return;
        };

        let tip = hand.index_tip();
        let at = map_to_world(tip.x, tip.y);
        if self.state.select.selected.is_none() {
            let busy = self.state.right_scale.active_target();
            let found =
                scene
                    .registry()
                    .find_nearest_excluding(at, self.config.select_radius, busy);
            if let Some(id) = found {
                // Claiming the recently scaled sphere lets it spin again later.
                if self.state.right_scale.target == Some(id) {
                    self.state.right_scale.target = None;
                }
                self.state.select.selected = Some(id);
                log::debug!("[gesture] selected shape {}", id);
                report.push(InteractionEvent::Selected(id));
            }
        }

        let Some(id) = self.state.select.selected else {
            return;
        };
        if !scene.apply_move(id, at) {
            self.state.forget(id);
            scene.set_disposal_active(false);
            return;
        }
        let in_zone = is_in_disposal_zone(at, scene.backend(), &self.config.disposal_zone);
        self.state.select.in_zone = in_zone;
        let outline = if in_zone {
            Color(OUTLINE_DISPOSAL)
        } else {
            Color::WHITE
        };
        scene.apply_outline(id, outline);
        scene.set_disposal_active(in_zone);
        report.tracks.select = true;
    }

    fn release_selection<B: SceneBackend>(
        &mut self,
        scene: &mut SceneMutator<B>,
        report: &mut FrameReport,
    ) {
        if let Some(id) = self.state.select.selected.take() {
            let zone = self.config.disposal_zone;
            let in_zone = scene
                .registry()
                .get(id)
                .is_some_and(|s| is_in_disposal_zone(s.position, scene.backend(), &zone));
            if in_zone && self.state.right_scale.active_target() != Some(id) {
                self.delete_shape(id, scene, report);
            } else {
                scene.apply_outline(id, Color::WHITE);
                log::debug!("[gesture] released shape {}", id);
                report.push(InteractionEvent::Released(id));
            }
        }
        self.state.select.in_zone = false;
        scene.set_disposal_active(false);
    }

    fn delete_shape<B: SceneBackend>(
        &mut self,
        id: ShapeId,
        scene: &mut SceneMutator<B>,
        report: &mut FrameReport,
    ) {
        if scene.apply_delete(id) {
            report.push(InteractionEvent::Deleted(id));
        }
        self.state.forget(id);
    }

    // ---------------- Track 5: global reset ----------------

    fn global_reset<B: SceneBackend>(
        &mut self,
        scene: &mut SceneMutator<B>,
        report: &mut FrameReport,
    ) {
        let was_idle = self.state.is_idle();
        self.release_selection(scene, report);
        if let Some(id) = self.state.two_hand_pinch_shape() {
            report.push(InteractionEvent::PinchEnded(id));
        }
        // The creation deadline outlives a tracking dropout.
        let cooldown_until = self.state.two_hand.cooldown_until;
        self.state = InteractionState::default();
        self.state.two_hand.cooldown_until = cooldown_until;
        if !was_idle {
            log::debug!("[gesture] no hands; interaction state reset");
            report.push(InteractionEvent::Reset);
        }
    }
}
