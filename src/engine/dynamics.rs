use std::collections::HashMap;

use eframe::egui::{Pos2, Vec2, pos2};

use crate::corpus::Scene;

use super::anchors::radial_anchors;
use super::graph::SceneGraph;

pub const ALPHA_FLOOR: f32 = 0.2;
const ALPHA_DECAY: f32 = 0.95;
const PAIR_PULL: f32 = 0.07;
const ANCHOR_RELAX: f32 = 0.03;
const VIEW_MARGIN: f32 = 12.0;
const MIN_EDGE_STROKE: f32 = 0.6;
const MAX_EDGE_STROKE: f32 = 4.6;

/// Mutable visual state for the active scene, driven by cursor moves.
///
/// Positions and edge weights react to EVERY observed turn pair, scrubbing
/// included; emphasis alpha and spoken-word totals advance only while
/// playback is running. That asymmetry is deliberate: totals mean "spoken
/// so far during this run", not "structural position in the scene".
#[derive(Clone, Debug, Default)]
pub struct DynamicState {
    viewport: Vec2,
    anchors: HashMap<String, Pos2>,
    positions: HashMap<String, Pos2>,
    edge_weights: HashMap<(String, String), u32>,
    node_alpha: HashMap<String, f32>,
    edge_alpha: HashMap<(String, String), f32>,
    word_totals: HashMap<String, u64>,
    drag: Option<String>,
}

impl DynamicState {
    /// Full reset for a new scene identity: anchors recomputed, positions
    /// snapped to anchors, accumulators cleared, any drag cancelled.
    pub fn reset(&mut self, graph: &SceneGraph, viewport: Vec2) {
        self.viewport = viewport;
        let ids = graph
            .nodes
            .iter()
            .map(|node| node.id.as_str())
            .collect::<Vec<_>>();
        self.anchors = radial_anchors(&ids, viewport.x, viewport.y);
        self.positions = self.anchors.clone();
        self.edge_weights.clear();
        self.edge_alpha.clear();
        self.word_totals.clear();
        self.node_alpha = graph
            .nodes
            .iter()
            .map(|node| (node.id.clone(), ALPHA_FLOOR))
            .collect();
        self.drag = None;
    }

    /// Resize path: only the viewport-dependent anchor layout moves, the
    /// node set and accumulators stay.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;

        let ids = self.anchors.keys().cloned().collect::<Vec<_>>();
        let id_refs = ids.iter().map(String::as_str).collect::<Vec<_>>();
        self.anchors = radial_anchors(&id_refs, viewport.x, viewport.y);

        for position in self.positions.values_mut() {
            *position = clamp_to_viewport(*position, viewport);
        }
    }

    pub fn observe_turn(&mut self, scene: &Scene, turn_index: usize, playing: bool) {
        let Some(turn) = scene.turns.get(turn_index) else {
            return;
        };

        let pair = turn_pair(scene, turn_index);

        if let Some((source, target)) = &pair {
            self.pull_together(source, target);
            *self
                .edge_weights
                .entry((source.clone(), target.clone()))
                .or_insert(0) += 1;
        }

        self.relax_toward_anchors();

        if playing {
            self.decay_alphas();
            if !turn.speaker.is_empty() {
                *self.word_totals.entry(turn.speaker.clone()).or_insert(0) += turn.words;
                self.node_alpha.insert(turn.speaker.clone(), 1.0);
            }
            if let Some((source, target)) = pair {
                self.edge_alpha.insert((source, target), 1.0);
            }
        }
    }

    fn pull_together(&mut self, source: &str, target: &str) {
        let Some(&source_pos) = self.positions.get(source) else {
            return;
        };
        let Some(&target_pos) = self.positions.get(target) else {
            return;
        };

        let delta = target_pos - source_pos;
        if self.drag.as_deref() != Some(source) {
            self.positions.insert(
                source.to_string(),
                clamp_to_viewport(source_pos + delta * PAIR_PULL, self.viewport),
            );
        }
        if self.drag.as_deref() != Some(target) {
            self.positions.insert(
                target.to_string(),
                clamp_to_viewport(target_pos - delta * PAIR_PULL, self.viewport),
            );
        }
    }

    fn relax_toward_anchors(&mut self) {
        let viewport = self.viewport;
        for (id, position) in self.positions.iter_mut() {
            if self.drag.as_deref() == Some(id.as_str()) {
                continue;
            }
            let Some(anchor) = self.anchors.get(id) else {
                continue;
            };
            *position = clamp_to_viewport(*position + (*anchor - *position) * ANCHOR_RELAX, viewport);
        }
    }

    fn decay_alphas(&mut self) {
        for alpha in self.node_alpha.values_mut() {
            *alpha = (*alpha * ALPHA_DECAY).max(ALPHA_FLOOR);
        }
        for alpha in self.edge_alpha.values_mut() {
            *alpha = (*alpha * ALPHA_DECAY).max(ALPHA_FLOOR);
        }
    }

    /// Only one drag may be in flight; a second contact is ignored until
    /// the first releases.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        if self.drag.is_some() || !self.positions.contains_key(id) {
            return false;
        }
        self.drag = Some(id.to_string());
        true
    }

    pub fn drag_to(&mut self, position: Pos2) {
        let viewport = self.viewport;
        if let Some(id) = &self.drag
            && let Some(entry) = self.positions.get_mut(id)
        {
            *entry = clamp_to_viewport(position, viewport);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_deref()
    }

    pub fn position(&self, id: &str) -> Option<Pos2> {
        self.positions.get(id).copied()
    }

    pub fn node_alpha(&self, id: &str) -> f32 {
        self.node_alpha.get(id).copied().unwrap_or(ALPHA_FLOOR)
    }

    pub fn edge_alpha(&self, source: &str, target: &str) -> f32 {
        self.edge_alpha
            .get(&(source.to_string(), target.to_string()))
            .copied()
            .unwrap_or(ALPHA_FLOOR)
    }

    pub fn edge_weight(&self, source: &str, target: &str) -> u32 {
        self.edge_weights
            .get(&(source.to_string(), target.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn max_edge_weight(&self) -> u32 {
        self.edge_weights.values().copied().max().unwrap_or(0)
    }

    pub fn word_total(&self, id: &str) -> u64 {
        self.word_totals.get(id).copied().unwrap_or(0)
    }

    pub fn node_radius(&self, id: &str) -> f32 {
        10.0 + (self.word_total(id) as f32).sqrt().min(18.0)
    }

    pub fn edge_stroke_width(&self, source: &str, target: &str) -> f32 {
        let max = self.max_edge_weight();
        if max == 0 {
            return MIN_EDGE_STROKE;
        }
        let t = self.edge_weight(source, target) as f32 / max as f32;
        MIN_EDGE_STROKE + (MAX_EDGE_STROKE - MIN_EDGE_STROKE) * t
    }
}

fn turn_pair(scene: &Scene, turn_index: usize) -> Option<(String, String)> {
    if turn_index == 0 {
        return None;
    }
    let source = scene.turns.get(turn_index - 1)?.speaker.as_str();
    let target = scene.turns.get(turn_index)?.speaker.as_str();
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some((source.to_string(), target.to_string()))
}

fn clamp_to_viewport(position: Pos2, viewport: Vec2) -> Pos2 {
    pos2(
        position
            .x
            .clamp(VIEW_MARGIN, (viewport.x - VIEW_MARGIN).max(VIEW_MARGIN)),
        position
            .y
            .clamp(VIEW_MARGIN, (viewport.y - VIEW_MARGIN).max(VIEW_MARGIN)),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap as StdMap;

    use super::*;
    use crate::corpus::Turn;
    use crate::engine::graph::build_scene_graph;
    use eframe::egui::vec2;

    const VIEW: Vec2 = Vec2::new(400.0, 400.0);

    fn scene(speakers: &[&str]) -> Scene {
        Scene {
            act_label: "1".to_string(),
            scene_label: "1".to_string(),
            act_order: 1.0,
            scene_order: 1.0,
            turns: speakers
                .iter()
                .map(|speaker| Turn {
                    speaker: speaker.to_string(),
                    words: 10,
                    gender: None,
                })
                .collect(),
        }
    }

    fn fresh(speakers: &[&str]) -> (Scene, DynamicState) {
        let scene = scene(speakers);
        let graph = build_scene_graph(&scene, &StdMap::new());
        let mut state = DynamicState::default();
        state.reset(&graph, VIEW);
        (scene, state)
    }

    #[test]
    fn reset_snaps_positions_to_anchors_at_the_alpha_floor() {
        let (_, state) = fresh(&["A", "B"]);

        assert_eq!(state.position("A"), Some(pos2(200.0, 60.0)));
        assert_eq!(state.position("B"), Some(pos2(200.0, 340.0)));
        assert_eq!(state.node_alpha("A"), ALPHA_FLOOR);
        assert_eq!(state.word_total("A"), 0);
        assert_eq!(state.max_edge_weight(), 0);
    }

    #[test]
    fn observed_pair_pulls_seven_percent_then_relaxes_three() {
        let (scene, mut state) = fresh(&["A", "B"]);

        state.observe_turn(&scene, 1, false);

        // pull: A 60 -> 79.6, B 340 -> 320.4; relax 3% back toward anchors
        let a = state.position("A").unwrap();
        let b = state.position("B").unwrap();
        assert!((a.y - (79.6 + 0.03 * (60.0 - 79.6))).abs() < 0.001);
        assert!((b.y - (320.4 + 0.03 * (340.0 - 320.4))).abs() < 0.001);
        assert!((a.x - 200.0).abs() < 0.001);
    }

    #[test]
    fn weights_accumulate_while_paused_but_totals_do_not() {
        let (scene, mut state) = fresh(&["A", "B"]);

        // scrub forward and back across the same boundary, paused
        state.observe_turn(&scene, 1, false);
        state.observe_turn(&scene, 1, false);

        assert_eq!(state.edge_weight("A", "B"), 2);
        assert_eq!(state.word_total("A"), 0);
        assert_eq!(state.word_total("B"), 0);
        assert_eq!(state.node_alpha("B"), ALPHA_FLOOR);
    }

    #[test]
    fn playing_advances_totals_and_emphasis() {
        let (scene, mut state) = fresh(&["A", "B"]);

        state.observe_turn(&scene, 0, true);
        state.observe_turn(&scene, 1, true);

        assert_eq!(state.word_total("A"), 10);
        assert_eq!(state.word_total("B"), 10);
        assert_eq!(state.node_alpha("B"), 1.0);
        assert_eq!(state.edge_alpha("A", "B"), 1.0);
        assert!(state.node_alpha("A") < 1.0);
    }

    #[test]
    fn alpha_never_decays_below_the_floor() {
        let (scene, mut state) = fresh(&["A", "B", "A", "B"]);

        state.observe_turn(&scene, 1, true);
        for _ in 0..200 {
            state.observe_turn(&scene, 2, true);
        }

        assert!(state.edge_alpha("A", "B") >= ALPHA_FLOOR);
        assert!(state.node_alpha("B") >= ALPHA_FLOOR);
    }

    #[test]
    fn first_turn_of_a_scene_observes_no_pair() {
        let (scene, mut state) = fresh(&["A", "B"]);
        state.observe_turn(&scene, 0, false);
        assert_eq!(state.max_edge_weight(), 0);
    }

    #[test]
    fn positions_stay_inside_the_margin_inset() {
        let (scene, mut state) = fresh(&["A", "B"]);

        for _ in 0..500 {
            state.observe_turn(&scene, 1, false);
        }
        state.drag_to(pos2(-50.0, 9000.0));

        for id in ["A", "B"] {
            let position = state.position(id).unwrap();
            assert!(position.x >= 12.0 && position.x <= 388.0);
            assert!(position.y >= 12.0 && position.y <= 388.0);
        }
    }

    #[test]
    fn only_one_drag_owner_at_a_time() {
        let (_, mut state) = fresh(&["A", "B"]);

        assert!(state.begin_drag("A"));
        assert!(!state.begin_drag("B"));
        assert!(!state.begin_drag("MISSING"));

        state.drag_to(pos2(100.0, 100.0));
        assert_eq!(state.position("A"), Some(pos2(100.0, 100.0)));
        assert_eq!(state.position("B"), Some(pos2(200.0, 340.0)));

        state.end_drag();
        assert!(state.begin_drag("B"));
    }

    #[test]
    fn drag_pins_the_node_against_pull_and_relax() {
        let (scene, mut state) = fresh(&["A", "B"]);

        state.begin_drag("A");
        state.drag_to(pos2(50.0, 50.0));
        state.observe_turn(&scene, 1, false);

        assert_eq!(state.position("A"), Some(pos2(50.0, 50.0)));
        let b = state.position("B").unwrap();
        assert!(b.y < 340.0, "B still pulled toward A");
    }

    #[test]
    fn scene_reset_clears_accumulators_and_drag() {
        let (first, mut state) = fresh(&["A", "B"]);
        state.observe_turn(&first, 1, true);
        state.begin_drag("A");

        let next = build_scene_graph(&scene(&["C", "D"]), &StdMap::new());
        state.reset(&next, VIEW);

        assert_eq!(state.max_edge_weight(), 0);
        assert_eq!(state.word_total("A"), 0);
        assert!(state.dragging().is_none());
        assert!(state.position("A").is_none());
        assert!(state.position("C").is_some());
    }

    #[test]
    fn viewport_change_moves_anchors_only() {
        let (scene, mut state) = fresh(&["A", "B"]);
        state.observe_turn(&scene, 1, false);
        let weight_before = state.edge_weight("A", "B");

        state.set_viewport(vec2(200.0, 200.0));

        assert_eq!(state.edge_weight("A", "B"), weight_before);
        let a = state.position("A").unwrap();
        assert!(a.x <= 188.0 && a.y <= 188.0, "re-clamped into new bounds");
    }
}
