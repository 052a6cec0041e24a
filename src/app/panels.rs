use std::time::Duration;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::corpus::{Corpus, Play};
use crate::engine::{
    DynamicState, PlaybackCursor, SceneGraph, SpeakerPalette, TickTimer, build_scene_graph,
};
use crate::util::display_title;

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(corpus: Corpus) -> Self {
        let palette = corpus
            .plays
            .first()
            .map(SpeakerPalette::for_play)
            .unwrap_or_default();

        Self {
            corpus,
            play_index: 0,
            cursor: PlaybackCursor::default(),
            dynamics: DynamicState::default(),
            timer: TickTimer::default(),
            speed_ms: 350,
            palette,
            scene_graph: SceneGraph::default(),
            graph_scene: None,
            last_observed: None,
            search: String::new(),
            viewport: Vec2::ZERO,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.advance_playback(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("dramatís");
                    ui.separator();
                    if let Some(play) = self.corpus.plays.get(self.play_index) {
                        ui.label(display_title(&play.title));
                        if let Some(scene) = self.cursor.current_scene(play) {
                            ui.label(format!(
                                "Act {} · Scene {}",
                                scene.act_label, scene.scene_label
                            ));
                        }
                    }
                    ui.label(format!("speakers: {}", self.scene_graph.nodes.len()));
                    ui.label(format!("exchanges: {}", self.scene_graph.edges.len()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(play) = self.corpus.plays.get(self.play_index)
                            && let Some(scene) = self.cursor.current_scene(play)
                        {
                            ui.label(format!(
                                "turn {} / {}",
                                self.cursor.turn + 1,
                                scene.turns.len()
                            ));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_network(ui));
    }

    pub(in crate::app) fn selected_play(&self) -> Option<&Play> {
        self.corpus.plays.get(self.play_index)
    }

    pub(in crate::app) fn set_play(&mut self, index: usize) {
        if index == self.play_index || index >= self.corpus.plays.len() {
            return;
        }
        self.play_index = index;
        self.cursor = PlaybackCursor::default();
        self.palette = SpeakerPalette::for_play(&self.corpus.plays[index]);
        self.scene_graph = SceneGraph::default();
        self.graph_scene = None;
        self.last_observed = None;
        self.timer.cancel();
    }

    /// Fires at most one due tick per frame, then reschedules; play state,
    /// speed and cursor changes all go through `timer.cancel()`, so a
    /// single pending deadline exists at any time.
    fn advance_playback(&mut self, ctx: &Context) {
        if !self.cursor.playing {
            self.timer.cancel();
            return;
        }

        let now = ctx.input(|input| input.time);
        let interval_secs = f64::from(self.speed_ms) / 1000.0;

        if !self.timer.is_scheduled() {
            self.timer.schedule(now, interval_secs);
        }

        if self.timer.fire(now) {
            if let Some(play) = self.corpus.plays.get(self.play_index) {
                self.cursor.tick(play);
            }
            if self.cursor.playing {
                self.timer.schedule(now, interval_secs);
            } else {
                self.timer.cancel();
            }
        }

        if let Some(remaining) = self.timer.remaining(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }

    /// Rebuilds the scene graph when the scene identity changed, then feeds
    /// the current turn into the dynamic state exactly once per cursor
    /// position. Deferred until the canvas viewport is known.
    pub(in crate::app) fn sync_visual_state(&mut self) {
        if self.viewport == Vec2::ZERO {
            return;
        }
        let Some(play) = self.corpus.plays.get(self.play_index) else {
            return;
        };

        let scene_key = (self.play_index, self.cursor.scene);
        if self.graph_scene != Some(scene_key)
            && let Some(scene) = play.scenes.get(self.cursor.scene)
        {
            self.scene_graph = build_scene_graph(scene, &self.corpus.females);
            self.dynamics.reset(&self.scene_graph, self.viewport);
            self.graph_scene = Some(scene_key);
            self.last_observed = None;
        }

        let observed_key = (self.play_index, self.cursor.scene, self.cursor.turn);
        if self.last_observed != Some(observed_key) {
            if let Some(scene) = play.scenes.get(self.cursor.scene) {
                self.dynamics
                    .observe_turn(scene, self.cursor.turn, self.cursor.playing);
            }
            self.last_observed = Some(observed_key);
        }
    }

    pub(in crate::app) fn ensure_viewport(&mut self, viewport: Vec2) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.dynamics.set_viewport(viewport);
    }
}
