use eframe::egui::{self, Rect, Sense, Ui, vec2};

use crate::util::display_title;

use super::ViewModel;
use super::render_utils::{ACCENT, TRACK};

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Playback");
        ui.separator();
        ui.add_space(4.0);

        let selected_title = self
            .selected_play()
            .map(|play| display_title(&play.title))
            .unwrap_or_else(|| "—".to_string());
        let mut next_play = None;
        egui::ComboBox::from_label("Play")
            .selected_text(selected_title)
            .show_ui(ui, |ui| {
                for (index, play) in self.corpus.plays.iter().enumerate() {
                    if ui
                        .selectable_label(index == self.play_index, display_title(&play.title))
                        .clicked()
                    {
                        next_play = Some(index);
                    }
                }
            });
        if let Some(index) = next_play {
            self.set_play(index);
        }

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            if ui.button("Start from act 1").clicked() {
                self.restart_playback();
            }
            let toggle_label = if self.cursor.playing { "Pause" } else { "Play" };
            if ui.button(toggle_label).clicked() {
                self.toggle_play();
            }
            if ui.button("Stop").clicked() {
                self.cursor.stop();
                self.timer.cancel();
            }
        });

        ui.horizontal_wrapped(|ui| {
            if ui.button("Previous scene").clicked() {
                self.cursor.step_scene_back();
                self.timer.cancel();
            }
            if ui.button("Next scene").clicked() {
                if let Some(play) = self.corpus.plays.get(self.play_index) {
                    self.cursor.step_scene_forward(play);
                }
                self.timer.cancel();
            }
        });

        let acts = self
            .selected_play()
            .map(|play| play.act_sequence())
            .unwrap_or_default();
        if !acts.is_empty() {
            ui.add_space(4.0);
            ui.label("Acts");
            let current_act = self.current_act_order();
            ui.horizontal_wrapped(|ui| {
                for (order, label) in &acts {
                    if ui
                        .selectable_label(current_act == Some(*order), format!("Act {label}"))
                        .clicked()
                    {
                        if let Some(play) = self.corpus.plays.get(self.play_index) {
                            self.cursor.select_act(play, *order);
                        }
                        self.timer.cancel();
                    }
                }
            });
        }

        ui.add_space(6.0);
        let speed_slider = ui.add(
            egui::Slider::new(&mut self.speed_ms, 100..=1200)
                .step_by(20.0)
                .suffix(" ms")
                .text("Speed per turn"),
        );
        if speed_slider.changed() {
            self.timer.cancel();
        }

        ui.add_space(6.0);
        self.draw_scrub_bar(ui);

        ui.separator();
        ui.label("Status");
        if let Some(play) = self.corpus.plays.get(self.play_index) {
            if let Some(scene) = self.cursor.current_scene(play) {
                ui.label(format!(
                    "Act {} · Scene {}",
                    scene.act_label, scene.scene_label
                ));
                ui.label(format!(
                    "Turn {} / {}",
                    self.cursor.turn + 1,
                    scene.turns.len()
                ));
            }
            if let Some(turn) = self.cursor.current_turn(play)
                && !turn.speaker.is_empty()
            {
                ui.label(format!("Now: {} ({} words)", turn.speaker, turn.words));
            }
        } else {
            ui.label("No plays loaded.");
        }

        ui.separator();
        ui.label("Find speaker");
        ui.text_edit_singleline(&mut self.search);
    }

    fn draw_scrub_bar(&mut self, ui: &mut Ui) {
        let desired = vec2(ui.available_width(), 14.0);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let progress = self
            .selected_play()
            .map(|play| self.cursor.progress(play))
            .unwrap_or(0.0);

        painter.rect_filled(rect, 4.0, TRACK);
        if progress > 0.0 {
            let fill = Rect::from_min_size(rect.min, vec2(rect.width() * progress, rect.height()));
            painter.rect_filled(fill, 4.0, ACCENT);
        }

        if (response.clicked() || response.dragged())
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let fraction = ((pointer.x - rect.left()) / rect.width().max(1.0)).clamp(0.0, 1.0);
            self.seek(fraction);
        }
    }

    fn seek(&mut self, fraction: f32) {
        if let Some(play) = self.corpus.plays.get(self.play_index) {
            self.cursor.seek_to(play, f64::from(fraction));
        }
        self.timer.cancel();
    }

    fn restart_playback(&mut self) {
        if let Some(play) = self.corpus.plays.get(self.play_index) {
            self.cursor.restart(play);
        }
        self.timer.cancel();
    }

    fn toggle_play(&mut self) {
        if self.cursor.playing {
            self.cursor.pause();
        } else if let Some(play) = self.corpus.plays.get(self.play_index) {
            self.cursor.play(play);
        }
        self.timer.cancel();
    }

    fn current_act_order(&self) -> Option<f64> {
        self.selected_play()
            .and_then(|play| self.cursor.current_scene(play))
            .map(|scene| scene.act_order)
    }
}
