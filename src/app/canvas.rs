use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::ViewModel;
use super::render_utils::{EDGE_BASE, draw_background, gender_tint, with_alpha};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_network(&mut self, ui: &mut Ui) {
        let available = ui.available_size();
        let (outer_rect, response) = ui.allocate_exact_size(available, Sense::click_and_drag());
        let painter = ui.painter_at(outer_rect);

        let side = available.x.min(available.y).max(120.0);
        let rect = egui::Rect::from_center_size(outer_rect.center(), vec2(side, side));

        draw_background(&painter, rect);

        self.ensure_viewport(vec2(side, side));
        self.sync_visual_state();
        self.handle_node_drag(rect, &response);

        if self.selected_play().is_none() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Pick a play to begin.",
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        }

        let current_speaker = self
            .selected_play()
            .and_then(|play| self.cursor.current_turn(play))
            .map(|turn| turn.speaker.clone());
        let matches = self.search_matches();

        for edge in &self.scene_graph.edges {
            let Some(from) = self.dynamics.position(&edge.source) else {
                continue;
            };
            let Some(to) = self.dynamics.position(&edge.target) else {
                continue;
            };

            let width = self.dynamics.edge_stroke_width(&edge.source, &edge.target);
            let alpha = self.dynamics.edge_alpha(&edge.source, &edge.target);
            painter.line_segment(
                [rect.min + from.to_vec2(), rect.min + to.to_vec2()],
                Stroke::new(width, with_alpha(EDGE_BASE, alpha)),
            );
        }

        for node in &self.scene_graph.nodes {
            let Some(position) = self.dynamics.position(&node.id) else {
                continue;
            };
            let screen = rect.min + position.to_vec2();
            let radius = self.dynamics.node_radius(&node.id);
            let alpha = self.dynamics.node_alpha(&node.id);
            let is_current = current_speaker.as_deref() == Some(node.id.as_str());
            let dimmed = matches
                .as_ref()
                .is_some_and(|matched| !matched.contains(&node.id));

            let base = self.palette.color(&node.id);
            let fill_alpha = if dimmed { alpha * 0.35 } else { alpha };

            if is_current {
                painter.circle_filled(screen, radius + 8.0, with_alpha(base, 0.15));
            }
            painter.circle_filled(screen, radius, with_alpha(base, fill_alpha));
            painter.circle_stroke(
                screen,
                radius,
                Stroke::new(if is_current { 2.4 } else { 1.0 }, gender_tint(node.gender)),
            );

            painter.text(
                screen + vec2(0.0, radius + 4.0),
                Align2::CENTER_TOP,
                &node.id,
                FontId::proportional(12.0),
                with_alpha(Color32::from_gray(230), fill_alpha.max(0.55)),
            );
        }

        if let Some(hovered) = self.hovered_node(ui, rect) {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
            if let Some(node) = self.scene_graph.node(&hovered) {
                let info = format!(
                    "{}  |  {}  |  {} words spoken",
                    node.id,
                    node.gender.label(),
                    self.dynamics.word_total(&node.id)
                );
                painter.text(
                    rect.left_top() + vec2(10.0, 10.0),
                    Align2::LEFT_TOP,
                    info,
                    FontId::proportional(13.0),
                    Color32::from_gray(240),
                );
            }
        }
    }

    fn search_matches(&self) -> Option<HashSet<String>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.scene_graph
                .nodes
                .iter()
                .filter(|node| fuzzy_match_score(&matcher, &node.id, query).is_some())
                .map(|node| node.id.clone())
                .collect(),
        )
    }
}
