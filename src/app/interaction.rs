use eframe::egui::{self, Pos2, Rect, Ui, pos2};

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn handle_node_drag(&mut self, rect: Rect, response: &egui::Response) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(id) = self.node_at(to_local(rect, pointer))
        {
            self.dynamics.begin_drag(&id);
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && self.dynamics.dragging().is_some()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.dynamics.drag_to(to_local(rect, pointer));
        }

        if response.drag_stopped() {
            self.dynamics.end_drag();
        }
    }

    pub(in crate::app) fn hovered_node(&self, ui: &Ui, rect: Rect) -> Option<String> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        self.node_at(to_local(rect, pointer))
    }

    fn node_at(&self, position: Pos2) -> Option<String> {
        let mut best: Option<(String, f32)> = None;
        for node in &self.scene_graph.nodes {
            let Some(node_position) = self.dynamics.position(&node.id) else {
                continue;
            };
            let distance = node_position.distance(position);
            if distance <= self.dynamics.node_radius(&node.id) + 4.0
                && best.as_ref().is_none_or(|(_, nearest)| distance < *nearest)
            {
                best = Some((node.id.clone(), distance));
            }
        }
        best.map(|(id, _)| id)
    }
}

fn to_local(rect: Rect, pointer: Pos2) -> Pos2 {
    pos2(pointer.x - rect.left(), pointer.y - rect.top())
}
