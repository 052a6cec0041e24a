use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Pos2, pos2};

/// Fixed radial reference positions: ids sorted lexicographically, placed
/// evenly on a circle of radius 0.35 * min(w, h), first node at the top,
/// proceeding clockwise in screen coordinates. Invariant under permutation
/// of the input.
pub fn radial_anchors(ids: &[&str], width: f32, height: f32) -> HashMap<String, Pos2> {
    let mut sorted = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.is_empty() {
        return HashMap::new();
    }

    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) * 0.35;
    let count = sorted.len();

    let mut anchors = HashMap::with_capacity(count);
    for (index, id) in sorted.into_iter().enumerate() {
        let angle = TAU * index as f32 / count as f32 - TAU / 4.0;
        anchors.insert(
            id,
            pos2(
                center_x + radius * angle.cos(),
                center_y + radius * angle.sin(),
            ),
        );
    }
    anchors
}
