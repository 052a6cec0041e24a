use std::collections::HashMap;

use eframe::egui::Color32;

use crate::corpus::Play;
use crate::util::hsl_color;

const GOLDEN_ANGLE_DEGREES: f32 = 137.508;
const SATURATION: f32 = 0.62;
const LIGHTNESS: f32 = 0.46;

/// Stable per-play speaker colors: hues stepped by the golden angle over
/// the sorted set of distinct speaker names, so assignment does not depend
/// on the order speakers first appear.
#[derive(Clone, Debug, Default)]
pub struct SpeakerPalette {
    hues: HashMap<String, f32>,
}

impl SpeakerPalette {
    pub fn for_play(play: &Play) -> Self {
        let mut names = play
            .scenes
            .iter()
            .flat_map(|scene| scene.turns.iter())
            .filter(|turn| !turn.speaker.is_empty())
            .map(|turn| turn.speaker.clone())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();

        let hues = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name, (index as f32 * GOLDEN_ANGLE_DEGREES) % 360.0))
            .collect();

        Self { hues }
    }

    pub fn color(&self, name: &str) -> Color32 {
        match self.hues.get(name) {
            Some(&hue) => hsl_color(hue, SATURATION, LIGHTNESS),
            None => Color32::from_gray(120),
        }
    }
}
