use crate::corpus::{Play, Scene, Turn};

/// Single source of truth for "where in the play" playback currently is.
/// Indices are always valid for the play's sorted scene sequence, or both
/// zero when the sequence is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub scene: usize,
    pub turn: usize,
    pub playing: bool,
}

impl PlaybackCursor {
    pub fn play(&mut self, play: &Play) {
        if !play.scenes.is_empty() {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn restart(&mut self, play: &Play) {
        *self = Self::default();
        self.play(play);
    }

    /// Advances one turn while playing. Scene boundaries within an act roll
    /// over to the next scene; an act boundary is a hard stop that pauses
    /// playback and leaves the cursor on the outgoing act's last turn.
    /// Returns true when the cursor moved.
    pub fn tick(&mut self, play: &Play) -> bool {
        if !self.playing {
            return false;
        }
        let Some(scene) = play.scenes.get(self.scene) else {
            self.playing = false;
            return false;
        };

        if self.turn + 1 < scene.turns.len() {
            self.turn += 1;
            return true;
        }

        match play.scenes.get(self.scene + 1) {
            Some(next) if next.same_act(scene) => {
                self.scene += 1;
                self.turn = 0;
                true
            }
            _ => {
                self.playing = false;
                false
            }
        }
    }

    /// Maps a normalized scrub fraction onto a concrete (scene, turn) pair
    /// by walking the sorted scene sequence. Forces pause; a fraction that
    /// rounds past the end clamps to the last turn of the last scene.
    pub fn seek_to(&mut self, play: &Play, fraction: f64) {
        self.playing = false;

        let total = play.total_turns();
        if play.scenes.is_empty() || total == 0 {
            self.scene = 0;
            self.turn = 0;
            return;
        }

        let mut remaining = (fraction.max(0.0) * total as f64).floor() as usize;
        if remaining >= total {
            remaining = total - 1;
        }

        for (index, scene) in play.scenes.iter().enumerate() {
            if remaining < scene.turns.len() {
                self.scene = index;
                self.turn = remaining;
                return;
            }
            remaining -= scene.turns.len();
        }

        self.scene = play.scenes.len() - 1;
        self.turn = play.scenes[self.scene].turns.len().saturating_sub(1);
    }

    /// Jumps to the first scene carrying the given act; unknown acts are a
    /// no-op apart from pausing.
    pub fn select_act(&mut self, play: &Play, act_order: f64) {
        self.playing = false;
        if let Some(index) = play
            .scenes
            .iter()
            .position(|scene| scene.act_order == act_order)
        {
            self.scene = index;
            self.turn = 0;
        }
    }

    pub fn step_scene_forward(&mut self, play: &Play) {
        self.playing = false;
        if play.scenes.is_empty() {
            return;
        }
        self.scene = (self.scene + 1).min(play.scenes.len() - 1);
        self.turn = 0;
    }

    pub fn step_scene_back(&mut self) {
        self.playing = false;
        self.scene = self.scene.saturating_sub(1);
        self.turn = 0;
    }

    /// Reverse mapping for the progress bar, scene-granular by design.
    pub fn progress(&self, play: &Play) -> f32 {
        if play.scenes.is_empty() {
            return 0.0;
        }
        let turns_in_scene = play
            .scenes
            .get(self.scene)
            .map(|scene| scene.turns.len())
            .unwrap_or(0);
        let scenes_done = self.scene as f32 + self.turn as f32 / turns_in_scene.max(1) as f32;
        (scenes_done / play.scenes.len() as f32).min(1.0)
    }

    pub fn current_scene<'p>(&self, play: &'p Play) -> Option<&'p Scene> {
        play.scenes.get(self.scene)
    }

    pub fn current_turn<'p>(&self, play: &'p Play) -> Option<&'p Turn> {
        self.current_scene(play)
            .and_then(|scene| scene.turns.get(self.turn))
    }
}
