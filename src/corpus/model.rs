use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "F",
            Self::Male => "M",
            Self::Unknown => "?",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum GenderHint {
    Tag(Gender),
    Flag(bool),
}

/// Precedence: explicit tag, then boolean flag, then the corpus-wide
/// female-name table, then unknown.
pub fn resolve_gender(
    name: &str,
    hint: Option<GenderHint>,
    females: &HashMap<String, bool>,
) -> Gender {
    match hint {
        Some(GenderHint::Tag(gender)) => gender,
        Some(GenderHint::Flag(true)) => Gender::Female,
        Some(GenderHint::Flag(false)) => Gender::Male,
        None => match females.get(name) {
            Some(true) => Gender::Female,
            Some(false) => Gender::Male,
            None => Gender::Unknown,
        },
    }
}

#[derive(Clone, Debug)]
pub struct Turn {
    pub speaker: String,
    pub words: u64,
    /// Optional per-record gender annotation; most corpora rely on the
    /// female-name table instead.
    pub gender: Option<GenderHint>,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub act_label: String,
    pub scene_label: String,
    pub act_order: f64,
    pub scene_order: f64,
    pub turns: Vec<Turn>,
}

impl Scene {
    pub fn same_act(&self, other: &Scene) -> bool {
        self.act_order == other.act_order
    }
}

#[derive(Clone, Debug)]
pub struct Play {
    pub id: String,
    pub title: String,
    /// Sorted by coerced act, then coerced scene number.
    pub scenes: Vec<Scene>,
}

impl Play {
    pub fn total_turns(&self) -> usize {
        self.scenes.iter().map(|scene| scene.turns.len()).sum()
    }

    /// Distinct acts in playback order, as (order key, display label).
    pub fn act_sequence(&self) -> Vec<(f64, String)> {
        let mut acts: Vec<(f64, String)> = Vec::new();
        for scene in &self.scenes {
            if acts.last().is_none_or(|(order, _)| *order != scene.act_order) {
                acts.push((scene.act_order, scene.act_label.clone()));
            }
        }
        acts
    }
}

#[derive(Clone, Debug, Default)]
pub struct Corpus {
    pub females: HashMap<String, bool>,
    pub plays: Vec<Play>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn females() -> HashMap<String, bool> {
        HashMap::from([("NORA".to_string(), true), ("HELMER".to_string(), false)])
    }

    #[test]
    fn explicit_tag_wins_over_table() {
        let gender = resolve_gender("NORA", Some(GenderHint::Tag(Gender::Male)), &females());
        assert_eq!(gender, Gender::Male);
    }

    #[test]
    fn flag_wins_over_table() {
        assert_eq!(
            resolve_gender("HELMER", Some(GenderHint::Flag(true)), &females()),
            Gender::Female
        );
        assert_eq!(
            resolve_gender("NORA", Some(GenderHint::Flag(false)), &females()),
            Gender::Male
        );
    }

    #[test]
    fn table_lookup_then_unknown() {
        assert_eq!(resolve_gender("NORA", None, &females()), Gender::Female);
        assert_eq!(resolve_gender("HELMER", None, &females()), Gender::Male);
        assert_eq!(resolve_gender("RANK", None, &females()), Gender::Unknown);
    }

    fn scene(act: f64, label: &str) -> Scene {
        Scene {
            act_label: label.to_string(),
            scene_label: "1".to_string(),
            act_order: act,
            scene_order: 1.0,
            turns: Vec::new(),
        }
    }

    #[test]
    fn act_sequence_deduplicates_consecutive_acts() {
        let play = Play {
            id: "p".to_string(),
            title: "p".to_string(),
            scenes: vec![scene(1.0, "1"), scene(1.0, "1"), scene(2.0, "2")],
        };
        let acts = play.act_sequence();
        assert_eq!(acts.len(), 2);
        assert_eq!(acts[0].1, "1");
        assert_eq!(acts[1].1, "2");
    }
}
