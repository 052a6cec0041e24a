use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::model::{Corpus, Gender, GenderHint, Play, Scene, Turn};

#[derive(Debug, Deserialize)]
struct RawCorpus {
    #[serde(default, rename = "FEMALE_CHARACTERS")]
    female_characters: HashMap<String, bool>,
    #[serde(default)]
    plays: Vec<RawPlay>,
}

#[derive(Debug, Deserialize)]
struct RawPlay {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    scene_turns: Vec<RawScene>,
}

#[derive(Debug, Deserialize)]
struct RawScene {
    #[serde(default)]
    act: Value,
    #[serde(default)]
    scene: Value,
    #[serde(default)]
    turns: Vec<RawTurn>,
}

#[derive(Debug, Deserialize)]
struct RawTurn {
    #[serde(default)]
    speaker: String,
    #[serde(default)]
    words: Value,
    #[serde(default)]
    gender: Value,
}

pub(super) fn parse_corpus(raw: &str) -> Result<Corpus> {
    let parsed: RawCorpus = serde_json::from_str(raw).context("invalid corpus JSON")?;
    let plays = parsed
        .plays
        .into_iter()
        .map(normalize_play)
        .collect::<Vec<_>>();

    Ok(Corpus {
        females: parsed.female_characters,
        plays,
    })
}

fn normalize_play(raw: RawPlay) -> Play {
    let mut scenes = raw
        .scene_turns
        .into_iter()
        .map(normalize_scene)
        .collect::<Vec<_>>();
    scenes.sort_by(|a, b| {
        a.act_order
            .total_cmp(&b.act_order)
            .then(a.scene_order.total_cmp(&b.scene_order))
    });

    let id = if raw.id.is_empty() {
        raw.title.clone()
    } else {
        raw.id
    };

    Play {
        id,
        title: raw.title,
        scenes,
    }
}

fn normalize_scene(raw: RawScene) -> Scene {
    Scene {
        act_label: value_label(&raw.act),
        scene_label: value_label(&raw.scene),
        act_order: coerce_number(&raw.act),
        scene_order: coerce_number(&raw.scene),
        turns: raw
            .turns
            .into_iter()
            .map(|turn| Turn {
                speaker: turn.speaker,
                words: coerce_number(&turn.words).max(0.0) as u64,
                gender: gender_hint(&turn.gender),
            })
            .collect(),
    }
}

/// Number-like fields arrive as JSON numbers, numeric strings, or garbage.
/// Anything that does not coerce to a finite number counts as 0, never as
/// an error.
pub(super) fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

fn gender_hint(value: &Value) -> Option<GenderHint> {
    match value {
        Value::String(tag) => match tag.as_str() {
            "F" => Some(GenderHint::Tag(Gender::Female)),
            "M" => Some(GenderHint::Tag(Gender::Male)),
            "?" => Some(GenderHint::Tag(Gender::Unknown)),
            _ => None,
        },
        Value::Bool(flag) => Some(GenderHint::Flag(*flag)),
        _ => None,
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coercion_follows_loose_number_semantics() {
        assert_eq!(coerce_number(&json!(3)), 3.0);
        assert_eq!(coerce_number(&json!(2.5)), 2.5);
        assert_eq!(coerce_number(&json!("4")), 4.0);
        assert_eq!(coerce_number(&json!(" 7 ")), 7.0);
        assert_eq!(coerce_number(&json!("prologue")), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!([1])), 0.0);
    }

    #[test]
    fn scenes_sort_by_act_then_scene_regardless_of_input_order() {
        let raw = json!({
            "plays": [{
                "id": "p1",
                "title": "Test_Play",
                "scene_turns": [
                    { "act": "2", "scene": "1", "turns": [] },
                    { "act": "1", "scene": "2", "turns": [] },
                    { "act": "1", "scene": "1", "turns": [] }
                ]
            }]
        })
        .to_string();

        let corpus = parse_corpus(&raw).unwrap();
        let ordered = corpus.plays[0]
            .scenes
            .iter()
            .map(|scene| (scene.act_label.as_str(), scene.scene_label.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(ordered, vec![("1", "1"), ("1", "2"), ("2", "1")]);
    }

    #[test]
    fn garbage_act_sorts_as_zero() {
        let raw = json!({
            "plays": [{
                "id": "p1",
                "title": "t",
                "scene_turns": [
                    { "act": 1, "scene": 1, "turns": [] },
                    { "act": "prologue", "scene": 1, "turns": [] }
                ]
            }]
        })
        .to_string();

        let corpus = parse_corpus(&raw).unwrap();
        assert_eq!(corpus.plays[0].scenes[0].act_label, "prologue");
        assert_eq!(corpus.plays[0].scenes[0].act_order, 0.0);
    }

    #[test]
    fn words_clamp_to_non_negative_integers() {
        let raw = json!({
            "plays": [{
                "id": "p1",
                "title": "t",
                "scene_turns": [{
                    "act": 1,
                    "scene": 1,
                    "turns": [
                        { "speaker": "A", "words": "12" },
                        { "speaker": "B", "words": -4 },
                        { "speaker": "C" }
                    ]
                }]
            }]
        })
        .to_string();

        let corpus = parse_corpus(&raw).unwrap();
        let turns = &corpus.plays[0].scenes[0].turns;
        assert_eq!(turns[0].words, 12);
        assert_eq!(turns[1].words, 0);
        assert_eq!(turns[2].words, 0);
    }

    #[test]
    fn per_turn_gender_annotations_survive_parsing() {
        let raw = json!({
            "plays": [{
                "id": "p1",
                "title": "t",
                "scene_turns": [{
                    "act": 1,
                    "scene": 1,
                    "turns": [
                        { "speaker": "A", "words": 1, "gender": "F" },
                        { "speaker": "B", "words": 1, "gender": false },
                        { "speaker": "C", "words": 1, "gender": "x" }
                    ]
                }]
            }]
        })
        .to_string();

        let corpus = parse_corpus(&raw).unwrap();
        let turns = &corpus.plays[0].scenes[0].turns;
        assert!(matches!(
            turns[0].gender,
            Some(GenderHint::Tag(Gender::Female))
        ));
        assert!(matches!(turns[1].gender, Some(GenderHint::Flag(false))));
        assert!(turns[2].gender.is_none());
    }

    #[test]
    fn missing_sections_degrade_to_empty() {
        let corpus = parse_corpus("{}").unwrap();
        assert!(corpus.plays.is_empty());
        assert!(corpus.females.is_empty());
        assert!(parse_corpus("not json").is_err());
    }
}
