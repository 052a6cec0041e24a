use std::collections::HashMap;

use crate::corpus::{Gender, Scene, resolve_gender};

#[derive(Clone, Debug)]
pub struct SpeakerNode {
    pub id: String,
    pub gender: Gender,
    /// Static scene-level word total, distinct from the playback-time
    /// accumulator in `DynamicState`.
    pub words: u64,
}

#[derive(Clone, Debug)]
pub struct SceneEdge {
    pub source: String,
    pub target: String,
    pub count: u32,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub nodes: Vec<SpeakerNode>,
    pub edges: Vec<SceneEdge>,
    index_by_id: HashMap<String, usize>,
    edge_index: HashMap<(String, String), usize>,
}

impl SceneGraph {
    pub fn node(&self, id: &str) -> Option<&SpeakerNode> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }
}

/// Derives the speaker-interaction graph for one scene. Pure function of
/// (scene, female table); turns without a speaker never create nodes or
/// edges, and the first turn of a scene has no predecessor pair.
pub fn build_scene_graph(scene: &Scene, females: &HashMap<String, bool>) -> SceneGraph {
    let mut graph = SceneGraph::default();

    for (index, turn) in scene.turns.iter().enumerate() {
        if !turn.speaker.is_empty() {
            let node_index = match graph.index_by_id.get(&turn.speaker) {
                Some(&node_index) => node_index,
                None => {
                    let node_index = graph.nodes.len();
                    graph.nodes.push(SpeakerNode {
                        id: turn.speaker.clone(),
                        gender: resolve_gender(&turn.speaker, turn.gender, females),
                        words: 0,
                    });
                    graph.index_by_id.insert(turn.speaker.clone(), node_index);
                    node_index
                }
            };
            graph.nodes[node_index].words += turn.words;
        }

        if index == 0 {
            continue;
        }

        let source = scene.turns[index - 1].speaker.as_str();
        let target = turn.speaker.as_str();
        if source.is_empty() || target.is_empty() {
            continue;
        }

        let key = (source.to_string(), target.to_string());
        match graph.edge_index.get(&key) {
            Some(&edge_index) => graph.edges[edge_index].count += 1,
            None => {
                let edge_index = graph.edges.len();
                graph.edges.push(SceneEdge {
                    source: key.0.clone(),
                    target: key.1.clone(),
                    count: 1,
                });
                graph.edge_index.insert(key, edge_index);
            }
        }
    }

    graph
}
