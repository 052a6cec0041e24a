mod anchors;
mod cursor;
mod dynamics;
mod graph;
mod palette;
mod scheduler;

pub use cursor::PlaybackCursor;
pub use dynamics::DynamicState;
pub use graph::{SceneGraph, build_scene_graph};
pub use palette::SpeakerPalette;
pub use scheduler::TickTimer;
