mod load;
mod model;
mod parse;

pub use load::load_corpus;
pub use model::{Corpus, Gender, GenderHint, Play, Scene, Turn, resolve_gender};
