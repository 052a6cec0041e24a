use std::fs;

use anyhow::{Context, Result};

use super::model::Corpus;
use super::parse::parse_corpus;

pub fn load_corpus(path: &str) -> Result<Corpus> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("could not read corpus file {path}"))?;
    parse_corpus(&raw).with_context(|| format!("could not parse corpus file {path}"))
}
