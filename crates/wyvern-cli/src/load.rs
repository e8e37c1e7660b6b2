//! Card database loading.
//!
//! A card database is either a single JSON file holding an array of cards,
//! or a directory of `*.json` files each holding one card or an array of
//! cards. Directory entries are read in file-name order so results are
//! reproducible.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use wyvern_query::Card;

#[derive(Deserialize)]
#[serde(untagged)]
enum CardFile {
    Many(Vec<Card>),
    One(Card),
}

/// Loads every card under `path`.
pub fn load_cards(path: &Path) -> Result<Vec<Card>> {
    let cards = if path.is_dir() {
        let mut cards = Vec::new();
        for file in json_files(path)? {
            cards.extend(read_file(&file)?);
        }
        cards
    } else {
        read_file(path)?
    };

    tracing::info!(path = %path.display(), cards = cards.len(), "loaded card database");
    Ok(cards)
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_file(path: &Path) -> Result<Vec<Card>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file: CardFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse cards in {}", path.display()))?;

    tracing::debug!(path = %path.display(), "read card file");
    Ok(match file {
        CardFile::Many(cards) => cards,
        CardFile::One(card) => vec![card],
    })
}
