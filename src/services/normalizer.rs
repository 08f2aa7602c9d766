use crate::domain::schema::validate_record;
use crate::domain::{GameStats, GroundingSource};
use crate::error::{GameError, Result};
use crate::infrastructure::GroundingMetadata;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Parses the model's raw text into game records.
///
/// Blank text is an empty list. Malformed JSON fails with a serialization
/// error; well-formed JSON that breaks the record schema fails with
/// [`GameError::Schema`]. Later records repeating an earlier `id` are dropped.
pub fn parse_games(raw: &str) -> Result<Vec<GameStats>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = value else {
        return Err(GameError::Schema {
            index: 0,
            reason: "expected a top-level array".to_string(),
        });
    };

    let mut seen = HashSet::new();
    let mut games = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        validate_record(index, &item)?;
        let game: GameStats = serde_json::from_value(item)?;
        if !seen.insert(game.id.clone()) {
            warn!(id = %game.id, name = %game.name, "Dropping record with duplicate id");
            continue;
        }
        games.push(game);
    }

    Ok(games)
}

/// One source per grounding chunk; chunks without a web citation get the
/// placeholder title and uri.
pub fn extract_sources(metadata: Option<&GroundingMetadata>) -> Vec<GroundingSource> {
    metadata
        .and_then(|m| m.grounding_chunks.as_ref())
        .map(|chunks| {
            chunks
                .iter()
                .map(|chunk| {
                    let web = chunk.web.as_ref();
                    GroundingSource::new(
                        web.and_then(|w| w.title.as_deref()),
                        web.and_then(|w| w.uri.as_deref()),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn normalize(
    raw: Option<&str>,
    metadata: Option<&GroundingMetadata>,
) -> Result<(Vec<GameStats>, Vec<GroundingSource>)> {
    let games = parse_games(raw.unwrap_or("[]"))?;
    let sources = extract_sources(metadata);
    Ok((games, sources))
}
