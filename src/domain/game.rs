use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use tracing::warn;

pub const DEFAULT_SOURCE_TITLE: &str = "Steam Source";
pub const DEFAULT_SOURCE_URI: &str = "#";

/// One game's statistics as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "player_count")]
    pub current_players: u64,
    #[serde(
        default,
        deserialize_with = "optional_player_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub peak_players_24h: Option<u64>,
    #[serde(
        default,
        deserialize_with = "optional_player_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub all_time_peak: Option<u64>,
    pub total_sales: String,
    pub current_price: String,
    #[serde(
        default,
        deserialize_with = "optional_discount",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "tag_list", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl GameStats {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        current_players: u64,
        current_price: impl Into<String>,
        description: impl Into<String>,
        total_sales: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_players,
            peak_players_24h: None,
            all_time_peak: None,
            total_sales: total_sales.into(),
            current_price: current_price.into(),
            discount_percentage: None,
            release_date: None,
            developer: None,
            publisher: None,
            tags: Vec::new(),
            description: description.into(),
            rating: None,
            header_image: None,
            last_updated: None,
        }
    }

    pub fn is_discounted(&self) -> bool {
        self.discount_percentage.is_some_and(|d| d > 0)
    }
}

/// A web page the provider cited to ground its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

impl GroundingSource {
    pub fn new(title: Option<&str>, uri: Option<&str>) -> Self {
        Self {
            title: non_empty(title).unwrap_or(DEFAULT_SOURCE_TITLE).to_string(),
            uri: non_empty(uri).unwrap_or(DEFAULT_SOURCE_URI).to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Result of a single fetch: the records plus the citations backing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBatch {
    pub games: Vec<GameStats>,
    pub sources: Vec<GroundingSource>,
    pub fetched_at: DateTime<Utc>,
}

impl InsightBatch {
    pub fn new(games: Vec<GameStats>, sources: Vec<GroundingSource>) -> Self {
        Self {
            games,
            sources,
            fetched_at: Utc::now(),
        }
    }
}

/// Exact for integers; only real fractions are rounded.
fn count_from_number(number: &Number, field: &str) -> u64 {
    if let Some(count) = number.as_u64() {
        return count;
    }
    if number.is_i64() {
        warn!(%number, field, "Clamping negative count to zero");
        return 0;
    }
    let value = number.as_f64().unwrap_or_default();
    if value < 0.0 {
        warn!(value, field, "Clamping negative count to zero");
        return 0;
    }
    if value > u64::MAX as f64 {
        warn!(value, field, "Saturating count at u64::MAX");
        return u64::MAX;
    }
    value.round() as u64
}

fn player_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    Ok(count_from_number(&number, "player count"))
}

fn optional_player_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.map(|n| count_from_number(&n, "player count")))
}

fn optional_discount<'de, D>(deserializer: D) -> std::result::Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.map(|n| {
        let value = n.as_f64().unwrap_or_default();
        if !(0.0..=100.0).contains(&value) {
            warn!(value, "Clamping discount percentage into 0-100");
        }
        value.clamp(0.0, 100.0).round() as u8
    }))
}

fn tag_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
