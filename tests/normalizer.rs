use std::fs;
use std::path::PathBuf;

use steaminsight::domain::{GameStats, DEFAULT_SOURCE_TITLE, DEFAULT_SOURCE_URI};
use steaminsight::error::GameError;
use steaminsight::infrastructure::GenerateContentResponse;
use steaminsight::services::normalizer::{normalize, parse_games};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn minimal_record_without_metadata() {
    let raw = r#"[{"id":"1","name":"Foo","currentPlayers":100,"currentPrice":"$9.99","description":"d","totalSales":"1M"}]"#;
    let (games, sources) = normalize(Some(raw), None).unwrap();

    assert_eq!(games, vec![GameStats::new("1", "Foo", 100, "$9.99", "d", "1M")]);
    let game = &games[0];
    assert_eq!(game.peak_players_24h, None);
    assert_eq!(game.all_time_peak, None);
    assert_eq!(game.discount_percentage, None);
    assert_eq!(game.developer, None);
    assert!(game.tags.is_empty());
    assert!(sources.is_empty());
}

#[test]
fn parses_provider_response_fixture() {
    let raw = read_fixture("generate_content_response.json");
    let response: GenerateContentResponse =
        serde_json::from_str(&raw).expect("fixture should parse");

    let (games, sources) =
        normalize(response.text().as_deref(), response.grounding_metadata()).unwrap();

    assert_eq!(games.len(), 2);
    assert_eq!(games[0].id, "730");
    assert_eq!(games[0].current_players, 1_312_457);
    assert_eq!(games[0].peak_players_24h, Some(1_598_211));
    assert_eq!(games[0].developer.as_deref(), Some("Valve"));
    assert_eq!(games[0].tags.len(), 4);
    assert_eq!(games[1].current_players, 98_231);
    assert_eq!(games[1].discount_percentage, Some(20));

    assert_eq!(sources.len(), 3);
    assert_eq!(sources[0].title, "steamdb.info");
    assert_eq!(sources[0].uri, "https://steamdb.info/charts/");
    assert_eq!(sources[1].title, DEFAULT_SOURCE_TITLE);
    assert_eq!(sources[1].uri, "https://store.steampowered.com/app/730/");
    assert_eq!(sources[2].title, DEFAULT_SOURCE_TITLE);
    assert_eq!(sources[2].uri, DEFAULT_SOURCE_URI);
}

#[test]
fn serialized_games_parse_back_unchanged() {
    let mut full = GameStats::new("730", "Counter-Strike 2", 1_312_457, "Free", "Shooter", "50M+");
    full.peak_players_24h = Some(1_598_211);
    full.all_time_peak = Some(1_862_531);
    full.discount_percentage = Some(0);
    full.release_date = Some("Aug 21, 2012".to_string());
    full.developer = Some("Valve".to_string());
    full.publisher = Some("Valve".to_string());
    full.tags = vec!["FPS".to_string(), "Shooter".to_string()];
    full.rating = Some("Very Positive".to_string());
    full.header_image = Some("https://example.invalid/730.jpg".to_string());
    full.last_updated = Some("2026-10-19".to_string());

    let games = vec![full, GameStats::new("1", "Foo", 0, "$9.99", "d", "1M")];
    let text = serde_json::to_string(&games).unwrap();

    assert_eq!(parse_games(&text).unwrap(), games);
}

#[test]
fn missing_required_field_is_reported_with_its_index() {
    let raw = r#"[
        {"id":"1","name":"Foo","currentPlayers":1,"currentPrice":"$1","description":"d","totalSales":"1M"},
        {"id":"2","name":"Bar","currentPlayers":1,"description":"d","totalSales":"1M"}
    ]"#;

    match parse_games(raw) {
        Err(GameError::Schema { index, reason }) => {
            assert_eq!(index, 1);
            assert!(reason.contains("currentPrice"), "{reason}");
        }
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[test]
fn truncated_text_fails_to_deserialize() {
    let err = parse_games(r#"[{"id":"1","name":"Fo"#).unwrap_err();
    assert!(matches!(err, GameError::Serialization(_)));
}

#[test]
fn counts_beyond_f64_precision_round_trip_exactly() {
    let mut game = GameStats::new("1", "Foo", 9_007_199_254_740_993, "$9.99", "d", "1M");
    game.all_time_peak = Some(u64::MAX);
    let games = vec![game];

    let text = serde_json::to_string(&games).unwrap();
    let parsed = parse_games(&text).unwrap();

    assert_eq!(parsed[0].current_players, 9_007_199_254_740_993);
    assert_eq!(parsed, games);
}
