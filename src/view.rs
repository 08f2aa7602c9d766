//! Plain-text rendering of the dashboard.

use crate::domain::{DashboardState, GameStats, GroundingSource};
use std::fmt::Write;

const CARD_TAGS: usize = 3;
const LABEL_WIDTH: usize = 16;
const COLUMN_WIDTH: usize = 22;

pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}\n");
    }

    if state.is_comparing {
        out.push_str(&render_comparison(&state.comparison_games));
    } else if let Some(game) = &state.selected_game {
        out.push_str(&render_detail(game, &state.sources));
    } else {
        out.push_str(&render_cards(state));
    }

    if let Some(fetched_at) = state.last_fetched {
        let _ = writeln!(out, "\nFetched {}", fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    out
}

fn render_cards(state: &DashboardState) -> String {
    let mut out = String::new();
    if state.search_results.is_empty() {
        let _ = writeln!(out, "Trending Now  (Live Steam Activity)");
    } else {
        let _ = writeln!(out, "Search Results ({})", state.search_results.len());
    }
    let _ = writeln!(out, "{}", "=".repeat(40));

    let games = state.visible_games();
    if games.is_empty() {
        out.push_str("No games to show.\n");
    }
    for game in games {
        out.push_str(&render_card(game, state.is_in_comparison(&game.id)));
    }

    if !state.comparison_games.is_empty() && !state.is_comparing {
        let _ = writeln!(
            out,
            "\n{} Games Selected for comparison",
            state.comparison_games.len()
        );
    }

    out.push_str(&render_sources(&state.sources));
    out
}

pub fn render_card(game: &GameStats, in_comparison: bool) -> String {
    let mut out = String::new();
    let marker = if in_comparison { "[x]" } else { "[ ]" };
    let _ = writeln!(out, "\n{marker} {}  (id {})", game.name, game.id);
    let _ = writeln!(
        out,
        "    {} players | {} Sold",
        format_count(game.current_players),
        game.total_sales
    );

    let _ = write!(out, "    {}", game.current_price);
    if let Some(discount) = game.discount_percentage.filter(|d| *d > 0) {
        let _ = write!(out, "  -{discount}%");
    }
    out.push('\n');

    if !game.tags.is_empty() {
        let tags: Vec<String> = game
            .tags
            .iter()
            .take(CARD_TAGS)
            .map(|t| t.to_uppercase())
            .collect();
        let _ = writeln!(out, "    {}", tags.join(" · "));
    }
    out
}

pub fn render_detail(game: &GameStats, sources: &[GroundingSource]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", game.name);
    let _ = writeln!(out, "{}", "=".repeat(game.name.chars().count().max(1)));
    let _ = writeln!(out, "{}\n", game.description);

    let rows = [
        ("Current Players", format_count(game.current_players)),
        ("24h Peak", format_optional_count(game.peak_players_24h)),
        ("Total Sales", game.total_sales.clone()),
        ("Price", format_price(game)),
        ("Rating", or_dash(game.rating.as_deref())),
        ("Developer", or_dash(game.developer.as_deref())),
        ("Publisher", or_dash(game.publisher.as_deref())),
        ("Release Date", or_dash(game.release_date.as_deref())),
        ("All Time Peak", format_optional_count(game.all_time_peak)),
        ("Header Image", or_dash(game.header_image.as_deref())),
        ("Last Updated", or_dash(game.last_updated.as_deref())),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
    }

    if !game.tags.is_empty() {
        let _ = writeln!(out, "{:<LABEL_WIDTH$}{}", "Tags", game.tags.join(", "));
    }

    let trend: Vec<String> = player_trend(game)
        .iter()
        .map(|(label, players)| format!("{label} {}", format_optional_count(*players)))
        .collect();
    let _ = writeln!(out, "\nPlayer Trend    {}", trend.join(" → "));

    out.push_str(&render_sources(sources));
    out
}

/// Estimated player counts over the last two days. Only the 24h point and
/// `Now` come from the record; the 48h and 12h points are scaled from the
/// current count.
pub fn player_trend(game: &GameStats) -> [(&'static str, Option<u64>); 4] {
    let scaled = |tenths: u128| {
        let value = u128::from(game.current_players) * tenths / 10;
        u64::try_from(value).unwrap_or(u64::MAX)
    };
    [
        ("48h ago", Some(scaled(8))),
        ("24h ago", game.peak_players_24h),
        ("12h ago", Some(scaled(11))),
        ("Now", Some(game.current_players)),
    ]
}

pub fn render_comparison(games: &[GameStats]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comparing {} selected titles side-by-side.\n",
        games.len()
    );

    let _ = write!(out, "{:<LABEL_WIDTH$}", "");
    for game in games {
        let _ = write!(out, "{:<COLUMN_WIDTH$}", truncate(&game.name, COLUMN_WIDTH - 2));
    }
    out.push('\n');

    let metrics: [(&str, fn(&GameStats) -> String); 8] = [
        ("Current Players", |g| format_count(g.current_players)),
        ("24h Peak", |g| format_optional_count(g.peak_players_24h)),
        ("All Time Peak", |g| format_optional_count(g.all_time_peak)),
        ("Total Sales", |g| g.total_sales.clone()),
        ("Price", |g| g.current_price.clone()),
        ("Rating", |g| or_dash(g.rating.as_deref())),
        ("Release Date", |g| or_dash(g.release_date.as_deref())),
        ("Developer", |g| or_dash(g.developer.as_deref())),
    ];

    for (label, metric) in metrics {
        let _ = write!(out, "{label:<LABEL_WIDTH$}");
        for game in games {
            let _ = write!(out, "{:<COLUMN_WIDTH$}", truncate(&metric(game), COLUMN_WIDTH - 2));
        }
        out.push('\n');
    }
    out
}

pub fn render_sources(sources: &[GroundingSource]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let mut out = String::from("\nSources\n");
    for source in sources {
        let _ = writeln!(out, "  - {} <{}>", source.title, source.uri);
    }
    out
}

/// Formats a count with thousands separators, e.g. `1234567` as `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_optional_count(value: Option<u64>) -> String {
    value.map(format_count).unwrap_or_else(|| "-".to_string())
}

fn format_price(game: &GameStats) -> String {
    match game.discount_percentage {
        Some(d) if d > 0 => format!("{} (-{d}%)", game.current_price),
        _ => game.current_price.clone(),
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
