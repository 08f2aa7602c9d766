use super::game::{GameStats, GroundingSource, InsightBatch};
use chrono::{DateTime, Utc};
use tracing::debug;

pub const MAX_COMPARISON: usize = 3;
pub const MIN_COMPARISON: usize = 2;

pub const TRENDING_FAILED: &str = "Failed to load trending data. Check your API key or connection.";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";

/// Identifies one fetch. Tokens only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Trending,
    Search,
}

impl FetchKind {
    fn failure_message(self) -> &'static str {
        match self {
            FetchKind::Trending => TRENDING_FAILED,
            FetchKind::Search => SEARCH_FAILED,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    FetchStarted {
        token: RequestToken,
        kind: FetchKind,
    },
    FetchSucceeded {
        token: RequestToken,
        kind: FetchKind,
        batch: InsightBatch,
    },
    FetchFailed {
        token: RequestToken,
        kind: FetchKind,
    },
    Select {
        id: String,
    },
    ClearSelection,
    ToggleCompare {
        id: String,
    },
    ClearComparison,
    StartComparison,
    StopComparison,
    GoHome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub trending_games: Vec<GameStats>,
    pub search_results: Vec<GameStats>,
    pub selected_game: Option<GameStats>,
    pub comparison_games: Vec<GameStats>,
    pub is_comparing: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub sources: Vec<GroundingSource>,
    pub last_fetched: Option<DateTime<Utc>>,
    latest_request: RequestToken,
}

impl DashboardState {
    /// Token for the next fetch, newer than anything issued so far.
    pub fn next_token(&self) -> RequestToken {
        RequestToken(self.latest_request.0 + 1)
    }

    pub fn latest_request(&self) -> RequestToken {
        self.latest_request
    }

    /// Search results when there are any, trending games otherwise.
    pub fn visible_games(&self) -> &[GameStats] {
        if self.search_results.is_empty() {
            &self.trending_games
        } else {
            &self.search_results
        }
    }

    /// The visible records and current sources as a batch, once a fetch has
    /// been applied.
    pub fn visible_batch(&self) -> Option<InsightBatch> {
        let fetched_at = self.last_fetched?;
        Some(InsightBatch {
            games: self.visible_games().to_vec(),
            sources: self.sources.clone(),
            fetched_at,
        })
    }

    pub fn is_in_comparison(&self, id: &str) -> bool {
        self.comparison_games.iter().any(|g| g.id == id)
    }

    pub fn can_compare(&self) -> bool {
        self.comparison_games.len() >= MIN_COMPARISON
    }

    fn find_game(&self, id: &str) -> Option<&GameStats> {
        self.visible_games()
            .iter()
            .chain(self.comparison_games.iter())
            .find(|g| g.id == id)
    }

    fn is_current(&self, token: RequestToken) -> bool {
        if token != self.latest_request {
            debug!(
                ?token,
                latest = ?self.latest_request,
                "Discarding stale fetch outcome"
            );
            return false;
        }
        true
    }
}

pub fn reduce(state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::FetchStarted { token, kind } => {
            let mut next = DashboardState {
                latest_request: token.max(state.latest_request),
                loading: true,
                error: None,
                ..state
            };
            if kind == FetchKind::Search {
                next.is_comparing = false;
                next.selected_game = None;
            }
            next
        }
        Action::FetchSucceeded { token, kind, batch } => {
            if !state.is_current(token) {
                return state;
            }
            let mut next = DashboardState {
                loading: false,
                sources: batch.sources,
                last_fetched: Some(batch.fetched_at),
                ..state
            };
            match kind {
                FetchKind::Trending => next.trending_games = batch.games,
                FetchKind::Search => next.search_results = batch.games,
            }
            next
        }
        Action::FetchFailed { token, kind } => {
            if !state.is_current(token) {
                return state;
            }
            DashboardState {
                loading: false,
                error: Some(kind.failure_message().to_string()),
                ..state
            }
        }
        Action::Select { id } => {
            let found = state.find_game(&id).cloned();
            match found {
                Some(game) => DashboardState {
                    selected_game: Some(game),
                    is_comparing: false,
                    ..state
                },
                None => state,
            }
        }
        Action::ClearSelection => DashboardState {
            selected_game: None,
            is_comparing: false,
            ..state
        },
        Action::ToggleCompare { id } => {
            let mut next = state;
            if next.is_in_comparison(&id) {
                next.comparison_games.retain(|g| g.id != id);
            } else if next.comparison_games.len() < MAX_COMPARISON {
                let found = next.find_game(&id).cloned();
                next.comparison_games.extend(found);
            }
            next
        }
        Action::ClearComparison => DashboardState {
            comparison_games: Vec::new(),
            ..state
        },
        Action::StartComparison if state.can_compare() => DashboardState {
            is_comparing: true,
            selected_game: None,
            ..state
        },
        Action::StartComparison => state,
        Action::StopComparison => DashboardState {
            is_comparing: false,
            ..state
        },
        Action::GoHome => DashboardState {
            selected_game: None,
            is_comparing: false,
            search_results: Vec::new(),
            ..state
        },
    }
}
