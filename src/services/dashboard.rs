use crate::domain::{reduce, Action, DashboardState, FetchKind, InsightBatch, RequestToken};
use crate::error::{GameError, Result};
use crate::infrastructure::ContentGenerator;
use crate::services::insight::InsightService;
use crate::services::query::search_topic;
use tracing::{error, info};

/// Owns the dashboard state and feeds fetch outcomes through the reducer.
pub struct Dashboard<G> {
    insight: InsightService<G>,
    state: DashboardState,
}

impl<G: ContentGenerator> Dashboard<G> {
    pub fn new(insight: InsightService<G>) -> Self {
        Self {
            insight,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Marks a fetch of `kind` as in flight and returns its token.
    pub fn begin(&mut self, kind: FetchKind) -> RequestToken {
        let token = self.state.next_token();
        self.dispatch(Action::FetchStarted { token, kind });
        token
    }

    /// Applies the outcome of the fetch identified by `token`. Outcomes of
    /// superseded fetches are ignored by the reducer.
    pub fn complete(&mut self, token: RequestToken, kind: FetchKind, outcome: Result<InsightBatch>) {
        match outcome {
            Ok(batch) => self.dispatch(Action::FetchSucceeded { token, kind, batch }),
            Err(e) => {
                error!(error = %e, ?kind, "Fetch failed");
                self.dispatch(Action::FetchFailed { token, kind });
            }
        }
    }

    pub async fn load_trending(&mut self) {
        let token = self.begin(FetchKind::Trending);
        let outcome = self.insight.fetch_trending_games().await;
        self.complete(token, FetchKind::Trending, outcome);
    }

    /// Runs a user search. Blank input is rejected before any request.
    pub async fn search(&mut self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            return Err(GameError::EmptyQuery);
        }

        info!("Searching for {}", input.trim());
        let token = self.begin(FetchKind::Search);
        let outcome = self.insight.fetch_steam_data(&search_topic(input)).await;
        self.complete(token, FetchKind::Search, outcome);
        Ok(())
    }

    /// Applies `--select` and `--compare` choices on top of the loaded data.
    pub fn apply_choices(&mut self, select: Option<&str>, compare: &[String]) {
        for id in compare {
            self.dispatch(Action::ToggleCompare { id: id.clone() });
        }
        if !compare.is_empty() {
            self.dispatch(Action::StartComparison);
        }
        if let Some(id) = select {
            self.dispatch(Action::Select { id: id.to_string() });
        }
    }
}
