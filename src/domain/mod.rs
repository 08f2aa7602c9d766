mod game;
pub mod schema;
pub mod state;

pub use game::{GameStats, GroundingSource, InsightBatch, DEFAULT_SOURCE_TITLE, DEFAULT_SOURCE_URI};
pub use state::{reduce, Action, DashboardState, FetchKind, RequestToken};
