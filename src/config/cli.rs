use clap::{Parser, Subcommand};

pub const API_KEY_ENV: &str = "API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Gemini API key used to authenticate every request
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier passed to generateContent
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Generative Language API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Request timeout in seconds (HTTP client default when unset)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Show the detail view for the game with this id
    #[arg(long)]
    pub select: Option<String>,

    /// Add a game id to the comparison grid (up to 3)
    #[arg(long = "compare", value_name = "ID")]
    pub compare: Vec<String>,

    /// Print the fetched batch as JSON instead of rendering it
    #[arg(long)]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the currently most played and trending games
    Trending,
    /// Search for a game, appid or developer
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}
