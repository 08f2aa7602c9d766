pub const TRENDING_TOPIC: &str = "Top 5 currently most played and trending games on Steam right now with exact player numbers and lifetime sales estimates";

/// Wraps `topic` into the full instruction sent to the model.
pub fn build_detail_query(topic: &str) -> String {
    format!(
        "Fetch detailed real-time Steam data for the following: {topic}.\n\
         Focus on:\n\
         1. Player counts (current, 24h peak).\n\
         2. Accurate current pricing and discounts.\n\
         3. ESTIMATED TOTAL COPIES SOLD (lifetime sales). Use sources like SteamSpy, VGInsights, \
         or financial reports to get the most accurate current estimate.\n\
         Use SteamDB or official Steam sources via Google Search for accuracy.\n\
         Return the data in a structured format."
    )
}

pub fn build_trending_query() -> String {
    build_detail_query(TRENDING_TOPIC)
}

/// Topic for a free-text search typed by the user.
pub fn search_topic(input: &str) -> String {
    format!("Detailed stats for {} and other related games", input.trim())
}
