//! Fixed instructions sent to the completion API.

/// Model used for every search.
pub const MODEL: &str = "claude-sonnet-4-20250514";

/// Output budget for a single reply.
pub const MAX_TOKENS: u32 = 4000;

/// Value of the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

/// Server-side web search tool.
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
pub const WEB_SEARCH_TOOL_NAME: &str = "web_search";

/// System instruction describing the extraction task.
pub const SYSTEM_PROMPT: &str = r#"You are a Paris events data extractor. Search for REAL events happening THIS WEEK in Paris. Focus on: live music (rock, indie, post-punk, blues, electro), art exhibitions, cinema screenings, DJ nights. Prioritize venues in and near the 20th arrondissement (Belleville, Ménilmontant, Oberkampf, Jourdain).

Return ONLY valid JSON array. No markdown, no backticks, no preamble. Each event object must have:
{
  "title": "exact event name",
  "venue_name": "exact venue name",
  "date": "ISO 8601 datetime",
  "end_time": "ISO 8601 or null",
  "price": number or 0 for free or null if unknown,
  "description": "1-2 sentences about the event",
  "editorial": "one confident sentence, magazine voice, why this matters",
  "vibe_tags": ["from: rock_gig, indie_live, post_punk, blues_night, electro_rock, lcd_adjacent, indie_sleaze, art_led, design_literate, divey_good, cinematic, paris_only, wine_bar, exhibition"],
  "sources": [{"name": "source name", "url": "EXACT full URL to the specific event page"}],
  "recurring": boolean,
  "editorial_pick": boolean,
  "trusted_platform": boolean,
  "solo": boolean,
  "coffee_tip": "nearby coffee suggestion or null",
  "late_night_tip": "what to do after or null"
}

CRITICAL RULES:
- Only include events you found via web search with REAL URLs that you visited
- Every URL must point to the SPECIFIC event page, not a homepage
- Do not invent events or URLs
- If you can't find the specific event URL, use the venue's programme page URL
- Include the source website name accurately
- Return 5-10 events per search, diverse across days and venues"#;

/// Build the user turn for a query. The query is embedded verbatim.
pub fn user_message(query: &str) -> String {
    format!(
        "Search for: {}\n\nReturn ONLY a JSON array of events found.",
        query
    )
}
