//! Shared data models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// One event as returned by the model.
///
/// The object is passed through untouched, field order included; see
/// [`crate::validate`] for the optional structural check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(Map<String, Value>);

impl EventRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Labels the model may attach to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibeTag {
    RockGig,
    IndieLive,
    PostPunk,
    BluesNight,
    ElectroRock,
    LcdAdjacent,
    IndieSleaze,
    ArtLed,
    DesignLiterate,
    DiveyGood,
    Cinematic,
    ParisOnly,
    WineBar,
    Exhibition,
}

impl VibeTag {
    pub const ALL: [VibeTag; 14] = [
        VibeTag::RockGig,
        VibeTag::IndieLive,
        VibeTag::PostPunk,
        VibeTag::BluesNight,
        VibeTag::ElectroRock,
        VibeTag::LcdAdjacent,
        VibeTag::IndieSleaze,
        VibeTag::ArtLed,
        VibeTag::DesignLiterate,
        VibeTag::DiveyGood,
        VibeTag::Cinematic,
        VibeTag::ParisOnly,
        VibeTag::WineBar,
        VibeTag::Exhibition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VibeTag::RockGig => "rock_gig",
            VibeTag::IndieLive => "indie_live",
            VibeTag::PostPunk => "post_punk",
            VibeTag::BluesNight => "blues_night",
            VibeTag::ElectroRock => "electro_rock",
            VibeTag::LcdAdjacent => "lcd_adjacent",
            VibeTag::IndieSleaze => "indie_sleaze",
            VibeTag::ArtLed => "art_led",
            VibeTag::DesignLiterate => "design_literate",
            VibeTag::DiveyGood => "divey_good",
            VibeTag::Cinematic => "cinematic",
            VibeTag::ParisOnly => "paris_only",
            VibeTag::WineBar => "wine_bar",
            VibeTag::Exhibition => "exhibition",
        }
    }
}

/// Search response payload.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub events: Vec<EventRecord>,
    /// Cleaned model text, only when no array could be located
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Service identity payload for health checks.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub endpoints: Vec<&'static str>,
}

impl HealthResponse {
    pub fn ok(service: &'static str) -> Self {
        Self {
            status: "ok",
            service,
            endpoints: vec!["/api/search"],
        }
    }
}
