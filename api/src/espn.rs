/// ESPN API raw wire types: serde shapes for deserializing the NBA scoreboard.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
    pub date: Option<String>, // ISO 8601, sometimes without seconds ("2025-01-15T00:30Z")
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub description: Option<String>, // "Scheduled", "In Progress", "Final"
    pub state: Option<String>,       // "pre" | "in" | "post"
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
    /// Preferred over the event-level status when present.
    pub status: Option<EspnStatus>,
    pub venue: Option<EspnVenue>,
    pub broadcasts: Option<Vec<EspnBroadcast>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub records: Option<Vec<EspnRecord>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeam {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRecord {
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnBroadcast {
    pub names: Option<Vec<String>>,
}
