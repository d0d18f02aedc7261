use crate::drama::drama_score;
use crate::espn::{EspnCompetition, EspnCompetitor, EspnEvent, EspnStatus, ScoreboardResponse};
use crate::keywords::keywords_for;
use crate::reddit::{Listing, Post};
use crate::storylines::{categorize, merge_unique};
use crate::{Game, GameState, GameStatus, StorylineBuckets, TeamLine};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_NBA_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball/nba";
pub const CORS_RELAY: &str = "https://corsproxy.io/?";
pub const REDDIT_BASE: &str = "https://www.reddit.com";
const SUBREDDIT: &str = "nba";
const LISTING_LIMIT: u32 = 100;
const MISSING_RECORD: &str = "N/A";

/// Which r/nba listing to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Hot,
    New,
}

impl Feed {
    fn path(&self) -> &'static str {
        match self {
            Feed::Hot => "hot",
            Feed::New => "new",
        }
    }
}

/// Upstream locations. Overridable so tests and alternate relays can point elsewhere.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub espn: String,
    /// Prefix the URL-encoded Reddit URL is appended to; empty means direct.
    pub relay: String,
    pub reddit: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            espn: ESPN_NBA_SITE_V2.to_string(),
            relay: CORS_RELAY.to_string(),
            reddit: REDDIT_BASE.to_string(),
        }
    }
}

/// NBA schedule + r/nba client.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    endpoints: Endpoints,
    /// No timeout unless the caller sets one.
    timeout: Option<Duration>,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("court-chronicles/0.1 (terminal game picker)")
                .build()
                .unwrap_or_default(),
            endpoints: Endpoints::default(),
            timeout: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status(StatusCode, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(status, url) => write!(f, "HTTP {status} for {url}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Games for today's local date shifted by `date_offset` days, scored but unsorted.
    pub async fn fetch_schedule(&self, date_offset: i64) -> ApiResult<Vec<Game>> {
        let date = schedule_date(Local::now().date_naive(), date_offset)?;
        self.fetch_scoreboard(date).await
    }

    /// Games for one calendar date, in scoreboard order.
    pub async fn fetch_scoreboard(&self, date: NaiveDate) -> ApiResult<Vec<Game>> {
        let url = format!("{}/scoreboard?dates={}", self.endpoints.espn, date_param(date));
        debug!("fetching scoreboard {url}");
        let raw: ScoreboardResponse = self.get(&url).await?;
        let games: Vec<Game> = raw
            .events
            .unwrap_or_default()
            .iter()
            .map(map_event_to_game)
            .collect();
        debug!("scoreboard for {date}: {} games", games.len());
        Ok(games)
    }

    /// One r/nba listing, up to 100 posts.
    pub async fn fetch_listing(&self, feed: Feed) -> ApiResult<Vec<Post>> {
        let url = listing_url(&self.endpoints, feed);
        let listing: Listing = self.get(&url).await?;
        Ok(listing.into_posts())
    }

    /// Categorized r/nba storylines for a matchup. Never fails: a listing that cannot be
    /// fetched contributes no posts.
    pub async fn fetch_storylines(&self, home_team: &str, away_team: &str) -> StorylineBuckets {
        debug!("searching r/nba for {home_team} vs {away_team}");
        let home_keywords = keywords_for(home_team);
        let away_keywords = keywords_for(away_team);

        let (hot, new) = futures_util::future::join(
            self.fetch_listing(Feed::Hot),
            self.fetch_listing(Feed::New),
        )
        .await;

        let hot = hot.unwrap_or_else(|e| {
            warn!("hot posts unavailable: {e}");
            Vec::new()
        });
        let new = new.unwrap_or_else(|e| {
            warn!("new posts unavailable: {e}");
            Vec::new()
        });

        let posts = merge_unique(hot, new);
        let buckets = categorize(&posts, &home_keywords, &away_keywords, Utc::now());
        debug!(
            "{} unique posts, {} storylines for {home_team} vs {away_team}",
            posts.len(),
            buckets.len()
        );
        buckets
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status, url.to_owned()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

pub fn schedule_date(today: NaiveDate, date_offset: i64) -> ApiResult<NaiveDate> {
    TimeDelta::try_days(date_offset)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or_else(|| ApiError::Other(format!("date offset {date_offset} out of range")))
}

/// ESPN's `dates` parameter: YYYYMMDD.
pub fn date_param(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn listing_url(endpoints: &Endpoints, feed: Feed) -> String {
    let target = format!(
        "{}/r/{SUBREDDIT}/{}.json?limit={LISTING_LIMIT}",
        endpoints.reddit,
        feed.path()
    );
    if endpoints.relay.is_empty() {
        target
    } else {
        format!("{}{}", endpoints.relay, urlencoding::encode(&target))
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_event_to_game(event: &EspnEvent) -> Game {
    static EMPTY: EspnCompetition = EspnCompetition {
        competitors: None,
        status: None,
        venue: None,
        broadcasts: None,
    };
    let competition = event
        .competitions
        .as_deref()
        .and_then(|c| c.first())
        .unwrap_or(&EMPTY);

    let status = map_status(competition.status.as_ref().or(event.status.as_ref()));

    let competitors = competition.competitors.as_deref().unwrap_or_default();
    let (home, away) = split_competitors(competitors);

    // ESPN reports "0" before tip-off.
    let started = status.state != GameState::Scheduled;
    let score = |c: Option<&EspnCompetitor>| {
        c.and_then(|c| c.score.as_deref())
            .and_then(|s| s.trim().parse::<u16>().ok())
            .filter(|_| started)
    };

    let venue = competition
        .venue
        .as_ref()
        .and_then(|v| v.full_name.clone());

    let broadcast = competition
        .broadcasts
        .as_deref()
        .and_then(|b| b.first())
        .and_then(|b| b.names.as_deref())
        .and_then(|names| names.first())
        .filter(|name| !name.is_empty())
        .cloned();

    let mut game = Game {
        id: event.id.clone().unwrap_or_default(),
        home: map_team(home),
        away: map_team(away),
        home_score: score(home),
        away_score: score(away),
        status,
        start_time: event.date.as_deref().and_then(parse_event_date),
        venue,
        broadcast,
        drama_score: 0,
    };
    game.drama_score = drama_score(&game);
    game
}

/// Use "home" / "away" flags; otherwise take competitors in index order, never the same
/// one for both sides.
fn split_competitors(
    competitors: &[EspnCompetitor],
) -> (Option<&EspnCompetitor>, Option<&EspnCompetitor>) {
    let flagged = |side: &str| competitors.iter().position(|c| c.home_away.as_deref() == Some(side));
    let home = flagged("home").or_else(|| (0..competitors.len()).find(|&i| Some(i) != flagged("away")));
    let away = flagged("away").or_else(|| (0..competitors.len()).find(|&i| Some(i) != home));
    (home.map(|i| &competitors[i]), away.map(|i| &competitors[i]))
}

fn map_team(c: Option<&EspnCompetitor>) -> TeamLine {
    let Some(c) = c else {
        return TeamLine {
            record: MISSING_RECORD.into(),
            ..Default::default()
        };
    };
    let team = c.team.as_ref();
    let record = c
        .records
        .as_deref()
        .and_then(|r| r.first())
        .and_then(|r| r.summary.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| MISSING_RECORD.into());

    TeamLine {
        name: team.and_then(|t| t.display_name.clone()).unwrap_or_default(),
        abbrev: team.and_then(|t| t.abbreviation.clone()).unwrap_or_default(),
        record,
    }
}

fn map_status(status: Option<&EspnStatus>) -> GameStatus {
    let status_type = status.and_then(|s| s.status_type.as_ref());
    let state = status_type
        .and_then(|t| t.state.as_deref())
        .map(parse_state)
        .unwrap_or_default();
    let label = status_type
        .and_then(|t| t.description.clone())
        .unwrap_or_else(|| default_label(state).to_string());
    GameStatus { label, state }
}

fn parse_state(s: &str) -> GameState {
    match s {
        "in" => GameState::Live,
        "post" => GameState::Final,
        _ => GameState::Scheduled,
    }
}

fn default_label(state: GameState) -> &'static str {
    match state {
        GameState::Scheduled => "Scheduled",
        GameState::Live => "In Progress",
        GameState::Final => "Final",
    }
}

/// ESPN mixes full RFC 3339 and minute precision ("2025-01-15T00:30Z").
fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use chrono::TimeZone;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn api_for(server: &Server) -> NbaApi {
        NbaApi::new().with_endpoints(Endpoints {
            espn: server.url(),
            relay: String::new(),
            reddit: server.url(),
        })
    }

    fn competitor(home_away: &str, name: &str, abbrev: &str, score: &str, record: Option<&str>) -> serde_json::Value {
        let mut c = json!({
            "homeAway": home_away,
            "team": { "displayName": name, "abbreviation": abbrev },
            "score": score,
        });
        if let Some(record) = record {
            c["records"] = json!([{ "name": "overall", "summary": record }]);
        }
        c
    }

    fn event(id: &str, state: &str, description: &str, competitors: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "id": id,
            "date": "2025-01-15T00:30Z",
            "competitions": [{
                "competitors": competitors,
                "status": { "type": { "description": description, "state": state } },
                "venue": { "fullName": "Crypto.com Arena" },
                "broadcasts": [{ "names": ["ESPN"] }],
            }],
        })
    }

    fn listing(posts: &[(&str, &str, i64)]) -> String {
        let children: Vec<serde_json::Value> = posts
            .iter()
            .map(|(id, title, ups)| {
                json!({ "kind": "t3", "data": {
                    "id": id,
                    "title": title,
                    "author": "hooper",
                    "ups": ups,
                    "num_comments": 3,
                    "permalink": format!("/r/nba/comments/{id}/"),
                    "selftext": "",
                    "created_utc": 1_736_942_400.0,
                }})
            })
            .collect();
        json!({ "kind": "Listing", "data": { "children": children } }).to_string()
    }

    #[test]
    fn schedule_date_applies_offset() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(date_param(schedule_date(today, 1).unwrap()), "20250201");
        assert_eq!(date_param(schedule_date(today, -31).unwrap()), "20241231");
        assert_eq!(date_param(schedule_date(today, 0).unwrap()), "20250131");
        assert!(schedule_date(today, i64::MAX).is_err());
    }

    #[test]
    fn listing_url_goes_through_relay_when_configured() {
        let relayed = listing_url(&Endpoints::default(), Feed::Hot);
        assert_eq!(
            relayed,
            "https://corsproxy.io/?https%3A%2F%2Fwww.reddit.com%2Fr%2Fnba%2Fhot.json%3Flimit%3D100"
        );
        let direct = listing_url(
            &Endpoints { relay: String::new(), ..Default::default() },
            Feed::New,
        );
        assert_eq!(direct, "https://www.reddit.com/r/nba/new.json?limit=100");
    }

    #[test]
    fn event_maps_teams_status_and_extras() {
        let raw: EspnEvent = serde_json::from_value(event(
            "401",
            "in",
            "3rd Quarter",
            vec![
                competitor("away", "Boston Celtics", "BOS", "77", Some("32-12")),
                competitor("home", "Los Angeles Lakers", "LAL", "80", Some("35-10")),
            ],
        ))
        .unwrap();
        let game = map_event_to_game(&raw);
        assert_eq!(game.id, "401");
        assert_eq!(game.home.name, "Los Angeles Lakers");
        assert_eq!(game.away.abbrev, "BOS");
        assert_eq!(game.home_score, Some(80));
        assert_eq!(game.away_score, Some(77));
        assert_eq!(game.status.label, "3rd Quarter");
        assert_eq!(game.status.state, GameState::Live);
        assert_eq!(game.venue.as_deref(), Some("Crypto.com Arena"));
        assert_eq!(game.broadcast.as_deref(), Some("ESPN"));
        assert_eq!(
            game.start_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 0, 30, 0).unwrap())
        );
        assert_eq!(game.drama_score, 10);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let raw: EspnEvent = serde_json::from_value(json!({
            "id": "402",
            "status": { "type": { "description": "Scheduled", "state": "pre" } },
            "competitions": [{
                "competitors": [
                    { "homeAway": "home", "team": { "displayName": "Utah Jazz", "abbreviation": "UTA" }, "score": "0" },
                    { "homeAway": "away", "team": { "displayName": "Washington Wizards", "abbreviation": "WAS" }, "score": "0" },
                ],
            }],
        }))
        .unwrap();
        let game = map_event_to_game(&raw);
        assert_eq!(game.home.record, "N/A");
        assert_eq!(game.away.record, "N/A");
        assert_eq!(game.home_score, None, "pre-game zero is not a score");
        assert_eq!(game.status.state, GameState::Scheduled);
        assert_eq!(game.status.label, "Scheduled");
        assert!(game.broadcast.is_none());
        assert!(game.start_time.is_none());
        assert!(game.venue.is_none());
        assert_eq!(game.drama_score, 5);
    }

    #[test]
    fn event_without_competitors_still_maps() {
        let raw: EspnEvent = serde_json::from_value(json!({ "id": "403" })).unwrap();
        let game = map_event_to_game(&raw);
        assert_eq!(game.id, "403");
        assert_eq!(game.home.record, "N/A");
        assert_eq!(game.status.label, "Scheduled");
    }

    #[test]
    fn lone_home_flag_never_pairs_a_team_with_itself() {
        let raw: EspnEvent = serde_json::from_value(event(
            "404",
            "pre",
            "Scheduled",
            vec![
                competitor("", "Boston Celtics", "BOS", "0", None),
                competitor("home", "Los Angeles Lakers", "LAL", "0", None),
            ],
        ))
        .unwrap();
        let game = map_event_to_game(&raw);
        assert_eq!(game.home.abbrev, "LAL");
        assert_eq!(game.away.abbrev, "BOS");

        let raw: EspnEvent = serde_json::from_value(event(
            "405",
            "pre",
            "Scheduled",
            vec![
                competitor("away", "Boston Celtics", "BOS", "0", None),
                competitor("", "Los Angeles Lakers", "LAL", "0", None),
            ],
        ))
        .unwrap();
        let game = map_event_to_game(&raw);
        assert_eq!(game.home.abbrev, "LAL");
        assert_eq!(game.away.abbrev, "BOS");
    }

    #[test]
    fn parse_event_date_accepts_both_precisions() {
        let full = parse_event_date("2025-01-15T00:30:00Z");
        let short = parse_event_date("2025-01-15T00:30Z");
        assert!(full.is_some());
        assert_eq!(full, short);
        assert!(parse_event_date("tonight").is_none());
    }

    #[tokio::test]
    async fn fetch_scoreboard_requests_date_and_maps_events() {
        let mut server = Server::new_async().await;
        let body = json!({ "events": [
            event("1", "post", "Final", vec![
                competitor("home", "Utah Jazz", "UTA", "101", Some("10-20")),
                competitor("away", "Washington Wizards", "WAS", "99", Some("8-22")),
            ]),
            event("2", "pre", "Scheduled", vec![
                competitor("home", "Los Angeles Lakers", "LAL", "0", Some("35-10")),
                competitor("away", "Boston Celtics", "BOS", "0", Some("32-12")),
            ]),
        ]});
        let mock = server
            .mock("GET", "/scoreboard")
            .match_query(Matcher::UrlEncoded("dates".into(), "20250115".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let games = api_for(&server).fetch_scoreboard(date).await.unwrap();
        mock.assert_async().await;

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].drama_score, 5);
        assert_eq!(games[0].home_score, Some(101));
        assert!(games[0].is_final());
        assert_eq!(games[1].drama_score, 10);
    }

    #[tokio::test]
    async fn fetch_scoreboard_surfaces_server_errors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let err = api_for(&server).fetch_scoreboard(date).await.unwrap_err();
        assert!(matches!(err, ApiError::Status(StatusCode::SERVICE_UNAVAILABLE, _)), "{err}");
    }

    #[tokio::test]
    async fn fetch_scoreboard_surfaces_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert!(api_for(&server).fetch_scoreboard(date).await.is_err());
    }

    #[tokio::test]
    async fn fetch_scoreboard_with_no_events_is_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert!(api_for(&server).fetch_scoreboard(date).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storylines_merge_both_listings() {
        let mut server = Server::new_async().await;
        let _hot = server
            .mock("GET", "/r/nba/hot.json")
            .match_query(Matcher::UrlEncoded("limit".into(), "100".into()))
            .with_status(200)
            .with_body(listing(&[
                ("a", "Giannis ejected after flagrant foul on Tatum", 900),
                ("b", "Celtics extend win streak", 300),
            ]))
            .create_async()
            .await;
        let _new = server
            .mock("GET", "/r/nba/new.json")
            .match_query(Matcher::UrlEncoded("limit".into(), "100".into()))
            .with_status(200)
            .with_body(listing(&[
                ("b", "Celtics extend win streak", 300),
                ("c", "Bucks vs Celtics preview", 50),
                ("d", "Wembanyama blocks everything", 5000),
            ]))
            .create_async()
            .await;

        let buckets = api_for(&server)
            .fetch_storylines("Milwaukee Bucks", "Boston Celtics")
            .await;
        assert_eq!(buckets.drama.len(), 1);
        assert_eq!(buckets.matchup.len(), 1);
        assert_eq!(buckets.buzz.len(), 1, "duplicate post counted once");
        assert!(buckets.news.is_empty());
        assert_eq!(buckets.get(Category::Buzz)[0].id, "b");
        assert_eq!(buckets.len(), 3);
    }

    #[tokio::test]
    async fn storylines_survive_one_failing_listing() {
        let mut server = Server::new_async().await;
        let _hot = server
            .mock("GET", "/r/nba/hot.json")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let _new = server
            .mock("GET", "/r/nba/new.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(listing(&[("x", "Jazz sign a two-way guard", 12)]))
            .create_async()
            .await;

        let buckets = api_for(&server).fetch_storylines("Utah Jazz", "Orlando Magic").await;
        assert_eq!(buckets.buzz.len(), 1);
    }

    #[tokio::test]
    async fn storylines_degrade_to_empty_buckets_when_both_listings_fail() {
        let mut server = Server::new_async().await;
        let _hot = server
            .mock("GET", "/r/nba/hot.json")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;
        let _new = server
            .mock("GET", "/r/nba/new.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let buckets = api_for(&server).fetch_storylines("Utah Jazz", "Orlando Magic").await;
        assert_eq!(buckets, StorylineBuckets::default());
    }

    #[tokio::test]
    async fn storylines_with_no_posts_are_empty() {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        for feed in ["hot", "new"] {
            let mock = server
                .mock("GET", format!("/r/nba/{feed}.json").as_str())
                .match_query(Matcher::Any)
                .with_status(200)
                .with_body(listing(&[]))
                .create_async()
                .await;
            mocks.push(mock);
        }

        let buckets = api_for(&server).fetch_storylines("Utah Jazz", "Orlando Magic").await;
        assert!(buckets.is_empty());
    }
}
