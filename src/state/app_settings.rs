use log::LevelFilter;
use nba_api::client::Endpoints;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REFRESH_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub endpoints: Endpoints,
    pub request_timeout: Option<Duration>,
    pub refresh_interval: Option<Duration>,
    pub watchlist_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            endpoints: Endpoints::default(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            refresh_interval: Some(Duration::from_secs(DEFAULT_REFRESH_SECS)),
            watchlist_path: PathBuf::from("watchlist.json"),
        }
    }
}

impl AppSettings {
    /// Read `CHRONICLES_*` environment variables once at startup.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            espn: non_empty(lookup("CHRONICLES_ESPN_URL")).unwrap_or(defaults.espn),
            // An explicitly empty relay means "talk to Reddit directly".
            relay: lookup("CHRONICLES_RELAY_URL")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.relay),
            reddit: non_empty(lookup("CHRONICLES_REDDIT_URL")).unwrap_or(defaults.reddit),
        };

        Self {
            full_screen: false,
            log_level: lookup("CHRONICLES_LOG_LEVEL").and_then(|s| s.trim().parse().ok()),
            endpoints,
            request_timeout: seconds(lookup("CHRONICLES_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS),
            refresh_interval: seconds(lookup("CHRONICLES_REFRESH_SECS"), DEFAULT_REFRESH_SECS),
            watchlist_path: non_empty(lookup("CHRONICLES_WATCHLIST"))
                .map(PathBuf::from)
                .unwrap_or_else(|| default_watchlist_path(&lookup)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Zero disables; unparsable values fall back to the default.
fn seconds(value: Option<String>, default: u64) -> Option<Duration> {
    let secs = value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(default);
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn default_watchlist_path(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(config_dir) = non_empty(lookup("XDG_CONFIG_HOME")) {
        return PathBuf::from(config_dir)
            .join("court-chronicles")
            .join("watchlist.json");
    }
    if let Some(home) = non_empty(lookup("HOME")) {
        return PathBuf::from(home)
            .join(".config")
            .join("court-chronicles")
            .join("watchlist.json");
    }
    PathBuf::from("watchlist.json")
}
