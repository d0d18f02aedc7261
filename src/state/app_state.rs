use crate::app::MenuItem;
use crate::state::watchlist::Watchlist;
use chrono::{Local, NaiveDate};
use nba_api::client::schedule_date;
use nba_api::{Game, StorylineBuckets};

// ---------------------------------------------------------------------------
// Schedule state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScheduleState {
    /// Days away from today; 0 = today.
    pub date_offset: i64,
    /// Ranked by drama score, highest first.
    pub games: Vec<Game>,
    pub selected: usize,
    /// False until the first response for `date_offset` arrives.
    pub loaded: bool,
    pub error: Option<String>,
}

impl ScheduleState {
    /// Move to another day. Drops the current list.
    pub fn shift_day(&mut self, delta: i64) -> i64 {
        self.jump_to(self.date_offset.saturating_add(delta))
    }

    pub fn jump_to(&mut self, date_offset: i64) -> i64 {
        self.date_offset = date_offset;
        self.games.clear();
        self.selected = 0;
        self.loaded = false;
        self.error = None;
        self.date_offset
    }

    /// Accept a schedule response. Returns false when it belongs to a day the user
    /// already navigated away from.
    pub fn load(&mut self, date_offset: i64, games: Vec<Game>) -> bool {
        if date_offset != self.date_offset {
            return false;
        }
        let previous = self.selected_game().map(|g| g.id.clone());
        self.games = games;
        self.selected = previous
            .and_then(|id| self.games.iter().position(|g| g.id == id))
            .unwrap_or(0);
        self.loaded = true;
        self.error = None;
        true
    }

    pub fn fail(&mut self, date_offset: i64, message: String) -> bool {
        if date_offset != self.date_offset {
            return false;
        }
        self.loaded = true;
        self.error = Some(message);
        true
    }

    pub fn navigate_down(&mut self) {
        let max = self.games.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.games.get(self.selected)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        schedule_date(Local::now().date_naive(), self.date_offset).ok()
    }

    /// "Wednesday, January 15, 2025"
    pub fn date_label(&self) -> String {
        self.date()
            .map(|d| d.format("%A, %B %-d, %Y").to_string())
            .unwrap_or_else(|| format!("{:+} days", self.date_offset))
    }
}

// ---------------------------------------------------------------------------
// Briefing state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BriefingState {
    /// The game the briefing is for. Kept as a snapshot so a refresh that drops the
    /// game from the list does not blank the panel.
    pub game: Option<Game>,
    /// Bumped on every selection; responses tagged with an older value are stale.
    pub generation: u64,
    pub storylines: StorylineBuckets,
    pub loading: bool,
    pub scroll_offset: u16,
}

impl BriefingState {
    /// Start a briefing for `game` and return the generation to tag the request with.
    pub fn begin(&mut self, game: Game) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.game = Some(game);
        self.storylines = StorylineBuckets::default();
        self.loading = true;
        self.scroll_offset = 0;
        self.generation
    }

    /// Store storylines if they answer the latest request. Returns whether they were used.
    pub fn accept(&mut self, generation: u64, game_id: &str, storylines: StorylineBuckets) -> bool {
        if generation != self.generation || self.game_id() != Some(game_id) {
            return false;
        }
        self.storylines = storylines;
        self.loading = false;
        true
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game.as_ref().map(|g| g.id.as_str())
    }

    /// Keep the snapshot current when the schedule refreshes.
    pub fn refresh_game(&mut self, games: &[Game]) {
        if let Some(current) = self.game.as_mut()
            && let Some(updated) = games.iter().find(|g| g.id == current.id)
        {
            *current = updated.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub schedule: ScheduleState,
    pub briefing: BriefingState,
    pub watchlist: Watchlist,
}

impl AppState {
    pub fn new(watchlist: Watchlist) -> Self {
        Self {
            watchlist,
            ..Self::default()
        }
    }
}
