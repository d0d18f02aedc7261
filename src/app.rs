use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use crate::state::watchlist::Watchlist;
use log::{debug, warn};
use nba_api::{Game, StorylineBuckets};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Games,
    Briefing,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let watchlist = Watchlist::load(settings.watchlist_path.clone());
        let app = Self {
            state: AppState::new(watchlist),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_schedule_loaded(&mut self, date_offset: i64, games: Vec<Game>) {
        if !self.state.schedule.load(date_offset, games) {
            debug!("dropping schedule for stale offset {date_offset}");
            return;
        }
        self.state.last_error = None;
        self.state.briefing.refresh_game(&self.state.schedule.games);
    }

    pub fn on_schedule_failed(&mut self, date_offset: i64, message: String) {
        if self.state.schedule.fail(date_offset, message.clone()) {
            self.state.last_error = Some(message);
        }
    }

    pub fn on_storylines_loaded(&mut self, generation: u64, game_id: &str, storylines: StorylineBuckets) {
        if !self.state.briefing.accept(generation, game_id, storylines) {
            debug!("dropping stale storylines for game {game_id} (generation {generation})");
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Schedule navigation
    // -----------------------------------------------------------------------

    pub fn schedule_request(&self) -> NetworkRequest {
        NetworkRequest::LoadSchedule { date_offset: self.state.schedule.date_offset }
    }

    /// Move `delta` days and return the request for the new day.
    pub fn shift_day(&mut self, delta: i64) -> NetworkRequest {
        self.state.schedule.shift_day(delta);
        self.state.last_error = None;
        self.schedule_request()
    }

    pub fn go_to_today(&mut self) -> NetworkRequest {
        self.state.schedule.jump_to(0);
        self.state.last_error = None;
        self.schedule_request()
    }

    pub fn game_down(&mut self) {
        self.state.schedule.navigate_down();
    }

    pub fn game_up(&mut self) {
        self.state.schedule.navigate_up();
    }

    /// Open the briefing for the highlighted game and return its storyline request.
    /// Switches to the Briefing tab as a side-effect.
    pub fn select_game(&mut self) -> Option<NetworkRequest> {
        let game = self.state.schedule.selected_game()?.clone();
        let game_id = game.id.clone();
        let home_team = game.home.name.clone();
        let away_team = game.away.name.clone();
        let generation = self.state.briefing.begin(game);
        self.update_tab(MenuItem::Briefing);
        Some(NetworkRequest::LoadStorylines { generation, game_id, home_team, away_team })
    }

    pub fn toggle_watchlist(&mut self) {
        let Some(game_id) = self.state.schedule.selected_game().map(|g| g.id.clone()) else {
            return;
        };
        match self.state.watchlist.toggle(&game_id) {
            Ok(watched) => debug!("game {game_id} watched: {watched}"),
            Err(e) => {
                warn!("watchlist save to {} failed: {e}", self.state.watchlist.path().display());
                self.state.last_error = Some(e);
            }
        }
    }
}
