use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nba_api::{Game, StorylineBuckets};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSchedule {
        date_offset: i64,
    },
    /// `generation` lets the UI drop answers for a game that is no longer selected.
    LoadStorylines {
        generation: u64,
        game_id: String,
        home_team: String,
        away_team: String,
    },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Already ranked by drama score.
    ScheduleLoaded { date_offset: i64, games: Vec<Game> },
    ScheduleFailed { date_offset: i64, message: String },
    StorylinesLoaded {
        generation: u64,
        game_id: String,
        storylines: StorylineBuckets,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshDue,
}
