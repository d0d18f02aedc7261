use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request: Option<NetworkRequest> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Games),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Briefing),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Day navigation works from every tab
        (_, Char('h') | KeyCode::Left, _) => request = Some(guard.shift_day(-1)),
        (_, Char('l') | KeyCode::Right, _) => request = Some(guard.shift_day(1)),
        (_, Char('t'), _) => request = Some(guard.go_to_today()),
        (_, Char('r'), _) => request = Some(guard.schedule_request()),

        // Game list
        (MenuItem::Games, Char('j') | KeyCode::Down, _) => guard.game_down(),
        (MenuItem::Games, Char('k') | KeyCode::Up, _) => guard.game_up(),
        (MenuItem::Games, KeyCode::Enter, _) => request = guard.select_game(),
        (MenuItem::Games, Char('w'), _) => guard.toggle_watchlist(),

        // Briefing scroll
        (MenuItem::Briefing, Char('j') | KeyCode::Down, _) => {
            guard.state.briefing.scroll_offset =
                guard.state.briefing.scroll_offset.saturating_add(1);
        }
        (MenuItem::Briefing, Char('k') | KeyCode::Up, _) => {
            guard.state.briefing.scroll_offset =
                guard.state.briefing.scroll_offset.saturating_sub(1);
        }
        (MenuItem::Briefing, KeyCode::Esc, _) => guard.update_tab(MenuItem::Games),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
