use chrono::Local;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span, Text};
use tui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nba_api::drama::{drama_description, drama_label, flame_count};
use nba_api::{Category, Game, StorylineItem};

static TABS: &[&str; 2] = &["Games", "Briefing"];

const PREVIEW_CHARS: usize = 150;
const FLAME: &str = "🔥";

const HELP_TEXT: &str = "\
q / Ctrl-C   quit
1 / 2        Games / Briefing
h l  ← →     previous / next day
t            jump to today
r            reload the day
j k  ↑ ↓     move selection (Games) or scroll (Briefing)
Enter        open the briefing for the highlighted game
w            star or unstar the highlighted game
Esc          back
f            toggle full screen
\"            toggle the log pane";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Games => draw_games(f, layout.main, app),
                MenuItem::Briefing => draw_briefing(f, layout.main, app),
                MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
            }

            if let Some(area) = layout.logs {
                draw_logs(f, area);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Games => 0,
        MenuItem::Briefing => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_games(f: &mut Frame, area: Rect, app: &App) {
    let schedule = &app.state.schedule;
    let watched = app.state.watchlist.ids().len();
    let block = default_border(Color::White)
        .title(" Court Chronicles ")
        .title_bottom(Line::from(format!(" ★ {watched} watched ")).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, status, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    let mut date_spans = vec![
        Span::raw("◀ "),
        Span::styled(schedule.date_label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ▶"),
    ];
    if schedule.date_offset == 0 {
        date_spans.push(Span::raw("  "));
        date_spans.push(Span::styled(" Today ", Style::default().fg(Color::Black).bg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(date_spans)).alignment(Alignment::Center), header);

    // Transient errors (e.g. a failed watchlist save) replace the subtitle.
    let subtitle = match app.state.last_error.as_deref() {
        Some(err) if schedule.error.is_none() => {
            Paragraph::new(err.to_string()).style(Style::default().fg(Color::Red))
        }
        _ => Paragraph::new("Sorted by drama level").style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(subtitle.alignment(Alignment::Center), status);

    if let Some(err) = schedule.error.as_deref() {
        draw_message(f, content, &[err, "Press r to retry"], Color::Red);
        return;
    }
    if !schedule.loaded {
        draw_message(f, content, &["Loading the drama..."], Color::DarkGray);
        return;
    }
    if schedule.games.is_empty() {
        draw_message(
            f,
            content,
            &["No games scheduled for this day", "Try checking another date"],
            Color::DarkGray,
        );
        return;
    }

    let items: Vec<ListItem> = schedule
        .games
        .iter()
        .map(|game| ListItem::new(game_card(game, app.state.watchlist.contains(&game.id))))
        .collect();
    let list = List::new(items)
        .highlight_symbol("▶ ")
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default().with_selected(Some(schedule.selected));
    f.render_stateful_widget(list, content, &mut state);
}

fn game_card(game: &Game, watched: bool) -> Text<'static> {
    let score = game.drama_score;
    let drama_style = Style::default().fg(drama_color(score)).add_modifier(Modifier::BOLD);

    let mut top = vec![
        Span::raw(FLAME.repeat(flame_count(score))),
        Span::raw(format!(" {score}/10 ")),
        Span::styled(drama_label(score), drama_style),
        Span::raw("  "),
    ];
    if game.is_live() {
        top.push(Span::styled("● ", Style::default().fg(Color::Red)));
    }
    top.push(Span::raw(game.status.label.clone()));
    if !game.is_final()
        && let Some(start) = game.start_time
    {
        top.push(Span::styled(
            format!("  {}", start.with_timezone(&Local).format("%-I:%M %p")),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(broadcast) = &game.broadcast {
        top.push(Span::styled(format!("  📺 {broadcast}"), Style::default().fg(Color::Gray)));
    }
    if watched {
        top.push(Span::styled("  ★", Style::default().fg(Color::Yellow)));
    }

    let away = team_row(&game.away.name, &game.away.record, game.away_score);
    let home = team_row(&format!("@ {}", game.home.name), &game.home.record, game.home_score);

    Text::from(vec![Line::from(top), Line::from(away), Line::from(home), Line::default()])
}

fn team_row(name: &str, record: &str, score: Option<u16>) -> String {
    let score = score.map(|s| s.to_string()).unwrap_or_default();
    format!("  {name:<28} ({record:>5})  {score:>3}")
}

fn drama_color(score: u8) -> Color {
    match score {
        9.. => Color::Red,
        7..=8 => Color::LightRed,
        5..=6 => Color::Yellow,
        _ => Color::Gray,
    }
}

fn draw_briefing(f: &mut Frame, area: Rect, app: &mut App) {
    let block = default_border(Color::White).title(" Game Briefing ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let briefing = &app.state.briefing;
    let Some(game) = briefing.game.as_ref() else {
        draw_message(
            f,
            inner,
            &["Select a game", "Highlight a matchup on the Games tab and press Enter"],
            Color::DarkGray,
        );
        return;
    };

    let mut lines = vec![
        Line::styled(game.matchup_label(), Style::default().add_modifier(Modifier::BOLD)),
        Line::from(vec![
            Span::raw(format!("{} {}/10  ", FLAME.repeat(flame_count(game.drama_score)), game.drama_score)),
            Span::styled(
                drama_label(game.drama_score),
                Style::default().fg(drama_color(game.drama_score)).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(drama_description(game.drama_score)),
        Line::from(format!(
            "{} ({})  vs  {} ({})",
            game.away.name, game.away.record, game.home.name, game.home.record
        )),
    ];
    if let Some(venue) = &game.venue {
        lines.push(Line::styled(venue.clone(), Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::default());

    if briefing.loading {
        lines.push(Line::styled("Digging through r/nba...", Style::default().fg(Color::DarkGray)));
    } else if briefing.storylines.is_empty() {
        let hint = if game.is_final() {
            "The post-game discussion might not be active yet. Check back soon!"
        } else {
            "This might be an under-the-radar game. Check back closer to tip-off!"
        };
        lines.push(Line::from("No major storylines found for this matchup yet."));
        lines.push(Line::styled(hint, Style::default().fg(Color::DarkGray)));
    } else {
        for (category, stories) in briefing.storylines.iter() {
            if stories.is_empty() {
                continue;
            }
            push_section(&mut lines, category, stories);
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let max_scroll = paragraph.line_count(inner.width).saturating_sub(inner.height as usize);
    let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
    let briefing = &mut app.state.briefing;
    briefing.scroll_offset = briefing.scroll_offset.min(max_scroll);

    f.render_widget(paragraph.scroll((briefing.scroll_offset, 0)), inner);
}

fn push_section(lines: &mut Vec<Line<'static>>, category: Category, stories: &[StorylineItem]) {
    lines.push(Line::styled(
        category.title(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(category.tagline(), Style::default().fg(Color::DarkGray)));

    for story in stories {
        lines.push(Line::from(vec![
            Span::raw("• "),
            Span::styled(story.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::styled(
            format!(
                "  ⬆ {}  💬 {}  u/{}  {}",
                story.upvotes, story.comments, story.author, story.age
            ),
            Style::default().fg(Color::Gray),
        ));
        if let Some(preview) = story.preview(PREVIEW_CHARS) {
            lines.push(Line::from(format!("  {}", preview.replace('\n', " "))));
        }
        lines.push(Line::styled(format!("  {}", story.url), Style::default().fg(Color::Blue)));
    }
    lines.push(Line::default());
}

fn draw_message(f: &mut Frame, area: Rect, lines: &[&str], color: Color) {
    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.to_string())).collect();
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Gray)), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_api::{GameState, GameStatus, TeamLine};

    fn game(state: GameState, score: u8) -> Game {
        Game {
            id: "1".to_string(),
            home: TeamLine {
                name: "Boston Celtics".to_string(),
                abbrev: "BOS".to_string(),
                record: "40-10".to_string(),
            },
            away: TeamLine {
                name: "Los Angeles Lakers".to_string(),
                abbrev: "LAL".to_string(),
                record: "30-20".to_string(),
            },
            home_score: Some(101),
            away_score: Some(99),
            status: GameStatus {
                label: "Final".to_string(),
                state,
            },
            start_time: None,
            venue: None,
            broadcast: Some("ESPN".to_string()),
            drama_score: score,
        }
    }

    fn plain(text: &Text) -> String {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn card_shows_flames_label_and_star() {
        let text = plain(&game_card(&game(GameState::Final, 9), true));
        assert!(text.starts_with(&FLAME.repeat(5)));
        assert!(text.contains(" 9/10 MUST WATCH"));
        assert!(text.contains("📺 ESPN"));
        assert!(text.contains('★'));
        assert!(text.contains("@ Boston Celtics"));
    }

    #[test]
    fn unwatched_card_has_no_star() {
        let text = plain(&game_card(&game(GameState::Scheduled, 4), false));
        assert!(text.contains("4/10 Casual Game"));
        assert!(!text.contains('★'));
    }

    #[test]
    fn team_row_blanks_missing_score() {
        let row = team_row("Boston Celtics", "N/A", None);
        assert!(row.contains("(  N/A)"));
        assert!(row.trim_end().ends_with(')'));
    }
}
