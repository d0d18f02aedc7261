//! Drama score: a 1-10 heuristic for how much a casual fan should care about a game.

use crate::Game;

const BASE_SCORE: f64 = 5.0;
const MAX_SCORE: f64 = 10.0;
const GOOD_RECORD_WINS: u32 = 30;

static BIG_MARKET_TEAMS: &[&str] = &[
    "Lakers", "Celtics", "Warriors", "Heat", "Knicks", "Bulls", "Nets",
];

static SUPERSTAR_TEAMS: &[&str] = &[
    "Lakers",
    "Celtics",
    "Warriors",
    "Mavericks",
    "Bucks",
    "Suns",
    "Nuggets",
    "76ers",
];

/// Unordered pairs; matched in either home/away order.
static RIVALRIES: &[(&str, &str)] = &[
    ("Lakers", "Celtics"),
    ("Lakers", "Clippers"),
    ("Knicks", "Nets"),
    ("Warriors", "Cavaliers"),
    ("Heat", "Celtics"),
    ("76ers", "Celtics"),
];

/// Score a game from its team names and records.
pub fn drama_score(game: &Game) -> u8 {
    let home = game.home.name.as_str();
    let away = game.away.name.as_str();
    let mut score = BASE_SCORE;

    let either_in = |list: &[&str]| list.iter().any(|t| home.contains(t) || away.contains(t));

    if either_in(BIG_MARKET_TEAMS) {
        score += 1.0;
    }
    if either_in(SUPERSTAR_TEAMS) {
        score += 1.0;
    }
    if is_rivalry(home, away) {
        score += 2.0;
    }
    if parse_wins(&game.home.record) >= GOOD_RECORD_WINS
        && parse_wins(&game.away.record) >= GOOD_RECORD_WINS
    {
        score += 1.5;
    }

    score.round().min(MAX_SCORE) as u8
}

fn is_rivalry(home: &str, away: &str) -> bool {
    RIVALRIES.iter().any(|(a, b)| {
        (home.contains(a) && away.contains(b)) || (home.contains(b) && away.contains(a))
    })
}

/// Leading integer of the "W-L" record; "N/A" or garbage counts as zero wins.
fn parse_wins(record: &str) -> u32 {
    let wins = record.split('-').next().unwrap_or_default().trim_start();
    let digits: String = wins.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Stable sort, highest drama first. Ties keep scoreboard order.
pub fn rank_by_drama(games: &mut [Game]) {
    games.sort_by(|a, b| b.drama_score.cmp(&a.drama_score));
}

/// Number of flame glyphs shown next to a score.
pub fn flame_count(score: u8) -> usize {
    usize::from(score).div_ceil(2)
}

pub fn drama_label(score: u8) -> &'static str {
    match score {
        9.. => "MUST WATCH",
        7..=8 => "HIGH DRAMA",
        5..=6 => "Worth Watching",
        _ => "Casual Game",
    }
}

pub fn drama_description(score: u8) -> &'static str {
    match score {
        9.. => "This is appointment television. Clear your schedule.",
        7..=8 => "High stakes. Big names. Don't miss this one.",
        5..=6 => "Solid matchup with interesting storylines.",
        _ => "A good game if you're a fan of these teams.",
    }
}
