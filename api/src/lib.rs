pub mod client;
pub mod drama;
pub mod espn;
pub mod keywords;
pub mod reddit;
pub mod storylines;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of ESPN / Reddit wire formats
// ---------------------------------------------------------------------------

/// One game on the schedule for a single day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub home: TeamLine,
    pub away: TeamLine,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    pub status: GameStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub broadcast: Option<String>,
    /// Filled in once when the record is mapped from the scoreboard.
    pub drama_score: u8,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status.state == GameState::Live
    }

    pub fn is_final(&self) -> bool {
        self.status.state == GameState::Final
    }

    /// "Boston Celtics @ Los Angeles Lakers"
    pub fn matchup_label(&self) -> String {
        format!("{} @ {}", self.away.name, self.home.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamLine {
    pub name: String,   // "Los Angeles Lakers"
    pub abbrev: String, // "LAL"
    pub record: String, // "35-10", or "N/A" when the feed omits it
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStatus {
    pub label: String, // "Scheduled", "3rd Quarter", "Final/OT"
    pub state: GameState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Scheduled,
    Live,
    Final,
}

/// A discussion thread that mentions at least one of the two teams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorylineItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub upvotes: i64,
    pub comments: u64,
    pub url: String,
    pub body: Option<String>,
    /// "42m ago", "3h ago", "2d ago", fixed when the feed was fetched.
    pub age: String,
}

impl StorylineItem {
    /// Body text cut to `max` characters with a trailing ellipsis.
    pub fn preview(&self, max: usize) -> Option<String> {
        let body = self.body.as_deref()?;
        if body.chars().count() > max {
            Some(format!("{}...", body.chars().take(max).collect::<String>()))
        } else {
            Some(body.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Drama,
    Matchup,
    News,
    Buzz,
}

impl Category {
    /// Display order, which is also classification priority.
    pub const ALL: [Category; 4] = [
        Category::Drama,
        Category::Matchup,
        Category::News,
        Category::Buzz,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Drama => "drama",
            Category::Matchup => "matchup",
            Category::News => "news",
            Category::Buzz => "buzz",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Drama => "The Drama",
            Category::Matchup => "The Matchup",
            Category::News => "Team News",
            Category::Buzz => "The Buzz",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Category::Drama => "Beef, trash talk, and controversies",
            Category::Matchup => "Head-to-head battles and rivalry moments",
            Category::News => "Latest updates and breaking news",
            Category::Buzz => "What r/nba is talking about",
        }
    }
}

/// The four storyline buckets. Every key is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorylineBuckets {
    pub drama: Vec<StorylineItem>,
    pub matchup: Vec<StorylineItem>,
    pub news: Vec<StorylineItem>,
    pub buzz: Vec<StorylineItem>,
}

impl StorylineBuckets {
    pub fn get(&self, category: Category) -> &[StorylineItem] {
        match category {
            Category::Drama => &self.drama,
            Category::Matchup => &self.matchup,
            Category::News => &self.news,
            Category::Buzz => &self.buzz,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<StorylineItem> {
        match category {
            Category::Drama => &mut self.drama,
            Category::Matchup => &mut self.matchup,
            Category::News => &mut self.news,
            Category::Buzz => &mut self.buzz,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[StorylineItem])> {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
