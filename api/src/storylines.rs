//! Turn raw r/nba posts into the four storyline buckets for one matchup.

use crate::reddit::Post;
use crate::{Category, StorylineBuckets, StorylineItem};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashSet;

pub const BUCKET_LIMIT: usize = 5;

/// Substring test, not whole-word.
static DRAMA_KEYWORDS: &[&str] = &[
    "beef",
    "trash talk",
    "fight",
    "ejected",
    "technical",
    "suspended",
    "fined",
    "flagrant",
    "controversy",
];

/// What classification looks at for one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub has_drama: bool,
    pub home_matches: usize,
    pub away_matches: usize,
}

impl Signals {
    fn mentions_either(&self) -> bool {
        self.home_matches > 0 || self.away_matches > 0
    }
}

/// Priority order; the first rule that holds decides the bucket.
static RULES: &[(Category, fn(&Signals) -> bool)] = &[
    (Category::Drama, is_drama),
    (Category::Matchup, is_matchup),
    (Category::News, is_news),
    (Category::Buzz, Signals::mentions_either),
];

fn is_drama(s: &Signals) -> bool {
    s.has_drama && s.mentions_either()
}

fn is_matchup(s: &Signals) -> bool {
    s.home_matches > 0 && s.away_matches > 0
}

fn is_news(s: &Signals) -> bool {
    s.home_matches >= 2 || s.away_matches >= 2
}

/// `None` means the post is about neither team.
pub fn classify(signals: &Signals) -> Option<Category> {
    RULES
        .iter()
        .find(|(_, holds)| holds(signals))
        .map(|(category, _)| *category)
}

/// Whole-word, case-insensitive counter for one team's keywords. Word boundaries are ASCII-only.
#[derive(Debug, Clone)]
pub struct TeamMatcher {
    patterns: Vec<Regex>,
}

impl TeamMatcher {
    pub fn new(keywords: &[String]) -> Self {
        let patterns = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .filter_map(|k| Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(&k))).ok())
            .collect();
        Self { patterns }
    }

    /// Total occurrences across all keywords in already-lowercased text.
    pub fn count(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .map(|re| re.find_iter(text).count())
            .sum()
    }
}

/// Hot first, then new; a post id seen twice keeps its first copy.
pub fn merge_unique(first: Vec<Post>, second: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|post| seen.insert(post.id.clone()))
        .collect()
}

pub fn signals_for(post: &Post, home: &TeamMatcher, away: &TeamMatcher) -> Signals {
    let content = format!("{} {}", post.title, post.selftext).to_lowercase();
    Signals {
        has_drama: DRAMA_KEYWORDS.iter().any(|k| content.contains(k)),
        home_matches: home.count(&content),
        away_matches: away.count(&content),
    }
}

/// Classify, sort by upvotes (stable) and cap every bucket.
pub fn categorize(
    posts: &[Post],
    home_keywords: &[String],
    away_keywords: &[String],
    now: DateTime<Utc>,
) -> StorylineBuckets {
    let home = TeamMatcher::new(home_keywords);
    let away = TeamMatcher::new(away_keywords);
    let mut buckets = StorylineBuckets::default();

    for post in posts {
        let signals = signals_for(post, &home, &away);
        if let Some(category) = classify(&signals) {
            buckets.get_mut(category).push(to_item(post, now));
        }
    }

    for category in Category::ALL {
        let items = buckets.get_mut(category);
        items.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
        items.truncate(BUCKET_LIMIT);
    }

    buckets
}

fn to_item(post: &Post, now: DateTime<Utc>) -> StorylineItem {
    StorylineItem {
        id: post.id.clone(),
        title: post.title.clone(),
        author: post.author.clone(),
        upvotes: post.ups,
        comments: post.num_comments,
        url: format!("https://reddit.com{}", post.permalink),
        body: Some(post.selftext.clone()).filter(|s| !s.is_empty()),
        age: time_ago(post.created_utc, now),
    }
}

/// "Nm ago" under an hour, "Nh ago" under a day, "Nd ago" beyond.
pub fn time_ago(created_utc: f64, now: DateTime<Utc>) -> String {
    let diff = (now.timestamp() as f64 - created_utc).max(0.0) as i64;
    if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86_400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86_400)
    }
}
