//! Team name -> search keywords (nickname, abbreviation, star players).

/// Ordered: the first key found inside the display name wins.
static TEAM_KEYWORDS: &[(&str, &[&str])] = &[
    ("Lakers", &["Lakers", "LAL", "LeBron", "Anthony Davis", "AD"]),
    ("Celtics", &["Celtics", "BOS", "Tatum", "Brown", "Jayson", "Jaylen"]),
    ("Warriors", &["Warriors", "GSW", "Curry", "Steph", "Dubs", "Klay"]),
    ("Heat", &["Heat", "MIA", "Butler", "Jimmy", "Bam"]),
    ("Knicks", &["Knicks", "NYK", "Brunson", "Randle"]),
    ("Bulls", &["Bulls", "CHI", "DeRozan", "LaVine"]),
    ("Nets", &["Nets", "BKN", "Brooklyn", "Mikal"]),
    ("Sixers", &["76ers", "Sixers", "PHI", "Embiid", "Maxey"]),
    ("Clippers", &["Clippers", "LAC", "Kawhi", "PG", "Harden"]),
    ("Mavericks", &["Mavericks", "Mavs", "DAL", "Luka", "Doncic", "Kyrie"]),
    ("Rockets", &["Rockets", "HOU", "Houston"]),
    ("Bucks", &["Bucks", "MIL", "Giannis", "Dame", "Lillard"]),
    ("Raptors", &["Raptors", "TOR", "Toronto", "Scottie"]),
    ("Suns", &["Suns", "PHX", "Booker", "Durant", "KD", "Beal"]),
    ("Nuggets", &["Nuggets", "DEN", "Jokic", "Murray", "Jamal"]),
    ("Cavaliers", &["Cavaliers", "Cavs", "CLE", "Mitchell", "Garland"]),
    ("Trail Blazers", &["Blazers", "POR", "Portland"]),
    ("Spurs", &["Spurs", "SAS", "Wembanyama", "Wemby"]),
    ("Grizzlies", &["Grizzlies", "MEM", "Morant", "Ja"]),
    ("Pelicans", &["Pelicans", "NOP", "Zion", "Ingram"]),
    ("Thunder", &["Thunder", "OKC", "SGA", "Shai"]),
    ("Jazz", &["Jazz", "UTA", "Utah"]),
    ("Kings", &["Kings", "SAC", "Fox", "Sabonis"]),
    ("Hawks", &["Hawks", "ATL", "Trae", "Young"]),
    ("Hornets", &["Hornets", "CHA", "LaMelo", "Ball"]),
    ("Magic", &["Magic", "ORL", "Banchero", "Paolo"]),
    ("Pistons", &["Pistons", "DET", "Cade", "Cunningham"]),
    ("Pacers", &["Pacers", "IND", "Haliburton"]),
    ("Wizards", &["Wizards", "WAS", "Poole", "Kuzma"]),
    ("Timberwolves", &["Timberwolves", "Wolves", "MIN", "Edwards", "Ant", "Towns"]),
];

/// Keywords used to spot a team in free text.
///
/// Falls back to the last word of the display name ("Utah Jazz" -> "Jazz") for teams
/// missing from the table. An empty or all-whitespace name yields the name itself.
pub fn keywords_for(team_name: &str) -> Vec<String> {
    if let Some((_, words)) = TEAM_KEYWORDS
        .iter()
        .find(|(key, _)| team_name.contains(key))
    {
        return words.iter().map(|w| (*w).to_string()).collect();
    }

    let last = team_name
        .split_whitespace()
        .last()
        .unwrap_or(team_name);
    vec![last.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_team_returns_table_entry() {
        let kw = keywords_for("Los Angeles Lakers");
        assert_eq!(kw[0], "Lakers");
        assert!(kw.contains(&"Anthony Davis".to_string()));
    }

    #[test]
    fn multi_word_key_matches() {
        assert_eq!(keywords_for("Portland Trail Blazers"), vec!["Blazers", "POR", "Portland"]);
    }

    #[test]
    fn philadelphia_display_name_misses_sixers_key() {
        // ESPN says "Philadelphia 76ers"; the table key is "Sixers".
        assert_eq!(keywords_for("Philadelphia 76ers"), vec!["76ers"]);
        assert!(keywords_for("Sixers").contains(&"Embiid".to_string()));
    }

    #[test]
    fn unknown_team_falls_back_to_last_word() {
        assert_eq!(keywords_for("Seattle SuperSonics"), vec!["SuperSonics"]);
        assert_eq!(keywords_for("Expansion"), vec!["Expansion"]);
    }

    #[test]
    fn first_table_entry_wins() {
        // "Heat" appears before "Nets" in the table.
        assert_eq!(keywords_for("Heat Nets")[0], "Heat");
    }

    #[test]
    fn every_non_empty_name_yields_keywords() {
        for name in ["Lakers", "x", "  padded name  ", "Oklahoma City Thunder"] {
            let kw = keywords_for(name);
            assert!(!kw.is_empty());
            assert!(kw.iter().all(|k| !k.is_empty()), "{name:?} -> {kw:?}");
        }
    }
}
