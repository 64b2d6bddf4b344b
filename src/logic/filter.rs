//! Admin roster filter: name search plus age bracket.

use crate::models::{AgeBracket, Player};
use serde::Deserialize;

/// Filter state of the admin player table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct PlayerFilter {
    /// Case-insensitive substring of first or last name. Empty matches everyone.
    #[serde(default)]
    pub search: String,
    pub bracket: Option<AgeBracket>,
}

impl PlayerFilter {
    pub fn matches(&self, player: &Player) -> bool {
        let needle = self.search.trim().to_lowercase();
        let name_ok = needle.is_empty()
            || player.first_name.to_lowercase().contains(&needle)
            || player.last_name.to_lowercase().contains(&needle);
        let bracket_ok = self.bracket.map_or(true, |b| player.age_bracket() == b);
        name_ok && bracket_ok
    }

    pub fn apply<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Player> {
        vec![
            Player::new("Sofiane", "Meziane", 19),
            Player::new("Rayan", "Sofi", 29),
            Player::new("Walid", "Cherif", 41),
        ]
    }

    #[test]
    fn empty_filter_keeps_everyone() {
        let players = roster();
        assert_eq!(PlayerFilter::default().apply(&players).len(), 3);
    }

    #[test]
    fn search_matches_first_or_last_name_ignoring_case() {
        let players = roster();
        let filter = PlayerFilter {
            search: " SOFI ".to_string(),
            bracket: None,
        };
        let names: Vec<_> = filter
            .apply(&players)
            .iter()
            .map(|p| p.first_name.as_str())
            .collect();
        assert_eq!(names, ["Sofiane", "Rayan"]);
    }

    #[test]
    fn bracket_combines_with_search() {
        let players = roster();
        let filter = PlayerFilter {
            search: "sofi".to_string(),
            bracket: Some(AgeBracket::Adult),
        };
        let found = filter.apply(&players);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Rayan");

        let seniors = PlayerFilter {
            search: String::new(),
            bracket: Some(AgeBracket::Senior),
        };
        assert_eq!(seniors.apply(&players)[0].last_name, "Cherif");
    }
}
