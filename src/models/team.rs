//! Persisted Team and Group records, and their sequential names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (assigned when the record is created).
pub type TeamId = Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A persisted team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub group_id: Option<GroupId>,
}

/// A persisted group of teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// Name for team slot `index`: "Team A" .. "Team Z", then "Team AA", "Team AB", ...
pub fn team_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    let label: String = letters.into_iter().rev().collect();
    format!("Team {label}")
}

/// Name for group slot `index` (1-based): "Group 1", "Group 2", ...
pub fn group_name(index: usize) -> String {
    format!("Group {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_names_are_sequential_letters() {
        assert_eq!(team_name(0), "Team A");
        assert_eq!(team_name(1), "Team B");
        assert_eq!(team_name(25), "Team Z");
        assert_eq!(team_name(26), "Team AA");
        assert_eq!(team_name(27), "Team AB");
    }

    #[test]
    fn group_names_are_one_based() {
        assert_eq!(group_name(0), "Group 1");
        assert_eq!(group_name(2), "Group 3");
    }
}
