//! Player, PlayerStats and AgeBracket data structures.

use crate::models::team::{GroupId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in plans and lookups).
pub type PlayerId = Uuid;

/// Match statistics shown on the public player list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub matches_played: u32,
}

/// Age category used by the admin roster filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    /// Under 25.
    Young,
    /// 25 to 34.
    Adult,
    /// 35 and over.
    Senior,
}

impl AgeBracket {
    pub fn of(age: u32) -> Self {
        match age {
            0..=24 => AgeBracket::Young,
            25..=34 => AgeBracket::Adult,
            _ => AgeBracket::Senior,
        }
    }
}

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone: String,
    #[serde(default)]
    pub goalkeeper: bool,
    /// None until a balancing run has been applied.
    pub team_id: Option<TeamId>,
    pub group_id: Option<GroupId>,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    /// Create an unassigned player. Phone is empty and stats start at zero.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            phone: String::new(),
            goalkeeper: false,
            team_id: None,
            group_id: None,
            registered_at: Utc::now(),
            stats: PlayerStats::default(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_goalkeeper(mut self, goalkeeper: bool) -> Self {
        self.goalkeeper = goalkeeper;
        self
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// True if the player holds a team or a group id.
    pub fn is_assigned(&self) -> bool {
        self.team_id.is_some() || self.group_id.is_some()
    }

    pub fn age_bracket(&self) -> AgeBracket {
        AgeBracket::of(self.age)
    }

    /// Drop any team/group assignment.
    pub fn clear_assignment(&mut self) {
        self.team_id = None;
        self.group_id = None;
    }
}
