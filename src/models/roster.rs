//! Roster: the players, teams and groups tables, held in memory.

use crate::logic::{PersistenceError, PersistenceGateway, RosterProvider};
use crate::models::player::{Player, PlayerId, PlayerStats};
use crate::models::team::{Group, GroupId, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use uuid::Uuid;

/// Youngest accepted registration age.
pub const MIN_AGE: u32 = 18;
/// Oldest accepted registration age.
pub const MAX_AGE: u32 = 50;

/// Errors raised by roster edits.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("First and last name are required")]
    EmptyName,
    #[error("Age must be between {} and {} (got {age})", MIN_AGE, MAX_AGE)]
    InvalidAge { age: u32 },
    #[error("Phone must start with 05, 06 or 07 followed by 8 digits")]
    InvalidPhone,
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    #[error("Invalid roster CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Sign-up form fields. Also the row format of roster CSV imports.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RegisterPlayer {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone: String,
    #[serde(default)]
    pub goalkeeper: bool,
}

/// Public list row: a player with team and group names resolved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerListing {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub goalkeeper: bool,
    pub stats: PlayerStats,
    pub team: Option<String>,
    pub group: Option<String>,
}

/// Admin dashboard counters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RosterSummary {
    pub total_players: usize,
    pub assigned: usize,
    pub unassigned: usize,
    /// Rounded to the nearest year; 0 when there are no players.
    pub average_age: u32,
    pub teams: usize,
    pub groups: usize,
}

/// All registered players plus the teams and groups of the last applied run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Roster {
    players: Vec<Player>,
    teams: Vec<Team>,
    groups: Vec<Group>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster seeded with existing players (assignments kept as-is).
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Players currently holding `team`.
    pub fn members_of(&self, team: TeamId) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.team_id == Some(team))
            .collect()
    }

    /// Validate and add a new, unassigned player.
    pub fn register_player(&mut self, form: RegisterPlayer) -> Result<PlayerId, RosterError> {
        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if !(MIN_AGE..=MAX_AGE).contains(&form.age) {
            return Err(RosterError::InvalidAge { age: form.age });
        }
        let phone = form.phone.trim();
        if !is_valid_phone(phone) {
            return Err(RosterError::InvalidPhone);
        }
        let player = Player::new(first_name, last_name, form.age)
            .with_phone(phone)
            .with_goalkeeper(form.goalkeeper);
        let id = player.id;
        log::info!("Registered player {} ({})", player.full_name(), id);
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), RosterError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(RosterError::PlayerNotFound(id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Register every row of a CSV with `first_name,last_name,age,phone[,goalkeeper]` headers.
    /// Stops at the first bad row; earlier rows stay registered.
    pub fn import_csv<R: io::Read>(&mut self, reader: R) -> Result<usize, RosterError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut imported = 0;
        for record in rdr.deserialize::<RegisterPlayer>() {
            self.register_player(record?)?;
            imported += 1;
        }
        Ok(imported)
    }

    /// Players sorted by last then first name, with team and group names.
    pub fn public_listing(&self) -> Vec<PlayerListing> {
        let mut players: Vec<&Player> = self.players.iter().collect();
        players.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        players
            .into_iter()
            .map(|p| {
                let team = p.team_id.and_then(|id| self.team(id));
                let group_id = team.and_then(|t| t.group_id).or(p.group_id);
                PlayerListing {
                    id: p.id,
                    first_name: p.first_name.clone(),
                    last_name: p.last_name.clone(),
                    goalkeeper: p.goalkeeper,
                    stats: p.stats.clone(),
                    team: team.map(|t| t.name.clone()),
                    group: group_id.and_then(|id| self.group(id)).map(|g| g.name.clone()),
                }
            })
            .collect()
    }

    pub fn summary(&self) -> RosterSummary {
        let total = self.players.len();
        let assigned = self.players.iter().filter(|p| p.is_assigned()).count();
        let average_age = if total == 0 {
            0
        } else {
            let sum: u64 = self.players.iter().map(|p| u64::from(p.age)).sum();
            let n = total as u64;
            ((2 * sum + n) / (2 * n)) as u32
        };
        RosterSummary {
            total_players: total,
            assigned,
            unassigned: total - assigned,
            average_age,
            teams: self.teams.len(),
            groups: self.groups.len(),
        }
    }
}

/// `0` then `5`, `6` or `7`, then 8 more digits.
fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 10
        && bytes[0] == b'0'
        && matches!(bytes[1], b'5' | b'6' | b'7')
        && bytes.iter().all(u8::is_ascii_digit)
}

impl RosterProvider for Roster {
    fn unassigned_players(&self) -> Result<Vec<Player>, PersistenceError> {
        Ok(self
            .players
            .iter()
            .filter(|p| !p.is_assigned())
            .cloned()
            .collect())
    }

    fn all_players(&self) -> Result<Vec<Player>, PersistenceError> {
        Ok(self.players.clone())
    }
}

impl PersistenceGateway for Roster {
    fn delete_teams_and_groups(&mut self) -> Result<(), PersistenceError> {
        for p in &mut self.players {
            p.clear_assignment();
        }
        self.teams.clear();
        self.groups.clear();
        Ok(())
    }

    fn create_group(&mut self, name: &str) -> Result<GroupId, PersistenceError> {
        let group = Group {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        let id = group.id;
        self.groups.push(group);
        Ok(id)
    }

    fn create_team(&mut self, name: &str, group: GroupId) -> Result<TeamId, PersistenceError> {
        if self.group(group).is_none() {
            return Err(PersistenceError::GroupNotFound(group));
        }
        let team = Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            group_id: Some(group),
        };
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    fn assign_player(
        &mut self,
        player: PlayerId,
        team: TeamId,
        group: GroupId,
    ) -> Result<(), PersistenceError> {
        if self.team(team).is_none() {
            return Err(PersistenceError::TeamNotFound(team));
        }
        if self.group(group).is_none() {
            return Err(PersistenceError::GroupNotFound(group));
        }
        let p = self
            .player_mut(player)
            .ok_or(PersistenceError::PlayerNotFound(player))?;
        p.team_id = Some(team);
        p.group_id = Some(group);
        Ok(())
    }

    fn clear_player(&mut self, player: PlayerId) -> Result<(), PersistenceError> {
        self.player_mut(player)
            .ok_or(PersistenceError::PlayerNotFound(player))?
            .clear_assignment();
        Ok(())
    }
}
