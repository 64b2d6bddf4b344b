//! AssignmentPlan and ResetPlan: the in-memory output of a balancing run.

use crate::models::player::{Player, PlayerId};
use crate::models::team::{group_name, team_name};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Errors raised while computing a plan. Nothing is computed when one is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BalanceError {
    /// Fewer players than one team's size.
    #[error("Need at least {required} unassigned players to form a team (found {available})")]
    InsufficientPlayers { required: usize, available: usize },
}

/// One team slot of a plan. The persisted Team does not exist yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSlot {
    pub name: String,
    /// Group slot index (0..group_count).
    pub group: usize,
    pub members: Vec<PlayerId>,
    /// Reporting only; empty slots report 0.
    pub average_age: f64,
    /// True for the slot holding the remainder players.
    pub overflow: bool,
}

/// Player -> team slot and team slot -> group slot mapping for one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    /// Index in this vec is the team slot index.
    pub teams: Vec<TeamSlot>,
    pub group_count: usize,
}

impl AssignmentPlan {
    /// Build named slots from member lists. Slot `i` goes to group `i mod group_count`.
    /// When `has_overflow` is set, the last list is the overflow team.
    pub(crate) fn from_members(
        members: Vec<Vec<&Player>>,
        has_overflow: bool,
        group_count: NonZeroUsize,
    ) -> Self {
        let last = members.len().saturating_sub(1);
        let teams = members
            .into_iter()
            .enumerate()
            .map(|(index, players)| TeamSlot {
                name: team_name(index),
                group: index % group_count.get(),
                average_age: average_age(&players),
                members: players.iter().map(|p| p.id).collect(),
                overflow: has_overflow && index == last,
            })
            .collect();
        Self {
            teams,
            group_count: group_count.get(),
        }
    }

    /// Number of team slots, overflow included.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum()
    }

    /// The overflow slot, if the pool did not divide evenly.
    pub fn overflow(&self) -> Option<&TeamSlot> {
        self.teams.iter().find(|t| t.overflow)
    }

    /// Player id -> team slot index.
    pub fn player_to_team(&self) -> HashMap<PlayerId, usize> {
        self.teams
            .iter()
            .enumerate()
            .flat_map(|(slot, team)| team.members.iter().map(move |&id| (id, slot)))
            .collect()
    }

    /// Team slot index -> group slot index.
    pub fn team_to_group(&self) -> Vec<usize> {
        self.teams.iter().map(|t| t.group).collect()
    }

    /// Group slot index -> team slot indices. Groups with no team are empty.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.group_count];
        for (slot, team) in self.teams.iter().enumerate() {
            groups[team.group].push(slot);
        }
        groups
    }

    /// Names for every group slot, used when the groups are persisted.
    pub fn group_names(&self) -> Vec<String> {
        (0..self.group_count).map(group_name).collect()
    }
}

/// Players whose team/group assignment must be cleared.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResetPlan {
    pub players: Vec<PlayerId>,
}

impl ResetPlan {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

fn average_age(players: &[&Player]) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    let total: u64 = players.iter().map(|p| u64::from(p.age)).sum();
    total as f64 / players.len() as f64
}
