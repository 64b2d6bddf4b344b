//! Persist a plan: recreate teams and groups, then write every player's assignment.

use crate::logic::gateway::{PersistenceError, PersistenceGateway};
use crate::models::{AssignmentPlan, GroupId, TeamId};
use serde::Serialize;
use thiserror::Error;

/// Step of plan application that failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStage {
    DeletePrevious,
    CreateGroups,
    CreateTeams,
    AssignPlayers,
    ClearPlayers,
}

impl std::fmt::Display for ApplyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyStage::DeletePrevious => write!(f, "Deleting previous teams"),
            ApplyStage::CreateGroups => write!(f, "Creating groups"),
            ApplyStage::CreateTeams => write!(f, "Creating teams"),
            ApplyStage::AssignPlayers => write!(f, "Assigning players"),
            ApplyStage::ClearPlayers => write!(f, "Clearing players"),
        }
    }
}

/// A plan (or reset) that was not fully saved. Writes before the failure are kept.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{stage} failed after {applied_writes} player write(s): {source}")]
pub struct ApplyError {
    pub stage: ApplyStage,
    /// Player writes that succeeded before the failure.
    pub applied_writes: usize,
    pub source: PersistenceError,
}

/// Ids created while applying a plan, indexed like the plan's slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AppliedAssignment {
    pub group_ids: Vec<GroupId>,
    pub team_ids: Vec<TeamId>,
    pub player_writes: usize,
}

/// Apply `plan` through `gateway`.
///
/// Previous teams and groups are deleted, then every group slot and team slot is created
/// (their ids are needed for the player writes), then each player is written. A failed
/// write stops the run without rolling back what was already written.
pub fn apply_plan<G: PersistenceGateway + ?Sized>(
    gateway: &mut G,
    plan: &AssignmentPlan,
) -> Result<AppliedAssignment, ApplyError> {
    gateway
        .delete_teams_and_groups()
        .map_err(|e| failed(ApplyStage::DeletePrevious, 0, e))?;

    let group_ids = plan
        .group_names()
        .iter()
        .map(|name| gateway.create_group(name))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| failed(ApplyStage::CreateGroups, 0, e))?;

    let mut team_ids = Vec::with_capacity(plan.team_count());
    for team in &plan.teams {
        let group = slot_group(&group_ids, team.group)
            .map_err(|e| failed(ApplyStage::CreateTeams, 0, e))?;
        let id = gateway
            .create_team(&team.name, group)
            .map_err(|e| failed(ApplyStage::CreateTeams, 0, e))?;
        team_ids.push(id);
    }

    let mut writes = 0;
    for (team, &team_id) in plan.teams.iter().zip(&team_ids) {
        let group = slot_group(&group_ids, team.group)
            .map_err(|e| failed(ApplyStage::AssignPlayers, writes, e))?;
        for &player in &team.members {
            gateway
                .assign_player(player, team_id, group)
                .map_err(|e| failed(ApplyStage::AssignPlayers, writes, e))?;
            writes += 1;
        }
    }

    log::info!(
        "Saved {} team(s) in {} group(s), {} player(s) assigned",
        team_ids.len(),
        group_ids.len(),
        writes
    );
    Ok(AppliedAssignment {
        group_ids,
        team_ids,
        player_writes: writes,
    })
}

fn slot_group(group_ids: &[GroupId], slot: usize) -> Result<GroupId, PersistenceError> {
    group_ids
        .get(slot)
        .copied()
        .ok_or_else(|| PersistenceError::Backend(format!("no group for slot {slot}")))
}

pub(crate) fn failed(
    stage: ApplyStage,
    applied_writes: usize,
    source: PersistenceError,
) -> ApplyError {
    log::error!(
        "{} failed after {} player write(s): {}",
        stage,
        applied_writes,
        source
    );
    ApplyError {
        stage,
        applied_writes,
        source,
    }
}
