//! Reset: clear every player's team and group.

use crate::logic::apply::{failed, ApplyError, ApplyStage};
use crate::logic::gateway::PersistenceGateway;
use crate::models::{Player, ResetPlan};

/// Players from `roster` that currently hold a team or group id.
/// Empty when nobody is assigned, so applying it is a no-op.
pub fn reset_plan(roster: &[Player]) -> ResetPlan {
    ResetPlan {
        players: roster
            .iter()
            .filter(|p| p.is_assigned())
            .map(|p| p.id)
            .collect(),
    }
}

/// Clear each player of `plan`. Returns the number of players cleared.
pub fn apply_reset<G: PersistenceGateway + ?Sized>(
    gateway: &mut G,
    plan: &ResetPlan,
) -> Result<usize, ApplyError> {
    for (done, &player) in plan.players.iter().enumerate() {
        gateway
            .clear_player(player)
            .map_err(|e| failed(ApplyStage::ClearPlayers, done, e))?;
    }
    if !plan.is_empty() {
        log::info!("Cleared team assignment of {} player(s)", plan.players.len());
    }
    Ok(plan.players.len())
}
