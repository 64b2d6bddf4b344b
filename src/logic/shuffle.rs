//! Random team generation: shuffle, then deal players round-robin.

use crate::models::{AssignmentPlan, BalanceError, Player};
use rand::seq::SliceRandom;
use rand::Rng;
use std::num::NonZeroUsize;

/// Shuffle `players` and deal them over `len / team_size` teams.
///
/// Every player is placed, so team sizes differ by at most one and there is no overflow
/// team. Ages are ignored. Groups are assigned round-robin as in [`compute_assignment`].
///
/// [`compute_assignment`]: crate::compute_assignment
pub fn compute_shuffled_assignment<R: Rng + ?Sized>(
    players: &[Player],
    team_size: NonZeroUsize,
    group_count: NonZeroUsize,
    rng: &mut R,
) -> Result<AssignmentPlan, BalanceError> {
    let total_teams = players.len() / team_size.get();
    if total_teams == 0 {
        return Err(BalanceError::InsufficientPlayers {
            required: team_size.get(),
            available: players.len(),
        });
    }

    let mut shuffled: Vec<&Player> = players.iter().collect();
    shuffled.shuffle(rng);

    let mut members: Vec<Vec<&Player>> = vec![Vec::new(); total_teams];
    for (i, player) in shuffled.into_iter().enumerate() {
        members[i % total_teams].push(player);
    }

    log::info!(
        "Shuffled {} players into {} team(s) over {} group(s)",
        players.len(),
        total_teams,
        group_count
    );
    Ok(AssignmentPlan::from_members(members, false, group_count))
}
