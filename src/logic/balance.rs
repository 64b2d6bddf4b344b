//! Age-balanced team generation ("snake" distribution).

use crate::models::{AssignmentPlan, BalanceError, Player};
use std::num::NonZeroUsize;

/// Split `players` into teams of `team_size`, spread round-robin over `group_count` groups.
///
/// 1. Stable sort by age (ascending); equal ages keep their input order.
/// 2. `total_teams = len / team_size`; the trailing `len % team_size` (oldest) players
///    form one extra overflow team.
/// 3. The rest are dealt in snake order: position `i` in pass `p = i / 2` goes to slot
///    `p % total_teams` when `i` is even and `total_teams - 1 - p % total_teams` when odd.
/// 4. Team slot `i` belongs to group slot `i % group_count`.
///
/// The input is not modified and the result only depends on its order and the sizes.
pub fn compute_assignment(
    players: &[Player],
    team_size: NonZeroUsize,
    group_count: NonZeroUsize,
) -> Result<AssignmentPlan, BalanceError> {
    let size = team_size.get();
    let total_teams = players.len() / size;
    if total_teams == 0 {
        return Err(BalanceError::InsufficientPlayers {
            required: size,
            available: players.len(),
        });
    }

    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by_key(|p| p.age);

    let (balanced, overflow) = sorted.split_at(total_teams * size);
    let mut members: Vec<Vec<&Player>> = vec![Vec::with_capacity(size); total_teams];
    for (i, &player) in balanced.iter().enumerate() {
        members[snake_slot(i, total_teams)].push(player);
    }

    let has_overflow = !overflow.is_empty();
    if has_overflow {
        members.push(overflow.to_vec());
    }

    let plan = AssignmentPlan::from_members(members, has_overflow, group_count);
    log::info!(
        "Balanced {} players into {} team(s) over {} group(s){}",
        players.len(),
        plan.team_count(),
        group_count,
        if has_overflow {
            format!(", overflow team of {}", overflow.len())
        } else {
            String::new()
        }
    );
    for team in &plan.teams {
        log::debug!(
            "{}: {} players, group slot {}, average age {:.1}",
            team.name,
            team.members.len(),
            team.group,
            team.average_age
        );
    }
    Ok(plan)
}

/// Target slot for sorted position `i` with `total_teams` slots.
fn snake_slot(i: usize, total_teams: usize) -> usize {
    let lap = (i / 2) % total_teams;
    if i % 2 == 0 {
        lap
    } else {
        total_teams - 1 - lap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_slot_alternates_direction() {
        let slots: Vec<_> = (0..8).map(|i| snake_slot(i, 2)).collect();
        assert_eq!(slots, [0, 1, 1, 0, 0, 1, 1, 0]);
        let slots: Vec<_> = (0..6).map(|i| snake_slot(i, 3)).collect();
        assert_eq!(slots, [0, 2, 1, 1, 2, 0]);
    }

    #[test]
    fn snake_slot_with_single_team() {
        assert!((0..10).all(|i| snake_slot(i, 1) == 0));
    }
}
