//! Choice of balancing algorithm.

use crate::config::BalancerConfig;
use crate::logic::{compute_assignment, compute_shuffled_assignment};
use crate::models::{AssignmentPlan, BalanceError, Player};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How players are distributed over teams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStrategy {
    /// Age-sorted snake draft with an overflow team (deterministic).
    #[default]
    AgeSnake,
    /// Uniform shuffle dealt round-robin; ignores ages.
    Shuffle,
}

/// Compute a plan with the configured strategy. `rng` is only used by `Shuffle`.
pub fn plan_teams<R: Rng + ?Sized>(
    players: &[Player],
    config: &BalancerConfig,
    rng: &mut R,
) -> Result<AssignmentPlan, BalanceError> {
    match config.strategy {
        BalanceStrategy::AgeSnake => {
            compute_assignment(players, config.team_size, config.group_count)
        }
        BalanceStrategy::Shuffle => {
            compute_shuffled_assignment(players, config.team_size, config.group_count, rng)
        }
    }
}
