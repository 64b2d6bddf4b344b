//! Boundary traits between the balancer and whatever stores the roster.

use crate::models::{GroupId, Player, PlayerId, TeamId};
use thiserror::Error;

/// A failed read or write against the roster store.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PersistenceError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("team {0} not found")]
    TeamNotFound(TeamId),
    #[error("group {0} not found")]
    GroupNotFound(GroupId),
    /// Any other backend failure (connection, constraint, ...).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Supplies read-only roster snapshots.
pub trait RosterProvider {
    /// Players without a team or group.
    fn unassigned_players(&self) -> Result<Vec<Player>, PersistenceError>;

    fn all_players(&self) -> Result<Vec<Player>, PersistenceError>;
}

/// Applies plans: creates teams/groups and writes assignments back onto players.
pub trait PersistenceGateway {
    /// Delete every team and group. Players still pointing at them are detached.
    fn delete_teams_and_groups(&mut self) -> Result<(), PersistenceError>;

    fn create_group(&mut self, name: &str) -> Result<GroupId, PersistenceError>;

    fn create_team(&mut self, name: &str, group: GroupId) -> Result<TeamId, PersistenceError>;

    fn assign_player(
        &mut self,
        player: PlayerId,
        team: TeamId,
        group: GroupId,
    ) -> Result<(), PersistenceError>;

    /// Clear the player's team and group ids.
    fn clear_player(&mut self, player: PlayerId) -> Result<(), PersistenceError>;
}
