//! Data structures for the tournament: players, teams, groups, plans, roster.

mod plan;
mod player;
mod roster;
mod team;

pub use plan::{AssignmentPlan, BalanceError, ResetPlan, TeamSlot};
pub use player::{AgeBracket, Player, PlayerId, PlayerStats};
pub use roster::{PlayerListing, RegisterPlayer, Roster, RosterError, RosterSummary};
pub use team::{group_name, team_name, Group, GroupId, Team, TeamId};
