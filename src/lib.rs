//! Tournament registration: library with models, configuration and team balancing logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::{BalanceOverrides, BalancerConfig, ServerConfig};
pub use logic::{
    apply_plan, apply_reset, compute_assignment, compute_shuffled_assignment, plan_teams,
    reset_plan, run_balancing, run_reset, AppliedAssignment, ApplyError, ApplyStage,
    BalanceStrategy, PersistenceError, PersistenceGateway, PlayerFilter, RosterProvider,
    RunError, RunReport,
};
pub use models::{
    AgeBracket, AssignmentPlan, BalanceError, Group, GroupId, Player, PlayerId, PlayerListing,
    PlayerStats, RegisterPlayer, ResetPlan, Roster, RosterError, RosterSummary, Team, TeamId,
    TeamSlot,
};
