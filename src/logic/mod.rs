//! Tournament business logic: balancing, applying plans, reset, roster filters.

mod apply;
mod balance;
mod filter;
mod gateway;
mod reset;
mod run;
mod shuffle;
mod strategy;

pub use apply::{apply_plan, AppliedAssignment, ApplyError, ApplyStage};
pub use balance::compute_assignment;
pub use filter::PlayerFilter;
pub use gateway::{PersistenceError, PersistenceGateway, RosterProvider};
pub use reset::{apply_reset, reset_plan};
pub use run::{run_balancing, run_reset, RunError, RunReport};
pub use shuffle::compute_shuffled_assignment;
pub use strategy::{plan_teams, BalanceStrategy};
