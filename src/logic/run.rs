//! One balancing run against a roster store: snapshot, plan, apply.

use crate::config::BalancerConfig;
use crate::logic::apply::{apply_plan, AppliedAssignment, ApplyError};
use crate::logic::gateway::{PersistenceError, PersistenceGateway, RosterProvider};
use crate::logic::reset::{apply_reset, reset_plan};
use crate::logic::strategy::plan_teams;
use crate::models::{AssignmentPlan, BalanceError};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Outcome of a saved run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub config: BalancerConfig,
    pub plan: AssignmentPlan,
    pub applied: AppliedAssignment,
}

/// Why a run did not complete.
///
/// `RosterAlreadyAssigned`, `Snapshot` and `Balance` mean nothing was written.
/// `Persistence` means the plan was computed and only partly saved.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{assigned} player(s) already have a team; reset teams first")]
    RosterAlreadyAssigned { assigned: usize },
    #[error("Could not read roster: {0}")]
    Snapshot(PersistenceError),
    #[error(transparent)]
    Balance(#[from] BalanceError),
    #[error("Teams were computed but not fully saved: {0}")]
    Persistence(#[from] ApplyError),
}

/// Balance the unassigned players of `store` and save the result.
///
/// Callers must not run this concurrently on the same store.
pub fn run_balancing<S, R>(
    store: &mut S,
    config: &BalancerConfig,
    rng: &mut R,
) -> Result<RunReport, RunError>
where
    S: RosterProvider + PersistenceGateway + ?Sized,
    R: Rng + ?Sized,
{
    let assigned = store
        .all_players()
        .map_err(RunError::Snapshot)?
        .iter()
        .filter(|p| p.is_assigned())
        .count();
    if assigned > 0 {
        return Err(RunError::RosterAlreadyAssigned { assigned });
    }

    let snapshot = store.unassigned_players().map_err(RunError::Snapshot)?;
    let plan = plan_teams(&snapshot, config, rng)?;
    let applied = apply_plan(store, &plan)?;
    Ok(RunReport {
        config: *config,
        plan,
        applied,
    })
}

/// Clear every assignment of `store`. Returns the number of players cleared.
pub fn run_reset<S>(store: &mut S) -> Result<usize, RunError>
where
    S: RosterProvider + PersistenceGateway + ?Sized,
{
    let roster = store.all_players().map_err(RunError::Snapshot)?;
    let plan = reset_plan(&roster);
    Ok(apply_reset(store, &plan)?)
}
