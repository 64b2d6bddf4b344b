//! Integration tests for saving plans: roster store, partial failures, full runs and reset.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::num::NonZeroUsize;
use tournament_teams::{
    apply_plan, apply_reset, compute_assignment, reset_plan, run_balancing, run_reset,
    ApplyStage, BalanceError, BalancerConfig, GroupId, PersistenceError, PersistenceGateway,
    Player, PlayerId, Roster, RosterProvider, RunError, TeamId,
};

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn roster_of(n: usize) -> Roster {
    let players = (0..n)
        .map(|i| Player::new(format!("P{i}"), "Test", 18 + i as u32))
        .collect();
    Roster::with_players(players)
}

/// Roster whose `fail_at`-th player write (0-based) fails.
struct FlakyRoster {
    inner: Roster,
    fail_at: usize,
    writes: usize,
}

impl PersistenceGateway for FlakyRoster {
    fn delete_teams_and_groups(&mut self) -> Result<(), PersistenceError> {
        self.inner.delete_teams_and_groups()
    }

    fn create_group(&mut self, name: &str) -> Result<GroupId, PersistenceError> {
        self.inner.create_group(name)
    }

    fn create_team(&mut self, name: &str, group: GroupId) -> Result<TeamId, PersistenceError> {
        self.inner.create_team(name, group)
    }

    fn assign_player(
        &mut self,
        player: PlayerId,
        team: TeamId,
        group: GroupId,
    ) -> Result<(), PersistenceError> {
        if self.writes == self.fail_at {
            return Err(PersistenceError::Backend("connection reset".to_string()));
        }
        self.writes += 1;
        self.inner.assign_player(player, team, group)
    }

    fn clear_player(&mut self, player: PlayerId) -> Result<(), PersistenceError> {
        self.inner.clear_player(player)
    }
}

impl RosterProvider for FlakyRoster {
    fn unassigned_players(&self) -> Result<Vec<Player>, PersistenceError> {
        self.inner.unassigned_players()
    }

    fn all_players(&self) -> Result<Vec<Player>, PersistenceError> {
        self.inner.all_players()
    }
}

#[test]
fn apply_creates_groups_teams_and_assignments() {
    let mut roster = roster_of(18);
    let plan = compute_assignment(roster.players(), nz(8), nz(2)).unwrap();
    let applied = apply_plan(&mut roster, &plan).unwrap();

    assert_eq!(applied.player_writes, 18);
    assert_eq!(roster.groups().len(), 2);
    assert_eq!(roster.teams().len(), 3);
    let names: Vec<_> = roster.teams().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Team A", "Team B", "Team C"]);

    for (slot, team) in plan.teams.iter().enumerate() {
        let team_id = applied.team_ids[slot];
        let group_id = applied.group_ids[team.group];
        assert_eq!(roster.team(team_id).unwrap().group_id, Some(group_id));
        for id in &team.members {
            let p = roster.player(*id).unwrap();
            assert_eq!(p.team_id, Some(team_id));
            assert_eq!(p.group_id, Some(group_id));
        }
    }
    assert_eq!(roster.summary().unassigned, 0);
}

#[test]
fn empty_groups_are_still_created() {
    let mut roster = roster_of(8);
    let plan = compute_assignment(roster.players(), nz(8), nz(3)).unwrap();
    apply_plan(&mut roster, &plan).unwrap();
    assert_eq!(roster.groups().len(), 3);
    assert_eq!(roster.teams().len(), 1);
    assert_eq!(roster.teams()[0].group_id, Some(roster.groups()[0].id));
}

#[test]
fn failed_write_keeps_earlier_writes_and_reports_count() {
    let mut store = FlakyRoster {
        inner: roster_of(16),
        fail_at: 5,
        writes: 0,
    };
    let plan = compute_assignment(store.inner.players(), nz(8), nz(2)).unwrap();
    let err = apply_plan(&mut store, &plan).unwrap_err();

    assert_eq!(err.stage, ApplyStage::AssignPlayers);
    assert_eq!(err.applied_writes, 5);
    assert_eq!(
        err.source,
        PersistenceError::Backend("connection reset".to_string())
    );
    assert_eq!(store.inner.summary().assigned, 5);
    assert_eq!(store.inner.teams().len(), 2);
}

#[test]
fn run_reports_persistence_failure_separately() {
    let mut store = FlakyRoster {
        inner: roster_of(16),
        fail_at: 0,
        writes: 0,
    };
    let mut rng = StdRng::seed_from_u64(1);
    let result = run_balancing(&mut store, &BalancerConfig::default(), &mut rng);
    assert!(matches!(
        result,
        Err(RunError::Persistence(ref e)) if e.applied_writes == 0
    ));
}

#[test]
fn run_with_too_few_players_writes_nothing() {
    let mut roster = roster_of(5);
    let mut rng = StdRng::seed_from_u64(1);
    let result = run_balancing(&mut roster, &BalancerConfig::default(), &mut rng);
    assert!(matches!(
        result,
        Err(RunError::Balance(BalanceError::InsufficientPlayers {
            required: 8,
            available: 5
        }))
    ));
    assert!(roster.teams().is_empty());
    assert!(roster.groups().is_empty());
    assert_eq!(roster.summary().assigned, 0);
}

#[test]
fn run_assigns_every_unassigned_player() {
    let mut roster = roster_of(16);
    let mut rng = StdRng::seed_from_u64(1);
    let report = run_balancing(&mut roster, &BalancerConfig::default(), &mut rng).unwrap();
    assert_eq!(report.plan.team_count(), 2);
    assert_eq!(report.applied.player_writes, 16);
    assert!(roster.unassigned_players().unwrap().is_empty());
}

#[test]
fn run_refuses_while_players_are_assigned() {
    let mut roster = roster_of(16);
    let config = BalancerConfig::default();
    run_balancing(&mut roster, &config, &mut StdRng::seed_from_u64(1)).unwrap();
    let teams_before = roster.teams().to_vec();

    let again = run_balancing(&mut roster, &config, &mut StdRng::seed_from_u64(1));
    assert!(matches!(
        again,
        Err(RunError::RosterAlreadyAssigned { assigned: 16 })
    ));
    assert_eq!(roster.teams(), teams_before.as_slice());
}

#[test]
fn reset_clears_everyone_and_is_idempotent() {
    let mut roster = roster_of(16);
    let config = BalancerConfig::default();
    run_balancing(&mut roster, &config, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(reset_plan(roster.players()).players.len(), 16);

    assert_eq!(run_reset(&mut roster).unwrap(), 16);
    assert!(roster.players().iter().all(|p| !p.is_assigned()));
    let after_first = roster.players().to_vec();

    let plan = reset_plan(roster.players());
    assert!(plan.is_empty());
    assert_eq!(apply_reset(&mut roster, &plan).unwrap(), 0);
    assert_eq!(roster.players(), after_first.as_slice());

    // Reset roster can be balanced again.
    run_balancing(&mut roster, &config, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(roster.summary().assigned, 16);
}

#[test]
fn reset_of_unknown_player_fails_on_clear() {
    let mut roster = roster_of(2);
    let mut plan = reset_plan(roster.players());
    let ghost = uuid::Uuid::new_v4();
    plan.players.push(ghost);
    let err = apply_reset(&mut roster, &plan).unwrap_err();
    assert_eq!(err.stage, ApplyStage::ClearPlayers);
    assert_eq!(err.applied_writes, 0);
    assert_eq!(err.source, PersistenceError::PlayerNotFound(ghost));
}
