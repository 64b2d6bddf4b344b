//! Single binary web server: REST API for registration, roster admin and team generation.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, TEAM_SIZE (default 8), GROUP_COUNT (default 2),
//! ROSTER_CSV (players imported at startup).

use actix_web::{
    delete, get, post,
    web::{Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::sync::RwLock;
use tokio::sync::Mutex;
use tournament_teams::{
    run_balancing, run_reset, BalanceError, BalanceOverrides, BalancerConfig, PlayerFilter,
    PlayerId, RegisterPlayer, Roster, RosterError, RunError, ServerConfig,
};

/// Shared state: the roster, plus a lock that keeps balancing/reset runs one at a time.
struct AppState {
    roster: RwLock<Roster>,
    run_lock: Mutex<()>,
    balancer: BalancerConfig,
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

#[derive(Serialize)]
struct TeamView<'a> {
    id: tournament_teams::TeamId,
    name: &'a str,
    group: Option<&'a str>,
    members: Vec<PlayerId>,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-teams",
    })
}

/// Admin player table, optionally filtered by `search` and `bracket`.
#[get("/api/players")]
async fn api_list_players(state: State, filter: Query<PlayerFilter>) -> HttpResponse {
    let g = match state.roster.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(filter.apply(g.players()))
}

/// Public player list sorted by name, with team and group names.
#[get("/api/players/public")]
async fn api_public_players(state: State) -> HttpResponse {
    let g = match state.roster.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.public_listing())
}

/// Sign up a new player.
#[post("/api/players")]
async fn api_register_player(state: State, body: Json<RegisterPlayer>) -> HttpResponse {
    let mut g = match state.roster.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.register_player(body.into_inner()) {
        Ok(id) => HttpResponse::Ok().json(g.player(id)),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a player by id.
#[delete("/api/players/{id}")]
async fn api_remove_player(state: State, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.roster.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_player(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e @ RosterError::PlayerNotFound(_)) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Dashboard counters.
#[get("/api/roster/summary")]
async fn api_roster_summary(state: State) -> HttpResponse {
    let g = match state.roster.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.summary())
}

/// Teams of the last run with their group and members.
#[get("/api/teams")]
async fn api_list_teams(state: State) -> HttpResponse {
    let g = match state.roster.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let teams: Vec<TeamView> = g
        .teams()
        .iter()
        .map(|t| TeamView {
            id: t.id,
            name: &t.name,
            group: t.group_id.and_then(|id| g.group(id)).map(|grp| grp.name.as_str()),
            members: g.members_of(t.id).iter().map(|p| p.id).collect(),
        })
        .collect();
    HttpResponse::Ok().json(serde_json::json!({ "groups": g.groups(), "teams": teams }))
}

/// Balance all unassigned players into teams and groups and save them.
#[post("/api/teams/generate")]
async fn api_generate_teams(state: State, body: Bytes) -> HttpResponse {
    let overrides = match parse_overrides(&body) {
        Ok(overrides) => overrides,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Invalid balancing options: {}", e),
                "kind": "invalid_overrides",
            }))
        }
    };
    let _run = match state.run_lock.try_lock() {
        Ok(guard) => guard,
        Err(_) => return run_in_progress(),
    };
    let config = state.balancer.with_overrides(&overrides);
    let mut g = match state.roster.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match run_balancing(&mut *g, &config, &mut rand::thread_rng()) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => run_error_response(&e),
    }
}

/// Remove every player from their team and group.
#[post("/api/teams/reset")]
async fn api_reset_teams(state: State) -> HttpResponse {
    let _run = match state.run_lock.try_lock() {
        Ok(guard) => guard,
        Err(_) => return run_in_progress(),
    };
    let mut g = match state.roster.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match run_reset(&mut *g) {
        Ok(cleared) => HttpResponse::Ok().json(serde_json::json!({ "cleared": cleared })),
        Err(e) => run_error_response(&e),
    }
}

/// Empty body means server defaults; anything else must be valid overrides JSON.
fn parse_overrides(body: &[u8]) -> Result<BalanceOverrides, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BalanceOverrides::default());
    }
    serde_json::from_slice(body)
}

fn run_in_progress() -> HttpResponse {
    HttpResponse::Conflict().json(serde_json::json!({
        "error": "A team generation is already running",
        "kind": "run_in_progress",
    }))
}

/// "Nothing computed" errors are 4xx; "computed but not saved" is a 500 with the write count.
fn run_error_response(e: &RunError) -> HttpResponse {
    let error = e.to_string();
    match e {
        RunError::Balance(BalanceError::InsufficientPlayers {
            required,
            available,
        }) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": error,
            "kind": "insufficient_players",
            "required": required,
            "available": available,
        })),
        RunError::RosterAlreadyAssigned { assigned } => {
            HttpResponse::Conflict().json(serde_json::json!({
                "error": error,
                "kind": "roster_already_assigned",
                "assigned": assigned,
            }))
        }
        RunError::Snapshot(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": error,
            "kind": "snapshot_failure",
        })),
        RunError::Persistence(apply) => {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": error,
                "kind": "persistence_failure",
                "stage": apply.stage,
                "applied_writes": apply.applied_writes,
            }))
        }
    }
}

fn app_state(roster: Roster, balancer: BalancerConfig) -> State {
    Data::new(AppState {
        roster: RwLock::new(roster),
        run_lock: Mutex::new(()),
        balancer,
    })
}

/// Roster at startup: empty, or imported from ROSTER_CSV.
fn initial_roster(config: &ServerConfig) -> Roster {
    let mut roster = Roster::new();
    let Some(path) = &config.roster_csv else {
        return roster;
    };
    match File::open(path) {
        Ok(file) => match roster.import_csv(file) {
            Ok(n) => log::info!("Imported {} player(s) from {}", n, path.display()),
            Err(e) => log::error!("Roster import from {} stopped: {}", path.display(), e),
        },
        Err(e) => log::error!("Cannot open roster file {}: {}", path.display(), e),
    }
    roster
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!(
        "Teams of {} over {} group(s)",
        config.balancer.team_size,
        config.balancer.group_count
    );

    let state = app_state(initial_roster(&config), config.balancer);

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_public_players)
            .service(api_list_players)
            .service(api_register_player)
            .service(api_remove_player)
            .service(api_roster_summary)
            .service(api_list_teams)
            .service(api_generate_teams)
            .service(api_reset_teams)
    })
    .bind(bind)?
    .run()
    .await
}
