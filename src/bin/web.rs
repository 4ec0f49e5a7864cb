//! Single binary web server exposing the scheduler as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080).

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use round_robin_scheduler::{
    add_roster, read_roster, start_tournament, start_tournament_with_rng, RoundRobin, Team,
    TeamId, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament, optional shuffle seed, last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: RoundRobin<Team>,
    seed: Option<u64>,
    last_activity: Instant,
}

type Registry = RwLock<HashMap<TournamentId, TournamentEntry>>;

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<Registry>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// How often the registry is swept for idle tournaments.
const SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on `run_throughs` accepted over the API.
const MAX_RUN_THROUGHS: u32 = 16;

/// Upper bound on roster size accepted over the API (before bye padding).
const MAX_TEAMS: usize = 256;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default = "default_run_throughs")]
    run_throughs: u32,
    /// Fixes the initial shuffle so the schedule is reproducible.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_run_throughs() -> u32 {
    1
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    week: usize,
    position: usize,
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    log::warn!("Rejected request: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn roster_full() -> HttpResponse {
    bad_request(format!("A tournament holds at most {} teams", MAX_TEAMS))
}

/// Look up a tournament under the write lock, refresh its activity time and run `f`.
fn with_entry<F>(state: &Registry, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut TournamentEntry) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(entry)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-scheduler",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.run_throughs > MAX_RUN_THROUGHS {
        return bad_request(format!("Run-throughs must be at most {}", MAX_RUN_THROUGHS));
    }
    let tournament = match RoundRobin::<Team>::new(body.name, body.run_throughs) {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let id = tournament.id();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            seed: body.seed,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| {
        HttpResponse::Ok().json(&entry.tournament)
    })
}

/// Add a team (tournament must not be started).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return bad_request("Team name must not be empty");
    }
    with_entry(&state, path.id, |entry| {
        let t = &mut entry.tournament;
        if !t.is_started() && t.num_teams() >= MAX_TEAMS {
            return roster_full();
        }
        match t.add_team(Team::new(name)) {
            Ok(()) => HttpResponse::Ok().json(&*t),
            Err(e) => bad_request(e),
        }
    })
}

/// Add every team listed in a CSV body with a `name` column.
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let teams = match read_roster(body.as_bytes()) {
        Ok(teams) => teams,
        Err(e) => return bad_request(e),
    };
    with_entry(&state, path.id, |entry| {
        let t = &mut entry.tournament;
        if !t.is_started() && t.num_teams() + teams.len() > MAX_TEAMS {
            return roster_full();
        }
        match add_roster(t, teams) {
            Ok(added) => {
                log::info!("Imported {} teams into {}", added, t.id());
                HttpResponse::Ok().json(&*t)
            }
            Err(e) => bad_request(e),
        }
    })
}

/// Remove a team by id (tournament must not be started).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| {
        let t = &mut entry.tournament;
        if t.is_started() {
            return bad_request(TournamentError::Locked);
        }
        let team = match t.teams().iter().find(|x| x.id == path.team_id) {
            Some(team) => Team::clone(team),
            None => {
                return HttpResponse::NotFound().json(serde_json::json!({ "error": "No team" }))
            }
        };
        match t.remove_team(&team) {
            Ok(_) => HttpResponse::Ok().json(&*t),
            Err(e) => bad_request(e),
        }
    })
}

/// Lock the roster and generate the schedule.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| {
        let result = match entry.seed {
            Some(seed) => {
                start_tournament_with_rng(&mut entry.tournament, &mut StdRng::seed_from_u64(seed))
            }
            None => start_tournament(&mut entry.tournament),
        };
        match result {
            Ok(()) => HttpResponse::Ok().json(&entry.tournament),
            Err(e) => bad_request(e),
        }
    })
}

#[get("/api/tournaments/{id}/weeks/{week}/matches/{position}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| {
        match entry.tournament.match_at(path.week, path.position) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => bad_request(e),
        }
    })
}

/// Plain-text schedule report.
#[get("/api/tournaments/{id}/report")]
async fn api_report(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| {
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(entry.tournament.to_string())
    })
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_add_team)
        .service(api_import_teams)
        .service(api_remove_team)
        .service(api_start_tournament)
        .service(api_get_match)
        .service(api_report);
}

/// Where the server listens, from `HOST` and `PORT`.
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

/// Drop tournaments idle longer than `INACTIVITY_TIMEOUT`. Returns how many were dropped.
fn evict_idle(registry: &Registry) -> usize {
    let Ok(mut g) = registry.write() else {
        return 0;
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
    before - g.len()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Listening on http://{}:{}", config.host, config.port);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));

    let sweeper = state.clone();
    actix_web::rt::spawn(async move {
        let mut ticks = actix_web::rt::time::interval(SWEEP_INTERVAL);
        loop {
            ticks.tick().await;
            match evict_idle(&sweeper) {
                0 => {}
                n => log::info!("Evicted {} idle tournament(s)", n),
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn app_state() -> AppState {
        Data::new(RwLock::new(HashMap::new()))
    }

    fn create_request(body: serde_json::Value) -> test::TestRequest {
        test::TestRequest::post().uri("/api/tournaments").set_json(body)
    }

    #[actix_web::test]
    async fn full_flow_with_seed() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = create_request(serde_json::json!({ "name": "League", "seed": 7 })).to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        for name in ["A", "B", "C"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/tournaments/{id}/teams"))
                .set_json(serde_json::json!({ "name": name }))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/start"))
            .to_request();
        let started: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(started["started"], true);
        assert_eq!(started["schedule"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{id}/weeks/2/matches/1"))
            .to_request();
        let m: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(m["number"], 6);

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/teams"))
            .set_json(serde_json::json!({ "name": "Late" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn unknown_tournament_is_404() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{}/report", uuid::Uuid::new_v4()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn report_before_start_is_name() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = create_request(serde_json::json!({ "name": "Cup" })).to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{id}/report"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"Tournament Cup");
    }

    #[actix_web::test]
    async fn run_throughs_over_cap_rejected() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = create_request(serde_json::json!({ "name": "Big", "run_throughs": u32::MAX }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = create_request(serde_json::json!({ "name": "Ok", "run_throughs": MAX_RUN_THROUGHS }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    #[actix_web::test]
    async fn import_over_roster_cap_rejected() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = create_request(serde_json::json!({ "name": "Crowd" })).to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let mut csv = String::from("name\n");
        for i in 0..=MAX_TEAMS {
            csv.push_str(&format!("T{i}\n"));
        }
        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/teams/import"))
            .set_payload(csv)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{id}"))
            .to_request();
        let t: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(t["teams"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn remove_after_start_is_locked_even_for_unknown_team() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = create_request(serde_json::json!({ "name": "Pair" })).to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/teams/import"))
            .set_payload("name\nA\nB\n")
            .to_request();
        let t: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let known = t["teams"][0]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/start"))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        for team_id in [known, uuid::Uuid::new_v4().to_string()] {
            let req = test::TestRequest::delete()
                .uri(&format!("/api/tournaments/{id}/teams/{team_id}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], TournamentError::Locked.to_string());
        }
    }

    #[actix_web::test]
    async fn evict_idle_drops_only_stale_entries() {
        let registry: Registry = RwLock::new(HashMap::new());
        let stale = Instant::now()
            .checked_sub(INACTIVITY_TIMEOUT + Duration::from_secs(60))
            .unwrap();
        for last_activity in [stale, Instant::now()] {
            let tournament = RoundRobin::<Team>::new("T", 1).unwrap();
            registry.write().unwrap().insert(
                tournament.id(),
                TournamentEntry {
                    tournament,
                    seed: None,
                    last_activity,
                },
            );
        }
        assert_eq!(evict_idle(&registry), 1);
        assert_eq!(registry.read().unwrap().len(), 1);
        assert_eq!(evict_idle(&registry), 0);
    }
}
