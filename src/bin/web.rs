//! Single binary web server exposing the tournament engine as a JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), EVENT_TTL_HOURS (e.g. 12).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_tournament_web::{
    assign_lineup, calculate_standings, clear_bracket, correct_score, create_rubbers,
    event_status, generate_first_round, generate_next_round, standings, submit_score, ErrorKind,
    Event, EventError, EventId, EventStatus, Gender, Lineup, PlayerId, RubberId, RubberScores,
    SetScore, TeamId, TeamMatchId, SETS_PER_RUBBER,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-event entry: event data + last activity time (for auto-cleanup).
struct EventEntry {
    event: Event,
    last_activity: Instant,
}

/// In-memory state: events by id. Every request holds the write lock, so writes to one event are serialized.
type AppState = Data<RwLock<HashMap<EventId, EventEntry>>>;

/// Server settings read from the environment.
struct ServerConfig {
    host: String,
    port: u16,
    /// Events not accessed for this long are removed.
    event_ttl: Duration,
}

impl ServerConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;
    const DEFAULT_TTL_HOURS: u64 = 12;

    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let port = env_or("PORT", Self::DEFAULT_PORT);
        let ttl_hours = env_or("EVENT_TTL_HOURS", Self::DEFAULT_TTL_HOURS);
        Self {
            host,
            port,
            event_ttl: Duration::from_secs(ttl_hours * 3600),
        }
    }
}

/// Parse an environment variable, falling back to the default when unset or invalid.
fn env_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {key}={raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Event as returned by the API: the stored data plus its derived status.
#[derive(Serialize)]
struct EventView<'a> {
    #[serde(flatten)]
    event: &'a Event,
    status: EventStatus,
}

impl<'a> EventView<'a> {
    fn new(event: &'a Event) -> Self {
        Self {
            event,
            status: event_status(event),
        }
    }
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    gender: Gender,
}

#[derive(Deserialize)]
struct ScoreBody {
    sets: Vec<SetScore>,
}

#[derive(Deserialize)]
struct CorrectionBody {
    sets: Vec<SetScore>,
    #[serde(default)]
    reason: String,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

#[derive(Deserialize)]
struct EventTeamPath {
    id: EventId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct EventPlayerPath {
    id: EventId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct EventTeamMatchPath {
    id: EventId,
    team_match_id: TeamMatchId,
}

#[derive(Deserialize)]
struct EventRubberPath {
    id: EventId,
    rubber_id: RubberId,
}

fn error_response(e: &EventError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Validation | ErrorKind::Precondition => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: Serialize>(result: Result<T, EventError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => error_response(&e),
    }
}

/// Run `f` on the event under the write lock (404 if not found). Touching it refreshes last_activity.
fn with_event<F>(state: &AppState, id: EventId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Event) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.event)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    }
}

/// Pad up to three submitted sets with 0-0; more than three is a bad request.
fn to_rubber_scores(sets: &[SetScore]) -> Option<RubberScores> {
    if sets.len() > SETS_PER_RUBBER {
        return None;
    }
    let mut scores = RubberScores::default();
    scores[..sets.len()].copy_from_slice(sets);
    Some(scores)
}

fn too_many_sets() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": format!("A rubber has at most {SETS_PER_RUBBER} sets")
    }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// Create a new event (returns it with id; client stores id for subsequent requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Json<NameBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return error_response(&EventError::EmptyName);
    }
    let event = Event::new(name);
    let id = event.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created event {} ({})", id, event.name);
    let entry = g.entry(id).or_insert(EventEntry {
        event,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(EventView::new(&entry.event))
}

#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        HttpResponse::Ok().json(EventView::new(event))
    })
}

#[post("/api/events/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<EventPath>, body: Json<NameBody>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(event.add_team(body.name.as_str()).map(|_| EventView::new(event)))
    })
}

/// Remove a team (only before it appears in the bracket).
#[delete("/api/events/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<EventTeamPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(event.remove_team(path.team_id).map(|_| EventView::new(event)))
    })
}

#[post("/api/events/{id}/teams/{team_id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<EventTeamPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(
            event
                .add_player(path.team_id, body.name.as_str(), body.gender)
                .map(|_| EventView::new(event)),
        )
    })
}

#[delete("/api/events/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<EventPlayerPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(event.remove_player(path.player_id).map(|_| EventView::new(event)))
    })
}

/// Generate the first round from the registered teams.
#[post("/api/events/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(generate_first_round(event).map(|_| EventView::new(event)))
    })
}

/// Generate the next round once the current one is finished.
#[post("/api/events/{id}/bracket/next-round")]
async fn api_generate_next_round(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(generate_next_round(event).map(|_| EventView::new(event)))
    })
}

#[delete("/api/events/{id}/bracket")]
async fn api_clear_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        clear_bracket(event);
        HttpResponse::Ok().json(EventView::new(event))
    })
}

/// Create the five rubbers of a paired team match.
#[post("/api/events/{id}/team-matches/{team_match_id}/rubbers")]
async fn api_create_rubbers(state: AppState, path: Path<EventTeamMatchPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(create_rubbers(event, path.team_match_id).map(|_| EventView::new(event)))
    })
}

#[put("/api/events/{id}/rubbers/{rubber_id}/lineup")]
async fn api_set_lineup(
    state: AppState,
    path: Path<EventRubberPath>,
    body: Json<Lineup>,
) -> HttpResponse {
    let lineup = body.into_inner();
    with_event(&state, path.id, |event| {
        respond(assign_lineup(event, path.rubber_id, lineup).map(|_| EventView::new(event)))
    })
}

/// Submit set scores for a rubber (up to three sets, missing sets count as not played).
#[put("/api/events/{id}/rubbers/{rubber_id}/score")]
async fn api_submit_score(
    state: AppState,
    path: Path<EventRubberPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let Some(sets) = to_rubber_scores(&body.sets) else {
        return too_many_sets();
    };
    with_event(&state, path.id, |event| {
        respond(submit_score(event, path.rubber_id, sets).map(|_| EventView::new(event)))
    })
}

/// Correct a rubber's scores; the previous scores are kept in the audit trail.
#[post("/api/events/{id}/rubbers/{rubber_id}/correct")]
async fn api_correct_score(
    state: AppState,
    path: Path<EventRubberPath>,
    body: Json<CorrectionBody>,
) -> HttpResponse {
    let Some(sets) = to_rubber_scores(&body.sets) else {
        return too_many_sets();
    };
    with_event(&state, path.id, |event| {
        respond(
            correct_score(event, path.rubber_id, sets, &body.reason)
                .map(|_| EventView::new(event)),
        )
    })
}

#[get("/api/events/{id}/rubbers/{rubber_id}/corrections")]
async fn api_list_corrections(state: AppState, path: Path<EventRubberPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        respond(
            event
                .rubber(path.rubber_id)
                .map(|_| event.corrections_for(path.rubber_id)),
        )
    })
}

/// Recalculate standings from all finished rubbers.
#[post("/api/events/{id}/standings/calculate")]
async fn api_calculate_standings(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        HttpResponse::Ok().json(calculate_standings(event))
    })
}

#[get("/api/events/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |event| {
        HttpResponse::Ok().json(standings(event))
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<EventId, EventEntry>::new()));

    // Background task: every 30 minutes, remove events inactive for longer than the TTL
    let state_cleanup = state.clone();
    let event_ttl = config.event_ttl;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < event_ttl);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive event(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_event)
            .service(api_get_event)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_generate_bracket)
            .service(api_generate_next_round)
            .service(api_clear_bracket)
            .service(api_create_rubbers)
            .service(api_set_lineup)
            .service(api_submit_score)
            .service(api_correct_score)
            .service(api_list_corrections)
            .service(api_calculate_standings)
            .service(api_get_standings)
    })
    .bind(bind)?
    .run()
    .await
}
