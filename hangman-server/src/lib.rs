use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::Filter;

use crate::game_service::GameService;
use hangman_types::GameError;

pub mod config;
pub mod game_service;

#[derive(Deserialize)]
struct NewGameRequest {
    user_name: String,
    email: Option<String>,
    attempts_allowed: Option<i32>,
}

#[derive(Deserialize)]
struct MakeMoveRequest {
    guess: String,
}

#[derive(Deserialize)]
struct UserGamesQuery {
    completed: Option<bool>,
}

#[derive(Deserialize)]
struct HighScoresQuery {
    limit: Option<i64>,
}

pub fn create_routes(
    service: Arc<GameService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let service_filter = warp::any().map({
        let service = service.clone();
        move || service.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let new_game = warp::path!("game")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_new_game);

    let get_game = warp::path!("game" / String)
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_get_game);

    let make_move = warp::path!("game" / String / "move")
        .and(warp::put())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_make_move);

    let next_level = warp::path!("game" / String / "next-level")
        .and(warp::put())
        .and(service_filter.clone())
        .and_then(handle_next_level);

    let cancel_game = warp::path!("game" / String)
        .and(warp::delete())
        .and(service_filter.clone())
        .and_then(handle_cancel_game);

    let game_history = warp::path!("game" / String / "history")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_game_history);

    let user_games = warp::path!("games" / "user" / String)
        .and(warp::get())
        .and(warp::query::<UserGamesQuery>())
        .and(service_filter.clone())
        .and_then(handle_user_games);

    let rankings = warp::path!("rankings")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_rankings);

    let high_scores = warp::path!("scores" / "high")
        .and(warp::get())
        .and(warp::query::<HighScoresQuery>())
        .and(service_filter.clone())
        .and_then(handle_high_scores);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    health
        .or(new_game)
        .or(make_move)
        .or(next_level)
        .or(game_history)
        .or(get_game)
        .or(cancel_game)
        .or(user_games)
        .or(rankings)
        .or(high_scores)
        .with(cors)
        .with(warp::log("hangman"))
}

fn parse_game_key(raw: &str) -> Result<Uuid, GameError> {
    Uuid::parse_str(raw)
        .map_err(|_| GameError::Validation(format!("'{raw}' is not a valid game key")))
}

fn json_reply<T: serde::Serialize>(value: &T) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(value), StatusCode::OK)
}

fn error_reply(err: GameError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = match &err {
        GameError::Validation(_) | GameError::InvalidGuess(_) => StatusCode::BAD_REQUEST,
        GameError::NotFound(_) => StatusCode::NOT_FOUND,
        GameError::InvalidState(_) | GameError::GameOver => StatusCode::CONFLICT,
        GameError::EmptyPool | GameError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "request failed");
    }
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": err.to_string(),
            "kind": err.kind(),
        })),
        status,
    )
}

async fn handle_new_game(
    request: NewGameRequest,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service
        .new_game(
            &request.user_name,
            request.email.as_deref(),
            request.attempts_allowed,
        )
        .await;

    Ok(match result {
        Ok(snapshot) => json_reply(&snapshot),
        Err(err) => error_reply(err),
    })
}

async fn handle_get_game(
    game_key: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match parse_game_key(&game_key) {
        Ok(key) => service.get_game(key).await,
        Err(err) => Err(err),
    };

    Ok(match result {
        Ok(snapshot) => json_reply(&snapshot),
        Err(err) => error_reply(err),
    })
}

async fn handle_make_move(
    game_key: String,
    request: MakeMoveRequest,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match parse_game_key(&game_key) {
        Ok(key) => service.make_move(key, &request.guess).await,
        Err(err) => Err(err),
    };

    Ok(match result {
        Ok(snapshot) => json_reply(&snapshot),
        Err(err) => error_reply(err),
    })
}

async fn handle_next_level(
    game_key: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match parse_game_key(&game_key) {
        Ok(key) => service.next_level(key).await,
        Err(err) => Err(err),
    };

    Ok(match result {
        Ok(snapshot) => json_reply(&snapshot),
        Err(err) => error_reply(err),
    })
}

async fn handle_cancel_game(
    game_key: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match parse_game_key(&game_key) {
        Ok(key) => service.cancel_game(key).await,
        Err(err) => Err(err),
    };

    Ok(match result {
        Ok(message) => json_reply(&serde_json::json!({ "message": message })),
        Err(err) => error_reply(err),
    })
}

async fn handle_game_history(
    game_key: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match parse_game_key(&game_key) {
        Ok(key) => service.get_game_history(key).await,
        Err(err) => Err(err),
    };

    Ok(match result {
        Ok(history) => json_reply(&history),
        Err(err) => error_reply(err),
    })
}

async fn handle_user_games(
    user_name: String,
    query: UserGamesQuery,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let completed = query.completed.unwrap_or(false);
    let result = service.user_games(&user_name, completed).await;

    Ok(match result {
        Ok(snapshots) => json_reply(&snapshots),
        Err(err) => error_reply(err),
    })
}

async fn handle_rankings(service: Arc<GameService>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(match service.rankings().await {
        Ok(rankings) => json_reply(&rankings),
        Err(err) => error_reply(err),
    })
}

async fn handle_high_scores(
    query: HighScoresQuery,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(match service.high_scores(query.limit).await {
        Ok(scores) => json_reply(&scores),
        Err(err) => error_reply(err),
    })
}
