//! HttpTeamApi against a local axum server backed by MemoryTeamApi

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use scrim_core::{
    ApiConfig, ApiError, EditorAction, HttpTeamApi, MemoryTeamApi, NoTeamAction, NoTeamField,
    ScrimConfig, Store, TeamApi, TeamField, TeamRecord,
};

const TOKEN: &str = "test-token";

type Shared = Arc<MemoryTeamApi>;

#[derive(Deserialize)]
struct CreateBody {
    name: String,
}

#[derive(Deserialize)]
struct JoinBody {
    secret_key: String,
    name: String,
}

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn status(accepted: bool, rejected: StatusCode) -> StatusCode {
    if accepted {
        StatusCode::OK
    } else {
        rejected
    }
}

async fn get_team(
    State(api): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<TeamRecord>, StatusCode> {
    authorized(&headers)?;
    match api.get_user_team().await {
        Ok(Some(team)) => Ok(Json(team)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn create_team(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateBody>,
) -> StatusCode {
    if let Err(code) = authorized(&headers) {
        return code;
    }
    let accepted = api.create_team(&body.name).await.unwrap_or(false);
    status(accepted, StatusCode::CONFLICT)
}

async fn join_team(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<JoinBody>,
) -> StatusCode {
    if let Err(code) = authorized(&headers) {
        return code;
    }
    let accepted = api
        .join_team(&body.secret_key, &body.name)
        .await
        .unwrap_or(false);
    status(accepted, StatusCode::BAD_REQUEST)
}

async fn update_team(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(record): Json<TeamRecord>,
) -> StatusCode {
    if let Err(code) = authorized(&headers) {
        return code;
    }
    let accepted = api.update_team(&record).await.unwrap_or(false);
    status(accepted, StatusCode::BAD_REQUEST)
}

async fn leave_team(State(api): State<Shared>, headers: HeaderMap) -> StatusCode {
    if let Err(code) = authorized(&headers) {
        return code;
    }
    let accepted = api.leave_team().await.unwrap_or(false);
    status(accepted, StatusCode::BAD_REQUEST)
}

fn create_router(api: Shared) -> Router {
    Router::new()
        .route("/api/team", get(get_team).post(create_team).put(update_team))
        .route("/api/team/join", post(join_team))
        .route("/api/team/leave", post(leave_team))
        .with_state(api)
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn client(base_url: String, token: Option<&str>) -> HttpTeamApi {
    HttpTeamApi::new(&ApiConfig {
        base_url: Some(base_url),
        token: token.map(str::to_string),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_create_fetch_update_leave() {
    let server = Arc::new(MemoryTeamApi::new("ada"));
    let api = client(serve(create_router(server.clone())).await, Some(TOKEN));

    assert_eq!(api.get_user_team().await.unwrap(), None);
    assert!(api.create_team("Falcons").await.unwrap());
    assert!(!api.create_team("Falcons").await.unwrap());

    let mut team = api.get_user_team().await.unwrap().unwrap();
    assert_eq!(team.name, "Falcons");

    team.avatar = "http://x/y.png".to_string();
    team.auto_accept_unranked = true;
    assert!(api.update_team(&team).await.unwrap());
    let stored = server.team("Falcons").unwrap();
    assert_eq!(stored.avatar, "http://x/y.png");
    assert!(stored.auto_accept_unranked);

    assert!(api.leave_team().await.unwrap());
    assert_eq!(api.get_user_team().await.unwrap(), None);
}

#[tokio::test]
async fn test_join() {
    let server = Arc::new(MemoryTeamApi::new("ada"));
    let owls = server.seed_team("Owls", &["grace"]);
    let api = client(serve(create_router(server)).await, Some(TOKEN));

    assert!(!api.join_team("nope", "Owls").await.unwrap());
    assert!(api.join_team(&owls.team_key, "Owls").await.unwrap());
    let team = api.get_user_team().await.unwrap().unwrap();
    assert_eq!(team.users, vec!["grace".to_string(), "ada".to_string()]);
}

#[tokio::test]
async fn test_missing_token_is_an_error() {
    let server = Arc::new(MemoryTeamApi::new("ada"));
    let api = client(serve(create_router(server.clone())).await, None);

    assert!(matches!(
        api.create_team("Falcons").await,
        Err(ApiError::Status { status: 401 })
    ));
    assert!(matches!(
        api.get_user_team().await,
        Err(ApiError::Status { status: 401 })
    ));
    assert!(server.team("Falcons").is_none());
}

#[tokio::test]
async fn test_server_errors_are_errors() {
    let router = Router::new().fallback(|| async { StatusCode::SERVICE_UNAVAILABLE });
    let api = client(serve(router).await, Some(TOKEN));

    assert!(matches!(
        api.create_team("Falcons").await,
        Err(ApiError::Status { status: 503 })
    ));
    assert!(matches!(
        api.get_user_team().await,
        Err(ApiError::Status { status: 503 })
    ));
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(format!("http://{addr}/api"), Some(TOKEN));
    assert!(matches!(
        api.get_user_team().await,
        Err(ApiError::Request { .. })
    ));
}

#[tokio::test]
async fn test_store_over_http() {
    let server = Arc::new(MemoryTeamApi::new("ada"));
    let base_url = serve(create_router(server.clone())).await;

    let mut config = ScrimConfig::default();
    config.api.base_url = Some(base_url);
    config.api.token = Some(TOKEN.to_string());
    let api = scrim_core::connect(&config.api, "ada").unwrap();

    let mut store = Store::new(api, &config);
    store.mount();
    store.next().await;
    assert!(store.state().no_team().is_some());

    store.dispatch(NoTeamAction::FieldChanged {
        field: NoTeamField::TeamName,
        value: "Falcons".to_string(),
    });
    store.dispatch(NoTeamAction::CreateSubmitted);
    store.next().await;
    store.next().await;
    assert_eq!(store.state().editor().unwrap().team.name, "Falcons");

    store.dispatch(EditorAction::FieldChanged {
        field: TeamField::Bio,
        value: "We fly.".to_string(),
    });
    store.dispatch(EditorAction::SaveStarted);
    store.next().await;
    assert_eq!(server.team("Falcons").unwrap().bio, "We fly.");
}
