//! Local JSON API over the catalog, the player and the chat assistant.
//!
//! Reads come from the content store and from a view the App republishes
//! after every change. Player mutations are forwarded into the App loop as
//! [`AppMessage::Command`]s so the App stays the only owner of its state.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, RwLock};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use babeo_core::catalog::CatalogView;
use babeo_core::chat::{ChatGateway, ChatMessage};
use babeo_core::content::{Category, ContentStore, Episode};
use babeo_core::navigation::Route;
use babeo_core::playback::PlaybackSnapshot;

use crate::action::Action;
use crate::app::AppMessage;

/// Player and chat state as last published by the App.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SharedView {
    pub player: PlaybackSnapshot,
    pub transcript: Vec<ChatMessage>,
    pub loading: bool,
}

pub type SharedViewHandle = Arc<RwLock<SharedView>>;

#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<ContentStore>,
    pub gateway: ChatGateway,
    pub view: SharedViewHandle,
    pub app_tx: mpsc::Sender<AppMessage>,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
}

#[derive(Debug, Deserialize)]
struct EpisodeQuery {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NavigateRequest {
    path: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Debug, Serialize)]
struct TranscriptView {
    messages: Vec<ChatMessage>,
    loading: bool,
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/episodes", get(list_episodes))
        .route("/api/episodes/:id", get(get_episode))
        .route("/api/player", get(get_player))
        .route("/api/player/select/:id", post(select_episode))
        .route("/api/player/toggle", post(toggle))
        .route("/api/player/close", post(close))
        .route("/api/navigate", post(navigate))
        .route("/api/chat", post(chat))
        .route("/api/chat/transcript", get(transcript))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn start_server(
    bind_address: String,
    port: u16,
    state: HttpState,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let app = router(state);

        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}", addr, e);
                return;
            }
        };

        info!("HTTP API server listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    })
}

async fn list_categories(State(state): State<HttpState>) -> Json<Vec<Category>> {
    Json(state.store.categories().to_vec())
}

async fn list_episodes(
    State(state): State<HttpState>,
    Query(query): Query<EpisodeQuery>,
) -> ApiResult<Vec<Episode>> {
    let mut view = CatalogView::new(state.store.clone());
    if let Some(category) = query.category.as_deref() {
        view.set_filter(category)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    }
    Ok(Json(view.visible_episodes().into_iter().cloned().collect()))
}

async fn get_episode(
    State(state): State<HttpState>,
    Path(id): Path<String>,
) -> ApiResult<Episode> {
    state
        .store
        .episode(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("no episode {:?}", id)))
}

async fn get_player(State(state): State<HttpState>) -> Json<PlaybackSnapshot> {
    Json(state.view.read().await.player.clone())
}

async fn send(state: &HttpState, action: Action) -> StatusCode {
    if state.app_tx.send(AppMessage::Command(action)).await.is_err() {
        error!("Failed to forward HTTP command to the app loop");
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    StatusCode::OK
}

async fn select_episode(State(state): State<HttpState>, Path(id): Path<String>) -> StatusCode {
    if state.store.episode(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    info!("HTTP API: select episode {}", id);
    send(&state, Action::SelectEpisode(id)).await
}

async fn toggle(State(state): State<HttpState>) -> StatusCode {
    info!("HTTP API: toggle play/pause");
    send(&state, Action::TogglePlayPause).await
}

async fn close(State(state): State<HttpState>) -> StatusCode {
    info!("HTTP API: close player");
    send(&state, Action::ClosePlayer).await
}

async fn navigate(
    State(state): State<HttpState>,
    Json(request): Json<NavigateRequest>,
) -> StatusCode {
    let Some(route) = Route::parse(&request.path) else {
        return StatusCode::BAD_REQUEST;
    };
    if let Route::Episode(id) = &route {
        if state.store.episode(id).is_none() {
            return StatusCode::NOT_FOUND;
        }
    }
    info!("HTTP API: navigate to {}", route);
    send(&state, Action::Navigate(route)).await
}

/// One-shot question to the assistant. Does not touch the TUI transcript.
async fn chat(
    State(state): State<HttpState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<ChatResponse> {
    if request.message.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "message is empty"));
    }
    let reply = state.gateway.respond(&request.message).await;
    Ok(Json(ChatResponse { reply }))
}

async fn transcript(State(state): State<HttpState>) -> Json<TranscriptView> {
    let view = state.view.read().await;
    Json(TranscriptView {
        messages: view.transcript.clone(),
        loading: view.loading,
    })
}
