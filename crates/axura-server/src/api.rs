use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use axura_shared::stats::{AnalyticsReport, DashboardStats, Timeframe};
use axura_shared::{SubscriptionStatus, UserId, UserPatch, UserRecord};
use axura_store::UserStore;

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RwLock<UserStore>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, users: UserStore) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).put(update_user))
        .route("/stats", get(dashboard_stats))
        .route("/analytics", get(analytics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    name: String,
    version: &'static str,
}

#[derive(Deserialize)]
struct ListUsersQuery {
    /// `"true"` selects paid users; any other value selects unpaid ones.
    paid: Option<String>,
}

#[derive(Deserialize)]
struct AnalyticsQuery {
    timeframe: Option<String>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Json<Vec<UserRecord>> {
    let users = {
        let store = state.users.read().await;
        match query.paid.as_deref() {
            Some(paid) => store.with_status(SubscriptionStatus::from_paid(paid == "true")),
            None => store.all().to_vec(),
        }
    };

    simulate_latency(state.config.list_latency).await;

    debug!(paid = ?query.paid, count = users.len(), "Listed users");
    Json(users)
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, ServerError> {
    let id = UserId::from(id);
    let found = state.users.read().await.find(&id).cloned();
    let Some(user) = found else {
        return Err(ServerError::UserNotFound(id));
    };

    simulate_latency(state.config.get_latency).await;

    Ok(Json(user))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<UserRecord>, ServerError> {
    let Json(patch) = payload?;
    let id = UserId::from(id);
    let updated = state.users.write().await.update_by_id(&id, &patch).cloned();
    let Some(user) = updated else {
        return Err(ServerError::UserNotFound(id));
    };

    simulate_latency(state.config.update_latency).await;

    info!(id = %user.id, status = %user.subscription_status, "User updated via API");
    Ok(Json(user))
}

async fn dashboard_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    let store = state.users.read().await;
    Json(DashboardStats::from_users(store.all()))
}

async fn analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, ServerError> {
    let timeframe = match query.timeframe.as_deref() {
        Some(raw) => raw.parse::<Timeframe>()?,
        None => Timeframe::default(),
    };

    let store = state.users.read().await;
    Ok(Json(AnalyticsReport::from_users(store.all(), timeframe)))
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_listener(listener, state).await
}

/// Serve on an already bound listener (e.g. port 0 in tests).
pub async fn serve_listener(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %listener.local_addr()?, "Starting HTTP API server");

    axum::serve(listener, app).await?;

    Ok(())
}
