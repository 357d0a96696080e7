//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ConfigDto, OnlineUsersDto, ServerEndpointDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the server endpoint selection list
///
/// The list is display-only: clients show it so users can pick a server,
/// the server never interprets it.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigDto> {
    // Config から DTO への変換
    let server_addresses = state
        .config
        .server_addresses
        .iter()
        .map(|endpoint| ServerEndpointDto {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
        })
        .collect();

    Json(ConfigDto { server_addresses })
}

/// Get the list of online users in join order
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<OnlineUsersDto> {
    let users = state.get_online_users_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(OnlineUsersDto {
        online_users: users.into_iter().map(|name| name.into_string()).collect(),
    })
}
