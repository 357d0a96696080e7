//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response for `GET /api/online`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineUsersDto {
    /// Online display names in join order.
    pub online_users: Vec<String>,
}

/// One selectable server endpoint (display only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEndpointDto {
    /// Human-readable endpoint name.
    pub name: String,
    /// Endpoint URL.
    pub url: String,
}

/// Response for `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDto {
    /// Selectable server endpoints.
    pub server_addresses: Vec<ServerEndpointDto>,
}
