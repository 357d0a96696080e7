//! Request handlers for the HTTP and WebSocket endpoints.

mod http;
mod websocket;

pub use http::{get_config, get_online_users, health_check};
pub use websocket::websocket_handler;
