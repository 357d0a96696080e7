//! WebSocket chat client implementation.

mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::{list_servers, run_client};
