//! WebSocket chat server implementation.

mod handler;
mod server;
mod session;
mod signal;
pub mod state; // 結合テストから AppState を組み立てるため public

pub use server::{Server, build_router};
