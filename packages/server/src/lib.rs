//! Single-room WebSocket chat server library.
//!
//! This library implements a chat room where every participant holds a unique
//! display name, messages are broadcast to the whole room, and two in-chat
//! commands (`@电影` media embedding, `@川小农` bot replies) are dispatched
//! server-side.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// configuration
pub mod config;
